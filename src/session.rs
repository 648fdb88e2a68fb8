use crate::config::StoreConfig;
use crate::data::aggregate::Reports;
use crate::data::filter::{Criteria, FilteredView, VoteBounds, filtered_indices};
use crate::data::loader::{self, LoadError};
use crate::data::model::MovieTable;

// ---------------------------------------------------------------------------
// Session – one loaded table and everything derived from it alone
// ---------------------------------------------------------------------------

/// Everything a session owns. Created by one load, dropped with the session.
#[derive(Debug, Clone)]
pub struct Session {
    /// Human-readable description of where the table came from.
    pub source: String,
    table: MovieTable,
    reports: Reports,
    vote_bounds: VoteBounds,
}

/// The derived views for one set of criteria.
#[derive(Debug, Clone)]
pub struct DashboardView<'a> {
    pub filtered: FilteredView<'a>,
    /// Summaries over the unfiltered table.
    pub reports: &'a Reports,
}

impl Session {
    /// Bulk-load the table and compute the full-table summaries.
    pub fn open(config: &StoreConfig) -> Result<Self, LoadError> {
        let table = loader::load(config)?;
        Ok(Self::from_table(config.describe(), table))
    }

    pub fn from_table(source: impl Into<String>, table: MovieTable) -> Self {
        let source = source.into();
        let missing = table.missing();
        log::info!(
            "Loaded {} movies across {} genres from {source}",
            table.len(),
            table.genres().len()
        );
        if missing.total_numeric() > 0 {
            log::warn!(
                "Coerced to missing: {} ratings, {} vote counts, {} durations",
                missing.rating,
                missing.vote_count,
                missing.duration
            );
        }

        Self {
            source,
            reports: Reports::compute(&table),
            vote_bounds: VoteBounds::from_table(&table),
            table,
        }
    }

    pub fn table(&self) -> &MovieTable {
        &self.table
    }

    pub fn vote_bounds(&self) -> VoteBounds {
        self.vote_bounds
    }

    /// Initial criteria for this table.
    pub fn default_criteria(&self) -> Criteria {
        Criteria::for_table(&self.table)
    }

    /// Indices of rows passing `criteria`.
    pub fn apply(&self, criteria: &Criteria) -> Vec<usize> {
        filtered_indices(&self.table, criteria)
    }

    /// Assemble the views for already-filtered `indices`.
    pub fn render<'a>(&'a self, indices: &'a [usize]) -> DashboardView<'a> {
        DashboardView {
            filtered: FilteredView::new(&self.table, indices),
            reports: &self.reports,
        }
    }
}
