use crate::color::GenreColors;
use crate::config::StoreConfig;
use crate::data::filter::{Criteria, DurationBucket};
use crate::session::Session;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// Top-level page selector.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Page {
    #[default]
    Home,
    Dashboard,
}

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Connection parameters of the current (or last attempted) load.
    pub config: StoreConfig,

    /// Loaded session (None until a load succeeds).
    pub session: Option<Session>,

    /// Current filter selection.
    pub criteria: Criteria,

    /// Indices of movies passing the current criteria (cached).
    pub visible_indices: Vec<usize>,

    /// One colour per genre, shared by every chart.
    pub genre_colors: GenreColors,

    pub page: Page,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(config: StoreConfig) -> Self {
        Self {
            config,
            session: None,
            criteria: Criteria::unrestricted(),
            visible_indices: Vec::new(),
            genre_colors: GenreColors::default(),
            page: Page::default(),
            status_message: None,
        }
    }

    /// Load from `config`, replacing the current session on success.
    ///
    /// A failed load ends the current session; there is no retry.
    pub fn open_store(&mut self, config: StoreConfig) {
        self.config = config;
        match Session::open(&self.config) {
            Ok(session) => self.set_session(session),
            Err(e) => {
                log::error!("Failed to load {}: {e}", self.config.describe());
                self.session = None;
                self.visible_indices.clear();
                self.status_message = Some(format!("Error: {e}"));
            }
        }
    }

    /// Ingest a newly loaded session, initialise criteria and colours.
    pub fn set_session(&mut self, session: Session) {
        self.criteria = session.default_criteria();
        self.genre_colors = GenreColors::new(session.table().genres());
        self.session = Some(session);
        self.status_message = None;
        self.refilter();
    }

    /// Recompute `visible_indices` after a criteria change.
    pub fn refilter(&mut self) {
        if let Some(session) = &self.session {
            self.visible_indices = session.apply(&self.criteria);
            log::debug!(
                "{} of {} movies match {:?}",
                self.visible_indices.len(),
                session.table().len(),
                self.criteria
            );
        }
    }

    /// Toggle a single genre in the multi-select.
    pub fn toggle_genre(&mut self, genre: &str) {
        if !self.criteria.genres.remove(genre) {
            self.criteria.genres.insert(genre.to_string());
        }
        self.refilter();
    }

    /// Clear the genre selection, which shows every genre.
    pub fn clear_genres(&mut self) {
        self.criteria.genres.clear();
        self.refilter();
    }

    /// Explicitly select every genre.
    pub fn select_all_genres(&mut self) {
        if let Some(session) = &self.session {
            self.criteria.genres = session.table().genres().clone();
            self.refilter();
        }
    }

    pub fn set_min_rating(&mut self, min_rating: f64) {
        self.criteria.min_rating = min_rating.clamp(0.0, 10.0);
        self.refilter();
    }

    /// Set the vote range; the ends are swapped if given out of order.
    pub fn set_vote_range(&mut self, lo: f64, hi: f64) {
        self.criteria.vote_range.lo = lo.min(hi);
        self.criteria.vote_range.hi = lo.max(hi);
        self.refilter();
    }

    pub fn set_duration(&mut self, bucket: DurationBucket) {
        self.criteria.duration = bucket;
        self.refilter();
    }

    /// Back to the defaults for the loaded table.
    pub fn reset_criteria(&mut self) {
        if let Some(session) = &self.session {
            self.criteria = session.default_criteria();
            self.refilter();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::filter::VoteRange;
    use crate::data::model::{MovieRecord, MovieTable};

    fn loaded_state() -> AppState {
        let mut state = AppState::new(StoreConfig::default());
        state.set_session(Session::from_table(
            "test",
            MovieTable::from_records(vec![
                MovieRecord::new("Long Drama")
                    .with_genre("Drama")
                    .with_rating(8.0)
                    .with_votes(1000.0)
                    .with_duration(190.0),
                MovieRecord::new("Short Comedy")
                    .with_genre("Comedy")
                    .with_rating(6.0)
                    .with_votes(10.0)
                    .with_duration(85.0),
                MovieRecord::new("Weak Comedy")
                    .with_genre("Comedy")
                    .with_rating(4.0)
                    .with_votes(500.0)
                    .with_duration(100.0),
            ]),
        ));
        state
    }

    #[test]
    fn opens_on_home_page() {
        let state = AppState::new(StoreConfig::default());
        assert_eq!(state.page, Page::Home);
        assert_eq!(loaded_state().page, Page::Home);
    }

    #[test]
    fn session_sets_defaults() {
        let state = loaded_state();
        assert_eq!(state.criteria.min_rating, 5.0);
        assert_eq!(state.criteria.vote_range, VoteRange::new(10.0, 1000.0));
        assert_eq!(state.visible_indices, [0, 1]);
    }

    #[test]
    fn genre_toggling_and_clearing() {
        let mut state = loaded_state();
        state.toggle_genre("Comedy");
        assert_eq!(state.visible_indices, [1]);
        state.toggle_genre("Comedy");
        assert!(state.criteria.genres.is_empty());
        assert_eq!(state.visible_indices, [0, 1]);

        state.select_all_genres();
        assert_eq!(state.criteria.genres.len(), 2);
        assert_eq!(state.visible_indices, [0, 1]);
        state.clear_genres();
        assert!(state.criteria.genres.is_empty());
    }

    #[test]
    fn numeric_controls_refilter() {
        let mut state = loaded_state();
        state.set_min_rating(0.0);
        assert_eq!(state.visible_indices, [0, 1, 2]);
        state.set_vote_range(600.0, 100.0);
        assert_eq!(state.criteria.vote_range, VoteRange::new(100.0, 600.0));
        assert_eq!(state.visible_indices, [2]);
        state.set_vote_range(0.0, 2000.0);
        state.set_duration(DurationBucket::Long);
        assert_eq!(state.visible_indices, [0]);
        state.reset_criteria();
        assert_eq!(state.visible_indices, [0, 1]);
    }

    #[test]
    fn failed_load_ends_session() {
        let mut state = loaded_state();
        let dir = tempfile::tempdir().unwrap();
        state.open_store(StoreConfig {
            database: dir.path().join("missing.db"),
            table: "movies_2024".into(),
        });
        assert!(state.session.is_none());
        assert!(state.visible_indices.is_empty());
        assert!(state.status_message.as_deref().unwrap().starts_with("Error"));
    }
}
