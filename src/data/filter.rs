use std::collections::BTreeSet;
use std::fmt;

use super::model::{MovieRecord, MovieTable};

// ---------------------------------------------------------------------------
// Duration buckets
// ---------------------------------------------------------------------------

/// The four fixed runtime ranges offered by the duration selector.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum DurationBucket {
    #[default]
    All,
    /// `< 120` minutes.
    Short,
    /// `120 ..= 180` minutes.
    Standard,
    /// `> 180` minutes.
    Long,
}

impl DurationBucket {
    pub const ALL: [DurationBucket; 4] = [
        DurationBucket::All,
        DurationBucket::Short,
        DurationBucket::Standard,
        DurationBucket::Long,
    ];

    /// Whether a runtime falls in this bucket. Missing runtimes only match `All`.
    pub fn contains(self, duration: Option<f64>) -> bool {
        match (self, duration) {
            (DurationBucket::All, _) => true,
            (_, None) => false,
            (DurationBucket::Short, Some(d)) => d < 120.0,
            (DurationBucket::Standard, Some(d)) => (120.0..=180.0).contains(&d),
            (DurationBucket::Long, Some(d)) => d > 180.0,
        }
    }
}

impl fmt::Display for DurationBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            DurationBucket::All => "All",
            DurationBucket::Short => "< 120 mins",
            DurationBucket::Standard => "120–180 mins",
            DurationBucket::Long => "> 180 mins",
        };
        f.write_str(label)
    }
}

// ---------------------------------------------------------------------------
// Vote-count range
// ---------------------------------------------------------------------------

/// Closed interval `[lo, hi]` over vote counts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VoteRange {
    pub lo: f64,
    pub hi: f64,
}

impl VoteRange {
    pub const UNBOUNDED: VoteRange = VoteRange {
        lo: f64::NEG_INFINITY,
        hi: f64::INFINITY,
    };

    pub fn new(lo: f64, hi: f64) -> Self {
        Self { lo, hi }
    }

    /// Inclusive membership; missing vote counts never match.
    pub fn contains(&self, votes: Option<f64>) -> bool {
        votes.is_some_and(|v| self.lo <= v && v <= self.hi)
    }
}

/// Slider bounds derived from the observed vote counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VoteBounds {
    pub min: i64,
    pub max: i64,
}

impl VoteBounds {
    /// Used for `min` when no vote count is present.
    pub const FALLBACK_MIN: i64 = 0;
    /// Used for `max` when no vote count is present.
    pub const FALLBACK_MAX: i64 = 100_000;

    /// Observed min/max, truncated to integers.
    pub fn from_table(table: &MovieTable) -> Self {
        let votes = table.records().iter().filter_map(|r| r.vote_count);
        let (min, max) = votes.fold((None, None), |(lo, hi): (Option<f64>, Option<f64>), v| {
            (
                Some(lo.map_or(v, |lo| lo.min(v))),
                Some(hi.map_or(v, |hi| hi.max(v))),
            )
        });
        Self {
            min: min.map_or(Self::FALLBACK_MIN, |v| v as i64),
            max: max.map_or(Self::FALLBACK_MAX, |v| v as i64),
        }
    }

    pub fn full_range(&self) -> VoteRange {
        VoteRange::new(self.min as f64, self.max as f64)
    }
}

// ---------------------------------------------------------------------------
// Criteria
// ---------------------------------------------------------------------------

/// The user's current filter selection.
#[derive(Debug, Clone, PartialEq)]
pub struct Criteria {
    /// Selected genres. Empty means every genre, not none.
    pub genres: BTreeSet<String>,
    pub min_rating: f64,
    pub vote_range: VoteRange,
    pub duration: DurationBucket,
}

impl Criteria {
    pub const DEFAULT_MIN_RATING: f64 = 5.0;

    /// Initial controls for a freshly loaded table.
    pub fn for_table(table: &MovieTable) -> Self {
        Self {
            genres: BTreeSet::new(),
            min_rating: Self::DEFAULT_MIN_RATING,
            vote_range: VoteBounds::from_table(table).full_range(),
            duration: DurationBucket::All,
        }
    }

    /// The widest selection: every record with a non-negative rating and any vote count.
    pub fn unrestricted() -> Self {
        Self {
            genres: BTreeSet::new(),
            min_rating: 0.0,
            vote_range: VoteRange::UNBOUNDED,
            duration: DurationBucket::All,
        }
    }

    fn genre_matches(&self, record: &MovieRecord) -> bool {
        self.genres.is_empty()
            || record
                .genre
                .as_ref()
                .is_some_and(|g| self.genres.contains(g))
    }

    fn rating_matches(&self, record: &MovieRecord) -> bool {
        record.rating.is_some_and(|r| r >= self.min_rating)
    }
}

// ---------------------------------------------------------------------------
// Filtering
// ---------------------------------------------------------------------------

/// Return indices (in table order) of records passing all criteria.
///
/// Stages run in a fixed order, each narrowing the previous result:
/// genre → rating → vote range → duration.
pub fn filtered_indices(table: &MovieTable, criteria: &Criteria) -> Vec<usize> {
    let records = table.records();
    let mut indices: Vec<usize> = (0..records.len()).collect();

    if !criteria.genres.is_empty() {
        indices.retain(|&i| criteria.genre_matches(&records[i]));
    }
    indices.retain(|&i| criteria.rating_matches(&records[i]));
    indices.retain(|&i| criteria.vote_range.contains(records[i].vote_count));
    if criteria.duration != DurationBucket::All {
        indices.retain(|&i| criteria.duration.contains(records[i].duration));
    }

    indices
}

/// A borrowed, read-only projection of the table onto the filtered rows.
#[derive(Debug, Clone)]
pub struct FilteredView<'a> {
    table: &'a MovieTable,
    indices: &'a [usize],
}

impl<'a> FilteredView<'a> {
    pub fn new(table: &'a MovieTable, indices: &'a [usize]) -> Self {
        Self { table, indices }
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a MovieRecord> + '_ {
        self.indices.iter().filter_map(|&idx| self.table.get(idx))
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    fn sample_table() -> MovieTable {
        MovieTable::from_records(vec![
            MovieRecord::new("Short Drama")
                .with_genre("Drama")
                .with_rating(7.5)
                .with_votes(1_000.0)
                .with_duration(95.0),
            MovieRecord::new("Epic Drama")
                .with_genre("Drama")
                .with_rating(8.2)
                .with_votes(250_000.0)
                .with_duration(200.0),
            MovieRecord::new("Action Standard")
                .with_genre("Action")
                .with_rating(6.1)
                .with_votes(40_000.0)
                .with_duration(120.0),
            MovieRecord::new("Unrated Horror")
                .with_genre("Horror")
                .with_votes(500.0)
                .with_duration(88.0),
            MovieRecord::new("No Genre")
                .with_rating(9.0)
                .with_votes(10.0)
                .with_duration(180.0),
            MovieRecord::new("Bad Comedy")
                .with_genre("Comedy")
                .with_rating(3.0)
                .with_duration(100.0),
        ])
    }

    /// Independent oracle for the staged filter.
    fn satisfies(c: &Criteria, r: &MovieRecord) -> bool {
        let genre_ok = c.genres.is_empty() || r.genre.as_ref().is_some_and(|g| c.genres.contains(g));
        let rating_ok = matches!(r.rating, Some(v) if v >= c.min_rating);
        let votes_ok = matches!(r.vote_count, Some(v) if v >= c.vote_range.lo && v <= c.vote_range.hi);
        let duration_ok = match (c.duration, r.duration) {
            (DurationBucket::All, _) => true,
            (_, None) => false,
            (DurationBucket::Short, Some(d)) => d < 120.0,
            (DurationBucket::Standard, Some(d)) => (120.0..=180.0).contains(&d),
            (DurationBucket::Long, Some(d)) => d > 180.0,
        };
        genre_ok && rating_ok && votes_ok && duration_ok
    }

    fn names(table: &MovieTable, idx: &[usize]) -> Vec<String> {
        FilteredView::new(table, idx)
            .iter()
            .map(|r| r.name.clone())
            .collect()
    }

    #[test]
    fn bucket_boundaries() {
        assert!(DurationBucket::Short.contains(Some(119.9)));
        assert!(!DurationBucket::Short.contains(Some(120.0)));
        assert!(DurationBucket::Standard.contains(Some(120.0)));
        assert!(DurationBucket::Standard.contains(Some(180.0)));
        assert!(!DurationBucket::Long.contains(Some(180.0)));
        assert!(DurationBucket::Long.contains(Some(180.5)));
        assert!(DurationBucket::All.contains(None));
        assert!(!DurationBucket::Standard.contains(None));
    }

    #[test]
    fn empty_genre_selection_means_all() {
        let table = sample_table();
        let idx = filtered_indices(&table, &Criteria::unrestricted());
        // Only the unrated and the unvoted rows drop out.
        assert_eq!(
            names(&table, &idx),
            ["Short Drama", "Epic Drama", "Action Standard", "No Genre"]
        );
    }

    #[test]
    fn genre_selection_excludes_missing_genre() {
        let table = sample_table();
        let mut criteria = Criteria::unrestricted();
        criteria.genres = BTreeSet::from(["Drama".to_string()]);
        let idx = filtered_indices(&table, &criteria);
        assert_eq!(names(&table, &idx), ["Short Drama", "Epic Drama"]);
    }

    #[test]
    fn combined_criteria_are_anded() {
        let table = sample_table();
        let criteria = Criteria {
            genres: BTreeSet::from(["Drama".to_string(), "Action".to_string()]),
            min_rating: 6.0,
            vote_range: VoteRange::new(1_000.0, 100_000.0),
            duration: DurationBucket::Short,
        };
        let idx = filtered_indices(&table, &criteria);
        assert_eq!(names(&table, &idx), ["Short Drama"]);
    }

    #[test]
    fn vote_range_is_inclusive() {
        let table = sample_table();
        let mut criteria = Criteria::unrestricted();
        criteria.vote_range = VoteRange::new(1_000.0, 40_000.0);
        let idx = filtered_indices(&table, &criteria);
        assert_eq!(names(&table, &idx), ["Short Drama", "Action Standard"]);
    }

    #[test]
    fn defaults_for_table() {
        let table = sample_table();
        let criteria = Criteria::for_table(&table);
        assert!(criteria.genres.is_empty());
        assert_eq!(criteria.min_rating, 5.0);
        assert_eq!(criteria.vote_range, VoteRange::new(10.0, 250_000.0));
        assert_eq!(criteria.duration, DurationBucket::All);
    }

    #[test]
    fn vote_bounds_fall_back_when_all_missing() {
        let table = MovieTable::from_records(vec![
            MovieRecord::new("A").with_rating(7.0),
            MovieRecord::new("B"),
        ]);
        assert_eq!(VoteBounds::from_table(&table), VoteBounds { min: 0, max: 100_000 });
        assert_eq!(
            VoteBounds::from_table(&MovieTable::default()),
            VoteBounds { min: 0, max: 100_000 }
        );
    }

    #[test]
    fn vote_bounds_truncate() {
        let table = MovieTable::from_records(vec![
            MovieRecord::new("A").with_votes(12.9),
            MovieRecord::new("B").with_votes(99.7),
        ]);
        assert_eq!(VoteBounds::from_table(&table), VoteBounds { min: 12, max: 99 });
    }

    #[test]
    fn filtering_an_empty_table() {
        let table = MovieTable::default();
        assert!(filtered_indices(&table, &Criteria::for_table(&table)).is_empty());
    }

    // -- property tests --

    fn arb_record() -> impl Strategy<Value = MovieRecord> {
        (
            proptest::option::of(prop::sample::select(vec!["Drama", "Action", "Comedy"])),
            proptest::option::of(0.0f64..10.0),
            proptest::option::of(0.0f64..500_000.0),
            proptest::option::of(60.0f64..240.0),
        )
            .prop_map(|(genre, rating, votes, duration)| MovieRecord {
                name: "movie".into(),
                genre: genre.map(String::from),
                rating,
                vote_count: votes,
                duration,
            })
    }

    fn arb_criteria() -> impl Strategy<Value = Criteria> {
        (
            prop::collection::btree_set(
                prop::sample::select(vec!["Drama", "Action", "Comedy", "Horror"]),
                0..3,
            ),
            0.0f64..10.0,
            0.0f64..300_000.0,
            0.0f64..300_000.0,
            prop::sample::select(DurationBucket::ALL.to_vec()),
        )
            .prop_map(|(genres, min_rating, a, b, duration)| Criteria {
                genres: genres.into_iter().map(String::from).collect(),
                min_rating,
                vote_range: VoteRange::new(a.min(b), a.max(b)),
                duration,
            })
    }

    proptest! {
        #[test]
        fn narrowing_only_removes_rows(
            records in prop::collection::vec(arb_record(), 0..40),
            criteria in arb_criteria(),
        ) {
            let table = MovieTable::from_records(records);
            let wide = filtered_indices(&table, &Criteria::unrestricted());
            let mut narrow_criteria = criteria;
            narrow_criteria.genres.clear();
            let narrow = filtered_indices(&table, &narrow_criteria);
            prop_assert!(narrow.iter().all(|i| wide.contains(i)));
        }

        #[test]
        fn every_row_satisfies_every_criterion(
            records in prop::collection::vec(arb_record(), 0..40),
            criteria in arb_criteria(),
        ) {
            let table = MovieTable::from_records(records);
            let idx = filtered_indices(&table, &criteria);
            for rec in FilteredView::new(&table, &idx).iter() {
                prop_assert!(satisfies(&criteria, rec));
            }
            // And nothing matching was dropped.
            let expected = table.records().iter().filter(|r| satisfies(&criteria, r)).count();
            prop_assert_eq!(idx.len(), expected);
        }

        #[test]
        fn applying_twice_is_idempotent(
            records in prop::collection::vec(arb_record(), 0..40),
            criteria in arb_criteria(),
        ) {
            let table = MovieTable::from_records(records);
            let once = filtered_indices(&table, &criteria);
            let narrowed = MovieTable::from_records(
                FilteredView::new(&table, &once).iter().cloned().collect(),
            );
            let twice = filtered_indices(&narrowed, &criteria);
            prop_assert_eq!(once.len(), twice.len());
            prop_assert_eq!(twice, (0..narrowed.len()).collect::<Vec<_>>());
        }
    }
}
