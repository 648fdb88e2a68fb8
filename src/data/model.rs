use std::collections::BTreeSet;
use std::fmt;

// ---------------------------------------------------------------------------
// Parse-or-missing coercion
// ---------------------------------------------------------------------------

/// Interpret a raw text cell as a number.
///
/// Anything that does not parse to a finite `f64` (empty cells, `"N/A"`,
/// `"1,2K"`, `"nan"`) becomes `None`. Never fails.
pub fn parse_or_missing(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

// ---------------------------------------------------------------------------
// MovieRecord – one row of the movies table
// ---------------------------------------------------------------------------

/// A single movie (one row of the source table).
#[derive(Debug, Clone, PartialEq)]
pub struct MovieRecord {
    /// Display name; not guaranteed unique.
    pub name: String,
    pub genre: Option<String>,
    pub rating: Option<f64>,
    pub vote_count: Option<f64>,
    /// Runtime in minutes.
    pub duration: Option<f64>,
}

impl MovieRecord {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            genre: None,
            rating: None,
            vote_count: None,
            duration: None,
        }
    }

    pub fn with_genre(mut self, genre: impl Into<String>) -> Self {
        self.genre = Some(genre.into());
        self
    }

    pub fn with_rating(mut self, rating: f64) -> Self {
        self.rating = Some(rating);
        self
    }

    pub fn with_votes(mut self, votes: f64) -> Self {
        self.vote_count = Some(votes);
        self
    }

    pub fn with_duration(mut self, minutes: f64) -> Self {
        self.duration = Some(minutes);
        self
    }
}

/// Formats an optional number for table cells.
pub struct Cell(pub Option<f64>);

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(v) if v.fract() == 0.0 => write!(f, "{v:.0}"),
            Some(v) => write!(f, "{v:.1}"),
            None => write!(f, "–"),
        }
    }
}

// ---------------------------------------------------------------------------
// MissingCounts – how many numeric cells were coerced to missing
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MissingCounts {
    pub genre: usize,
    pub rating: usize,
    pub vote_count: usize,
    pub duration: usize,
}

impl MissingCounts {
    pub fn total_numeric(&self) -> usize {
        self.rating + self.vote_count + self.duration
    }
}

// ---------------------------------------------------------------------------
// MovieTable – the complete loaded dataset
// ---------------------------------------------------------------------------

/// The loaded movies, in source order, with a pre-computed genre index.
///
/// Read-only once built: every filter and aggregate derives a new view.
#[derive(Debug, Clone, Default)]
pub struct MovieTable {
    records: Vec<MovieRecord>,
    /// Sorted set of distinct non-missing genres.
    genres: BTreeSet<String>,
    missing: MissingCounts,
}

impl MovieTable {
    /// Build the genre index and missing-value counts from loaded records.
    pub fn from_records(records: Vec<MovieRecord>) -> Self {
        let mut genres = BTreeSet::new();
        let mut missing = MissingCounts::default();

        for rec in &records {
            match &rec.genre {
                Some(g) => {
                    genres.insert(g.clone());
                }
                None => missing.genre += 1,
            }
            missing.rating += usize::from(rec.rating.is_none());
            missing.vote_count += usize::from(rec.vote_count.is_none());
            missing.duration += usize::from(rec.duration.is_none());
        }

        MovieTable {
            records,
            genres,
            missing,
        }
    }

    pub fn records(&self) -> &[MovieRecord] {
        &self.records
    }

    pub fn get(&self, idx: usize) -> Option<&MovieRecord> {
        self.records.get(idx)
    }

    /// Distinct genres, sorted.
    pub fn genres(&self) -> &BTreeSet<String> {
        &self.genres
    }

    pub fn missing(&self) -> MissingCounts {
        self.missing
    }

    /// Number of movies.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
