//! Fixed summary views over the full movie table.
//!
//! Every function here is pure and independent of the others. An empty
//! table, or a column with no values, yields an empty result rather than
//! an error.

use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};

use super::model::{MovieRecord, MovieTable};

/// How many rows the "top movies" chart shows.
pub const TOP_N: usize = 10;
/// Width of a rating histogram bin.
pub const RATING_BIN_WIDTH: f64 = 0.5;
/// Upper bound on fixed-width histogram bins.
const MAX_HISTOGRAM_BINS: usize = 1_000;
/// Equal-width bin count used when the ratings span too wide a range.
const FALLBACK_HISTOGRAM_BINS: usize = 20;
/// Tukey fence multiplier for the boxplot whiskers.
const WHISKER_IQR: f64 = 1.5;

// ---------------------------------------------------------------------------
// Result types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct GenreCount {
    pub genre: String,
    pub count: usize,
}

/// One number per genre (means, sums, pivot cells).
#[derive(Debug, Clone, PartialEq)]
pub struct GenreValue {
    pub genre: String,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GenreVotes {
    pub genre: String,
    /// `None` when every vote count in the genre is missing.
    pub mean: Option<f64>,
    /// Sum of present vote counts (0 when all are missing).
    pub sum: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DurationExtremes {
    pub shortest: MovieRecord,
    pub longest: MovieRecord,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HistogramBin {
    pub start: f64,
    pub end: f64,
    pub count: usize,
}

/// Five-number summary plus outliers, Tukey style.
#[derive(Debug, Clone, PartialEq)]
pub struct BoxStats {
    pub lower_whisker: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub upper_whisker: f64,
    pub outliers: Vec<f64>,
    pub count: usize,
}

// ---------------------------------------------------------------------------
// Reports – every summary, computed once per loaded table
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default)]
pub struct Reports {
    pub top_rated: Vec<MovieRecord>,
    pub genre_counts: Vec<GenreCount>,
    pub mean_duration: Vec<GenreValue>,
    pub votes: Vec<GenreVotes>,
    pub top_per_genre: Vec<MovieRecord>,
    pub duration_extremes: Option<DurationExtremes>,
    pub rating_pivot: Vec<GenreValue>,
    pub rating_histogram: Vec<HistogramBin>,
    pub rating_box: Option<BoxStats>,
}

impl Reports {
    pub fn compute(table: &MovieTable) -> Self {
        Self {
            top_rated: top_by_rating(table, TOP_N),
            genre_counts: genre_distribution(table),
            mean_duration: mean_duration_by_genre(table),
            votes: votes_by_genre(table),
            top_per_genre: top_rated_per_genre(table),
            duration_extremes: duration_extremes(table),
            rating_pivot: rating_pivot(table),
            rating_histogram: rating_histogram(table, RATING_BIN_WIDTH),
            rating_box: rating_box_stats(table),
        }
    }

    /// Genres with a present mean vote count, in genre order.
    pub fn mean_votes(&self) -> Vec<GenreValue> {
        self.votes
            .iter()
            .filter_map(|v| {
                v.mean.map(|value| GenreValue {
                    genre: v.genre.clone(),
                    value,
                })
            })
            .collect()
    }

    /// Pie slices: summed votes per genre, positive sums only.
    pub fn vote_share(&self) -> Vec<GenreValue> {
        self.votes
            .iter()
            .filter(|v| v.sum > 0.0)
            .map(|v| GenreValue {
                genre: v.genre.clone(),
                value: v.sum,
            })
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Records grouped by non-missing genre, genres sorted, rows in table order.
fn group_by_genre(table: &MovieTable) -> BTreeMap<&str, Vec<&MovieRecord>> {
    let mut groups: BTreeMap<&str, Vec<&MovieRecord>> = BTreeMap::new();
    for rec in table.records() {
        if let Some(genre) = rec.genre.as_deref() {
            groups.entry(genre).or_default().push(rec);
        }
    }
    groups
}

fn mean(values: impl Iterator<Item = Option<f64>>) -> Option<f64> {
    let (sum, n) = values
        .flatten()
        .fold((0.0, 0usize), |(sum, n), v| (sum + v, n + 1));
    (n > 0).then(|| sum / n as f64)
}

/// Descending order with missing values last.
fn desc_missing_last(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(x), Some(y)) => y.total_cmp(&x),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

fn per_genre_mean(
    table: &MovieTable,
    field: impl Fn(&MovieRecord) -> Option<f64>,
) -> Vec<GenreValue> {
    group_by_genre(table)
        .into_iter()
        .filter_map(|(genre, rows)| {
            mean(rows.iter().map(|r| field(r))).map(|value| GenreValue {
                genre: genre.to_string(),
                value,
            })
        })
        .collect()
}

/// Linear-interpolated quantile of sorted, non-empty data.
fn quantile(sorted: &[f64], q: f64) -> f64 {
    let pos = q * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    let frac = pos - lo as f64;
    // Weighted form: the difference of two extreme values may overflow.
    sorted[lo] * (1.0 - frac) + sorted[hi] * frac
}

// ---------------------------------------------------------------------------
// Aggregates
// ---------------------------------------------------------------------------

/// First `n` records by rating desc, then vote count desc; missing ratings last.
pub fn top_by_rating(table: &MovieTable, n: usize) -> Vec<MovieRecord> {
    let mut rows: Vec<&MovieRecord> = table.records().iter().collect();
    // Stable: full ties keep table order.
    rows.sort_by(|a, b| {
        desc_missing_last(a.rating, b.rating)
            .then_with(|| desc_missing_last(a.vote_count, b.vote_count))
    });
    rows.into_iter().take(n).cloned().collect()
}

/// Record count per genre, most frequent first; ties keep first-seen order.
/// Records without a genre are not counted.
pub fn genre_distribution(table: &MovieTable) -> Vec<GenreCount> {
    let mut counts: Vec<GenreCount> = Vec::new();
    let mut position: HashMap<&str, usize> = HashMap::new();

    for genre in table.records().iter().filter_map(|r| r.genre.as_deref()) {
        match position.get(genre) {
            Some(&i) => counts[i].count += 1,
            None => {
                position.insert(genre, counts.len());
                counts.push(GenreCount {
                    genre: genre.to_string(),
                    count: 1,
                });
            }
        }
    }

    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts
}

/// Mean runtime per genre, ascending by mean.
pub fn mean_duration_by_genre(table: &MovieTable) -> Vec<GenreValue> {
    let mut means = per_genre_mean(table, |r| r.duration);
    means.sort_by(|a, b| a.value.total_cmp(&b.value));
    means
}

/// Mean and sum of vote counts per genre, in genre order.
pub fn votes_by_genre(table: &MovieTable) -> Vec<GenreVotes> {
    group_by_genre(table)
        .into_iter()
        .map(|(genre, rows)| GenreVotes {
            genre: genre.to_string(),
            mean: mean(rows.iter().map(|r| r.vote_count)),
            sum: rows.iter().filter_map(|r| r.vote_count).sum(),
        })
        .collect()
}

/// Highest-rated record of each genre (first on ties), in genre order.
pub fn top_rated_per_genre(table: &MovieTable) -> Vec<MovieRecord> {
    group_by_genre(table)
        .into_values()
        .filter_map(|rows| {
            rows.into_iter()
                .filter_map(|r| r.rating.map(|rating| (rating, r)))
                .fold(None, |best: Option<(f64, &MovieRecord)>, (rating, r)| match best {
                    Some((top, _)) if rating <= top => best,
                    _ => Some((rating, r)),
                })
                .map(|(_, r)| r.clone())
        })
        .collect()
}

/// Shortest and longest record by runtime; first occurrence wins ties.
pub fn duration_extremes(table: &MovieTable) -> Option<DurationExtremes> {
    let mut timed = table
        .records()
        .iter()
        .filter_map(|r| r.duration.map(|d| (d, r)));
    let (first_d, first) = timed.next()?;

    let ((_, shortest), (_, longest)) = timed.fold(
        ((first_d, first), (first_d, first)),
        |(short, long), (d, r)| {
            let short = if d < short.0 { (d, r) } else { short };
            let long = if d > long.0 { (d, r) } else { long };
            (short, long)
        },
    );

    Some(DurationExtremes {
        shortest: shortest.clone(),
        longest: longest.clone(),
    })
}

/// Mean rating per genre as a single-column matrix keyed by genre.
pub fn rating_pivot(table: &MovieTable) -> Vec<GenreValue> {
    per_genre_mean(table, |r| r.rating)
}

/// Counts of ratings in `bin_width`-wide bins covering the observed range.
pub fn rating_histogram(table: &MovieTable, bin_width: f64) -> Vec<HistogramBin> {
    let ratings: Vec<f64> = table.records().iter().filter_map(|r| r.rating).collect();
    let Some(min) = ratings.iter().copied().reduce(f64::min) else {
        return Vec::new();
    };
    let max = ratings.iter().copied().fold(min, f64::max);

    let start = (min / bin_width).floor() * bin_width;
    let span = (max - start) / bin_width;
    // Outlying ratings would ask for an unbounded number of fixed-width bins.
    let fixed = span.is_finite() && span < MAX_HISTOGRAM_BINS as f64;
    let n_bins = if fixed {
        span.floor() as usize + 1
    } else {
        FALLBACK_HISTOGRAM_BINS
    };
    // Equal-width fallback edges interpolate so nothing overflows near the f64 limits.
    let edge = |i: usize| {
        if fixed {
            start + i as f64 * bin_width
        } else {
            let t = i as f64 / n_bins as f64;
            min * (1.0 - t) + max * t
        }
    };
    let width = if fixed {
        bin_width
    } else {
        max / n_bins as f64 - min / n_bins as f64
    };
    let origin = edge(0);

    let mut bins: Vec<HistogramBin> = (0..n_bins)
        .map(|i| HistogramBin {
            start: edge(i),
            end: edge(i + 1),
            count: 0,
        })
        .collect();

    for r in ratings {
        // `as` saturates, and the clamp keeps the maximum in the last bin.
        let i = ((r / width - origin / width).floor() as usize).min(n_bins - 1);
        bins[i].count += 1;
    }
    bins
}

/// Boxplot statistics of the present ratings.
pub fn rating_box_stats(table: &MovieTable) -> Option<BoxStats> {
    let mut ratings: Vec<f64> = table.records().iter().filter_map(|r| r.rating).collect();
    if ratings.is_empty() {
        return None;
    }
    ratings.sort_by(f64::total_cmp);

    let q1 = quantile(&ratings, 0.25);
    let median = quantile(&ratings, 0.5);
    let q3 = quantile(&ratings, 0.75);
    let iqr = q3 - q1;
    let (low_fence, high_fence) = (q1 - WHISKER_IQR * iqr, q3 + WHISKER_IQR * iqr);

    let in_fence = |v: f64| v >= low_fence && v <= high_fence;
    // Sorted, so the whiskers are the first and last values inside the fences.
    let lower_whisker = ratings.iter().copied().find(|&v| in_fence(v)).unwrap_or(q1);
    let upper_whisker = ratings.iter().copied().rfind(|&v| in_fence(v)).unwrap_or(q3);
    let outliers = ratings.iter().copied().filter(|&v| !in_fence(v)).collect();

    Some(BoxStats {
        lower_whisker,
        q1,
        median,
        q3,
        upper_whisker,
        outliers,
        count: ratings.len(),
    })
}
