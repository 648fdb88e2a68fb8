use std::path::Path;

use rusqlite::types::ValueRef;
use rusqlite::{Connection, OpenFlags};
use serde::Deserialize;
use thiserror::Error;

use super::model::{MovieRecord, MovieTable, parse_or_missing};
use crate::config::StoreConfig;

// ---------------------------------------------------------------------------
// Source schema
// ---------------------------------------------------------------------------

pub const NAME_COLUMN: &str = "Movie Name";
pub const GENRE_COLUMN: &str = "Genre";
pub const RATING_COLUMN: &str = "Ratings";
pub const VOTES_COLUMN: &str = "Voting Counts";
pub const DURATION_COLUMN: &str = "Duration";

const REQUIRED_COLUMNS: [&str; 5] = [
    NAME_COLUMN,
    GENRE_COLUMN,
    RATING_COLUMN,
    VOTES_COLUMN,
    DURATION_COLUMN,
];

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("cannot open store {path}: {source}")]
    Connection {
        path: String,
        #[source]
        source: rusqlite::Error,
    },
    #[error("query against table '{table}' failed: {source}")]
    Query {
        table: String,
        #[source]
        source: rusqlite::Error,
    },
    #[error("source is missing column '{0}'")]
    MissingColumn(&'static str),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("unsupported source: {0}")]
    UnsupportedSource(String),
}

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load the movies table described by `config`.
///
/// `.csv` paths are read as a CSV export of the table; everything else is
/// opened as a SQLite database. The connection lives only for this call.
pub fn load(config: &StoreConfig) -> Result<MovieTable, LoadError> {
    let path = config.database.as_path();
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "csv" => load_csv(path),
        "xlsx" | "parquet" | "json" => {
            Err(LoadError::UnsupportedSource(path.display().to_string()))
        }
        _ => load_sqlite(path, &config.table),
    }
}

// ---------------------------------------------------------------------------
// SQLite loader
// ---------------------------------------------------------------------------

fn load_sqlite(path: &Path, table: &str) -> Result<MovieTable, LoadError> {
    // Read-only: a missing file is a connection error, never a new database.
    let conn = Connection::open_with_flags(
        path,
        OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
    )
    .map_err(|source| LoadError::Connection {
        path: path.display().to_string(),
        source,
    })?;

    load_from_connection(&conn, table)
}

/// Run the single bulk `SELECT *` against an open connection.
pub fn load_from_connection(conn: &Connection, table: &str) -> Result<MovieTable, LoadError> {
    let query_err = |source| LoadError::Query {
        table: table.to_string(),
        source,
    };

    let sql = format!("SELECT * FROM \"{}\"", table.replace('"', "\"\""));
    let mut stmt = conn.prepare(&sql).map_err(query_err)?;

    let columns: Vec<String> = stmt.column_names().into_iter().map(String::from).collect();
    let idx = |name: &'static str| {
        columns
            .iter()
            .position(|c| c == name)
            .ok_or(LoadError::MissingColumn(name))
    };
    let name_idx = idx(NAME_COLUMN)?;
    let genre_idx = idx(GENRE_COLUMN)?;
    let rating_idx = idx(RATING_COLUMN)?;
    let votes_idx = idx(VOTES_COLUMN)?;
    let duration_idx = idx(DURATION_COLUMN)?;

    let mut rows = stmt.query([]).map_err(query_err)?;
    let mut records = Vec::new();

    while let Some(row) = rows.next().map_err(query_err)? {
        let cell = |i: usize| row.get_ref(i).map_err(query_err);
        records.push(MovieRecord {
            name: text_value(cell(name_idx)?).unwrap_or_default(),
            genre: text_value(cell(genre_idx)?),
            rating: numeric_value(cell(rating_idx)?),
            vote_count: numeric_value(cell(votes_idx)?),
            duration: numeric_value(cell(duration_idx)?),
        });
    }

    Ok(MovieTable::from_records(records))
}

// -- SQLite value coercion --

fn text_value(value: ValueRef<'_>) -> Option<String> {
    match value {
        ValueRef::Text(bytes) => Some(String::from_utf8_lossy(bytes).into_owned()),
        ValueRef::Integer(i) => Some(i.to_string()),
        ValueRef::Real(f) => Some(f.to_string()),
        ValueRef::Null | ValueRef::Blob(_) => None,
    }
}

fn numeric_value(value: ValueRef<'_>) -> Option<f64> {
    match value {
        ValueRef::Integer(i) => Some(i as f64),
        ValueRef::Real(f) => Some(f).filter(|v| v.is_finite()),
        ValueRef::Text(bytes) => std::str::from_utf8(bytes).ok().and_then(parse_or_missing),
        ValueRef::Null | ValueRef::Blob(_) => None,
    }
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// One CSV row, numeric columns kept as text until coerced.
#[derive(Debug, Deserialize)]
struct CsvRow {
    #[serde(rename = "Movie Name")]
    name: Option<String>,
    #[serde(rename = "Genre")]
    genre: Option<String>,
    #[serde(rename = "Ratings")]
    rating: Option<String>,
    #[serde(rename = "Voting Counts")]
    vote_count: Option<String>,
    #[serde(rename = "Duration")]
    duration: Option<String>,
}

fn load_csv(path: &Path) -> Result<MovieTable, LoadError> {
    let mut reader = csv::Reader::from_path(path)?;
    let headers = reader.headers()?.clone();
    for required in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == required) {
            return Err(LoadError::MissingColumn(required));
        }
    }

    let mut records = Vec::new();
    for row in reader.deserialize::<CsvRow>() {
        let row = row?;
        let numeric = |raw: Option<String>| raw.as_deref().and_then(parse_or_missing);
        records.push(MovieRecord {
            name: row.name.unwrap_or_default(),
            genre: row.genre.filter(|g| !g.is_empty()),
            rating: numeric(row.rating),
            vote_count: numeric(row.vote_count),
            duration: numeric(row.duration),
        });
    }

    Ok(MovieTable::from_records(records))
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn seeded_connection() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(
            r#"CREATE TABLE movies_2024 (
                   "Movie Name" TEXT,
                   "Genre" TEXT,
                   "Ratings" TEXT,
                   "Voting Counts" TEXT,
                   "Duration" INTEGER
               );
               INSERT INTO movies_2024 VALUES ('Dune: Part Two', 'Sci-Fi', '8.5', '600000', 166);
               INSERT INTO movies_2024 VALUES ('Untitled', NULL, 'N/A', '1.2K', NULL);
               INSERT INTO movies_2024 VALUES ('Civil War', 'Action', 7.1, 150000, '109');"#,
        )
        .unwrap();
        conn
    }

    #[test]
    fn loads_rows_in_order_and_coerces_numbers() {
        let conn = seeded_connection();
        let table = load_from_connection(&conn, "movies_2024").unwrap();

        assert_eq!(table.len(), 3);
        let names: Vec<&str> = table.records().iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["Dune: Part Two", "Untitled", "Civil War"]);

        let dune = &table.records()[0];
        assert_eq!(dune.genre.as_deref(), Some("Sci-Fi"));
        assert_eq!(dune.rating, Some(8.5));
        assert_eq!(dune.vote_count, Some(600000.0));
        assert_eq!(dune.duration, Some(166.0));

        let civil_war = &table.records()[2];
        assert_eq!(civil_war.rating, Some(7.1));
        assert_eq!(civil_war.duration, Some(109.0));
    }

    #[test]
    fn unparseable_values_become_missing() {
        let conn = seeded_connection();
        let table = load_from_connection(&conn, "movies_2024").unwrap();

        let untitled = &table.records()[1];
        assert_eq!(untitled.genre, None);
        assert_eq!(untitled.rating, None);
        assert_eq!(untitled.vote_count, None);
        assert_eq!(untitled.duration, None);
        assert_eq!(table.missing().total_numeric(), 3);
    }

    #[test]
    fn missing_table_is_a_query_error() {
        let conn = Connection::open_in_memory().unwrap();
        let err = load_from_connection(&conn, "movies_2024").unwrap_err();
        assert!(matches!(err, LoadError::Query { .. }), "{err}");
    }

    #[test]
    fn missing_column_is_reported() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(
            r#"CREATE TABLE movies_2024 ("Movie Name" TEXT, "Genre" TEXT, "Ratings" REAL);"#,
        )
        .unwrap();
        let err = load_from_connection(&conn, "movies_2024").unwrap_err();
        assert!(matches!(err, LoadError::MissingColumn(VOTES_COLUMN)), "{err}");
    }

    #[test]
    fn unreachable_store_is_a_connection_error() {
        let dir = tempfile::tempdir().unwrap();
        let config = StoreConfig {
            database: dir.path().join("absent.db"),
            table: "movies_2024".into(),
        };
        let err = load(&config).unwrap_err();
        assert!(matches!(err, LoadError::Connection { .. }), "{err}");
    }

    #[test]
    fn loads_from_database_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("movies.db");
        {
            let conn = Connection::open(&path).unwrap();
            conn.execute_batch(
                r#"CREATE TABLE films ("Movie Name" TEXT, "Genre" TEXT, "Ratings" REAL,
                                       "Voting Counts" INTEGER, "Duration" REAL);
                   INSERT INTO films VALUES ('Anora', 'Drama', 7.7, 90000, 139.0);"#,
            )
            .unwrap();
        }

        let config = StoreConfig {
            database: path,
            table: "films".into(),
        };
        let table = load(&config).unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.records()[0].vote_count, Some(90000.0));
    }

    #[test]
    fn loads_csv_export() {
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        writeln!(file, "Movie Name,Genre,Ratings,Voting Counts,Duration").unwrap();
        writeln!(file, "Wicked,Musical,7.4,120000,160").unwrap();
        writeln!(file, "Mystery,,n/a,,95").unwrap();
        file.flush().unwrap();

        let config = StoreConfig {
            database: file.path().to_path_buf(),
            table: "ignored".into(),
        };
        let table = load(&config).unwrap();

        assert_eq!(table.len(), 2);
        assert_eq!(table.records()[0].genre.as_deref(), Some("Musical"));
        assert_eq!(table.records()[0].duration, Some(160.0));
        let mystery = &table.records()[1];
        assert_eq!(mystery.genre, None);
        assert_eq!(mystery.rating, None);
        assert_eq!(mystery.vote_count, None);
        assert_eq!(mystery.duration, Some(95.0));
    }

    #[test]
    fn rejects_non_tabular_sources() {
        let config = StoreConfig {
            database: "movies.json".into(),
            table: "movies_2024".into(),
        };
        assert!(matches!(load(&config), Err(LoadError::UnsupportedSource(_))));
    }

    #[test]
    fn csv_without_required_header_fails() {
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        writeln!(file, "Movie Name,Genre,Ratings,Voting Counts").unwrap();
        writeln!(file, "Wicked,Musical,7.4,120000").unwrap();
        file.flush().unwrap();

        let config = StoreConfig {
            database: file.path().to_path_buf(),
            table: "ignored".into(),
        };
        let err = load(&config).unwrap_err();
        assert!(matches!(err, LoadError::MissingColumn(DURATION_COLUMN)), "{err}");
    }
}
