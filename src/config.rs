use std::path::PathBuf;

/// Environment variable naming the SQLite database (or CSV export).
pub const DATABASE_ENV: &str = "MOVIES_DATABASE";
/// Environment variable naming the movies table inside the database.
pub const TABLE_ENV: &str = "MOVIES_TABLE";

pub const DEFAULT_DATABASE: &str = "movies_2024.db";
pub const DEFAULT_TABLE: &str = "movies_2024";

// ---------------------------------------------------------------------------
// Store connection parameters
// ---------------------------------------------------------------------------

/// Where to read the movies table from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub database: PathBuf,
    pub table: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            database: PathBuf::from(DEFAULT_DATABASE),
            table: DEFAULT_TABLE.to_string(),
        }
    }
}

impl StoreConfig {
    /// Read `MOVIES_DATABASE` / `MOVIES_TABLE`, falling back to defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let non_empty = |key: &str| lookup(key).filter(|v: &String| !v.trim().is_empty());
        Self {
            database: non_empty(DATABASE_ENV)
                .map(PathBuf::from)
                .unwrap_or(defaults.database),
            table: non_empty(TABLE_ENV).unwrap_or(defaults.table),
        }
    }

    /// Same table, different database file (used by the open dialog).
    pub fn with_database(&self, database: PathBuf) -> Self {
        Self {
            database,
            table: self.table.clone(),
        }
    }

    /// Short label for the status bar.
    pub fn describe(&self) -> String {
        let file = self
            .database
            .file_name()
            .map(|f| f.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.database.display().to_string());
        format!("{file} / {}", self.table)
    }
}
