use anyhow::{Context, Result};
use rusqlite::{Connection, params};
use rusqlite::types::Value;

const TABLE: &str = "movies_2024";

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }

    fn chance(&mut self, p: f64) -> bool {
        self.next_f64() < p
    }

    fn pick<'a>(&mut self, items: &[&'a str]) -> &'a str {
        items[(self.next_u64() % items.len() as u64) as usize]
    }
}

/// (genre, mean rating, mean runtime, log10 of typical votes)
const GENRES: [(&str, f64, f64, f64); 8] = [
    ("Action", 6.3, 124.0, 4.6),
    ("Animation", 7.0, 98.0, 4.3),
    ("Comedy", 6.0, 102.0, 4.0),
    ("Documentary", 7.3, 92.0, 2.8),
    ("Drama", 6.8, 118.0, 3.9),
    ("Horror", 5.4, 96.0, 3.8),
    ("Sci-Fi", 6.5, 132.0, 4.8),
    ("Thriller", 6.1, 110.0, 4.1),
];

const ADJECTIVES: [&str; 10] = [
    "Silent", "Crimson", "Last", "Hidden", "Broken", "Golden", "Endless", "Midnight", "Lost",
    "Wild",
];
const NOUNS: [&str; 10] = [
    "Harbor", "Frontier", "Signal", "Garden", "Empire", "Witness", "Orbit", "Carnival", "Tide",
    "Echo",
];

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(42);
    let output_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "movies_2024.db".to_string());

    if std::path::Path::new(&output_path).exists() {
        std::fs::remove_file(&output_path)
            .with_context(|| format!("removing existing {output_path}"))?;
    }
    let mut conn = Connection::open(&output_path).context("creating database")?;
    conn.execute_batch(&format!(
        r#"CREATE TABLE {TABLE} (
               "Movie Name"    TEXT,
               "Genre"         TEXT,
               "Ratings"       TEXT,
               "Voting Counts" TEXT,
               "Duration"      TEXT
           );"#
    ))
    .context("creating table")?;

    let tx = conn.transaction().context("starting transaction")?;
    let mut rows = 0usize;
    {
        let mut insert = tx
            .prepare(&format!("INSERT INTO {TABLE} VALUES (?1, ?2, ?3, ?4, ?5)"))
            .context("preparing insert")?;

        for &(genre, mean_rating, mean_runtime, log_votes) in &GENRES {
            for _ in 0..40 {
                let name = format!("{} {}", rng.pick(&ADJECTIVES), rng.pick(&NOUNS));

                // Scraped text, occasionally unusable.
                let rating = if rng.chance(0.04) {
                    Value::Text("N/A".into())
                } else {
                    let r = rng.gauss(mean_rating, 0.9).clamp(1.0, 9.8);
                    Value::Text(format!("{r:.1}"))
                };
                let votes = if rng.chance(0.05) {
                    Value::Null
                } else {
                    let v = 10f64.powf(rng.gauss(log_votes, 0.6)).round();
                    Value::Text(format!("{v:.0}"))
                };
                let duration = if rng.chance(0.03) {
                    Value::Text("TBA".into())
                } else {
                    let d = rng.gauss(mean_runtime, 22.0).clamp(60.0, 215.0).round();
                    Value::Text(format!("{d:.0}"))
                };
                let genre = if rng.chance(0.02) {
                    Value::Null
                } else {
                    Value::Text(genre.to_string())
                };

                insert
                    .execute(params![name, genre, rating, votes, duration])
                    .context("inserting movie")?;
                rows += 1;
            }
        }
    }
    tx.commit().context("committing")?;

    println!("Wrote {rows} movies to {output_path} (table {TABLE})");
    Ok(())
}
