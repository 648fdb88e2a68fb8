use eframe::egui::Ui;
use egui_extras::{Column, TableBuilder};

use crate::data::model::{Cell, MovieRecord};

const ROW_HEIGHT: f32 = 18.0;
const HEADER_HEIGHT: f32 = 20.0;

/// Which columns a movie table shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Columns {
    /// Name, genre, rating, votes, duration.
    Full,
    /// Name, genre, rating.
    Rating,
}

impl Columns {
    fn titles(self) -> &'static [&'static str] {
        match self {
            Columns::Full => &["Movie Name", "Genre", "Ratings", "Voting Counts", "Duration"],
            Columns::Rating => &["Movie Name", "Genre", "Ratings"],
        }
    }
}

/// Render movies as a striped table. `max_height` bounds the scroll area.
pub fn movie_table(ui: &mut Ui, id: &str, rows: &[&MovieRecord], columns: Columns, max_height: f32) {
    if rows.is_empty() {
        ui.weak("No movies match.");
        return;
    }
    let titles = columns.titles();

    ui.push_id(id, |ui: &mut Ui| {
        TableBuilder::new(ui)
            .striped(true)
            .resizable(true)
            .vscroll(true)
            .max_scroll_height(max_height)
            .column(Column::initial(260.0).at_least(120.0).clip(true))
            .columns(Column::auto().at_least(80.0), titles.len() - 2)
            .column(Column::remainder().at_least(80.0))
            .header(HEADER_HEIGHT, |mut header| {
                for title in titles {
                    header.col(|ui: &mut Ui| {
                        ui.strong(*title);
                    });
                }
            })
            .body(|body| {
                body.rows(ROW_HEIGHT, rows.len(), |mut row| {
                    let rec = rows[row.index()];
                    row.col(|ui: &mut Ui| {
                        ui.label(rec.name.as_str());
                    });
                    row.col(|ui: &mut Ui| {
                        ui.label(rec.genre.as_deref().unwrap_or("–"));
                    });
                    row.col(|ui: &mut Ui| {
                        ui.label(Cell(rec.rating).to_string());
                    });
                    if columns == Columns::Full {
                        row.col(|ui: &mut Ui| {
                            ui.label(Cell(rec.vote_count).to_string());
                        });
                        row.col(|ui: &mut Ui| {
                            ui.label(Cell(rec.duration).to_string());
                        });
                    }
                });
            });
    });
}
