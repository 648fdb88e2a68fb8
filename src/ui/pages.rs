use eframe::egui::{Grid, ScrollArea, Ui};

use super::charts::{self, section};
use super::tables::{self, Columns};
use crate::data::model::MovieRecord;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Home page
// ---------------------------------------------------------------------------

pub fn home(ui: &mut Ui, state: &AppState) {
    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            ui.heading("📌 Project Overview");
            ui.add_space(6.0);
            ui.label(
                "Explore the 2024 movie releases by genre, duration, rating and popularity. \
                 Filter the catalogue from the side panel, compare top-rated movies per genre \
                 and spot trends in the charts on the Dashboard page.",
            );

            section(ui, "📊 Dataset");
            let Some(session) = &state.session else {
                ui.label("No dataset loaded. Use File → Open… to pick a database.");
                return;
            };
            let table = session.table();
            if table.is_empty() {
                ui.label("The movies table is empty.");
            }
            let missing = table.missing();
            summary_grid(ui, &[
                ("Source", session.source.clone()),
                ("Movies", table.len().to_string()),
                ("Genres", table.genres().len().to_string()),
                ("Missing genre", missing.genre.to_string()),
                ("Missing rating", missing.rating.to_string()),
                ("Missing vote count", missing.vote_count.to_string()),
                ("Missing duration", missing.duration.to_string()),
            ]);
        });
}

fn summary_grid(ui: &mut Ui, rows: &[(&str, String)]) {
    Grid::new("dataset_summary")
        .num_columns(2)
        .striped(true)
        .show(ui, |ui: &mut Ui| {
            for (label, value) in rows {
                ui.strong(*label);
                ui.label(value.as_str());
                ui.end_row();
            }
        });
}

// ---------------------------------------------------------------------------
// Dashboard page
// ---------------------------------------------------------------------------

pub fn dashboard(ui: &mut Ui, state: &AppState) {
    let Some(session) = &state.session else {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Open a movies database to begin  (File → Open…)");
        });
        return;
    };

    let view = session.render(&state.visible_indices);
    let reports = view.reports;
    let colors = &state.genre_colors;

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            ui.heading(format!("🎬 Filtered Movies ({})", view.filtered.len()));
            let filtered: Vec<&MovieRecord> = view.filtered.iter().collect();
            tables::movie_table(ui, "filtered_movies", &filtered, Columns::Full, 320.0);

            section(ui, "📊 Top 10 Movies by Rating and Voting Counts");
            charts::top_movies_chart(ui, &reports.top_rated);

            section(ui, "📚 Genre Distribution");
            charts::genre_distribution_chart(ui, &reports.genre_counts, colors);

            section(ui, "⏱ Average Duration by Genre");
            charts::genre_value_chart(ui, "mean_duration", "Minutes", &reports.mean_duration, colors);

            section(ui, "🗳 Voting Trends by Genre");
            charts::genre_value_chart(ui, "mean_votes", "Mean votes", &reports.mean_votes(), colors);

            section(ui, "⭐ Rating Distribution");
            ui.label("Histogram of Ratings");
            charts::rating_histogram_chart(ui, &reports.rating_histogram);
            ui.label("Boxplot of Ratings");
            charts::rating_boxplot(ui, reports.rating_box.as_ref());

            section(ui, "🎯 Top-Rated Movie Per Genre");
            let top: Vec<&MovieRecord> = reports.top_per_genre.iter().collect();
            tables::movie_table(ui, "top_per_genre", &top, Columns::Rating, 240.0);

            section(ui, "🥧 Most Popular Genres by Voting");
            charts::vote_share_pie(ui, &reports.vote_share(), colors);

            section(ui, "📏 Duration Extremes");
            match &reports.duration_extremes {
                Some(ext) => {
                    ui.label("Shortest Movie:");
                    tables::movie_table(ui, "shortest", &[&ext.shortest], Columns::Full, 40.0);
                    ui.label("Longest Movie:");
                    tables::movie_table(ui, "longest", &[&ext.longest], Columns::Full, 40.0);
                }
                None => {
                    ui.weak("No durations available.");
                }
            }

            section(ui, "🔥 Ratings by Genre (Heatmap)");
            charts::rating_heatmap(ui, &reports.rating_pivot);
        });
}
