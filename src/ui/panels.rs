use eframe::egui::{self, Color32, RichText, ScrollArea, Slider, Ui};

use crate::data::filter::DurationBucket;
use crate::state::{AppState, Page};

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("🔍 Filter Options");
    ui.separator();

    let Some(session) = &state.session else {
        ui.label("No dataset loaded.");
        return;
    };

    // Clone what we need so we can mutate state inside the closures.
    let genres: Vec<String> = session.table().genres().iter().cloned().collect();
    let bounds = session.vote_bounds();

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            // ---- Genre multi-select ----
            let n_selected = state.criteria.genres.len();
            let header_text = if n_selected == 0 {
                format!("Select Genre  (all {})", genres.len())
            } else {
                format!("Select Genre  ({n_selected}/{})", genres.len())
            };
            egui::CollapsingHeader::new(RichText::new(header_text).strong())
                .id_salt("genre_filter")
                .default_open(true)
                .show(ui, |ui: &mut Ui| {
                    ui.horizontal(|ui: &mut Ui| {
                        if ui.small_button("All").clicked() {
                            state.select_all_genres();
                        }
                        if ui.small_button("Clear").clicked() {
                            state.clear_genres();
                        }
                    });

                    for genre in &genres {
                        let mut checked = state.criteria.genres.contains(genre);
                        let text = RichText::new(genre).color(state.genre_colors.color_for(genre));
                        if ui.checkbox(&mut checked, text).changed() {
                            state.toggle_genre(genre);
                        }
                    }
                });
            ui.separator();

            // ---- Minimum rating ----
            ui.strong("Minimum Rating");
            let mut min_rating = state.criteria.min_rating;
            if ui
                .add(Slider::new(&mut min_rating, 0.0..=10.0).step_by(0.1))
                .changed()
            {
                state.set_min_rating(min_rating);
            }
            ui.separator();

            // ---- Vote-count range ----
            ui.strong("Select Voting Count Range");
            let range = bounds.min as f64..=bounds.max as f64;
            let mut lo = state.criteria.vote_range.lo;
            let mut hi = state.criteria.vote_range.hi;
            let lo_changed = ui
                .add(Slider::new(&mut lo, range.clone()).integer().text("min"))
                .changed();
            let hi_changed = ui
                .add(Slider::new(&mut hi, range).integer().text("max"))
                .changed();
            if lo_changed || hi_changed {
                state.set_vote_range(lo, hi);
            }
            ui.separator();

            // ---- Duration bucket ----
            ui.strong("Duration Filter (in minutes)");
            let current = state.criteria.duration;
            egui::ComboBox::from_id_salt("duration_filter")
                .selected_text(current.to_string())
                .show_ui(ui, |ui: &mut Ui| {
                    for bucket in DurationBucket::ALL {
                        if ui
                            .selectable_label(current == bucket, bucket.to_string())
                            .clicked()
                        {
                            state.set_duration(bucket);
                        }
                    }
                });
            ui.separator();

            if ui.button("Reset filters").clicked() {
                state.reset_criteria();
            }
        });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_store_dialog(state);
                ui.close_menu();
            }
            if ui.button("Reload").clicked() {
                let config = state.config.clone();
                state.open_store(config);
                ui.close_menu();
            }
        });

        ui.separator();
        ui.selectable_value(&mut state.page, Page::Home, "Home");
        ui.selectable_value(&mut state.page, Page::Dashboard, "Dashboard");
        ui.separator();

        if let Some(session) = &state.session {
            ui.label(format!(
                "{} movies loaded, {} visible  ·  {}",
                session.table().len(),
                state.visible_indices.len(),
                session.source
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// Open dialog
// ---------------------------------------------------------------------------

pub fn open_store_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open movies database")
        .add_filter("Supported files", &["db", "sqlite", "sqlite3", "csv"])
        .add_filter("SQLite", &["db", "sqlite", "sqlite3"])
        .add_filter("CSV", &["csv"])
        .pick_file();

    if let Some(path) = file {
        let config = state.config.with_database(path);
        state.open_store(config);
    }
}
