use std::f32::consts::{FRAC_PI_2, TAU};

use eframe::egui::{Align2, Color32, FontId, Pos2, Rect, Sense, Shape, Stroke, Ui, Vec2};
use egui_plot::{
    Bar, BarChart, BoxElem, BoxPlot, BoxSpread, Legend, Plot, PlotPoints, Points,
};

use crate::color::{DivergingScale, GenreColors};
use crate::data::aggregate::{BoxStats, GenreCount, GenreValue, HistogramBin};
use crate::data::model::MovieRecord;

const CHART_HEIGHT: f32 = 260.0;
const BAR_WIDTH: f64 = 0.7;
const ACCENT: Color32 = Color32::from_rgb(100, 149, 237);
const VOTES_ACCENT: Color32 = Color32::from_rgb(255, 160, 90);

fn empty_notice(ui: &mut Ui) {
    ui.weak("No data to show.");
}

/// Dashboard charts are static: no pan or zoom inside the scrolling page.
fn static_plot(plot: Plot) -> Plot {
    plot.height(CHART_HEIGHT)
        .legend(Legend::default())
        .allow_scroll(false)
        .allow_drag(false)
        .allow_zoom(false)
        .allow_boxed_zoom(false)
}

/// One bar per category; the legend carries the category names.
fn category_bars(ui: &mut Ui, id: &str, y_label: &str, items: &[(String, f64, Color32)]) {
    if items.is_empty() {
        empty_notice(ui);
        return;
    }
    static_plot(Plot::new(id))
        .y_axis_label(y_label)
        .show_axes([false, true])
        .show(ui, |plot_ui| {
            for (i, (label, value, color)) in items.iter().enumerate() {
                let bar = Bar::new(i as f64, *value).width(BAR_WIDTH).name(label);
                plot_ui.bar_chart(BarChart::new(vec![bar]).name(label).color(*color));
            }
        });
}

// ---------------------------------------------------------------------------
// Bar charts
// ---------------------------------------------------------------------------

/// Top movies as two stacked plots, `Ratings` and `Voting Counts`.
///
/// Bars are placed by rank so repeated titles stay distinct.
pub fn top_movies_chart(ui: &mut Ui, top: &[MovieRecord]) {
    if top.is_empty() {
        empty_notice(ui);
        return;
    }
    let series = |field: fn(&MovieRecord) -> Option<f64>| -> Vec<Bar> {
        ranked_series(top, field)
            .into_iter()
            .map(|(x, value, label)| Bar::new(x, value).width(BAR_WIDTH).name(label))
            .collect()
    };
    let len = top.len();

    for (id, name, bars, color) in [
        ("top_movies_ratings", "Ratings", series(|m| m.rating), ACCENT),
        ("top_movies_votes", "Voting Counts", series(|m| m.vote_count), VOTES_ACCENT),
    ] {
        static_plot(Plot::new(id))
            .height(CHART_HEIGHT * 0.7)
            .y_axis_label(name)
            .x_axis_formatter(move |mark, _range| rank_label(mark.value, len))
            .show(ui, |plot_ui| {
                plot_ui.bar_chart(BarChart::new(bars).name(name).color(color));
            });
    }
}

/// `(rank position, value, "#rank name")` for each movie with a value.
fn ranked_series(
    top: &[MovieRecord],
    field: fn(&MovieRecord) -> Option<f64>,
) -> Vec<(f64, f64, String)> {
    top.iter()
        .enumerate()
        .filter_map(|(i, m)| Some((i as f64, field(m)?, format!("#{} {}", i + 1, m.name))))
        .collect()
}

/// `#n` under whole-number ticks inside `0..len`, blank elsewhere.
fn rank_label(value: f64, len: usize) -> String {
    let rounded = value.round();
    if (value - rounded).abs() < 1e-6 && rounded >= 0.0 && (rounded as usize) < len {
        format!("#{}", rounded as usize + 1)
    } else {
        String::new()
    }
}

pub fn genre_distribution_chart(ui: &mut Ui, counts: &[GenreCount], colors: &GenreColors) {
    let items: Vec<_> = counts
        .iter()
        .map(|c| (c.genre.clone(), c.count as f64, colors.color_for(&c.genre)))
        .collect();
    category_bars(ui, "genre_distribution", "Movies", &items);
}

/// Per-genre values (mean duration, mean votes).
pub fn genre_value_chart(
    ui: &mut Ui,
    id: &str,
    y_label: &str,
    values: &[GenreValue],
    colors: &GenreColors,
) {
    let items: Vec<_> = values
        .iter()
        .map(|v| (v.genre.clone(), v.value, colors.color_for(&v.genre)))
        .collect();
    category_bars(ui, id, y_label, &items);
}

pub fn rating_histogram_chart(ui: &mut Ui, bins: &[HistogramBin]) {
    if bins.is_empty() {
        empty_notice(ui);
        return;
    }
    let bars: Vec<Bar> = bins
        .iter()
        .map(|b| {
            Bar::new((b.start + b.end) / 2.0, b.count as f64)
                .width(b.end - b.start)
                .name(format!("{:.1}–{:.1}", b.start, b.end))
        })
        .collect();
    static_plot(Plot::new("rating_histogram"))
        .y_axis_label("Movies")
        .x_axis_label("Rating")
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).name("Ratings").color(ACCENT));
        });
}

// ---------------------------------------------------------------------------
// Boxplot
// ---------------------------------------------------------------------------

pub fn rating_boxplot(ui: &mut Ui, stats: Option<&BoxStats>) {
    let Some(stats) = stats else {
        empty_notice(ui);
        return;
    };
    let spread = BoxSpread::new(
        stats.lower_whisker,
        stats.q1,
        stats.median,
        stats.q3,
        stats.upper_whisker,
    );
    let elem = BoxElem::new(0.0, spread)
        .name(format!("Ratings (n = {})", stats.count))
        .box_width(0.5)
        .whisker_width(0.3);

    static_plot(Plot::new("rating_boxplot"))
        .height(CHART_HEIGHT * 0.6)
        .x_axis_label("Rating")
        .show_axes([true, false])
        .show(ui, |plot_ui| {
            plot_ui.box_plot(BoxPlot::new(vec![elem]).name("Ratings").horizontal().color(ACCENT));
            if !stats.outliers.is_empty() {
                let points: PlotPoints = stats.outliers.iter().map(|&v| [v, 0.0]).collect();
                plot_ui.points(Points::new(points).radius(3.0).color(ACCENT).name("Outliers"));
            }
        });
}

// ---------------------------------------------------------------------------
// Pie chart
// ---------------------------------------------------------------------------

/// Angular step when tessellating slices into convex triangles.
const PIE_STEP: f32 = TAU / 180.0;

pub fn vote_share_pie(ui: &mut Ui, shares: &[GenreValue], colors: &GenreColors) {
    let total: f64 = shares.iter().map(|s| s.value).sum();
    if shares.is_empty() || total <= 0.0 {
        empty_notice(ui);
        return;
    }

    let size = Vec2::new(ui.available_width().min(560.0), 320.0);
    let (response, painter) = ui.allocate_painter(size, Sense::hover());
    let rect = response.rect;
    let radius = (rect.height() / 2.0 - 10.0).max(10.0);
    let center = Pos2::new(rect.left() + radius + 10.0, rect.center().y);
    let text_color = ui.visuals().text_color();

    let mut start = -FRAC_PI_2;
    for (i, share) in shares.iter().enumerate() {
        let fraction = (share.value / total) as f32;
        let sweep = fraction * TAU;
        let color = colors.color_for(&share.genre);

        let steps = ((sweep / PIE_STEP).ceil() as usize).max(1);
        for s in 0..steps {
            let a0 = start + sweep * s as f32 / steps as f32;
            let a1 = start + sweep * (s + 1) as f32 / steps as f32;
            painter.add(Shape::convex_polygon(
                vec![center, polar(center, radius, a0), polar(center, radius, a1)],
                color,
                Stroke::NONE,
            ));
        }

        if fraction >= 0.03 {
            painter.text(
                polar(center, radius * 0.65, start + sweep / 2.0),
                Align2::CENTER_CENTER,
                format!("{:.1}%", fraction * 100.0),
                FontId::proportional(12.0),
                Color32::BLACK,
            );
        }

        // Legend to the right of the pie.
        let y = rect.top() + 12.0 + i as f32 * 18.0;
        let x = center.x + radius + 24.0;
        if y < rect.bottom() {
            painter.rect_filled(
                Rect::from_min_size(Pos2::new(x, y - 6.0), Vec2::splat(12.0)),
                0.0_f32,
                color,
            );
            painter.text(
                Pos2::new(x + 18.0, y),
                Align2::LEFT_CENTER,
                &share.genre,
                FontId::proportional(13.0),
                text_color,
            );
        }

        start += sweep;
    }
}

fn polar(center: Pos2, radius: f32, angle: f32) -> Pos2 {
    center + radius * Vec2::angled(angle)
}

// ---------------------------------------------------------------------------
// Heatmap
// ---------------------------------------------------------------------------

const HEAT_LABEL_WIDTH: f32 = 150.0;
const HEAT_CELL: Vec2 = Vec2::new(140.0, 26.0);
const HEAT_BAR_WIDTH: f32 = 18.0;

/// Mean rating per genre as a one-column annotated matrix with a colour bar.
pub fn rating_heatmap(ui: &mut Ui, pivot: &[GenreValue]) {
    let Some(scale) = DivergingScale::spanning(pivot.iter().map(|c| c.value)) else {
        empty_notice(ui);
        return;
    };

    let rows = pivot.len() as f32;
    let height = (rows + 1.0) * HEAT_CELL.y;
    let width = HEAT_LABEL_WIDTH + HEAT_CELL.x + 24.0 + HEAT_BAR_WIDTH + 60.0;
    let (response, painter) = ui.allocate_painter(Vec2::new(width, height), Sense::hover());
    let origin = response.rect.min;
    let text_color = ui.visuals().text_color();

    // Column header.
    painter.text(
        origin + Vec2::new(HEAT_LABEL_WIDTH + HEAT_CELL.x / 2.0, HEAT_CELL.y / 2.0),
        Align2::CENTER_CENTER,
        "Ratings",
        FontId::proportional(13.0),
        text_color,
    );

    for (i, cell) in pivot.iter().enumerate() {
        let top = origin.y + (i as f32 + 1.0) * HEAT_CELL.y;
        painter.text(
            Pos2::new(origin.x + HEAT_LABEL_WIDTH - 8.0, top + HEAT_CELL.y / 2.0),
            Align2::RIGHT_CENTER,
            &cell.genre,
            FontId::proportional(13.0),
            text_color,
        );
        let rect = Rect::from_min_size(Pos2::new(origin.x + HEAT_LABEL_WIDTH, top), HEAT_CELL);
        painter.rect_filled(rect, 0.0_f32, scale.color_for(cell.value));
        painter.text(
            rect.center(),
            Align2::CENTER_CENTER,
            format!("{:.2}", cell.value),
            FontId::proportional(13.0),
            scale.text_color_for(cell.value),
        );
    }

    // Colour bar: max at the top, min at the bottom.
    let bar_left = origin.x + HEAT_LABEL_WIDTH + HEAT_CELL.x + 24.0;
    let bar_top = origin.y + HEAT_CELL.y;
    let bar_height = rows * HEAT_CELL.y;
    let segments = 32;
    for s in 0..segments {
        let t0 = s as f32 / segments as f32;
        let t1 = (s + 1) as f32 / segments as f32;
        let value = scale.value_at(1.0 - (t0 + t1) / 2.0);
        painter.rect_filled(
            Rect::from_min_max(
                Pos2::new(bar_left, bar_top + t0 * bar_height),
                Pos2::new(bar_left + HEAT_BAR_WIDTH, bar_top + t1 * bar_height),
            ),
            0.0_f32,
            scale.color_for(value),
        );
    }
    for (label, y) in [(scale.max(), bar_top), (scale.min(), bar_top + bar_height)] {
        painter.text(
            Pos2::new(bar_left + HEAT_BAR_WIDTH + 6.0, y),
            Align2::LEFT_CENTER,
            format!("{label:.2}"),
            FontId::proportional(11.0),
            text_color,
        );
    }
}

/// Horizontal rule between dashboard sections.
pub fn section(ui: &mut Ui, title: &str) {
    ui.add_space(12.0);
    ui.separator();
    ui.heading(title);
    ui.add_space(4.0);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ranked_series_keeps_duplicate_titles_apart() {
        let top = vec![
            MovieRecord::new("Echo").with_rating(9.0).with_votes(500.0),
            MovieRecord::new("Echo").with_rating(8.5),
            MovieRecord::new("Tide").with_rating(8.0).with_votes(20.0),
        ];
        let ratings = ranked_series(&top, |m| m.rating);
        let labels: Vec<&str> = ratings.iter().map(|(_, _, l)| l.as_str()).collect();
        assert_eq!(labels, ["#1 Echo", "#2 Echo", "#3 Tide"]);

        // Missing votes leave a gap at that rank.
        let votes = ranked_series(&top, |m| m.vote_count);
        let points: Vec<(f64, f64)> = votes.iter().map(|&(x, v, _)| (x, v)).collect();
        assert_eq!(points, [(0.0, 500.0), (2.0, 20.0)]);
    }

    #[test]
    fn rank_labels_only_on_whole_positions() {
        assert_eq!(rank_label(0.0, 3), "#1");
        assert_eq!(rank_label(2.0, 3), "#3");
        assert_eq!(rank_label(0.5, 3), "");
        assert_eq!(rank_label(3.0, 3), "");
        assert_eq!(rank_label(-1.0, 3), "");
    }
}
