use std::f32::consts::{FRAC_PI_2, TAU};

use eframe::egui::{Align2, Color32, FontId, Mesh, Pos2, RichText, Sense, Shape, Stroke, Ui, Vec2};
use egui_plot::{Legend, Plot, PlotPoints, Points};

use crate::data::filter::scatter_title;
use crate::data::model::SiteSelection;
use crate::state::AppState;

/// Triangles per full turn when tessellating pie slices.
const PIE_SEGMENTS: usize = 180;

// ---------------------------------------------------------------------------
// Pie chart
// ---------------------------------------------------------------------------

/// Render the pie chart with its legend to the right.
pub fn pie_chart(ui: &mut Ui, state: &AppState) {
    let pie = &state.pie;
    ui.heading(&pie.title);

    let total = pie.total();
    if total <= 0.0 {
        ui.label(RichText::new(empty_pie_message(&state.site, pie.slices.len())).italics());
        return;
    }

    ui.horizontal(|ui: &mut Ui| {
        let size = ui.available_width().min(320.0);
        let (rect, response) = ui.allocate_exact_size(Vec2::splat(size), Sense::hover());
        let painter = ui.painter_at(rect);
        let center = rect.center();
        let radius = size * 0.45;

        // Slice boundaries as fractions of a full turn, clockwise from 12 o'clock.
        let mut start = 0.0_f32;
        let mut spans = Vec::with_capacity(pie.slices.len());
        for slice in &pie.slices {
            let frac = (slice.value / total) as f32;
            spans.push((start, start + frac));
            start += frac;
        }

        for (slice, &(from, to)) in pie.slices.iter().zip(&spans) {
            if to <= from {
                continue;
            }
            let color = state.pie_colors.color_for(&slice.label);
            painter.add(Shape::mesh(sector_mesh(center, radius, from, to, color)));

            let mid = angle_of(0.5 * (from + to));
            let label_pos = center + Vec2::angled(mid) * radius * 0.65;
            painter.text(
                label_pos,
                Align2::CENTER_CENTER,
                format!("{:.1}%", (to - from) * 100.0),
                FontId::proportional(12.0),
                Color32::WHITE,
            );
        }

        // Slice separators.
        if spans.len() > 1 {
            for &(from, _) in &spans {
                let edge = center + Vec2::angled(angle_of(from)) * radius;
                painter.line_segment([center, edge], Stroke::new(1.5, Color32::WHITE));
            }
        }

        if let Some(pos) = response.hover_pos() {
            let offset = pos - center;
            if offset.length() <= radius {
                let turn = (offset.y.atan2(offset.x) + FRAC_PI_2).rem_euclid(TAU) / TAU;
                let hovered = spans
                    .iter()
                    .position(|&(from, to)| from <= turn && turn < to);
                if let Some(i) = hovered {
                    let slice = &pie.slices[i];
                    response.on_hover_text_at_pointer(format!(
                        "{}\n{}\n{:.1}%",
                        slice.label,
                        format_value(slice.value),
                        slice.value / total * 100.0
                    ));
                }
            }
        }

        ui.vertical(|ui: &mut Ui| {
            for slice in &pie.slices {
                let color = state.pie_colors.color_for(&slice.label);
                ui.horizontal(|ui: &mut Ui| {
                    ui.label(RichText::new("■").color(color));
                    ui.label(format!(
                        "{}  {}  ({:.1}%)",
                        slice.label,
                        format_value(slice.value),
                        slice.value / total * 100.0
                    ));
                });
            }
        });
    });
}

/// Why a pie has nothing to draw. Under `ALL` the slices are success
/// percentages, so sites can exist while every slice is zero.
fn empty_pie_message(site: &SiteSelection, slice_count: usize) -> &'static str {
    match site {
        SiteSelection::All if slice_count > 0 => "No successful launches",
        _ => "No launches for this selection",
    }
}

/// Screen angle (radians) of a turn fraction measured clockwise from the top.
fn angle_of(turn: f32) -> f32 {
    turn * TAU - FRAC_PI_2
}

/// Triangle fan covering the sector between two turn fractions.
fn sector_mesh(center: Pos2, radius: f32, from: f32, to: f32, color: Color32) -> Mesh {
    let mut mesh = Mesh::default();
    let steps = (((to - from) * PIE_SEGMENTS as f32).ceil() as usize).max(1);

    mesh.colored_vertex(center, color);
    for i in 0..=steps {
        let t = from + (to - from) * i as f32 / steps as f32;
        mesh.colored_vertex(center + Vec2::angled(angle_of(t)) * radius, color);
    }
    for i in 1..=steps as u32 {
        mesh.add_triangle(0, i, i + 1);
    }
    mesh
}

/// Percentages keep a decimal, counts print as integers.
fn format_value(v: f64) -> String {
    if v.fract() == 0.0 {
        format!("{v:.0}")
    } else {
        format!("{v:.2}")
    }
}

// ---------------------------------------------------------------------------
// Payload / outcome scatter plot
// ---------------------------------------------------------------------------

/// Render the scatter plot: payload mass on x, class on y, one series per
/// booster version category.
pub fn scatter_plot(ui: &mut Ui, state: &AppState) {
    ui.heading(scatter_title(&state.site));

    let (x_min, x_max) = state.slider_bounds;

    Plot::new("payload_scatter")
        .legend(Legend::default())
        .height(320.0)
        .x_axis_label("Payload Mass (kg)")
        .y_axis_label("class")
        .include_x(x_min)
        .include_x(x_max)
        .include_y(-0.25)
        .include_y(1.25)
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(false)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            for category in &state.dataset.booster_categories {
                let points: PlotPoints = state
                    .scatter_records()
                    .filter(|rec| &rec.booster_category == category)
                    .map(|rec| [rec.payload_mass_kg, rec.outcome.class() as f64])
                    .collect();
                if points.points().is_empty() {
                    continue;
                }

                let series = Points::new(points)
                    .name(category)
                    .color(state.booster_colors.color_for(category))
                    .filled(true)
                    .radius(5.0);

                plot_ui.points(series);
            }
        });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sector_mesh_is_a_closed_fan() {
        let mesh = sector_mesh(Pos2::ZERO, 10.0, 0.0, 0.25, Color32::RED);
        let steps = (0.25 * PIE_SEGMENTS as f32).ceil() as usize;
        assert_eq!(mesh.vertices.len(), steps + 2);
        assert_eq!(mesh.indices.len(), steps * 3);

        // First rim vertex sits at 12 o'clock, last at 3 o'clock.
        let first = mesh.vertices[1].pos;
        let last = mesh.vertices[steps + 1].pos;
        assert!((first.x - 0.0).abs() < 1e-4 && (first.y + 10.0).abs() < 1e-4);
        assert!((last.x - 10.0).abs() < 1e-4 && last.y.abs() < 1e-4);
    }

    #[test]
    fn values_print_as_counts_or_percentages() {
        assert_eq!(format_value(3.0), "3");
        assert_eq!(format_value(66.666_666), "66.67");
    }

    #[test]
    fn empty_pie_explains_itself() {
        assert_eq!(empty_pie_message(&SiteSelection::All, 2), "No successful launches");
        assert_eq!(empty_pie_message(&SiteSelection::All, 0), "No launches for this selection");
        assert_eq!(
            empty_pie_message(&SiteSelection::Site("Nowhere".into()), 2),
            "No launches for this selection"
        );
    }
}
