use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::data::model::{PayloadRange, SiteSelection};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – site selector and payload range
// ---------------------------------------------------------------------------

/// Render the left control panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Launch Site");
    ui.separator();

    // ---- Site selector ----
    let mut selected = state.site.clone();
    let selected_text = site_label(&selected);
    egui::ComboBox::from_id_salt("site_dropdown")
        .selected_text(selected_text)
        .width(ui.available_width())
        .show_ui(ui, |ui: &mut Ui| {
            ui.selectable_value(&mut selected, SiteSelection::All, "All Sites");
            for site in &state.site_options {
                ui.selectable_value(&mut selected, SiteSelection::Site(site.clone()), site);
            }
        });
    state.set_site(selected);

    ui.add_space(12.0);

    // ---- Payload range ----
    ui.strong("Payload range (Kg):");
    let (min, max) = state.slider_bounds;
    let step = state.config.payload_step;
    let mut low = state.payload_range.low;
    let mut high = state.payload_range.high;

    let mut low_slider = egui::Slider::new(&mut low, min..=max).text("from");
    let mut high_slider = egui::Slider::new(&mut high, min..=max).text("to");
    if step > 0.0 {
        low_slider = low_slider.step_by(step);
        high_slider = high_slider.step_by(step);
    }
    ui.add(low_slider);
    ui.add(high_slider);
    state.set_payload_range(PayloadRange::new(low, high));

    if state.payload_range.is_empty() {
        ui.label(RichText::new("Lower bound exceeds upper bound").color(Color32::YELLOW));
    }

    if let Some((lo, hi)) = state.dataset.payload_bounds() {
        ui.small(format!("Dataset payloads: {lo:.0} – {hi:.0} kg"));
    }

    ui.separator();

    // ---- Dataset summary ----
    ui.label(format!(
        "{} launches from {} sites",
        state.dataset.len(),
        state.dataset.sites.len()
    ));

    if !state.dataset.skipped.is_empty() {
        let header = format!("Skipped rows ({})", state.dataset.skipped.len());
        egui::CollapsingHeader::new(RichText::new(header).color(Color32::YELLOW))
            .id_salt("skipped_rows")
            .default_open(false)
            .show(ui, |ui: &mut Ui| {
                ScrollArea::vertical()
                    .max_height(200.0)
                    .show(ui, |ui: &mut Ui| {
                        for skipped in &state.dataset.skipped {
                            ui.small(format!("row {}: {}", skipped.row, skipped.reason));
                        }
                    });
            });
    }
}

fn site_label(site: &SiteSelection) -> String {
    match site {
        SiteSelection::All => "All Sites".to_string(),
        SiteSelection::Site(s) => s.clone(),
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(path) = &state.source {
            ui.label(path.display().to_string());
            ui.separator();
        }

        ui.label(format!(
            "{} launches loaded, {} in scatter",
            state.dataset.len(),
            state.scatter.len()
        ));

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open launch records")
        .add_filter("Supported files", &["csv", "json", "parquet", "pq"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        state.open(&path);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DashboardConfig;
    use crate::data::model::tests::record;
    use crate::data::model::LaunchDataset;

    fn render_frames(state: &mut AppState, frames: usize) {
        let ctx = egui::Context::default();
        for _ in 0..frames {
            let _ = ctx.run(egui::RawInput::default(), |ctx| {
                egui::CentralPanel::default().show(ctx, |ui| side_panel(ui, state));
            });
        }
    }

    #[test]
    fn selector_labels() {
        assert_eq!(site_label(&SiteSelection::All), "All Sites");
        assert_eq!(site_label(&SiteSelection::Site("KSC LC-39A".into())), "KSC LC-39A");
    }

    #[test]
    fn rendering_keeps_the_full_payload_span() {
        let ds = LaunchDataset::from_records(
            vec![
                record("KSC LC-39A", 15600.0, true, "B5"),
                record("VAFB SLC-4E", 500.0, false, "FT"),
            ],
            Vec::new(),
        );
        let mut state = AppState::new(DashboardConfig::default(), ds, None);
        let range_before = state.payload_range;
        assert_eq!(state.scatter.len(), 2);

        render_frames(&mut state, 2);

        assert_eq!(state.payload_range, range_before);
        assert_eq!(state.scatter.len(), 2);
        assert_eq!(state.site, SiteSelection::All);
    }
}
