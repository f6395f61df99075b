use eframe::egui::Ui;
use egui_extras::{Column, TableBuilder};

use crate::data::model::LaunchRecord;
use crate::state::AppState;

const HEADERS: [&str; 6] = [
    "Flight",
    "Launch Site",
    "Payload Mass (kg)",
    "class",
    "Booster Version",
    "Booster Version Category",
];

// ---------------------------------------------------------------------------
// Table of the records behind the scatter plot
// ---------------------------------------------------------------------------

pub fn scatter_table(ui: &mut Ui, state: &AppState) {
    let records: Vec<&LaunchRecord> = state.scatter_records().collect();
    ui.strong(format!("{} launches in range", records.len()));

    TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .max_scroll_height(260.0)
        .column(Column::auto())
        .column(Column::auto())
        .column(Column::auto())
        .column(Column::auto())
        .column(Column::auto())
        .column(Column::remainder())
        .header(20.0, |mut header| {
            for title in HEADERS {
                header.col(|ui: &mut Ui| {
                    ui.strong(title);
                });
            }
        })
        .body(|body| {
            body.rows(18.0, records.len(), |mut row| {
                let rec = records[row.index()];
                for cell in row_cells(rec) {
                    row.col(|ui: &mut Ui| {
                        ui.label(cell);
                    });
                }
            });
        });
}

fn row_cells(rec: &LaunchRecord) -> [String; 6] {
    [
        rec.flight_number.map(|n| n.to_string()).unwrap_or_default(),
        rec.launch_site.clone(),
        format!("{:.0}", rec.payload_mass_kg),
        rec.outcome.class().to_string(),
        rec.booster_version.clone().unwrap_or_default(),
        rec.booster_category.clone(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::tests::record;

    #[test]
    fn cells_line_up_with_headers() {
        let mut rec = record("KSC LC-39A", 2490.4, true, "FT");
        rec.flight_number = Some(20);
        let cells = row_cells(&rec);
        assert_eq!(cells.len(), HEADERS.len());
        assert_eq!(cells[0], "20");
        assert_eq!(cells[2], "2490");
        assert_eq!(cells[3], "1");
        assert_eq!(cells[4], "");
    }
}
