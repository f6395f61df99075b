use super::model::{LaunchRecord, PayloadRange, SiteSelection};

// ---------------------------------------------------------------------------
// Scatter filter: site + payload range predicate
// ---------------------------------------------------------------------------

/// Return indices of records that pass the site and payload filters, in
/// file order.
///
/// A record passes when:
/// * the site selection is `ALL`, or equals the record's site
/// * its payload mass lies in `range` (inclusive on both ends)
///
/// An unknown site or an inverted range simply matches nothing.
pub fn filtered_indices(
    records: &[LaunchRecord],
    site: &SiteSelection,
    range: PayloadRange,
) -> Vec<usize> {
    if range.is_empty() {
        return Vec::new();
    }
    records
        .iter()
        .enumerate()
        .filter(|(_, rec)| site.matches(&rec.launch_site) && range.contains(rec.payload_mass_kg))
        .map(|(i, _)| i)
        .collect()
}

/// Records for the payload/outcome scatter plot.
///
/// The plot itself (x = payload mass, y = class, colour = booster version
/// category) is drawn by `ui::plot`; this only selects the rows.
pub fn compute_scatter_data<'a>(
    records: &'a [LaunchRecord],
    site: &SiteSelection,
    range: PayloadRange,
) -> Vec<&'a LaunchRecord> {
    filtered_indices(records, site, range)
        .into_iter()
        .map(|i| &records[i])
        .collect()
}

/// Scatter chart title for the current site selection.
pub fn scatter_title(site: &SiteSelection) -> String {
    format!("Correlation between Payload and Success for {site}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::tests::record;

    fn rows() -> Vec<LaunchRecord> {
        vec![
            record("CCAFS LC-40", 0.0, false, "v1.0"),
            record("CCAFS LC-40", 2500.0, true, "v1.1"),
            record("VAFB SLC-4E", 9600.0, false, "B4"),
            record("KSC LC-39A", 5000.0, true, "FT"),
            record("KSC LC-39A", 5000.5, true, "FT"),
            record("CCAFS SLC-40", 10000.0, true, "B5"),
        ]
    }

    #[test]
    fn full_range_all_sites_returns_every_row_in_order() {
        let rows = rows();
        let out = compute_scatter_data(&rows, &SiteSelection::All, PayloadRange::new(0.0, 10000.0));
        assert_eq!(out.len(), rows.len());
        for (got, want) in out.iter().zip(rows.iter()) {
            assert!(std::ptr::eq(*got, want));
        }
    }

    #[test]
    fn payload_window_is_inclusive() {
        let rows = rows();
        let idx = filtered_indices(&rows, &SiteSelection::All, PayloadRange::new(2500.0, 5000.0));
        assert_eq!(idx, vec![1, 3]);
        for i in idx {
            let m = rows[i].payload_mass_kg;
            assert!((2500.0..=5000.0).contains(&m));
        }
    }

    #[test]
    fn site_selection_restricts_rows() {
        let rows = rows();
        let site = SiteSelection::Site("KSC LC-39A".into());
        let idx = filtered_indices(&rows, &site, PayloadRange::new(0.0, 10000.0));
        assert_eq!(idx, vec![3, 4]);

        let idx = filtered_indices(&rows, &site, PayloadRange::new(0.0, 5000.0));
        assert_eq!(idx, vec![3]);
    }

    #[test]
    fn unknown_site_and_inverted_range_are_empty() {
        let rows = rows();
        let unknown = SiteSelection::Site("Boca Chica".into());
        assert!(filtered_indices(&rows, &unknown, PayloadRange::new(0.0, 10000.0)).is_empty());
        assert!(
            filtered_indices(&rows, &SiteSelection::All, PayloadRange::new(5000.0, 2500.0))
                .is_empty()
        );
    }

    #[test]
    fn repeated_calls_are_identical() {
        let rows = rows();
        let site = SiteSelection::Site("CCAFS LC-40".into());
        let range = PayloadRange::new(0.0, 7500.0);
        assert_eq!(
            compute_scatter_data(&rows, &site, range),
            compute_scatter_data(&rows, &site, range)
        );
    }

    #[test]
    fn title_names_the_selection() {
        assert_eq!(
            scatter_title(&SiteSelection::All),
            "Correlation between Payload and Success for ALL"
        );
    }
}
