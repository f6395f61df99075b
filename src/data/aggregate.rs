use std::collections::HashMap;

use super::model::{LaunchRecord, SiteSelection};

// ---------------------------------------------------------------------------
// Pie chart input
// ---------------------------------------------------------------------------

pub const SUCCESSFUL_LABEL: &str = "Successful";
pub const FAILED_LABEL: &str = "Failed";

/// One labelled pie slice.
#[derive(Debug, Clone, PartialEq)]
pub struct PieSlice {
    pub label: String,
    pub value: f64,
}

/// Everything the pie chart needs: a title and its slices in drawing order.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartInput {
    pub title: String,
    pub slices: Vec<PieSlice>,
}

impl ChartInput {
    /// Sum of all slice values (the pie's 100 %).
    pub fn total(&self) -> f64 {
        self.slices.iter().map(|s| s.value).sum()
    }
}

/// Success/failure tally for one site.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SiteOutcomeCount {
    pub success: usize,
    pub failure: usize,
}

impl SiteOutcomeCount {
    pub fn total(&self) -> usize {
        self.success + self.failure
    }

    /// Success share in percent. A site without launches reports 0 %.
    pub fn success_percentage(&self) -> f64 {
        match self.total() {
            0 => 0.0,
            total => self.success as f64 / total as f64 * 100.0,
        }
    }

    fn add(&mut self, rec: &LaunchRecord) {
        if rec.outcome.is_success() {
            self.success += 1;
        } else {
            self.failure += 1;
        }
    }
}

/// Success percentage of one site.
#[derive(Debug, Clone, PartialEq)]
pub struct SiteSuccessSummary {
    pub site: String,
    pub success_percentage: f64,
}

// ---------------------------------------------------------------------------
// Aggregations
// ---------------------------------------------------------------------------

/// Per-site success percentages, sites in order of first occurrence.
pub fn site_success_summaries(records: &[LaunchRecord]) -> Vec<SiteSuccessSummary> {
    let mut order: Vec<(&str, SiteOutcomeCount)> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for rec in records {
        let site = rec.launch_site.as_str();
        let slot = *index.entry(site).or_insert_with(|| {
            order.push((site, SiteOutcomeCount::default()));
            order.len() - 1
        });
        order[slot].1.add(rec);
    }

    order
        .into_iter()
        .map(|(site, counts)| SiteSuccessSummary {
            site: site.to_string(),
            success_percentage: counts.success_percentage(),
        })
        .collect()
}

/// Success and failure counts for a single site. Unknown sites count zero.
pub fn site_outcome_count(records: &[LaunchRecord], site: &str) -> SiteOutcomeCount {
    records
        .iter()
        .filter(|rec| rec.launch_site == site)
        .fold(SiteOutcomeCount::default(), |mut acc, rec| {
            acc.add(rec);
            acc
        })
}

/// Pie chart data for the current site selection.
///
/// * `ALL`: one slice per site valued at that site's success percentage.
/// * a single site: `Successful` then `Failed` launch counts, both always
///   present even when zero.
pub fn compute_pie_data(records: &[LaunchRecord], site: &SiteSelection) -> ChartInput {
    match site {
        SiteSelection::All => ChartInput {
            title: "Total Success Launches By Site".to_string(),
            slices: site_success_summaries(records)
                .into_iter()
                .map(|s| PieSlice {
                    label: s.site,
                    value: s.success_percentage,
                })
                .collect(),
        },
        SiteSelection::Site(name) => {
            let counts = site_outcome_count(records, name);
            ChartInput {
                title: format!("Successful vs. Failed Launches ({name})"),
                slices: vec![
                    PieSlice {
                        label: SUCCESSFUL_LABEL.to_string(),
                        value: counts.success as f64,
                    },
                    PieSlice {
                        label: FAILED_LABEL.to_string(),
                        value: counts.failure as f64,
                    },
                ],
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::data::model::tests::record;

    fn two_sites() -> Vec<LaunchRecord> {
        vec![
            record("Site A", 100.0, true, "FT"),
            record("Site B", 200.0, false, "B4"),
            record("Site A", 300.0, false, "FT"),
            record("Site A", 400.0, true, "B5"),
            record("Site B", 500.0, false, "B4"),
        ]
    }

    #[test]
    fn all_sites_percentages_follow_first_occurrence() {
        let pie = compute_pie_data(&two_sites(), &SiteSelection::All);
        assert_eq!(pie.title, "Total Success Launches By Site");
        let labels: Vec<&str> = pie.slices.iter().map(|s| s.label.as_str()).collect();
        assert_eq!(labels, vec!["Site A", "Site B"]);
        assert!((pie.slices[0].value - 66.666_666).abs() < 1e-3);
        assert_eq!(pie.slices[1].value, 0.0);
    }

    #[test]
    fn percentages_match_per_site_ratio() {
        let rows = vec![
            record("CCAFS LC-40", 0.0, false, "v1.0"),
            record("KSC LC-39A", 2500.0, true, "FT"),
            record("CCAFS LC-40", 500.0, true, "v1.1"),
            record("CCAFS LC-40", 600.0, false, "v1.1"),
            record("KSC LC-39A", 3000.0, true, "FT"),
            record("KSC LC-39A", 3100.0, false, "FT"),
            record("CCAFS LC-40", 700.0, false, "v1.1"),
        ];
        for summary in site_success_summaries(&rows) {
            let site_rows: Vec<_> = rows.iter().filter(|r| r.launch_site == summary.site).collect();
            let successes = site_rows.iter().filter(|r| r.outcome.is_success()).count();
            let expected = successes as f64 / site_rows.len() as f64 * 100.0;
            assert!((summary.success_percentage - expected).abs() < 1e-9);
        }
    }

    #[test]
    fn single_site_yields_successful_then_failed() {
        let rows = vec![
            record("CCAFS LC-40", 0.0, false, "v1.0"),
            record("CCAFS LC-40", 500.0, true, "v1.1"),
            record("KSC LC-39A", 2500.0, true, "FT"),
            record("CCAFS LC-40", 700.0, false, "v1.1"),
        ];
        let pie = compute_pie_data(&rows, &SiteSelection::Site("CCAFS LC-40".into()));
        assert_eq!(pie.title, "Successful vs. Failed Launches (CCAFS LC-40)");
        assert_eq!(
            pie.slices,
            vec![
                PieSlice {
                    label: "Successful".into(),
                    value: 1.0
                },
                PieSlice {
                    label: "Failed".into(),
                    value: 2.0
                },
            ]
        );
        assert_eq!(pie.total(), 3.0);
    }

    #[test]
    fn zero_counts_are_still_listed() {
        let pie = compute_pie_data(&two_sites(), &SiteSelection::Site("Site B".into()));
        assert_eq!(pie.slices.len(), 2);
        assert_eq!(pie.slices[0].value, 0.0);
        assert_eq!(pie.slices[1].value, 2.0);
    }

    #[test]
    fn unknown_site_counts_nothing() {
        let pie = compute_pie_data(&two_sites(), &SiteSelection::Site("Nowhere".into()));
        assert_eq!(pie.slices.len(), 2);
        assert_eq!(pie.total(), 0.0);
        assert_eq!(site_outcome_count(&two_sites(), "Nowhere").success_percentage(), 0.0);
    }

    #[test]
    fn empty_input_gives_empty_breakdown() {
        assert!(compute_pie_data(&[], &SiteSelection::All).slices.is_empty());
    }

    #[test]
    fn repeated_calls_are_identical() {
        let rows = two_sites();
        assert_eq!(
            compute_pie_data(&rows, &SiteSelection::All),
            compute_pie_data(&rows, &SiteSelection::All)
        );
    }
}
