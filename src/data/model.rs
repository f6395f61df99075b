use std::collections::{BTreeSet, HashSet};
use std::fmt;
use std::str::FromStr;

// ---------------------------------------------------------------------------
// Column names of the launch records resource
// ---------------------------------------------------------------------------

pub const COL_LAUNCH_SITE: &str = "Launch Site";
pub const COL_PAYLOAD_MASS: &str = "Payload Mass (kg)";
pub const COL_CLASS: &str = "class";
pub const COL_BOOSTER_CATEGORY: &str = "Booster Version Category";
pub const COL_FLIGHT_NUMBER: &str = "Flight Number";
pub const COL_BOOSTER_VERSION: &str = "Booster Version";

/// Columns that must be present for a file to load at all.
pub const REQUIRED_COLUMNS: [&str; 4] = [
    COL_LAUNCH_SITE,
    COL_PAYLOAD_MASS,
    COL_CLASS,
    COL_BOOSTER_CATEGORY,
];

/// The selector value meaning "every site".
pub const ALL_SITES: &str = "ALL";

// ---------------------------------------------------------------------------
// CellValue – a single raw cell before it becomes part of a LaunchRecord
// ---------------------------------------------------------------------------

/// A dynamically-typed cell as read from CSV, JSON or Parquet.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Text(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    Null,
}

impl CellValue {
    /// Interpret the cell as a number (text is parsed, bools are not numbers).
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Float(v) => Some(*v),
            CellValue::Integer(i) => Some(*i as f64),
            CellValue::Text(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    /// Interpret the cell as non-empty text. Numbers are rendered as text.
    pub fn as_text(&self) -> Option<String> {
        let s = match self {
            CellValue::Text(s) => s.trim().to_string(),
            CellValue::Integer(i) => i.to_string(),
            CellValue::Float(v) => v.to_string(),
            CellValue::Bool(_) | CellValue::Null => return None,
        };
        (!s.is_empty()).then_some(s)
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Text(s) => write!(f, "'{s}'"),
            CellValue::Integer(i) => write!(f, "{i}"),
            CellValue::Float(v) => write!(f, "{v}"),
            CellValue::Bool(b) => write!(f, "{b}"),
            CellValue::Null => write!(f, "<null>"),
        }
    }
}

// ---------------------------------------------------------------------------
// Outcome – the `class` column
// ---------------------------------------------------------------------------

/// Landing outcome of a launch: `class` 1 is a success, 0 a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    Success,
    Failure,
}

impl Outcome {
    /// Map a raw class cell to an outcome. Accepts 0/1 as integers, floats,
    /// numeric text or booleans.
    pub fn from_cell(cell: &CellValue) -> Option<Self> {
        if let CellValue::Bool(b) = cell {
            return Some(if *b { Outcome::Success } else { Outcome::Failure });
        }
        match cell.as_f64()? {
            v if v == 1.0 => Some(Outcome::Success),
            v if v == 0.0 => Some(Outcome::Failure),
            _ => None,
        }
    }

    /// The numeric class value used as the scatter plot's y coordinate.
    pub fn class(self) -> u8 {
        match self {
            Outcome::Success => 1,
            Outcome::Failure => 0,
        }
    }

    pub fn is_success(self) -> bool {
        self == Outcome::Success
    }
}

// ---------------------------------------------------------------------------
// LaunchRecord – one row of the dataset
// ---------------------------------------------------------------------------

/// A single launch (one row of the source table).
#[derive(Debug, Clone, PartialEq)]
pub struct LaunchRecord {
    pub launch_site: String,
    /// Payload mass in kilograms, finite and non-negative.
    pub payload_mass_kg: f64,
    pub outcome: Outcome,
    pub booster_category: String,
    pub flight_number: Option<i64>,
    pub booster_version: Option<String>,
}

// ---------------------------------------------------------------------------
// Selections coming from the UI controls
// ---------------------------------------------------------------------------

/// Site selector value: every site, or one named site.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum SiteSelection {
    #[default]
    All,
    Site(String),
}

impl SiteSelection {
    /// Whether a record launched from `site` is selected.
    pub fn matches(&self, site: &str) -> bool {
        match self {
            SiteSelection::All => true,
            SiteSelection::Site(s) => s == site,
        }
    }
}

impl FromStr for SiteSelection {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(if s == ALL_SITES {
            SiteSelection::All
        } else {
            SiteSelection::Site(s.to_string())
        })
    }
}

impl fmt::Display for SiteSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SiteSelection::All => write!(f, "{ALL_SITES}"),
            SiteSelection::Site(s) => write!(f, "{s}"),
        }
    }
}

/// Inclusive payload mass range `[low, high]` in kg.
///
/// A range with `low > high` is empty rather than an error.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PayloadRange {
    pub low: f64,
    pub high: f64,
}

impl PayloadRange {
    pub fn new(low: f64, high: f64) -> Self {
        Self { low, high }
    }

    pub fn contains(&self, mass: f64) -> bool {
        self.low <= mass && mass <= self.high
    }

    pub fn is_empty(&self) -> bool {
        !(self.low <= self.high)
    }
}

// ---------------------------------------------------------------------------
// LaunchDataset – the complete loaded dataset
// ---------------------------------------------------------------------------

/// A row that was rejected while loading, kept for reporting.
#[derive(Debug, Clone, PartialEq)]
pub struct SkippedRow {
    /// Zero-based data row index (header excluded).
    pub row: usize,
    pub reason: String,
}

/// The full parsed dataset with pre-computed indices.
#[derive(Debug, Clone)]
pub struct LaunchDataset {
    /// All valid records in file order.
    pub records: Vec<LaunchRecord>,
    /// Distinct sites in order of first occurrence.
    pub sites: Vec<String>,
    /// Sorted set of booster version categories.
    pub booster_categories: BTreeSet<String>,
    /// Rows rejected by the loader.
    pub skipped: Vec<SkippedRow>,
}

impl LaunchDataset {
    /// Build indices from the loaded records.
    pub fn from_records(records: Vec<LaunchRecord>, skipped: Vec<SkippedRow>) -> Self {
        let mut seen: HashSet<&str> = HashSet::new();
        let mut sites = Vec::new();
        let mut booster_categories = BTreeSet::new();

        for rec in &records {
            if seen.insert(rec.launch_site.as_str()) {
                sites.push(rec.launch_site.clone());
            }
            booster_categories.insert(rec.booster_category.clone());
        }

        LaunchDataset {
            records,
            sites,
            booster_categories,
            skipped,
        }
    }

    /// Global minimum and maximum payload mass, `None` when empty.
    pub fn payload_bounds(&self) -> Option<(f64, f64)> {
        self.records.iter().map(|r| r.payload_mass_kg).fold(None, |acc, m| {
            Some(match acc {
                None => (m, m),
                Some((lo, hi)) => (lo.min(m), hi.max(m)),
            })
        })
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn record(site: &str, payload: f64, success: bool, category: &str) -> LaunchRecord {
        LaunchRecord {
            launch_site: site.to_string(),
            payload_mass_kg: payload,
            outcome: if success {
                Outcome::Success
            } else {
                Outcome::Failure
            },
            booster_category: category.to_string(),
            flight_number: None,
            booster_version: None,
        }
    }

    #[test]
    fn sites_keep_first_occurrence_order() {
        let ds = LaunchDataset::from_records(
            vec![
                record("VAFB SLC-4E", 500.0, true, "FT"),
                record("CCAFS LC-40", 0.0, false, "v1.0"),
                record("VAFB SLC-4E", 9600.0, true, "B4"),
                record("KSC LC-39A", 3000.0, true, "FT"),
            ],
            Vec::new(),
        );
        assert_eq!(ds.sites, vec!["VAFB SLC-4E", "CCAFS LC-40", "KSC LC-39A"]);
        assert_eq!(
            ds.booster_categories.iter().collect::<Vec<_>>(),
            vec!["B4", "FT", "v1.0"]
        );
    }

    #[test]
    fn payload_bounds_span_all_records() {
        let ds = LaunchDataset::from_records(
            vec![
                record("A", 2500.0, true, "FT"),
                record("A", 0.0, true, "FT"),
                record("B", 9600.0, false, "B4"),
            ],
            Vec::new(),
        );
        assert_eq!(ds.payload_bounds(), Some((0.0, 9600.0)));

        let empty = LaunchDataset::from_records(Vec::new(), Vec::new());
        assert_eq!(empty.payload_bounds(), None);
        assert!(empty.is_empty());
    }

    #[test]
    fn outcome_accepts_common_class_encodings() {
        assert_eq!(Outcome::from_cell(&CellValue::Integer(1)), Some(Outcome::Success));
        assert_eq!(Outcome::from_cell(&CellValue::Float(0.0)), Some(Outcome::Failure));
        assert_eq!(
            Outcome::from_cell(&CellValue::Text(" 1 ".into())),
            Some(Outcome::Success)
        );
        assert_eq!(Outcome::from_cell(&CellValue::Bool(false)), Some(Outcome::Failure));
        assert_eq!(Outcome::from_cell(&CellValue::Integer(2)), None);
        assert_eq!(Outcome::from_cell(&CellValue::Text("yes".into())), None);
        assert_eq!(Outcome::from_cell(&CellValue::Null), None);
    }

    #[test]
    fn site_selection_parses_all_keyword() {
        assert_eq!("ALL".parse::<SiteSelection>(), Ok(SiteSelection::All));
        assert_eq!(
            "KSC LC-39A".parse::<SiteSelection>(),
            Ok(SiteSelection::Site("KSC LC-39A".into()))
        );
        assert_eq!(SiteSelection::All.to_string(), "ALL");
        assert!(SiteSelection::All.matches("anything"));
        assert!(!SiteSelection::Site("A".into()).matches("B"));
    }

    #[test]
    fn payload_range_is_inclusive_and_may_be_empty() {
        let r = PayloadRange::new(2500.0, 5000.0);
        assert!(r.contains(2500.0));
        assert!(r.contains(5000.0));
        assert!(!r.contains(5000.1));
        assert!(!r.is_empty());

        let inverted = PayloadRange::new(5000.0, 2500.0);
        assert!(inverted.is_empty());
        assert!(!inverted.contains(3000.0));
    }
}
