use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{Float64Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;

use launch_dash::data::model::{
    COL_BOOSTER_CATEGORY, COL_BOOSTER_VERSION, COL_CLASS, COL_FLIGHT_NUMBER, COL_LAUNCH_SITE,
    COL_PAYLOAD_MASS,
};

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }

    fn pick<'a>(&mut self, items: &[&'a str]) -> &'a str {
        items[(self.next_u64() % items.len() as u64) as usize]
    }
}

/// One booster generation: flights flown, typical payload, landing success rate.
struct Era {
    category: &'static str,
    version_prefix: &'static str,
    flights: usize,
    sites: &'static [&'static str],
    payload_mean: f64,
    payload_sd: f64,
    success_rate: f64,
}

const ERAS: [Era; 5] = [
    Era {
        category: "v1.0",
        version_prefix: "F9 v1.0  B00",
        flights: 5,
        sites: &["CCAFS LC-40"],
        payload_mean: 300.0,
        payload_sd: 250.0,
        success_rate: 0.0,
    },
    Era {
        category: "v1.1",
        version_prefix: "F9 v1.1  B10",
        flights: 15,
        sites: &["CCAFS LC-40", "VAFB SLC-4E"],
        payload_mean: 2800.0,
        payload_sd: 1200.0,
        success_rate: 0.15,
    },
    Era {
        category: "FT",
        version_prefix: "F9 FT B10",
        flights: 20,
        sites: &["KSC LC-39A", "CCAFS LC-40", "VAFB SLC-4E"],
        payload_mean: 4500.0,
        payload_sd: 2000.0,
        success_rate: 0.7,
    },
    Era {
        category: "B4",
        version_prefix: "F9 B4 B10",
        flights: 11,
        sites: &["KSC LC-39A", "CCAFS SLC-40", "VAFB SLC-4E"],
        payload_mean: 5000.0,
        payload_sd: 2500.0,
        success_rate: 0.6,
    },
    Era {
        category: "B5",
        version_prefix: "F9 B5  B10",
        flights: 5,
        sites: &["CCAFS SLC-40", "KSC LC-39A"],
        payload_mean: 4000.0,
        payload_sd: 1500.0,
        success_rate: 0.8,
    },
];

struct Launch {
    flight_number: i64,
    site: String,
    outcome: i64,
    payload: f64,
    booster_version: String,
    category: String,
}

fn generate(rng: &mut SimpleRng) -> Vec<Launch> {
    let mut launches = Vec::new();
    let mut flight_number = 1;

    for era in &ERAS {
        for i in 0..era.flights {
            let payload = rng
                .gauss(era.payload_mean, era.payload_sd)
                .clamp(0.0, 9600.0)
                .round();
            let outcome = i64::from(rng.next_f64() < era.success_rate);
            launches.push(Launch {
                flight_number,
                site: rng.pick(era.sites).to_string(),
                outcome,
                payload,
                booster_version: format!("{}{:02}", era.version_prefix, i + 3),
                category: era.category.to_string(),
            });
            flight_number += 1;
        }
    }
    launches
}

fn write_csv(path: &Path, launches: &[Launch]) -> Result<()> {
    let mut writer =
        csv::Writer::from_path(path).with_context(|| format!("creating {}", path.display()))?;
    writer.write_record([
        COL_FLIGHT_NUMBER,
        COL_LAUNCH_SITE,
        COL_CLASS,
        COL_PAYLOAD_MASS,
        COL_BOOSTER_VERSION,
        COL_BOOSTER_CATEGORY,
    ])?;
    for l in launches {
        writer.write_record([
            l.flight_number.to_string(),
            l.site.clone(),
            l.outcome.to_string(),
            format!("{:.1}", l.payload),
            l.booster_version.clone(),
            l.category.clone(),
        ])?;
    }
    writer.flush()?;
    Ok(())
}

fn write_parquet(path: &Path, launches: &[Launch]) -> Result<()> {
    let schema = Arc::new(Schema::new(vec![
        Field::new(COL_FLIGHT_NUMBER, DataType::Int64, false),
        Field::new(COL_LAUNCH_SITE, DataType::Utf8, false),
        Field::new(COL_CLASS, DataType::Int64, false),
        Field::new(COL_PAYLOAD_MASS, DataType::Float64, false),
        Field::new(COL_BOOSTER_VERSION, DataType::Utf8, false),
        Field::new(COL_BOOSTER_CATEGORY, DataType::Utf8, false),
    ]));

    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(Int64Array::from_iter_values(launches.iter().map(|l| l.flight_number))),
            Arc::new(StringArray::from_iter_values(launches.iter().map(|l| &l.site))),
            Arc::new(Int64Array::from_iter_values(launches.iter().map(|l| l.outcome))),
            Arc::new(Float64Array::from_iter_values(launches.iter().map(|l| l.payload))),
            Arc::new(StringArray::from_iter_values(
                launches.iter().map(|l| &l.booster_version),
            )),
            Arc::new(StringArray::from_iter_values(launches.iter().map(|l| &l.category))),
        ],
    )
    .context("building record batch")?;

    let file =
        std::fs::File::create(path).with_context(|| format!("creating {}", path.display()))?;
    let mut writer = ArrowWriter::try_new(file, schema, None)?;
    writer.write(&batch)?;
    writer.close()?;
    Ok(())
}

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(42);
    let launches = generate(&mut rng);

    let csv_path = Path::new("sample_launches.csv");
    write_csv(csv_path, &launches)?;
    println!("Wrote {} launches to {}", launches.len(), csv_path.display());

    let parquet_path = Path::new("sample_launches.parquet");
    write_parquet(parquet_path, &launches)?;
    println!("Wrote {} launches to {}", launches.len(), parquet_path.display());

    Ok(())
}
