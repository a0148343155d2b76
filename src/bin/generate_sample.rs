use std::sync::Arc;

use arrow::array::{Float64Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use launch_dashboard::data::loader::{
    COL_BOOSTER_CATEGORY, COL_BOOSTER_VERSION, COL_CLASS, COL_FLIGHT_NUMBER, COL_PAYLOAD,
    COL_SITE,
};
use parquet::arrow::ArrowWriter;

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

    fn pick<'a>(&mut self, items: &[&'a str]) -> &'a str {
        items[(self.next_u64() % items.len() as u64) as usize]
    }
}

/// Booster generations in flight order: (category, share of flights,
/// success probability, payload ceiling in kg).
const GENERATIONS: [(&str, f64, f64, f64); 5] = [
    ("v1.0", 0.10, 0.2, 700.0),
    ("v1.1", 0.25, 0.3, 4500.0),
    ("FT", 0.40, 0.7, 9600.0),
    ("B4", 0.15, 0.6, 9600.0),
    ("B5", 0.10, 0.9, 9600.0),
];

const SITES: [&str; 4] = ["CCAFS LC-40", "VAFB SLC-4E", "KSC LC-39A", "CCAFS SLC-40"];

const N_FLIGHTS: usize = 56;

struct Launch {
    flight_number: i64,
    site: String,
    class: i64,
    payload: f64,
    booster_version: String,
    category: String,
}

fn generate(rng: &mut SimpleRng) -> Vec<Launch> {
    let mut launches = Vec::with_capacity(N_FLIGHTS);
    let mut flight = 1usize;

    for (gen_idx, &(category, share, p_success, max_payload)) in GENERATIONS.iter().enumerate() {
        let count = ((share * N_FLIGHTS as f64).round() as usize).max(1);
        // Early boosters only flew from the first two pads.
        let pads: &[&str] = if gen_idx < 2 { &SITES[..2] } else { &SITES };

        for i in 0..count {
            let payload = if category == "v1.0" && i == 0 {
                0.0
            } else {
                (rng.next_f64() * max_payload).round()
            };
            launches.push(Launch {
                flight_number: flight as i64,
                site: rng.pick(pads).to_string(),
                class: i64::from(rng.next_f64() < p_success),
                payload,
                booster_version: format!("F9 {category} B{:04}", 1000 + flight),
                category: category.to_string(),
            });
            flight += 1;
        }
    }

    launches
}

fn write_parquet(launches: &[Launch], path: &str) {
    let schema = Arc::new(Schema::new(vec![
        Field::new(COL_FLIGHT_NUMBER, DataType::Int64, false),
        Field::new(COL_SITE, DataType::Utf8, false),
        Field::new(COL_CLASS, DataType::Int64, false),
        Field::new(COL_PAYLOAD, DataType::Float64, false),
        Field::new(COL_BOOSTER_VERSION, DataType::Utf8, false),
        Field::new(COL_BOOSTER_CATEGORY, DataType::Utf8, false),
    ]));

    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(Int64Array::from_iter_values(launches.iter().map(|l| l.flight_number))),
            Arc::new(StringArray::from_iter_values(launches.iter().map(|l| l.site.as_str()))),
            Arc::new(Int64Array::from_iter_values(launches.iter().map(|l| l.class))),
            Arc::new(Float64Array::from_iter_values(launches.iter().map(|l| l.payload))),
            Arc::new(StringArray::from_iter_values(
                launches.iter().map(|l| l.booster_version.as_str()),
            )),
            Arc::new(StringArray::from_iter_values(
                launches.iter().map(|l| l.category.as_str()),
            )),
        ],
    )
    .expect("Failed to create RecordBatch");

    let file = std::fs::File::create(path).expect("Failed to create output file");
    let mut writer = ArrowWriter::try_new(file, schema, None).expect("Failed to create writer");
    writer.write(&batch).expect("Failed to write batch");
    writer.close().expect("Failed to close writer");
}

fn write_csv(launches: &[Launch], path: &str) {
    let mut writer = csv::Writer::from_path(path).expect("Failed to create CSV file");
    writer
        .write_record([
            "",
            COL_FLIGHT_NUMBER,
            COL_SITE,
            COL_CLASS,
            COL_PAYLOAD,
            COL_BOOSTER_VERSION,
            COL_BOOSTER_CATEGORY,
        ])
        .expect("Failed to write CSV header");
    for (i, l) in launches.iter().enumerate() {
        writer
            .write_record([
                i.to_string(),
                l.flight_number.to_string(),
                l.site.clone(),
                l.class.to_string(),
                format!("{:.1}", l.payload),
                l.booster_version.clone(),
                l.category.clone(),
            ])
            .expect("Failed to write CSV row");
    }
    writer.flush().expect("Failed to flush CSV");
}

fn main() {
    let mut rng = SimpleRng::new(42);
    let launches = generate(&mut rng);

    let parquet_path = "sample_launches.parquet";
    let csv_path = "spacex_launch_dash.csv";
    write_parquet(&launches, parquet_path);
    write_csv(&launches, csv_path);

    let successes: i64 = launches.iter().map(|l| l.class).sum();
    println!(
        "Wrote {} launches ({successes} successful) to {parquet_path} and {csv_path}",
        launches.len()
    );
}
