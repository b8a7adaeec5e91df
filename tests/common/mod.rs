#![allow(dead_code)]

use commission_engine::domain::config::CommissionConfig;
use commission_engine::interfaces::json::config_document::ConfigDocument;
use std::fs::File;
use std::io::Error;
use std::path::Path;

pub const CONFIG_FIXTURE: &str = "tests/fixtures/config.json";

pub const HEADER: [&str; 9] = [
    "affiliate",
    "level",
    "affiliate_sales",
    "referral_cashout",
    "is_vip",
    "vip_months",
    "loyalty",
    "booster",
    "guild",
];

/// The configuration stored in `tests/fixtures/config.json`.
pub fn fixture_config() -> CommissionConfig {
    let raw = std::fs::read_to_string(CONFIG_FIXTURE).expect("Failed to read config fixture");
    ConfigDocument::from_json(&raw)
        .expect("Failed to parse config fixture")
        .into()
}

/// Writes `rows` contexts cycling through every guild rank and booster.
pub fn generate_contexts_csv(path: &Path, rows: u32) -> Result<(), Error> {
    let file = File::create(path)?;
    let mut wtr = csv::WriterBuilder::new().from_writer(file);

    wtr.write_record(HEADER)?;

    let ranks = ["none", "top1", "top2", "top3"];
    let boosters = ["", "top1", "top2", "top3"];
    for i in 1..=rows {
        wtr.write_record([
            i.to_string(),
            (i % 60).to_string(),
            "100".to_string(),
            "10".to_string(),
            (i % 2 == 0).to_string(),
            (i % 13).to_string(),
            (i % 3 == 0).to_string(),
            boosters[(i % 4) as usize].to_string(),
            ranks[(i / 4 % 4) as usize].to_string(),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}
