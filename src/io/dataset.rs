// src/io/dataset.rs

use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::error::{ElementError, Result};
use crate::model::Element;

/// Bundled table, keyed by atomic number.
const BUNDLED_JSON: &str = include_str!("../../data/elements.json");

/// One entry as it appears in the dataset file.
#[derive(Debug, Deserialize)]
struct RawElement {
    #[serde(rename = "atomic number")]
    atomic_number: u32,
    name: String,
    symbol: String,
    mass: f64,
    #[serde(default)]
    radius_bondi: Option<f64>,
    #[serde(default)]
    radius_alvarez: Option<f64>,
}

pub fn load_bundled() -> Result<Vec<Element>> {
    parse_records(BUNDLED_JSON)
}

/// Loads a dataset file with the same layout as the bundled one.
pub fn load_path(path: impl AsRef<Path>) -> Result<Vec<Element>> {
    let path = path.as_ref();
    let reader = BufReader::new(File::open(path)?);
    let raw: BTreeMap<u32, RawElement> = serde_json::from_reader(reader)?;
    log::info!("Loaded {} element entries from {:?}", raw.len(), path);
    into_records(raw)
}

/// Parses dataset JSON into records, in ascending atomic-number order.
pub fn parse_records(json: &str) -> Result<Vec<Element>> {
    let raw: BTreeMap<u32, RawElement> = serde_json::from_str(json)?;
    into_records(raw)
}

fn into_records(raw: BTreeMap<u32, RawElement>) -> Result<Vec<Element>> {
    raw.into_iter()
        .map(|(key, entry)| {
            if entry.atomic_number != key {
                return Err(ElementError::Dataset(format!(
                    "entry {} declares atomic number {}",
                    key, entry.atomic_number
                )));
            }
            Ok(Element::new(entry.atomic_number, &entry.name, &entry.symbol, entry.mass)
                .with_radii(entry.radius_bondi, entry.radius_alvarez))
        })
        .collect()
}
