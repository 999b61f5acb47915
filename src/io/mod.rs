// src/io/mod.rs
pub mod dataset;

pub use dataset::{load_bundled, load_path, parse_records};
