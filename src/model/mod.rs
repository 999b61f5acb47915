//src/model/mod.rs
pub mod element;
pub mod index;
pub mod namespace;

// Re-exports for cleaner imports
pub use element::{Duplicates, Element, Key};
pub use index::{Advisory, ElementIndex, MassLookup, MassMatch};
pub use namespace::{namespace, Elements};
