//! Chemical element reference data.
//!
//! Records are looked up by symbol, name, atomic number or mass. The
//! bundled table is indexed once, on first use, and never changes after
//! that, so lookups can run from any thread without locking.
//!
//! ```no_run
//! use ele::{element_from_symbol, namespace};
//!
//! let na = element_from_symbol("na").unwrap();
//! assert_eq!(na, namespace().Na);
//! ```

pub mod config;
pub mod error;
pub mod io;
pub mod model;
pub mod utils;

pub use config::Config;
pub use error::{ElementError, Result};
pub use model::{
    namespace, Advisory, Duplicates, Element, ElementIndex, Elements, Key, MassLookup, MassMatch,
};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Looks up a bundled element by symbol, case-insensitively.
pub fn element_from_symbol<'k>(symbol: impl Into<Key<'k>>) -> Result<&'static Element> {
    ElementIndex::bundled().lookup_by_symbol(symbol)
}

/// Looks up a bundled element by its lowercased name.
pub fn element_from_name<'k>(name: impl Into<Key<'k>>) -> Result<&'static Element> {
    ElementIndex::bundled().lookup_by_name(name)
}

pub fn element_from_atomic_number<'k>(
    atomic_number: impl Into<Key<'k>>,
) -> Result<&'static Element> {
    ElementIndex::bundled().lookup_by_atomic_number(atomic_number)
}

/// See [`ElementIndex::resolve_mass`].
pub fn element_from_mass<'k>(
    mass: impl Into<Key<'k>>,
    exact: bool,
    duplicates: Duplicates,
) -> Result<MassMatch<'static>> {
    ElementIndex::bundled().lookup_by_mass(mass, exact, duplicates)
}

/// Symbol first, then name.
pub fn infer_element_from_string<'k>(text: impl Into<Key<'k>>) -> Result<&'static Element> {
    ElementIndex::bundled().infer(text)
}

/// Every bundled record in atomic-number order.
pub fn elements() -> &'static [Element] {
    ElementIndex::bundled().records()
}
