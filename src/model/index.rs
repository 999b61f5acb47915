// src/model/index.rs

use std::collections::HashMap;
use std::sync::OnceLock;

use super::element::{capitalize, Duplicates, Element, Key};
use crate::error::{ElementError, Result};
use crate::io::dataset;

/// Outcome of a mass lookup once the bucket has been resolved.
#[derive(Debug, Clone, PartialEq)]
pub enum MassMatch<'a> {
    /// Exactly one record in the bucket.
    Single(&'a Element),
    /// Every record in the bucket, in dataset order (`Duplicates::All`).
    Multiple(Vec<&'a Element>),
    /// Several records matched and the caller asked for nothing (`Duplicates::None`).
    Suppressed,
}

impl<'a> MassMatch<'a> {
    /// The single record, if the match was unique.
    pub fn single(&self) -> Option<&'a Element> {
        match self {
            MassMatch::Single(e) => Some(e),
            _ => None,
        }
    }

    /// All matched records; empty when suppressed.
    pub fn elements(&self) -> Vec<&'a Element> {
        match self {
            MassMatch::Single(e) => vec![*e],
            MassMatch::Multiple(v) => v.clone(),
            MassMatch::Suppressed => Vec::new(),
        }
    }
}

/// Reported when an approximate mass query falls back to the nearest bucket.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Advisory {
    /// Requested mass after rounding to one decimal
    pub requested: f64,
    /// Rounded mass of the bucket actually used
    pub closest: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MassLookup<'a> {
    pub matched: MassMatch<'a>,
    pub advisory: Option<Advisory>,
}

#[derive(Debug)]
struct MassBucket {
    tenths: i64,
    members: Vec<usize>,
}

/// Immutable lookup tables over a fixed set of element records.
#[derive(Debug)]
pub struct ElementIndex {
    records: Vec<Element>,
    by_symbol: HashMap<String, usize>,
    by_name: HashMap<String, usize>,
    by_number: HashMap<u32, usize>,
    // Buckets in first-appearance order; `by_mass` points into it.
    buckets: Vec<MassBucket>,
    by_mass: HashMap<i64, usize>,
}

static BUNDLED: OnceLock<ElementIndex> = OnceLock::new();

impl ElementIndex {
    /// Builds every table in one pass.
    ///
    /// Atomic numbers, names and symbols must be unique; masses may collide.
    pub fn build<I>(records: I) -> Result<Self>
    where
        I: IntoIterator<Item = Element>,
    {
        let mut index = ElementIndex {
            records: Vec::new(),
            by_symbol: HashMap::new(),
            by_name: HashMap::new(),
            by_number: HashMap::new(),
            buckets: Vec::new(),
            by_mass: HashMap::new(),
        };

        for record in records {
            if !record.mass.is_finite() {
                return Err(ElementError::Dataset(format!(
                    "element {} has non-finite mass {}",
                    record.symbol, record.mass
                )));
            }

            let pos = index.records.len();
            if index.by_number.insert(record.atomic_number, pos).is_some() {
                return Err(ElementError::Duplicate {
                    field: "atomic number",
                    value: record.atomic_number.to_string(),
                });
            }
            if index.by_name.insert(record.name.clone(), pos).is_some() {
                return Err(ElementError::Duplicate { field: "name", value: record.name });
            }
            if index.by_symbol.insert(record.symbol.clone(), pos).is_some() {
                return Err(ElementError::Duplicate { field: "symbol", value: record.symbol });
            }

            let tenths = to_tenths(round_one_decimal(record.mass)).ok_or_else(|| {
                ElementError::Dataset(format!(
                    "element {} has out-of-range mass {}",
                    record.symbol, record.mass
                ))
            })?;
            match index.by_mass.get(&tenths) {
                Some(&b) => index.buckets[b].members.push(pos),
                None => {
                    index.by_mass.insert(tenths, index.buckets.len());
                    index.buckets.push(MassBucket { tenths, members: vec![pos] });
                }
            }

            index.records.push(record);
        }

        log::debug!(
            "Element index built: {} records, {} mass buckets",
            index.records.len(),
            index.buckets.len()
        );
        Ok(index)
    }

    /// The process-wide index over the bundled dataset, built on first use.
    ///
    /// # Panics
    /// If the bundled dataset is inconsistent. That is a packaging defect,
    /// not a runtime condition.
    pub fn bundled() -> &'static ElementIndex {
        BUNDLED.get_or_init(|| {
            dataset::load_bundled()
                .and_then(ElementIndex::build)
                .unwrap_or_else(|e| panic!("bundled element table is unusable: {}", e))
        })
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// All records in dataset order.
    pub fn records(&self) -> &[Element] {
        &self.records
    }

    pub fn lookup_by_symbol<'k>(&self, symbol: impl Into<Key<'k>>) -> Result<&Element> {
        let symbol = match symbol.into() {
            Key::Text(s) => capitalize(s),
            other => {
                return Err(ElementError::InvalidArgument(format!(
                    "`symbol` ({}) must be a string, got {}",
                    other,
                    other.kind()
                )))
            }
        };

        self.by_symbol
            .get(&symbol)
            .map(|&i| &self.records[i])
            .ok_or_else(|| ElementError::NotFound(format!("No element with symbol {}", symbol)))
    }

    /// Exact match on the lowercased name. No whitespace or digit stripping.
    pub fn lookup_by_name<'k>(&self, name: impl Into<Key<'k>>) -> Result<&Element> {
        let name = match name.into() {
            Key::Text(s) => s.to_lowercase(),
            other => {
                return Err(ElementError::InvalidArgument(format!(
                    "`name` ({}) must be a string, got {}",
                    other,
                    other.kind()
                )))
            }
        };

        self.by_name
            .get(&name)
            .map(|&i| &self.records[i])
            .ok_or_else(|| ElementError::NotFound(format!("No element with name {}", name)))
    }

    /// Only integer keys are accepted; `11.0` is rejected even though it is
    /// integer-valued.
    pub fn lookup_by_atomic_number<'k>(
        &self,
        atomic_number: impl Into<Key<'k>>,
    ) -> Result<&Element> {
        let n = match atomic_number.into() {
            Key::Integer(n) => n,
            other => {
                return Err(ElementError::InvalidArgument(format!(
                    "`atomic_number` ({}) must be an integer, got {}",
                    other,
                    other.kind()
                )))
            }
        };

        u32::try_from(n)
            .ok()
            .and_then(|z| self.by_number.get(&z))
            .map(|&i| &self.records[i])
            .ok_or_else(|| {
                ElementError::NotFound(format!("No element with atomic number {}", n))
            })
    }

    /// Mass lookup without the advisory; see [`ElementIndex::resolve_mass`].
    pub fn lookup_by_mass<'k>(
        &self,
        mass: impl Into<Key<'k>>,
        exact: bool,
        duplicates: Duplicates,
    ) -> Result<MassMatch<'_>> {
        self.resolve_mass(mass, exact, duplicates).map(|l| l.matched)
    }

    /// Looks up records by mass rounded to one decimal place.
    ///
    /// With `exact` the rounded mass is the bucket key. Otherwise the bucket
    /// with the nearest rounded mass is used, a warning is logged and the
    /// substitution is returned as an [`Advisory`]. On equal distance the
    /// bucket that appears first in the dataset wins.
    pub fn resolve_mass<'k>(
        &self,
        mass: impl Into<Key<'k>>,
        exact: bool,
        duplicates: Duplicates,
    ) -> Result<MassLookup<'_>> {
        let mass = match mass.into() {
            Key::Float(x) if x.is_finite() => x,
            Key::Integer(n) => n as f64,
            other => {
                return Err(ElementError::InvalidArgument(format!(
                    "`mass` ({}) must be a finite number, got {}",
                    other,
                    other.kind()
                )))
            }
        };

        let requested = round_one_decimal(mass);
        let (bucket, advisory) = if exact {
            let bucket = to_tenths(requested)
                .and_then(|t| self.by_mass.get(&t))
                .map(|&b| &self.buckets[b]);
            (bucket, None)
        } else {
            // Out-of-range requests sit beyond every bucket, so saturating
            // keeps the nearest one correct.
            let target = to_tenths(requested).unwrap_or(if requested < 0.0 {
                i64::MIN
            } else {
                i64::MAX
            });
            match self.nearest_bucket(target) {
                Some(bucket) => {
                    let advisory = Advisory {
                        requested,
                        closest: tenths_to_mass(bucket.tenths),
                    };
                    log::warn!(
                        "Closest mass to {:.1}: {:.1}",
                        advisory.requested,
                        advisory.closest
                    );
                    (Some(bucket), Some(advisory))
                }
                None => (None, None),
            }
        };

        let bucket = match bucket {
            Some(b) if !b.members.is_empty() => b,
            _ => {
                return Err(ElementError::NotFound(format!(
                    "No element with mass {:.1}",
                    requested
                )))
            }
        };

        let matched = match (bucket.members.as_slice(), duplicates) {
            ([only], _) => MassMatch::Single(&self.records[*only]),
            (many, Duplicates::All) => {
                MassMatch::Multiple(many.iter().map(|&i| &self.records[i]).collect())
            }
            (_, Duplicates::None) => MassMatch::Suppressed,
            (many, Duplicates::Error) => {
                return Err(ElementError::AmbiguousMatch {
                    mass: tenths_to_mass(bucket.tenths),
                    matches: many.iter().map(|&i| self.records[i].clone()).collect(),
                })
            }
        };

        Ok(MassLookup { matched, advisory })
    }

    /// Tries the text as a symbol, then as a name.
    pub fn infer<'k>(&self, text: impl Into<Key<'k>>) -> Result<&Element> {
        let key = text.into();
        match self.lookup_by_symbol(key) {
            Err(e) if e.is_not_found() => {}
            other => return other,
        }
        match self.lookup_by_name(key) {
            Err(e) if e.is_not_found() => Err(ElementError::NotFound(format!(
                "No element with symbol or name {}",
                key
            ))),
            other => other,
        }
    }

    fn nearest_bucket(&self, tenths: i64) -> Option<&MassBucket> {
        let mut best: Option<&MassBucket> = None;
        for bucket in &self.buckets {
            let closer = match best {
                Some(b) => bucket.tenths.abs_diff(tenths) < b.tenths.abs_diff(tenths),
                None => true,
            };
            if closer {
                best = Some(bucket);
            }
        }
        best
    }
}

/// Rounds a mass to one decimal place.
///
/// Rounding goes through fixed-precision formatting, which works on the
/// exact binary value and breaks true ties to even.
fn round_one_decimal(mass: f64) -> f64 {
    format!("{:.1}", mass).parse().unwrap_or(mass)
}

/// Integer tenths of an already rounded mass, or `None` when it does not
/// fit in an `i64` without saturating.
fn to_tenths(rounded: f64) -> Option<i64> {
    // 2^63; anything at or past it would saturate the cast.
    const LIMIT: f64 = 9_223_372_036_854_775_808.0;
    let tenths = (rounded * 10.0).round();
    if tenths.is_finite() && tenths > -LIMIT && tenths < LIMIT {
        Some(tenths as i64)
    } else {
        None
    }
}

fn tenths_to_mass(tenths: i64) -> f64 {
    tenths as f64 / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn round_tenths(mass: f64) -> i64 {
        to_tenths(round_one_decimal(mass)).unwrap()
    }

    fn sample() -> ElementIndex {
        ElementIndex::build(vec![
            Element::new(11, "sodium", "Na", 22.99),
            Element::new(12, "magnesium", "Mg", 24.305),
            Element::new(114, "flerovium", "Fl", 289.0),
            Element::new(115, "ununpentium", "Uup", 289.0),
        ])
        .unwrap()
    }

    #[test]
    fn test_round_tenths() {
        assert_eq!(round_tenths(22.99), 230);
        assert_eq!(round_tenths(22.98), 230);
        assert_eq!(round_tenths(24.305), 243);
        assert_eq!(round_tenths(24.0), 240);
        assert_eq!(round_tenths(1.008), 10);
    }

    #[test]
    fn test_duplicate_keys_rejected() {
        let err = ElementIndex::build(vec![
            Element::new(1, "hydrogen", "H", 1.008),
            Element::new(1, "deuterium", "D", 2.014),
        ])
        .unwrap_err();
        assert!(matches!(err, ElementError::Duplicate { field: "atomic number", .. }));

        let err = ElementIndex::build(vec![
            Element::new(1, "hydrogen", "H", 1.008),
            Element::new(2, "Hydrogen", "Hx", 2.014),
        ])
        .unwrap_err();
        assert!(matches!(err, ElementError::Duplicate { field: "name", .. }));

        let err = ElementIndex::build(vec![
            Element::new(1, "hydrogen", "H", 1.008),
            Element::new(2, "helium", "h", 4.0026),
        ])
        .unwrap_err();
        assert!(matches!(err, ElementError::Duplicate { field: "symbol", .. }));
    }

    #[test]
    fn test_non_finite_mass_rejected() {
        let err =
            ElementIndex::build(vec![Element::new(1, "hydrogen", "H", f64::NAN)]).unwrap_err();
        assert!(matches!(err, ElementError::Dataset(_)));
    }

    #[test]
    fn test_mass_buckets_keep_dataset_order() {
        let idx = sample();
        match idx.lookup_by_mass(289.0, true, Duplicates::All).unwrap() {
            MassMatch::Multiple(v) => {
                let symbols: Vec<&str> = v.iter().map(|e| e.symbol.as_str()).collect();
                assert_eq!(symbols, ["Fl", "Uup"]);
            }
            other => panic!("expected two matches, got {:?}", other),
        }
    }

    #[test]
    fn test_extreme_masses() {
        let idx = sample();
        assert_eq!(to_tenths(round_one_decimal(-1.0e300)), None);
        assert_eq!(to_tenths(round_one_decimal(9.3e17)), None);

        for mass in [-1.0e300, -9.3e17, 9.3e17, 1.0e300, f64::MAX] {
            let err = idx.lookup_by_mass(mass, true, Duplicates::Error).unwrap_err();
            assert!(err.is_not_found(), "{} should not match exactly", mass);
        }

        let low = idx.resolve_mass(-1.0e300, false, Duplicates::Error).unwrap();
        assert_eq!(low.matched.single().map(|e| e.symbol.as_str()), Some("Na"));
        assert!(low.advisory.is_some());

        let high = idx.lookup_by_mass(1.0e300, false, Duplicates::All).unwrap();
        assert_eq!(high.elements().len(), 2);
        assert_eq!(high.elements()[0].symbol, "Fl");
    }

    #[test]
    fn test_out_of_range_record_mass_rejected() {
        let err = ElementIndex::build(vec![Element::new(1, "hydrogen", "H", 1.0e19)]).unwrap_err();
        assert!(matches!(err, ElementError::Dataset(_)));
    }

    #[test]
    fn test_ambiguous_reports_selected_bucket() {
        let idx = sample();
        match idx.lookup_by_mass(288.5, false, Duplicates::Error) {
            Err(ElementError::AmbiguousMatch { mass, matches }) => {
                assert!((mass - 289.0).abs() < 1e-9);
                assert_eq!(matches.len(), 2);
            }
            other => panic!("expected an ambiguous match, got {:?}", other),
        }
    }

    #[test]
    fn test_unique_match_ignores_policy() {
        let idx = sample();
        for policy in [Duplicates::Error, Duplicates::All, Duplicates::None] {
            let matched = idx.lookup_by_mass(22.98, true, policy).unwrap();
            assert_eq!(matched.single().map(|e| e.symbol.as_str()), Some("Na"));
        }
    }

    #[test]
    fn test_exact_miss_is_not_found() {
        let idx = sample();
        assert!(idx.lookup_by_mass(22, true, Duplicates::Error).unwrap_err().is_not_found());
    }

    #[test]
    fn test_nearest_bucket_reports_advisory() {
        let idx = sample();
        let lookup = idx.resolve_mass(24.0, false, Duplicates::Error).unwrap();
        assert_eq!(lookup.matched.single().map(|e| e.symbol.as_str()), Some("Mg"));
        let advisory = lookup.advisory.unwrap();
        assert!((advisory.requested - 24.0).abs() < 1e-9);
        assert!((advisory.closest - 24.3).abs() < 1e-9);
    }

    #[test]
    fn test_nearest_bucket_tie_prefers_first() {
        let idx = ElementIndex::build(vec![
            Element::new(1, "alpha", "A", 10.0),
            Element::new(2, "beta", "B", 12.0),
        ])
        .unwrap();
        let lookup = idx.resolve_mass(11.0, false, Duplicates::Error).unwrap();
        assert_eq!(lookup.matched.single().map(|e| e.symbol.as_str()), Some("A"));
    }

    #[test]
    fn test_exact_lookup_has_no_advisory() {
        let idx = sample();
        let lookup = idx.resolve_mass(22.98, true, Duplicates::Error).unwrap();
        assert!(lookup.advisory.is_none());
        assert_eq!(lookup.matched.single().map(|e| e.name.as_str()), Some("sodium"));
    }

    #[test]
    fn test_empty_index_inexact_is_not_found() {
        let idx = ElementIndex::build(Vec::new()).unwrap();
        assert!(idx.is_empty());
        assert!(idx.lookup_by_mass(1.0, false, Duplicates::All).unwrap_err().is_not_found());
    }

    #[test]
    fn test_mass_rejects_text_and_nan() {
        let idx = sample();
        for mass in [Key::Text("11.0"), Key::Float(f64::NAN), Key::Float(f64::INFINITY)] {
            let err = idx.lookup_by_mass(mass, true, Duplicates::Error).unwrap_err();
            assert!(err.is_invalid_argument());
        }
    }

    #[test]
    fn test_atomic_number_out_of_range() {
        let idx = sample();
        assert!(idx.lookup_by_atomic_number(-1).unwrap_err().is_not_found());
        assert!(idx.lookup_by_atomic_number(300).unwrap_err().is_not_found());
        assert!(idx.lookup_by_atomic_number(11.0).unwrap_err().is_invalid_argument());
    }

    #[test]
    fn test_infer_propagates_invalid_argument() {
        let idx = sample();
        assert!(idx.infer(22).unwrap_err().is_invalid_argument());
        assert_eq!(idx.infer("MAGNESIUM").unwrap().symbol, "Mg");
        let err = idx.infer("compound").unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "No element with symbol or name \"compound\"");
    }
}
