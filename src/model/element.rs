// src/model/element.rs

use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use crate::error::ElementError;

/// One chemical element. Immutable once built.
///
/// Equality and hashing cover every field; floats are compared by bit
/// pattern so that `Eq` and `Hash` agree.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Element {
    pub atomic_number: u32,
    pub name: String,
    pub symbol: String,
    /// Atomic mass (amu)
    pub mass: f64,
    /// Bondi van der Waals radius (Å)
    pub radius_bondi: Option<f64>,
    /// Alvarez van der Waals radius (Å)
    pub radius_alvarez: Option<f64>,
}

impl Element {
    /// Builds a record, normalising the symbol to capitalised form and the
    /// name to lowercase.
    pub fn new(atomic_number: u32, name: &str, symbol: &str, mass: f64) -> Self {
        Self {
            atomic_number,
            name: name.to_lowercase(),
            symbol: capitalize(symbol),
            mass,
            radius_bondi: None,
            radius_alvarez: None,
        }
    }

    pub fn with_radii(mut self, bondi: Option<f64>, alvarez: Option<f64>) -> Self {
        self.radius_bondi = bondi;
        self.radius_alvarez = alvarez;
        self
    }

    fn float_bits(&self) -> (u64, Option<u64>, Option<u64>) {
        (
            self.mass.to_bits(),
            self.radius_bondi.map(f64::to_bits),
            self.radius_alvarez.map(f64::to_bits),
        )
    }
}

impl PartialEq for Element {
    fn eq(&self, other: &Self) -> bool {
        self.atomic_number == other.atomic_number
            && self.name == other.name
            && self.symbol == other.symbol
            && self.float_bits() == other.float_bits()
    }
}

impl Eq for Element {}

impl Hash for Element {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.atomic_number.hash(state);
        self.name.hash(state);
        self.symbol.hash(state);
        self.float_bits().hash(state);
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Element: {}, symbol: {}, atomic number: {}, mass: {}",
            self.name, self.symbol, self.atomic_number, self.mass
        )
    }
}

/// First character uppercased, the rest lowercased ("nA" -> "Na").
pub fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

// --- Query keys ---

/// A loosely typed lookup argument.
///
/// Lookups accept anything convertible into a `Key` and reject the
/// variants that make no sense for them, so `11.0` is a valid mass but
/// not a valid atomic number.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Key<'a> {
    Text(&'a str),
    Integer(i128),
    Float(f64),
}

impl Key<'_> {
    pub fn kind(&self) -> &'static str {
        match self {
            Key::Text(_) => "string",
            Key::Integer(_) => "integer",
            Key::Float(_) => "float",
        }
    }
}

impl fmt::Display for Key<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Text(s) => write!(f, "{:?}", s),
            Key::Integer(n) => write!(f, "{}", n),
            Key::Float(x) => write!(f, "{:?}", x),
        }
    }
}

impl<'a> From<&'a str> for Key<'a> {
    fn from(s: &'a str) -> Self {
        Key::Text(s)
    }
}

impl<'a> From<&'a String> for Key<'a> {
    fn from(s: &'a String) -> Self {
        Key::Text(s.as_str())
    }
}

impl From<f64> for Key<'_> {
    fn from(x: f64) -> Self {
        Key::Float(x)
    }
}

impl From<f32> for Key<'_> {
    fn from(x: f32) -> Self {
        Key::Float(x as f64)
    }
}

macro_rules! integer_key {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Key<'_> {
                fn from(n: $t) -> Self {
                    Key::Integer(n as i128)
                }
            }
        )*
    };
}

integer_key!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

// --- Duplicate policy ---

/// What a mass lookup does when several records share the selected bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Duplicates {
    /// Fail with `AmbiguousMatch`.
    #[default]
    Error,
    /// Return every record in the bucket.
    All,
    /// Return an explicit empty result.
    None,
}

impl FromStr for Duplicates {
    type Err = ElementError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "error" => Ok(Duplicates::Error),
            "all" => Ok(Duplicates::All),
            "none" => Ok(Duplicates::None),
            other => Err(ElementError::InvalidArgument(format!(
                "`duplicates` ({}) must be one of \"error\", \"all\", \"none\"",
                other
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("na"), "Na");
        assert_eq!(capitalize("NA"), "Na");
        assert_eq!(capitalize("uUP"), "Uup");
        assert_eq!(capitalize(""), "");
    }

    #[test]
    fn test_new_normalises_keys() {
        let na = Element::new(11, "Sodium", "NA", 22.99);
        assert_eq!(na.name, "sodium");
        assert_eq!(na.symbol, "Na");
    }

    #[test]
    fn test_equality_covers_radii() {
        let a = Element::new(11, "sodium", "Na", 22.99).with_radii(Some(2.27), Some(2.5));
        let b = Element::new(11, "sodium", "Na", 22.99).with_radii(Some(2.27), None);
        assert_ne!(a, b);
        assert_eq!(a, a.clone());

        let set: HashSet<Element> = [a.clone(), a.clone(), b].into_iter().collect();
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_display() {
        let na = Element::new(11, "sodium", "Na", 22.99);
        assert_eq!(
            na.to_string(),
            "Element: sodium, symbol: Na, atomic number: 11, mass: 22.99"
        );
    }

    #[test]
    fn test_key_conversions() {
        assert_eq!(Key::from(11u8), Key::Integer(11));
        assert_eq!(Key::from(11.0), Key::Float(11.0));
        assert_eq!(Key::from("Na"), Key::Text("Na"));
        assert_eq!(Key::from(2.5f32).kind(), "float");
    }

    #[test]
    fn test_duplicates_from_str() {
        assert_eq!("all".parse::<Duplicates>().unwrap(), Duplicates::All);
        assert_eq!("none".parse::<Duplicates>().unwrap(), Duplicates::None);
        assert!("tuple".parse::<Duplicates>().unwrap_err().is_invalid_argument());
    }
}
