// src/model/namespace.rs
//
// Attribute-style access to the bundled table: `namespace().Na` is sodium.

#![allow(non_snake_case)]

use std::sync::OnceLock;

use super::element::Element;
use super::index::ElementIndex;
use crate::error::{ElementError, Result};

static NAMESPACE: OnceLock<Elements> = OnceLock::new();

macro_rules! elements_namespace {
    ($($sym:ident),* $(,)?) => {
        /// One read-only field per symbol in the bundled dataset.
        #[derive(Debug)]
        pub struct Elements {
            $(pub $sym: &'static Element,)*
        }

        impl Elements {
            fn from_index(index: &'static ElementIndex) -> Result<Self> {
                Ok(Self {
                    $($sym: index.lookup_by_symbol(stringify!($sym))?,)*
                })
            }

            /// Field access by name. Symbols are matched verbatim, the way a
            /// field name would be.
            pub fn get(&self, symbol: &str) -> Result<&'static Element> {
                match symbol {
                    $(stringify!($sym) => Ok(self.$sym),)*
                    _ => Err(ElementError::InvalidArgument(format!(
                        "Element with symbol \"{}\" does not exist",
                        symbol
                    ))),
                }
            }

            /// `(symbol, record)` pairs in atomic-number order.
            pub fn symbols(&self) -> impl Iterator<Item = (&'static str, &'static Element)> + '_ {
                [$((stringify!($sym), self.$sym),)*].into_iter()
            }
        }
    };
}

elements_namespace!(
    H, He, Li, Be, B, C, N, O, F, Ne, Na, Mg, Al, Si, P, S, Cl, Ar, K, Ca,
    Sc, Ti, V, Cr, Mn, Fe, Co, Ni, Cu, Zn, Ga, Ge, As, Se, Br, Kr, Rb, Sr, Y, Zr,
    Nb, Mo, Tc, Ru, Rh, Pd, Ag, Cd, In, Sn, Sb, Te, I, Xe, Cs, Ba, La, Ce, Pr, Nd,
    Pm, Sm, Eu, Gd, Tb, Dy, Ho, Er, Tm, Yb, Lu, Hf, Ta, W, Re, Os, Ir, Pt, Au, Hg,
    Tl, Pb, Bi, Po, At, Rn, Fr, Ra, Ac, Th, Pa, U, Np, Pu, Am, Cm, Bk, Cf, Es, Fm,
    Md, No, Lr, Rf, Db, Sg, Bh, Hs, Mt, Ds, Rg, Cn, Uut, Fl, Uup, Lv, Uus, Uuo,
);

/// The namespace over [`ElementIndex::bundled`], built on first use.
///
/// # Panics
/// If a symbol listed above is missing from the bundled dataset.
pub fn namespace() -> &'static Elements {
    NAMESPACE.get_or_init(|| {
        Elements::from_index(ElementIndex::bundled())
            .unwrap_or_else(|e| panic!("bundled element table does not match namespace: {}", e))
    })
}
