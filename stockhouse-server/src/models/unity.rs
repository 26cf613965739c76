//! Unit of measure for stock items

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Unit a stock item quantity is expressed in.
///
/// Serialized (JSON and database) by variant name, e.g. `"Liter"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Unity {
    Unit,
    Gram,
    Kilogram,
    Milliliter,
    Liter,
    Package,
}

impl Unity {
    pub const ALL: [Unity; 6] = [
        Unity::Unit,
        Unity::Gram,
        Unity::Kilogram,
        Unity::Milliliter,
        Unity::Liter,
        Unity::Package,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Unity::Unit => "Unit",
            Unity::Gram => "Gram",
            Unity::Kilogram => "Kilogram",
            Unity::Milliliter => "Milliliter",
            Unity::Liter => "Liter",
            Unity::Package => "Package",
        }
    }
}

impl fmt::Display for Unity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Stored unity text that matches no known variant
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown unity: '{0}'")]
pub struct UnknownUnity(pub String);

impl FromStr for Unity {
    type Err = UnknownUnity;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Unity::ALL
            .into_iter()
            .find(|u| u.as_str() == s)
            .ok_or_else(|| UnknownUnity(s.to_owned()))
    }
}
