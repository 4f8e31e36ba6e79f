//! Logic-network representation types.
//!
//! The harness runs the same optimization recipe over four representations:
//! and-inverter (aig), majority-inverter (mig), xor-and (xag) and
//! xor-majority (xmg) graphs. The set is closed; every transformation family
//! matches on it exhaustively.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::BenchError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReprType {
    Aig,
    Mig,
    Xag,
    Xmg,
}

impl ReprType {
    /// Fixed iteration order used for the run matrix and the table columns.
    pub const ALL: [ReprType; 4] = [ReprType::Aig, ReprType::Mig, ReprType::Xag, ReprType::Xmg];

    /// Stable index into per-representation arrays, following `ALL` order.
    pub fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for ReprType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ReprType::Aig => "aig",
            ReprType::Mig => "mig",
            ReprType::Xag => "xag",
            ReprType::Xmg => "xmg",
        };
        f.write_str(s)
    }
}

impl FromStr for ReprType {
    type Err = BenchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "aig" => Ok(ReprType::Aig),
            "mig" => Ok(ReprType::Mig),
            "xag" => Ok(ReprType::Xag),
            "xmg" => Ok(ReprType::Xmg),
            other => Err(BenchError::Message(format!(
                "unknown representation '{}' (expected aig, mig, xag or xmg)",
                other
            ))),
        }
    }
}
