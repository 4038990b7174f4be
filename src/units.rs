use serde::{Deserialize, Serialize};
use std::{
    fmt::Display,
    iter::Sum,
    ops::{Add, Sub},
};

pub const GWEI_PER_ETH: u64 = 1_000_000_000;

/// An amount in Gwei, the unit the consensus layer tracks balances in.
#[derive(
    Clone, Copy, Debug, Default, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize,
)]
pub struct GweiNewtype(#[serde(with = "crate::json_codecs::quoted_u64")] pub u64);

impl GweiNewtype {
    pub const ZERO: Self = Self(0);

    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Whole ETH, rounded down.
    pub fn eth(&self) -> u64 {
        self.0 / GWEI_PER_ETH
    }
}

impl Display for GweiNewtype {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} Gwei", self.0)
    }
}

impl Add<GweiNewtype> for GweiNewtype {
    type Output = Self;

    fn add(self, rhs: GweiNewtype) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl Sub<GweiNewtype> for GweiNewtype {
    type Output = Self;

    fn sub(self, rhs: GweiNewtype) -> Self::Output {
        Self(self.0 - rhs.0)
    }
}

impl Sum for GweiNewtype {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(GweiNewtype::ZERO, |sum, gwei| sum + gwei)
    }
}

impl From<u64> for GweiNewtype {
    fn from(gwei: u64) -> Self {
        Self(gwei)
    }
}

impl From<GweiNewtype> for u64 {
    fn from(gwei: GweiNewtype) -> Self {
        gwei.0
    }
}
