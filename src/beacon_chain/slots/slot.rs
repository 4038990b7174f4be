use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::{
    fmt::Display,
    num::ParseIntError,
    ops::{Add, Sub},
    str::FromStr,
};

#[derive(
    Clone, Copy, Debug, Default, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize,
)]
pub struct Slot(#[serde(with = "crate::json_codecs::quoted_u64")] pub u64);

#[derive(
    Clone, Copy, Debug, Default, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize,
)]
pub struct Epoch(#[serde(with = "crate::json_codecs::quoted_u64")] pub u64);

impl Slot {
    pub const GENESIS: Self = Self(0);
    pub const SECONDS_PER_SLOT: u64 = 12;
    pub const SLOTS_PER_EPOCH: u64 = 32;

    /// Start time of this slot on a chain that launched at `genesis_time`,
    /// `None` when it lies beyond what a `DateTime` can hold.
    pub fn date_time(&self, genesis_time: &DateTime<Utc>) -> Option<DateTime<Utc>> {
        let seconds = self.0.checked_mul(Self::SECONDS_PER_SLOT)?;
        let seconds = i64::try_from(seconds).ok()?;
        genesis_time.checked_add_signed(Duration::try_seconds(seconds)?)
    }

    /// Returns the most recent slot at or before the given date_time, `None` before genesis.
    pub fn from_date_time_rounded_down(
        genesis_time: &DateTime<Utc>,
        date_time: &DateTime<Utc>,
    ) -> Option<Self> {
        let seconds_since_genesis = (*date_time - *genesis_time).num_seconds();
        u64::try_from(seconds_since_genesis)
            .ok()
            .map(|seconds| Self(seconds / Self::SECONDS_PER_SLOT))
    }

    pub fn is_first_of_epoch(&self) -> bool {
        self.0 % Self::SLOTS_PER_EPOCH == 0
    }

    pub fn epoch(&self) -> Epoch {
        Epoch(self.0 / Self::SLOTS_PER_EPOCH)
    }
}

impl Epoch {
    pub fn first_slot(&self) -> Slot {
        Slot(self.0 * Slot::SLOTS_PER_EPOCH)
    }
}

impl Display for Slot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Display for Epoch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Add<u64> for Slot {
    type Output = Self;

    fn add(self, rhs: u64) -> Self::Output {
        Self(self.0 + rhs)
    }
}

impl Sub<u64> for Slot {
    type Output = Self;

    fn sub(self, rhs: u64) -> Self::Output {
        Self(self.0 - rhs)
    }
}

impl From<u64> for Slot {
    fn from(slot: u64) -> Self {
        Self(slot)
    }
}

impl From<Slot> for u64 {
    fn from(slot: Slot) -> Self {
        slot.0
    }
}

impl FromStr for Slot {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.parse()?))
    }
}
