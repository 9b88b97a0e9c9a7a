use serde::Serialize;
use std::fmt;

use crate::error::{Error, Result};

/// Floor number. Signed, so basements below the ground floor can be expressed.
pub type Floor = i32;

/// Inclusive range of floors served by the building.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FloorRange {
    lowest: Floor,
    highest: Floor,
}

impl FloorRange {
    pub fn new(lowest: Floor, highest: Floor) -> Result<Self> {
        if lowest > highest {
            return Err(Error::InvalidFloorRange { lowest, highest });
        }
        Ok(FloorRange { lowest, highest })
    }

    /// Floors `0..floor_count`, the numbering used by most buildings without basements.
    pub fn with_floor_count(floor_count: u32) -> Result<Self> {
        if floor_count == 0 {
            return Err(Error::InvalidFloorRange { lowest: 0, highest: -1 });
        }
        let highest = Floor::try_from(floor_count - 1).map_err(|_| Error::InvalidFloorRange { lowest: 0, highest: Floor::MAX })?;
        Self::new(0, highest)
    }

    pub fn lowest(&self) -> Floor {
        self.lowest
    }

    pub fn highest(&self) -> Floor {
        self.highest
    }

    pub fn contains(&self, floor: Floor) -> bool {
        (self.lowest..=self.highest).contains(&floor)
    }

    /// Number of floors in the range, saturating at `u32::MAX` for the full `i32` range.
    pub fn floor_count(&self) -> u32 {
        u32::try_from(i64::from(self.highest) - i64::from(self.lowest) + 1).unwrap_or(u32::MAX)
    }

    pub(crate) fn check(&self, floor: Floor) -> Result<()> {
        if self.contains(floor) { Ok(()) } else { Err(Error::FloorOutOfRange { floor, floors: *self }) }
    }
}

impl fmt::Display for FloorRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.lowest, self.highest)
    }
}
