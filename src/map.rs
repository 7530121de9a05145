//! Tile coordinates and map adjacency
//!
//! Mirrors the host's own adjacency primitive: per-axis deltas take the
//! short way round on looping axes, so an object on the left edge of a
//! horizontally looping map is one tile away from the right edge.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::config::MapConfig;
use crate::{Result, TriggerError};

/// A tile position in integer grid coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct TilePos {
    pub x: i32,
    pub y: i32,
}

impl TilePos {
    /// Create a new tile position
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for TilePos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl From<(i32, i32)> for TilePos {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

/// Shape of the active map as far as distance is concerned
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MapTopology {
    pub width: u32,
    pub height: u32,
    pub loop_horizontal: bool,
    pub loop_vertical: bool,
}

impl MapTopology {
    /// A map with no looping on either axis
    pub fn bounded(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            loop_horizontal: false,
            loop_vertical: false,
        }
    }

    /// A map with the given looping behavior
    ///
    /// A looping axis must have a nonzero length.
    pub fn looping(width: u32, height: u32, loop_horizontal: bool, loop_vertical: bool) -> Result<Self> {
        if (loop_horizontal && width == 0) || (loop_vertical && height == 0) {
            return Err(TriggerError::InvalidMap { width, height });
        }
        Ok(Self {
            width,
            height,
            loop_horizontal,
            loop_vertical,
        })
    }

    /// Build a topology from the `[map]` settings table
    pub fn from_config(config: &MapConfig) -> Result<Self> {
        Self::looping(
            config.width,
            config.height,
            config.loop_horizontal,
            config.loop_vertical,
        )
    }

    /// Signed horizontal delta `a - b`, shortest way round on a looping map
    pub fn delta_x(&self, a: i32, b: i32) -> i32 {
        wrap_delta(a, b, self.width, self.loop_horizontal)
    }

    /// Signed vertical delta `a - b`, shortest way round on a looping map
    pub fn delta_y(&self, a: i32, b: i32) -> i32 {
        wrap_delta(a, b, self.height, self.loop_vertical)
    }

    /// Manhattan distance between two tiles
    pub fn distance(&self, a: TilePos, b: TilePos) -> u32 {
        self.delta_x(a.x, b.x)
            .unsigned_abs()
            .saturating_add(self.delta_y(a.y, b.y).unsigned_abs())
    }
}

fn wrap_delta(a: i32, b: i32, len: u32, looping: bool) -> i32 {
    let mut delta = i64::from(a) - i64::from(b);
    let len = i64::from(len);
    if looping && len > 0 && delta.abs() * 2 > len {
        if delta < 0 {
            delta += len;
        } else {
            delta -= len;
        }
    }
    delta.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
}
