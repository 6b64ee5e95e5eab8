//! Broadphase data and logic module: grouped registration, queries and motion correction.

mod motion;
mod record;
mod world;

pub use record::{CollisionRecord, Handle};
pub use world::CollisionWorld;

use std::{fmt::Debug, hash::Hash};

/// Identifies an independently queried collision group, e.g. an application-defined enum.
pub trait GroupId: Copy + Eq + Hash + Debug {}
impl<G: Copy + Eq + Hash + Debug> GroupId for G {}

/// Behaviour switches for a `CollisionWorld`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorldConfig {
    /// Maximum marching iterations spent against any one record during motion correction.
    /// `None` leaves the march uncapped.
    pub march_limit: Option<u32>,
    /// Whether queries and motion correction ignore records with `enabled == false`.
    pub skip_disabled: bool,
}
impl WorldConfig {
    pub const DEFAULT_MARCH_LIMIT: u32 = 1 << 16;

    pub fn with_march_limit(mut self, limit: Option<u32>) -> Self {
        self.march_limit = limit;
        self
    }
    pub fn with_skip_disabled(mut self, skip: bool) -> Self {
        self.skip_disabled = skip;
        self
    }
}
impl Default for WorldConfig {
    fn default() -> Self {
        WorldConfig {
            march_limit: Some(WorldConfig::DEFAULT_MARCH_LIMIT),
            skip_disabled: false,
        }
    }
}
