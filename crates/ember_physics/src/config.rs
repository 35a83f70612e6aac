//! Physics configuration

use serde::{Deserialize, Serialize};

use crate::error::{PhysicsError, Result};

/// Physics world configuration
///
/// Passed to [`PhysicsWorld::new`](crate::world::PhysicsWorld::new) and
/// queried per tick; there are no process-wide toggles.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhysicsConfig {
    /// Fixed timestep one simulation tick covers, in seconds
    pub timestep: f32,

    /// Maximum number of whole ticks run per `update` call
    pub max_substeps: u32,

    /// Largest extent (width or height) any static body may have.
    ///
    /// Sizes the broad-phase window margin; a static body exceeding it can
    /// be missed by the window query. Map content must respect this bound.
    pub max_static_extent: f32,

    /// Fraction of the push vector kept after each tick (0 clears it
    /// outright, values toward 1 let currents taper off)
    pub push_retention: f32,

    /// Maintain the debug mirror for overlay rendering
    pub debug_mirror: bool,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            timestep: 1.0 / 60.0,
            max_substeps: 4,
            max_static_extent: 32.0,
            push_retention: 0.0,
            debug_mirror: false,
        }
    }
}

impl PhysicsConfig {
    /// Set the fixed timestep
    pub fn with_timestep(mut self, timestep: f32) -> Self {
        self.timestep = timestep;
        self
    }

    /// Set the maximum static body extent (the broad-phase margin)
    pub fn with_max_static_extent(mut self, extent: f32) -> Self {
        self.max_static_extent = extent;
        self
    }

    /// Set the push retention factor
    pub fn with_push_retention(mut self, retention: f32) -> Self {
        self.push_retention = retention;
        self
    }

    /// Enable or disable the debug mirror
    pub fn with_debug_mirror(mut self, enabled: bool) -> Self {
        self.debug_mirror = enabled;
        self
    }

    /// Check that the configuration is usable.
    pub fn validate(&self) -> Result<()> {
        if !(self.timestep > 0.0) {
            return Err(PhysicsError::InvalidConfig(format!(
                "timestep must be positive, got {}",
                self.timestep
            )));
        }
        if self.max_substeps == 0 {
            return Err(PhysicsError::InvalidConfig(
                "max_substeps must be at least 1".into(),
            ));
        }
        if !(self.max_static_extent > 0.0) {
            return Err(PhysicsError::InvalidConfig(format!(
                "max_static_extent must be positive, got {}",
                self.max_static_extent
            )));
        }
        if !(0.0..1.0).contains(&self.push_retention) {
            return Err(PhysicsError::InvalidConfig(format!(
                "push_retention must be in [0, 1), got {}",
                self.push_retention
            )));
        }
        Ok(())
    }
}
