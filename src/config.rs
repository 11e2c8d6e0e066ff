//! Construction parameters for the CLEAR buffer.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::BufferError;

/// Fixed shape and capacity of a [`ClearBuffer`](crate::ClearBuffer).
///
/// Nothing here can change once the buffer is built; storage is allocated
/// up front from these values.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BufferConfig {
    /// Length of every state and next-state vector.
    pub obs_len: usize,
    /// Length of every action and action-probability vector.
    pub act_len: usize,
    /// Number of transitions held by the circular store.
    pub capacity: usize,
    /// Size of the recent window; also the `buffer_full` threshold.
    pub short_capacity: usize,
    /// Divisor applied to rewards when a batch is read.
    pub reward_scale: f32,
}

impl BufferConfig {
    /// Creates a config with `reward_scale = 1` and `short_capacity = capacity`.
    pub fn new(obs_len: usize, act_len: usize, capacity: usize) -> Self {
        Self {
            obs_len,
            act_len,
            capacity,
            short_capacity: capacity,
            reward_scale: 1.0,
        }
    }

    pub fn with_reward_scale(mut self, reward_scale: f32) -> Self {
        self.reward_scale = reward_scale;
        self
    }

    pub fn with_short_capacity(mut self, short_capacity: usize) -> Self {
        self.short_capacity = short_capacity;
        self
    }

    /// Checks every construction bound.
    ///
    /// A config that fails here is rejected outright; out-of-range values are
    /// never clamped.
    pub fn validate(&self) -> Result<(), BufferError> {
        for (field, value) in [
            ("obs_len", self.obs_len),
            ("act_len", self.act_len),
            ("capacity", self.capacity),
            ("short_capacity", self.short_capacity),
        ] {
            if value == 0 {
                return Err(BufferError::ZeroDimension { field });
            }
        }
        if self.short_capacity > self.capacity {
            return Err(BufferError::ShortCapacityExceedsCapacity {
                short_cap: self.short_capacity,
                cap: self.capacity,
            });
        }
        if !self.reward_scale.is_finite() || self.reward_scale == 0.0 {
            return Err(BufferError::InvalidRewardScale(self.reward_scale));
        }
        Ok(())
    }
}

impl Default for BufferConfig {
    fn default() -> Self {
        Self::new(1, 1, 100_000)
    }
}
