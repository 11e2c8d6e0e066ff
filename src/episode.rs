//! Per-episode reward and length bookkeeping.
//!
//! Episodes are accumulated incrementally as transitions arrive and flushed
//! into a record whenever a terminating or truncating step is seen.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Length and undiscounted return of one completed episode.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EpisodeRecord {
    pub length: usize,
    pub total_reward: f64,
}

/// Aggregate over the completed episodes of the current window.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EpisodeSummary {
    /// Number of completed episodes.
    pub n_episodes: usize,
    pub mean_reward: f64,
    pub min_reward: f64,
    pub max_reward: f64,
    pub mean_length: f64,
}

impl EpisodeSummary {
    /// Summarizes `records`, or returns `None` if there are none.
    pub fn from_records(records: &[EpisodeRecord]) -> Option<Self> {
        if records.is_empty() {
            return None;
        }
        let n = records.len() as f64;
        let mean_reward = records.iter().map(|r| r.total_reward).sum::<f64>() / n;
        let mean_length = records.iter().map(|r| r.length as f64).sum::<f64>() / n;
        let min_reward = records
            .iter()
            .map(|r| r.total_reward)
            .fold(f64::INFINITY, f64::min);
        let max_reward = records
            .iter()
            .map(|r| r.total_reward)
            .fold(f64::NEG_INFINITY, f64::max);

        Some(Self {
            n_episodes: records.len(),
            mean_reward,
            min_reward,
            max_reward,
            mean_length,
        })
    }
}

impl fmt::Display for EpisodeSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "episodes: {} | reward mean {:.2} (min {:.2}, max {:.2}) | length mean {:.1}",
            self.n_episodes, self.mean_reward, self.min_reward, self.max_reward, self.mean_length
        )
    }
}

/// Rolling accumulator plus the fixed-size table of completed episodes.
///
/// The table has one slot per buffer slot. The caller guarantees that no more
/// than `capacity` episodes are flushed between two [`EpisodeTracker::reset_index`]
/// calls; the buffer does so by bounding its recent window.
#[derive(Debug, Clone)]
pub(crate) struct EpisodeTracker {
    records: Vec<EpisodeRecord>,
    /// Next record slot (`b_epi`).
    index: usize,
    rew_roll: f64,
    len_roll: usize,
}

impl EpisodeTracker {
    pub(crate) fn new(capacity: usize) -> Self {
        Self {
            records: vec![
                EpisodeRecord {
                    length: 0,
                    total_reward: 0.0,
                };
                capacity
            ],
            index: 0,
            rew_roll: 0.0,
            len_roll: 0,
        }
    }

    /// Adds one step; closes the running episode if `episode_end`.
    ///
    /// Returns the record that was just flushed, if any.
    pub(crate) fn record_step(&mut self, reward: f32, episode_end: bool) -> Option<EpisodeRecord> {
        self.rew_roll += f64::from(reward);
        self.len_roll += 1;
        if !episode_end {
            return None;
        }

        debug_assert!(self.index < self.records.len(), "episode table overflow");
        let record = EpisodeRecord {
            length: self.len_roll,
            total_reward: self.rew_roll,
        };
        self.records[self.index] = record;
        self.index += 1;
        self.rew_roll = 0.0;
        self.len_roll = 0;
        Some(record)
    }

    /// Starts a new accounting period. The running episode keeps accumulating.
    pub(crate) fn reset_index(&mut self) {
        self.index = 0;
    }

    pub(crate) fn count(&self) -> usize {
        self.index
    }

    pub(crate) fn completed(&self) -> &[EpisodeRecord] {
        &self.records[..self.index]
    }

    /// `(length, reward)` of the episode still in progress.
    pub(crate) fn pending(&self) -> (usize, f64) {
        (self.len_roll, self.rew_roll)
    }
}
