use log::{debug, trace};
use rand::Rng;

use crate::batch::{ClearBatch, RecentWindow};
use crate::config::BufferConfig;
use crate::episode::{EpisodeRecord, EpisodeSummary, EpisodeTracker};
use crate::error::BufferError;
use crate::transition::Transition;

mod storage;
use storage::TransitionStore;


/// Fixed-capacity experience buffer producing mixed on/off-policy batches.
///
/// A `ClearBuffer` keeps one circular store of `capacity` transitions and
/// exposes two views of it:
/// - the **long window**: every resident slot, overwritten oldest-first once
///   the store wraps;
/// - the **recent window**: the transitions inserted since the last
///   [`reset_head`](Self::reset_head), at most `short_capacity` of them.
///
/// Batches from [`get_clear_batch`](Self::get_clear_batch) concatenate a
/// uniformly placed historical block with the most recent block, so that the
/// learner sees fresh on-policy data next to older off-policy data whose
/// behaviour probabilities and values were recorded at collection time.
///
/// # Lifecycle
///
/// 1. Insert with [`add_exp`](Self::add_exp) until [`buffer_full`](Self::buffer_full).
/// 2. Sample and train with [`get_clear_batch`](Self::get_clear_batch).
/// 3. Call [`reset_head`](Self::reset_head) and go back to collecting.
///
/// Insertion needs `&mut self` and sampling `&self`, so the two can never
/// overlap on the same buffer.
///
/// # Examples
///
/// ```
/// use clear_buffer::{BufferConfig, ClearBuffer, Transition};
/// use rand::rngs::StdRng;
/// use rand::SeedableRng;
///
/// let config = BufferConfig::new(2, 1, 10).with_short_capacity(5);
/// let mut buffer = ClearBuffer::new(config).unwrap();
///
/// for i in 0..5 {
///     buffer
///         .add_exp(&Transition {
///             state: vec![i as f32, 0.0],
///             action: vec![0],
///             action_prob: vec![0.5],
///             value: 0.0,
///             reward: i as f32,
///             next_state: vec![i as f32 + 1.0, 0.0],
///             terminate: false,
///             truncate: false,
///         })
///         .unwrap();
/// }
/// assert!(buffer.buffer_full());
///
/// let mut rng = StdRng::seed_from_u64(7);
/// let batch = buffer.get_clear_batch(&mut rng, 2).unwrap();
/// assert_eq!(batch.len(), 4);
/// assert_eq!(batch.recent(), &[3, 4]);
///
/// buffer.reset_head();
/// assert!(!buffer.buffer_full());
/// assert_eq!(buffer.len(), 5);
/// ```
#[derive(Debug, Clone)]
pub struct ClearBuffer {
    config: BufferConfig,
    store: TransitionStore,
    episodes: EpisodeTracker,
    /// Next slot to write (`b`).
    head: usize,
    /// Insertions since the last reset (`b_fifo`).
    fifo_len: usize,
    valid_samples: usize,
    num_samples: usize,
}

impl ClearBuffer {
    /// Allocates a zeroed buffer after validating `config`.
    pub fn new(config: BufferConfig) -> Result<Self, BufferError> {
        config.validate()?;
        debug!(
            "allocating CLEAR buffer: capacity={} short_capacity={} obs_len={} act_len={} reward_scale={}",
            config.capacity,
            config.short_capacity,
            config.obs_len,
            config.act_len,
            config.reward_scale
        );
        Ok(Self {
            store: TransitionStore::zeroed(config.obs_len, config.act_len, config.capacity),
            episodes: EpisodeTracker::new(config.capacity),
            head: 0,
            fifo_len: 0,
            valid_samples: 0,
            num_samples: 0,
            config,
        })
    }

    /// Inserts one transition.
    ///
    /// The transition overwrites the oldest slot once the store is full. A
    /// terminating or truncating step closes the running episode.
    ///
    /// # Errors
    ///
    /// - [`BufferError::ShapeMismatch`] if a vector length disagrees with the config.
    /// - [`BufferError::RecentWindowFull`] if `short_capacity` transitions were
    ///   inserted since the last [`reset_head`](Self::reset_head).
    ///
    /// On error nothing is written.
    pub fn add_exp(&mut self, transition: &Transition) -> Result<(), BufferError> {
        transition.check_shape(self.config.obs_len, self.config.act_len)?;
        if self.fifo_len >= self.config.short_capacity {
            return Err(BufferError::RecentWindowFull {
                short_cap: self.config.short_capacity,
            });
        }

        self.store.write(self.head, transition);
        self.head = (self.head + 1) % self.config.capacity;
        self.valid_samples = (self.valid_samples + 1).min(self.config.capacity);

        if let Some(record) = self
            .episodes
            .record_step(transition.reward, transition.is_episode_end())
        {
            trace!(
                "episode {} finished: length={} reward={:.3}",
                self.episodes.count(),
                record.length,
                record.total_reward
            );
        }

        self.fifo_len += 1;
        self.num_samples = self.num_samples.saturating_add(1);
        Ok(())
    }

    /// Samples a batch of `2 × batch_size` rows: a historical block followed
    /// by the `batch_size` most recently written slots.
    ///
    /// The historical block is contiguous and starts at an offset drawn
    /// uniformly from `[0, head - batch_size]`. Slots at or past the head are
    /// never part of it, even when they hold valid data after a wrap.
    ///
    /// # Errors
    ///
    /// - [`BufferError::InvalidBatchSize`] if `batch_size` is zero.
    /// - [`BufferError::InsufficientData`] if fewer than `batch_size`
    ///   transitions were collected or the head sits below `batch_size`.
    pub fn get_clear_batch<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        batch_size: usize,
    ) -> Result<ClearBatch, BufferError> {
        if batch_size == 0 {
            return Err(BufferError::InvalidBatchSize);
        }
        if self.num_samples < batch_size || self.head < batch_size {
            return Err(BufferError::InsufficientData {
                requested: batch_size,
                available: self.num_samples,
                head: self.head,
            });
        }

        let recent_start = self.head - batch_size;
        let historical_start = rng.gen_range(0..=recent_start);
        let indices: Vec<usize> = (historical_start..historical_start + batch_size)
            .chain(recent_start..self.head)
            .collect();
        debug_assert_eq!(indices.len(), 2 * batch_size);
        debug_assert!(indices.iter().all(|&i| i < self.config.capacity));

        trace!(
            "sampling CLEAR batch: historical=[{}, {}) recent=[{}, {})",
            historical_start,
            historical_start + batch_size,
            recent_start,
            self.head
        );
        Ok(self.store.gather(indices, self.config.reward_scale))
    }

    /// Returns true once `short_capacity` transitions were inserted since the
    /// last reset.
    pub fn buffer_full(&self) -> bool {
        self.fifo_len >= self.config.short_capacity
    }

    /// Starts a new recent window and a new episode accounting period.
    ///
    /// Stored transitions, the head and the sample counters are untouched.
    pub fn reset_head(&mut self) {
        debug!(
            "resetting recent window after {} transitions, {} episodes",
            self.fifo_len,
            self.episodes.count()
        );
        self.fifo_len = 0;
        self.episodes.reset_index();
    }

    /// The transitions inserted since the last reset, oldest first.
    pub fn recent_window(&self) -> RecentWindow {
        let cap = self.config.capacity;
        let first = self.head + cap - self.fifo_len;
        self.store
            .window((0..self.fifo_len).map(|k| (first + k) % cap))
    }

    /// Total insertions since construction (saturating).
    pub fn len(&self) -> usize {
        self.num_samples
    }

    pub fn is_empty(&self) -> bool {
        self.num_samples == 0
    }

    /// Number of slots holding real data: `min(len, capacity)`.
    pub fn valid_samples(&self) -> usize {
        self.valid_samples
    }

    pub fn capacity(&self) -> usize {
        self.config.capacity
    }

    pub fn short_capacity(&self) -> usize {
        self.config.short_capacity
    }

    /// Next slot to be written.
    pub fn head(&self) -> usize {
        self.head
    }

    /// Insertions since the last reset.
    pub fn fifo_len(&self) -> usize {
        self.fifo_len
    }

    pub fn obs_len(&self) -> usize {
        self.config.obs_len
    }

    pub fn act_len(&self) -> usize {
        self.config.act_len
    }

    pub fn reward_scale(&self) -> f32 {
        self.config.reward_scale
    }

    pub fn config(&self) -> &BufferConfig {
        &self.config
    }

    /// Episodes completed since the last reset.
    pub fn episode_count(&self) -> usize {
        self.episodes.count()
    }

    pub fn episodes(&self) -> &[EpisodeRecord] {
        self.episodes.completed()
    }

    pub fn episode_lengths(&self) -> Vec<usize> {
        self.episodes().iter().map(|r| r.length).collect()
    }

    pub fn episode_rewards(&self) -> Vec<f64> {
        self.episodes().iter().map(|r| r.total_reward).collect()
    }

    pub fn episode_summary(&self) -> Option<EpisodeSummary> {
        EpisodeSummary::from_records(self.episodes())
    }

    /// `(length, reward)` of the episode still in progress.
    pub fn pending_episode(&self) -> (usize, f64) {
        self.episodes.pending()
    }
}
