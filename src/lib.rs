//! clear-buffer - experience storage for CLEAR-style hybrid on/off-policy training.
//!
//! A fixed-capacity circular buffer of environment transitions that yields
//! batches mixing the most recent ("on-policy") block with a uniformly placed
//! historical ("off-policy") block. Behaviour-policy probabilities and critic
//! values are stored alongside each step so the learner can correct for policy
//! drift since collection.

pub mod batch;
pub mod buffer;
pub mod config;
pub mod episode;
pub mod error;
pub mod transition;

pub use batch::{ClearBatch, RecentWindow};
pub use buffer::ClearBuffer;
pub use config::BufferConfig;
pub use episode::{EpisodeRecord, EpisodeSummary};
pub use error::BufferError;
pub use transition::Transition;
