//! Read-side views produced by the buffer.

/// Training batch of `2 × batch_size` rows: historical half first, then the
/// recent half.
///
/// Vector fields are flat row-major arrays; `states` and `next_states` have a
/// stride of `obs_len`, `actions` and `action_probs` a stride of `act_len`.
#[derive(Debug, Clone, PartialEq)]
pub struct ClearBatch {
    pub states: Vec<f32>,
    pub next_states: Vec<f32>,
    pub actions: Vec<i64>,
    pub action_probs: Vec<f32>,
    pub values: Vec<f32>,
    /// Rewards already divided by the buffer's reward scale.
    pub rewards: Vec<f32>,
    pub terminates: Vec<bool>,
    pub truncates: Vec<bool>,
    /// Store slot each row was read from.
    pub indices: Vec<usize>,
    pub obs_len: usize,
    pub act_len: usize,
}

impl ClearBatch {
    /// Number of rows (twice the requested batch size).
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Rows per half.
    pub fn half_len(&self) -> usize {
        self.len() / 2
    }

    pub fn state(&self, row: usize) -> &[f32] {
        &self.states[row * self.obs_len..(row + 1) * self.obs_len]
    }

    pub fn next_state(&self, row: usize) -> &[f32] {
        &self.next_states[row * self.obs_len..(row + 1) * self.obs_len]
    }

    pub fn action(&self, row: usize) -> &[i64] {
        &self.actions[row * self.act_len..(row + 1) * self.act_len]
    }

    pub fn action_prob(&self, row: usize) -> &[f32] {
        &self.action_probs[row * self.act_len..(row + 1) * self.act_len]
    }

    /// Slot indices of the off-policy half.
    pub fn historical(&self) -> &[usize] {
        &self.indices[..self.half_len()]
    }

    /// Slot indices of the on-policy half.
    pub fn recent(&self) -> &[usize] {
        &self.indices[self.half_len()..]
    }
}

/// The transitions inserted since the last `reset_head`, oldest first.
///
/// Rewards are raw; no reward scale is applied here.
#[derive(Debug, Clone, PartialEq)]
pub struct RecentWindow {
    pub states: Vec<f32>,
    pub actions: Vec<i64>,
    pub rewards: Vec<f32>,
    pub terminates: Vec<bool>,
    pub truncates: Vec<bool>,
    pub obs_len: usize,
    pub act_len: usize,
}

impl RecentWindow {
    pub fn len(&self) -> usize {
        self.rewards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rewards.is_empty()
    }

    pub fn state(&self, row: usize) -> &[f32] {
        &self.states[row * self.obs_len..(row + 1) * self.obs_len]
    }

    pub fn action(&self, row: usize) -> &[i64] {
        &self.actions[row * self.act_len..(row + 1) * self.act_len]
    }
}
