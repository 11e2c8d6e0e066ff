//! Parallel fixed-size arrays backing the circular store.

use crate::batch::{ClearBatch, RecentWindow};
use crate::transition::Transition;

/// One row per slot, allocated once. Vector fields are flat with a fixed stride.
#[derive(Debug, Clone)]
pub(crate) struct TransitionStore {
    obs_len: usize,
    act_len: usize,
    states: Vec<f32>,
    next_states: Vec<f32>,
    actions: Vec<i64>,
    action_probs: Vec<f32>,
    values: Vec<f32>,
    rewards: Vec<f32>,
    terminates: Vec<bool>,
    truncates: Vec<bool>,
}

impl TransitionStore {
    pub(crate) fn zeroed(obs_len: usize, act_len: usize, capacity: usize) -> Self {
        Self {
            obs_len,
            act_len,
            states: vec![0.0; capacity * obs_len],
            next_states: vec![0.0; capacity * obs_len],
            actions: vec![0; capacity * act_len],
            action_probs: vec![0.0; capacity * act_len],
            values: vec![0.0; capacity],
            rewards: vec![0.0; capacity],
            terminates: vec![false; capacity],
            truncates: vec![false; capacity],
        }
    }

    /// Overwrites `slot`. The transition's shape must already be checked.
    pub(crate) fn write(&mut self, slot: usize, t: &Transition) {
        let obs = slot * self.obs_len..(slot + 1) * self.obs_len;
        let act = slot * self.act_len..(slot + 1) * self.act_len;
        self.states[obs.clone()].copy_from_slice(&t.state);
        self.next_states[obs].copy_from_slice(&t.next_state);
        self.actions[act.clone()].copy_from_slice(&t.action);
        self.action_probs[act].copy_from_slice(&t.action_prob);
        self.values[slot] = t.value;
        self.rewards[slot] = t.reward;
        self.terminates[slot] = t.terminate;
        self.truncates[slot] = t.truncate;
    }

    /// Copies the rows at `indices` into a batch, dividing rewards by `reward_scale`.
    pub(crate) fn gather(&self, indices: Vec<usize>, reward_scale: f32) -> ClearBatch {
        let n = indices.len();
        let mut batch = ClearBatch {
            states: Vec::with_capacity(n * self.obs_len),
            next_states: Vec::with_capacity(n * self.obs_len),
            actions: Vec::with_capacity(n * self.act_len),
            action_probs: Vec::with_capacity(n * self.act_len),
            values: Vec::with_capacity(n),
            rewards: Vec::with_capacity(n),
            terminates: Vec::with_capacity(n),
            truncates: Vec::with_capacity(n),
            indices: Vec::new(),
            obs_len: self.obs_len,
            act_len: self.act_len,
        };

        for &slot in &indices {
            batch.states.extend_from_slice(self.state_row(slot));
            batch
                .next_states
                .extend_from_slice(&self.next_states[slot * self.obs_len..(slot + 1) * self.obs_len]);
            batch.actions.extend_from_slice(self.action_row(slot));
            batch
                .action_probs
                .extend_from_slice(&self.action_probs[slot * self.act_len..(slot + 1) * self.act_len]);
            batch.values.push(self.values[slot]);
            batch.rewards.push(self.rewards[slot] / reward_scale);
            batch.terminates.push(self.terminates[slot]);
            batch.truncates.push(self.truncates[slot]);
        }
        batch.indices = indices;
        batch
    }

    /// Copies the state/action/reward/flag subset of `slots`, rewards unscaled.
    pub(crate) fn window(&self, slots: impl Iterator<Item = usize>) -> RecentWindow {
        let mut window = RecentWindow {
            states: Vec::new(),
            actions: Vec::new(),
            rewards: Vec::new(),
            terminates: Vec::new(),
            truncates: Vec::new(),
            obs_len: self.obs_len,
            act_len: self.act_len,
        };
        for slot in slots {
            window.states.extend_from_slice(self.state_row(slot));
            window.actions.extend_from_slice(self.action_row(slot));
            window.rewards.push(self.rewards[slot]);
            window.terminates.push(self.terminates[slot]);
            window.truncates.push(self.truncates[slot]);
        }
        window
    }

    fn state_row(&self, slot: usize) -> &[f32] {
        &self.states[slot * self.obs_len..(slot + 1) * self.obs_len]
    }

    fn action_row(&self, slot: usize) -> &[i64] {
        &self.actions[slot * self.act_len..(slot + 1) * self.act_len]
    }
}
