//! A single environment step as accepted by the buffer.

use crate::error::BufferError;

/// One step of experience, plus what the behaviour policy and critic reported
/// when the step was collected.
#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    /// Observation before the action.
    pub state: Vec<f32>,
    /// Discrete action chosen per action dimension.
    pub action: Vec<i64>,
    /// Probability (or logit) the behaviour policy assigned to each chosen action.
    pub action_prob: Vec<f32>,
    /// Critic value estimate of `state` at collection time.
    pub value: f32,
    /// Raw, unscaled reward.
    pub reward: f32,
    /// Observation after the action.
    pub next_state: Vec<f32>,
    /// The environment reached a natural end state.
    pub terminate: bool,
    /// The episode was cut by a time limit.
    pub truncate: bool,
}

impl Transition {
    /// Returns true if this step closes an episode, for either reason.
    pub fn is_episode_end(&self) -> bool {
        self.terminate || self.truncate
    }

    /// Checks every vector against the buffer's fixed shape.
    pub fn check_shape(&self, obs_len: usize, act_len: usize) -> Result<(), BufferError> {
        for (field, expected, actual) in [
            ("state", obs_len, self.state.len()),
            ("next_state", obs_len, self.next_state.len()),
            ("action", act_len, self.action.len()),
            ("action_prob", act_len, self.action_prob.len()),
        ] {
            if actual != expected {
                return Err(BufferError::ShapeMismatch {
                    field,
                    expected,
                    actual,
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn step(obs_len: usize, act_len: usize) -> Transition {
        Transition {
            state: vec![0.0; obs_len],
            action: vec![0; act_len],
            action_prob: vec![1.0; act_len],
            value: 0.5,
            reward: 1.0,
            next_state: vec![0.0; obs_len],
            terminate: false,
            truncate: false,
        }
    }

    #[test]
    fn episode_end_flags_are_independent() {
        let mut t = step(2, 1);
        assert!(!t.is_episode_end());

        t.truncate = true;
        assert!(t.is_episode_end());
        assert!(!t.terminate);

        t.terminate = true;
        assert!(t.is_episode_end());
        assert!(t.truncate);
    }

    #[test]
    fn matching_shape_passes() {
        assert!(step(3, 2).check_shape(3, 2).is_ok());
    }

    #[test]
    fn mismatched_next_state_is_reported() {
        let mut t = step(3, 1);
        t.next_state.push(0.0);
        assert_eq!(
            t.check_shape(3, 1),
            Err(BufferError::ShapeMismatch {
                field: "next_state",
                expected: 3,
                actual: 4
            })
        );
    }

    #[test]
    fn mismatched_action_prob_is_reported() {
        let mut t = step(3, 2);
        t.action_prob.pop();
        assert!(matches!(
            t.check_shape(3, 2),
            Err(BufferError::ShapeMismatch {
                field: "action_prob",
                ..
            })
        ));
    }
}
