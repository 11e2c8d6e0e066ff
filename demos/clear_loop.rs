// Demonstration: drive the CLEAR buffer with a toy environment using the
// collect -> sample -> reset cycle of a training loop.
//
// Run from the repo root:
//   RUST_LOG=debug cargo run --example clear_loop -- --epochs 5 --batch 64 --seed 7

use std::env;

use clear_buffer::{BufferConfig, ClearBuffer, Transition};
use log::info;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const OBS_LEN: usize = 3;
const ACT_LEN: usize = 1;
const N_ACTIONS: i64 = 9;
const TIME_LIMIT: usize = 200;

/// Random walk on a line: reward is minus the distance to the origin, the
/// episode terminates when the walker leaves `[-10, 10]`.
struct ToyWalk {
    position: f32,
    velocity: f32,
    steps: usize,
}

impl ToyWalk {
    fn new() -> Self {
        Self {
            position: 0.0,
            velocity: 0.0,
            steps: 0,
        }
    }

    fn observe(&self) -> Vec<f32> {
        vec![self.position, self.velocity, self.steps as f32 / TIME_LIMIT as f32]
    }

    fn reset(&mut self, rng: &mut StdRng) -> Vec<f32> {
        self.position = rng.gen_range(-1.0..1.0);
        self.velocity = 0.0;
        self.steps = 0;
        self.observe()
    }

    /// Returns `(next_state, reward, terminate, truncate)`.
    fn step(&mut self, action: i64, rng: &mut StdRng) -> (Vec<f32>, f32, bool, bool) {
        let push = (action - N_ACTIONS / 2) as f32 * 0.1;
        self.velocity = 0.9 * self.velocity + push + rng.gen_range(-0.2..0.2);
        self.position += self.velocity;
        self.steps += 1;
        let reward = -self.position.abs();
        let terminate = self.position.abs() > 10.0;
        let truncate = self.steps >= TIME_LIMIT;
        (self.observe(), reward, terminate, truncate)
    }
}

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let epochs: usize = arg_value(&args, "--epochs")
        .and_then(|s| s.parse().ok())
        .unwrap_or(5);
    let batch_size: usize = arg_value(&args, "--batch")
        .and_then(|s| s.parse().ok())
        .unwrap_or(64);
    let seed: u64 = arg_value(&args, "--seed")
        .and_then(|s| s.parse().ok())
        .unwrap_or(42);

    let config = BufferConfig::new(OBS_LEN, ACT_LEN, 4096)
        .with_short_capacity(1024)
        .with_reward_scale(10.0);
    let mut buffer = match ClearBuffer::new(config) {
        Ok(buffer) => buffer,
        Err(e) => {
            eprintln!("Invalid buffer configuration: {}", e);
            std::process::exit(2);
        }
    };

    let mut rng = StdRng::seed_from_u64(seed);
    let mut walk = ToyWalk::new();
    let mut state = walk.reset(&mut rng);

    for epoch in 0..epochs {
        while !buffer.buffer_full() {
            let action = rng.gen_range(0..N_ACTIONS);
            let (next_state, reward, terminate, truncate) = walk.step(action, &mut rng);
            let transition = Transition {
                state: state.clone(),
                action: vec![action],
                action_prob: vec![1.0 / N_ACTIONS as f32],
                value: 0.0,
                reward,
                next_state: next_state.clone(),
                terminate,
                truncate,
            };
            if let Err(e) = buffer.add_exp(&transition) {
                eprintln!("Insertion failed: {}", e);
                std::process::exit(1);
            }
            state = if terminate || truncate {
                walk.reset(&mut rng)
            } else {
                next_state
            };
        }

        match buffer.get_clear_batch(&mut rng, batch_size) {
            Ok(batch) => {
                let mean_reward = batch.rewards.iter().sum::<f32>() / batch.len() as f32;
                info!(
                    "epoch {}: sampled {} rows (historical from slot {}), mean scaled reward {:.3}",
                    epoch,
                    batch.len(),
                    batch.historical()[0],
                    mean_reward
                );
            }
            // The head has just wrapped below the batch size; skip this epoch.
            Err(e) => info!("epoch {}: no batch ({})", epoch, e),
        }

        match buffer.episode_summary() {
            Some(summary) => println!("epoch {}: {}", epoch, summary),
            None => println!("epoch {}: no completed episodes", epoch),
        }
        buffer.reset_head();
    }

    println!(
        "collected {} transitions, {} resident",
        buffer.len(),
        buffer.valid_samples()
    );
}

fn arg_value<'a>(args: &'a [String], key: &str) -> Option<&'a str> {
    args.iter()
        .position(|a| a == key)
        .and_then(|i| args.get(i + 1))
        .map(|s| s.as_str())
}
