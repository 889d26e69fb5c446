//! Network Artifact - fully connected tanh network
//!
//! The guidance core only needs two capabilities from a function
//! approximator: forward inference and a bounded batch-training routine.
//! `Network` captures exactly that; `FeedForwardNetwork` is the one
//! implementation shipped here.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{InterceptError, Result};

// =============================================================================
// Training data contract
// =============================================================================

/// One supervised pair: sensor reading in, desired correction out
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingSample {
    pub input: Vec<f64>,
    pub output: Vec<f64>,
}

impl TrainingSample {
    pub fn new(input: Vec<f64>, output: Vec<f64>) -> Self {
        Self { input, output }
    }
}

/// Stopping rules for one training run
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrainingBudget {
    /// Largest tolerated |output - desired| across every sample
    pub max_error: f64,
    /// Epochs between convergence checks
    pub check_interval: u64,
    /// Epochs before giving up
    pub max_attempts: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrainingReport {
    pub converged: bool,
    /// Epochs actually run
    pub epochs: u64,
    /// Worst |output - desired| at the last check
    pub max_deviation: f64,
}

/// External numeric primitive used by the learned guidance
pub trait Network {
    fn input_width(&self) -> usize;

    fn output_width(&self) -> usize;

    /// Forward pass. `input.len()` must equal `input_width()`.
    fn infer(&self, input: &[f64]) -> Vec<f64>;

    /// Fit the samples until every output is within `budget.max_error`
    /// or the epoch budget runs out.
    fn train(&mut self, samples: &[TrainingSample], budget: TrainingBudget) -> TrainingReport;
}

// =============================================================================
// FeedForwardNetwork
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
struct DenseLayer {
    /// weights[out][in]
    weights: Vec<Vec<f64>>,
    biases: Vec<f64>,
}

impl DenseLayer {
    fn random(inputs: usize, outputs: usize, rng: &mut ChaCha8Rng) -> Self {
        let weights = (0..outputs)
            .map(|_| (0..inputs).map(|_| rng.gen_range(-0.5..0.5)).collect())
            .collect();
        let biases = (0..outputs).map(|_| rng.gen_range(-0.5..0.5)).collect();
        Self { weights, biases }
    }

    fn forward(&self, input: &[f64]) -> Vec<f64> {
        self.weights
            .iter()
            .zip(&self.biases)
            .map(|(row, bias)| {
                let z: f64 = row.iter().zip(input).map(|(w, x)| w * x).sum::<f64>() + bias;
                z.tanh()
            })
            .collect()
    }
}

/// Multi-layer perceptron, tanh on every layer, trained by per-sample
/// gradient descent on squared error.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedForwardNetwork {
    layers: Vec<DenseLayer>,
    learning_rate: f64,
}

impl FeedForwardNetwork {
    /// `layer_sizes` lists the input width, any hidden widths, then the output width.
    pub fn new(layer_sizes: &[usize], learning_rate: f64, seed: u64) -> Result<Self> {
        if layer_sizes.len() < 2 {
            return Err(InterceptError::InvalidConfig(
                "network needs at least an input and an output layer".to_string(),
            ));
        }
        if layer_sizes.iter().any(|&n| n == 0) {
            return Err(InterceptError::InvalidConfig("network layers must not be empty".to_string()));
        }
        if !(learning_rate > 0.0) {
            return Err(InterceptError::InvalidConfig("learning rate must be positive".to_string()));
        }

        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let layers = layer_sizes
            .windows(2)
            .map(|pair| DenseLayer::random(pair[0], pair[1], &mut rng))
            .collect();

        Ok(Self { layers, learning_rate })
    }

    pub fn layer_sizes(&self) -> Vec<usize> {
        let mut sizes = vec![self.input_width()];
        sizes.extend(self.layers.iter().map(|l| l.biases.len()));
        sizes
    }

    /// Activations of every layer, the input included
    fn activations(&self, input: &[f64]) -> Vec<Vec<f64>> {
        let mut acts = Vec::with_capacity(self.layers.len() + 1);
        acts.push(input.to_vec());
        for layer in &self.layers {
            let next = layer.forward(&acts[acts.len() - 1]);
            acts.push(next);
        }
        acts
    }

    fn backpropagate(&mut self, sample: &TrainingSample) {
        let acts = self.activations(&sample.input);
        let output = &acts[acts.len() - 1];

        // dE/dz for the output layer, E = ½Σ(y - t)²
        let mut delta: Vec<f64> = output
            .iter()
            .zip(&sample.output)
            .map(|(y, t)| (y - t) * (1.0 - y * y))
            .collect();

        for l in (0..self.layers.len()).rev() {
            let prev = &acts[l];

            // Propagate before the weights move.
            let prev_delta: Option<Vec<f64>> = (l > 0).then(|| {
                (0..prev.len())
                    .map(|k| {
                        let back: f64 = self.layers[l]
                            .weights
                            .iter()
                            .zip(&delta)
                            .map(|(row, d)| row[k] * d)
                            .sum();
                        back * (1.0 - prev[k] * prev[k])
                    })
                    .collect()
            });

            let layer = &mut self.layers[l];
            for (j, d) in delta.iter().enumerate() {
                for (w, x) in layer.weights[j].iter_mut().zip(prev) {
                    *w -= self.learning_rate * d * x;
                }
                layer.biases[j] -= self.learning_rate * d;
            }

            if let Some(next) = prev_delta {
                delta = next;
            }
        }
    }

    /// Worst absolute output deviation across all samples
    pub fn max_deviation(&self, samples: &[TrainingSample]) -> f64 {
        samples
            .iter()
            .flat_map(|s| {
                self.infer(&s.input)
                    .into_iter()
                    .zip(s.output.iter().copied())
                    .map(|(y, t)| (y - t).abs())
                    .collect::<Vec<_>>()
            })
            .fold(0.0, f64::max)
    }
}

impl Network for FeedForwardNetwork {
    fn input_width(&self) -> usize {
        self.layers.first().map(|l| l.weights.first().map_or(0, Vec::len)).unwrap_or(0)
    }

    fn output_width(&self) -> usize {
        self.layers.last().map_or(0, |l| l.biases.len())
    }

    fn infer(&self, input: &[f64]) -> Vec<f64> {
        debug_assert_eq!(input.len(), self.input_width());
        self.layers.iter().fold(input.to_vec(), |acts, layer| layer.forward(&acts))
    }

    fn train(&mut self, samples: &[TrainingSample], budget: TrainingBudget) -> TrainingReport {
        let shapes_ok = samples
            .iter()
            .all(|s| s.input.len() == self.input_width() && s.output.len() == self.output_width());
        if samples.is_empty() || !shapes_ok {
            warn!(samples = samples.len(), shapes_ok, "refusing to train on unusable samples");
            return TrainingReport { converged: false, epochs: 0, max_deviation: f64::INFINITY };
        }

        let check_interval = budget.check_interval.max(1);
        let mut max_deviation = self.max_deviation(samples);

        for epoch in 1..=budget.max_attempts {
            for sample in samples {
                self.backpropagate(sample);
            }

            if epoch % check_interval == 0 {
                max_deviation = self.max_deviation(samples);
                debug!(epoch, max_deviation, "convergence check");
                if max_deviation <= budget.max_error {
                    return TrainingReport { converged: true, epochs: epoch, max_deviation };
                }
            }
        }

        max_deviation = self.max_deviation(samples);
        TrainingReport {
            converged: max_deviation <= budget.max_error,
            epochs: budget.max_attempts,
            max_deviation,
        }
    }
}
