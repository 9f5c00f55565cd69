//! Reference critic: one-hot grid batch to a realness score

use ndarray::Array2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::config::CriticConfig;
use super::model::{Critic, CriticForward, Model};
use crate::nn::{init_weights, Activation, Dense, HiddenBlock, Mlp, MlpTape, Param};
use crate::{Error, Result};

const LEAKY_SLOPE: f32 = 0.2;

/// Fully connected critic
///
/// `input -> Dense, LeakyReLU -> [Dense, LayerNorm, LeakyReLU] x extra_layers
/// -> Dense(1)`, averaged over the batch. The score is unbounded.
#[derive(Debug, Clone)]
pub struct MlpCritic {
    config: CriticConfig,
    body: Mlp,
}

impl MlpCritic {
    pub fn new<R: Rng>(config: CriticConfig, rng: &mut R) -> Result<Self> {
        if config.hidden == 0 || config.input_size() == 0 {
            return Err(Error::Configuration(format!(
                "critic sizes must be > 0: {config:?}"
            )));
        }
        let mut blocks = vec![HiddenBlock::new(
            "main.initial",
            config.input_size(),
            config.hidden,
            false,
            Activation::LeakyRelu(LEAKY_SLOPE),
        )];
        for i in 0..config.extra_layers {
            blocks.push(HiddenBlock::new(
                &format!("main.extra{i}"),
                config.hidden,
                config.hidden,
                true,
                Activation::LeakyRelu(LEAKY_SLOPE),
            ));
        }
        let mut body = Mlp::new(blocks, Dense::new("main.final", config.hidden, 1));
        init_weights(body.layers_mut(), rng);
        Ok(Self { config, body })
    }

    pub fn with_seed(config: CriticConfig, seed: u64) -> Result<Self> {
        Self::new(config, &mut StdRng::seed_from_u64(seed))
    }

    pub fn config(&self) -> &CriticConfig {
        &self.config
    }
}

impl Model for MlpCritic {
    fn name(&self) -> &str {
        "critic"
    }

    fn architecture(&self) -> String {
        format!(
            "mlp_critic(tile_classes={}, canvas={}, hidden={}, extra_layers={})",
            self.config.tile_classes, self.config.canvas, self.config.hidden, self.config.extra_layers
        )
    }

    fn parameters(&self) -> Vec<&Param> {
        self.body.params()
    }

    fn parameters_mut(&mut self) -> Vec<&mut Param> {
        self.body.params_mut()
    }
}

impl Critic for MlpCritic {
    type Tape = MlpTape;

    fn input_size(&self) -> usize {
        self.config.input_size()
    }

    fn forward(&self, x: &Array2<f32>, with_gradient: bool) -> CriticForward<MlpTape> {
        let (scores, tape) = self.body.forward(x, with_gradient);
        let batch = x.nrows();
        let score = scores.mean().unwrap_or(0.0);
        CriticForward::new(score, batch, tape)
    }

    fn backward(&mut self, pass: &CriticForward<MlpTape>, seed: f32) -> Result<Array2<f32>> {
        let tape = pass.tape()?;
        // d mean / d score_i = 1 / batch
        let dy = Array2::from_elem((pass.batch(), 1), seed / pass.batch().max(1) as f32);
        Ok(self.body.backward(tape, &dy))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn tiny() -> CriticConfig {
        CriticConfig {
            tile_classes: 2,
            canvas: 2,
            hidden: 6,
            extra_layers: 1,
        }
    }

    fn input() -> Array2<f32> {
        Array2::from_shape_fn((3, 8), |(i, j)| ((i + j) % 2) as f32)
    }

    #[test]
    fn test_score_is_batch_mean() {
        let critic = MlpCritic::with_seed(tiny(), 4).unwrap();
        let x = input();
        let whole = critic.forward(&x, false).score();
        let parts: f32 = (0..3)
            .map(|i| critic.forward(&x.slice(ndarray::s![i..i + 1, ..]).to_owned(), false).score())
            .sum();
        assert_abs_diff_eq!(whole, parts / 3.0, epsilon = 1e-6);
    }

    #[test]
    fn test_seed_sign_flips_gradients() {
        let x = input();
        let mut plus = MlpCritic::with_seed(tiny(), 4).unwrap();
        let mut minus = plus.clone();

        let pass = plus.forward(&x, true);
        let dx_plus = plus.backward(&pass, 1.0).unwrap();
        let pass = minus.forward(&x, true);
        let dx_minus = minus.backward(&pass, -1.0).unwrap();

        assert_eq!(dx_plus, -&dx_minus);
        for (a, b) in plus.parameters().iter().zip(minus.parameters()) {
            assert_eq!(a.grad(), &(-b.grad()));
        }
    }

    #[test]
    fn test_frozen_critic_still_passes_input_gradient() {
        let mut critic = MlpCritic::with_seed(tiny(), 4).unwrap();
        critic.set_requires_grad(false);

        let pass = critic.forward(&input(), true);
        let dx = critic.backward(&pass, 1.0).unwrap();

        assert_eq!(dx.dim(), (3, 8));
        assert!(dx.iter().any(|&g| g != 0.0));
        assert!(critic
            .parameters()
            .iter()
            .all(|p| p.grad().iter().all(|&g| g == 0.0)));
    }

    #[test]
    fn test_state_dict_round_trip() {
        let source = MlpCritic::with_seed(tiny(), 4).unwrap();
        let mut target = MlpCritic::with_seed(tiny(), 5).unwrap();
        assert_ne!(source.parameters()[0].data(), target.parameters()[0].data());

        target.load_state_dict(&source.state_dict()).unwrap();
        assert_eq!(source.parameters()[0].data(), target.parameters()[0].data());
    }

    #[test]
    fn test_state_dict_from_other_architecture_rejected() {
        let source = MlpCritic::with_seed(tiny(), 4).unwrap();
        let wider = CriticConfig { hidden: 7, ..tiny() };
        let mut target = MlpCritic::with_seed(wider, 4).unwrap();
        let err = target.load_state_dict(&source.state_dict()).unwrap_err();
        assert!(matches!(err, Error::StateDict(_)));
    }
}
