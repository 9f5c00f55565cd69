//! Reference generator: latent vector to per-cell class distributions

use ndarray::Array2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::config::GeneratorConfig;
use super::model::{Forward, Generator, Model};
use crate::nn::{init_weights, Activation, ChannelSoftmax, Dense, HiddenBlock, Mlp, MlpTape, Param};
use crate::{Error, Result};

/// Fully connected generator
///
/// `latent -> [Dense, LayerNorm, ReLU] x (1 + extra_layers) -> Dense ->
/// softmax over tile classes per cell`. Its output therefore has the same
/// `[class][row][col]` layout as encoded examples.
#[derive(Debug, Clone)]
pub struct MlpGenerator {
    config: GeneratorConfig,
    body: Mlp,
    softmax: ChannelSoftmax,
}

impl MlpGenerator {
    /// Build and initialize from `rng`
    pub fn new<R: Rng>(config: GeneratorConfig, rng: &mut R) -> Result<Self> {
        if config.latent_size == 0 || config.hidden == 0 || config.output_size() == 0 {
            return Err(Error::Configuration(format!(
                "generator sizes must be > 0: {config:?}"
            )));
        }
        let mut blocks = vec![HiddenBlock::new(
            "main.initial",
            config.latent_size,
            config.hidden,
            true,
            Activation::Relu,
        )];
        for i in 0..config.extra_layers {
            blocks.push(HiddenBlock::new(
                &format!("main.extra{i}"),
                config.hidden,
                config.hidden,
                true,
                Activation::Relu,
            ));
        }
        let head = Dense::new("main.final", config.hidden, config.output_size());
        let mut body = Mlp::new(blocks, head);
        init_weights(body.layers_mut(), rng);

        Ok(Self {
            softmax: ChannelSoftmax::new(config.tile_classes),
            config,
            body,
        })
    }

    /// Create a generator with a seed for reproducibility
    pub fn with_seed(config: GeneratorConfig, seed: u64) -> Result<Self> {
        Self::new(config, &mut StdRng::seed_from_u64(seed))
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }
}

impl Model for MlpGenerator {
    fn name(&self) -> &str {
        "generator"
    }

    fn architecture(&self) -> String {
        format!(
            "mlp_generator(latent={}, hidden={}, extra_layers={}, tile_classes={}, canvas={})",
            self.config.latent_size,
            self.config.hidden,
            self.config.extra_layers,
            self.config.tile_classes,
            self.config.canvas
        )
    }

    fn parameters(&self) -> Vec<&Param> {
        self.body.params()
    }

    fn parameters_mut(&mut self) -> Vec<&mut Param> {
        self.body.params_mut()
    }
}

impl Generator for MlpGenerator {
    type Tape = MlpTape;

    fn latent_size(&self) -> usize {
        self.config.latent_size
    }

    fn output_size(&self) -> usize {
        self.config.output_size()
    }

    fn forward(&self, z: &Array2<f32>, with_gradient: bool) -> Forward<MlpTape> {
        let (logits, tape) = self.body.forward(z, with_gradient);
        Forward::new(self.softmax.forward(&logits), tape)
    }

    fn backward(&mut self, pass: &Forward<MlpTape>, grad_output: &Array2<f32>) -> Result<()> {
        let tape = pass.tape()?;
        let grad_logits = self.softmax.backward(pass.output(), grad_output);
        self.body.backward(tape, &grad_logits);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gan::latent::sample_latent;
    use approx::assert_abs_diff_eq;

    fn tiny() -> GeneratorConfig {
        GeneratorConfig {
            latent_size: 4,
            hidden: 8,
            extra_layers: 1,
            tile_classes: 3,
            canvas: 2,
        }
    }

    #[test]
    fn test_output_is_distribution_per_cell() {
        let generator = MlpGenerator::with_seed(tiny(), 1).unwrap();
        let z = sample_latent(&mut StdRng::seed_from_u64(2), 5, 4);
        let out = generator.forward(&z, false).into_output();

        assert_eq!(out.dim(), (5, 12));
        for row in out.rows() {
            for cell in 0..4 {
                let total: f32 = (0..3).map(|c| row[c * 4 + cell]).sum();
                assert_abs_diff_eq!(total, 1.0, epsilon = 1e-5);
            }
        }
    }

    #[test]
    fn test_backward_without_gradient_rejected() {
        let mut generator = MlpGenerator::with_seed(tiny(), 1).unwrap();
        let pass = generator.forward(&Array2::zeros((2, 4)), false);
        let err = generator.backward(&pass, &Array2::ones((2, 12))).unwrap_err();
        assert!(matches!(err, Error::Gradient(_)));
    }

    #[test]
    fn test_backward_accumulates_gradients() {
        let mut generator = MlpGenerator::with_seed(tiny(), 1).unwrap();
        let z = sample_latent(&mut StdRng::seed_from_u64(3), 2, 4);
        let pass = generator.forward(&z, true);
        let grad = Array2::from_shape_fn((2, 12), |(_, j)| j as f32);
        generator.backward(&pass, &grad).unwrap();

        let touched = generator
            .parameters()
            .iter()
            .any(|p| p.grad().iter().any(|&g| g != 0.0));
        assert!(touched);
    }

    #[test]
    fn test_parameter_layout() {
        let generator = MlpGenerator::with_seed(tiny(), 1).unwrap();
        // 2 blocks x (dense + norm) x 2 params + head x 2 params
        assert_eq!(generator.parameters().len(), 10);
        assert_eq!(
            generator.num_parameters(),
            (4 * 8 + 8 + 16) + (8 * 8 + 8 + 16) + (8 * 12 + 12)
        );
    }

    #[test]
    fn test_zero_latent_rejected() {
        let config = GeneratorConfig {
            latent_size: 0,
            ..tiny()
        };
        assert!(MlpGenerator::with_seed(config, 0).is_err());
    }
}
