//! RMSprop optimizer

use ndarray::{Array2, Zip};

use super::Optimizer;
use crate::nn::Param;

/// RMSprop: θ -= lr · g / (√v + ε) with v = α v + (1 - α) g²
pub struct RmsProp {
    lr: f32,
    alpha: f32,
    epsilon: f32,
    square_avg: Vec<Option<Array2<f32>>>,
}

impl RmsProp {
    pub fn new(lr: f32, alpha: f32, epsilon: f32) -> Self {
        Self {
            lr,
            alpha,
            epsilon,
            square_avg: Vec::new(),
        }
    }

    /// RMSprop with `alpha = 0.99`, `epsilon = 1e-8`
    pub fn default_params(lr: f32) -> Self {
        Self::new(lr, 0.99, 1e-8)
    }
}

impl Optimizer for RmsProp {
    fn step(&mut self, params: &mut [&mut Param]) {
        if self.square_avg.len() < params.len() {
            self.square_avg.resize(params.len(), None);
        }
        let (alpha, eps, lr) = (self.alpha, self.epsilon, self.lr);

        for (param, slot) in params.iter_mut().zip(self.square_avg.iter_mut()) {
            if !param.requires_grad() {
                continue;
            }
            let avg = slot.get_or_insert_with(|| Array2::zeros(param.grad().raw_dim()));
            Zip::from(&mut *avg).and(param.grad()).for_each(|a, &g| {
                *a = alpha * *a + (1.0 - alpha) * g * g;
            });
            let update = Zip::from(param.grad())
                .and(&*avg)
                .map_collect(|&g, &a| lr * g / (a.sqrt() + eps));
            *param.data_mut() -= &update;
        }
    }

    fn lr(&self) -> f32 {
        self.lr
    }

    fn set_lr(&mut self, lr: f32) {
        self.lr = lr;
    }

    fn name(&self) -> &'static str {
        "rmsprop"
    }
}
