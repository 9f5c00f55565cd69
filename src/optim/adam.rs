//! Adam optimizer

use ndarray::{Array2, Zip};

use super::Optimizer;
use crate::nn::Param;

/// Adam with bias-corrected moment estimates
///
/// m_t = β1 m_{t-1} + (1 - β1) g
/// v_t = β2 v_{t-1} + (1 - β2) g²
/// θ_t = θ_{t-1} - lr · m̂_t / (√v̂_t + ε)
pub struct Adam {
    lr: f32,
    beta1: f32,
    beta2: f32,
    epsilon: f32,
    t: u64,
    m: Vec<Option<Array2<f32>>>,
    v: Vec<Option<Array2<f32>>>,
}

impl Adam {
    pub fn new(lr: f32, beta1: f32, beta2: f32, epsilon: f32) -> Self {
        Self {
            lr,
            beta1,
            beta2,
            epsilon,
            t: 0,
            m: Vec::new(),
            v: Vec::new(),
        }
    }

    /// Adam with `beta2 = 0.999`, `epsilon = 1e-8`
    pub fn with_beta1(lr: f32, beta1: f32) -> Self {
        Self::new(lr, beta1, 0.999, 1e-8)
    }

    pub fn beta1(&self) -> f32 {
        self.beta1
    }

    pub fn step_count(&self) -> u64 {
        self.t
    }

    fn ensure_moments(&mut self, count: usize) {
        if self.m.len() < count {
            self.m.resize(count, None);
            self.v.resize(count, None);
        }
    }
}

impl Optimizer for Adam {
    fn step(&mut self, params: &mut [&mut Param]) {
        self.ensure_moments(params.len());
        self.t += 1;

        let bias1 = 1.0 - self.beta1.powi(self.t as i32);
        let bias2 = 1.0 - self.beta2.powi(self.t as i32);
        let (beta1, beta2, eps, lr) = (self.beta1, self.beta2, self.epsilon, self.lr);

        for (i, param) in params.iter_mut().enumerate() {
            if !param.requires_grad() {
                continue;
            }
            let m = self.m[i].get_or_insert_with(|| Array2::zeros(param.grad().raw_dim()));
            let v = self.v[i].get_or_insert_with(|| Array2::zeros(param.grad().raw_dim()));

            Zip::from(&mut *m).and(&mut *v).and(param.grad()).for_each(|m, v, &g| {
                *m = beta1 * *m + (1.0 - beta1) * g;
                *v = beta2 * *v + (1.0 - beta2) * g * g;
            });

            let update = Zip::from(&*m)
                .and(&*v)
                .map_collect(|&m, &v| lr * (m / bias1) / ((v / bias2).sqrt() + eps));
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
        "adam"
    }
}
