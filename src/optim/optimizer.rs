//! Optimizer trait

use crate::nn::Param;

/// Trait for optimization algorithms
///
/// Optimizers descend: each step moves parameters against their
/// accumulated gradient. Frozen parameters (`requires_grad == false`) are
/// skipped, and gradients are left in place for the caller to clear.
pub trait Optimizer {
    /// Perform a single optimization step
    ///
    /// `params` must be passed in the same order on every call; per-parameter
    /// state is keyed on position.
    fn step(&mut self, params: &mut [&mut Param]);

    /// Get learning rate
    fn lr(&self) -> f32;

    /// Set learning rate
    fn set_lr(&mut self, lr: f32);

    /// Short name for logging
    fn name(&self) -> &'static str;
}
