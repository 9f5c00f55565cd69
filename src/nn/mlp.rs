//! Multi-layer perceptron built from hidden blocks and a linear head

use ndarray::Array2;

use super::layers::{Activation, Dense, Layer, LayerNorm, NormCache};
use super::param::Param;

/// Dense projection, optional normalization, activation
#[derive(Debug, Clone)]
pub struct HiddenBlock {
    dense: Dense,
    norm: Option<LayerNorm>,
    activation: Activation,
}

/// Activations recorded by one hidden block
#[derive(Debug, Clone)]
pub struct BlockTape {
    input: Array2<f32>,
    norm: Option<NormCache>,
    pre_activation: Array2<f32>,
}

impl HiddenBlock {
    pub fn new(
        name: &str,
        in_features: usize,
        out_features: usize,
        normalized: bool,
        activation: Activation,
    ) -> Self {
        Self {
            dense: Dense::new(&format!("{name}.fc"), in_features, out_features),
            norm: normalized.then(|| LayerNorm::new(&format!("{name}.norm"), out_features)),
            activation,
        }
    }

    fn forward(&self, x: &Array2<f32>) -> (Array2<f32>, BlockTape) {
        let projected = self.dense.forward(x);
        let (pre_activation, norm) = match &self.norm {
            Some(norm) => {
                let (y, cache) = norm.forward(&projected);
                (y, Some(cache))
            }
            None => (projected, None),
        };
        let out = self.activation.forward(&pre_activation);
        let tape = BlockTape {
            input: x.clone(),
            norm,
            pre_activation,
        };
        (out, tape)
    }

    fn backward(&mut self, tape: &BlockTape, dy: &Array2<f32>) -> Array2<f32> {
        let mut grad = self.activation.backward(&tape.pre_activation, dy);
        if let (Some(norm), Some(cache)) = (self.norm.as_mut(), tape.norm.as_ref()) {
            grad = norm.backward(cache, &grad);
        }
        self.dense.backward(&tape.input, &grad)
    }

    fn params(&self) -> Vec<&Param> {
        let mut params = self.dense.params();
        if let Some(norm) = &self.norm {
            params.extend(norm.params());
        }
        params
    }

    fn params_mut(&mut self) -> Vec<&mut Param> {
        let mut params = self.dense.params_mut();
        if let Some(norm) = self.norm.as_mut() {
            params.extend(norm.params_mut());
        }
        params
    }
}

/// Stack of hidden blocks followed by a linear head
#[derive(Debug, Clone)]
pub struct Mlp {
    blocks: Vec<HiddenBlock>,
    head: Dense,
}

/// Everything `Mlp::backward` needs from a recorded forward pass
#[derive(Debug, Clone)]
pub struct MlpTape {
    blocks: Vec<BlockTape>,
    head_input: Array2<f32>,
}

impl Mlp {
    pub fn new(blocks: Vec<HiddenBlock>, head: Dense) -> Self {
        Self { blocks, head }
    }

    pub fn in_features(&self) -> usize {
        self.blocks
            .first()
            .map_or(self.head.in_features(), |b| b.dense.in_features())
    }

    pub fn out_features(&self) -> usize {
        self.head.out_features()
    }

    /// Run the network, keeping a tape only when `record` is set
    pub fn forward(&self, x: &Array2<f32>, record: bool) -> (Array2<f32>, Option<MlpTape>) {
        let mut tapes = Vec::with_capacity(if record { self.blocks.len() } else { 0 });
        let mut h = x.clone();
        for block in &self.blocks {
            let (out, tape) = block.forward(&h);
            if record {
                tapes.push(tape);
            }
            h = out;
        }
        let y = self.head.forward(&h);
        let tape = record.then(|| MlpTape {
            blocks: tapes,
            head_input: h,
        });
        (y, tape)
    }

    /// Accumulate parameter gradients and return the input gradient
    pub fn backward(&mut self, tape: &MlpTape, dy: &Array2<f32>) -> Array2<f32> {
        let mut grad = self.head.backward(&tape.head_input, dy);
        for (block, block_tape) in self.blocks.iter_mut().zip(&tape.blocks).rev() {
            grad = block.backward(block_tape, &grad);
        }
        grad
    }

    pub fn params(&self) -> Vec<&Param> {
        let mut params: Vec<&Param> = self.blocks.iter().flat_map(HiddenBlock::params).collect();
        params.extend(self.head.params());
        params
    }

    pub fn params_mut(&mut self) -> Vec<&mut Param> {
        let mut params: Vec<&mut Param> = self
            .blocks
            .iter_mut()
            .flat_map(HiddenBlock::params_mut)
            .collect();
        params.extend(self.head.params_mut());
        params
    }

    /// Every layer in forward order, for initialization
    pub fn layers_mut(&mut self) -> Vec<&mut dyn Layer> {
        let mut layers: Vec<&mut dyn Layer> = Vec::new();
        for block in &mut self.blocks {
            layers.push(&mut block.dense);
            if let Some(norm) = block.norm.as_mut() {
                layers.push(norm);
            }
        }
        layers.push(&mut self.head);
        layers
    }
}
