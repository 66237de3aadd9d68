//! Checkpoint persistence for the shared brain.
//!
//! The blob round-trips exactly five fields: policy parameters, target
//! parameters, optimizer internal state, epsilon, and the cumulative episode
//! count. A checkpoint whose network shapes disagree with the configured
//! architecture is rejected at load time.

use serde::{Serialize, Deserialize};
use std::path::Path;
use tracing::warn;

use crate::config::BrainConfig;
use crate::error::{AresError, Result};
use crate::network::QNetwork;
use crate::optimizer::OptimizerWrapper;

#[derive(Serialize, Deserialize)]
pub struct Checkpoint {
    pub policy: QNetwork,
    pub target: QNetwork,
    pub optimizer: OptimizerWrapper,
    pub epsilon: f32,
    pub episodes: usize,
}

impl Checkpoint {
    pub fn save(&self, path: &Path) -> Result<()> {
        let serialized = bincode::serialize(self)?;
        std::fs::write(path, serialized)?;
        Ok(())
    }

    pub fn load(path: &Path) -> Result<Checkpoint> {
        let data = std::fs::read(path)?;
        let checkpoint: Checkpoint = bincode::deserialize(&data)?;
        Ok(checkpoint)
    }

    /// Reject the checkpoint unless both networks match the architecture the
    /// config describes, layer for layer.
    pub fn validate(&self, config: &BrainConfig) -> Result<()> {
        let expected = config.layer_sizes();
        for (name, network) in [("policy", &self.policy), ("target", &self.target)] {
            let actual = network.layer_sizes();
            if actual != expected {
                warn!(network = name, ?expected, ?actual, "checkpoint shape mismatch");
                return Err(AresError::dimension_mismatch(
                    format!("{} network layers {:?}", name, expected),
                    format!("{:?}", actual),
                ));
            }
        }
        Ok(())
    }
}
