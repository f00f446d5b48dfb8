//! Content-based fingerprint of the configuration a result came from.

use fls_params::SimulationConfig;
use sha2::{Digest, Sha256};

use crate::ResultsResult;

pub fn compute_config_id(config: &SimulationConfig) -> ResultsResult<String> {
    let mut hasher = Sha256::new();
    let config_json = serde_json::to_string(config)?;
    hasher.update(config_json.as_bytes());
    let result = hasher.finalize();
    Ok(format!("{:x}", result))
}

#[cfg(test)]
mod tests {
    use super::*;
    use fls_params::PropagationModel;

    #[test]
    fn hash_stability() {
        let config = SimulationConfig::default();
        let hash1 = compute_config_id(&config).unwrap();
        let hash2 = compute_config_id(&config).unwrap();
        assert_eq!(hash1, hash2);
        assert_eq!(hash1.len(), 64);
    }

    #[test]
    fn hash_differs_for_different_inputs() {
        let config1 = SimulationConfig::default();
        let config2 = SimulationConfig {
            propagation_model: PropagationModel::Friis,
            ..SimulationConfig::default()
        };

        assert_ne!(
            compute_config_id(&config1).unwrap(),
            compute_config_id(&config2).unwrap()
        );
    }
}
