//! Network weights.
//!
//! Network and attribute evidence together partition unit mass: attribute
//! weight is carved out first and network weights are scaled into the rest.

use std::collections::HashMap;

use genemesh_common::dto::{NetworkDto, RelatedGenesResponse};
use genemesh_common::entities::InteractionNetwork;
use serde::{Deserialize, Serialize};
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightedNetwork {
    pub network: InteractionNetwork,
    pub weight: f64,
}

/// `1 - Σ attribute weights`.
pub fn scale_factor(attribute_weights: &HashMap<i64, f64>) -> f64 {
    1.0 - attribute_weights.values().sum::<f64>()
}

/// Network id → network with its scaled weight.
///
/// Networks the data store does not know get an id-only placeholder rather
/// than being dropped.
pub fn compute_network_weights(
    networks: &[NetworkDto],
    canonical_networks: &HashMap<i64, InteractionNetwork>,
    attribute_weights: &HashMap<i64, f64>,
) -> HashMap<i64, WeightedNetwork> {
    let scale = scale_factor(attribute_weights);

    networks
        .iter()
        .map(|dto| {
            let network = match canonical_networks.get(&dto.id) {
                Some(network) => network.clone(),
                None => {
                    debug!(network_id = dto.id, "Unknown network, using placeholder");
                    InteractionNetwork::placeholder(dto.id)
                }
            };
            (dto.id, WeightedNetwork { network, weight: dto.weight * scale })
        })
        .collect()
}

/// Rescale the response's network weights so they sum to 1.
/// A zero total leaves every weight as it was.
pub fn normalize_network_weights(mut response: RelatedGenesResponse) -> RelatedGenesResponse {
    let total = response.total_network_weight();
    if total == 0.0 {
        return response;
    }

    let correction = 1.0 / total;
    for network in &mut response.networks {
        network.weight *= correction;
    }
    response
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(weights: &[f64]) -> RelatedGenesResponse {
        RelatedGenesResponse {
            networks: weights
                .iter()
                .enumerate()
                .map(|(i, &weight)| NetworkDto { id: i as i64 + 1, weight, interactions: vec![] })
                .collect(),
            ..Default::default()
        }
    }

    #[test]
    fn test_normalize_sums_to_one() {
        let normalized = normalize_network_weights(response(&[2.0, 3.0, 5.0]));
        let total: f64 = normalized.networks.iter().map(|n| n.weight).sum();
        assert!((total - 1.0).abs() < 1e-9);
        assert!((normalized.networks[2].weight - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_normalize_zero_total_is_noop() {
        let original = response(&[0.0, 0.0]);
        let normalized = normalize_network_weights(original.clone());
        assert_eq!(normalized, original);
    }

    #[test]
    fn test_normalize_cancelling_weights_is_noop() {
        let original = response(&[0.5, -0.5]);
        assert_eq!(normalize_network_weights(original.clone()), original);
    }

    #[test]
    fn test_network_weights_scaled_by_attribute_mass() {
        let networks = response(&[0.6, 0.4]).networks;
        let mut canonical = HashMap::new();
        let mut known = InteractionNetwork::placeholder(1);
        known.name = "Co-expression".into();
        canonical.insert(1, known);
        let attributes: HashMap<i64, f64> = [(7, 0.15), (8, 0.05)].into_iter().collect();

        let weights = compute_network_weights(&networks, &canonical, &attributes);

        assert!((weights[&1].weight - 0.6 * 0.8).abs() < 1e-12);
        assert!((weights[&2].weight - 0.4 * 0.8).abs() < 1e-12);
        assert_eq!(weights[&1].network.name, "Co-expression");
        assert_eq!(weights[&2].network, InteractionNetwork::placeholder(2));
    }

    #[test]
    fn test_network_weights_without_attributes_unscaled() {
        let networks = response(&[0.25]).networks;
        let weights = compute_network_weights(&networks, &HashMap::new(), &HashMap::new());
        assert_eq!(weights[&1].weight, 0.25);
    }
}
