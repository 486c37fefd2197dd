//! Interaction assembly and cross-network deduplication.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use genemesh_common::dto::NetworkDto;
use genemesh_common::entities::{Interaction, InteractionNetwork, Node, Organism};
use genemesh_common::Result;
use tracing::debug;

use crate::mediator::NodeMediator;

/// Node lookups for one assembly call, so each node is fetched once.
struct NodeCache<'a> {
    mediator: &'a dyn NodeMediator,
    organism_id: i64,
    nodes: HashMap<i64, Option<Arc<Node>>>,
}

impl<'a> NodeCache<'a> {
    fn new(mediator: &'a dyn NodeMediator, organism_id: i64) -> Self {
        Self { mediator, organism_id, nodes: HashMap::new() }
    }

    fn get(&mut self, node_id: i64) -> Result<Option<Arc<Node>>> {
        if let Some(cached) = self.nodes.get(&node_id) {
            return Ok(cached.clone());
        }
        let resolved = match self.mediator.node(node_id, self.organism_id) {
            Ok(node) => Some(Arc::new(node)),
            Err(e) if e.is_not_found() => None,
            Err(e) => return Err(e),
        };
        self.nodes.insert(node_id, resolved.clone());
        Ok(resolved)
    }
}

/// Rebuild the interaction list of every response network that has a
/// canonical counterpart. The returned networks replace the canonical ones;
/// the input map is left untouched.
///
/// Interactions naming a node the store cannot resolve are skipped.
pub fn compute_source_interactions(
    networks: &[NetworkDto],
    canonical_networks: &HashMap<i64, InteractionNetwork>,
    organism: &Organism,
    node_mediator: &dyn NodeMediator,
) -> Result<HashMap<i64, InteractionNetwork>> {
    let mut cache = NodeCache::new(node_mediator, organism.id);
    let mut rebuilt = HashMap::new();

    for dto in networks {
        let Some(network) = canonical_networks.get(&dto.id) else {
            continue;
        };

        let mut interactions = Vec::with_capacity(dto.interactions.len());
        for raw in &dto.interactions {
            let from = cache.get(raw.from_node_id)?;
            let to = cache.get(raw.to_node_id)?;
            match (from, to) {
                (Some(from), Some(to)) => {
                    interactions.push(Interaction::new(from, to, raw.weight as f32));
                }
                _ => debug!(
                    network_id = dto.id,
                    from = raw.from_node_id,
                    to = raw.to_node_id,
                    "Interaction references unknown node, skipping"
                ),
            }
        }
        rebuilt.insert(dto.id, network.with_interactions(interactions));
    }

    Ok(rebuilt)
}

/// Merge interactions from all networks, keeping one per unordered node pair.
///
/// The first interaction seen for a pair wins, even if a later network
/// reports a different weight. Output is in first-seen order.
pub fn compute_combined_interactions<'a, I>(source: I) -> Vec<Interaction>
where
    I: IntoIterator<Item = &'a [Interaction]>,
{
    let mut seen: HashSet<(i64, i64)> = HashSet::new();
    let mut combined = Vec::new();

    for network in source {
        for interaction in network {
            if seen.insert(interaction.canonical_key()) {
                combined.push(interaction.clone());
            }
        }
    }
    combined
}
