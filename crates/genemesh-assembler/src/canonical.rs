//! Canonicalization of raw engine ids into shared domain objects.

use std::collections::HashMap;
use std::sync::Arc;

use genemesh_common::dto::RelatedGenesResponse;
use genemesh_common::entities::{Gene, InteractionNetwork, InteractionNetworkGroup, Organism};
use genemesh_common::GeneMeshError;
use tracing::{debug, warn};

use crate::mediator::{DataSet, GeneCompletionProvider, GeneMediator};

/// Network id → owning group. Networks of the same group share one `Arc`.
/// Networks with no known group are dropped.
pub fn compute_groups_by_network(
    response: &RelatedGenesResponse,
    data: &dyn DataSet,
) -> HashMap<i64, Arc<InteractionNetworkGroup>> {
    let mut groups: HashMap<i64, Arc<InteractionNetworkGroup>> = HashMap::new();
    let mut groups_by_network = HashMap::new();

    for network in &response.networks {
        let Some(group) = data.network_group(network.id) else {
            debug!(network_id = network.id, "No group for network, dropping");
            continue;
        };
        let canonical = groups.entry(group.id).or_insert(group).clone();
        groups_by_network.insert(network.id, canonical);
    }
    groups_by_network
}

/// Network id → network, for every network of every referenced group.
pub fn compute_canonical_networks(
    groups_by_network: &HashMap<i64, Arc<InteractionNetworkGroup>>,
) -> HashMap<i64, InteractionNetwork> {
    let mut canonical = HashMap::new();
    for group in groups_by_network.values() {
        for network in &group.networks {
            canonical.insert(network.id, network.clone());
        }
    }
    canonical
}

/// Resolve requested symbols through the completion provider, keyed by node id.
///
/// Two symbols naming the same node: the later one wins.
pub fn compute_query_genes(
    symbols: &[String],
    provider: &dyn GeneCompletionProvider,
) -> HashMap<i64, Gene> {
    let mut genes_by_node = HashMap::new();
    for symbol in symbols {
        match provider.gene(symbol) {
            Some(gene) => {
                genes_by_node.insert(gene.node_id, gene);
            }
            None => debug!(symbol = %symbol, "Unrecognised query symbol, skipping"),
        }
    }
    genes_by_node
}

/// Batch variant of [`compute_query_genes`] backed by the gene repository.
/// A store failure yields an empty map rather than an error.
pub fn create_query_nodes(
    genes: &dyn GeneMediator,
    symbols: &[String],
    organism: &Organism,
) -> HashMap<i64, Gene> {
    match genes.genes(symbols, organism.id) {
        Ok(found) => found.into_iter().map(|g| (g.node_id, g)).collect(),
        Err(e @ GeneMeshError::StoreUnavailable(_)) => {
            warn!(organism_id = organism.id, error = %e, "Gene lookup failed, returning no query genes");
            HashMap::new()
        }
        Err(e) => {
            debug!(organism_id = organism.id, error = %e, "Gene lookup returned nothing");
            HashMap::new()
        }
    }
}
