//! End-to-end assembly of a related-genes response into a [`SearchResult`].

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use genemesh_common::dto::{CombiningMethod, EnrichmentResponse, RelatedGenesRequest, RelatedGenesResponse};
use genemesh_common::entities::{Gene, Interaction, InteractionNetwork, InteractionNetworkGroup, Organism};
use genemesh_common::{GeneMeshError, Result};
use tracing::info;

use crate::annotations::{process_annotations, AnnotationEntry};
use crate::attributes::{compute_attributes, AttributeSet};
use crate::canonical::{compute_canonical_networks, compute_groups_by_network, compute_query_genes};
use crate::interactions::{compute_combined_interactions, compute_source_interactions};
use crate::mediator::DataSet;
use crate::ordering::create_sorted_list;
use crate::scoring::compute_gene_scores;
use crate::weights::{compute_network_weights, WeightedNetwork};

/// Everything the host needs to draw one search result.
#[derive(Debug, Clone)]
pub struct SearchResult {
    pub organism: Organism,
    /// Node id → the gene the user asked for on that node.
    pub search_query: HashMap<i64, Gene>,
    pub combining_method: CombiningMethod,
    pub gene_search_limit: usize,
    pub attribute_search_limit: usize,
    pub groups_by_network: HashMap<i64, Arc<InteractionNetworkGroup>>,
    pub gene_scores: HashMap<Gene, f64>,
    /// Response networks that resolved, in response order, carrying their
    /// rebuilt interaction lists.
    pub source_networks: Vec<InteractionNetwork>,
    pub network_weights: HashMap<i64, WeightedNetwork>,
    pub attributes: AttributeSet,
    /// Node id → enrichment annotations. Empty without an enrichment response.
    pub enrichment: HashMap<i64, Vec<Arc<AnnotationEntry>>>,
}

impl SearchResult {
    pub fn is_query_gene(&self, gene: &Gene) -> bool {
        self.search_query.get(&gene.node_id).is_some_and(|g| g.id == gene.id)
    }

    pub fn attribute_weights(&self) -> &HashMap<i64, f64> {
        &self.attributes.weights
    }

    /// One interaction per node pair across all source networks.
    pub fn combined_interactions(&self) -> Vec<Interaction> {
        compute_combined_interactions(self.source_networks.iter().map(|n| n.interactions.as_slice()))
    }

    /// Genes from most to least relevant.
    pub fn genes_by_score(&self) -> Vec<Gene> {
        create_sorted_list(&self.gene_scores)
    }

    /// Weighted networks from heaviest to lightest.
    pub fn networks_by_weight(&self) -> Vec<&WeightedNetwork> {
        let mut networks: Vec<&WeightedNetwork> = self.network_weights.values().collect();
        networks.sort_by(|a, b| b.weight.total_cmp(&a.weight).then(a.network.id.cmp(&b.network.id)));
        networks
    }
}

/// Resolve a related-genes response against `data` for `organism`.
///
/// `symbols` are the gene symbols the user searched for. When an enrichment
/// response is supplied its annotations are resolved as well.
pub fn assemble(
    organism: &Organism,
    request: &RelatedGenesRequest,
    response: &RelatedGenesResponse,
    enrichment: Option<&EnrichmentResponse>,
    data: &dyn DataSet,
    symbols: &[String],
) -> Result<SearchResult> {
    if request.organism_id != organism.id {
        return Err(GeneMeshError::InvalidInput(format!(
            "request is for organism {} but assembling for organism {}",
            request.organism_id, organism.id
        )));
    }

    let query_genes = compute_query_genes(symbols, data.completion_provider(organism)?);
    let groups_by_network = compute_groups_by_network(response, data);

    let mediators = data.mediator_provider();
    let node_mediator = mediators.node_mediator();
    let gene_scores = compute_gene_scores(&response.nodes, &query_genes, organism, node_mediator)?;

    let mut canonical_networks = compute_canonical_networks(&groups_by_network);
    let rebuilt = compute_source_interactions(&response.networks, &canonical_networks, organism, node_mediator)?;
    canonical_networks.extend(rebuilt);

    let mut seen = HashSet::new();
    let source_networks: Vec<InteractionNetwork> = response
        .networks
        .iter()
        .filter(|dto| seen.insert(dto.id))
        .filter_map(|dto| canonical_networks.get(&dto.id).cloned())
        .collect();

    let attributes = compute_attributes(
        organism,
        response.attributes.as_deref(),
        response.node_to_attributes.as_ref(),
        mediators.attribute_mediator(),
    )?;

    let network_weights = compute_network_weights(&response.networks, &canonical_networks, &attributes.weights);

    let enrichment = enrichment
        .map(|e| process_annotations(&e.annotations, mediators.ontology_mediator()))
        .unwrap_or_default();

    info!(
        organism_id = organism.id,
        query_genes = query_genes.len(),
        scored_genes = gene_scores.len(),
        networks = network_weights.len(),
        attributes = attributes.attributes.len(),
        annotated_nodes = enrichment.len(),
        "Assembled search result"
    );

    Ok(SearchResult {
        organism: organism.clone(),
        search_query: query_genes,
        combining_method: request.combining_method,
        gene_search_limit: request.limit_results,
        attribute_search_limit: request.attributes_limit,
        groups_by_network,
        gene_scores,
        source_networks,
        network_weights,
        attributes,
        enrichment,
    })
}
