//! Per-gene relevance scores.

use std::collections::HashMap;

use genemesh_common::dto::NodeDto;
use genemesh_common::entities::{Gene, Node, Organism};
use genemesh_common::Result;
use tracing::debug;

use crate::mediator::NodeMediator;

/// The gene with the strictly highest naming rank. Ties keep the first one.
pub fn preferred_gene(node: &Node) -> Option<&Gene> {
    let mut best: Option<&Gene> = None;
    for gene in &node.genes {
        match best {
            Some(current) if gene.rank() <= current.rank() => {}
            _ => best = Some(gene),
        }
    }
    best
}

/// Gene → score for every scored node that resolves to a gene.
///
/// Score records are deduplicated by node id (last record wins). A node that
/// is part of the query keeps the query gene; any other node is shown by its
/// preferred gene. Query genes without a score get the best observed score
/// so the user's own search terms never rank below the results.
pub fn compute_gene_scores(
    nodes: &[NodeDto],
    query_genes: &HashMap<i64, Gene>,
    organism: &Organism,
    node_mediator: &dyn NodeMediator,
) -> Result<HashMap<Gene, f64>> {
    let unique: HashMap<i64, f64> = nodes.iter().map(|n| (n.id, n.score)).collect();

    let mut max_score = 0.0_f64;
    let mut scores: HashMap<Gene, f64> = HashMap::with_capacity(unique.len());

    for (node_id, score) in unique {
        let gene = match query_genes.get(&node_id) {
            Some(gene) => gene.clone(),
            None => match node_mediator.node(node_id, organism.id) {
                Ok(node) => match preferred_gene(&node) {
                    Some(gene) => gene.clone(),
                    None => {
                        debug!(node_id, "Node has no genes, dropping score");
                        continue;
                    }
                },
                Err(e) if e.is_not_found() => {
                    debug!(node_id, "Scored node not found, dropping score");
                    continue;
                }
                Err(e) => return Err(e),
            },
        };
        max_score = max_score.max(score);
        scores.insert(gene, score);
    }

    for gene in query_genes.values() {
        scores.entry(gene.clone()).or_insert(max_score);
    }

    Ok(scores)
}
