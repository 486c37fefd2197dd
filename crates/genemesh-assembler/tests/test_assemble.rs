//! End-to-end assembly against an in-memory data set.
//!
//! ```bash
//! cargo test --package genemesh-assembler --test test_assemble
//! ```

use std::sync::Arc;

use genemesh_assembler::canonical::{compute_groups_by_network, create_query_nodes};
use genemesh_assembler::describe::gene_label;
use genemesh_assembler::ordering::{network_colour, sort_by_name};
use genemesh_assembler::{assemble, normalize_network_weights, DescriptionFormatter};
use genemesh_common::dto::{
    AttributeDto, CombiningMethod, EnrichmentResponse, InteractionDto, NetworkDto, NodeDto,
    OntologyCategoryDto, RelatedGenesRequest, RelatedGenesResponse,
};
use genemesh_common::entities::{Attribute, AttributeGroup, GeneData, OntologyCategory};
use genemesh_common::{GeneMeshError, MessageCatalog};
use genemesh_test_utils::{gene, group, human, init_tracing, network, node, symbols, MemoryDataSet};
use pretty_assertions::assert_eq;

fn data_set() -> MemoryDataSet {
    let mut tp53 = node(10, vec![gene(100, "TP53", 9, 10), gene(101, "P53", 1, 10)]);
    tp53.gene_data = Some(GeneData {
        id: 10,
        description: "tumor protein p53".to_string(),
        external_id: Some("7157".to_string()),
        linkout_source: None,
    });

    MemoryDataSet::new(human())
        .with_node(tp53)
        .with_node(node(11, vec![gene(110, "MDM2", 9, 11)]))
        .with_node(node(12, vec![gene(120, "ATM", 9, 12)]))
        .with_node(node(13, vec![gene(130, "CHEK2", 9, 13)]))
        .with_group(group(1, "Physical Interactions", "pi", vec![network(1000, "Stark-Biogrid"), network(1001, "Lin-Smith")]))
        .with_group(group(2, "Co-expression", "coexp", vec![network(2000, "Hughes-Marton")]))
        .with_attribute(Attribute { id: 50, name: "IPR000719".into(), description: "Kinase".into(), external_id: None })
        .with_attribute(Attribute { id: 51, name: "IPR011009".into(), description: "Kinase-like".into(), external_id: None })
        .with_attribute_group(AttributeGroup { id: 5, name: "InterPro".into(), code: "ip".into(), ..Default::default() })
        .with_category(OntologyCategory { id: 900, ontology_id: 1, name: "DNA repair".into(), description: String::new() })
        .with_colour("pi", 0xe8a0a0)
        .with_linkouts(10, &[("Entrez", "http://www.ncbi.nlm.nih.gov/gene/7157")])
}

fn edge(from: i64, to: i64, weight: f64) -> InteractionDto {
    InteractionDto { from_node_id: from, to_node_id: to, weight }
}

fn response() -> RelatedGenesResponse {
    RelatedGenesResponse {
        networks: vec![
            NetworkDto { id: 1000, weight: 0.5, interactions: vec![edge(10, 11, 0.9), edge(11, 12, 0.3)] },
            NetworkDto { id: 1001, weight: 0.0, interactions: vec![] },
            NetworkDto {
                id: 2000,
                weight: 0.3,
                interactions: vec![edge(11, 10, 0.1), edge(12, 13, 0.6), edge(13, 99, 0.2)],
            },
            NetworkDto { id: 3000, weight: 0.2, interactions: vec![edge(10, 13, 0.4)] },
        ],
        nodes: vec![
            NodeDto { id: 11, score: 0.7 },
            NodeDto { id: 12, score: 0.4 },
            NodeDto { id: 10, score: 0.5 },
        ],
        attributes: Some(vec![
            AttributeDto { id: 50, group_id: 5, weight: 0.1 },
            AttributeDto { id: 51, group_id: 5, weight: 0.1 },
        ]),
        node_to_attributes: Some(
            [(11, vec![AttributeDto { id: 50, group_id: 5, weight: 0.1 }, AttributeDto { id: 51, group_id: 5, weight: 0.1 }])]
                .into_iter()
                .collect(),
        ),
    }
}

fn request() -> RelatedGenesRequest {
    RelatedGenesRequest {
        organism_id: human().id,
        combining_method: CombiningMethod::Automatic,
        limit_results: 20,
        attributes_limit: 10,
    }
}

fn enrichment() -> EnrichmentResponse {
    let category = |id| OntologyCategoryDto { id, p_value: 1e-5, q_value: 1e-4, annotated_in_sample: 3, annotated_in_total: 120 };
    EnrichmentResponse {
        annotations: [(11, vec![category(900)]), (12, vec![category(900), category(901)]), (13, vec![category(901)])]
            .into_iter()
            .collect(),
    }
}

#[test]
fn test_assemble_full_response() {
    init_tracing();
    let data = data_set();

    let result = assemble(
        &human(),
        &request(),
        &response(),
        Some(&enrichment()),
        &data,
        &symbols(&["P53", "CHEK2", "NOT-A-GENE"]),
    )
    .unwrap();

    assert_eq!(result.search_query.len(), 2);
    assert_eq!(result.search_query[&10].symbol, "P53");
    assert_eq!(result.gene_search_limit, 20);
    assert_eq!(result.attribute_search_limit, 10);

    // Query gene P53 keeps its own symbol; CHEK2 is unscored and gets the max.
    let score_of = |symbol: &str| {
        result.gene_scores.iter().find(|(g, _)| g.symbol == symbol).map(|(_, s)| *s)
    };
    assert_eq!(score_of("P53"), Some(0.5));
    assert_eq!(score_of("TP53"), None);
    assert_eq!(score_of("MDM2"), Some(0.7));
    assert_eq!(score_of("ATM"), Some(0.4));
    assert_eq!(score_of("CHEK2"), Some(0.7));
    assert_eq!(result.genes_by_score().last().map(|g| g.symbol.as_str()), Some("ATM"));

    // Groups: 3000 has none and is dropped; 1000/1001 share one group instance.
    let mut grouped: Vec<i64> = result.groups_by_network.keys().copied().collect();
    grouped.sort();
    assert_eq!(grouped, vec![1000, 1001, 2000]);
    assert!(Arc::ptr_eq(&result.groups_by_network[&1000], &result.groups_by_network[&1001]));

    // Attribute mass 0.2 scales network weights by 0.8; 3000 is a placeholder.
    assert!((result.attributes.total_weight() - 0.2).abs() < 1e-12);
    assert!((result.network_weights[&1000].weight - 0.4).abs() < 1e-12);
    assert!((result.network_weights[&2000].weight - 0.24).abs() < 1e-12);
    assert!((result.network_weights[&3000].weight - 0.16).abs() < 1e-12);
    assert_eq!(result.network_weights[&3000].network.name, "");
    assert_eq!(result.network_weights[&1000].network.name, "Stark-Biogrid");
    let heaviest: Vec<i64> = result.networks_by_weight().iter().map(|w| w.network.id).collect();
    assert_eq!(heaviest, vec![1000, 2000, 3000, 1001]);

    // Source networks carry rebuilt interactions; unknown node 99 is skipped.
    let source_ids: Vec<i64> = result.source_networks.iter().map(|n| n.id).collect();
    assert_eq!(source_ids, vec![1000, 1001, 2000]);
    assert_eq!(result.source_networks[2].interactions.len(), 2);

    let combined: Vec<(i64, i64, f32)> = result
        .combined_interactions()
        .iter()
        .map(|i| (i.from_node.id, i.to_node.id, i.weight))
        .collect();
    assert_eq!(combined, vec![(10, 11, 0.9), (11, 12, 0.3), (12, 13, 0.6)]);

    // Attributes per node and their group.
    let attached: Vec<i64> = result.attributes.attributes_by_node[&11].iter().map(|a| a.id).collect();
    assert_eq!(attached, vec![50, 51]);
    assert_eq!(data.attribute_group_lookups(), 1);

    // Enrichment: category 901 is unknown, so node 13 disappears.
    assert_eq!(result.enrichment.len(), 2);
    assert!(!result.enrichment.contains_key(&13));
    assert!(Arc::ptr_eq(&result.enrichment[&11][0], &result.enrichment[&12][0]));
}

#[test]
fn test_assemble_without_enrichment_or_attributes() {
    let data = data_set();
    let mut bare = response();
    bare.attributes = None;

    let result = assemble(&human(), &request(), &bare, None, &data, &[]).unwrap();

    assert!(result.enrichment.is_empty());
    assert!(result.attributes.is_empty());
    assert!(result.search_query.is_empty());
    assert!((result.network_weights[&1000].weight - 0.5).abs() < 1e-12);
}

#[test]
fn test_assemble_after_normalization() {
    let data = data_set();
    let mut raw = response();
    for network in &mut raw.networks {
        network.weight *= 4.0;
    }
    let normalized = normalize_network_weights(raw);
    assert!((normalized.total_network_weight() - 1.0).abs() < 1e-9);
    assert!((normalized.networks[0].weight - 0.5).abs() < 1e-9);

    let result = assemble(&human(), &request(), &normalized, None, &data, &[]).unwrap();

    let total: f64 = result.network_weights.values().map(|w| w.weight).sum();
    assert!((total - 0.8).abs() < 1e-9);
}

#[test]
fn test_assemble_rejects_mismatched_organism() {
    let data = data_set();
    let mut other = request();
    other.organism_id = 7;

    let err = assemble(&human(), &other, &response(), None, &data, &[]).unwrap_err();
    assert!(matches!(err, GeneMeshError::InvalidInput(_)));
}

#[test]
fn test_assemble_propagates_store_failure() {
    let data = data_set().offline();
    let err = assemble(&human(), &request(), &response(), None, &data, &[]).unwrap_err();
    assert!(matches!(err, GeneMeshError::StoreUnavailable(_)));
}

#[test]
fn test_query_nodes_empty_when_store_offline() {
    let online = data_set();
    let found = create_query_nodes(&online, &symbols(&["TP53", "ATM"]), &human());
    let mut nodes: Vec<i64> = found.keys().copied().collect();
    nodes.sort();
    assert_eq!(nodes, vec![10, 12]);

    let offline = data_set().offline();
    assert!(create_query_nodes(&offline, &symbols(&["TP53"]), &human()).is_empty());
}

#[test]
fn test_groups_by_network_from_json_response() {
    let data = data_set();
    let json = r#"{"networks": [{"id": 2000, "weight": 1.0}, {"id": 4242, "weight": 0.5}]}"#;
    let response = RelatedGenesResponse::from_json(json).unwrap();

    let groups = compute_groups_by_network(&response, &data);

    assert_eq!(groups.len(), 1);
    assert_eq!(groups[&2000].code, "coexp");
}

#[test]
fn test_presentation_helpers() {
    let data = data_set();
    let result = assemble(&human(), &request(), &response(), None, &data, &symbols(&["P53"])).unwrap();

    let tp53 = data_set_node(&data, 10);
    let p53 = result.search_query[&10].clone();
    assert_eq!(gene_label(&tp53, &p53), "TP53 (P53)");
    assert!(result.is_query_gene(&p53));
    assert!(!result.is_query_gene(&tp53.genes[0]));

    let messages = MessageCatalog::default();
    let formatter = DescriptionFormatter::new(&messages);
    let description = formatter.build_gene_description(&p53, &tp53, &data).unwrap();
    assert_eq!(
        description,
        "tumor protein p53<br/>Links: <a href=\"http://www.ncbi.nlm.nih.gov/gene/7157\">Entrez</a>"
    );

    let colour = network_colour(&data, &result.groups_by_network[&1000].code).unwrap();
    assert_eq!(colour.to_hex(), "#e8a0a0");
    assert!(network_colour(&data, "missing").is_none());

    let mut groups: Vec<_> = result.groups_by_network.values().cloned().collect();
    sort_by_name(&mut groups);
    assert_eq!(groups.first().map(|g| g.name.as_str()), Some("Co-expression"));
}

fn data_set_node(data: &MemoryDataSet, id: i64) -> genemesh_common::entities::Node {
    use genemesh_assembler::mediator::NodeMediator;
    data.node(id, human().id).unwrap()
}
