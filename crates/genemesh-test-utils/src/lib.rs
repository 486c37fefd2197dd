//! Shared testing utilities: an in-memory data set and fixture builders.

use std::cell::Cell;
use std::collections::HashMap;
use std::sync::Arc;

use genemesh_assembler::mediator::{
    AttributeMediator, DataSet, GeneCompletionProvider, GeneMediator, LinkoutGenerator,
    MediatorProvider, NodeMediator, OntologyMediator,
};
use genemesh_common::entities::{
    Attribute, AttributeGroup, Colour, Gene, InteractionNetwork, InteractionNetworkGroup,
    NamingSource, Node, OntologyCategory, Organism,
};
use genemesh_common::{GeneMeshError, Result};
use tracing_subscriber::EnvFilter;

/// Install a test-friendly subscriber once; later calls are no-ops.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("genemesh_assembler=debug,info")),
        )
        .with_test_writer()
        .try_init();
}

// ── Fixtures ─────────────────────────────────────────────────────────────────

pub fn human() -> Organism {
    Organism {
        id: 4,
        name: "H. sapiens".to_string(),
        description: Some("human".to_string()),
        taxonomy_id: Some(9606),
    }
}

pub fn gene(id: i64, symbol: &str, rank: i8, node_id: i64) -> Gene {
    Gene {
        id,
        symbol: symbol.to_string(),
        naming_source: NamingSource { id: rank as i64, name: format!("source-{rank}"), rank },
        node_id,
        organism_id: human().id,
    }
}

pub fn node(id: i64, genes: Vec<Gene>) -> Node {
    Node { id, name: format!("node-{id}"), genes, gene_data: None }
}

pub fn network(id: i64, name: &str) -> InteractionNetwork {
    InteractionNetwork { id, name: name.to_string(), description: format!("{name} network"), ..Default::default() }
}

pub fn group(id: i64, name: &str, code: &str, networks: Vec<InteractionNetwork>) -> InteractionNetworkGroup {
    InteractionNetworkGroup {
        id,
        name: name.to_string(),
        code: code.to_string(),
        description: String::new(),
        networks,
    }
}

pub fn symbols(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| s.to_string()).collect()
}

// ── In-memory data set ───────────────────────────────────────────────────────

/// A data set held in plain maps.
///
/// `network_group` hands out a fresh `Arc` on every call, the way a store
/// that materialises records per query would, so canonicalization can be
/// observed with `Arc::ptr_eq`.
#[derive(Default)]
pub struct MemoryDataSet {
    organisms: Vec<Organism>,
    nodes: HashMap<i64, Node>,
    groups: Vec<InteractionNetworkGroup>,
    attributes: HashMap<i64, Attribute>,
    attribute_groups: HashMap<i64, AttributeGroup>,
    categories: HashMap<i64, OntologyCategory>,
    colours: HashMap<String, Colour>,
    linkouts: HashMap<i64, Vec<(String, String)>>,
    offline: bool,
    group_lookups: Cell<usize>,
}

impl MemoryDataSet {
    pub fn new(organism: Organism) -> Self {
        Self { organisms: vec![organism], ..Default::default() }
    }

    pub fn with_node(mut self, node: Node) -> Self {
        self.nodes.insert(node.id, node);
        self
    }

    pub fn with_group(mut self, group: InteractionNetworkGroup) -> Self {
        self.groups.push(group);
        self
    }

    pub fn with_attribute(mut self, attribute: Attribute) -> Self {
        self.attributes.insert(attribute.id, attribute);
        self
    }

    pub fn with_attribute_group(mut self, group: AttributeGroup) -> Self {
        self.attribute_groups.insert(group.id, group);
        self
    }

    pub fn with_category(mut self, category: OntologyCategory) -> Self {
        self.categories.insert(category.id, category);
        self
    }

    pub fn with_colour(mut self, code: &str, rgb: u32) -> Self {
        self.colours.insert(code.to_string(), Colour::from_rgb(rgb));
        self
    }

    pub fn with_linkouts(mut self, node_id: i64, links: &[(&str, &str)]) -> Self {
        let links = links.iter().map(|(l, u)| (l.to_string(), u.to_string())).collect();
        self.linkouts.insert(node_id, links);
        self
    }

    /// Every repository call fails with `StoreUnavailable`.
    pub fn offline(mut self) -> Self {
        self.offline = true;
        self
    }

    pub fn attribute_group_lookups(&self) -> usize {
        self.group_lookups.get()
    }

    fn check_online(&self) -> Result<()> {
        if self.offline {
            return Err(GeneMeshError::StoreUnavailable("memory data set is offline".to_string()));
        }
        Ok(())
    }
}

impl GeneCompletionProvider for MemoryDataSet {
    fn gene(&self, symbol: &str) -> Option<Gene> {
        self.nodes
            .values()
            .flat_map(|n| n.genes.iter())
            .find(|g| g.symbol.eq_ignore_ascii_case(symbol))
            .cloned()
    }
}

impl GeneMediator for MemoryDataSet {
    fn genes(&self, symbols: &[String], organism_id: i64) -> Result<Vec<Gene>> {
        self.check_online()?;
        Ok(symbols
            .iter()
            .filter_map(|s| GeneCompletionProvider::gene(self, s))
            .filter(|g| g.organism_id == organism_id)
            .collect())
    }
}

impl NodeMediator for MemoryDataSet {
    fn node(&self, node_id: i64, _organism_id: i64) -> Result<Node> {
        self.check_online()?;
        self.nodes
            .get(&node_id)
            .cloned()
            .ok_or_else(|| GeneMeshError::not_found(format!("node {node_id}")))
    }
}

impl AttributeMediator for MemoryDataSet {
    fn find_attribute(&self, _organism_id: i64, attribute_id: i64) -> Result<Attribute> {
        self.check_online()?;
        self.attributes
            .get(&attribute_id)
            .cloned()
            .ok_or_else(|| GeneMeshError::not_found(format!("attribute {attribute_id}")))
    }

    fn find_attribute_group(&self, _organism_id: i64, group_id: i64) -> Result<AttributeGroup> {
        self.check_online()?;
        self.group_lookups.set(self.group_lookups.get() + 1);
        self.attribute_groups
            .get(&group_id)
            .cloned()
            .ok_or_else(|| GeneMeshError::not_found(format!("attribute group {group_id}")))
    }
}

impl OntologyMediator for MemoryDataSet {
    fn category(&self, category_id: i64) -> Result<OntologyCategory> {
        self.check_online()?;
        self.categories
            .get(&category_id)
            .cloned()
            .ok_or_else(|| GeneMeshError::not_found(format!("category {category_id}")))
    }
}

impl LinkoutGenerator for MemoryDataSet {
    fn linkouts(&self, _organism_id: i64, node: &Node) -> Vec<(String, String)> {
        self.linkouts.get(&node.id).cloned().unwrap_or_default()
    }
}

impl MediatorProvider for MemoryDataSet {
    fn gene_mediator(&self) -> &dyn GeneMediator {
        self
    }

    fn node_mediator(&self) -> &dyn NodeMediator {
        self
    }

    fn attribute_mediator(&self) -> &dyn AttributeMediator {
        self
    }

    fn ontology_mediator(&self) -> &dyn OntologyMediator {
        self
    }
}

impl DataSet for MemoryDataSet {
    fn colour(&self, code: &str) -> Option<Colour> {
        self.colours.get(code).copied()
    }

    fn network_group(&self, network_id: i64) -> Option<Arc<InteractionNetworkGroup>> {
        self.groups
            .iter()
            .find(|g| g.networks.iter().any(|n| n.id == network_id))
            .map(|g| Arc::new(g.clone()))
    }

    fn completion_provider(&self, organism: &Organism) -> Result<&dyn GeneCompletionProvider> {
        if self.organisms.iter().any(|o| o.id == organism.id) {
            Ok(self)
        } else {
            Err(GeneMeshError::not_found(format!("completion provider for organism {}", organism.id)))
        }
    }

    fn mediator_provider(&self) -> &dyn MediatorProvider {
        self
    }
}
