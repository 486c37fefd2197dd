//! Collaborator interfaces onto the gene/network data store.
//!
//! The assembler never owns the store. Everything it needs is reached through
//! these traits, so a host can back them with a database, a cached index, or
//! (in tests) plain in-memory maps.

use std::sync::Arc;

use genemesh_common::entities::{
    Attribute, AttributeGroup, Colour, Gene, InteractionNetworkGroup, Node, OntologyCategory,
    Organism,
};
use genemesh_common::Result;

pub trait GeneMediator {
    /// Genes matching `symbols` for one organism. Unknown symbols are left out.
    fn genes(&self, symbols: &[String], organism_id: i64) -> Result<Vec<Gene>>;
}

pub trait NodeMediator {
    fn node(&self, node_id: i64, organism_id: i64) -> Result<Node>;
}

pub trait AttributeMediator {
    fn find_attribute(&self, organism_id: i64, attribute_id: i64) -> Result<Attribute>;
    fn find_attribute_group(&self, organism_id: i64, group_id: i64) -> Result<AttributeGroup>;
}

pub trait OntologyMediator {
    fn category(&self, category_id: i64) -> Result<OntologyCategory>;
}

/// Symbol completion for a single organism.
pub trait GeneCompletionProvider {
    fn gene(&self, symbol: &str) -> Option<Gene>;
}

/// External database links for a node, as `(label, url)` pairs in display order.
pub trait LinkoutGenerator {
    fn linkouts(&self, organism_id: i64, node: &Node) -> Vec<(String, String)>;
}

pub trait MediatorProvider {
    fn gene_mediator(&self) -> &dyn GeneMediator;
    fn node_mediator(&self) -> &dyn NodeMediator;
    fn attribute_mediator(&self) -> &dyn AttributeMediator;
    fn ontology_mediator(&self) -> &dyn OntologyMediator;
}

/// Facade over one loaded data set.
pub trait DataSet {
    fn colour(&self, code: &str) -> Option<Colour>;

    /// The group owning `network_id`. Repeated calls for networks of the same
    /// group may return distinct instances; the assembler canonicalizes them.
    fn network_group(&self, network_id: i64) -> Option<Arc<InteractionNetworkGroup>>;

    fn completion_provider(&self, organism: &Organism) -> Result<&dyn GeneCompletionProvider>;

    fn mediator_provider(&self) -> &dyn MediatorProvider;
}
