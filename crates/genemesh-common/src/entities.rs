/// Core domain types for gene interaction networks.
/// These mirror the records held by the upstream data store; this workspace
/// only reads them and builds new records from them.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Organism
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Organism {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub taxonomy_id: Option<i64>,
}

// ---------------------------------------------------------------------------
// Gene / Node
// ---------------------------------------------------------------------------

/// Where a gene symbol came from (Entrez, Ensembl, ...).
/// Higher rank wins when choosing a display symbol for a node.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NamingSource {
    pub id: i64,
    pub name: String,
    pub rank: i8,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Gene {
    pub id: i64,
    pub symbol: String,
    pub naming_source: NamingSource,
    /// Id of the node this symbol belongs to.
    pub node_id: i64,
    pub organism_id: i64,
}

impl Gene {
    pub fn rank(&self) -> i8 {
        self.naming_source.rank
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GeneData {
    pub id: i64,
    pub description: String,
    #[serde(default)]
    pub external_id: Option<String>,
    #[serde(default)]
    pub linkout_source: Option<String>,
}

/// A biological entity. Owns one or more gene symbols.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Node {
    pub id: i64,
    pub name: String,
    pub genes: Vec<Gene>,
    #[serde(default)]
    pub gene_data: Option<GeneData>,
}

// ---------------------------------------------------------------------------
// Interaction networks
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Tag {
    pub id: i64,
    pub name: String,
}

/// Publication and provenance details for a network.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkMetadata {
    pub title: Option<String>,
    pub url: Option<String>,
    pub authors: Option<String>,
    pub year_published: Option<String>,
    pub publication_name: Option<String>,
    pub other: Option<String>,
    pub comment: Option<String>,
    pub processing_description: Option<String>,
    pub source: Option<String>,
    pub source_url: Option<String>,
    pub pubmed_id: Option<String>,
    pub interaction_count: i64,
}

/// An undirected edge for deduplication purposes; `from`/`to` keep the
/// orientation the source network reported.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Interaction {
    pub from_node: Arc<Node>,
    pub to_node: Arc<Node>,
    pub weight: f32,
}

impl Interaction {
    pub fn new(from_node: Arc<Node>, to_node: Arc<Node>, weight: f32) -> Self {
        Self { from_node, to_node, weight }
    }

    /// Node id pair with the smaller id first.
    pub fn canonical_key(&self) -> (i64, i64) {
        let (a, b) = (self.from_node.id, self.to_node.id);
        if a > b { (b, a) } else { (a, b) }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InteractionNetwork {
    pub id: i64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub metadata: Option<NetworkMetadata>,
    #[serde(default)]
    pub tags: Vec<Tag>,
    #[serde(default)]
    pub interactions: Vec<Interaction>,
}

impl InteractionNetwork {
    /// Id-only stand-in for a network the data store does not know about.
    pub fn placeholder(id: i64) -> Self {
        Self { id, ..Default::default() }
    }

    /// Same network with its interaction list replaced.
    pub fn with_interactions(&self, interactions: Vec<Interaction>) -> Self {
        Self {
            id: self.id,
            name: self.name.clone(),
            description: self.description.clone(),
            metadata: self.metadata.clone(),
            tags: self.tags.clone(),
            interactions,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InteractionNetworkGroup {
    pub id: i64,
    pub name: String,
    pub code: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub networks: Vec<InteractionNetwork>,
}

// ---------------------------------------------------------------------------
// Attributes
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Attribute {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub external_id: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct AttributeGroup {
    pub id: i64,
    pub name: String,
    pub code: String,
    pub description: String,
    pub publication_name: Option<String>,
    pub publication_url: Option<String>,
    pub linkout_label: Option<String>,
    pub linkout_url: Option<String>,
}

// ---------------------------------------------------------------------------
// Ontology annotations
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OntologyCategory {
    pub id: i64,
    pub ontology_id: i64,
    pub name: String,
    #[serde(default)]
    pub description: String,
}

// ---------------------------------------------------------------------------
// Presentation
// ---------------------------------------------------------------------------

/// Packed 0xRRGGBB colour assigned to a network group code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Colour {
    pub rgb: u32,
}

impl Colour {
    pub fn from_rgb(rgb: u32) -> Self {
        Self { rgb: rgb & 0x00ff_ffff }
    }

    pub fn red(&self) -> u8 {
        ((self.rgb >> 16) & 0xff) as u8
    }

    pub fn green(&self) -> u8 {
        ((self.rgb >> 8) & 0xff) as u8
    }

    pub fn blue(&self) -> u8 {
        (self.rgb & 0xff) as u8
    }

    pub fn to_hex(&self) -> String {
        format!("#{:06x}", self.rgb)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(id: i64) -> Arc<Node> {
        Arc::new(Node { id, name: format!("n{id}"), genes: vec![], gene_data: None })
    }

    #[test]
    fn test_canonical_key_orders_ids() {
        let forward = Interaction::new(node(3), node(9), 0.5);
        let reverse = Interaction::new(node(9), node(3), 0.5);
        assert_eq!(forward.canonical_key(), (3, 9));
        assert_eq!(reverse.canonical_key(), (3, 9));
    }

    #[test]
    fn test_with_interactions_replaces_list() {
        let mut network = InteractionNetwork::placeholder(7);
        network.interactions.push(Interaction::new(node(1), node(2), 1.0));
        let replaced = network.with_interactions(vec![]);
        assert_eq!(replaced.id, 7);
        assert!(replaced.interactions.is_empty());
        assert_eq!(network.interactions.len(), 1);
    }

    #[test]
    fn test_colour_channels() {
        let c = Colour::from_rgb(0x12ab34);
        assert_eq!((c.red(), c.green(), c.blue()), (0x12, 0xab, 0x34));
        assert_eq!(c.to_hex(), "#12ab34");
    }
}
