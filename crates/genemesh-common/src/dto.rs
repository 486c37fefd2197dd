//! Wire-level records produced by the related-genes and enrichment engines.
//!
//! These carry raw ids and numbers only. The assembler resolves them against
//! the data store into the domain types in [`crate::entities`].

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Network combining strategy requested by the caller.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CombiningMethod {
    #[default]
    Automatic,
    AutomaticSelect,
    Average,
    AverageCategory,
    BiologicalProcess,
    MolecularFunction,
    CellularComponent,
    AutomaticRelevance,
    Unknown,
}

impl CombiningMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            CombiningMethod::Automatic          => "automatic",
            CombiningMethod::AutomaticSelect    => "automatic_select",
            CombiningMethod::Average            => "average",
            CombiningMethod::AverageCategory    => "average_category",
            CombiningMethod::BiologicalProcess  => "bp",
            CombiningMethod::MolecularFunction  => "mf",
            CombiningMethod::CellularComponent  => "cc",
            CombiningMethod::AutomaticRelevance => "automatic_relevance",
            CombiningMethod::Unknown            => "unknown",
        }
    }

    /// Parse the short code used by the engine. Unrecognised codes map to `Unknown`.
    pub fn from_code(code: &str) -> Self {
        match code.to_ascii_lowercase().as_str() {
            "automatic"           => CombiningMethod::Automatic,
            "automatic_select"    => CombiningMethod::AutomaticSelect,
            "average"             => CombiningMethod::Average,
            "average_category"    => CombiningMethod::AverageCategory,
            "bp"                  => CombiningMethod::BiologicalProcess,
            "mf"                  => CombiningMethod::MolecularFunction,
            "cc"                  => CombiningMethod::CellularComponent,
            "automatic_relevance" => CombiningMethod::AutomaticRelevance,
            _                     => CombiningMethod::Unknown,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelatedGenesRequest {
    pub organism_id: i64,
    #[serde(default)]
    pub combining_method: CombiningMethod,
    /// Maximum number of related genes to return.
    pub limit_results: usize,
    /// Maximum number of attributes to return.
    #[serde(default)]
    pub attributes_limit: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeDto {
    pub id: i64,
    pub score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InteractionDto {
    pub from_node_id: i64,
    pub to_node_id: i64,
    pub weight: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkDto {
    pub id: i64,
    pub weight: f64,
    #[serde(default)]
    pub interactions: Vec<InteractionDto>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttributeDto {
    pub id: i64,
    pub group_id: i64,
    #[serde(default)]
    pub weight: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OntologyCategoryDto {
    pub id: i64,
    pub p_value: f64,
    pub q_value: f64,
    #[serde(default)]
    pub annotated_in_sample: u32,
    #[serde(default)]
    pub annotated_in_total: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RelatedGenesResponse {
    #[serde(default)]
    pub networks: Vec<NetworkDto>,
    #[serde(default)]
    pub nodes: Vec<NodeDto>,
    #[serde(default)]
    pub attributes: Option<Vec<AttributeDto>>,
    #[serde(default)]
    pub node_to_attributes: Option<HashMap<i64, Vec<AttributeDto>>>,
}

impl RelatedGenesResponse {
    /// Parse an engine response from JSON.
    pub fn from_json(json: &str) -> crate::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn total_network_weight(&self) -> f64 {
        self.networks.iter().map(|n| n.weight).sum()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EnrichmentResponse {
    /// Node id → enriched categories for that node.
    #[serde(default)]
    pub annotations: HashMap<i64, Vec<OntologyCategoryDto>>,
}
