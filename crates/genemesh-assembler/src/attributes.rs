//! Attribute evidence: resolved attributes, their groups, per-node lists and weights.

use std::collections::HashMap;

use genemesh_common::dto::AttributeDto;
use genemesh_common::entities::{Attribute, AttributeGroup, Organism};
use genemesh_common::Result;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::mediator::AttributeMediator;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AttributeSet {
    /// Attribute id → attribute.
    pub attributes: HashMap<i64, Attribute>,
    /// Attribute id → owning group.
    pub groups_by_attribute: HashMap<i64, AttributeGroup>,
    /// Node id → attributes attached to that node.
    pub attributes_by_node: HashMap<i64, Vec<Attribute>>,
    /// Attribute id → weight.
    pub weights: HashMap<i64, f64>,
}

impl AttributeSet {
    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }

    pub fn total_weight(&self) -> f64 {
        self.weights.values().sum()
    }

    pub fn weight(&self, attribute: &Attribute) -> Option<f64> {
        self.weights.get(&attribute.id).copied()
    }

    pub fn group_of(&self, attribute: &Attribute) -> Option<&AttributeGroup> {
        self.groups_by_attribute.get(&attribute.id)
    }
}

/// Resolve attribute records against the store.
///
/// Either input missing yields an empty set. Groups are looked up once per
/// group id; an attribute whose record or group is unknown is skipped.
pub fn compute_attributes(
    organism: &Organism,
    source: Option<&[AttributeDto]>,
    node_to_attributes: Option<&HashMap<i64, Vec<AttributeDto>>>,
    mediator: &dyn AttributeMediator,
) -> Result<AttributeSet> {
    let (Some(source), Some(node_to_attributes)) = (source, node_to_attributes) else {
        return Ok(AttributeSet::default());
    };

    let mut set = AttributeSet::default();
    let mut groups: HashMap<i64, Option<AttributeGroup>> = HashMap::new();

    for item in source {
        let attribute = match mediator.find_attribute(organism.id, item.id) {
            Ok(attribute) => attribute,
            Err(e) if e.is_not_found() => {
                debug!(attribute_id = item.id, "Unknown attribute, skipping");
                continue;
            }
            Err(e) => return Err(e),
        };

        let group = match groups.get(&item.group_id) {
            Some(memo) => memo.clone(),
            None => {
                let resolved = match mediator.find_attribute_group(organism.id, item.group_id) {
                    Ok(group) => Some(group),
                    Err(e) if e.is_not_found() => None,
                    Err(e) => return Err(e),
                };
                groups.insert(item.group_id, resolved.clone());
                resolved
            }
        };
        let Some(group) = group else {
            debug!(attribute_id = item.id, group_id = item.group_id, "Unknown attribute group, skipping");
            continue;
        };

        set.groups_by_attribute.insert(item.id, group);
        set.weights.insert(attribute.id, item.weight);
        set.attributes.insert(attribute.id, attribute);
    }

    for (node_id, items) in node_to_attributes {
        let resolved: Vec<Attribute> = items
            .iter()
            .filter_map(|item| set.attributes.get(&item.id).cloned())
            .collect();
        set.attributes_by_node.insert(*node_id, resolved);
    }

    Ok(set)
}
