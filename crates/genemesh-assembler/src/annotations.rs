//! Enrichment annotations per node.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use genemesh_common::dto::OntologyCategoryDto;
use genemesh_common::entities::OntologyCategory;
use serde::{Deserialize, Serialize};
use tracing::error;

use crate::mediator::OntologyMediator;

/// An ontology category paired with its enrichment statistics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnotationEntry {
    pub category: OntologyCategory,
    pub statistics: OntologyCategoryDto,
}

impl AnnotationEntry {
    pub fn new(category: OntologyCategory, statistics: OntologyCategoryDto) -> Self {
        Self { category, statistics }
    }

    pub fn q_value(&self) -> f64 {
        self.statistics.q_value
    }
}

/// Node id → annotations for that node.
///
/// Each category is resolved once per call and the entry is shared by every
/// node that carries it (statistics come from the first occurrence). Failed
/// lookups are logged and skipped; nodes left with nothing are omitted.
pub fn process_annotations(
    annotations: &HashMap<i64, Vec<OntologyCategoryDto>>,
    mediator: &dyn OntologyMediator,
) -> HashMap<i64, Vec<Arc<AnnotationEntry>>> {
    let mut cache: HashMap<i64, Arc<AnnotationEntry>> = HashMap::new();
    let mut result = HashMap::new();

    for (&node_id, categories) in annotations {
        let mut seen = HashSet::new();
        let mut entries = Vec::new();

        for dto in categories {
            let entry = match cache.get(&dto.id) {
                Some(entry) => entry.clone(),
                None => match mediator.category(dto.id) {
                    Ok(category) => {
                        let entry = Arc::new(AnnotationEntry::new(category, dto.clone()));
                        cache.insert(dto.id, entry.clone());
                        entry
                    }
                    Err(e) => {
                        error!(category_id = dto.id, error = %e, "Can't find category");
                        continue;
                    }
                },
            };
            if seen.insert(entry.category.id) {
                entries.push(entry);
            }
        }

        if !entries.is_empty() {
            result.insert(node_id, entries);
        }
    }
    result
}
