//! Ordering helpers for presenting scored genes, groups and networks.

use std::cmp::Ordering;
use std::collections::HashMap;
use std::hash::Hash;

use genemesh_common::entities::{
    Attribute, AttributeGroup, Colour, InteractionNetwork, InteractionNetworkGroup,
};

use crate::mediator::DataSet;
use crate::weights::WeightedNetwork;

/// All scores, ascending.
pub fn sort_scores<K>(scores: &HashMap<K, f64>) -> Vec<f64> {
    let mut values: Vec<f64> = scores.values().copied().collect();
    values.sort_by(f64::total_cmp);
    values
}

/// Keys ordered from highest to lowest score.
pub fn create_sorted_list<K>(scores: &HashMap<K, f64>) -> Vec<K>
where
    K: Clone + Eq + Hash,
{
    let mut entries: Vec<(&K, f64)> = scores.iter().map(|(k, &v)| (k, v)).collect();
    entries.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));
    entries.into_iter().map(|(k, _)| k.clone()).collect()
}

/// Case-insensitive name comparison.
pub fn compare_names(a: &str, b: &str) -> Ordering {
    a.chars()
        .flat_map(char::to_lowercase)
        .cmp(b.chars().flat_map(char::to_lowercase))
}

/// Something listed by name in the host's network panel.
pub trait Named {
    fn name(&self) -> &str;
}

impl Named for InteractionNetwork {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Named for InteractionNetworkGroup {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Named for Attribute {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Named for AttributeGroup {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Named for WeightedNetwork {
    fn name(&self) -> &str {
        &self.network.name
    }
}

impl<T: Named + ?Sized> Named for &T {
    fn name(&self) -> &str {
        (**self).name()
    }
}

impl<T: Named + ?Sized> Named for std::sync::Arc<T> {
    fn name(&self) -> &str {
        (**self).name()
    }
}

pub fn sort_by_name<T: Named>(items: &mut [T]) {
    items.sort_by(|a, b| compare_names(a.name(), b.name()));
}

/// Display colour for a network group code.
pub fn network_colour(data: &dyn DataSet, group_code: &str) -> Option<Colour> {
    data.colour(group_code)
}
