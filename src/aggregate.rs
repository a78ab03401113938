//! # Scalar and Grouped Aggregators
//!
//! Consumers of the filtered subset feeding the summary cards and the bar
//! chart. All are O(n) over the subset and allocate only their output.

use crate::dataset::Dataset;
use crate::filter::Subset;
use crate::model::{Field, UNKNOWN};
use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};

/// Occurrence count for a single group of the bar aggregation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupCount {
    pub label: String,
    pub count: u64,
}

/// Row count of the subset.
pub fn count_occurrences(subset: &Subset) -> u64 {
    subset.len() as u64
}

/// Distinct species within the subset.
///
/// Null species form exactly one additional `Unknown` bucket; they are never
/// dropped from the count.
pub fn count_distinct_species(dataset: &Dataset, subset: &Subset) -> u64 {
    let mut seen: FxHashSet<&str> = FxHashSet::default();
    for id in subset {
        let occ = dataset.row(*id);
        seen.insert(occ.species.as_deref().unwrap_or(UNKNOWN));
    }
    seen.len() as u64
}

/// Count subset rows per value of the grouping variable.
///
/// Ordered by count descending, ties broken by group label ascending. The
/// ordering is load-bearing: the bar chart's visual ranking depends on it.
pub fn grouped_counts(dataset: &Dataset, subset: &Subset, field: Field) -> Vec<GroupCount> {
    let mut counts: FxHashMap<&str, u64> = FxHashMap::default();
    for id in subset {
        let occ = dataset.row(*id);
        *counts.entry(occ.group_key(field)).or_insert(0) += 1;
    }

    let mut groups: Vec<GroupCount> = counts
        .into_iter()
        .map(|(label, count)| GroupCount {
            label: label.to_string(),
            count,
        })
        .collect();
    groups.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.label.cmp(&b.label)));
    groups
}
