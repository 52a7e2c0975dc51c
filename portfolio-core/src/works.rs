//! Work list derivations driven by the current selection.

use std::collections::HashSet;

use crate::catalog::{SkillGroup, WorkItem};
use crate::matcher::stack_matches;

/// Items whose stack fuzzy-matches `selected`, in source order. With no
/// selection the whole list comes back unchanged.
pub fn filter_works<'a>(items: &'a [WorkItem], selected: Option<&str>) -> Vec<&'a WorkItem> {
    match selected {
        None => items.iter().collect(),
        Some(sel) => items
            .iter()
            .filter(|w| stack_matches(sel, &w.stack))
            .collect(),
    }
}

/// Every stack tag used by any work, de-duplicated, first appearance first.
pub fn available_stacks(items: &[WorkItem]) -> Vec<&str> {
    dedup_labels(items.iter().flat_map(|w| w.stack.iter()))
}

/// Every skill in every group, de-duplicated, first appearance first.
pub fn sphere_skills(groups: &[SkillGroup]) -> Vec<&str> {
    dedup_labels(groups.iter().flat_map(|g| g.items.iter()))
}

pub fn find_work<'a>(items: &'a [WorkItem], id: &str) -> Option<&'a WorkItem> {
    items.iter().find(|w| w.id == id)
}

// Exact-string dedup; "Tailwind" and "Tailwind CSS" are both kept.
fn dedup_labels<'a>(labels: impl Iterator<Item = &'a String>) -> Vec<&'a str> {
    let mut seen = HashSet::new();
    labels
        .filter(|l| seen.insert(l.as_str()))
        .map(String::as_str)
        .collect()
}
