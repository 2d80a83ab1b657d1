//! Contract validator for `sidecar_roadmap_v1`
//!
//! Walks the four nesting levels depth-first and reports every defect it
//! finds instead of stopping at the first one. Each node's checks return
//! their own [`ValidationResult`], concatenated upward by the parent.
//!
//! Traversal skips a subtree only when its child array is missing or
//! empty, since nothing below it can be checked.

use crate::issue::ValidationResult;
use serde_json::Value;
use sidecar_model::{FieldPath, ItemStatus, CONTRACT_VERSION};
use std::collections::HashSet;

/// Nesting level in the contract tree
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Level {
    Project,
    Roadmap,
    Phase,
    Item,
}

impl Level {
    fn id_key(self) -> &'static str {
        match self {
            Self::Project => "project_id",
            Self::Roadmap => "roadmap_id",
            Self::Phase => "phase_id",
            Self::Item => "item_id",
        }
    }

    fn name_key(self) -> &'static str {
        match self {
            Self::Project => "project_name",
            Self::Roadmap => "roadmap_name",
            Self::Phase => "phase_name",
            Self::Item => "title",
        }
    }

    /// Uniqueness scope is the owning parent, except projects (payload-wide)
    fn duplicate_message(self) -> &'static str {
        match self {
            Self::Project => "project_id must be unique",
            Self::Roadmap => "roadmap_id must be unique within project",
            Self::Phase => "phase_id must be unique within roadmap",
            Self::Item => "item_id must be unique within phase",
        }
    }

    fn children(self) -> Option<(&'static str, Level)> {
        match self {
            Self::Project => Some(("roadmaps", Self::Roadmap)),
            Self::Roadmap => Some(("phases", Self::Phase)),
            Self::Phase => Some(("items", Self::Item)),
            Self::Item => None,
        }
    }
}

/// Validate an arbitrary decoded JSON value against the contract
///
/// Never panics on malformed shapes; every problem becomes an entry in
/// the returned result.
#[must_use]
pub fn validate(raw: &Value) -> ValidationResult {
    let root_path = FieldPath::root();
    // arrays pass as objects without fields
    if !(raw.is_object() || raw.is_array()) {
        return ValidationResult::from_error(&root_path, "Payload must be an object");
    }

    let mut result = ValidationResult::default();
    if raw.get("contract_version").and_then(Value::as_str) != Some(CONTRACT_VERSION) {
        result.push_error(
            &root_path.key("contract_version"),
            format!("contract_version must be {CONTRACT_VERSION}"),
        );
    }

    let projects_path = root_path.key("projects");
    match non_empty_array(raw.get("projects")) {
        Some(projects) => result.merge(validate_siblings(projects, &projects_path, Level::Project)),
        None => {
            result.push_error(&projects_path, "projects must be a non-empty array");
            result
        }
    }
}

/// Validate one sibling list, scoping id uniqueness to that list
fn validate_siblings(children: &[Value], path: &FieldPath, level: Level) -> ValidationResult {
    duplicate_flags(children, level.id_key())
        .into_iter()
        .zip(children)
        .enumerate()
        .map(|(index, (duplicate, child))| validate_node(child, &path.index(index), level, duplicate))
        .fold(ValidationResult::default(), ValidationResult::merge)
}

fn validate_node(node: &Value, path: &FieldPath, level: Level, duplicate: bool) -> ValidationResult {
    let mut result = ValidationResult::default();

    let id_key = level.id_key();
    if required_text(node.get(id_key)).is_none() {
        result.push_error(&path.key(id_key), format!("{id_key} is required"));
    } else if duplicate {
        result.push_error(&path.key(id_key), level.duplicate_message());
    }

    let name_key = level.name_key();
    if required_text(node.get(name_key)).is_none() {
        result.push_error(&path.key(name_key), format!("{name_key} is required"));
    }

    match level.children() {
        Some((key, child_level)) => {
            let children_path = path.key(key);
            match non_empty_array(node.get(key)) {
                Some(children) => result.merge(validate_siblings(children, &children_path, child_level)),
                None => {
                    result.push_error(&children_path, format!("{key} must be a non-empty array"));
                    result
                }
            }
        }
        None => result.merge(validate_item_state(node, path)),
    }
}

/// Status, progress and blocker checks for a single item
fn validate_item_state(item: &Value, path: &FieldPath) -> ValidationResult {
    let mut result = ValidationResult::default();

    let status = item
        .get("status")
        .and_then(Value::as_str)
        .map_or(ItemStatus::Unknown, ItemStatus::from_literal);
    if status == ItemStatus::Unknown {
        result.push_error(
            &path.key("status"),
            "status must be done, in_progress, blocked or not_started",
        );
    }

    // progress on done/not_started items is irrelevant and never checked
    if status.requires_progress() {
        match item.get("progress").and_then(Value::as_f64) {
            None => result.push_error(
                &path.key("progress"),
                "progress is required when status is in_progress or blocked",
            ),
            Some(progress) if !(0.0..=100.0).contains(&progress) => {
                result.push_error(&path.key("progress"), "progress must be between 0 and 100");
            }
            Some(_) => {}
        }
    }

    if status == ItemStatus::Blocked && !is_truthy(item.get("blocker_reason")) {
        result.push_warning(
            &path.key("blocker_reason"),
            "blocker_reason is recommended for blocked items",
        );
    }

    result
}

/// Mark every sibling whose valid id was already seen earlier in the list
fn duplicate_flags(children: &[Value], id_key: &str) -> Vec<bool> {
    let mut seen = HashSet::new();
    children
        .iter()
        .map(|child| required_text(child.get(id_key)).is_some_and(|id| !seen.insert(id)))
        .collect()
}

/// A string that is not blank after trimming
fn required_text(value: Option<&Value>) -> Option<&str> {
    value
        .and_then(Value::as_str)
        .filter(|text| !text.trim().is_empty())
}

/// Missing arrays and empty arrays are the same defect
fn non_empty_array(value: Option<&Value>) -> Option<&[Value]> {
    value
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .filter(|items| !items.is_empty())
}

fn is_truthy(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(flag)) => *flag,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|n| n != 0.0),
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Array(_) | Value::Object(_)) => true,
    }
}
