//! Contract tree for `sidecar_roadmap_v1`
//!
//! Defines the four nesting levels of a payload:
//! - Projects own roadmaps
//! - Roadmaps own phases
//! - Phases own items
//!
//! Children keep input order. No entity refers back to its parent.

use crate::error::ModelError;
use crate::serde_helpers::{flag, number, required_text, text};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// Literal discriminator every payload must carry
pub const CONTRACT_VERSION: &str = "sidecar_roadmap_v1";

/// Status of an item
///
/// Any literal outside the four contract values decodes to
/// [`ItemStatus::Unknown`]; the validator rejects it, the aggregator
/// treats it as zero progress.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemStatus {
    Done,
    InProgress,
    Blocked,
    NotStarted,
    #[default]
    Unknown,
}

impl ItemStatus {
    /// The four statuses accepted by the contract
    pub const CONTRACT: [ItemStatus; 4] = [
        ItemStatus::Done,
        ItemStatus::InProgress,
        ItemStatus::Blocked,
        ItemStatus::NotStarted,
    ];

    /// Map a wire literal to a status
    #[must_use]
    pub fn from_literal(literal: &str) -> Self {
        match literal {
            "done" => Self::Done,
            "in_progress" => Self::InProgress,
            "blocked" => Self::Blocked,
            "not_started" => Self::NotStarted,
            _ => Self::Unknown,
        }
    }

    /// Wire literal for this status
    #[inline]
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Done => "done",
            Self::InProgress => "in_progress",
            Self::Blocked => "blocked",
            Self::NotStarted => "not_started",
            Self::Unknown => "unknown",
        }
    }

    /// Statuses whose items must carry an explicit `progress`
    #[inline]
    #[must_use]
    pub fn requires_progress(self) -> bool {
        matches!(self, Self::InProgress | Self::Blocked)
    }
}

impl fmt::Display for ItemStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ItemStatus {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match Self::from_literal(s) {
            Self::Unknown => Err(ModelError::UnknownStatus(s.to_string())),
            status => Ok(status),
        }
    }
}

impl<'de> Deserialize<'de> for ItemStatus {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(value.as_str().map_or(Self::Unknown, Self::from_literal))
    }
}

/// Single unit of work within a phase
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    #[serde(default, deserialize_with = "required_text::deserialize")]
    pub item_id: String,
    #[serde(default, deserialize_with = "required_text::deserialize")]
    pub title: String,
    #[serde(default)]
    pub status: ItemStatus,
    /// 0–100; only meaningful for `in_progress` and `blocked`
    #[serde(default, deserialize_with = "number::deserialize", skip_serializing_if = "Option::is_none")]
    pub progress: Option<f64>,
    #[serde(default, deserialize_with = "flag::deserialize", skip_serializing_if = "Option::is_none")]
    pub is_deliverable: Option<bool>,
    #[serde(default, deserialize_with = "text::deserialize", skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    #[serde(default, deserialize_with = "text::deserialize", skip_serializing_if = "Option::is_none")]
    pub blocker_reason: Option<String>,
    #[serde(default, deserialize_with = "flag::deserialize", skip_serializing_if = "Option::is_none")]
    pub is_unlocked: Option<bool>,
    #[serde(default, deserialize_with = "text::deserialize", skip_serializing_if = "Option::is_none")]
    pub locked_reason: Option<String>,
}

impl Item {
    /// Create item with required fields only
    #[must_use]
    pub fn new(item_id: impl Into<String>, title: impl Into<String>, status: ItemStatus) -> Self {
        Self {
            item_id: item_id.into(),
            title: title.into(),
            status,
            progress: None,
            is_deliverable: None,
            detail: None,
            blocker_reason: None,
            is_unlocked: None,
            locked_reason: None,
        }
    }

    /// With explicit progress
    #[inline]
    #[must_use]
    pub fn with_progress(mut self, progress: f64) -> Self {
        self.progress = Some(progress);
        self
    }

    /// Flag as deliverable
    #[inline]
    #[must_use]
    pub fn deliverable(mut self) -> Self {
        self.is_deliverable = Some(true);
        self
    }

    /// With blocker reason
    #[inline]
    #[must_use]
    pub fn with_blocker(mut self, reason: impl Into<String>) -> Self {
        self.blocker_reason = Some(reason.into());
        self
    }

    /// Mark as explicitly locked
    #[inline]
    #[must_use]
    pub fn locked(mut self, reason: impl Into<String>) -> Self {
        self.is_unlocked = Some(false);
        self.locked_reason = Some(reason.into());
        self
    }

    /// Items are unlocked unless `is_unlocked` is explicitly `false`
    #[inline]
    #[must_use]
    pub fn is_unlocked(&self) -> bool {
        self.is_unlocked != Some(false)
    }

    /// Only an explicit `true` makes an item a deliverable
    #[inline]
    #[must_use]
    pub fn is_deliverable(&self) -> bool {
        self.is_deliverable == Some(true)
    }
}

/// Phase of work within a roadmap
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Phase {
    #[serde(default, deserialize_with = "required_text::deserialize")]
    pub phase_id: String,
    #[serde(default, deserialize_with = "required_text::deserialize")]
    pub phase_name: String,
    #[serde(default, deserialize_with = "text::deserialize", skip_serializing_if = "Option::is_none")]
    pub phase_desc: Option<String>,
    /// Absent means `true`
    #[serde(default, deserialize_with = "flag::deserialize", skip_serializing_if = "Option::is_none")]
    pub compute_phase_progress: Option<bool>,
    #[serde(default, deserialize_with = "number::deserialize", skip_serializing_if = "Option::is_none")]
    pub phase_progress_override: Option<f64>,
    #[serde(default)]
    pub items: Vec<Item>,
}

impl Phase {
    /// Create phase from items
    #[must_use]
    pub fn new(phase_id: impl Into<String>, phase_name: impl Into<String>, items: Vec<Item>) -> Self {
        Self {
            phase_id: phase_id.into(),
            phase_name: phase_name.into(),
            phase_desc: None,
            compute_phase_progress: None,
            phase_progress_override: None,
            items,
        }
    }

    /// With description
    #[inline]
    #[must_use]
    pub fn with_desc(mut self, desc: impl Into<String>) -> Self {
        self.phase_desc = Some(desc.into());
        self
    }

    /// Disable computation and pin progress to `value`
    #[inline]
    #[must_use]
    pub fn with_override(mut self, value: f64) -> Self {
        self.compute_phase_progress = Some(false);
        self.phase_progress_override = Some(value);
        self
    }

    /// Resolved `compute_phase_progress` flag
    #[inline]
    #[must_use]
    pub fn computes_progress(&self) -> bool {
        self.compute_phase_progress.unwrap_or(true)
    }
}

/// Roadmap grouping phases
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Roadmap {
    #[serde(default, deserialize_with = "required_text::deserialize")]
    pub roadmap_id: String,
    #[serde(default, deserialize_with = "required_text::deserialize")]
    pub roadmap_name: String,
    /// Display-only annotation
    #[serde(default, deserialize_with = "text::deserialize", skip_serializing_if = "Option::is_none")]
    pub lock_label: Option<String>,
    #[serde(default, deserialize_with = "flag::deserialize", skip_serializing_if = "Option::is_none")]
    pub is_master: Option<bool>,
    /// Absent means `true`
    #[serde(default, deserialize_with = "flag::deserialize", skip_serializing_if = "Option::is_none")]
    pub compute_overall_progress: Option<bool>,
    #[serde(default, deserialize_with = "number::deserialize", skip_serializing_if = "Option::is_none")]
    pub overall_progress_override: Option<f64>,
    #[serde(default)]
    pub phases: Vec<Phase>,
}

impl Roadmap {
    /// Create roadmap from phases
    #[must_use]
    pub fn new(roadmap_id: impl Into<String>, roadmap_name: impl Into<String>, phases: Vec<Phase>) -> Self {
        Self {
            roadmap_id: roadmap_id.into(),
            roadmap_name: roadmap_name.into(),
            lock_label: None,
            is_master: None,
            compute_overall_progress: None,
            overall_progress_override: None,
            phases,
        }
    }

    /// Disable computation and pin overall progress to `value`
    #[inline]
    #[must_use]
    pub fn with_override(mut self, value: f64) -> Self {
        self.compute_overall_progress = Some(false);
        self.overall_progress_override = Some(value);
        self
    }

    /// Resolved `compute_overall_progress` flag
    #[inline]
    #[must_use]
    pub fn computes_progress(&self) -> bool {
        self.compute_overall_progress.unwrap_or(true)
    }

    /// Iterate all items in document order
    pub fn items(&self) -> impl Iterator<Item = &Item> {
        self.phases.iter().flat_map(|phase| phase.items.iter())
    }
}

/// Project grouping roadmaps
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    #[serde(default, deserialize_with = "required_text::deserialize")]
    pub project_id: String,
    #[serde(default, deserialize_with = "required_text::deserialize")]
    pub project_name: String,
    #[serde(default, deserialize_with = "text::deserialize", skip_serializing_if = "Option::is_none")]
    pub project_desc: Option<String>,
    #[serde(default, deserialize_with = "text::deserialize", skip_serializing_if = "Option::is_none")]
    pub default_roadmap_id: Option<String>,
    #[serde(default)]
    pub roadmaps: Vec<Roadmap>,
}

impl Project {
    /// Create project from roadmaps
    #[must_use]
    pub fn new(project_id: impl Into<String>, project_name: impl Into<String>, roadmaps: Vec<Roadmap>) -> Self {
        Self {
            project_id: project_id.into(),
            project_name: project_name.into(),
            project_desc: None,
            default_roadmap_id: None,
            roadmaps,
        }
    }

    /// With default roadmap
    #[inline]
    #[must_use]
    pub fn with_default_roadmap(mut self, roadmap_id: impl Into<String>) -> Self {
        self.default_roadmap_id = Some(roadmap_id.into());
        self
    }

    /// Roadmap opened when the project is selected
    ///
    /// `default_roadmap_id` when set, else the first roadmap.
    #[must_use]
    pub fn landing_roadmap_id(&self) -> Option<&str> {
        self.default_roadmap_id
            .as_deref()
            .or_else(|| self.roadmaps.first().map(|r| r.roadmap_id.as_str()))
    }

    /// Find a roadmap by id
    #[must_use]
    pub fn roadmap(&self, roadmap_id: &str) -> Option<&Roadmap> {
        self.roadmaps.iter().find(|r| r.roadmap_id == roadmap_id)
    }
}

/// Root document of the render contract
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payload {
    #[serde(default, deserialize_with = "required_text::deserialize")]
    pub contract_version: String,
    #[serde(default)]
    pub projects: Vec<Project>,
}

impl Payload {
    /// Create payload tagged with [`CONTRACT_VERSION`]
    #[must_use]
    pub fn new(projects: Vec<Project>) -> Self {
        Self {
            contract_version: CONTRACT_VERSION.to_string(),
            projects,
        }
    }

    /// Convert a decoded JSON value into the typed tree
    ///
    /// # Errors
    /// Returns [`ModelError::Shape`] if a container has the wrong JSON type.
    /// Values that pass validation always convert.
    pub fn from_value(value: Value) -> Result<Self, ModelError> {
        serde_json::from_value(value).map_err(ModelError::Shape)
    }

    /// Parse and convert a JSON document
    ///
    /// # Errors
    /// Returns [`ModelError::Shape`] on malformed JSON or container types.
    pub fn from_json_str(json: &str) -> Result<Self, ModelError> {
        serde_json::from_str(json).map_err(ModelError::Shape)
    }

    /// Find a project by id
    #[must_use]
    pub fn project(&self, project_id: &str) -> Option<&Project> {
        self.projects.iter().find(|p| p.project_id == project_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn status_literals_round_trip() {
        for status in ItemStatus::CONTRACT {
            assert_eq!(ItemStatus::from_literal(status.as_str()), status);
            assert_eq!(status.as_str().parse::<ItemStatus>().unwrap(), status);
        }
        assert!("paused".parse::<ItemStatus>().is_err());
    }

    #[test]
    fn unknown_status_decodes_leniently() {
        let item: Item = serde_json::from_value(json!({
            "item_id": "a", "title": "A", "status": "paused"
        }))
        .unwrap();
        assert_eq!(item.status, ItemStatus::Unknown);

        let item: Item = serde_json::from_value(json!({"item_id": "a", "title": "A", "status": 3})).unwrap();
        assert_eq!(item.status, ItemStatus::Unknown);
    }

    #[test]
    fn resolved_defaults() {
        let phase = Phase::new("p", "P", vec![]);
        assert!(phase.computes_progress());
        assert!(!phase.clone().with_override(10.0).computes_progress());

        let item = Item::new("i", "I", ItemStatus::Done);
        assert!(item.is_unlocked());
        assert!(!item.is_deliverable());
        assert!(!item.clone().locked("later").is_unlocked());
        assert!(item.deliverable().is_deliverable());
    }

    #[test]
    fn extra_fields_are_ignored() {
        let payload = Payload::from_value(json!({
            "contract_version": CONTRACT_VERSION,
            "theme": "dark",
            "projects": [{
                "project_id": "p", "project_name": "P", "owner": "ops",
                "roadmaps": []
            }]
        }))
        .unwrap();
        assert_eq!(payload.projects[0].project_id, "p");
    }

    #[test]
    fn landing_roadmap_prefers_default() {
        let project = Project::new(
            "p",
            "P",
            vec![Roadmap::new("a", "A", vec![]), Roadmap::new("b", "B", vec![])],
        );
        assert_eq!(project.landing_roadmap_id(), Some("a"));
        assert_eq!(project.clone().with_default_roadmap("b").landing_roadmap_id(), Some("b"));
        assert_eq!(Project::new("q", "Q", vec![]).landing_roadmap_id(), None);
    }

    #[test]
    fn serialization_skips_absent_optionals() {
        let payload = Payload::new(vec![Project::new(
            "p",
            "P",
            vec![Roadmap::new(
                "r",
                "R",
                vec![Phase::new("ph", "Ph", vec![Item::new("i", "I", ItemStatus::NotStarted)])],
            )],
        )]);
        let value = serde_json::to_value(&payload).unwrap();
        assert_eq!(
            value,
            json!({
                "contract_version": "sidecar_roadmap_v1",
                "projects": [{
                    "project_id": "p",
                    "project_name": "P",
                    "roadmaps": [{
                        "roadmap_id": "r",
                        "roadmap_name": "R",
                        "phases": [{
                            "phase_id": "ph",
                            "phase_name": "Ph",
                            "items": [{"item_id": "i", "title": "I", "status": "not_started"}]
                        }]
                    }]
                }]
            })
        );
    }

    #[test]
    fn non_array_container_is_a_shape_error() {
        let err = Payload::from_value(json!({"contract_version": CONTRACT_VERSION, "projects": 5}));
        assert!(matches!(err, Err(ModelError::Shape(_))));
    }
}
