//! Dashboard state
//!
//! Holds the one current tree and decides whether an incoming document
//! replaces it. A document is adopted only with zero validation errors;
//! otherwise the previous tree stays in place. Adoption swaps the whole
//! tree and resets the selection; nothing is merged.

use crate::config::SidecarConfig;
use crate::error::SidecarError;
use parking_lot::RwLock;
use serde_json::Value;
use sidecar_model::{sample_payload_json, FieldPath, ModelError, Payload, Project, Roadmap};
use sidecar_progress::{first_incomplete_item, roadmap_stats, truncate_title, up_next, ItemLocator, UpNextOptions};
use sidecar_validation::{parse_and_validate, validate, ValidationIssue, ValidationResult};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Currently opened project and roadmap
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    pub project_id: Option<String>,
    pub roadmap_id: Option<String>,
}

/// Result of offering a document to the dashboard
#[derive(Debug, Clone, PartialEq)]
pub enum IngestOutcome {
    /// Tree replaced; warnings are informational
    Adopted { warnings: Vec<ValidationIssue> },
    /// Tree kept; errors explain why
    Rejected { result: ValidationResult },
}

impl IngestOutcome {
    #[inline]
    #[must_use]
    pub fn is_adopted(&self) -> bool {
        matches!(self, Self::Adopted { .. })
    }
}

/// Main call to action on the hero panel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrimaryAction {
    /// Nothing to resume; open the import editor
    Import,
    /// Current roadmap has blocked items
    ResolveBlockers,
    /// Jump to the first incomplete item
    Resume,
}

impl PrimaryAction {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Import => "Import",
            Self::ResolveBlockers => "Resolve Blockers",
            Self::Resume => "Resume",
        }
    }
}

/// Text shown when nothing is up next
pub const UP_NEXT_CLEAR: &str = "Clear";

/// Single-writer dashboard state
#[derive(Debug)]
pub struct Dashboard {
    config: SidecarConfig,
    current: Arc<Payload>,
    /// Adopted document as received, for export
    document: Arc<Value>,
    validation: Option<ValidationResult>,
    selection: Selection,
}

impl Dashboard {
    /// Start from the bundled sample
    ///
    /// # Errors
    /// Returns [`SidecarError::Contract`] if the bundled sample is corrupt.
    pub fn new(config: SidecarConfig) -> Result<Self, SidecarError> {
        let (current, document) = load_sample_document()?;
        Ok(Self {
            config,
            current,
            document,
            validation: None,
            selection: Selection::default(),
        })
    }

    #[inline]
    #[must_use]
    pub fn config(&self) -> &SidecarConfig {
        &self.config
    }

    #[inline]
    #[must_use]
    pub fn payload(&self) -> &Payload {
        &self.current
    }

    /// Shared reference to the current tree
    #[inline]
    #[must_use]
    pub fn snapshot(&self) -> Arc<Payload> {
        Arc::clone(&self.current)
    }

    /// Result of the last import attempt, if any
    #[inline]
    #[must_use]
    pub fn validation(&self) -> Option<&ValidationResult> {
        self.validation.as_ref()
    }

    #[inline]
    #[must_use]
    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Parse, validate and possibly adopt a JSON document
    pub fn ingest_text(&mut self, text: &str) -> IngestOutcome {
        let checked = parse_and_validate(text);
        self.apply(checked.value, checked.result)
    }

    /// Validate and possibly adopt a decoded document
    pub fn ingest_value(&mut self, value: Value) -> IngestOutcome {
        let result = validate(&value);
        self.apply(Some(value), result)
    }

    fn apply(&mut self, value: Option<Value>, result: ValidationResult) -> IngestOutcome {
        let typed = match value {
            Some(value) if result.is_renderable() => Payload::from_value(value.clone())
                .map(|payload| (payload, value))
                .map_err(|e| ValidationResult::from_error(&FieldPath::root(), e.to_string())),
            _ => Err(result.clone()),
        };

        match typed {
            Ok((payload, document)) => {
                info!(
                    projects = payload.projects.len(),
                    warnings = result.warnings.len(),
                    "adopted payload"
                );
                self.current = Arc::new(payload);
                self.document = Arc::new(document);
                self.selection = Selection::default();
                let warnings = result.warnings.clone();
                self.validation = Some(result);
                IngestOutcome::Adopted { warnings }
            }
            Err(rejected) => {
                warn!(
                    errors = rejected.errors.len(),
                    warnings = rejected.warnings.len(),
                    "rejected payload; keeping previous tree"
                );
                self.validation = Some(rejected.clone());
                IngestOutcome::Rejected { result: rejected }
            }
        }
    }

    /// Restore the bundled sample and forget the last import
    ///
    /// # Errors
    /// Returns [`SidecarError::Contract`] if the bundled sample is corrupt.
    pub fn load_sample(&mut self) -> Result<(), SidecarError> {
        (self.current, self.document) = load_sample_document()?;
        self.selection = Selection::default();
        self.validation = None;
        debug!("loaded sample payload");
        Ok(())
    }

    /// Adopted document as pretty JSON, for editing and re-import
    ///
    /// Fields outside the contract and number formatting survive.
    ///
    /// # Errors
    /// Returns [`SidecarError::Contract`] if serialization fails.
    pub fn export_json(&self) -> Result<String, SidecarError> {
        serde_json::to_string_pretty(&*self.document)
            .map_err(|e| SidecarError::Contract(ModelError::Shape(e)))
    }

    /// Open a project at its landing roadmap
    ///
    /// # Errors
    /// Returns [`SidecarError::NotFound`] for an unknown project id.
    pub fn select_project(&mut self, project_id: &str) -> Result<(), SidecarError> {
        let project = self
            .current
            .project(project_id)
            .ok_or_else(|| SidecarError::not_found("project", project_id))?;
        self.selection = Selection {
            project_id: Some(project.project_id.clone()),
            roadmap_id: project.landing_roadmap_id().map(str::to_owned),
        };
        Ok(())
    }

    /// Switch roadmap within the selected project
    ///
    /// # Errors
    /// Returns [`SidecarError::NotFound`] when no project is selected or the
    /// roadmap is not part of it.
    pub fn select_roadmap(&mut self, roadmap_id: &str) -> Result<(), SidecarError> {
        let project = self
            .current_project()
            .ok_or_else(|| SidecarError::not_found("project", "<none selected>"))?;
        if project.roadmap(roadmap_id).is_none() {
            return Err(SidecarError::not_found("roadmap", roadmap_id));
        }
        self.selection.roadmap_id = Some(roadmap_id.to_string());
        Ok(())
    }

    pub fn clear_selection(&mut self) {
        self.selection = Selection::default();
    }

    /// Selected project, `None` if unset or dangling
    #[must_use]
    pub fn current_project(&self) -> Option<&Project> {
        self.current.project(self.selection.project_id.as_deref()?)
    }

    /// Selected roadmap, `None` if unset or dangling
    #[must_use]
    pub fn current_roadmap(&self) -> Option<&Roadmap> {
        self.current_project()?
            .roadmap(self.selection.roadmap_id.as_deref()?)
    }

    /// Projects whose name, or any roadmap name, contains `term`
    ///
    /// Case-insensitive; a blank term matches everything.
    #[must_use]
    pub fn filter_projects(&self, term: &str) -> Vec<&Project> {
        let term = term.trim().to_lowercase();
        self.current
            .projects
            .iter()
            .filter(|project| {
                term.is_empty()
                    || project.project_name.to_lowercase().contains(&term)
                    || project
                        .roadmaps
                        .iter()
                        .any(|r| r.roadmap_name.to_lowercase().contains(&term))
            })
            .collect()
    }

    /// Up-next item of the current roadmap, honoring client view
    #[must_use]
    pub fn up_next(&self) -> Option<ItemLocator<'_>> {
        let options = UpNextOptions {
            deliverables_only: self.config.client_view,
        };
        up_next(self.current_roadmap()?, options)
    }

    /// Up-next title truncated for display, or [`UP_NEXT_CLEAR`]
    #[must_use]
    pub fn up_next_display(&self) -> String {
        self.up_next().map_or_else(
            || UP_NEXT_CLEAR.to_string(),
            |found| truncate_title(&found.item.title, self.config.up_next_title_limit),
        )
    }

    #[must_use]
    pub fn primary_action(&self) -> PrimaryAction {
        let Some(roadmap) = self.current_roadmap() else {
            return PrimaryAction::Import;
        };
        if roadmap_stats(roadmap).blocked > 0 {
            PrimaryAction::ResolveBlockers
        } else if first_incomplete_item(roadmap).is_some() {
            PrimaryAction::Resume
        } else {
            PrimaryAction::Import
        }
    }
}

fn load_sample_document() -> Result<(Arc<Payload>, Arc<Value>), SidecarError> {
    let document = sample_payload_json()?;
    let payload = Payload::from_value(document.clone())?;
    Ok((Arc::new(payload), Arc::new(document)))
}

/// Shared handle to the dashboard
///
/// Many readers, one writing pipeline. Readers take [`Arc<Payload>`]
/// snapshots that stay valid after the tree is replaced.
#[derive(Debug, Clone)]
pub struct DashboardHandle {
    inner: Arc<RwLock<Dashboard>>,
}

impl DashboardHandle {
    #[must_use]
    pub fn new(dashboard: Dashboard) -> Self {
        Self {
            inner: Arc::new(RwLock::new(dashboard)),
        }
    }

    /// Current tree
    #[must_use]
    pub fn snapshot(&self) -> Arc<Payload> {
        self.inner.read().snapshot()
    }

    /// Run the ingest pipeline under the write lock
    pub fn ingest_text(&self, text: &str) -> IngestOutcome {
        self.inner.write().ingest_text(text)
    }

    /// Read access for presentation code
    pub fn read(&self) -> parking_lot::RwLockReadGuard<'_, Dashboard> {
        self.inner.read()
    }

    /// Write access for selection changes
    pub fn write(&self) -> parking_lot::RwLockWriteGuard<'_, Dashboard> {
        self.inner.write()
    }
}
