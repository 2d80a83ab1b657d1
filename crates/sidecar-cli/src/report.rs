//! Progress report rendering for `sidecar progress`

use serde::Serialize;
use sidecar_core::{SidecarConfig, UP_NEXT_CLEAR};
use sidecar_model::{ItemStatus, Payload, Phase};
use sidecar_progress::{
    master_progress, phase_progress, roadmap_progress, roadmap_stats, truncate_title, up_next,
    Percent, RoadmapStats, UpNextOptions,
};
use sidecar_validation::ValidationResult;
use std::fmt::{self, Display, Formatter};

/// Per-phase figures; counts cover visible items only
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub(crate) struct PhaseReport {
    pub(crate) phase_id: String,
    pub(crate) phase_name: String,
    pub(crate) progress: Percent,
    pub(crate) visible: usize,
    pub(crate) done: usize,
    pub(crate) blocked: usize,
}

impl PhaseReport {
    /// Client view hides everything but deliverables
    fn new(phase: &Phase, client_view: bool) -> Self {
        let (visible, done, blocked) = phase
            .items
            .iter()
            .filter(|item| !client_view || item.is_deliverable())
            .fold((0, 0, 0), |(visible, done, blocked), item| {
                (
                    visible + 1,
                    done + usize::from(item.status == ItemStatus::Done),
                    blocked + usize::from(item.status == ItemStatus::Blocked),
                )
            });
        Self {
            phase_id: phase.phase_id.clone(),
            phase_name: phase.phase_name.clone(),
            progress: phase_progress(phase),
            visible,
            done,
            blocked,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub(crate) struct RoadmapReport {
    pub(crate) project_id: String,
    pub(crate) roadmap_id: String,
    pub(crate) roadmap_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) lock_label: Option<String>,
    pub(crate) overall: Percent,
    pub(crate) master: Percent,
    pub(crate) stats: RoadmapStats,
    pub(crate) phases: Vec<PhaseReport>,
    pub(crate) up_next: Option<String>,
}

impl Display for RoadmapReport {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} / {} ({})", self.project_id, self.roadmap_id, self.roadmap_name)?;
        if let Some(label) = &self.lock_label {
            writeln!(f, "  {label}")?;
        }
        writeln!(f, "  overall {:>3}%   master {:>3}%", self.overall, self.master)?;
        writeln!(
            f,
            "  {} items, {} done, {} blocked, {} remaining",
            self.stats.total,
            self.stats.done,
            self.stats.blocked,
            self.stats.remaining()
        )?;
        for phase in &self.phases {
            write!(f, "  {:>3}%  {}  {}/{} done", phase.progress, phase.phase_name, phase.done, phase.visible)?;
            if phase.blocked > 0 {
                write!(f, ", {} blocked", phase.blocked)?;
            }
            writeln!(f)?;
        }
        writeln!(f, "  up next: {}", self.up_next.as_deref().unwrap_or(UP_NEXT_CLEAR))
    }
}

/// One report per roadmap, in document order
pub(crate) fn build(payload: &Payload, config: &SidecarConfig) -> Vec<RoadmapReport> {
    let options = UpNextOptions {
        deliverables_only: config.client_view,
    };

    payload
        .projects
        .iter()
        .flat_map(|project| project.roadmaps.iter().map(move |roadmap| (project, roadmap)))
        .map(|(project, roadmap)| RoadmapReport {
            project_id: project.project_id.clone(),
            roadmap_id: roadmap.roadmap_id.clone(),
            roadmap_name: roadmap.roadmap_name.clone(),
            lock_label: roadmap.lock_label.clone(),
            overall: roadmap_progress(roadmap),
            master: master_progress(roadmap),
            stats: roadmap_stats(roadmap),
            phases: roadmap
                .phases
                .iter()
                .map(|phase| PhaseReport::new(phase, config.client_view))
                .collect(),
            up_next: up_next(roadmap, options)
                .map(|found| truncate_title(&found.item.title, config.up_next_title_limit)),
        })
        .collect()
}

pub(crate) fn render_text(reports: &[RoadmapReport]) -> String {
    reports.iter().map(ToString::to_string).collect()
}

/// `error:`/`warning:` lines, errors first
pub(crate) fn render_issues(result: &ValidationResult) -> String {
    let errors = result.errors.iter().map(|error| format!("error: {error}\n"));
    let warnings = result.warnings.iter().map(|warning| format!("warning: {warning}\n"));
    errors.chain(warnings).collect()
}
