//! Phase templates
//!
//! Named phase sets that can be appended to a roadmap. Instantiating a
//! template always yields fresh, not-started work.

use crate::error::ModelError;
use crate::types::{Item, ItemStatus, Phase, Roadmap};

/// A reusable set of phases
#[derive(Debug, Clone, PartialEq)]
pub struct TemplateDefinition {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub emoji: &'static str,
    pub phases: Vec<Phase>,
}

impl TemplateDefinition {
    /// Phases with every item reset to `not_started`
    ///
    /// Clears `progress` and `blocker_reason`; deliverable flags survive.
    #[must_use]
    pub fn instantiate(&self) -> Vec<Phase> {
        self.phases
            .iter()
            .cloned()
            .map(|mut phase| {
                for item in &mut phase.items {
                    item.status = ItemStatus::NotStarted;
                    item.progress = None;
                    item.blocker_reason = None;
                }
                phase
            })
            .collect()
    }
}

impl Roadmap {
    /// Append a template's phases to this roadmap
    #[must_use]
    pub fn with_template_phases(mut self, template: &TemplateDefinition) -> Self {
        self.phases.extend(template.instantiate());
        self
    }
}

fn todo(id: &str, title: &str) -> Item {
    Item::new(id, title, ItemStatus::NotStarted)
}

/// All bundled templates
#[must_use]
pub fn templates() -> Vec<TemplateDefinition> {
    vec![
        TemplateDefinition {
            id: "sidecar_v1_templates",
            name: "Side-Car V1 Templates",
            description: "Meta templates for tracking Side-Car delivery milestones.",
            emoji: "🛵",
            phases: vec![Phase::new(
                "tpl_sidecar_v1",
                "Side-Car V1 Scope",
                vec![
                    todo("tpl_p5_1", "P5.1 — Dogfood sample roadmap").deliverable(),
                    todo("tpl_p5_2", "P5.2 — Templates library + insert").deliverable(),
                    todo("tpl_p5_3", "P5.3 — Share semantics + export JSON").deliverable(),
                    todo("tpl_p5_4", "P5.4 — Emoji source-of-truth").deliverable(),
                ],
            )
            .with_desc("Deliverables to complete V1")],
        },
        TemplateDefinition {
            id: "product_launch",
            name: "Product Launch",
            description: "Plan, build, and launch a product with checkpoints.",
            emoji: "🚀",
            phases: vec![
                Phase::new(
                    "tpl_discovery",
                    "Discovery",
                    vec![
                        todo("tpl_discovery_scope", "Define scope + success metrics").deliverable(),
                        todo("tpl_discovery_risks", "Identify risks + mitigations"),
                        todo("tpl_discovery_inputs", "Collect required inputs"),
                    ],
                )
                .with_desc("Scope, success metrics, and risks"),
                Phase::new(
                    "tpl_build",
                    "Build",
                    vec![
                        todo("tpl_build_core", "Build core feature set").deliverable(),
                        todo("tpl_build_qa", "QA pass + fixes"),
                    ],
                )
                .with_desc("Implement core functionality"),
                Phase::new(
                    "tpl_launch",
                    "Launch",
                    vec![
                        todo("tpl_launch_release", "Release package").deliverable(),
                        todo("tpl_launch_verify", "Post-launch verification"),
                    ],
                )
                .with_desc("Ship and validate"),
            ],
        },
        TemplateDefinition {
            id: "app_build",
            name: "App Build",
            description: "Design → Develop → QA for application delivery.",
            emoji: "📱",
            phases: vec![
                Phase::new(
                    "tpl_design",
                    "Design",
                    vec![
                        todo("tpl_design_flow", "User flows + IA").deliverable(),
                        todo("tpl_design_ui", "UI system + screens"),
                    ],
                )
                .with_desc("UX + visual system"),
                Phase::new(
                    "tpl_develop",
                    "Develop",
                    vec![
                        todo("tpl_dev_core", "Core implementation").deliverable(),
                        todo("tpl_dev_integrations", "Integrations + data"),
                    ],
                )
                .with_desc("Core features + integrations"),
                Phase::new(
                    "tpl_qa",
                    "QA + Release",
                    vec![
                        todo("tpl_qa_pass", "QA pass"),
                        todo("tpl_release", "Release package").deliverable(),
                    ],
                )
                .with_desc("Testing + launch"),
            ],
        },
    ]
}

/// Look up a template by id
///
/// # Errors
/// Returns [`ModelError::UnknownTemplate`] if no template has this id.
pub fn find_template(id: &str) -> Result<TemplateDefinition, ModelError> {
    templates()
        .into_iter()
        .find(|t| t.id == id)
        .ok_or_else(|| ModelError::UnknownTemplate(id.to_string()))
}
