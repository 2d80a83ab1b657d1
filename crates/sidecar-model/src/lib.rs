//! Side-Car contract model
//!
//! Typed tree for the `sidecar_roadmap_v1` render contract.
//!
//! # Core Concepts
//!
//! - [`Payload`]: root document, a non-empty list of [`Project`]s
//! - [`Roadmap`], [`Phase`], [`Item`]: the nested levels, in input order
//! - [`ItemStatus`]: the four contract statuses plus a lenient `Unknown`
//! - [`FieldPath`]: locator used in validation reports
//!
//! # Example
//!
//! ```rust,ignore
//! use sidecar_model::{sample_payload, CONTRACT_VERSION};
//!
//! let sample = sample_payload()?;
//! assert_eq!(sample.contract_version, CONTRACT_VERSION);
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

mod datasets;
mod error;
mod path;
mod serde_helpers;
mod template;
mod types;

pub use datasets::{
    full_payload_json, invalid_payload, sample_payload, sample_payload_json, FULL_JSON, SAMPLE_JSON,
};
pub use error::ModelError;
pub use path::FieldPath;
pub use template::{find_template, templates, TemplateDefinition};
pub use types::{Item, ItemStatus, Payload, Phase, Project, Roadmap, CONTRACT_VERSION};
