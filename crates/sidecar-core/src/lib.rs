//! Side-Car Core - dashboard orchestration
//!
//! Ties the contract model, validator and progress aggregator together:
//! - Validates incoming documents and adopts only error-free ones
//! - Keeps the previous tree when an import is rejected
//! - Tracks the selected project and roadmap
//! - Follows live feeds (polled files, line streams)
//!
//! # Example
//!
//! ```rust,ignore
//! use sidecar_core::{Dashboard, IngestOutcome, SidecarConfig};
//!
//! let mut dashboard = Dashboard::new(SidecarConfig::new())?;
//! match dashboard.ingest_text(&text) {
//!     IngestOutcome::Adopted { warnings } => println!("{} warnings", warnings.len()),
//!     IngestOutcome::Rejected { result } => println!("{} errors", result.errors.len()),
//! }
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

pub mod config;
pub mod dashboard;
pub mod error;
pub mod feed;

pub use config::{FeedConfig, SidecarConfig};
pub use dashboard::{
    Dashboard, DashboardHandle, IngestOutcome, PrimaryAction, Selection, UP_NEXT_CLEAR,
};
pub use error::SidecarError;
pub use feed::{run_feed, FeedSummary, LineStreamSource, PayloadSource, PollingSource};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for driving a Side-Car dashboard
    pub use crate::{
        Dashboard, DashboardHandle, IngestOutcome, PayloadSource, SidecarConfig, SidecarError,
    };
    pub use sidecar_model::{Item, ItemStatus, Payload, Phase, Project, Roadmap};
    pub use sidecar_progress::{master_progress, roadmap_progress, up_next, UpNextOptions};
    pub use sidecar_validation::{parse_and_validate, validate, ValidationResult};
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
