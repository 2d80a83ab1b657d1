//! Side-Car progress aggregation
//!
//! Collapses a roadmap tree into numeric progress:
//!
//! - [`item_progress`]: status and `progress` folded into 0–100
//! - [`phase_progress`], [`roadmap_progress`]: unweighted means, or an
//!   explicit override when the level's `compute_*` flag is `false`
//! - [`master_progress`]: done/total over deliverables only
//!
//! plus the two current-item lookups used by the dashboard.
//!
//! All functions are pure and never fail; they tolerate trees that
//! skipped validation.

#![warn(unreachable_pub)]
#![allow(missing_docs)]

mod lookup;
mod rollup;
mod stats;

pub use lookup::{first_incomplete_item, up_next, ItemLocator, UpNextOptions};
pub use rollup::{item_progress, master_progress, phase_progress, roadmap_progress, to_percent, Percent};
pub use stats::{roadmap_stats, truncate_title, RoadmapStats, UP_NEXT_TITLE_LIMIT};
