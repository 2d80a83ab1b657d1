//! Roadmap summary figures for the hero panel

use crate::rollup::{roadmap_progress, Percent};
use serde::{Deserialize, Serialize};
use sidecar_model::{ItemStatus, Roadmap};

/// Default character limit for up-next titles
pub const UP_NEXT_TITLE_LIMIT: usize = 60;

/// Item counts and overall progress of one roadmap
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoadmapStats {
    pub total: usize,
    pub done: usize,
    pub blocked: usize,
    pub overall: Percent,
}

impl RoadmapStats {
    /// Items not yet done
    #[inline]
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.total - self.done
    }
}

/// Count items by status and attach [`roadmap_progress`]
#[must_use]
pub fn roadmap_stats(roadmap: &Roadmap) -> RoadmapStats {
    roadmap.items().fold(
        RoadmapStats {
            overall: roadmap_progress(roadmap),
            ..RoadmapStats::default()
        },
        |mut stats, item| {
            stats.total += 1;
            match item.status {
                ItemStatus::Done => stats.done += 1,
                ItemStatus::Blocked => stats.blocked += 1,
                _ => {}
            }
            stats
        },
    )
}

/// Truncate to `limit` characters, appending `...` when shortened
#[must_use]
pub fn truncate_title(title: &str, limit: usize) -> String {
    match title.char_indices().nth(limit) {
        Some((cut, _)) => format!("{}...", &title[..cut]),
        None => title.to_string(),
    }
}
