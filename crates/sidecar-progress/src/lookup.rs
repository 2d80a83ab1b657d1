//! Current-item lookups
//!
//! Two traversal strategies with different call sites:
//! - [`first_incomplete_item`]: strict document order
//! - [`up_next`]: status tiers (blocked, then in progress, then not started)
//!
//! Both skip items explicitly marked `is_unlocked: false`.

use sidecar_model::{Item, ItemStatus, Phase, Roadmap};

/// An item together with the phase that owns it
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ItemLocator<'a> {
    pub phase: &'a Phase,
    pub item: &'a Item,
}

impl<'a> ItemLocator<'a> {
    #[inline]
    #[must_use]
    pub fn phase_id(&self) -> &'a str {
        &self.phase.phase_id
    }

    #[inline]
    #[must_use]
    pub fn item_id(&self) -> &'a str {
        &self.item.item_id
    }
}

/// Filters for [`up_next`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UpNextOptions {
    /// Client view: only deliverables are candidates
    pub deliverables_only: bool,
}

impl UpNextOptions {
    #[inline]
    #[must_use]
    pub fn client_view() -> Self {
        Self {
            deliverables_only: true,
        }
    }
}

const TIERS: [ItemStatus; 3] = [
    ItemStatus::Blocked,
    ItemStatus::InProgress,
    ItemStatus::NotStarted,
];

fn locate(roadmap: &Roadmap) -> impl Iterator<Item = ItemLocator<'_>> {
    roadmap
        .phases
        .iter()
        .flat_map(|phase| phase.items.iter().map(move |item| ItemLocator { phase, item }))
}

/// First unlocked item that is not `done`, in document order
#[must_use]
pub fn first_incomplete_item(roadmap: &Roadmap) -> Option<ItemLocator<'_>> {
    locate(roadmap).find(|found| found.item.is_unlocked() && found.item.status != ItemStatus::Done)
}

/// Next item to work on, by status tier
///
/// Each tier is a full pass over the tree in document order, so a blocked
/// item in the last phase beats an in-progress item in the first.
#[must_use]
pub fn up_next(roadmap: &Roadmap, options: UpNextOptions) -> Option<ItemLocator<'_>> {
    TIERS.iter().find_map(|&tier| {
        locate(roadmap).find(|found| {
            let item = found.item;
            item.status == tier
                && item.is_unlocked()
                && (!options.deliverables_only || item.is_deliverable())
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use sidecar_test_utils::roadmap_of;

    #[test]
    fn document_order_skips_locked_items() {
        let roadmap = roadmap_of(vec![vec![
            Item::new("a", "A", ItemStatus::NotStarted).locked("needs b"),
            Item::new("b", "B", ItemStatus::InProgress).with_progress(10.0),
        ]]);
        assert_eq!(first_incomplete_item(&roadmap).map(|f| f.item_id()), Some("b"));
    }

    #[test]
    fn document_order_skips_done_across_phases() {
        let roadmap = roadmap_of(vec![
            vec![Item::new("a", "A", ItemStatus::Done)],
            vec![Item::new("b", "B", ItemStatus::Done), Item::new("c", "C", ItemStatus::NotStarted)],
        ]);
        let found = first_incomplete_item(&roadmap).unwrap();
        assert_eq!((found.phase_id(), found.item_id()), ("ph1", "c"));
    }

    #[test]
    fn document_order_returns_none_when_complete() {
        let roadmap = roadmap_of(vec![vec![
            Item::new("a", "A", ItemStatus::Done),
            Item::new("b", "B", ItemStatus::Blocked).locked("gate"),
        ]]);
        assert!(first_incomplete_item(&roadmap).is_none());
    }

    #[test]
    fn document_order_treats_unknown_status_as_incomplete() {
        let roadmap = roadmap_of(vec![vec![Item::new("a", "A", ItemStatus::Unknown)]]);
        assert_eq!(first_incomplete_item(&roadmap).map(|f| f.item_id()), Some("a"));
    }

    #[test]
    fn up_next_prefers_blocked_anywhere() {
        let roadmap = roadmap_of(vec![
            vec![
                Item::new("a", "A", ItemStatus::NotStarted),
                Item::new("b", "B", ItemStatus::InProgress).with_progress(20.0),
            ],
            vec![Item::new("c", "C", ItemStatus::Blocked).with_progress(5.0)],
        ]);
        assert_eq!(up_next(&roadmap, UpNextOptions::default()).map(|f| f.item_id()), Some("c"));
        assert_eq!(first_incomplete_item(&roadmap).map(|f| f.item_id()), Some("a"));
    }

    #[test]
    fn up_next_falls_through_tiers() {
        let roadmap = roadmap_of(vec![vec![
            Item::new("a", "A", ItemStatus::NotStarted),
            Item::new("b", "B", ItemStatus::Blocked).locked("later"),
            Item::new("c", "C", ItemStatus::InProgress).with_progress(20.0),
        ]]);
        assert_eq!(up_next(&roadmap, UpNextOptions::default()).map(|f| f.item_id()), Some("c"));
    }

    #[test]
    fn up_next_ignores_unknown_status() {
        let roadmap = roadmap_of(vec![vec![
            Item::new("a", "A", ItemStatus::Unknown),
            Item::new("b", "B", ItemStatus::Done),
        ]]);
        assert!(up_next(&roadmap, UpNextOptions::default()).is_none());
    }

    #[test]
    fn client_view_only_considers_deliverables() {
        let roadmap = roadmap_of(vec![vec![
            Item::new("a", "A", ItemStatus::Blocked).with_progress(5.0),
            Item::new("b", "B", ItemStatus::NotStarted).deliverable(),
        ]]);
        assert_eq!(up_next(&roadmap, UpNextOptions::default()).map(|f| f.item_id()), Some("a"));
        assert_eq!(up_next(&roadmap, UpNextOptions::client_view()).map(|f| f.item_id()), Some("b"));
    }
}
