//! Progress rollups
//!
//! Each level is either computed from its children or pinned by an
//! explicit override. Means are unweighted: a phase with one item counts
//! the same as a phase with fifty.
//!
//! These functions accept partially invalid trees and degrade to safe
//! defaults instead of failing.

use sidecar_model::{Item, ItemStatus, Phase, Roadmap};

/// Progress value, always within `0..=100`
pub type Percent = u8;

/// Clamp to `0..=100` and round half away from zero; NaN reads as 0
#[must_use]
pub fn to_percent(value: f64) -> Percent {
    if value.is_nan() {
        return 0;
    }
    // clamped and rounded, so the cast cannot truncate
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let percent = value.clamp(0.0, 100.0).round() as Percent;
    percent
}

/// Progress of a single item
///
/// `done` is always 100 and `not_started` always 0, whatever `progress`
/// holds. `in_progress` and `blocked` use `progress` (absent reads as 0).
/// Unknown statuses read as 0.
#[must_use]
pub fn item_progress(item: &Item) -> Percent {
    match item.status {
        ItemStatus::Done => 100,
        ItemStatus::NotStarted | ItemStatus::Unknown => 0,
        ItemStatus::InProgress | ItemStatus::Blocked => item.progress.map_or(0, to_percent),
    }
}

/// Progress of a phase: override, or the mean of its items
#[must_use]
pub fn phase_progress(phase: &Phase) -> Percent {
    if let (false, Some(value)) = (phase.computes_progress(), phase.phase_progress_override) {
        return to_percent(value);
    }
    rounded_mean(phase.items.iter().map(item_progress))
}

/// Progress of a roadmap: override, or the mean of its phases
#[must_use]
pub fn roadmap_progress(roadmap: &Roadmap) -> Percent {
    if let (false, Some(value)) = (roadmap.computes_progress(), roadmap.overall_progress_override) {
        return to_percent(value);
    }
    rounded_mean(roadmap.phases.iter().map(phase_progress))
}

/// Deliverable-only completion of a roadmap
///
/// Counts deliverables that are `done` against all deliverables, so a
/// deliverable at 90% contributes nothing. Without deliverables this is
/// [`roadmap_progress`].
#[must_use]
pub fn master_progress(roadmap: &Roadmap) -> Percent {
    let (done, total) = roadmap
        .items()
        .filter(|item| item.is_deliverable())
        .fold((0usize, 0usize), |(done, total), item| {
            (done + usize::from(item.status == ItemStatus::Done), total + 1)
        });
    if total == 0 {
        return roadmap_progress(roadmap);
    }
    #[allow(clippy::cast_precision_loss)]
    let ratio = done as f64 / total as f64;
    to_percent(ratio * 100.0)
}

/// Rounded arithmetic mean; an empty sequence is 0
fn rounded_mean(values: impl Iterator<Item = Percent>) -> Percent {
    let (sum, count) = values.fold((0u64, 0u64), |(sum, count), value| {
        (sum + u64::from(value), count + 1)
    });
    if count == 0 {
        return 0;
    }
    #[allow(clippy::cast_precision_loss)]
    let mean = sum as f64 / count as f64;
    to_percent(mean)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sidecar_test_utils::roadmap_of;

    fn in_progress(id: &str, progress: f64) -> Item {
        Item::new(id, id, ItemStatus::InProgress).with_progress(progress)
    }

    #[test]
    fn done_is_always_100() {
        let mut item = Item::new("a", "A", ItemStatus::Done);
        assert_eq!(item_progress(&item), 100);
        item.progress = Some(-40.0);
        assert_eq!(item_progress(&item), 100);
        item.progress = Some(f64::NAN);
        assert_eq!(item_progress(&item), 100);
    }

    #[test]
    fn not_started_and_unknown_are_zero() {
        let item = Item::new("a", "A", ItemStatus::NotStarted).with_progress(80.0);
        assert_eq!(item_progress(&item), 0);
        let item = Item::new("a", "A", ItemStatus::Unknown).with_progress(80.0);
        assert_eq!(item_progress(&item), 0);
    }

    #[test]
    fn partial_statuses_clamp_progress() {
        assert_eq!(item_progress(&in_progress("a", 150.0)), 100);
        assert_eq!(item_progress(&in_progress("a", -3.0)), 0);
        assert_eq!(item_progress(&in_progress("a", 42.0)), 42);
        let blocked = Item::new("b", "B", ItemStatus::Blocked);
        assert_eq!(item_progress(&blocked), 0);
    }

    #[test]
    fn phase_is_unweighted_mean() {
        let phase = Phase::new(
            "p",
            "P",
            vec![
                Item::new("a", "A", ItemStatus::Done),
                in_progress("b", 60.0),
                in_progress("c", 40.0),
                Item::new("d", "D", ItemStatus::NotStarted),
                Item::new("e", "E", ItemStatus::Blocked).with_progress(10.0),
            ],
        );
        assert_eq!(phase_progress(&phase), 42);
    }

    #[test]
    fn empty_phase_is_zero() {
        assert_eq!(phase_progress(&Phase::new("p", "P", vec![])), 0);
    }

    #[test]
    fn phase_override_wins_when_compute_disabled() {
        let phase = Phase::new("p", "P", vec![Item::new("a", "A", ItemStatus::Done)]).with_override(42.0);
        assert_eq!(phase_progress(&phase), 42);

        let pinned_high = Phase::new("p", "P", vec![]).with_override(140.0);
        assert_eq!(phase_progress(&pinned_high), 100);
    }

    #[test]
    fn phase_override_ignored_without_flag_or_value() {
        let mut phase = Phase::new("p", "P", vec![Item::new("a", "A", ItemStatus::Done)]);
        phase.phase_progress_override = Some(5.0);
        assert_eq!(phase_progress(&phase), 100);

        phase.phase_progress_override = None;
        phase.compute_phase_progress = Some(false);
        assert_eq!(phase_progress(&phase), 100);
    }

    #[test]
    fn roadmap_averages_phases_not_items() {
        let roadmap = roadmap_of(vec![
            vec![Item::new("a", "A", ItemStatus::Done)],
            vec![
                Item::new("b", "B", ItemStatus::NotStarted),
                Item::new("c", "C", ItemStatus::NotStarted),
                Item::new("d", "D", ItemStatus::NotStarted),
            ],
        ]);
        assert_eq!(roadmap_progress(&roadmap), 50);
    }

    #[test]
    fn roadmap_rounds_half_away_from_zero() {
        let roadmap = roadmap_of(vec![
            vec![in_progress("a", 70.0), in_progress("b", 55.0)],
        ]);
        assert_eq!(roadmap_progress(&roadmap), 63);
    }

    #[test]
    fn roadmap_override_and_empty() {
        let roadmap = roadmap_of(vec![vec![Item::new("a", "A", ItemStatus::Done)]]).with_override(12.0);
        assert_eq!(roadmap_progress(&roadmap), 12);
        assert_eq!(roadmap_progress(&roadmap_of(vec![])), 0);
    }

    #[test]
    fn master_counts_done_deliverables_only() {
        let roadmap = roadmap_of(vec![
            vec![Item::new("a", "A", ItemStatus::Done).deliverable()],
            vec![
                in_progress("b", 50.0).deliverable(),
                in_progress("c", 50.0).deliverable(),
                Item::new("d", "D", ItemStatus::Done),
            ],
        ]);
        assert_eq!(master_progress(&roadmap), 33);
    }

    #[test]
    fn master_falls_back_to_roadmap_progress() {
        let roadmap = roadmap_of(vec![vec![in_progress("a", 30.0), Item::new("b", "B", ItemStatus::Done)]]);
        assert_eq!(master_progress(&roadmap), roadmap_progress(&roadmap));

        let pinned = roadmap.with_override(7.0);
        assert_eq!(master_progress(&pinned), 7);
    }

    #[test]
    fn master_ignores_roadmap_override_when_deliverables_exist() {
        let roadmap = roadmap_of(vec![vec![Item::new("a", "A", ItemStatus::Done).deliverable()]]).with_override(3.0);
        assert_eq!(master_progress(&roadmap), 100);
    }

    #[test]
    fn to_percent_handles_edges() {
        assert_eq!(to_percent(f64::NAN), 0);
        assert_eq!(to_percent(f64::INFINITY), 100);
        assert_eq!(to_percent(f64::NEG_INFINITY), 0);
        assert_eq!(to_percent(12.5), 13);
        assert_eq!(to_percent(12.49), 12);
    }
}
