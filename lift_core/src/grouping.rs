//! Classification of a workout log into sets, drop sets and supersets.
//!
//! The grouper walks the entries once. At every position it tries three
//! strategies in fixed precedence:
//!
//! 1. **Drop set**: same exercise, strictly decreasing weight (or duration
//!    when weights are missing), no rest in between
//! 2. **Superset**: a cycle of two or more exercises repeated back-to-back
//! 3. **Set**: a run of the same exercise (always succeeds)
//!
//! The first strategy that accepts the position emits one group and the
//! cursor moves past the entries it consumed. Groups borrow contiguous
//! slices of the input, so concatenating them gives back the input.

use crate::{Entry, ExerciseName};
use serde::Serialize;

/// Discriminant of a [`Group`], handy for logging and comparisons
#[derive(Clone, Copy, Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum GroupKind {
    Set,
    DropSet,
    Superset,
}

/// A run of consecutive entries classified together
#[derive(Clone, Debug, Serialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Group<'a> {
    /// Same exercise performed back-to-back
    Set { entries: &'a [Entry] },
    /// Same exercise, decreasing intensity, no rest (at least two entries)
    DropSet { entries: &'a [Entry] },
    /// `entries.len() / cycle_length` repetitions of the same exercise cycle
    Superset {
        entries: &'a [Entry],
        cycle_length: usize,
    },
}

impl<'a> Group<'a> {
    pub fn kind(&self) -> GroupKind {
        match self {
            Group::Set { .. } => GroupKind::Set,
            Group::DropSet { .. } => GroupKind::DropSet,
            Group::Superset { .. } => GroupKind::Superset,
        }
    }

    pub fn entries(&self) -> &'a [Entry] {
        match *self {
            Group::Set { entries }
            | Group::DropSet { entries }
            | Group::Superset { entries, .. } => entries,
        }
    }

    pub fn len(&self) -> usize {
        self.entries().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries().is_empty()
    }

    /// The group's identity: the name of its first entry
    pub fn id(&self) -> Option<&'a ExerciseName> {
        self.entries().first().map(|entry| &entry.name)
    }

    /// Number of exercises per cycle, for supersets only
    pub fn cycle_length(&self) -> Option<usize> {
        match self {
            Group::Superset { cycle_length, .. } => Some(*cycle_length),
            Group::Set { .. } | Group::DropSet { .. } => None,
        }
    }
}

/// Partition an ordered workout log into groups
///
/// Entries must already be in the order they were performed; they are never
/// re-sorted. The result covers every entry exactly once, in order.
pub fn group_entries(entries: &[Entry]) -> Vec<Group<'_>> {
    let mut groups = Vec::new();
    let mut cursor = 0;

    while cursor < entries.len() {
        let group = drop_set_at(entries, cursor)
            .or_else(|| superset_at(entries, cursor))
            .unwrap_or_else(|| set_at(entries, cursor));

        tracing::debug!(
            "Grouped {} entries starting at {} as {:?}",
            group.len(),
            cursor,
            group.kind()
        );

        cursor += group.len();
        groups.push(group);
    }

    groups
}

/// Find the group whose id is the given exercise
pub fn find_group<'g, 'a>(groups: &'g [Group<'a>], name: &str) -> Option<&'g Group<'a>> {
    let name = ExerciseName::new(name);
    groups.iter().find(|group| group.id() == Some(&name))
}

/// End (exclusive) of the run starting at `start` while `continues(prev, next)` holds
fn run_end(entries: &[Entry], start: usize, continues: impl Fn(&Entry, &Entry) -> bool) -> usize {
    let mut end = start + 1;
    while end < entries.len() && continues(&entries[end - 1], &entries[end]) {
        end += 1;
    }
    end
}

/// Drop set starting at `start`, or `None` if the next entry doesn't continue it
fn drop_set_at(entries: &[Entry], start: usize) -> Option<Group<'_>> {
    let end = run_end(entries, start, continues_drop_set);
    (end - start >= 2).then(|| Group::DropSet {
        entries: &entries[start..end],
    })
}

/// `next` continues a drop set after `prev`
///
/// A rest after `prev` means a separate effort, even if intensity drops.
fn continues_drop_set(prev: &Entry, next: &Entry) -> bool {
    next.name == prev.name && prev.rest.is_none() && is_step_down(prev, next)
}

/// Strictly lower weight, or strictly lower duration when either weight is missing
fn is_step_down(prev: &Entry, next: &Entry) -> bool {
    match (&prev.weight, &next.weight) {
        (Some(before), Some(after)) => before > after,
        _ => match (&prev.duration, &next.duration) {
            (Some(before), Some(after)) => before > after,
            _ => false,
        },
    }
}

/// Superset starting at `start`, using the shortest cycle that repeats
fn superset_at(entries: &[Entry], start: usize) -> Option<Group<'_>> {
    let remaining = entries.len().saturating_sub(start);

    for cycle_length in 2..remaining {
        let cycle = &entries[start..start + cycle_length];

        // A single repeated name is a set or a drop set, never a superset
        if cycle.iter().all(|entry| entry.name == cycle[0].name) {
            return None;
        }

        let mut end = start + cycle_length;
        let mut repeats = 1;
        while end + cycle_length <= entries.len()
            && same_names(cycle, &entries[end..end + cycle_length])
        {
            end += cycle_length;
            repeats += 1;
        }

        if repeats >= 2 {
            return Some(Group::Superset {
                entries: &entries[start..end],
                cycle_length,
            });
        }
    }

    None
}

fn same_names(a: &[Entry], b: &[Entry]) -> bool {
    a.iter().zip(b).all(|(x, y)| x.name == y.name)
}

/// Run of the same exercise starting at `start` (at least one entry)
fn set_at(entries: &[Entry], start: usize) -> Group<'_> {
    let end = run_end(entries, start, |prev, next| next.name == prev.name);
    Group::Set {
        entries: &entries[start..end],
    }
}
