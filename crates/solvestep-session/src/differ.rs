//! Minimal-mutation diffing of displayed digits.

use std::collections::BTreeMap;

use solvestep_core::{Coords, Digit};

/// The three disjoint operation sets separating one displayed assignment
/// set from the next, to be applied in field order: removals first, then
/// additions, then changes (each change as remove-then-add).
///
/// Applying changes as remove-then-add means the display never receives an
/// add for an already-occupied cell.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DisplayDiff {
    /// Cells displayed now but absent from the incoming set.
    pub removals: Vec<Coords>,
    /// Cells absent now but present in the incoming set, with their digit.
    pub additions: Vec<(Coords, Digit)>,
    /// Cells present in both sets with a different digit, with the new one.
    pub changes: Vec<(Coords, Digit)>,
}

impl DisplayDiff {
    /// Returns whether the diff performs no operations.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.removals.is_empty() && self.additions.is_empty() && self.changes.is_empty()
    }
}

/// Computes the minimal operations taking `current` to `incoming`.
///
/// A pure three-way set difference/intersection keyed by [`Coords`]; the
/// digit participates only in deciding whether an intersecting cell
/// changed. Operation order within each set follows the map's coordinate
/// order, which keeps output deterministic for tests.
///
/// # Examples
///
/// ```
/// use std::collections::BTreeMap;
///
/// use solvestep_core::{Coords, Digit};
/// use solvestep_session::diff_displayed;
///
/// let current = BTreeMap::from([(Coords::new(0, 0), Digit::D1)]);
/// let incoming = BTreeMap::from([(Coords::new(0, 0), Digit::D2)]);
///
/// let diff = diff_displayed(&current, &incoming);
/// assert!(diff.removals.is_empty());
/// assert!(diff.additions.is_empty());
/// assert_eq!(diff.changes, vec![(Coords::new(0, 0), Digit::D2)]);
/// ```
#[must_use]
pub fn diff_displayed(
    current: &BTreeMap<Coords, Digit>,
    incoming: &BTreeMap<Coords, Digit>,
) -> DisplayDiff {
    let mut diff = DisplayDiff::default();

    for coords in current.keys() {
        if !incoming.contains_key(coords) {
            diff.removals.push(*coords);
        }
    }
    for (coords, digit) in incoming {
        match current.get(coords) {
            None => diff.additions.push((*coords, *digit)),
            Some(shown) if shown != digit => diff.changes.push((*coords, *digit)),
            Some(_) => {}
        }
    }

    diff
}
