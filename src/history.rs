//! Bounded-history recurrence detection over recent generations.

use std::collections::VecDeque;

/// How many past generations are retained for loop detection. A recurrence
/// of any period up to this length is caught.
pub const HISTORY_LENGTH: usize = 3;

/// Sliding window of the most recent grid states.
///
/// Snapshots are ordered oldest to newest. Once the window is full, the
/// evicted buffer is reused for the incoming snapshot, so steady-state
/// observation does not allocate.
#[derive(Debug, Default)]
pub struct HistoryTracker {
    window: VecDeque<Vec<bool>>,
}

impl HistoryTracker {
    pub fn new() -> Self {
        Self {
            window: VecDeque::with_capacity(HISTORY_LENGTH),
        }
    }

    /// Number of snapshots currently held (less than the full length
    /// during the first few ticks of a run).
    pub fn len(&self) -> usize {
        self.window.len()
    }

    pub fn is_empty(&self) -> bool {
        self.window.is_empty()
    }

    /// Compare a freshly completed generation against the stored window.
    ///
    /// Returns `Some(age)` if the state matches a stored snapshot, where
    /// `age` is the number of ticks since that snapshot was produced (the
    /// previous generation has age 1). Otherwise records the state as the
    /// newest snapshot, dropping the oldest if the window is full, and
    /// returns `None`.
    pub fn observe(&mut self, cells: &[bool]) -> Option<usize> {
        for (i, snapshot) in self.window.iter().enumerate() {
            if snapshot[..] == cells[..] {
                return Some(self.window.len() - i);
            }
        }

        let mut snapshot = if self.window.len() == HISTORY_LENGTH {
            self.window.pop_front().unwrap_or_default()
        } else {
            Vec::with_capacity(cells.len())
        };
        snapshot.clear();
        snapshot.extend_from_slice(cells);
        self.window.push_back(snapshot);
        None
    }

    /// Forget everything, e.g. after the grid is reseeded.
    pub fn clear(&mut self) {
        self.window.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(bits: &[u8]) -> Vec<bool> {
        bits.iter().map(|&b| b != 0).collect()
    }

    #[test]
    fn test_no_match_while_window_fills() {
        let mut tracker = HistoryTracker::new();
        assert_eq!(tracker.observe(&state(&[1, 0, 0])), None);
        assert_eq!(tracker.observe(&state(&[0, 1, 0])), None);
        assert_eq!(tracker.observe(&state(&[0, 0, 1])), None);
        assert_eq!(tracker.len(), HISTORY_LENGTH);
    }

    #[test]
    fn test_period_two_detected_at_the_right_generation() {
        // Generation n equals generation n-2: detection fires exactly at n,
        // with age 2, not during the warmup observations before it.
        let a = state(&[1, 0, 1, 0]);
        let b = state(&[0, 1, 0, 1]);

        let mut tracker = HistoryTracker::new();
        assert_eq!(tracker.observe(&a), None);
        assert_eq!(tracker.observe(&b), None);
        assert_eq!(tracker.observe(&a), Some(2));
    }

    #[test]
    fn test_fixed_point_has_age_one() {
        let s = state(&[1, 1, 0, 0]);
        let mut tracker = HistoryTracker::new();
        assert_eq!(tracker.observe(&s), None);
        assert_eq!(tracker.observe(&s), Some(1));
    }

    #[test]
    fn test_oldest_match_in_full_window_has_age_three() {
        let a = state(&[1, 0, 0]);
        let b = state(&[0, 1, 0]);
        let c = state(&[0, 0, 1]);

        let mut tracker = HistoryTracker::new();
        tracker.observe(&a);
        tracker.observe(&b);
        tracker.observe(&c);
        assert_eq!(tracker.observe(&a), Some(3));
    }

    #[test]
    fn test_window_slides_past_old_states() {
        let a = state(&[1, 0, 0]);
        let b = state(&[0, 1, 0]);
        let c = state(&[0, 0, 1]);
        let d = state(&[1, 1, 1]);

        let mut tracker = HistoryTracker::new();
        tracker.observe(&a);
        tracker.observe(&b);
        tracker.observe(&c);
        assert_eq!(tracker.observe(&d), None); // a evicted here
        assert_eq!(tracker.observe(&a), None); // so a is new again
    }

    #[test]
    fn test_clear_forgets_the_window() {
        let s = state(&[1, 0]);
        let mut tracker = HistoryTracker::new();
        tracker.observe(&s);
        tracker.clear();

        assert!(tracker.is_empty());
        assert_eq!(tracker.observe(&s), None);
    }
}
