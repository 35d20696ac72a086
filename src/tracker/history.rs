// Fri Oct 16 2026 - Alex

use crate::memory::OffsetSet;
use crate::tracker::SearchStatus;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Observation {
    pub value: i64,
    pub offsets: OffsetSet,
}

/// Append-only record of every scan taken for one tracked quantity.
///
/// The intersection of all recorded sets is folded in as each observation
/// arrives; `recompute` rebuilds it from scratch and always agrees.
#[derive(Debug, Clone, Default)]
pub struct ObservationHistory {
    observations: Vec<Observation>,
    running: Option<OffsetSet>,
}

impl ObservationHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, value: i64, offsets: OffsetSet) -> SearchStatus {
        match self.running.as_mut() {
            Some(running) => running.intersect_in_place(&offsets),
            None => self.running = Some(offsets.clone()),
        }
        self.observations.push(Observation { value, offsets });
        self.status()
    }

    pub fn len(&self) -> usize {
        self.observations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    pub fn last(&self) -> Option<&Observation> {
        self.observations.last()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Observation> {
        self.observations.iter()
    }

    pub fn clear(&mut self) {
        self.observations.clear();
        self.running = None;
    }

    /// Offsets present in every observation. Empty when nothing was observed.
    pub fn intersection(&self) -> OffsetSet {
        self.running.clone().unwrap_or_default()
    }

    pub fn recompute(&self) -> OffsetSet {
        let mut sets = self.observations.iter().map(|o| &o.offsets);
        match sets.next() {
            Some(first) => sets.fold(first.clone(), |acc, next| acc.intersect(next)),
            None => OffsetSet::new(),
        }
    }

    pub fn status(&self) -> SearchStatus {
        let last = match self.observations.last() {
            Some(last) => last,
            None => return SearchStatus::Pending,
        };
        if last.offsets.is_empty() {
            return SearchStatus::NoMatch;
        }

        let running = match self.running.as_ref() {
            Some(running) => running,
            None => return SearchStatus::Ambiguous,
        };
        match running.single() {
            Some(offset) => SearchStatus::Converged { offset },
            None if running.is_empty() => SearchStatus::Ambiguous,
            None => SearchStatus::Narrowing { candidate_count: running.len() },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(items: &[usize]) -> OffsetSet {
        items.iter().copied().collect()
    }

    fn history(sets: &[&[usize]]) -> ObservationHistory {
        let mut history = ObservationHistory::new();
        for (i, items) in sets.iter().enumerate() {
            history.push(i as i64, set(items));
        }
        history
    }

    #[test]
    fn test_empty_history_has_empty_intersection() {
        let history = ObservationHistory::new();
        assert!(history.intersection().is_empty());
        assert!(history.recompute().is_empty());
        assert_eq!(history.status(), SearchStatus::Pending);
    }

    #[test]
    fn test_single_observation_is_its_own_intersection() {
        let history = history(&[&[0, 2, 4, 6]]);
        assert_eq!(history.intersection(), set(&[0, 2, 4, 6]));
        assert_eq!(history.status(), SearchStatus::Narrowing { candidate_count: 4 });
    }

    #[test]
    fn test_incremental_matches_recompute() {
        let history = history(&[&[1, 3, 5, 7, 9, 11], &[3, 5, 9, 11, 13], &[0, 5, 9, 11], &[9, 11, 20]]);
        assert_eq!(history.intersection(), history.recompute());
        assert_eq!(history.intersection(), set(&[9, 11]));
    }

    #[test]
    fn test_order_independent() {
        let a: &[usize] = &[1, 2, 3, 4, 5];
        let b: &[usize] = &[2, 4, 5, 8];
        let c: &[usize] = &[4, 5, 6];
        let expected = set(a).intersect(&set(b)).intersect(&set(c));

        for order in [[a, b, c], [a, c, b], [b, a, c], [b, c, a], [c, a, b], [c, b, a]] {
            let history = history(&order);
            assert_eq!(history.intersection(), expected);
            assert_eq!(history.recompute(), expected);
        }
    }

    #[test]
    fn test_empty_observation_reports_no_match_then_ambiguous() {
        let mut history = history(&[&[1, 2, 3]]);
        assert_eq!(history.push(10, OffsetSet::new()), SearchStatus::NoMatch);
        assert_eq!(history.push(11, set(&[1, 2])), SearchStatus::Ambiguous);
        assert_eq!(history.push(12, OffsetSet::new()), SearchStatus::NoMatch);
        assert_eq!(history.push(13, set(&[1])), SearchStatus::Ambiguous);
        assert!(history.intersection().is_empty());
    }

    #[test]
    fn test_first_observation_empty() {
        let mut history = ObservationHistory::new();
        assert_eq!(history.push(1, OffsetSet::new()), SearchStatus::NoMatch);
        assert_eq!(history.push(1, set(&[3])), SearchStatus::Ambiguous);
    }

    #[test]
    fn test_disjoint_sets_are_ambiguous() {
        let history = history(&[&[1, 2], &[3, 4]]);
        assert_eq!(history.status(), SearchStatus::Ambiguous);
        assert!(history.intersection().is_empty());
    }

    #[test]
    fn test_clear() {
        let mut history = history(&[&[1], &[2]]);
        history.clear();
        assert!(history.is_empty());
        assert_eq!(history.status(), SearchStatus::Pending);
        assert_eq!(history.push(0, set(&[5])), SearchStatus::Converged { offset: 5 });
    }

    #[test]
    fn test_observations_keep_values_in_order() {
        let history = history(&[&[1], &[1], &[1]]);
        let values: Vec<i64> = history.iter().map(|o| o.value).collect();
        assert_eq!(values, vec![0, 1, 2]);
        assert_eq!(history.last().map(|o| o.value), Some(2));
    }
}
