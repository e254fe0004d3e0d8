//! Draw engine
//!
//! Splits a draw into two steps. `start_draw` validates the roster and
//! returns the pool of eligible 1-based numbers; the caller (usually an
//! animation) settles on one of them and reports it back through `finish`.
//! Callers without an external chooser use `pick` for a uniform choice.
//!
//! ```text
//! Idle ──start_draw──> Drawing ──finish / abort──> Idle
//! ```
//!
//! Only one draw runs at a time; `start_draw` while drawing is rejected.

use std::collections::HashSet;

use ld_core::{Participant, ParticipantId};
use rand::prelude::*;

/// Identities removed from the pool
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Exclusion {
    /// Repeats allowed
    #[default]
    None,
    /// Exclude by participant name (single-draw history)
    Names(HashSet<String>),
    /// Exclude by participant id (award winners)
    Ids(HashSet<ParticipantId>),
}

impl Exclusion {
    pub fn excludes(&self, participant: &Participant) -> bool {
        match self {
            Self::None => false,
            Self::Names(names) => names.contains(&participant.name),
            Self::Ids(ids) => ids.contains(&participant.id),
        }
    }
}

/// Every ordinal `1..=len`
pub fn number_pool(len: usize) -> Vec<usize> {
    (1..=len).collect()
}

/// Ordinals whose participant is not excluded
pub fn eligible_pool(roster: &[Participant], exclusion: &Exclusion) -> Vec<usize> {
    number_pool(roster.len())
        .into_iter()
        .filter(|&number| !exclusion.excludes(&roster[number - 1]))
        .collect()
}

/// Map a pool number back to its participant
///
/// Out-of-range numbers fall back to the last participant in release builds;
/// a correct pool never produces one, so debug builds assert. Returns `None`
/// only for an empty roster.
pub fn resolve(roster: &[Participant], number: usize) -> Option<&Participant> {
    debug_assert!(
        roster.is_empty() || (number >= 1 && number <= roster.len()),
        "pool number {} outside roster of {}",
        number,
        roster.len()
    );
    number
        .checked_sub(1)
        .and_then(|index| roster.get(index))
        .or_else(|| roster.last())
}

/// Draw lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawState {
    Idle,
    Drawing,
}

/// Guards against re-entrant draws and performs uniform picks
#[derive(Debug)]
pub struct DrawEngine {
    rng: StdRng,
    /// Pool handed out by the in-progress draw
    pending: Option<Vec<usize>>,
}

impl DrawEngine {
    /// Engine seeded from the OS
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
            pending: None,
        }
    }

    /// Engine with reproducible picks
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            pending: None,
        }
    }

    pub fn state(&self) -> DrawState {
        if self.pending.is_some() {
            DrawState::Drawing
        } else {
            DrawState::Idle
        }
    }

    pub fn is_running(&self) -> bool {
        self.pending.is_some()
    }

    /// Begin a draw
    ///
    /// Returns `None` (state unchanged) if a draw is already running, the
    /// roster is empty, or every participant is excluded.
    pub fn start_draw(&mut self, roster: &[Participant], exclusion: &Exclusion) -> Option<Vec<usize>> {
        if self.is_running() || roster.is_empty() {
            return None;
        }

        let pool = eligible_pool(roster, exclusion);
        if pool.is_empty() {
            log::debug!("No eligible participants among {}", roster.len());
            return None;
        }

        log::debug!("Draw started: {} of {} eligible", pool.len(), roster.len());
        self.pending = Some(pool.clone());
        Some(pool)
    }

    /// Uniform random member of `pool`
    pub fn pick(&mut self, pool: &[usize]) -> Option<usize> {
        if pool.is_empty() {
            return None;
        }
        Some(pool[self.rng.random_range(0..pool.len())])
    }

    /// Whether `number` may complete the in-progress draw
    pub fn accepts(&self, number: usize) -> bool {
        self.pending
            .as_ref()
            .map(|pool| pool.contains(&number))
            .unwrap_or(false)
    }

    /// End the in-progress draw on `number`
    ///
    /// Returns false (still drawing) if `number` was not in the pool, or
    /// false (idle) if no draw was running.
    pub fn finish(&mut self, number: usize) -> bool {
        if !self.accepts(number) {
            return false;
        }
        self.pending = None;
        true
    }

    /// Abandon the in-progress draw without an outcome
    pub fn abort(&mut self) -> bool {
        self.pending.take().is_some()
    }
}

impl Default for DrawEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn people(names: &[&str]) -> Vec<Participant> {
        names
            .iter()
            .enumerate()
            .map(|(i, n)| Participant::new(i as u64 + 1, *n, format!("{:03}", i + 1)))
            .collect()
    }

    #[test]
    fn test_number_pool() {
        assert_eq!(number_pool(3), vec![1, 2, 3]);
        assert!(number_pool(0).is_empty());
    }

    #[test]
    fn test_eligible_pool_by_name() {
        let roster = people(&["A", "B", "C"]);
        let exclusion = Exclusion::Names(HashSet::from(["A".to_string()]));
        assert_eq!(eligible_pool(&roster, &exclusion), vec![2, 3]);
        assert_eq!(eligible_pool(&roster, &Exclusion::None), vec![1, 2, 3]);
    }

    #[test]
    fn test_eligible_pool_by_id() {
        let roster = people(&["A", "B", "C"]);
        let exclusion = Exclusion::Ids(HashSet::from([2, 3]));
        assert_eq!(eligible_pool(&roster, &exclusion), vec![1]);
    }

    #[test]
    fn test_resolve() {
        let roster = people(&["A", "B"]);
        assert_eq!(resolve(&roster, 2).unwrap().name, "B");
        assert_eq!(resolve(&roster, 1).unwrap().name, "A");
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "outside roster")]
    fn test_resolve_out_of_range_asserts_in_debug() {
        let roster = people(&["A", "B"]);
        let _ = resolve(&roster, 3);
    }

    #[test]
    #[cfg(not(debug_assertions))]
    fn test_resolve_out_of_range_clamps_in_release() {
        let roster = people(&["A", "B"]);
        assert_eq!(resolve(&roster, 3).unwrap().name, "B");
    }

    #[test]
    fn test_start_draw_empty_roster() {
        let mut engine = DrawEngine::seeded(1);
        assert_eq!(engine.start_draw(&[], &Exclusion::None), None);
        assert_eq!(engine.state(), DrawState::Idle);
    }

    #[test]
    fn test_start_draw_rejects_reentry() {
        let roster = people(&["A", "B"]);
        let mut engine = DrawEngine::seeded(1);

        assert_eq!(engine.start_draw(&roster, &Exclusion::None), Some(vec![1, 2]));
        assert_eq!(engine.state(), DrawState::Drawing);
        assert_eq!(engine.start_draw(&roster, &Exclusion::None), None);
    }

    #[test]
    fn test_start_draw_exhausted_pool_stays_idle() {
        let roster = people(&["A"]);
        let mut engine = DrawEngine::seeded(1);
        let exclusion = Exclusion::Names(HashSet::from(["A".to_string()]));

        assert_eq!(engine.start_draw(&roster, &exclusion), None);
        assert!(!engine.is_running());
    }

    #[test]
    fn test_finish_requires_pool_member() {
        let roster = people(&["A", "B", "C"]);
        let mut engine = DrawEngine::seeded(1);
        let exclusion = Exclusion::Ids(HashSet::from([1]));
        engine.start_draw(&roster, &exclusion);

        assert!(!engine.finish(1));
        assert!(engine.is_running());
        assert!(engine.finish(3));
        assert!(!engine.is_running());
        assert!(!engine.finish(3));
    }

    #[test]
    fn test_abort() {
        let roster = people(&["A"]);
        let mut engine = DrawEngine::seeded(1);
        assert!(!engine.abort());

        engine.start_draw(&roster, &Exclusion::None);
        assert!(engine.abort());
        assert_eq!(engine.state(), DrawState::Idle);
        assert!(engine.start_draw(&roster, &Exclusion::None).is_some());
    }

    #[test]
    fn test_pick_stays_in_pool() {
        let mut engine = DrawEngine::seeded(42);
        let pool = vec![2, 5, 9];
        for _ in 0..100 {
            assert!(pool.contains(&engine.pick(&pool).unwrap()));
        }
        assert_eq!(engine.pick(&[]), None);
    }

    #[test]
    fn test_pick_covers_pool() {
        let mut engine = DrawEngine::seeded(7);
        let pool = vec![1, 2, 3, 4];
        let seen: HashSet<usize> = (0..400).filter_map(|_| engine.pick(&pool)).collect();
        assert_eq!(seen.len(), 4);
    }

    #[test]
    fn test_seeded_picks_repeat() {
        let pool: Vec<usize> = (1..=50).collect();
        let mut a = DrawEngine::seeded(99);
        let mut b = DrawEngine::seeded(99);
        let picks_a: Vec<_> = (0..10).filter_map(|_| a.pick(&pool)).collect();
        let picks_b: Vec<_> = (0..10).filter_map(|_| b.pick(&pool)).collect();
        assert_eq!(picks_a, picks_b);
    }
}
