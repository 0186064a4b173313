use std::collections::VecDeque;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Source of the active target for each round
pub trait TargetPicker {
    /// Returns an index in `0..target_count`. Never called with zero targets.
    fn pick(&mut self, target_count: usize) -> usize;
}

/// Uniform, independent draws; the same index may come up twice in a row.
#[derive(Debug, Clone)]
pub struct RandomPicker<R: Rng> {
    rng: R,
}

impl<R: Rng> RandomPicker<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RandomPicker<StdRng> {
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }

    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }
}

impl<R: Rng> TargetPicker for RandomPicker<R> {
    fn pick(&mut self, target_count: usize) -> usize {
        self.rng.gen_range(0..target_count)
    }
}

/// Replays a fixed sequence, cycling when exhausted.
/// Out-of-range entries wrap modulo the target count.
#[derive(Debug, Clone)]
pub struct ScriptedPicker {
    script: VecDeque<usize>,
}

impl ScriptedPicker {
    pub fn new<I: IntoIterator<Item = usize>>(script: I) -> Self {
        Self {
            script: script.into_iter().collect(),
        }
    }
}

impl TargetPicker for ScriptedPicker {
    fn pick(&mut self, target_count: usize) -> usize {
        match self.script.pop_front() {
            Some(idx) => {
                self.script.push_back(idx);
                idx % target_count
            }
            None => 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn random_picker_stays_in_range() {
        let mut picker = RandomPicker::seeded(7);
        for _ in 0..500 {
            assert!(picker.pick(3) < 3);
        }
    }

    #[test]
    fn random_picker_hits_every_slot() {
        let mut picker = RandomPicker::seeded(42);
        let mut seen = [false; 4];
        for _ in 0..200 {
            seen[picker.pick(4)] = true;
        }
        assert!(seen.iter().all(|s| *s));
    }

    #[test]
    fn seeded_pickers_agree() {
        let mut a = RandomPicker::seeded(99);
        let mut b = RandomPicker::seeded(99);
        let xs: Vec<usize> = (0..20).map(|_| a.pick(5)).collect();
        let ys: Vec<usize> = (0..20).map(|_| b.pick(5)).collect();
        assert_eq!(xs, ys);
    }

    #[test]
    fn scripted_picker_cycles_and_wraps() {
        let mut picker = ScriptedPicker::new([1, 4]);
        assert_eq!(picker.pick(3), 1);
        assert_eq!(picker.pick(3), 1);
        assert_eq!(picker.pick(3), 1);
        assert_eq!(picker.pick(5), 4);
    }

    #[test]
    fn empty_script_picks_first() {
        let mut picker = ScriptedPicker::new(Vec::new());
        assert_eq!(picker.pick(3), 0);
    }
}
