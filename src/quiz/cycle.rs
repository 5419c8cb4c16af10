//! Restartable shuffled cycle over a question pool
//!
//! A cycle hands out every question of the pool once, in shuffled order, and
//! then reshuffles the whole pool for the next pass. Its position is plain
//! data so it can be persisted between turns.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionCycle {
    order: Vec<usize>,
    cursor: usize,
    pass: u32,
}

impl QuestionCycle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Next question index, reshuffling when the current pass is exhausted.
    ///
    /// Returns `None` only for an empty pool.
    pub fn next<R: Rng + ?Sized>(&mut self, pool: &[usize], rng: &mut R) -> Option<usize> {
        if pool.is_empty() {
            return None;
        }

        if self.cursor >= self.order.len() || !self.covers(pool) {
            self.reshuffle(pool, rng);
        }

        let index = self.order[self.cursor];
        self.cursor += 1;
        Some(index)
    }

    /// Number of completed or started passes
    pub fn pass(&self) -> u32 {
        self.pass
    }

    /// Questions left before the next reshuffle
    pub fn remaining(&self) -> usize {
        self.order.len().saturating_sub(self.cursor)
    }

    /// Endless iterator over the pool
    pub fn iter<'a, R: Rng + ?Sized>(&'a mut self, pool: &'a [usize], rng: &'a mut R) -> Cycle<'a, R> {
        Cycle { cycle: self, pool, rng }
    }

    fn reshuffle<R: Rng + ?Sized>(&mut self, pool: &[usize], rng: &mut R) {
        self.order = pool.to_vec();
        self.order.shuffle(rng);
        self.cursor = 0;
        self.pass += 1;
    }

    /// A persisted order from an older bank is discarded
    fn covers(&self, pool: &[usize]) -> bool {
        if self.order.len() != pool.len() {
            return false;
        }
        let mut order = self.order.clone();
        let mut expected = pool.to_vec();
        order.sort_unstable();
        expected.sort_unstable();
        order == expected
    }
}

/// Borrowing iterator returned by [`QuestionCycle::iter`]
pub struct Cycle<'a, R: Rng + ?Sized> {
    cycle: &'a mut QuestionCycle,
    pool: &'a [usize],
    rng: &'a mut R,
}

impl<'a, R: Rng + ?Sized> Iterator for Cycle<'a, R> {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        self.cycle.next(self.pool, &mut *self.rng)
    }
}
