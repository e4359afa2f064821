//! Random sources for sealing and drawing.
//!
//! Everything random in the engine goes through [`DrawSource`], so production
//! can use `rand` while tests script the exact outcome.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::VecDeque;
use std::sync::Mutex;

pub trait DrawSource: Send + Sync {
    /// Uniform value in `[0, 1)`.
    fn roll(&self) -> f64;

    /// Uniform index in `0..len`. `len` is never zero.
    fn pick(&self, len: usize) -> usize;
}

/// [`DrawSource`] backed by a `rand` generator.
pub struct RngSource<R = StdRng> {
    rng: Mutex<R>,
}

impl RngSource<StdRng> {
    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }

    /// Reproducible sequence, for simulations and tests.
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng + Send> RngSource<R> {
    pub fn new(rng: R) -> Self {
        Self {
            rng: Mutex::new(rng),
        }
    }

    fn with_rng<T>(&self, f: impl FnOnce(&mut R) -> T) -> T {
        // A panic while holding the lock cannot leave the generator in a bad state.
        let mut rng = self.rng.lock().unwrap_or_else(|e| e.into_inner());
        f(&mut rng)
    }
}

impl<R: Rng + Send> DrawSource for RngSource<R> {
    fn roll(&self) -> f64 {
        self.with_rng(|rng| rng.gen::<f64>())
    }

    fn pick(&self, len: usize) -> usize {
        self.with_rng(|rng| rng.gen_range(0..len.max(1)))
    }
}

/// Replays queued outcomes in order.
///
/// Once a queue is empty, `roll` answers 0.99 (no hidden substitution at any
/// sane probability) and `pick` answers 0. Picks are clamped to `len - 1`.
#[derive(Debug, Default)]
pub struct ScriptedSource {
    rolls: Mutex<VecDeque<f64>>,
    picks: Mutex<VecDeque<usize>>,
}

impl ScriptedSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rolls(self, rolls: impl IntoIterator<Item = f64>) -> Self {
        self.rolls
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .extend(rolls);
        self
    }

    pub fn with_picks(self, picks: impl IntoIterator<Item = usize>) -> Self {
        self.picks
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .extend(picks);
        self
    }
}

impl DrawSource for ScriptedSource {
    fn roll(&self) -> f64 {
        self.rolls
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .pop_front()
            .unwrap_or(0.99)
    }

    fn pick(&self, len: usize) -> usize {
        let next = self
            .picks
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .pop_front()
            .unwrap_or(0);
        next.min(len.saturating_sub(1))
    }
}
