//! Random-bit source deciding which ranking gets the first turn.
//!
//! Production uses `RandomCoin`; tests pin the outcome with `FixedCoin`
//! or a closure.

use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

pub trait Coin: Send + Sync {
    /// `true` when the old ranking should take the first turn
    fn favor_old(&self) -> bool;
}

impl<F> Coin for F
where
    F: Fn() -> bool + Send + Sync,
{
    fn favor_old(&self) -> bool {
        self()
    }
}

/// Uniform 50/50 flip from the thread-local generator
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomCoin;

impl Coin for RandomCoin {
    fn favor_old(&self) -> bool {
        rand::thread_rng().gen_bool(0.5)
    }
}

/// Always lands the same way
#[derive(Debug, Clone, Copy)]
pub struct FixedCoin(pub bool);

impl Coin for FixedCoin {
    fn favor_old(&self) -> bool {
        self.0
    }
}

/// Reproducible sequence of flips for simulations
pub struct SeededCoin {
    rng: Mutex<StdRng>,
}

impl SeededCoin {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl Coin for SeededCoin {
    fn favor_old(&self) -> bool {
        self.rng.lock().gen_bool(0.5)
    }
}
