//! Leaf colors and the injectable color source.

use std::fmt;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// RGB triple; each channel is in [0,255] by construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl From<(u8, u8, u8)> for Rgb {
    fn from((r, g, b): (u8, u8, u8)) -> Self {
        Self::new(r, g, b)
    }
}

impl From<Rgb> for (u8, u8, u8) {
    fn from(c: Rgb) -> Self {
        (c.r, c.g, c.b)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Supplies a fresh color for every node the arena constructs.
pub trait ColorSource {
    fn next_color(&mut self) -> Rgb;
}

impl<F> ColorSource for F
where
    F: FnMut() -> Rgb,
{
    fn next_color(&mut self) -> Rgb {
        self()
    }
}

/// Non-deterministic colors from the thread-local generator.
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomColors;

impl ColorSource for RandomColors {
    fn next_color(&mut self) -> Rgb {
        let mut rng = rand::rng();
        Rgb::new(rng.random(), rng.random(), rng.random())
    }
}

/// Reproducible colors: the same seed yields the same color sequence.
#[derive(Debug, Clone)]
pub struct SeededColors {
    rng: SmallRng,
}

impl SeededColors {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }
}

impl ColorSource for SeededColors {
    fn next_color(&mut self) -> Rgb {
        Rgb::new(self.rng.random(), self.rng.random(), self.rng.random())
    }
}
