//! Secret word dictionary and the sources that draw from it.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

pub const WORDS: [&str; 40] = [
    "house", "plant", "water", "music", "stone", "bread", "beach", "cloud", "dream", "earth",
    "field", "flame", "frost", "glass", "happy", "horse", "light", "magic", "metal", "night",
    "ocean", "peace", "queen", "river", "sound", "study", "sugar", "table", "video", "world",
    "young", "zebra", "alien", "beast", "chain", "delta", "eagle", "faith", "ghost", "heart",
];

/// Supplies secret words for new sessions.
pub trait WordSource: Send {
    fn draw(&mut self) -> String;
}

/// Uniform draws with replacement from [`WORDS`], seeded once per process.
pub struct RandomWords {
    rng: StdRng,
}

impl RandomWords {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomWords {
    fn default() -> Self {
        Self::new()
    }
}

impl WordSource for RandomWords {
    fn draw(&mut self) -> String {
        WORDS
            .choose(&mut self.rng)
            .copied()
            .unwrap_or(WORDS[0])
            .to_string()
    }
}

/// Always hands out the same word.
pub struct FixedWord(pub String);

impl WordSource for FixedWord {
    fn draw(&mut self) -> String {
        self.0.clone()
    }
}
