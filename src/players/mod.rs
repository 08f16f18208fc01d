//! Built-in seats.
//!
//! - `RandomBot`: uniform random choices from a seeded `GameRng`

mod random;

pub use random::RandomBot;
