pub mod config;
pub mod error;
pub mod plot;
pub mod util;

pub const NANOS_PER_MS: f64 = 1_000_000.0;
