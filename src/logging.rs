//! Logger setup for the runner

use env_logger::{Builder, Env};
use log::LevelFilter;

/// Install the global `env_logger` backend.
///
/// `verbose` lowers the default filter from info to debug (per-event lines,
/// phase changes, power-up spawns). `RUST_LOG` still wins when set.
pub fn init(verbose: bool) {
    let env = Env::default().default_filter_or(default_level(verbose).to_string());

    // A logger may already be installed (tests, embedding hosts); keep it.
    let _ = Builder::from_env(env).try_init();
}

fn default_level(verbose: bool) -> LevelFilter {
    if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_level() {
        assert_eq!(default_level(true), LevelFilter::Debug);
        assert_eq!(default_level(false), LevelFilter::Info);
    }

    #[test]
    fn test_init_twice_is_harmless() {
        init(false);
        init(true);
    }
}
