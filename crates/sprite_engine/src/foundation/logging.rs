//! Logging initialization for hosts embedding the engine

pub use log::{debug, info, warn, error, trace};

/// Initialize the logging system from `RUST_LOG`
pub fn init() {
    env_logger::init();
}

/// Initialize the logging system with an explicit filter (e.g. `"sprite_engine=debug"`).
///
/// `RUST_LOG` still takes precedence when it is set. Calling this twice is harmless.
pub fn init_with_filter(filter: &str) {
    let env = env_logger::Env::default().default_filter_or(filter);
    if env_logger::Builder::from_env(env).try_init().is_err() {
        log::debug!("Logger already initialized, keeping existing configuration");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repeated_init_is_harmless() {
        init_with_filter("sprite_engine=debug");
        init_with_filter("warn");
        info!("logging initialized");
    }
}
