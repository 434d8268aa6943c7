//! Infrastructure implementation of the `Environment` port.

use crate::application::ports::Environment;

/// Reads the real process environment.
pub struct ProcessEnvironment;

impl Environment for ProcessEnvironment {
    fn var(&self, name: &str) -> Option<String> {
        std::env::var(name).ok()
    }
}
