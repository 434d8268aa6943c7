//! Infrastructure implementation of the `Prompter` port using `dialoguer`.

use std::io::IsTerminal;

use anyhow::{Context, Result};
use console::Term;

use crate::application::ports::Prompter;
use crate::domain::ParameterKey;

/// Terminal prompter. Interactive only when stdin and stderr are terminals
/// and non-interactive mode was not requested.
pub struct DialoguerPrompter {
    interactive: bool,
}

impl DialoguerPrompter {
    #[must_use]
    pub fn new(non_interactive: bool) -> Self {
        let tty = Term::stderr().is_term() && std::io::stdin().is_terminal();
        Self {
            interactive: !non_interactive && tty,
        }
    }
}

impl Prompter for DialoguerPrompter {
    fn is_interactive(&self) -> bool {
        self.interactive
    }

    fn prompt(&self, key: ParameterKey) -> Result<String> {
        let label = key.label();
        if key.is_secret() {
            dialoguer::Password::new()
                .with_prompt(label)
                .allow_empty_password(true)
                .interact()
                .with_context(|| format!("reading {key}"))
        } else {
            dialoguer::Input::<String>::new()
                .with_prompt(label)
                .allow_empty(true)
                .interact_text()
                .with_context(|| format!("reading {key}"))
        }
    }

    fn confirm(&self, prompt: &str, default: bool) -> Result<bool> {
        if !self.interactive {
            return Ok(default);
        }
        let confirmed = dialoguer::Confirm::new()
            .with_prompt(prompt)
            .default(default)
            .interact()?;
        Ok(confirmed)
    }
}
