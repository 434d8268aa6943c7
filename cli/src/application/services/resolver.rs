//! Application service: layered parameter resolution.
//!
//! Each parameter of an action is probed through an ordered chain of source
//! lookups: CLI argument, config file, environment variable, default value,
//! interactive prompt. The first non-empty hit wins. Patch keys of update
//! actions only consult the CLI and config file and keep empty values, which
//! mean "clear".

use anyhow::Result;

use crate::application::ports::{ConfigLocation, ConfigStore, Environment, Prompter};
use crate::domain::{
    ActionSpec, CliArgs, ConfigError, ConfigValues, KeySpec, ParameterKey, ParameterSource,
    Requirement, ResolvedConfig,
};

/// A single source lookup in the precedence chain.
type LookupFn<'a> = Box<dyn Fn(&KeySpec) -> Result<Option<String>> + 'a>;

/// Ordered list of source lookups, highest precedence first.
pub struct PrecedenceChain<'a> {
    lookups: Vec<(ParameterSource, LookupFn<'a>)>,
}

impl<'a> PrecedenceChain<'a> {
    /// Builds the standard five-source chain.
    pub fn new(
        cli: &'a CliArgs,
        config: &'a ConfigValues,
        env: &'a impl Environment,
        env_prefix: &'a str,
        prompter: &'a impl Prompter,
    ) -> Self {
        let lookups: Vec<(ParameterSource, LookupFn<'a>)> = vec![
            (
                ParameterSource::CliArgument,
                Box::new(move |k: &KeySpec| Ok(cli.get(&k.key).cloned())),
            ),
            (
                ParameterSource::ConfigFile,
                Box::new(move |k: &KeySpec| Ok(config.get(k.key).map(str::to_string))),
            ),
            (
                ParameterSource::EnvironmentVariable,
                Box::new(move |k: &KeySpec| Ok(env_lookup(env, env_prefix, k.key))),
            ),
            (
                ParameterSource::DefaultValue,
                Box::new(|k: &KeySpec| Ok(k.default.map(str::to_string))),
            ),
            (
                ParameterSource::InteractivePrompt,
                Box::new(move |k: &KeySpec| prompt_lookup(prompter, k)),
            ),
        ];
        Self { lookups }
    }

    /// Sources in probe order.
    pub fn sources(&self) -> impl Iterator<Item = ParameterSource> + '_ {
        self.lookups.iter().map(|(source, _)| *source)
    }

    /// Resolves one key, returning the value and the source that supplied it.
    ///
    /// # Errors
    ///
    /// Propagates prompt failures.
    pub fn resolve_key(&self, spec: &KeySpec) -> Result<Option<(String, ParameterSource)>> {
        let patch = spec.requirement == Requirement::Patch;
        for (source, lookup) in &self.lookups {
            if patch && !ParameterSource::PATCH_SOURCES.contains(source) {
                continue;
            }
            match lookup(spec)? {
                Some(value) if patch || !value.is_empty() => return Ok(Some((value, *source))),
                _ => {}
            }
        }
        Ok(None)
    }
}

fn env_lookup(env: &impl Environment, prefix: &str, key: ParameterKey) -> Option<String> {
    std::iter::once(key.env_var(prefix))
        .chain(key.env_aliases().iter().map(|alias| (*alias).to_string()))
        .filter_map(|name| env.var(&name))
        .find(|value| !value.is_empty())
}

fn prompt_lookup(prompter: &impl Prompter, spec: &KeySpec) -> Result<Option<String>> {
    if spec.requirement != Requirement::Required || !prompter.is_interactive() {
        return Ok(None);
    }
    let answer = prompter.prompt(spec.key)?;
    let answer = answer.trim();
    if answer.is_empty() {
        return Err(ConfigError::EmptyPrompt(spec.key).into());
    }
    Ok(Some(answer.to_string()))
}

/// Resolves every key of `spec` from already-loaded config values.
///
/// # Errors
///
/// Returns `ConfigError::MissingRequired` when a required key stays
/// unresolved after all sources, including the prompt when interactive.
pub fn resolve_values(
    spec: &ActionSpec,
    cli: &CliArgs,
    config: &ConfigValues,
    env: &impl Environment,
    env_prefix: &str,
    prompter: &impl Prompter,
) -> Result<ResolvedConfig> {
    let chain = PrecedenceChain::new(cli, config, env, env_prefix, prompter);
    let mut resolved = ResolvedConfig::with_env_prefix(env_prefix);

    for key_spec in spec.keys {
        match chain.resolve_key(key_spec)? {
            Some((value, source)) => {
                if key_spec.key.is_secret() {
                    tracing::debug!(key = %key_spec.key, %source, "parameter resolved (secret)");
                } else {
                    tracing::debug!(key = %key_spec.key, %source, value = %value, "parameter resolved");
                }
                resolved.insert(key_spec.key, value, source);
            }
            None if key_spec.requirement == Requirement::Required => {
                return Err(ConfigError::MissingRequired {
                    key: key_spec.key,
                    flag: key_spec.key.flag(),
                    env: key_spec.key.env_var(env_prefix),
                }
                .into());
            }
            None => tracing::trace!(key = %key_spec.key, "parameter not supplied"),
        }
    }

    Ok(resolved)
}

/// Resolver bound to its configuration ports.
pub struct Resolver<'a, S, E, P> {
    store: &'a S,
    env: &'a E,
    prompter: &'a P,
}

impl<'a, S, E, P> Resolver<'a, S, E, P>
where
    S: ConfigStore,
    E: Environment,
    P: Prompter,
{
    pub fn new(store: &'a S, env: &'a E, prompter: &'a P) -> Self {
        Self {
            store,
            env,
            prompter,
        }
    }

    /// Loads the config file at `location`, then resolves every key of `spec`.
    ///
    /// # Errors
    ///
    /// Returns config-file errors (not found for explicit paths, malformed
    /// JSON) and `ConfigError::MissingRequired` for unresolved required keys.
    pub fn resolve(
        &self,
        spec: &ActionSpec,
        cli: &CliArgs,
        location: &ConfigLocation,
        env_prefix: &str,
    ) -> Result<ResolvedConfig> {
        let config = self.store.load(location)?;
        tracing::debug!(
            path = %location.path().display(),
            entries = config.len(),
            service = %spec.service,
            action = %spec.action,
            "resolving parameters"
        );
        resolve_values(spec, cli, &config, self.env, env_prefix, self.prompter)
    }
}
