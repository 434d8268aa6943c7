//! Domain layer: pure business logic, types, and validation.
//!
//! This module has zero imports from `crate::infra`, `crate::commands`,
//! `crate::application`, `std::fs`, `std::process`, or `std::net`.
//! All functions are synchronous and take data in, returning data out.

pub mod action;
pub mod error;
pub mod param;
pub mod resolved;
pub mod resources;

pub use action::{Action, ActionSpec, KeySpec, Requirement, Service};
pub use error::{AuthError, ConfigError, ErrorKind, RemoteError};
pub use param::{DEFAULT_ENV_PREFIX, ParameterKey, ParameterSource};
pub use resolved::{CliArgs, ConfigValues, FieldUpdate, ResolvedConfig, ResolvedValue};
