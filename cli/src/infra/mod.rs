//! Infrastructure layer: concrete implementations of application port traits.
//!
//! This module contains all I/O-performing code: config file reads, process
//! environment, terminal prompts, HTTP and credential helpers.
//!
//! Imports from `crate::domain` and `crate::application::ports` are allowed.
//! Imports from `crate::commands` or `crate::output` are forbidden.

pub mod command_runner;
pub mod config;
pub mod credentials;
pub mod env;
pub mod http;
pub mod prompt;
