//! Application services: use-case orchestration.
//!
//! Each service module implements a group of use-cases by composing domain
//! logic with port trait calls. Services import only from `crate::domain` and
//! `crate::application::ports`, never from `crate::infra`, `crate::commands`,
//! or `crate::output`.

pub mod api;
pub mod authorization;
pub mod engine;
pub mod registry;
pub mod resolver;
