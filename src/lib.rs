//! Config resolution and shell execution core for a terraform
//! workflow wrapper.
//!
//! Two independent pieces:
//!
//! - [`config`] discovers the nearest `nexoform.yml` up the directory
//!   tree, answers typed per-environment queries (var file, plan
//!   policy, state backend) and generates/persists the default config.
//! - [`adapters::shell`] runs external commands and normalizes their
//!   outcome into a [`CommandResult`], in either captured or loud mode.
//!
//! Neither depends on the other: the CLI layer queries the config,
//! assembles a terraform command line, and hands it to the shell
//! runner.

pub mod adapters;
pub mod config;
pub mod core;

pub use crate::config::defaults::{default_settings, default_yaml};
pub use crate::config::resolver::ConfigResolver;
pub use crate::config::settings::{OverwritePolicy, Settings};
pub use crate::core::errors::{NexoformError, Result};
pub use crate::core::models::command_result::{CommandResult, ExitStatus};
