//! Local installer for PowerShell modules.
//!
//! Copies a module source tree into the per-user module directory as
//! `<Name>/<Version>`, leaving out whatever `.gitignore` / `.psignore` files
//! in the tree exclude.
//!
//! The public API is organised into layers:
//!
//! - **[`ignore`]**: ignore-file rules and the exclusion set they produce
//! - **[`manifest`]**: `<Name>.psd1` discovery and `ModuleVersion`
//! - **[`install`]**: side-effect-free planning and gated application
//! - **[`resources`]**: the directory and file primitives a plan applies
//! - **[`config`]**: the JSON settings document holding `PSCodePath`
//! - **[`commands`]**: top-level subcommand orchestration
#![deny(clippy::or_fun_call)]
#![deny(clippy::bool_to_int_with_if)]

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod exec;
pub mod ignore;
pub mod install;
pub mod logging;
pub mod manifest;
pub mod platform;
pub mod resources;
