//! Attendance CLI library.
//!
//! This crate provides the `att` command-line interface, the file-dump device
//! gateway and the sync orchestrator.

mod cli;
pub mod commands;
mod config;
pub mod device;
pub mod orchestrator;

pub use cli::{Cli, Commands, DepartmentAction, EmployeeAction};
pub use config::Config;
