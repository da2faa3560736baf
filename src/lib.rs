/// Configuration loading and resolution.
pub mod config;

/// SSH related functionality.
pub mod ssh;

/// Apache virtual-host templates.
pub mod vhost;

/// GitHub clone parameters.
pub mod github;

/// Ordered remote provisioning steps.
pub mod provision;

/// Utility functions for common operations.
pub mod utils;

/// CLI interface.
pub mod cli;
