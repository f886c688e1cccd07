//! Command interpreter and terminal subsystem.
//!
//! The terminal is a registry-based dispatch system. Commands implement the
//! `Command` trait and are registered by name. A [`Shell`] owns the file
//! tree, package registry and clock, and runs lines against a caller-owned
//! [`Session`].

mod commands;
pub mod dev_commands;
mod interpreter;
pub mod network_commands;
pub mod package_commands;
mod seed;
mod session;
mod shell;
pub mod system_commands;
pub mod user_commands;

/// Register all built-in commands (fs, user, system, network, apt, dev) into a registry.
pub use commands::register_builtins;
/// Register development commands (python, node, git, editors, tar) into a registry.
pub use dev_commands::register_dev_commands;
/// A single executable command trait.
pub use interpreter::Command;
/// Output produced by a command (text, signals).
pub use interpreter::CommandOutput;
/// Registry of available commands with dispatch.
pub use interpreter::CommandRegistry;
/// Shared mutable environment passed to every command.
pub use interpreter::Environment;
/// A command error tagged with the command name.
pub use interpreter::Failure;
/// Register network commands (ifconfig, ping, wget, curl) into a registry.
pub use network_commands::register_network_commands;
/// Register apt/apt-get into a registry.
pub use package_commands::register_package_commands;
/// Build the initial file tree for a configured machine.
pub use seed::seed_tree;
/// Per-session shell state.
pub use session::Session;
/// The simulated machine.
pub use shell::Shell;
/// Register process and resource commands (ps, top, df, ...) into a registry.
pub use system_commands::register_system_commands;
/// Register session and user commands (whoami, date, man, ...) into a registry.
pub use user_commands::register_user_commands;
