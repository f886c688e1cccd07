//! The simulated machine: file tree, package registry, clock and command
//! registry behind one entry point.

use linsim_pkg::PackageRegistry;
use linsim_platform::TimeService;
use linsim_types::config::SimConfig;
use linsim_types::error::Result;
use linsim_vfs::{EntryKind, FileTree};

use crate::commands::register_builtins;
use crate::interpreter::{CommandOutput, CommandRegistry, Environment};
use crate::seed::seed_tree;
use crate::session::Session;

/// Owns all machine-wide state. Sessions are owned by the caller and passed
/// in on every call.
pub struct Shell {
    registry: CommandRegistry,
    vfs: FileTree,
    packages: PackageRegistry,
    time: Box<dyn TimeService>,
    config: SimConfig,
}

impl Shell {
    /// Build a machine with the seeded tree and the default catalog.
    pub fn new(config: SimConfig, time: Box<dyn TimeService>) -> Result<Self> {
        let vfs = seed_tree(&config, time.now()?)?;
        let mut registry = CommandRegistry::new();
        register_builtins(&mut registry);
        log::info!(
            "Booted {} for {} ({} commands)",
            config.hostname,
            config.user,
            registry.list_commands().len()
        );
        Ok(Self {
            registry,
            vfs,
            packages: PackageRegistry::default(),
            time,
            config,
        })
    }

    /// A fresh session for the configured user.
    pub fn new_session(&self) -> Session {
        Session::new(&self.config)
    }

    /// Run one line. Empty lines do nothing and are not recorded.
    pub fn execute(&mut self, line: &str, session: &mut Session) -> CommandOutput {
        let line = line.trim();
        if line.is_empty() {
            return CommandOutput::None;
        }

        let mut env = Environment {
            session: &mut *session,
            vfs: &mut self.vfs,
            packages: &mut self.packages,
            time: self.time.as_ref(),
            config: &self.config,
        };
        let output = match self.registry.execute(line, &mut env) {
            Ok(output) => output,
            Err(failure) => {
                log::debug!("{} failed: {:?}", failure.command, failure.error);
                CommandOutput::Text(failure.to_string())
            },
        };

        session.sync_pwd();
        session.history.push(line.to_string());
        output
    }

    /// Run one line and return the text a terminal would show.
    pub fn interpret(&mut self, line: &str, session: &mut Session) -> String {
        self.execute(line, session).render()
    }

    /// Entries of a directory, hidden ones included.
    pub fn list_directory(&self, path: &str) -> Result<Vec<(String, EntryKind)>> {
        Ok(self
            .vfs
            .list_children(path)?
            .map(|(name, node)| (name.to_string(), node.kind()))
            .collect())
    }

    /// `user@host:path$ `, with `#` for root.
    pub fn prompt(&self, session: &Session) -> String {
        let sigil = if session.current_user == "root" { '#' } else { '$' };
        format!(
            "{}@{}:{}{sigil} ",
            session.current_user,
            self.config.hostname,
            session.display_path()
        )
    }

    pub fn banner(&self) -> &str {
        &self.config.banner
    }

    pub fn vfs(&self) -> &FileTree {
        &self.vfs
    }

    pub fn vfs_mut(&mut self) -> &mut FileTree {
        &mut self.vfs
    }

    pub fn packages(&self) -> &PackageRegistry {
        &self.packages
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }
}
