//! `apt` and `apt-get` over the shared package registry.

use linsim_pkg::PackageRegistry;
use linsim_types::error::{Result, SimError};

use crate::commands::Flags;
use crate::interpreter::{Command, CommandOutput, CommandRegistry, Environment};

/// Register package management commands.
pub fn register_package_commands(reg: &mut CommandRegistry) {
    reg.register(Box::new(AptCmd { name: "apt" }));
    reg.register(Box::new(AptCmd { name: "apt-get" }));
}

struct AptCmd {
    name: &'static str,
}

impl Command for AptCmd {
    fn name(&self) -> &str {
        self.name
    }
    fn description(&self) -> &str {
        "Package manager"
    }
    fn usage(&self) -> &str {
        match self.name {
            "apt-get" => "apt-get <update|upgrade|install|remove> [pkg]",
            _ => "apt <update|upgrade|install|remove|search|list|show> [pkg]",
        }
    }
    fn category(&self) -> &str {
        "Package Management"
    }
    fn execute(&self, args: &[&str], env: &mut Environment<'_>) -> Result<CommandOutput> {
        let flags = Flags::parse(args);
        let Some((&op, names)) = flags.operands.split_first() else {
            return Ok(CommandOutput::Text(PackageRegistry::help().to_string()));
        };
        let text = |s: &str| Ok(CommandOutput::Text(s.to_string()));

        match op {
            "update" => {
                let now = env.now()?;
                text(&env.packages.update(now))
            },
            "upgrade" => text(&env.packages.upgrade()),
            "install" | "remove" => {
                if names.is_empty() {
                    return text("E: Missing package name");
                }
                // Nothing changes unless every name is in the catalog.
                if let Some(missing) = names.iter().find(|n| env.packages.get(n).is_none()) {
                    return Err(SimError::PackageNotFound(missing.to_string()));
                }
                let mut out = Vec::with_capacity(names.len());
                for name in names {
                    out.push(if op == "install" {
                        env.packages.install(name)?
                    } else {
                        env.packages.remove(name)?
                    });
                }
                text(&out.join("\n"))
            },
            "search" => match names.first() {
                Some(term) => text(&env.packages.search(term)),
                None => text("E: Missing search term"),
            },
            "list" => {
                let installed_only = flags.has_long("installed");
                text(&format!("Listing... Done\n{}", env.packages.list(installed_only)))
            },
            "show" => match names.first() {
                Some(name) => match env.packages.show(name) {
                    Ok(record) => text(&record),
                    Err(_) => text(&format!("N: Unable to locate package {name}")),
                },
                None => text("E: Missing package name"),
            },
            other => text(&format!("E: Invalid operation {other}")),
        }
    }
}
