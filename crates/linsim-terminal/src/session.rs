//! Per-session shell state: working directory, user, history, environment
//! and aliases.

use indexmap::IndexMap;
use linsim_types::config::SimConfig;
use linsim_vfs::normalize_path;

const DEFAULT_PATH: &str = "/usr/local/sbin:/usr/local/bin:/usr/sbin:/usr/bin:/sbin:/bin";

const SEED_ALIASES: &[(&str, &str)] = &[
    ("ll", "ls -la"),
    ("la", "ls -A"),
    ("l", "ls -CF"),
    ("grep", "grep --color=auto"),
    ("fgrep", "fgrep --color=auto"),
    ("egrep", "egrep --color=auto"),
];

/// Mutable state of one interactive session.
///
/// The interpreter holds none of this itself; it is handed a `Session` on
/// every call and updates it in place.
#[derive(Debug, Clone)]
pub struct Session {
    /// Absolute, normalized working directory.
    pub current_path: String,
    pub current_user: String,
    /// Every non-empty line issued, oldest first.
    pub history: Vec<String>,
    pub environment: IndexMap<String, String>,
    pub aliases: IndexMap<String, String>,
    /// Set by `exit`/`logout`.
    pub logged_out: bool,
}

impl Session {
    /// A fresh session for the configured user, starting in their home.
    pub fn new(config: &SimConfig) -> Self {
        let home = config.home_dir();
        let mut environment = IndexMap::new();
        for (key, value) in [
            ("HOME", home.as_str()),
            ("USER", config.user.as_str()),
            ("PATH", DEFAULT_PATH),
            ("SHELL", "/bin/bash"),
            ("TERM", "xterm-256color"),
            ("LANG", "en_US.UTF-8"),
            ("PWD", home.as_str()),
        ] {
            environment.insert(key.to_string(), value.to_string());
        }
        let aliases = SEED_ALIASES
            .iter()
            .map(|&(k, v)| (k.to_string(), v.to_string()))
            .collect();

        Self {
            current_path: home,
            current_user: config.user.clone(),
            history: Vec::new(),
            environment,
            aliases,
            logged_out: false,
        }
    }

    pub fn var(&self, name: &str) -> Option<&str> {
        self.environment.get(name).map(String::as_str)
    }

    pub fn set_var(&mut self, name: &str, value: &str) {
        self.environment.insert(name.to_string(), value.to_string());
    }

    /// `$HOME`, falling back to `/` if it was cleared.
    pub fn home(&self) -> &str {
        self.var("HOME").unwrap_or("/")
    }

    /// Move to an already-validated absolute directory, keeping `OLDPWD`
    /// and `PWD` in step.
    pub fn change_dir(&mut self, target: String) {
        let previous = std::mem::replace(&mut self.current_path, target);
        self.set_var("OLDPWD", &previous);
        self.sync_pwd();
    }

    pub fn sync_pwd(&mut self) {
        let cwd = self.current_path.clone();
        self.set_var("PWD", &cwd);
    }

    /// Resolve a command argument to an absolute path: `~` expands to the
    /// home directory, everything else is normalized against the cwd.
    pub fn resolve(&self, arg: &str) -> String {
        let expanded = if arg == "~" {
            self.home().to_string()
        } else if let Some(rest) = arg.strip_prefix("~/") {
            format!("{}/{rest}", self.home())
        } else {
            arg.to_string()
        };
        normalize_path(&self.current_path, &expanded)
    }

    /// Working directory for display, with the home prefix shown as `~`.
    pub fn display_path(&self) -> String {
        let home = self.home();
        if home != "/" {
            if self.current_path == home {
                return "~".to_string();
            }
            if let Some(rest) = self.current_path.strip_prefix(home)
                && rest.starts_with('/')
            {
                return format!("~{rest}");
            }
        }
        self.current_path.clone()
    }

    /// Replace the first token with its alias expansion, once.
    pub fn expand_alias(&self, mut tokens: Vec<String>) -> Vec<String> {
        let Some(first) = tokens.first() else {
            return tokens;
        };
        let Some(expansion) = self.aliases.get(first) else {
            return tokens;
        };
        let mut expanded: Vec<String> = expansion.split_whitespace().map(str::to_string).collect();
        expanded.extend(tokens.drain(1..));
        expanded
    }
}
