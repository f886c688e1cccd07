//! Command trait, registry, and dispatch logic.
//!
//! A line goes through variable expansion, quote-aware tokenizing and a
//! single alias substitution before it is dispatched by name. Builtins that
//! need the registry or the session tables are intercepted before lookup.

use std::collections::{BTreeMap, HashMap};
use std::fmt;

use linsim_pkg::PackageRegistry;
use linsim_platform::{SystemTime, TimeService};
use linsim_types::config::SimConfig;
use linsim_types::error::{Result, SimError};
use linsim_vfs::FileTree;

use crate::session::Session;

/// Directories searched when a name matches no registered command.
pub const BIN_DIRS: [&str; 3] = ["/bin", "/usr/bin", "/usr/local/bin"];

/// Order of sections in `help`.
const CATEGORY_ORDER: [&str; 7] = [
    "File Operations",
    "System Information",
    "Network",
    "Package Management",
    "System Control",
    "Programming",
    "Utilities",
];

/// `(name, usage, description, category)` of the intercepted builtins.
const BUILTINS: [(&str, &str, &str, &str); 8] = [
    ("help", "help [command]", "Show this help message", "Utilities"),
    ("which", "which <cmd>", "Locate command", "Utilities"),
    ("history", "history [-c]", "Command history", "Utilities"),
    ("env", "env", "Environment variables", "Utilities"),
    ("export", "export NAME=value", "Set an environment variable", "Utilities"),
    ("alias", "alias [name='command']", "Command aliases", "Utilities"),
    ("unalias", "unalias <name>", "Remove a command alias", "Utilities"),
    ("sudo", "sudo <command>", "Run as superuser", "System Control"),
];

/// Output produced by a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutput {
    /// Plain text.
    Text(String),
    /// Command produced no visible output.
    None,
    /// Signal to clear the terminal output buffer.
    Clear,
    /// Signal that the session has ended.
    Exit,
    /// Signal to open a text editor on a file.
    OpenEditor { program: String, file: String },
}

impl CommandOutput {
    /// Text a line-oriented UI would append for this output.
    pub fn render(&self) -> String {
        match self {
            Self::Text(s) => s.clone(),
            Self::None | Self::Clear => String::new(),
            Self::Exit => "Goodbye!".to_string(),
            Self::OpenEditor { program, .. } => format!("Opening {program} editor..."),
        }
    }
}

/// Everything a command may read or change, borrowed for one dispatch.
pub struct Environment<'a> {
    pub session: &'a mut Session,
    pub vfs: &'a mut FileTree,
    pub packages: &'a mut PackageRegistry,
    pub time: &'a dyn TimeService,
    pub config: &'a SimConfig,
}

impl Environment<'_> {
    /// Absolute path for a command argument.
    pub fn resolve(&self, arg: &str) -> String {
        self.session.resolve(arg)
    }

    pub fn now(&self) -> Result<SystemTime> {
        self.time.now()
    }

    pub fn user(&self) -> &str {
        &self.session.current_user
    }
}

/// A single executable command.
pub trait Command {
    /// The command name (what the user types).
    fn name(&self) -> &str;

    /// One-line description for `help`.
    fn description(&self) -> &str;

    /// Usage string (e.g. "ls \[path\]").
    fn usage(&self) -> &str;

    /// Section this command is listed under in `help`.
    fn category(&self) -> &str {
        "Utilities"
    }

    /// Execute the command with the given arguments and environment.
    fn execute(&self, args: &[&str], env: &mut Environment<'_>) -> Result<CommandOutput>;
}

/// A command error tagged with the name it was dispatched under.
#[derive(Debug)]
pub struct Failure {
    pub command: String,
    pub error: SimError,
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.error {
            SimError::UnknownCommand(_) => {
                write!(f, "{}\nTry 'help' for available commands.", self.error)
            },
            SimError::PackageNotFound(_) => write!(f, "E: {}", self.error),
            e if e.is_command_error() => write!(f, "{}: {e}", self.command),
            e => write!(f, "Error: {e}"),
        }
    }
}

impl std::error::Error for Failure {}

/// Registry of available commands with dispatch.
pub struct CommandRegistry {
    commands: HashMap<String, Box<dyn Command>>,
}

impl CommandRegistry {
    /// Create an empty command registry.
    pub fn new() -> Self {
        Self {
            commands: HashMap::new(),
        }
    }

    /// Register a command. Replaces any existing command with the same name.
    pub fn register(&mut self, cmd: Box<dyn Command>) {
        self.commands.insert(cmd.name().to_string(), cmd);
    }

    pub fn contains(&self, name: &str) -> bool {
        self.commands.contains_key(name) || BUILTINS.iter().any(|b| b.0 == name)
    }

    /// Parse and execute a command line.
    pub fn execute(
        &self,
        line: &str,
        env: &mut Environment<'_>,
    ) -> std::result::Result<CommandOutput, Failure> {
        let expanded = expand_variables(line, env.session);
        let tokens = tokenize(&expanded).map_err(|error| Failure {
            command: "bash".to_string(),
            error,
        })?;
        let tokens = env.session.expand_alias(tokens);
        self.dispatch(&tokens, env)
    }

    fn dispatch(
        &self,
        tokens: &[String],
        env: &mut Environment<'_>,
    ) -> std::result::Result<CommandOutput, Failure> {
        let Some((name, rest)) = tokens.split_first() else {
            return Ok(CommandOutput::None);
        };
        let args: Vec<&str> = rest.iter().map(String::as_str).collect();
        log::debug!("dispatch: {name} {args:?}");

        let result = match name.as_str() {
            "help" => self.execute_help(&args),
            "which" => execute_which(&args, env),
            "history" => execute_history(&args, env),
            "env" => execute_env(env),
            "export" => execute_export(&args, env),
            "alias" => execute_alias(&args, env),
            "unalias" => execute_unalias(&args, env),
            "sudo" => return self.execute_sudo(rest, env),
            _ => match self.commands.get(name.as_str()) {
                Some(cmd) => cmd.execute(&args, env),
                None => execute_file(name, &args, env),
            },
        };
        result.map_err(|error| Failure {
            command: name.clone(),
            error,
        })
    }

    // -- Intercepted commands --

    /// Built-in help with access to the registry.
    fn execute_help(&self, args: &[&str]) -> Result<CommandOutput> {
        let mut entries: Vec<(&str, &str, &str, &str)> = BUILTINS.to_vec();
        for cmd in self.commands.values() {
            entries.push((cmd.name(), cmd.usage(), cmd.description(), cmd.category()));
        }

        if let Some(&topic) = args.first() {
            let Some(&(name, usage, desc, cat)) = entries.iter().find(|e| e.0 == topic) else {
                return Err(SimError::Usage(format!("no help topics match '{topic}'")));
            };
            return Ok(CommandOutput::Text(format!(
                "{name} ({cat})\n  {desc}\n  Usage: {usage}"
            )));
        }

        let mut sections: BTreeMap<usize, (&str, Vec<(&str, &str, &str)>)> = BTreeMap::new();
        for (name, usage, desc, cat) in entries {
            let rank = CATEGORY_ORDER
                .iter()
                .position(|c| *c == cat)
                .unwrap_or(CATEGORY_ORDER.len());
            sections
                .entry(rank)
                .or_insert_with(|| (cat, Vec::new()))
                .1
                .push((name, usage, desc));
        }

        let mut out = String::from("Available commands:\n");
        for (cat, mut cmds) in sections.into_values() {
            cmds.sort_by_key(|(name, _, _)| *name);
            out.push_str(&format!("\n{cat}:\n"));
            for (_, usage, desc) in cmds {
                out.push_str(&format!("  {usage:<32} - {desc}\n"));
            }
        }
        out.push_str("\nType 'help <command>' for details.");
        Ok(CommandOutput::Text(out))
    }

    /// `sudo`: re-dispatch the rest of the line as root.
    fn execute_sudo(
        &self,
        rest: &[String],
        env: &mut Environment<'_>,
    ) -> std::result::Result<CommandOutput, Failure> {
        if rest.is_empty() {
            return Err(Failure {
                command: "sudo".to_string(),
                error: SimError::Usage("missing command".to_string()),
            });
        }
        let prompt = format!("[sudo] password for {}: (simulated)", env.user());
        let previous = std::mem::replace(&mut env.session.current_user, "root".to_string());
        let result = self.dispatch(rest, env);
        env.session.current_user = previous;
        match result? {
            CommandOutput::Text(text) => Ok(CommandOutput::Text(format!("{prompt}\n{text}"))),
            CommandOutput::None => Ok(CommandOutput::Text(prompt)),
            other => Ok(other),
        }
    }

    /// Return a sorted list of (name, description) pairs.
    pub fn list_commands(&self) -> Vec<(&str, &str)> {
        let mut cmds: Vec<(&str, &str)> = self
            .commands
            .values()
            .map(|c| (c.name(), c.description()))
            .chain(BUILTINS.iter().map(|b| (b.0, b.2)))
            .collect();
        cmds.sort_by_key(|(name, _)| *name);
        cmds
    }
}

impl Default for CommandRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// First directory in `dirs` holding a file called `name`.
pub fn find_in_dirs<'d>(
    vfs: &FileTree,
    dirs: impl IntoIterator<Item = &'d str>,
    name: &str,
) -> Option<String> {
    if name.is_empty() || name.contains('/') {
        return None;
    }
    dirs.into_iter()
        .map(|dir| linsim_vfs::normalize_path(dir, name))
        .find(|path| vfs.get(path).is_some_and(|n| n.is_file()))
}

/// Fallback for names with no registered handler.
fn execute_file(name: &str, args: &[&str], env: &mut Environment<'_>) -> Result<CommandOutput> {
    if find_in_dirs(env.vfs, BIN_DIRS, name).is_some() {
        return Ok(CommandOutput::Text(format!(
            "Executing {name} with args: {} (simulated)",
            args.join(" ")
        )));
    }
    Err(SimError::UnknownCommand(name.to_string()))
}

fn execute_which(args: &[&str], env: &mut Environment<'_>) -> Result<CommandOutput> {
    let Some(&name) = args.first() else {
        return Err(SimError::Usage("missing command".to_string()));
    };
    let search = env.session.var("PATH").unwrap_or_default().to_string();
    match find_in_dirs(env.vfs, search.split(':').filter(|d| !d.is_empty()), name) {
        Some(path) => Ok(CommandOutput::Text(path)),
        None => Err(SimError::Usage(format!("no {name} in ({search})"))),
    }
}

fn execute_history(args: &[&str], env: &mut Environment<'_>) -> Result<CommandOutput> {
    if args.first() == Some(&"-c") {
        env.session.history.clear();
        return Ok(CommandOutput::None);
    }
    let out: Vec<String> = env
        .session
        .history
        .iter()
        .enumerate()
        .map(|(i, entry)| format!("{:>5}  {entry}", i + 1))
        .collect();
    if out.is_empty() {
        return Ok(CommandOutput::None);
    }
    Ok(CommandOutput::Text(out.join("\n")))
}

fn execute_env(env: &mut Environment<'_>) -> Result<CommandOutput> {
    let out: Vec<String> = env
        .session
        .environment
        .iter()
        .map(|(k, v)| format!("{k}={v}"))
        .collect();
    Ok(CommandOutput::Text(out.join("\n")))
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

fn execute_export(args: &[&str], env: &mut Environment<'_>) -> Result<CommandOutput> {
    if args.is_empty() {
        let out: Vec<String> = env
            .session
            .environment
            .iter()
            .map(|(k, v)| format!("declare -x {k}=\"{v}\""))
            .collect();
        return Ok(CommandOutput::Text(out.join("\n")));
    }
    for arg in args {
        let (name, value) = match arg.split_once('=') {
            Some((n, v)) => (n, Some(v)),
            None => (*arg, None),
        };
        if !is_identifier(name) {
            return Err(SimError::Usage(format!("`{arg}': not a valid identifier")));
        }
        if let Some(value) = value {
            env.session.set_var(name, value);
        }
    }
    Ok(CommandOutput::None)
}

fn execute_alias(args: &[&str], env: &mut Environment<'_>) -> Result<CommandOutput> {
    if args.is_empty() {
        let out: Vec<String> = env
            .session
            .aliases
            .iter()
            .map(|(k, v)| format!("alias {k}='{v}'"))
            .collect();
        return Ok(CommandOutput::Text(out.join("\n")));
    }
    let assignment = args.join(" ");
    if let Some((name, value)) = assignment.split_once('=') {
        let name = name.trim();
        let value = value.trim().trim_matches('\'').trim_matches('"');
        if name.is_empty() || name.contains('/') {
            return Err(SimError::Usage(format!("`{assignment}': invalid alias name")));
        }
        env.session.aliases.insert(name.to_string(), value.to_string());
        return Ok(CommandOutput::None);
    }
    let mut out = Vec::new();
    for name in args {
        match env.session.aliases.get(*name) {
            Some(value) => out.push(format!("alias {name}='{value}'")),
            None => return Err(SimError::Usage(format!("{name}: not found"))),
        }
    }
    Ok(CommandOutput::Text(out.join("\n")))
}

fn execute_unalias(args: &[&str], env: &mut Environment<'_>) -> Result<CommandOutput> {
    if args.is_empty() {
        return Err(SimError::Usage(
            "usage: unalias [-a] name [name ...]".to_string(),
        ));
    }
    if args[0] == "-a" {
        env.session.aliases.clear();
        return Ok(CommandOutput::None);
    }
    for name in args {
        if env.session.aliases.shift_remove(*name).is_none() {
            return Err(SimError::Usage(format!("{name}: not found")));
        }
    }
    Ok(CommandOutput::None)
}

// ---------------------------------------------------------------------------
// Variable expansion
// ---------------------------------------------------------------------------

/// Expand `$VAR` and `${VAR}` from the session environment. Text inside
/// single quotes is left alone; unset variables expand to nothing.
pub fn expand_variables(input: &str, session: &Session) -> String {
    let chars: Vec<char> = input.chars().collect();
    let mut result = String::with_capacity(input.len());
    let mut in_single = false;
    let mut in_double = false;
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        // An escaped quote opens nothing.
        if c == '\\'
            && !in_single
            && let Some(&next @ ('\'' | '"')) = chars.get(i + 1)
        {
            result.push(c);
            result.push(next);
            i += 2;
            continue;
        }
        match c {
            '\'' if !in_double => in_single = !in_single,
            '"' if !in_single => in_double = !in_double,
            _ => {},
        }
        if c != '$' || in_single || i + 1 >= chars.len() {
            result.push(c);
            i += 1;
            continue;
        }
        if chars[i + 1] == '?' {
            result.push('0');
            i += 2;
            continue;
        }
        if chars[i + 1] == '{'
            && let Some(end) = chars[i + 2..].iter().position(|&c| c == '}')
        {
            let name: String = chars[i + 2..i + 2 + end].iter().collect();
            result.push_str(session.var(&name).unwrap_or_default());
            i += 3 + end;
            continue;
        }
        let start = i + 1;
        let mut end = start;
        while end < chars.len() && (chars[end].is_ascii_alphanumeric() || chars[end] == '_') {
            end += 1;
        }
        if end == start {
            result.push('$');
            i += 1;
            continue;
        }
        let name: String = chars[start..end].iter().collect();
        result.push_str(session.var(&name).unwrap_or_default());
        i = end;
    }
    result
}

// ---------------------------------------------------------------------------
// Tokenizer
// ---------------------------------------------------------------------------

/// Split a line on whitespace, honoring single quotes, double quotes and
/// backslash escapes.
pub fn tokenize(input: &str) -> Result<Vec<String>> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut has_token = false;
    let mut chars = input.chars().peekable();
    let mut quote: Option<char> = None;

    while let Some(ch) = chars.next() {
        match quote {
            Some(q) if ch == q => quote = None,
            Some('"') if ch == '\\' && matches!(chars.peek(), Some('"' | '\\' | '$')) => {
                if let Some(next) = chars.next() {
                    current.push(next);
                }
            },
            Some(_) => current.push(ch),
            None => match ch {
                '\'' | '"' => {
                    quote = Some(ch);
                    has_token = true;
                },
                '\\' => {
                    if let Some(next) = chars.next() {
                        current.push(next);
                        has_token = true;
                    }
                },
                c if c.is_whitespace() => {
                    if has_token {
                        tokens.push(std::mem::take(&mut current));
                        has_token = false;
                    }
                },
                _ => {
                    current.push(ch);
                    has_token = true;
                },
            },
        }
    }

    if let Some(q) = quote {
        return Err(SimError::Usage(format!(
            "unexpected EOF while looking for matching `{q}'"
        )));
    }
    if has_token {
        tokens.push(current);
    }
    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;
    use linsim_platform::FixedTime;

    struct EchoCmd;
    impl Command for EchoCmd {
        fn name(&self) -> &str {
            "echo"
        }
        fn description(&self) -> &str {
            "Print arguments"
        }
        fn usage(&self) -> &str {
            "echo [text...]"
        }
        fn execute(&self, args: &[&str], _env: &mut Environment<'_>) -> Result<CommandOutput> {
            Ok(CommandOutput::Text(args.join(" ")))
        }
    }

    struct Fixture {
        session: Session,
        vfs: FileTree,
        packages: PackageRegistry,
        time: FixedTime,
        config: SimConfig,
    }

    impl Fixture {
        fn new() -> Self {
            let config = SimConfig::default();
            let now = SystemTime::date(2024, 1, 15);
            let mut vfs = FileTree::new(now);
            vfs.create_dir_all("/usr/bin", "root", now).unwrap();
            vfs.create_dir_all("/home/wisnu", "wisnu", now).unwrap();
            vfs.write_file("/usr/bin/python3", "Python", "root", now).unwrap();
            Self {
                session: Session::new(&config),
                vfs,
                packages: PackageRegistry::default(),
                time: FixedTime::new(now, 0),
                config,
            }
        }

        fn run(&mut self, reg: &CommandRegistry, line: &str) -> std::result::Result<CommandOutput, Failure> {
            let mut env = Environment {
                session: &mut self.session,
                vfs: &mut self.vfs,
                packages: &mut self.packages,
                time: &self.time,
                config: &self.config,
            };
            reg.execute(line, &mut env)
        }
    }

    fn registry() -> CommandRegistry {
        let mut reg = CommandRegistry::new();
        reg.register(Box::new(EchoCmd));
        reg
    }

    fn text(out: std::result::Result<CommandOutput, Failure>) -> String {
        match out.unwrap() {
            CommandOutput::Text(s) => s,
            other => panic!("expected text, got {other:?}"),
        }
    }

    #[test]
    fn register_and_execute() {
        let mut fx = Fixture::new();
        assert_eq!(text(fx.run(&registry(), "echo hello world")), "hello world");
    }

    #[test]
    fn empty_input() {
        let mut fx = Fixture::new();
        assert_eq!(fx.run(&registry(), "   ").unwrap(), CommandOutput::None);
    }

    #[test]
    fn unknown_command_renders_hint() {
        let mut fx = Fixture::new();
        let err = fx.run(&registry(), "zzzz").unwrap_err();
        assert_eq!(err.to_string(), "zzzz: command not found\nTry 'help' for available commands.");
    }

    #[test]
    fn binary_in_bin_dir_is_simulated() {
        let mut fx = Fixture::new();
        assert_eq!(
            text(fx.run(&registry(), "python3 -c x")),
            "Executing python3 with args: -c x (simulated)"
        );
    }

    #[test]
    fn command_names_are_case_sensitive() {
        let mut fx = Fixture::new();
        assert!(fx.run(&registry(), "ECHO hi").is_err());
    }

    #[test]
    fn variables_expand() {
        let mut fx = Fixture::new();
        assert_eq!(text(fx.run(&registry(), "echo $USER ${HOME} $NOPE.")), "wisnu /home/wisnu .");
    }

    #[test]
    fn single_quotes_suppress_expansion() {
        let mut fx = Fixture::new();
        assert_eq!(text(fx.run(&registry(), "echo '$USER'")), "$USER");
    }

    #[test]
    fn apostrophe_inside_double_quotes_still_expands() {
        let mut fx = Fixture::new();
        assert_eq!(text(fx.run(&registry(), "echo \"it's $USER\"")), "it's wisnu");
        assert_eq!(text(fx.run(&registry(), "echo \"'$USER'\"")), "'wisnu'");
        assert_eq!(text(fx.run(&registry(), "echo don\\'t $USER")), "don't wisnu");
    }

    #[test]
    fn alias_set_list_and_use() {
        let mut fx = Fixture::new();
        let reg = registry();
        fx.run(&reg, "alias hi='echo hello there'").unwrap();
        assert_eq!(text(fx.run(&reg, "hi you")), "hello there you");
        assert_eq!(text(fx.run(&reg, "alias hi")), "alias hi='echo hello there'");
        let all = text(fx.run(&reg, "alias"));
        assert!(all.starts_with("alias ll='ls -la'\nalias la='ls -A'"));
        assert!(all.ends_with("alias hi='echo hello there'"));
    }

    #[test]
    fn unalias_removes() {
        let mut fx = Fixture::new();
        let reg = registry();
        fx.run(&reg, "unalias ll").unwrap();
        assert!(!fx.session.aliases.contains_key("ll"));
        let err = fx.run(&reg, "unalias ll").unwrap_err();
        assert_eq!(err.to_string(), "unalias: ll: not found");
    }

    #[test]
    fn export_sets_variable() {
        let mut fx = Fixture::new();
        let reg = registry();
        fx.run(&reg, "export EDITOR=nano").unwrap();
        assert_eq!(fx.session.var("EDITOR"), Some("nano"));
        assert!(text(fx.run(&reg, "env")).ends_with("EDITOR=nano"));
        assert!(fx.run(&reg, "export 1X=y").is_err());
    }

    #[test]
    fn env_lists_in_seed_order() {
        let mut fx = Fixture::new();
        let out = text(fx.run(&registry(), "env"));
        assert!(out.starts_with("HOME=/home/wisnu\nUSER=wisnu\nPATH="));
    }

    #[test]
    fn which_searches_path() {
        let mut fx = Fixture::new();
        let reg = registry();
        assert_eq!(text(fx.run(&reg, "which python3")), "/usr/bin/python3");
        let err = fx.run(&reg, "which nothing").unwrap_err();
        assert!(err.to_string().starts_with("which: no nothing in (/usr/local/sbin:"));
    }

    #[test]
    fn history_lists_session_transcript() {
        let mut fx = Fixture::new();
        fx.session.history = vec!["ls".into(), "pwd".into()];
        assert_eq!(text(fx.run(&registry(), "history")), "    1  ls\n    2  pwd");
        fx.run(&registry(), "history -c").unwrap();
        assert!(fx.session.history.is_empty());
    }

    #[test]
    fn help_lists_registered_and_builtin() {
        let mut fx = Fixture::new();
        let out = text(fx.run(&registry(), "help"));
        assert!(out.starts_with("Available commands:"));
        assert!(out.contains("echo [text...]"));
        assert!(out.contains("Run as superuser"));
        assert!(out.find("System Control:").unwrap() < out.find("Utilities:").unwrap());
    }

    #[test]
    fn help_topic() {
        let mut fx = Fixture::new();
        let reg = registry();
        assert_eq!(
            text(fx.run(&reg, "help echo")),
            "echo (Utilities)\n  Print arguments\n  Usage: echo [text...]"
        );
        assert!(fx.run(&reg, "help nope").is_err());
    }

    #[test]
    fn sudo_runs_as_root_and_restores_user() {
        let mut fx = Fixture::new();
        let out = text(fx.run(&registry(), "sudo echo hi"));
        assert_eq!(out, "[sudo] password for wisnu: (simulated)\nhi");
        assert_eq!(fx.session.current_user, "wisnu");
        assert_eq!(fx.run(&registry(), "sudo").unwrap_err().to_string(), "sudo: missing command");
    }

    #[test]
    fn failure_rendering() {
        let f = |error| Failure { command: "cat".into(), error }.to_string();
        assert_eq!(f(SimError::NotFound("x".into())), "cat: x: No such file or directory");
        assert_eq!(f(SimError::PackageNotFound("x".into())), "E: Unable to locate package x");
        assert_eq!(f(SimError::Config("bad".into())), "Error: config error: bad");
    }

    #[test]
    fn render_signals() {
        assert_eq!(CommandOutput::Exit.render(), "Goodbye!");
        assert_eq!(CommandOutput::Clear.render(), "");
        let editor = CommandOutput::OpenEditor {
            program: "vim".into(),
            file: "/tmp/a".into(),
        };
        assert_eq!(editor.render(), "Opening vim editor...");
    }

    #[test]
    fn tokenize_quotes_and_escapes() {
        assert_eq!(tokenize("a 'b c' \"d e\" f\\ g").unwrap(), vec!["a", "b c", "d e", "f g"]);
        assert_eq!(tokenize("  spaced   out ").unwrap(), vec!["spaced", "out"]);
        assert_eq!(tokenize("echo ''").unwrap(), vec!["echo", ""]);
    }

    #[test]
    fn tokenize_unterminated_quote() {
        assert!(tokenize("echo 'oops").is_err());
    }

    #[test]
    fn tokenize_error_is_prefixed_with_shell() {
        let mut fx = Fixture::new();
        let err = fx.run(&registry(), "echo \"x").unwrap_err();
        assert_eq!(err.to_string(), "bash: unexpected EOF while looking for matching `\"'");
    }

    mod prop {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn plain_words_tokenize_like_split(words in proptest::collection::vec("[a-zA-Z0-9._/-]{1,10}", 0..8)) {
                let line = words.join("  ");
                prop_assert_eq!(tokenize(&line).unwrap(), words);
            }
        }
    }
}
