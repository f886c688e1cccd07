//! Filesystem commands and the helpers shared by every command module.

use linsim_types::error::{Result, SimError};
use linsim_vfs::{EntryKind, Node, apply_mode, file_name, is_within, parent};

use crate::interpreter::{Command, CommandOutput, CommandRegistry, Environment};

/// Register every built-in command.
pub fn register_builtins(reg: &mut CommandRegistry) {
    reg.register(Box::new(LsCmd));
    reg.register(Box::new(PwdCmd));
    reg.register(Box::new(CdCmd));
    reg.register(Box::new(MkdirCmd));
    reg.register(Box::new(TouchCmd));
    reg.register(Box::new(CatCmd));
    reg.register(Box::new(CpCmd));
    reg.register(Box::new(MvCmd));
    reg.register(Box::new(RmCmd));
    reg.register(Box::new(ChmodCmd));
    reg.register(Box::new(ChownCmd));
    reg.register(Box::new(FindCmd));
    for name in ["grep", "egrep", "fgrep"] {
        reg.register(Box::new(GrepCmd { name }));
    }
    crate::register_user_commands(reg);
    crate::register_system_commands(reg);
    crate::register_network_commands(reg);
    crate::register_package_commands(reg);
    crate::register_dev_commands(reg);
}

// ---------------------------------------------------------------------------
// Argument parsing
// ---------------------------------------------------------------------------

/// Short flags, long flags and operands of one invocation.
///
/// `-la` sets `l` and `a`; `--` ends option parsing; a lone `-` is an
/// operand.
#[derive(Debug, Default)]
pub(crate) struct Flags<'a> {
    short: Vec<char>,
    long: Vec<&'a str>,
    pub operands: Vec<&'a str>,
}

impl<'a> Flags<'a> {
    pub fn parse(args: &[&'a str]) -> Self {
        let mut flags = Self::default();
        let mut options_done = false;
        for &arg in args {
            if options_done || arg == "-" || !arg.starts_with('-') {
                flags.operands.push(arg);
            } else if arg == "--" {
                options_done = true;
            } else if let Some(long) = arg.strip_prefix("--") {
                flags.long.push(long.split('=').next().unwrap_or(long));
            } else {
                flags.short.extend(arg[1..].chars());
            }
        }
        flags
    }

    pub fn has(&self, c: char) -> bool {
        self.short.contains(&c)
    }

    pub fn has_long(&self, name: &str) -> bool {
        self.long.contains(&name)
    }
}

/// Match `text` against a shell glob with `*` and `?`.
pub(crate) fn glob_match(pattern: &str, text: &str) -> bool {
    let p: Vec<char> = pattern.chars().collect();
    let t: Vec<char> = text.chars().collect();
    let (mut pi, mut ti) = (0, 0);
    let mut backtrack: Option<(usize, usize)> = None;

    while ti < t.len() {
        if pi < p.len() && (p[pi] == '?' || p[pi] == t[ti]) {
            pi += 1;
            ti += 1;
        } else if pi < p.len() && p[pi] == '*' {
            backtrack = Some((pi, ti));
            pi += 1;
        } else if let Some((star, matched)) = backtrack {
            pi = star + 1;
            ti = matched + 1;
            backtrack = Some((star, matched + 1));
        } else {
            return false;
        }
    }
    p[pi..].iter().all(|&c| c == '*')
}

fn no_such_file(action: &str, arg: &str) -> SimError {
    SimError::Usage(format!("{action} '{arg}': No such file or directory"))
}

/// Run `op` on each operand in turn. A failing operand adds a
/// `<cmd>: <reason>` line and the rest still run; a lone failure with
/// nothing else to show becomes the command's error.
fn for_each_operand<'a>(
    cmd: &str,
    operands: &[&'a str],
    mut op: impl FnMut(&'a str) -> Result<Option<String>>,
) -> Result<CommandOutput> {
    let mut lines = Vec::new();
    let mut failures = Vec::new();
    for &arg in operands {
        match op(arg) {
            Ok(Some(line)) => lines.push(line),
            Ok(None) => {},
            Err(e) if e.is_command_error() => {
                lines.push(format!("{cmd}: {e}"));
                failures.push(e);
            },
            Err(e) => return Err(e),
        }
    }
    if lines.len() == 1
        && let Some(e) = failures.pop()
    {
        return Err(e);
    }
    if lines.is_empty() {
        return Ok(CommandOutput::None);
    }
    Ok(CommandOutput::Text(lines.join("\n")))
}

/// Whether a relative operand has nowhere to land because the working
/// directory was removed from under the session.
fn cwd_vanished(env: &Environment<'_>, arg: &str) -> bool {
    !arg.starts_with(['/', '~']) && !env.vfs.is_dir(&env.session.current_path)
}

// ---------------------------------------------------------------------------
// ls
// ---------------------------------------------------------------------------

struct LsCmd;
impl Command for LsCmd {
    fn name(&self) -> &str {
        "ls"
    }
    fn description(&self) -> &str {
        "List directory contents"
    }
    fn usage(&self) -> &str {
        "ls [-laAF] [path]"
    }
    fn category(&self) -> &str {
        "File Operations"
    }
    fn execute(&self, args: &[&str], env: &mut Environment<'_>) -> Result<CommandOutput> {
        let flags = Flags::parse(args);
        let show_hidden = flags.has('a') || flags.has('A');
        let long = flags.has('l');
        let classify = flags.has('F');

        let arg = flags.operands.first().copied().unwrap_or(".");
        let path = env.resolve(arg);
        let node = env
            .vfs
            .get(&path)
            .ok_or_else(|| no_such_file("cannot access", arg))?;

        let entries: Vec<(&str, &Node)> = if node.is_dir() {
            env.vfs
                .list_children(&path)?
                .filter(|(name, _)| show_hidden || !name.starts_with('.'))
                .collect()
        } else {
            vec![(arg, node)]
        };

        let label = |name: &str, node: &Node| {
            if !classify {
                name.to_string()
            } else if node.is_dir() {
                format!("{name}/")
            } else if node.is_executable() {
                format!("{name}*")
            } else {
                name.to_string()
            }
        };

        if long {
            let mut lines = vec![format!("total {}", entries.len())];
            for &(name, node) in &entries {
                let meta = &node.meta;
                lines.push(format!(
                    "{} 1 {} {} {:>8} {} {}",
                    meta.permissions,
                    meta.owner,
                    meta.group,
                    meta.size,
                    meta.modified.to_listing_stamp(),
                    label(name, node)
                ));
            }
            return Ok(CommandOutput::Text(lines.join("\n")));
        }

        if entries.is_empty() {
            return Ok(CommandOutput::None);
        }
        let names: Vec<String> = entries.iter().map(|&(n, node)| label(n, node)).collect();
        Ok(CommandOutput::Text(names.join("  ")))
    }
}

// ---------------------------------------------------------------------------
// pwd
// ---------------------------------------------------------------------------

struct PwdCmd;
impl Command for PwdCmd {
    fn name(&self) -> &str {
        "pwd"
    }
    fn description(&self) -> &str {
        "Print working directory"
    }
    fn usage(&self) -> &str {
        "pwd"
    }
    fn category(&self) -> &str {
        "File Operations"
    }
    fn execute(&self, _args: &[&str], env: &mut Environment<'_>) -> Result<CommandOutput> {
        Ok(CommandOutput::Text(env.session.current_path.clone()))
    }
}

// ---------------------------------------------------------------------------
// cd
// ---------------------------------------------------------------------------

struct CdCmd;
impl Command for CdCmd {
    fn name(&self) -> &str {
        "cd"
    }
    fn description(&self) -> &str {
        "Change directory"
    }
    fn usage(&self) -> &str {
        "cd [dir]"
    }
    fn category(&self) -> &str {
        "File Operations"
    }
    fn execute(&self, args: &[&str], env: &mut Environment<'_>) -> Result<CommandOutput> {
        let (arg, echo) = match args.first() {
            None => (env.session.home().to_string(), false),
            Some(&"-") => match env.session.var("OLDPWD") {
                Some(old) => (old.to_string(), true),
                None => return Err(SimError::Usage("OLDPWD not set".to_string())),
            },
            Some(&a) => (a.to_string(), false),
        };
        let target = env.resolve(&arg);
        match env.vfs.get(&target) {
            None => return Err(SimError::NotFound(arg)),
            Some(node) if !node.is_dir() => return Err(SimError::NotADirectory(arg)),
            Some(_) => {},
        }
        env.session.change_dir(target.clone());
        if echo {
            return Ok(CommandOutput::Text(target));
        }
        Ok(CommandOutput::None)
    }
}

// ---------------------------------------------------------------------------
// mkdir
// ---------------------------------------------------------------------------

struct MkdirCmd;
impl Command for MkdirCmd {
    fn name(&self) -> &str {
        "mkdir"
    }
    fn description(&self) -> &str {
        "Create directory"
    }
    fn usage(&self) -> &str {
        "mkdir [-p] <dir>..."
    }
    fn category(&self) -> &str {
        "File Operations"
    }
    fn execute(&self, args: &[&str], env: &mut Environment<'_>) -> Result<CommandOutput> {
        let flags = Flags::parse(args);
        if flags.operands.is_empty() {
            return Err(SimError::MissingOperand);
        }
        let now = env.now()?;
        let owner = env.user().to_string();
        let parents = flags.has('p');
        for_each_operand("mkdir", &flags.operands, |arg| {
            if cwd_vanished(env, arg) {
                return Err(SimError::PermissionDenied(format!(
                    "cannot create directory '{arg}'"
                )));
            }
            let path = env.resolve(arg);
            if parents {
                env.vfs.create_dir_all(&path, &owner, now)?;
                return Ok(None);
            }
            if env.vfs.exists(&path) {
                return Err(SimError::AlreadyExists(arg.to_string()));
            }
            if !env.vfs.is_dir(parent(&path)) {
                return Err(no_such_file("cannot create directory", arg));
            }
            env.vfs.create_dir(parent(&path), file_name(&path), &owner, now)?;
            Ok(None)
        })
    }
}

// ---------------------------------------------------------------------------
// touch
// ---------------------------------------------------------------------------

struct TouchCmd;
impl Command for TouchCmd {
    fn name(&self) -> &str {
        "touch"
    }
    fn description(&self) -> &str {
        "Create file"
    }
    fn usage(&self) -> &str {
        "touch <file>..."
    }
    fn category(&self) -> &str {
        "File Operations"
    }
    fn execute(&self, args: &[&str], env: &mut Environment<'_>) -> Result<CommandOutput> {
        if args.is_empty() {
            return Err(SimError::MissingOperand);
        }
        let now = env.now()?;
        let owner = env.user().to_string();
        for_each_operand("touch", args, |arg| {
            if cwd_vanished(env, arg) {
                return Err(SimError::PermissionDenied(format!("cannot touch '{arg}'")));
            }
            let path = env.resolve(arg);
            if env.vfs.exists(&path) {
                env.vfs.touch(&path, now)?;
            } else if env.vfs.is_dir(parent(&path)) {
                env.vfs.create_file(parent(&path), file_name(&path), &owner, now)?;
            } else {
                return Err(no_such_file("cannot touch", arg));
            }
            Ok(None)
        })
    }
}

// ---------------------------------------------------------------------------
// cat
// ---------------------------------------------------------------------------

struct CatCmd;
impl Command for CatCmd {
    fn name(&self) -> &str {
        "cat"
    }
    fn description(&self) -> &str {
        "Display file contents"
    }
    fn usage(&self) -> &str {
        "cat <file>..."
    }
    fn category(&self) -> &str {
        "File Operations"
    }
    fn execute(&self, args: &[&str], env: &mut Environment<'_>) -> Result<CommandOutput> {
        if args.is_empty() {
            return Err(SimError::MissingOperand);
        }
        let mut parts = Vec::with_capacity(args.len());
        for arg in args {
            let node = env
                .vfs
                .get(&env.resolve(arg))
                .ok_or_else(|| SimError::NotFound((*arg).to_string()))?;
            let content = node
                .content()
                .ok_or_else(|| SimError::NotAFile((*arg).to_string()))?;
            parts.push(content);
        }
        Ok(CommandOutput::Text(parts.join("\n")))
    }
}

// ---------------------------------------------------------------------------
// cp / mv
// ---------------------------------------------------------------------------

/// Source and destination operands, or the coreutils complaint.
fn src_dst<'a>(operands: &[&'a str]) -> Result<(&'a str, &'a str)> {
    match operands {
        [] => Err(SimError::Usage("missing file operand".to_string())),
        [src] => Err(SimError::Usage(format!(
            "missing destination file operand after '{src}'"
        ))),
        [src, dst, ..] => Ok((src, dst)),
    }
}

/// The landing path spelled the way the user wrote the destination:
/// `dir/name` when the source drops into an existing directory.
fn shown_target(dst: &str, to: &str, target: &str) -> String {
    if target == to {
        dst.to_string()
    } else {
        format!("{}/{}", dst.trim_end_matches('/'), file_name(target))
    }
}

fn same_file(src: &str, shown: &str) -> SimError {
    SimError::InvalidArgument(format!("'{src}' and '{shown}' are the same file"))
}

struct CpCmd;
impl Command for CpCmd {
    fn name(&self) -> &str {
        "cp"
    }
    fn description(&self) -> &str {
        "Copy file/directory"
    }
    fn usage(&self) -> &str {
        "cp [-r] <src> <dst>"
    }
    fn category(&self) -> &str {
        "File Operations"
    }
    fn execute(&self, args: &[&str], env: &mut Environment<'_>) -> Result<CommandOutput> {
        let flags = Flags::parse(args);
        let (src, dst) = src_dst(&flags.operands)?;
        let from = env.resolve(src);
        if !env.vfs.exists(&from) {
            return Err(no_such_file("cannot stat", src));
        }
        let recursive = flags.has('r') || flags.has('R') || flags.has('a');
        let to = env.resolve(dst);
        let target = env.vfs.landing_path(&from, &to)?;
        let shown = shown_target(dst, &to, &target);
        if target == from {
            return Err(same_file(src, &shown));
        }
        if is_within(&target, &from) {
            return Err(SimError::InvalidArgument(format!(
                "cannot copy a directory, '{src}', into itself, '{shown}'"
            )));
        }
        let now = env.now()?;
        env.vfs.copy(&from, &to, recursive, now)?;
        Ok(CommandOutput::Text(format!("cp: copied '{src}' to '{dst}'")))
    }
}

struct MvCmd;
impl Command for MvCmd {
    fn name(&self) -> &str {
        "mv"
    }
    fn description(&self) -> &str {
        "Move/rename file"
    }
    fn usage(&self) -> &str {
        "mv <src> <dst>"
    }
    fn category(&self) -> &str {
        "File Operations"
    }
    fn execute(&self, args: &[&str], env: &mut Environment<'_>) -> Result<CommandOutput> {
        let flags = Flags::parse(args);
        let (src, dst) = src_dst(&flags.operands)?;
        let from = env.resolve(src);
        if !env.vfs.exists(&from) {
            return Err(no_such_file("cannot stat", src));
        }
        let to = env.resolve(dst);
        let target = env.vfs.landing_path(&from, &to)?;
        let shown = shown_target(dst, &to, &target);
        if target == from {
            return Err(same_file(src, &shown));
        }
        if is_within(&target, &from) {
            return Err(SimError::InvalidArgument(format!(
                "cannot move '{src}' to a subdirectory of itself, '{shown}'"
            )));
        }
        env.vfs.rename(&from, &to)?;
        Ok(CommandOutput::Text(format!("mv: moved '{src}' to '{dst}'")))
    }
}

// ---------------------------------------------------------------------------
// rm
// ---------------------------------------------------------------------------

struct RmCmd;
impl Command for RmCmd {
    fn name(&self) -> &str {
        "rm"
    }
    fn description(&self) -> &str {
        "Remove file/directory"
    }
    fn usage(&self) -> &str {
        "rm [-rf] <path>..."
    }
    fn category(&self) -> &str {
        "File Operations"
    }
    fn execute(&self, args: &[&str], env: &mut Environment<'_>) -> Result<CommandOutput> {
        let flags = Flags::parse(args);
        let force = flags.has('f');
        let recursive = flags.has('r') || flags.has('R');
        if flags.operands.is_empty() {
            if force {
                return Ok(CommandOutput::None);
            }
            return Err(SimError::MissingOperand);
        }

        for_each_operand("rm", &flags.operands, |arg| {
            let path = env.resolve(arg);
            match env.vfs.get(&path) {
                None if force => return Ok(None),
                None => return Err(no_such_file("cannot remove", arg)),
                Some(node) if node.is_dir() && !recursive => {
                    return Err(SimError::Usage(format!(
                        "cannot remove '{arg}': Is a directory"
                    )));
                },
                Some(_) => {},
            }
            env.vfs.remove(&path, recursive)?;
            log::debug!("removed {path}");
            Ok(Some(format!("rm: removed '{arg}'")))
        })
    }
}

// ---------------------------------------------------------------------------
// chmod / chown
// ---------------------------------------------------------------------------

struct ChmodCmd;
impl Command for ChmodCmd {
    fn name(&self) -> &str {
        "chmod"
    }
    fn description(&self) -> &str {
        "Change file permissions"
    }
    fn usage(&self) -> &str {
        "chmod <mode> <file>..."
    }
    fn category(&self) -> &str {
        "File Operations"
    }
    fn execute(&self, args: &[&str], env: &mut Environment<'_>) -> Result<CommandOutput> {
        let [mode, files @ ..] = args else {
            return Err(SimError::MissingOperand);
        };
        if files.is_empty() {
            return Err(SimError::MissingOperand);
        }
        apply_mode(mode, 0)?;
        for_each_operand("chmod", files, |file| {
            let path = env.resolve(file);
            if !env.vfs.exists(&path) {
                return Err(no_such_file("cannot access", file));
            }
            env.vfs.set_permissions(&path, mode)?;
            Ok(Some(format!("chmod: changed permissions of '{file}' to {mode}")))
        })
    }
}

struct ChownCmd;
impl Command for ChownCmd {
    fn name(&self) -> &str {
        "chown"
    }
    fn description(&self) -> &str {
        "Change file ownership"
    }
    fn usage(&self) -> &str {
        "chown <owner[:group]> <file>..."
    }
    fn category(&self) -> &str {
        "File Operations"
    }
    fn execute(&self, args: &[&str], env: &mut Environment<'_>) -> Result<CommandOutput> {
        let [spec, files @ ..] = args else {
            return Err(SimError::MissingOperand);
        };
        if files.is_empty() {
            return Err(SimError::MissingOperand);
        }
        let (owner, group) = match spec.split_once(':') {
            Some((o, g)) => (o, Some(g).filter(|g| !g.is_empty())),
            None => (*spec, None),
        };
        if owner.is_empty() && group.is_none() {
            return Err(SimError::InvalidArgument(format!("invalid spec: '{spec}'")));
        }
        for_each_operand("chown", files, |file| {
            let path = env.resolve(file);
            if !env.vfs.exists(&path) {
                return Err(no_such_file("cannot access", file));
            }
            env.vfs.set_owner(&path, owner, group)?;
            Ok(Some(format!("chown: changed ownership of '{file}' to {spec}")))
        })
    }
}

// ---------------------------------------------------------------------------
// find
// ---------------------------------------------------------------------------

struct FindCmd;
impl Command for FindCmd {
    fn name(&self) -> &str {
        "find"
    }
    fn description(&self) -> &str {
        "Find files and directories"
    }
    fn usage(&self) -> &str {
        "find [path] [-name pattern] [-type f|d]"
    }
    fn category(&self) -> &str {
        "File Operations"
    }
    fn execute(&self, args: &[&str], env: &mut Environment<'_>) -> Result<CommandOutput> {
        let mut start = ".";
        let mut rest = args;
        if let Some((&first, tail)) = args.split_first()
            && !first.starts_with('-')
        {
            start = first;
            rest = tail;
        }

        let mut name_pattern: Option<&str> = None;
        let mut kind: Option<EntryKind> = None;
        let mut iter = rest.iter();
        while let Some(&pred) = iter.next() {
            let value = iter
                .next()
                .ok_or_else(|| SimError::Usage(format!("missing argument to `{pred}'")))?;
            match pred {
                "-name" => name_pattern = Some(*value),
                "-type" => {
                    kind = Some(match *value {
                        "f" => EntryKind::File,
                        "d" => EntryKind::Directory,
                        other => {
                            return Err(SimError::Usage(format!(
                                "Unknown argument to -type: {other}"
                            )));
                        },
                    });
                },
                other => return Err(SimError::Usage(format!("unknown predicate `{other}'"))),
            }
        }

        let root = env.resolve(start);
        let walked = env
            .vfs
            .walk(&root)
            .map_err(|_| SimError::Usage(format!("'{start}': No such file or directory")))?;

        let mut out = Vec::new();
        for (path, node) in walked {
            if kind.is_some_and(|k| node.kind() != k) {
                continue;
            }
            if let Some(pattern) = name_pattern
                && !glob_match(pattern, file_name(&path))
            {
                continue;
            }
            let rel = path
                .strip_prefix(root.as_str())
                .unwrap_or(&path)
                .trim_start_matches('/');
            out.push(if rel.is_empty() {
                start.to_string()
            } else if start.ends_with('/') {
                format!("{start}{rel}")
            } else {
                format!("{start}/{rel}")
            });
        }
        if out.is_empty() {
            return Ok(CommandOutput::None);
        }
        Ok(CommandOutput::Text(out.join("\n")))
    }
}

// ---------------------------------------------------------------------------
// grep / egrep / fgrep
// ---------------------------------------------------------------------------

/// Fixed-string line search. The three names share one implementation.
struct GrepCmd {
    name: &'static str,
}

impl Command for GrepCmd {
    fn name(&self) -> &str {
        self.name
    }
    fn description(&self) -> &str {
        "Search text patterns"
    }
    fn usage(&self) -> &str {
        match self.name {
            "egrep" => "egrep [-incv] <pattern> <file>...",
            "fgrep" => "fgrep [-incv] <pattern> <file>...",
            _ => "grep [-incv] <pattern> <file>...",
        }
    }
    fn category(&self) -> &str {
        "File Operations"
    }
    fn execute(&self, args: &[&str], env: &mut Environment<'_>) -> Result<CommandOutput> {
        let flags = Flags::parse(args);
        let Some((&pattern, files)) = flags.operands.split_first() else {
            return Err(SimError::Usage("missing pattern".to_string()));
        };
        if files.is_empty() {
            return Err(SimError::Usage("no input files".to_string()));
        }
        let ignore_case = flags.has('i');
        let needle = if ignore_case {
            pattern.to_lowercase()
        } else {
            pattern.to_string()
        };
        let multi = files.len() > 1;

        let mut out = Vec::new();
        for file in files {
            let content = match env.vfs.get(&env.resolve(file)) {
                None => return Err(SimError::NotFound((*file).to_string())),
                Some(node) => node
                    .content()
                    .ok_or_else(|| SimError::NotAFile((*file).to_string()))?,
            };
            let mut count = 0;
            for (idx, line) in content.lines().enumerate() {
                let hit = if ignore_case {
                    line.to_lowercase().contains(&needle)
                } else {
                    line.contains(&needle)
                };
                if hit == flags.has('v') {
                    continue;
                }
                count += 1;
                if flags.has('c') {
                    continue;
                }
                let prefix = if multi { format!("{file}:") } else { String::new() };
                if flags.has('n') {
                    out.push(format!("{prefix}{}:{line}", idx + 1));
                } else {
                    out.push(format!("{prefix}{line}"));
                }
            }
            if flags.has('c') {
                out.push(if multi {
                    format!("{file}:{count}")
                } else {
                    count.to_string()
                });
            }
        }
        if out.is_empty() {
            return Ok(CommandOutput::None);
        }
        Ok(CommandOutput::Text(out.join("\n")))
    }
}
