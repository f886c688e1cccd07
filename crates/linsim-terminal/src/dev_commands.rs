//! Development tools: interpreters, git, editors and tar.

use linsim_types::error::{Result, SimError};

use crate::interpreter::{Command, CommandOutput, CommandRegistry, Environment};

const PYTHON_BANNER: &str = "Python 3.9.2 (default, Feb 28 2021, 17:03:44)\n\
[GCC 10.2.1 20210110] on linux\n\
Type \"help\", \"copyright\", \"credits\" or \"license\" for more information.\n\
>>> (Interactive mode not available in web terminal)";

const NODE_BANNER: &str = "Welcome to Node.js v16.14.0.\n\
Type \".help\" for more information.\n\
> (Interactive mode not available in web terminal)";

const GIT_USAGE: &str = "usage: git [--version] [--help] [-C <path>] [-c <name>=<value>]\n           \
[--exec-path[=<path>]] [--html-path] [--man-path] [--info-path]\n           \
[-p | --paginate | -P | --no-pager] [--no-replace-objects] [--bare]\n           \
[--git-dir=<path>] [--work-tree=<path>] [--namespace=<name>]\n           \
<command> [<args>]";

/// Register development commands.
pub fn register_dev_commands(reg: &mut CommandRegistry) {
    reg.register(Box::new(PythonCmd { name: "python" }));
    reg.register(Box::new(PythonCmd { name: "python3" }));
    reg.register(Box::new(NodeCmd));
    reg.register(Box::new(GitCmd));
    reg.register(Box::new(EditorCmd { name: "nano" }));
    reg.register(Box::new(EditorCmd { name: "vim" }));
    reg.register(Box::new(TarCmd));
}

/// String literals passed to `call(...)` on lines that consist of that
/// call alone. Anything else in the script is ignored.
fn literal_calls<'s>(source: &'s str, call: &str) -> Vec<&'s str> {
    source
        .lines()
        .filter_map(|line| {
            let inner = line
                .trim()
                .trim_end_matches(';')
                .strip_prefix(call)?
                .strip_prefix('(')?
                .strip_suffix(')')?;
            let quote = inner.chars().next().filter(|c| matches!(c, '"' | '\'' | '`'))?;
            inner.strip_prefix(quote)?.strip_suffix(quote)
        })
        .collect()
}

/// Output of a script, or `None` when it prints nothing.
fn script_output(lines: Vec<&str>) -> CommandOutput {
    if lines.is_empty() {
        CommandOutput::None
    } else {
        CommandOutput::Text(lines.join("\n"))
    }
}

// ---------------------------------------------------------------------------
// python / node
// ---------------------------------------------------------------------------

struct PythonCmd {
    name: &'static str,
}
impl Command for PythonCmd {
    fn name(&self) -> &str {
        self.name
    }
    fn description(&self) -> &str {
        "Run Python script"
    }
    fn usage(&self) -> &str {
        "python3 [file]"
    }
    fn category(&self) -> &str {
        "Programming"
    }
    fn execute(&self, args: &[&str], env: &mut Environment<'_>) -> Result<CommandOutput> {
        let Some(&file) = args.iter().find(|a| !a.starts_with('-')) else {
            return Ok(CommandOutput::Text(PYTHON_BANNER.to_string()));
        };
        let path = env.resolve(file);
        let Some(node) = env.vfs.get(&path) else {
            return Err(SimError::Usage(format!(
                "can't open file '{file}': [Errno 2] No such file or directory"
            )));
        };
        let Some(source) = node.content() else {
            return Err(SimError::Usage(format!(
                "can't find '__main__' module in '{file}'"
            )));
        };
        log::debug!("running {path} under {}", self.name);
        Ok(script_output(literal_calls(source, "print")))
    }
}

struct NodeCmd;
impl Command for NodeCmd {
    fn name(&self) -> &str {
        "node"
    }
    fn description(&self) -> &str {
        "Run Node.js script"
    }
    fn usage(&self) -> &str {
        "node [file]"
    }
    fn category(&self) -> &str {
        "Programming"
    }
    fn execute(&self, args: &[&str], env: &mut Environment<'_>) -> Result<CommandOutput> {
        let Some(&file) = args.iter().find(|a| !a.starts_with('-')) else {
            return Ok(CommandOutput::Text(NODE_BANNER.to_string()));
        };
        let path = env.resolve(file);
        let source = env
            .vfs
            .get(&path)
            .and_then(|node| node.content())
            .ok_or_else(|| SimError::Usage(format!("Cannot find module '{path}'")))?;
        Ok(script_output(literal_calls(source, "console.log")))
    }
}

// ---------------------------------------------------------------------------
// git
// ---------------------------------------------------------------------------

struct GitCmd;
impl Command for GitCmd {
    fn name(&self) -> &str {
        "git"
    }
    fn description(&self) -> &str {
        "Git version control"
    }
    fn usage(&self) -> &str {
        "git <status|log|branch|version>"
    }
    fn category(&self) -> &str {
        "Programming"
    }
    fn execute(&self, args: &[&str], env: &mut Environment<'_>) -> Result<CommandOutput> {
        let Some(&sub) = args.first() else {
            return Ok(CommandOutput::Text(GIT_USAGE.to_string()));
        };
        let out = match sub {
            "status" => "On branch main\nnothing to commit, working tree clean".to_string(),
            "log" => format!(
                "commit abc123def456 (HEAD -> main)\n\
Author: Wisnu Hidayat <wisnu@example.com>\n\
Date:   {}\n\
\n    Initial commit",
                env.now()?.to_date_string()
            ),
            "branch" => "* main".to_string(),
            "version" | "--version" => "git version 2.34.1".to_string(),
            other => {
                return Err(SimError::Usage(format!(
                    "'{other}' is not a git command. See 'git --help'."
                )));
            },
        };
        Ok(CommandOutput::Text(out))
    }
}

// ---------------------------------------------------------------------------
// nano / vim
// ---------------------------------------------------------------------------

struct EditorCmd {
    name: &'static str,
}
impl Command for EditorCmd {
    fn name(&self) -> &str {
        self.name
    }
    fn description(&self) -> &str {
        "Text editors"
    }
    fn usage(&self) -> &str {
        match self.name {
            "vim" => "vim [file]",
            _ => "nano [file]",
        }
    }
    fn category(&self) -> &str {
        "Programming"
    }
    fn execute(&self, args: &[&str], env: &mut Environment<'_>) -> Result<CommandOutput> {
        let file = args
            .iter()
            .find(|a| !a.starts_with('-'))
            .copied()
            .unwrap_or("untitled.txt");
        Ok(CommandOutput::OpenEditor {
            program: self.name.to_string(),
            file: env.resolve(file),
        })
    }
}

// ---------------------------------------------------------------------------
// tar
// ---------------------------------------------------------------------------

struct TarCmd;
impl Command for TarCmd {
    fn name(&self) -> &str {
        "tar"
    }
    fn description(&self) -> &str {
        "Archive files"
    }
    fn usage(&self) -> &str {
        "tar <options...>"
    }
    fn execute(&self, args: &[&str], _env: &mut Environment<'_>) -> Result<CommandOutput> {
        if args.is_empty() {
            return Err(SimError::Usage("missing operation".to_string()));
        }
        Ok(CommandOutput::Text(format!(
            "tar: archive operation simulated with options: {}",
            args.join(" ")
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shell::testing::{exec, setup};

    fn text(out: CommandOutput) -> String {
        match out {
            CommandOutput::Text(s) => s,
            other => panic!("expected text, got {other:?}"),
        }
    }

    #[test]
    fn literal_calls_extracts_strings() {
        let src = "print(\"a\")\n  print('b')\nprint(x)\nprintf(\"c\")\n# print(\"d\") no";
        assert_eq!(literal_calls(src, "print"), vec!["a", "b"]);
        let js = "console.log(\"hi\");\nconsole.log(`there`)";
        assert_eq!(literal_calls(js, "console.log"), vec!["hi", "there"]);
    }

    #[test]
    fn python_banner_and_script() {
        let (mut shell, mut s) = setup();
        assert!(text(exec(&mut shell, &mut s, "python3")).starts_with("Python 3.9.2"));
        assert_eq!(
            text(exec(&mut shell, &mut s, "python Documents/projects/script.py")),
            "Hello from Python!\nLinux Desktop Clone"
        );
    }

    #[test]
    fn python_missing_file() {
        let (mut shell, mut s) = setup();
        assert_eq!(
            text(exec(&mut shell, &mut s, "python3 nope.py")),
            "python3: can't open file 'nope.py': [Errno 2] No such file or directory"
        );
        assert_eq!(
            text(exec(&mut shell, &mut s, "python3 Music")),
            "python3: can't find '__main__' module in 'Music'"
        );
    }

    #[test]
    fn node_banner_and_script() {
        let (mut shell, mut s) = setup();
        assert!(text(exec(&mut shell, &mut s, "node")).starts_with("Welcome to Node.js v16.14.0."));
        shell
            .vfs_mut()
            .write_file("/tmp/app.js", "console.log('ok');", "wisnu", linsim_platform::SystemTime::date(2024, 1, 15))
            .unwrap();
        assert_eq!(text(exec(&mut shell, &mut s, "node /tmp/app.js")), "ok");
        assert_eq!(
            text(exec(&mut shell, &mut s, "node missing.js")),
            "node: Cannot find module '/home/wisnu/missing.js'"
        );
    }

    #[test]
    fn git_subcommands() {
        let (mut shell, mut s) = setup();
        assert!(text(exec(&mut shell, &mut s, "git")).starts_with("usage: git [--version]"));
        assert_eq!(
            text(exec(&mut shell, &mut s, "git status")),
            "On branch main\nnothing to commit, working tree clean"
        );
        assert!(text(exec(&mut shell, &mut s, "git log")).contains("Date:   Mon Jan 15 2024\n"));
        assert_eq!(text(exec(&mut shell, &mut s, "git branch")), "* main");
        assert_eq!(text(exec(&mut shell, &mut s, "git version")), "git version 2.34.1");
        assert_eq!(
            text(exec(&mut shell, &mut s, "git push")),
            "git: 'push' is not a git command. See 'git --help'."
        );
    }

    #[test]
    fn editors_signal_open() {
        let (mut shell, mut s) = setup();
        assert_eq!(
            exec(&mut shell, &mut s, "vim notes.md"),
            CommandOutput::OpenEditor {
                program: "vim".into(),
                file: "/home/wisnu/notes.md".into(),
            }
        );
        match exec(&mut shell, &mut s, "nano") {
            CommandOutput::OpenEditor { file, .. } => assert_eq!(file, "/home/wisnu/untitled.txt"),
            _ => panic!("expected editor"),
        }
        assert_eq!(shell.interpret("nano x", &mut s), "Opening nano editor...");
    }

    #[test]
    fn tar_options() {
        let (mut shell, mut s) = setup();
        assert_eq!(
            text(exec(&mut shell, &mut s, "tar -czf a.tgz Documents")),
            "tar: archive operation simulated with options: -czf a.tgz Documents"
        );
        assert_eq!(text(exec(&mut shell, &mut s, "tar")), "tar: missing operation");
    }
}
