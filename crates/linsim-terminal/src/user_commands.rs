//! Session and user commands: identity, date, echo, terminal control, man.

use linsim_types::error::{Result, SimError};

use crate::interpreter::{Command, CommandOutput, CommandRegistry, Environment};

/// Supplementary groups every simulated user belongs to, with their gids.
const GROUPS: [(u32, &str); 8] = [
    (4, "adm"),
    (24, "cdrom"),
    (27, "sudo"),
    (30, "dip"),
    (46, "plugdev"),
    (120, "lpadmin"),
    (131, "lxd"),
    (132, "sambashare"),
];

/// Register session and user commands.
pub fn register_user_commands(reg: &mut CommandRegistry) {
    reg.register(Box::new(WhoamiCmd));
    reg.register(Box::new(DateCmd));
    reg.register(Box::new(EchoCmd));
    reg.register(Box::new(ClearCmd));
    reg.register(Box::new(ExitCmd { name: "exit" }));
    reg.register(Box::new(ExitCmd { name: "logout" }));
    reg.register(Box::new(SuCmd));
    reg.register(Box::new(IdCmd));
    reg.register(Box::new(GroupsCmd));
    reg.register(Box::new(WhoCmd { name: "w" }));
    reg.register(Box::new(WhoCmd { name: "who" }));
    reg.register(Box::new(HostnameCmd));
    reg.register(Box::new(ManCmd));
}

fn uid(user: &str) -> u32 {
    if user == "root" { 0 } else { 1000 }
}

// ---------------------------------------------------------------------------
// whoami / date / echo
// ---------------------------------------------------------------------------

struct WhoamiCmd;
impl Command for WhoamiCmd {
    fn name(&self) -> &str {
        "whoami"
    }
    fn description(&self) -> &str {
        "Display current user"
    }
    fn usage(&self) -> &str {
        "whoami"
    }
    fn category(&self) -> &str {
        "System Information"
    }
    fn execute(&self, _args: &[&str], env: &mut Environment<'_>) -> Result<CommandOutput> {
        Ok(CommandOutput::Text(env.user().to_string()))
    }
}

struct DateCmd;
impl Command for DateCmd {
    fn name(&self) -> &str {
        "date"
    }
    fn description(&self) -> &str {
        "Display current date and time"
    }
    fn usage(&self) -> &str {
        "date"
    }
    fn category(&self) -> &str {
        "System Information"
    }
    fn execute(&self, _args: &[&str], env: &mut Environment<'_>) -> Result<CommandOutput> {
        Ok(CommandOutput::Text(env.now()?.to_ctime()))
    }
}

struct EchoCmd;
impl Command for EchoCmd {
    fn name(&self) -> &str {
        "echo"
    }
    fn description(&self) -> &str {
        "Display text"
    }
    fn usage(&self) -> &str {
        "echo [text...]"
    }
    fn execute(&self, args: &[&str], _env: &mut Environment<'_>) -> Result<CommandOutput> {
        Ok(CommandOutput::Text(args.join(" ")))
    }
}

// ---------------------------------------------------------------------------
// clear / exit / logout
// ---------------------------------------------------------------------------

struct ClearCmd;
impl Command for ClearCmd {
    fn name(&self) -> &str {
        "clear"
    }
    fn description(&self) -> &str {
        "Clear terminal"
    }
    fn usage(&self) -> &str {
        "clear"
    }
    fn execute(&self, _args: &[&str], _env: &mut Environment<'_>) -> Result<CommandOutput> {
        Ok(CommandOutput::Clear)
    }
}

struct ExitCmd {
    name: &'static str,
}
impl Command for ExitCmd {
    fn name(&self) -> &str {
        self.name
    }
    fn description(&self) -> &str {
        "Exit terminal"
    }
    fn usage(&self) -> &str {
        self.name
    }
    fn execute(&self, _args: &[&str], env: &mut Environment<'_>) -> Result<CommandOutput> {
        env.session.logged_out = true;
        log::info!("{} logged out", env.user());
        Ok(CommandOutput::Exit)
    }
}

// ---------------------------------------------------------------------------
// su
// ---------------------------------------------------------------------------

struct SuCmd;
impl Command for SuCmd {
    fn name(&self) -> &str {
        "su"
    }
    fn description(&self) -> &str {
        "Switch user"
    }
    fn usage(&self) -> &str {
        "su [user]"
    }
    fn category(&self) -> &str {
        "System Control"
    }
    fn execute(&self, args: &[&str], _env: &mut Environment<'_>) -> Result<CommandOutput> {
        let user = args.iter().find(|a| !a.starts_with('-')).copied().unwrap_or("root");
        if user == "root" {
            return Err(SimError::Usage("Authentication required (simulated)".to_string()));
        }
        Ok(CommandOutput::Text(format!("su: switched to user {user} (simulated)")))
    }
}

// ---------------------------------------------------------------------------
// id / groups
// ---------------------------------------------------------------------------

struct IdCmd;
impl Command for IdCmd {
    fn name(&self) -> &str {
        "id"
    }
    fn description(&self) -> &str {
        "User ID information"
    }
    fn usage(&self) -> &str {
        "id [user]"
    }
    fn category(&self) -> &str {
        "System Information"
    }
    fn execute(&self, args: &[&str], env: &mut Environment<'_>) -> Result<CommandOutput> {
        let user = args.first().copied().unwrap_or(env.user());
        let id = uid(user);
        let mut groups = format!("{id}({user})");
        for (gid, name) in GROUPS {
            groups.push_str(&format!(",{gid}({name})"));
        }
        Ok(CommandOutput::Text(format!(
            "uid={id}({user}) gid={id}({user}) groups={groups}"
        )))
    }
}

struct GroupsCmd;
impl Command for GroupsCmd {
    fn name(&self) -> &str {
        "groups"
    }
    fn description(&self) -> &str {
        "User groups"
    }
    fn usage(&self) -> &str {
        "groups [user]"
    }
    fn category(&self) -> &str {
        "System Information"
    }
    fn execute(&self, args: &[&str], env: &mut Environment<'_>) -> Result<CommandOutput> {
        let user = args.first().copied().unwrap_or(env.user());
        let names: Vec<&str> = GROUPS.iter().map(|(_, name)| *name).collect();
        Ok(CommandOutput::Text(format!("{user} {}", names.join(" "))))
    }
}

// ---------------------------------------------------------------------------
// w / who / hostname
// ---------------------------------------------------------------------------

struct WhoCmd {
    name: &'static str,
}
impl Command for WhoCmd {
    fn name(&self) -> &str {
        self.name
    }
    fn description(&self) -> &str {
        "Logged in users"
    }
    fn usage(&self) -> &str {
        self.name
    }
    fn category(&self) -> &str {
        "System Information"
    }
    fn execute(&self, _args: &[&str], env: &mut Environment<'_>) -> Result<CommandOutput> {
        let now = env.now()?;
        let login = format!("{:02}:{:02}", now.hour, now.minute);
        Ok(CommandOutput::Text(format!(
            "USER     TTY      FROM             LOGIN@   IDLE   JCPU   PCPU WHAT\n\
{:<8} pts/0    {:<16} {login:<8} 0.00s  0.01s  0.00s w",
            env.user(),
            env.config.system.network.ip
        )))
    }
}

struct HostnameCmd;
impl Command for HostnameCmd {
    fn name(&self) -> &str {
        "hostname"
    }
    fn description(&self) -> &str {
        "Show system hostname"
    }
    fn usage(&self) -> &str {
        "hostname"
    }
    fn category(&self) -> &str {
        "System Information"
    }
    fn execute(&self, _args: &[&str], env: &mut Environment<'_>) -> Result<CommandOutput> {
        Ok(CommandOutput::Text(env.config.hostname.clone()))
    }
}

// ---------------------------------------------------------------------------
// man
// ---------------------------------------------------------------------------

struct ManCmd;
impl Command for ManCmd {
    fn name(&self) -> &str {
        "man"
    }
    fn description(&self) -> &str {
        "Manual pages"
    }
    fn usage(&self) -> &str {
        "man <cmd>"
    }
    fn execute(&self, args: &[&str], env: &mut Environment<'_>) -> Result<CommandOutput> {
        let Some(&topic) = args.first() else {
            return Err(SimError::Usage("missing command".to_string()));
        };
        let date = env.now()?.to_date_string();
        Ok(CommandOutput::Text(format!(
            "Manual page for {topic}:\n\
\n\
NAME\n       {topic} - Linux command\n\
\n\
SYNOPSIS\n       {topic} [OPTION]... [FILE]...\n\
\n\
DESCRIPTION\n       This is a simulated manual page for {topic}.\n       \
In a real Linux system, this would show detailed documentation.\n\
\n\
SEE ALSO\n       help(1), info(1)\n\
\n\
Linux Desktop Clone                    {date}                    {}(1)",
            topic.to_uppercase()
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
    fn whoami_reports_session_user() {
        let (mut shell, mut s) = setup();
        assert_eq!(text(exec(&mut shell, &mut s, "whoami")), "wisnu");
        assert_eq!(text(exec(&mut shell, &mut s, "sudo whoami")).lines().last(), Some("root"));
    }

    #[test]
    fn date_uses_clock() {
        let (mut shell, mut s) = setup();
        assert_eq!(text(exec(&mut shell, &mut s, "date")), "Mon Jan 15 10:30:05 UTC 2024");
    }

    #[test]
    fn echo_joins_args() {
        let (mut shell, mut s) = setup();
        assert_eq!(text(exec(&mut shell, &mut s, "echo hello   \"big world\"")), "hello big world");
        assert_eq!(text(exec(&mut shell, &mut s, "echo")), "");
    }

    #[test]
    fn clear_and_exit_signals() {
        let (mut shell, mut s) = setup();
        assert_eq!(exec(&mut shell, &mut s, "clear"), CommandOutput::Clear);
        assert!(!s.logged_out);
        assert_eq!(exec(&mut shell, &mut s, "logout"), CommandOutput::Exit);
        assert!(s.logged_out);
    }

    #[test]
    fn su_texts() {
        let (mut shell, mut s) = setup();
        assert_eq!(text(exec(&mut shell, &mut s, "su")), "su: Authentication required (simulated)");
        assert_eq!(
            text(exec(&mut shell, &mut s, "su alice")),
            "su: switched to user alice (simulated)"
        );
        assert_eq!(s.current_user, "wisnu");
    }

    #[test]
    fn id_and_groups() {
        let (mut shell, mut s) = setup();
        assert_eq!(
            text(exec(&mut shell, &mut s, "id")),
            "uid=1000(wisnu) gid=1000(wisnu) groups=1000(wisnu),4(adm),24(cdrom),27(sudo),\
30(dip),46(plugdev),120(lpadmin),131(lxd),132(sambashare)"
        );
        assert_eq!(
            text(exec(&mut shell, &mut s, "groups")),
            "wisnu adm cdrom sudo dip plugdev lpadmin lxd sambashare"
        );
    }

    #[test]
    fn who_table() {
        let (mut shell, mut s) = setup();
        let out = text(exec(&mut shell, &mut s, "w"));
        assert_eq!(
            out.lines().nth(1),
            Some("wisnu    pts/0    192.168.1.100    10:30    0.00s  0.01s  0.00s w")
        );
        assert_eq!(text(exec(&mut shell, &mut s, "who")), out);
    }

    #[test]
    fn hostname_from_config() {
        let (mut shell, mut s) = setup();
        assert_eq!(text(exec(&mut shell, &mut s, "hostname")), "linux-clone");
    }

    #[test]
    fn man_page() {
        let (mut shell, mut s) = setup();
        let out = text(exec(&mut shell, &mut s, "man ls"));
        assert!(out.starts_with("Manual page for ls:\n\nNAME\n       ls - Linux command"));
        assert!(out.ends_with("Mon Jan 15 2024                    LS(1)"));
        assert_eq!(text(exec(&mut shell, &mut s, "man")), "man: missing command");
    }
}
