//! Process, resource and service commands backed by the configured
//! system description and the clock.

use linsim_types::error::{Result, SimError};

use crate::commands::Flags;
use crate::interpreter::{Command, CommandOutput, CommandRegistry, Environment};

const LOAD_AVERAGE: &str = "load average: 0.15, 0.10, 0.05";

/// A row of the simulated process table.
struct Process {
    pid: u32,
    tty: &'static str,
    time: &'static str,
    cmd: &'static str,
    /// Whether the process belongs to the login user rather than root.
    user_owned: bool,
}

const PROCESSES: [Process; 5] = [
    Process { pid: 1, tty: "?", time: "00:00:01", cmd: "systemd", user_owned: false },
    Process { pid: 2, tty: "?", time: "00:00:00", cmd: "[kthreadd]", user_owned: false },
    Process { pid: 100, tty: "tty1", time: "00:00:00", cmd: "login", user_owned: false },
    Process { pid: 1000, tty: "pts/0", time: "00:00:00", cmd: "bash", user_owned: true },
    Process { pid: 1001, tty: "pts/0", time: "00:00:00", cmd: "terminal", user_owned: true },
];

/// Register process, resource and service commands.
pub fn register_system_commands(reg: &mut CommandRegistry) {
    reg.register(Box::new(PsCmd));
    reg.register(Box::new(TopCmd));
    reg.register(Box::new(KillCmd));
    reg.register(Box::new(DfCmd));
    reg.register(Box::new(FreeCmd));
    reg.register(Box::new(UnameCmd));
    reg.register(Box::new(UptimeCmd));
    reg.register(Box::new(LscpuCmd));
    reg.register(Box::new(LsblkCmd));
    reg.register(Box::new(MountCmd));
    reg.register(Box::new(NeofetchCmd));
    reg.register(Box::new(SystemctlCmd));
    reg.register(Box::new(JournalctlCmd));
}

// ---------------------------------------------------------------------------
// ps / top / kill
// ---------------------------------------------------------------------------

struct PsCmd;
impl Command for PsCmd {
    fn name(&self) -> &str {
        "ps"
    }
    fn description(&self) -> &str {
        "Running processes"
    }
    fn usage(&self) -> &str {
        "ps [aux]"
    }
    fn category(&self) -> &str {
        "System Information"
    }
    fn execute(&self, args: &[&str], env: &mut Environment<'_>) -> Result<CommandOutput> {
        let bsd = args.iter().any(|a| a.trim_start_matches('-').contains('u'));
        let user = env.config.user.as_str();
        let mut lines = Vec::with_capacity(PROCESSES.len() + 1);
        if bsd {
            lines.push(
                "USER         PID %CPU %MEM    VSZ   RSS TTY      STAT START   TIME COMMAND"
                    .to_string(),
            );
            for p in &PROCESSES {
                let owner = if p.user_owned { user } else { "root" };
                lines.push(format!(
                    "{owner:<10} {:>5}  0.0  0.1  21292  5180 {:<8} S    00:00   {} {}",
                    p.pid,
                    p.tty,
                    &p.time[3..],
                    p.cmd
                ));
            }
        } else {
            lines.push("PID  TTY      TIME     CMD".to_string());
            for p in &PROCESSES {
                lines.push(format!("{:>4} {:<8} {} {}", p.pid, p.tty, p.time, p.cmd));
            }
        }
        Ok(CommandOutput::Text(lines.join("\n")))
    }
}

struct TopCmd;
impl Command for TopCmd {
    fn name(&self) -> &str {
        "top"
    }
    fn description(&self) -> &str {
        "System monitor"
    }
    fn usage(&self) -> &str {
        "top"
    }
    fn category(&self) -> &str {
        "System Information"
    }
    fn execute(&self, _args: &[&str], env: &mut Environment<'_>) -> Result<CommandOutput> {
        let now = env.now()?;
        let uptime = env.time.uptime_secs()?;
        let mem = env.config.system.memory;
        let user = env.config.user.as_str();
        Ok(CommandOutput::Text(format!(
            "top - {} up {}:{:02}, 1 user, {LOAD_AVERAGE}\n\
\n\
Tasks: 5 total, 1 running, 4 sleeping, 0 stopped, 0 zombie\n\
%Cpu(s): 2.3 us, 1.2 sy, 0.0 ni, 96.5 id, 0.0 wa, 0.0 hi, 0.0 si, 0.0 st\n\
MiB Mem: {} total, {} free, {} used, 0 buff/cache\n\
\n\
  PID USER      PR  NI    VIRT    RES    SHR S  %CPU  %MEM     TIME+ COMMAND\n    \
1 root      20   0  169364  13584   8716 S   0.0   0.2   0:01.23 systemd\n \
1000 {user:<9} 20   0   21292   5180   3264 S   0.0   0.1   0:00.05 bash\n \
1001 {user:<9} 20   0   12345   2048   1024 R   2.3   0.0   0:00.01 terminal",
            now.clock(),
            uptime / 3600,
            (uptime % 3600) / 60,
            mem.total,
            mem.free,
            mem.used,
        )))
    }
}

struct KillCmd;
impl Command for KillCmd {
    fn name(&self) -> &str {
        "kill"
    }
    fn description(&self) -> &str {
        "Kill process"
    }
    fn usage(&self) -> &str {
        "kill [-signal] <pid>"
    }
    fn execute(&self, args: &[&str], _env: &mut Environment<'_>) -> Result<CommandOutput> {
        let flags = Flags::parse(args);
        let Some(&target) = flags.operands.first() else {
            return Err(SimError::Usage("missing process ID".to_string()));
        };
        let pid: u32 = target.parse().map_err(|_| {
            SimError::InvalidArgument(format!(
                "{target}: arguments must be process or job IDs"
            ))
        })?;
        if !PROCESSES.iter().any(|p| p.pid == pid) {
            return Err(SimError::Usage(format!("({pid}) - No such process")));
        }
        log::debug!("kill {pid}");
        Ok(CommandOutput::Text(format!("kill: terminated process {pid}")))
    }
}

// ---------------------------------------------------------------------------
// df / free
// ---------------------------------------------------------------------------

struct DfCmd;
impl Command for DfCmd {
    fn name(&self) -> &str {
        "df"
    }
    fn description(&self) -> &str {
        "Disk usage"
    }
    fn usage(&self) -> &str {
        "df"
    }
    fn category(&self) -> &str {
        "System Information"
    }
    fn execute(&self, _args: &[&str], _env: &mut Environment<'_>) -> Result<CommandOutput> {
        Ok(CommandOutput::Text(
            "Filesystem     1K-blocks    Used Available Use% Mounted on\n\
/dev/sda1       20971520 8388608  11534336  43% /\n\
tmpfs            4194304       0   4194304   0% /dev/shm\n\
tmpfs            4194304    1024   4193280   1% /run\n\
/dev/sda2       10485760 2097152   7864320  22% /home"
                .to_string(),
        ))
    }
}

struct FreeCmd;
impl Command for FreeCmd {
    fn name(&self) -> &str {
        "free"
    }
    fn description(&self) -> &str {
        "Memory usage"
    }
    fn usage(&self) -> &str {
        "free"
    }
    fn category(&self) -> &str {
        "System Information"
    }
    fn execute(&self, _args: &[&str], env: &mut Environment<'_>) -> Result<CommandOutput> {
        let mem = env.config.system.memory;
        Ok(CommandOutput::Text(format!(
            "              total        used        free      shared  buff/cache   available\n\
Mem:{:>15}{:>12}{:>12}{:>12}{:>12}{:>12}\n\
Swap:{:>14}{:>12}{:>12}",
            mem.total, mem.used, mem.free, 0, 0, mem.free, 0, 0, 0
        )))
    }
}

// ---------------------------------------------------------------------------
// uname / uptime
// ---------------------------------------------------------------------------

struct UnameCmd;
impl Command for UnameCmd {
    fn name(&self) -> &str {
        "uname"
    }
    fn description(&self) -> &str {
        "System information"
    }
    fn usage(&self) -> &str {
        "uname [-a] [-s] [-n] [-r] [-m]"
    }
    fn category(&self) -> &str {
        "System Information"
    }
    fn execute(&self, args: &[&str], env: &mut Environment<'_>) -> Result<CommandOutput> {
        let flags = Flags::parse(args);
        let sys = &env.config.system;
        if flags.has('a') {
            let date = env.now()?.to_date_string();
            let arch = &sys.architecture;
            return Ok(CommandOutput::Text(format!(
                "{kernel} {host} {kernel} #1 SMP {date} {arch} {arch} {arch} GNU/Linux",
                kernel = sys.kernel,
                host = env.config.hostname,
            )));
        }
        let mut parts = Vec::new();
        if flags.has('s') {
            parts.push("Linux");
        }
        if flags.has('n') {
            parts.push(env.config.hostname.as_str());
        }
        if flags.has('r') {
            parts.push(sys.kernel.as_str());
        }
        if flags.has('m') {
            parts.push(sys.architecture.as_str());
        }
        if parts.is_empty() {
            parts.push("Linux");
        }
        Ok(CommandOutput::Text(parts.join(" ")))
    }
}

struct UptimeCmd;
impl Command for UptimeCmd {
    fn name(&self) -> &str {
        "uptime"
    }
    fn description(&self) -> &str {
        "System uptime"
    }
    fn usage(&self) -> &str {
        "uptime"
    }
    fn category(&self) -> &str {
        "System Information"
    }
    fn execute(&self, _args: &[&str], env: &mut Environment<'_>) -> Result<CommandOutput> {
        let now = env.now()?;
        let secs = env.time.uptime_secs()?;
        Ok(CommandOutput::Text(format!(
            " {} up {} days, {}:{:02}, 1 user, {LOAD_AVERAGE}",
            now.clock(),
            secs / 86400,
            (secs % 86400) / 3600,
            (secs % 3600) / 60
        )))
    }
}

// ---------------------------------------------------------------------------
// lscpu / lsblk / mount
// ---------------------------------------------------------------------------

struct LscpuCmd;
impl Command for LscpuCmd {
    fn name(&self) -> &str {
        "lscpu"
    }
    fn description(&self) -> &str {
        "CPU information"
    }
    fn usage(&self) -> &str {
        "lscpu"
    }
    fn category(&self) -> &str {
        "System Information"
    }
    fn execute(&self, _args: &[&str], env: &mut Environment<'_>) -> Result<CommandOutput> {
        let sys = &env.config.system;
        let cores = sys.cpu.cores;
        let rows: [(&str, String); 18] = [
            ("Architecture", sys.architecture.clone()),
            ("CPU op-mode(s)", "32-bit, 64-bit".into()),
            ("Byte Order", "Little Endian".into()),
            ("Address sizes", "39 bits physical, 48 bits virtual".into()),
            ("CPU(s)", cores.to_string()),
            ("On-line CPU(s) list", format!("0-{}", cores.saturating_sub(1))),
            ("Thread(s) per core", "1".into()),
            ("Core(s) per socket", cores.to_string()),
            ("Socket(s)", "1".into()),
            ("Vendor ID", "GenuineIntel".into()),
            ("CPU family", "6".into()),
            ("Model", "142".into()),
            ("Model name", sys.cpu.model.clone()),
            ("Stepping", "10".into()),
            ("CPU MHz", "2400.000".into()),
            ("BogoMIPS", "4800.00".into()),
            ("Hypervisor vendor", "Microsoft".into()),
            ("Virtualization type", "full".into()),
        ];
        let lines: Vec<String> = rows
            .iter()
            .map(|(key, value)| format!("{:<33}{value}", format!("{key}:")))
            .collect();
        Ok(CommandOutput::Text(lines.join("\n")))
    }
}

struct LsblkCmd;
impl Command for LsblkCmd {
    fn name(&self) -> &str {
        "lsblk"
    }
    fn description(&self) -> &str {
        "Block devices"
    }
    fn usage(&self) -> &str {
        "lsblk"
    }
    fn category(&self) -> &str {
        "System Information"
    }
    fn execute(&self, _args: &[&str], _env: &mut Environment<'_>) -> Result<CommandOutput> {
        Ok(CommandOutput::Text(
            "NAME   MAJ:MIN RM  SIZE RO TYPE MOUNTPOINT\n\
sda      8:0    0   20G  0 disk \n\
├─sda1   8:1    0   19G  0 part /\n\
└─sda2   8:2    0    1G  0 part [SWAP]\n\
sr0     11:0    1 1024M  0 rom"
                .to_string(),
        ))
    }
}

struct MountCmd;
impl Command for MountCmd {
    fn name(&self) -> &str {
        "mount"
    }
    fn description(&self) -> &str {
        "Mounted filesystems"
    }
    fn usage(&self) -> &str {
        "mount"
    }
    fn category(&self) -> &str {
        "System Information"
    }
    fn execute(&self, _args: &[&str], _env: &mut Environment<'_>) -> Result<CommandOutput> {
        Ok(CommandOutput::Text(
            "/dev/sda1 on / type ext4 (rw,relatime,errors=remount-ro)\n\
proc on /proc type proc (rw,nosuid,nodev,noexec,relatime)\n\
sysfs on /sys type sysfs (rw,nosuid,nodev,noexec,relatime)\n\
tmpfs on /dev/shm type tmpfs (rw,nosuid,nodev)\n\
tmpfs on /run type tmpfs (rw,nosuid,nodev,noexec,relatime,size=819200k,mode=755)"
                .to_string(),
        ))
    }
}

// ---------------------------------------------------------------------------
// neofetch
// ---------------------------------------------------------------------------

const LOGO: [&str; 17] = [
    r#"        _,met$$$$$gg."#,
    r#"     ,g$$$$$$$$$$$$$$$P."#,
    r#"   ,g$$P"     """Y$$."."#,
    r#"  ,$$P'              `$$$."#,
    r#" ',$$P       ,ggs.     `$$b:"#,
    r#" `d$$'     ,$P"'   .    $$$"#,
    r#"  $$P      d$'     ,    $$P"#,
    r#"  $$:      $$.   -    ,d$$'"#,
    r#"  $$;      Y$b._   _,d$P'"#,
    r#"  Y$$.    `.`"Y$$$$P"'"#,
    r#"  `$$b      "-.__"#,
    r#"   `Y$$"#,
    r#"    `Y$$."#,
    r#"      `$$b."#,
    r#"        `Y$$b."#,
    r#"           `"Y$b._"#,
    r#"               `""""#,
];

struct NeofetchCmd;
impl Command for NeofetchCmd {
    fn name(&self) -> &str {
        "neofetch"
    }
    fn description(&self) -> &str {
        "Display system information"
    }
    fn usage(&self) -> &str {
        "neofetch"
    }
    fn execute(&self, _args: &[&str], env: &mut Environment<'_>) -> Result<CommandOutput> {
        let sys = &env.config.system;
        let title = format!("{}@{}", env.user(), env.config.hostname);
        let secs = env.time.uptime_secs()?;
        let info = [
            title.clone(),
            "-".repeat(title.len()),
            "OS: Linux Desktop Clone 22.04 LTS".to_string(),
            format!("Host: {}", env.config.hostname),
            format!("Kernel: {}", sys.kernel),
            format!("Uptime: {} hours, {} mins", secs / 3600, (secs % 3600) / 60),
            format!("Packages: {} (apt)", env.packages.installed_count()),
            "Shell: bash 5.1.16".to_string(),
            format!("CPU: {} ({})", sys.cpu.model, sys.cpu.cores),
            format!("Memory: {}MiB / {}MiB", sys.memory.used, sys.memory.total),
            "Created by: Wisnu Hidayat".to_string(),
        ];
        let lines: Vec<String> = LOGO
            .iter()
            .enumerate()
            .map(|(i, art)| match info.get(i) {
                Some(text) => format!("{art:<31}{text}"),
                None => (*art).to_string(),
            })
            .collect();
        Ok(CommandOutput::Text(lines.join("\n")))
    }
}

// ---------------------------------------------------------------------------
// systemctl / journalctl
// ---------------------------------------------------------------------------

struct SystemctlCmd;
impl Command for SystemctlCmd {
    fn name(&self) -> &str {
        "systemctl"
    }
    fn description(&self) -> &str {
        "Control services"
    }
    fn usage(&self) -> &str {
        "systemctl <action> <service>"
    }
    fn category(&self) -> &str {
        "System Control"
    }
    fn execute(&self, args: &[&str], env: &mut Environment<'_>) -> Result<CommandOutput> {
        let Some((&action, rest)) = args.split_first() else {
            return Err(SimError::Usage("missing action".to_string()));
        };
        let service = rest
            .first()
            .map(|s| s.trim_end_matches(".service"))
            .unwrap_or("unknown");
        let verb = match action {
            "status" => {
                let since = env.now()?.to_date_string();
                return Ok(CommandOutput::Text(format!(
                    "● {service}.service - {service} service\n   \
Loaded: loaded (/lib/systemd/system/{service}.service; enabled)\n   \
Active: active (running) since {since}"
                )));
            },
            "start" => "Started",
            "stop" => "Stopped",
            "restart" => "Restarted",
            "enable" => "Enabled",
            "disable" => "Disabled",
            other => {
                return Err(SimError::Usage(format!("unknown operation '{other}'")));
            },
        };
        log::info!("systemctl {action} {service}");
        Ok(CommandOutput::Text(format!("{verb} {service}.service")))
    }
}

struct JournalctlCmd;
impl Command for JournalctlCmd {
    fn name(&self) -> &str {
        "journalctl"
    }
    fn description(&self) -> &str {
        "View system logs"
    }
    fn usage(&self) -> &str {
        "journalctl [-n lines]"
    }
    fn category(&self) -> &str {
        "System Control"
    }
    fn execute(&self, args: &[&str], env: &mut Environment<'_>) -> Result<CommandOutput> {
        let limit = match args {
            ["-n", count, ..] => Some(count.parse::<usize>().map_err(|_| {
                SimError::InvalidArgument(format!("invalid number of lines: '{count}'"))
            })?),
            _ => None,
        };
        let Ok(syslog) = env.vfs.read_file("/var/log/syslog") else {
            return Ok(CommandOutput::Text("No journal files were found.".to_string()));
        };
        let entries: Vec<&str> = syslog.lines().collect();
        let skip = limit.map_or(0, |n| entries.len().saturating_sub(n));
        let mut out = vec![format!("-- Logs begin at {} --", env.now()?.to_date_string())];
        out.extend(entries[skip..].iter().map(|line| (*line).to_string()));
        Ok(CommandOutput::Text(out.join("\n")))
    }
}
