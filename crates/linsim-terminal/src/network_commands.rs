//! Network commands. Nothing touches a real network; downloads land in the
//! simulated tree as placeholder files.

use linsim_types::error::{Result, SimError};
use linsim_vfs::{file_name, parent};

use crate::interpreter::{Command, CommandOutput, CommandRegistry, Environment};

/// Register network commands.
pub fn register_network_commands(reg: &mut CommandRegistry) {
    reg.register(Box::new(IfconfigCmd { name: "ifconfig" }));
    reg.register(Box::new(IfconfigCmd { name: "ip" }));
    reg.register(Box::new(PingCmd));
    reg.register(Box::new(DownloadCmd { name: "wget" }));
    reg.register(Box::new(DownloadCmd { name: "curl" }));
}

// ---------------------------------------------------------------------------
// ifconfig / ip
// ---------------------------------------------------------------------------

struct IfconfigCmd {
    name: &'static str,
}
impl Command for IfconfigCmd {
    fn name(&self) -> &str {
        self.name
    }
    fn description(&self) -> &str {
        "Network interface info"
    }
    fn usage(&self) -> &str {
        self.name
    }
    fn category(&self) -> &str {
        "Network"
    }
    fn execute(&self, _args: &[&str], env: &mut Environment<'_>) -> Result<CommandOutput> {
        let net = &env.config.system.network;
        Ok(CommandOutput::Text(format!(
            "{}: flags=4163<UP,BROADCAST,RUNNING,MULTICAST>  mtu 1500\n        \
inet {}  netmask 255.255.255.0  broadcast 192.168.1.255\n        \
inet6 fe80::a00:27ff:fe4e:66a1  prefixlen 64  scopeid 0x20<link>\n        \
ether 08:00:27:4e:66:a1  txqueuelen 1000  (Ethernet)\n        \
RX packets 1234  bytes 123456 (120.5 KiB)\n        \
RX errors 0  dropped 0  overruns 0  frame 0\n        \
TX packets 567  bytes 56789 (55.4 KiB)\n        \
TX errors 0  dropped 0 overruns 0  carrier 0  collisions 0\n\
\n\
lo: flags=73<UP,LOOPBACK,RUNNING>  mtu 65536\n        \
inet 127.0.0.1  netmask 255.0.0.0\n        \
inet6 ::1  prefixlen 128  scopeid 0x10<host>\n        \
loop  txqueuelen 1000  (Local Loopback)",
            net.interface, net.ip
        )))
    }
}

// ---------------------------------------------------------------------------
// ping
// ---------------------------------------------------------------------------

struct PingCmd;
impl Command for PingCmd {
    fn name(&self) -> &str {
        "ping"
    }
    fn description(&self) -> &str {
        "Ping network host"
    }
    fn usage(&self) -> &str {
        "ping <host>"
    }
    fn category(&self) -> &str {
        "Network"
    }
    fn execute(&self, args: &[&str], _env: &mut Environment<'_>) -> Result<CommandOutput> {
        let Some(host) = args.iter().rev().find(|a| !a.starts_with('-')) else {
            return Err(SimError::Usage("missing host operand".to_string()));
        };
        Ok(CommandOutput::Text(format!(
            "PING {host} (192.168.1.1) 56(84) bytes of data.\n\
64 bytes from {host}: icmp_seq=1 ttl=64 time=1.23 ms\n\
64 bytes from {host}: icmp_seq=2 ttl=64 time=1.45 ms\n\
64 bytes from {host}: icmp_seq=3 ttl=64 time=1.12 ms\n\
--- {host} ping statistics ---\n\
3 packets transmitted, 3 received, 0% packet loss, time 2003ms\n\
rtt min/avg/max/mdev = 1.120/1.267/1.450/0.140 ms"
        )))
    }
}

// ---------------------------------------------------------------------------
// wget / curl
// ---------------------------------------------------------------------------

/// Last path segment of a URL, or `index.html` for a bare host.
fn remote_name(url: &str) -> &str {
    let path = url.split_once("://").map_or(url, |(_, rest)| rest);
    let path = path.split(['?', '#']).next().unwrap_or(path);
    match path.split_once('/') {
        Some((_, tail)) if !tail.is_empty() && !tail.ends_with('/') => {
            tail.rsplit('/').next().unwrap_or("index.html")
        },
        _ => "index.html",
    }
}

/// `wget` always saves; `curl` saves only with `-o <file>` or `-O`.
struct DownloadCmd {
    name: &'static str,
}

impl DownloadCmd {
    fn save_target<'a>(&self, args: &[&'a str], url: &'a str) -> Option<&'a str> {
        if self.name == "wget" {
            return Some(remote_name(url));
        }
        if let Some(pos) = args.iter().position(|a| *a == "-o") {
            return args.get(pos + 1).copied();
        }
        args.contains(&"-O").then(|| remote_name(url))
    }
}

impl Command for DownloadCmd {
    fn name(&self) -> &str {
        self.name
    }
    fn description(&self) -> &str {
        "Download files"
    }
    fn usage(&self) -> &str {
        match self.name {
            "curl" => "curl [-o file] [-O] <url>",
            _ => "wget <url>",
        }
    }
    fn category(&self) -> &str {
        "Network"
    }
    fn execute(&self, args: &[&str], env: &mut Environment<'_>) -> Result<CommandOutput> {
        let mut url = None;
        let mut iter = args.iter();
        while let Some(&arg) = iter.next() {
            if arg == "-o" {
                iter.next();
            } else if !arg.starts_with('-') {
                url = Some(arg);
            }
        }
        let Some(url) = url else {
            return Err(SimError::Usage("missing URL".to_string()));
        };

        let cmd = self.name;
        let mut out = format!(
            "{cmd}: downloading from {url}...\n{cmd}: download completed (simulated)"
        );
        if let Some(target) = self.save_target(args, url) {
            let path = env.resolve(target);
            if !env.vfs.is_dir(parent(&path)) {
                return Err(SimError::NotFound(target.to_string()));
            }
            let now = env.now()?;
            let owner = env.user().to_string();
            let body = format!("<!-- {url} (simulated download) -->");
            env.vfs.write_file(&path, &body, &owner, now)?;
            log::info!("{cmd} saved {url} to {path}");
            out.push_str(&format!("\n{cmd}: saved '{}'", file_name(&path)));
        }
        Ok(CommandOutput::Text(out))
    }
}
