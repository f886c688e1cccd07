//! The stock filesystem every new shell starts from.

use linsim_platform::SystemTime;
use linsim_types::config::SimConfig;
use linsim_types::error::Result;
use linsim_vfs::{FileTree, Node};

const README: &str = "Welcome to Linux Desktop Clone!\n\
Created by Wisnu Hidayat\n\
\n\
This is a fully functional Linux desktop environment simulation with advanced features:\n\
- Complete filesystem simulation\n\
- Process management\n\
- Package manager\n\
- Network tools\n\
- System monitoring\n\
\n\
Enjoy exploring!";

const WEBSITE: &str = "<!DOCTYPE html>\n<html>\n<head>\n    <title>My Project</title>\n</head>\n\
<body>\n    <h1>Hello World!</h1>\n    <p>This is my web project.</p>\n</body>\n</html>";

const SCRIPT_PY: &str = "#!/usr/bin/env python3\n\n\
def main():\n    print(\"Hello from Python!\")\n    print(\"Linux Desktop Clone\")\n\n\
if __name__ == \"__main__\":\n    main()";

const BASHRC: &str = "# ~/.bashrc: executed by bash(1) for non-login shells\n\
\n\
# User specific aliases and functions\n\
alias ll=\"ls -la\"\n\
alias la=\"ls -A\"\n\
alias l=\"ls -CF\"\n\
\n\
# Custom prompt\n\
PS1=\"\\u@\\h:\\w\\$ \"\n\
\n\
# History settings\n\
HISTSIZE=1000\n\
HISTFILESIZE=2000\n\
\n\
echo \"Welcome to Linux Desktop Clone Terminal!\"";

const PROFILE: &str = "# ~/.profile: executed by the command interpreter for login shells\n\
\n\
# Set PATH\n\
PATH=\"$HOME/bin:$HOME/.local/bin:$PATH\"\n\
export PATH\n\
\n\
# Default editor\n\
export EDITOR=nano\n\
\n\
# Load .bashrc if it exists\n\
if [ -f \"$HOME/.bashrc\" ]; then\n\
    . \"$HOME/.bashrc\"\n\
fi";

const OS_RELEASE: &str = "PRETTY_NAME=\"Linux Desktop Clone 22.04 LTS\"\n\
NAME=\"Linux Desktop Clone\"\n\
VERSION_ID=\"22.04\"\n\
VERSION=\"22.04 (Jammy Jellyfish)\"\n\
VERSION_CODENAME=jammy\n\
ID=linux-clone\n\
ID_LIKE=debian\n\
HOME_URL=\"https://linux-clone.com/\"\n\
SUPPORT_URL=\"https://help.linux-clone.com/\"\n\
BUG_REPORT_URL=\"https://bugs.linux-clone.com/\"";

/// `(name, simulated size, content)` of the binaries under `/usr/bin`.
const USR_BIN: [(&str, u64, &str); 5] = [
    ("python3", 14328, "Python 3.9.2 interpreter"),
    ("node", 32768, "Node.js runtime"),
    ("git", 2048, "Git version control"),
    ("nano", 245760, "Nano text editor"),
    ("vim", 3096576, "Vim text editor"),
];

const BIN: [(&str, u64, &str); 4] = [
    ("bash", 1183448, "Bash shell"),
    ("ls", 147176, "List directory contents"),
    ("cat", 43816, "Concatenate files"),
    ("grep", 232472, "Search text patterns"),
];

/// Build the stock tree for `config.user`, with per-session entries
/// stamped `now`.
pub fn seed_tree(config: &SimConfig, now: SystemTime) -> Result<FileTree> {
    let epoch = SystemTime::date(2024, 1, 1);
    let user = config.user.as_str();
    let mut vfs = FileTree::new(epoch);

    let dir = |perm: &str, owner: &str, stamp| Node::directory(perm, owner, owner, stamp);
    let root_dir = |stamp| dir("drwxr-xr-x", "root", stamp);
    let user_dir = || dir("drwxr-xr-x", user, now);
    let user_file = |size: u64, content: &str| {
        Node::file("-rw-r--r--", user, user, now, content).with_size(size)
    };
    let binary = |size: u64, content: &str| {
        Node::file("-rwxr-xr-x", "root", "root", epoch, content).with_size(size)
    };
    let config_file = |size: u64, content: &str| {
        Node::file("-rw-r--r--", "root", "root", epoch, content).with_size(size)
    };

    // /home
    vfs.insert("/", "home", root_dir(SystemTime::date(2024, 1, 15)))?;
    let home = config.home_dir();
    vfs.create_dir_all(&home, "root", now)?;
    vfs.insert(linsim_vfs::parent(&home), linsim_vfs::file_name(&home), user_dir())?;

    vfs.insert(&home, "Documents", user_dir())?;
    let docs = format!("{home}/Documents");
    vfs.insert(&docs, "readme.txt", user_file(156, README))?;
    vfs.insert(&docs, "projects", user_dir())?;
    let projects = format!("{docs}/projects");
    vfs.insert(&projects, "website.html", user_file(245, WEBSITE))?;
    vfs.insert(
        &projects,
        "script.py",
        Node::file("-rwxr-xr-x", user, user, now, SCRIPT_PY).with_size(89),
    )?;

    vfs.insert(&home, "Downloads", user_dir())?;
    vfs.insert(
        &format!("{home}/Downloads"),
        "linux-manual.pdf",
        user_file(2048576, "PDF: Linux System Administration Manual"),
    )?;

    vfs.insert(&home, "Pictures", user_dir())?;
    let pictures = format!("{home}/Pictures");
    vfs.insert(&pictures, "wallpaper.jpg", user_file(1024768, "JPEG Image: Desktop Wallpaper"))?;
    vfs.insert(&pictures, "screenshot.png", user_file(512384, "PNG Image: Desktop Screenshot"))?;

    for name in ["Music", "Videos", "Desktop"] {
        vfs.insert(&home, name, user_dir())?;
    }
    vfs.insert(&home, ".bashrc", user_file(1024, BASHRC))?;
    vfs.insert(&home, ".profile", user_file(512, PROFILE))?;

    if !vfs.exists("/home/root") {
        vfs.insert("/home", "root", dir("drwx------", "root", epoch))?;
    }

    // /usr
    vfs.insert("/", "usr", root_dir(epoch))?;
    vfs.insert("/usr", "bin", root_dir(epoch))?;
    for (name, size, content) in USR_BIN {
        vfs.insert("/usr/bin", name, binary(size, content))?;
    }
    vfs.insert("/usr", "lib", root_dir(epoch))?;
    vfs.insert("/usr", "share", root_dir(epoch))?;
    vfs.insert("/usr/share", "applications", root_dir(epoch))?;

    // /etc
    vfs.insert("/", "etc", root_dir(epoch))?;
    let passwd = format!(
        "root:x:0:0:root:/root:/bin/bash\n\
{user}:x:1000:1000:Wisnu Hidayat,,,:{home}:/bin/bash\n\
nobody:x:65534:65534:nobody:/nonexistent:/usr/sbin/nologin"
    );
    vfs.insert("/etc", "passwd", config_file(1024, &passwd))?;
    let hosts = format!(
        "127.0.0.1\tlocalhost\n127.0.1.1\t{}\n\n# IPv6\n\
::1\tip6-localhost ip6-loopback\nfe00::0\tip6-localnet\nff00::0\tip6-mcastprefix\n\
ff02::1\tip6-allnodes\nff02::2\tip6-allrouters",
        config.hostname
    );
    vfs.insert("/etc", "hosts", config_file(256, &hosts))?;
    vfs.insert("/etc", "os-release", config_file(512, OS_RELEASE))?;

    // /var
    vfs.insert("/", "var", root_dir(epoch))?;
    vfs.insert("/var", "log", root_dir(now))?;
    let stamp = now.to_iso8601();
    let host = &config.hostname;
    let iface = &config.system.network.interface;
    let syslog = format!(
        "{stamp} {host} systemd[1]: Started Linux Desktop Clone.\n\
{stamp} {host} kernel: Linux Desktop Clone initialized\n\
{stamp} {host} NetworkManager: device ({iface}): state change: activated\n\
{stamp} {host} systemd[1]: Reached target Graphical Interface."
    );
    vfs.insert(
        "/var/log",
        "syslog",
        Node::file("-rw-r--r--", "syslog", "adm", now, syslog).with_size(8192),
    )?;
    vfs.insert("/var", "cache", root_dir(now))?;

    vfs.insert("/", "tmp", dir("drwxrwxrwt", "root", now))?;

    vfs.insert("/", "bin", root_dir(epoch))?;
    for (name, size, content) in BIN {
        vfs.insert("/bin", name, binary(size, content))?;
    }

    for name in ["proc", "sys"] {
        vfs.insert("/", name, dir("dr-xr-xr-x", "root", now).with_size(0))?;
    }

    log::debug!("seeded filesystem for {user} at {home}");
    Ok(vfs)
}
