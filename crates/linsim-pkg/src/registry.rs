//! Package install state and apt transcripts.

use linsim_platform::SystemTime;
use linsim_types::error::{Result, SimError};

use crate::catalog::default_catalog;

const PREAMBLE: &str = "Reading package lists... Done\n\
Building dependency tree... Done\n\
Reading state information... Done";

/// One catalog entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Package {
    pub name: String,
    pub version: String,
    pub description: String,
    pub installed: bool,
}

/// Install state for a fixed set of packages.
#[derive(Debug, Clone)]
pub struct PackageRegistry {
    packages: Vec<Package>,
    last_update: SystemTime,
}

impl Default for PackageRegistry {
    fn default() -> Self {
        Self::new(default_catalog())
    }
}

impl PackageRegistry {
    pub fn new(packages: Vec<Package>) -> Self {
        Self {
            packages,
            last_update: SystemTime::date(2024, 1, 1),
        }
    }

    pub fn get(&self, name: &str) -> Option<&Package> {
        self.packages.iter().find(|p| p.name == name)
    }

    fn get_mut(&mut self, name: &str) -> Result<&mut Package> {
        self.packages
            .iter_mut()
            .find(|p| p.name == name)
            .ok_or_else(|| SimError::PackageNotFound(name.to_string()))
    }

    pub fn is_installed(&self, name: &str) -> bool {
        self.get(name).is_some_and(|p| p.installed)
    }

    pub fn installed_count(&self) -> usize {
        self.packages.iter().filter(|p| p.installed).count()
    }

    pub fn last_update(&self) -> SystemTime {
        self.last_update
    }

    /// Refresh the package lists. Only the timestamp changes.
    pub fn update(&mut self, now: SystemTime) -> String {
        self.last_update = now;
        log::info!("Package lists refreshed at {now}");
        "Hit:1 http://archive.ubuntu.com/ubuntu jammy InRelease\n\
Get:2 http://archive.ubuntu.com/ubuntu jammy-updates InRelease [119 kB]\n\
Get:3 http://archive.ubuntu.com/ubuntu jammy-backports InRelease [107 kB]\n\
Get:4 http://security.ubuntu.com/ubuntu jammy-security InRelease [110 kB]\n\
Fetched 336 kB in 2s (168 kB/s)\n\
Reading package lists... Done"
            .to_string()
    }

    pub fn upgrade(&self) -> String {
        format!(
            "{PREAMBLE}\nCalculating upgrade... Done\n\
0 upgraded, 0 newly installed, 0 to remove and 0 not upgraded."
        )
    }

    /// Mark `name` installed. Installing twice is a no-op with a notice.
    pub fn install(&mut self, name: &str) -> Result<String> {
        let pkg = self.get_mut(name)?;
        if pkg.installed {
            return Ok(format!(
                "{name} is already the newest version ({}).",
                pkg.version
            ));
        }
        pkg.installed = true;
        let version = &pkg.version;
        log::info!("Installed package {name} {version}");
        Ok(format!(
            "{PREAMBLE}\n\
The following NEW packages will be installed:\n  {name}\n\
0 upgraded, 1 newly installed, 0 to remove and 0 not upgraded.\n\
Need to get 1,234 kB of archives.\n\
After this operation, 5,678 kB of additional disk space will be used.\n\
Get:1 http://archive.ubuntu.com/ubuntu jammy/main amd64 {name} amd64 {version} [1,234 kB]\n\
Fetched 1,234 kB in 1s (1,234 kB/s)\n\
Selecting previously unselected package {name}.\n\
(Reading database ... 123456 files and directories currently installed.)\n\
Preparing to unpack .../{name}_{version}_amd64.deb ...\n\
Unpacking {name} ({version}) ...\n\
Setting up {name} ({version}) ...\n\
Processing triggers for man-db (2.10.2-1) ..."
        ))
    }

    /// Mark `name` not installed.
    pub fn remove(&mut self, name: &str) -> Result<String> {
        let pkg = self.get_mut(name)?;
        if !pkg.installed {
            return Ok(format!("Package '{name}' is not installed, so not removed"));
        }
        pkg.installed = false;
        let version = &pkg.version;
        log::info!("Removed package {name} {version}");
        Ok(format!(
            "{PREAMBLE}\n\
The following packages will be REMOVED:\n  {name}\n\
0 upgraded, 0 newly installed, 1 to remove and 0 not upgraded.\n\
After this operation, 5,678 kB disk space will be freed.\n\
(Reading database ... 123456 files and directories currently installed.)\n\
Removing {name} ({version}) ...\n\
Processing triggers for man-db (2.10.2-1) ..."
        ))
    }

    /// Case-insensitive substring match on name or description.
    pub fn search(&self, term: &str) -> String {
        let needle = term.to_lowercase();
        let hits: Vec<String> = self
            .packages
            .iter()
            .filter(|p| {
                p.name.to_lowercase().contains(&needle)
                    || p.description.to_lowercase().contains(&needle)
            })
            .map(|p| {
                let line = format!("{}/{} - {}", p.name, p.version, p.description);
                if p.installed {
                    format!("{line} [installed]")
                } else {
                    line
                }
            })
            .collect();
        if hits.is_empty() {
            format!("No packages found matching '{term}'")
        } else {
            hits.join("\n")
        }
    }

    /// `ii`/`un` status lines in catalog order.
    pub fn list(&self, installed_only: bool) -> String {
        self.packages
            .iter()
            .filter(|p| !installed_only || p.installed)
            .map(|p| {
                let status = if p.installed { "ii" } else { "un" };
                format!("{status}  {:<20} {:<15} {}", p.name, p.version, p.description)
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Full package record.
    pub fn show(&self, name: &str) -> Result<String> {
        let p = self
            .get(name)
            .ok_or_else(|| SimError::PackageNotFound(name.to_string()))?;
        Ok(format!(
            "Package: {name}\n\
Version: {version}\n\
Priority: optional\n\
Architecture: amd64\n\
Depends: libc6 (>= 2.34)\n\
Installed-Size: 5678\n\
Maintainer: Ubuntu Developers <ubuntu-devel-discuss@lists.ubuntu.com>\n\
Description: {desc}\n \
This is a simulated package description for {name}.\n \
It provides functionality for {lower}.\n\
Homepage: https://example.com/{name}",
            name = p.name,
            version = p.version,
            desc = p.description,
            lower = p.description.to_lowercase(),
        ))
    }

    /// Usage banner for bare `apt`.
    pub fn help() -> &'static str {
        "apt 2.4.8 (amd64)\n\
Usage: apt [options] command\n\
\n\
apt is a commandline package manager and provides commands for\n\
searching and managing as well as querying information about packages.\n\
It provides the same functionality as the specialized APT tools,\n\
like apt-get and apt-cache, but enables options more suitable for\n\
interactive use by default.\n\
\n\
Most used commands:\n\
  list - list packages based on package names\n\
  search - search in package descriptions\n\
  show - show package details\n\
  install - install packages\n\
  remove - remove packages\n\
  update - update list of available packages\n\
  upgrade - upgrade the system by installing/upgrading packages"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seed_state() {
        let reg = PackageRegistry::default();
        assert!(reg.is_installed("git"));
        assert!(!reg.is_installed("htop"));
        assert!(!reg.is_installed("nonexistent"));
        assert_eq!(reg.installed_count(), 5);
        assert_eq!(reg.last_update(), SystemTime::date(2024, 1, 1));
    }

    #[test]
    fn install_flips_flag_then_reports_newest() {
        let mut reg = PackageRegistry::default();
        let out = reg.install("htop").unwrap();
        assert!(out.contains("Setting up htop (3.0.5) ..."));
        assert!(reg.is_installed("htop"));
        let again = reg.install("htop").unwrap();
        assert_eq!(again, "htop is already the newest version (3.0.5).");
    }

    #[test]
    fn remove_flips_flag_then_reports_not_installed() {
        let mut reg = PackageRegistry::default();
        reg.install("htop").unwrap();
        let out = reg.remove("htop").unwrap();
        assert!(out.contains("Removing htop (3.0.5) ..."));
        assert!(!reg.is_installed("htop"));
        let again = reg.remove("htop").unwrap();
        assert_eq!(again, "Package 'htop' is not installed, so not removed");
    }

    #[test]
    fn unknown_package() {
        let mut reg = PackageRegistry::default();
        let err = reg.install("nosuchpkg").unwrap_err();
        assert_eq!(err.to_string(), "Unable to locate package nosuchpkg");
        assert!(matches!(reg.remove("nosuchpkg"), Err(SimError::PackageNotFound(_))));
        assert!(reg.show("nosuchpkg").is_err());
    }

    #[test]
    fn update_resets_timestamp_only() {
        let mut reg = PackageRegistry::default();
        let now = SystemTime::date(2024, 6, 1);
        let out = reg.update(now);
        assert!(out.ends_with("Reading package lists... Done"));
        assert_eq!(reg.last_update(), now);
        assert_eq!(reg.installed_count(), 5);
    }

    #[test]
    fn upgrade_is_noop() {
        let reg = PackageRegistry::default();
        assert!(reg.upgrade().ends_with("0 upgraded, 0 newly installed, 0 to remove and 0 not upgraded."));
    }

    #[test]
    fn search_is_case_insensitive() {
        let reg = PackageRegistry::default();
        let out = reg.search("EDITOR");
        assert!(out.contains("nano/6.2 - Small, friendly text editor inspired by Pico [installed]"));
        assert!(out.contains("vim/8.2"));
        assert!(!out.contains("git"));
    }

    #[test]
    fn search_uninstalled_has_no_marker() {
        let reg = PackageRegistry::default();
        assert_eq!(reg.search("htop"), "htop/3.0.5 - Interactive process viewer");
    }

    #[test]
    fn search_no_match() {
        let reg = PackageRegistry::default();
        assert_eq!(reg.search("zzz"), "No packages found matching 'zzz'");
    }

    #[test]
    fn list_all_and_installed() {
        let reg = PackageRegistry::default();
        let all = reg.list(false);
        assert_eq!(all.lines().count(), 10);
        assert!(all.lines().next().unwrap().starts_with("ii  git "));
        assert!(all.contains("un  zip "));
        let installed = reg.list(true);
        assert_eq!(installed.lines().count(), 5);
        assert!(installed.lines().all(|l| l.starts_with("ii")));
    }

    #[test]
    fn show_record() {
        let reg = PackageRegistry::default();
        let out = reg.show("git").unwrap();
        assert!(out.starts_with("Package: git\nVersion: 2.34.1\n"));
        assert!(out.contains(" It provides functionality for fast, scalable, distributed revision control system."));
        assert!(out.ends_with("Homepage: https://example.com/git"));
    }

    #[test]
    fn help_banner() {
        assert!(PackageRegistry::help().starts_with("apt 2.4.8 (amd64)"));
    }
}
