//! Simulated machine configuration.
//!
//! Everything is optional in the TOML source; missing keys fall back to the
//! stock "Linux Desktop Clone" machine.
//!
//! ```toml
//! user = "wisnu"
//! hostname = "linux-clone"
//!
//! [system]
//! kernel = "Linux Desktop Clone 5.15.0"
//!
//! [system.memory]
//! total = 8192
//! ```

use std::path::Path;

use serde::Deserialize;

use crate::error::{Result, SimError};

/// Top-level configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct SimConfig {
    /// Login user for the interactive session.
    #[serde(default = "default_user")]
    pub user: String,
    /// Machine hostname shown in prompts and `uname -a`.
    #[serde(default = "default_hostname")]
    pub hostname: String,
    /// Banner printed when the terminal opens or is cleared.
    #[serde(default = "default_banner")]
    pub banner: String,
    #[serde(default)]
    pub system: SystemInfo,
}

/// Static description of the simulated hardware and kernel.
#[derive(Debug, Clone, Deserialize)]
pub struct SystemInfo {
    #[serde(default = "default_kernel")]
    pub kernel: String,
    #[serde(default = "default_architecture")]
    pub architecture: String,
    #[serde(default)]
    pub memory: MemoryInfo,
    #[serde(default)]
    pub cpu: CpuInfo,
    #[serde(default)]
    pub network: NetworkInfo,
}

/// Memory figures in MiB.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct MemoryInfo {
    #[serde(default = "default_mem_total")]
    pub total: u64,
    #[serde(default = "default_mem_used")]
    pub used: u64,
    #[serde(default = "default_mem_free")]
    pub free: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CpuInfo {
    #[serde(default = "default_cores")]
    pub cores: u32,
    #[serde(default = "default_cpu_model")]
    pub model: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NetworkInfo {
    #[serde(default = "default_interface")]
    pub interface: String,
    #[serde(default = "default_ip")]
    pub ip: String,
}

fn default_user() -> String {
    "wisnu".to_string()
}
fn default_hostname() -> String {
    "linux-clone".to_string()
}
fn default_banner() -> String {
    "Linux Desktop Clone Terminal v2.0\nCreated by Wisnu Hidayat".to_string()
}
fn default_kernel() -> String {
    "Linux Desktop Clone 5.15.0".to_string()
}
fn default_architecture() -> String {
    "x86_64".to_string()
}
fn default_mem_total() -> u64 {
    8192
}
fn default_mem_used() -> u64 {
    2048
}
fn default_mem_free() -> u64 {
    6144
}
fn default_cores() -> u32 {
    4
}
fn default_cpu_model() -> String {
    "Virtual CPU @ 2.4GHz".to_string()
}
fn default_interface() -> String {
    "eth0".to_string()
}
fn default_ip() -> String {
    "192.168.1.100".to_string()
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            user: default_user(),
            hostname: default_hostname(),
            banner: default_banner(),
            system: SystemInfo::default(),
        }
    }
}

impl Default for SystemInfo {
    fn default() -> Self {
        Self {
            kernel: default_kernel(),
            architecture: default_architecture(),
            memory: MemoryInfo::default(),
            cpu: CpuInfo::default(),
            network: NetworkInfo::default(),
        }
    }
}

impl Default for MemoryInfo {
    fn default() -> Self {
        Self {
            total: default_mem_total(),
            used: default_mem_used(),
            free: default_mem_free(),
        }
    }
}

impl Default for CpuInfo {
    fn default() -> Self {
        Self {
            cores: default_cores(),
            model: default_cpu_model(),
        }
    }
}

impl Default for NetworkInfo {
    fn default() -> Self {
        Self {
            interface: default_interface(),
            ip: default_ip(),
        }
    }
}

impl SimConfig {
    /// Parse a configuration from TOML text.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a configuration file.
    pub fn load(path: &Path) -> Result<Self> {
        let source = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&source)?;
        log::info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Home directory of the configured user.
    pub fn home_dir(&self) -> String {
        if self.user == "root" {
            "/root".to_string()
        } else {
            format!("/home/{}", self.user)
        }
    }

    fn validate(&self) -> Result<()> {
        if matches!(self.user.as_str(), "" | "." | "..") || self.user.contains('/') {
            return Err(SimError::Config(format!(
                "invalid user name: '{}'",
                self.user
            )));
        }
        if self.hostname.is_empty() {
            return Err(SimError::Config("hostname must not be empty".to_string()));
        }
        if self.system.cpu.cores == 0 {
            return Err(SimError::Config("cpu.cores must be at least 1".to_string()));
        }
        Ok(())
    }
}
