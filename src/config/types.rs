// config/types.rs
use crate::error::{KubeconfigError, Result};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    net::{IpAddr, SocketAddr},
    path::PathBuf,
};

pub const DEFAULT_BIND_PORT: u16 = 6443;
pub const DEFAULT_CERT_DIR: &str = "/etc/kubernetes/pki";
pub const DEFAULT_KUBECONFIG_DIR: &str = "/etc/kubernetes";
pub const DEFAULT_CLUSTER_NAME: &str = "kubernetes";
pub const DEFAULT_VALIDITY_DAYS: u32 = 365;

/// Settings shared by the kubeconfig phases. Loaded from an optional JSON
/// file, then overridden by command-line flags.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClusterConfig {
    pub advertise_address: String,
    pub bind_port: u16,
    pub cert_dir: String,
    pub kubeconfig_dir: String,
    pub cluster_name: String,
    pub validity_days: u32,
}

impl Default for ClusterConfig {
    fn default() -> Self {
        Self {
            advertise_address: String::new(),
            bind_port: DEFAULT_BIND_PORT,
            cert_dir: DEFAULT_CERT_DIR.to_string(),
            kubeconfig_dir: DEFAULT_KUBECONFIG_DIR.to_string(),
            cluster_name: DEFAULT_CLUSTER_NAME.to_string(),
            validity_days: DEFAULT_VALIDITY_DAYS,
        }
    }
}

impl ClusterConfig {
    pub fn load_from_file(path: &str) -> Result<Self> {
        let path = shellexpand::tilde(path).to_string();
        let config_str = fs::read_to_string(&path).map_err(|e| {
            KubeconfigError::NotFound(format!("config file {}: {}", path, e))
        })?;
        serde_json::from_str(&config_str)
            .map_err(|e| KubeconfigError::Decode(format!("config file {}: {}", path, e)))
    }

    pub fn validate(&self) -> Result<()> {
        self.advertise_ip()?;
        if self.bind_port == 0 {
            return Err(KubeconfigError::Validation(
                "apiserver bind port must be between 1 and 65535".to_string(),
            ));
        }
        if self.cert_dir.trim().is_empty() {
            return Err(KubeconfigError::Validation(
                "certificate directory must not be empty".to_string(),
            ));
        }
        if self.cluster_name.trim().is_empty() {
            return Err(KubeconfigError::Validation(
                "cluster name must not be empty".to_string(),
            ));
        }
        if self.validity_days == 0 {
            return Err(KubeconfigError::Validation(
                "certificate validity must be at least one day".to_string(),
            ));
        }
        Ok(())
    }

    pub fn advertise_ip(&self) -> Result<IpAddr> {
        let address = self.advertise_address.trim();
        if address.is_empty() {
            return Err(KubeconfigError::Validation(
                "apiserver advertise address is required".to_string(),
            ));
        }
        address.parse::<IpAddr>().map_err(|_| {
            KubeconfigError::Validation(format!(
                "apiserver advertise address {:?} is not a valid IP address",
                address
            ))
        })
    }

    /// `https://<ip>:<port>`, with IPv6 addresses bracketed.
    pub fn server_url(&self) -> Result<String> {
        let ip = self.advertise_ip()?;
        Ok(format!("https://{}", SocketAddr::new(ip, self.bind_port)))
    }

    pub fn cert_dir_path(&self) -> PathBuf {
        PathBuf::from(shellexpand::tilde(&self.cert_dir).to_string())
    }

    pub fn kubeconfig_dir_path(&self) -> PathBuf {
        PathBuf::from(shellexpand::tilde(&self.kubeconfig_dir).to_string())
    }
}
