// types.rs
use crate::config::ClusterConfig;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Generate kubeconfig files for cluster users",
    long_about = None
)]
pub struct Args {
    // Enable debug logging on stderr
    #[arg(short, long, global = true)]
    pub debug: bool,

    // Also append log lines to this file
    #[arg(long, global = true)]
    pub log_file: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Outputs a kubeconfig file for an additional user
    User(UserArgs),
}

#[derive(clap::Args, Debug, Clone, Default)]
pub struct UserArgs {
    /// The path where certificates are stored
    #[arg(long = "cert-dir")]
    pub cert_dir: Option<String>,

    /// The IP address the API server is accessible on
    #[arg(long = "apiserver-advertise-address")]
    pub apiserver_advertise_address: Option<String>,

    /// The port the API server is accessible on
    #[arg(long = "apiserver-bind-port")]
    pub apiserver_bind_port: Option<u16>,

    /// The path where the kubeconfig file is written with --output-file
    #[arg(long = "kubeconfig-dir")]
    pub kubeconfig_dir: Option<String>,

    /// The token that should be used as the authentication mechanism for this kubeconfig, instead of client certificates
    #[arg(long)]
    pub token: Option<String>,

    /// The name of the user. It will be used as the CN if client certificates are created
    #[arg(long = "client-name")]
    pub client_name: String,

    /// The organizations of the client certificate. It will be used as the O if client certificates are created
    #[arg(long = "org")]
    pub organizations: Vec<String>,

    /// Write the kubeconfig to this file in --kubeconfig-dir instead of stdout
    #[arg(long = "output-file")]
    pub output_file: Option<String>,

    /// Path to a JSON file with defaults for the flags above
    #[arg(long)]
    pub config: Option<String>,
}

impl UserArgs {
    /// Flags given on the command line win over values from the config file.
    pub fn apply_to(&self, config: &mut ClusterConfig) {
        if let Some(cert_dir) = &self.cert_dir {
            config.cert_dir = cert_dir.clone();
        }
        if let Some(address) = &self.apiserver_advertise_address {
            config.advertise_address = address.clone();
        }
        if let Some(port) = self.apiserver_bind_port {
            config.bind_port = port;
        }
        if let Some(kubeconfig_dir) = &self.kubeconfig_dir {
            config.kubeconfig_dir = kubeconfig_dir.clone();
        }
    }
}
