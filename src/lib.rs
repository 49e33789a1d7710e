//! Generates kubeconfig files for additional cluster users, authenticated
//! either by a client certificate signed by the cluster CA or by a token.

pub mod app;
pub mod cert;
pub mod config;
pub mod error;
pub mod kubeconfig;
pub mod types;
pub mod utils;
