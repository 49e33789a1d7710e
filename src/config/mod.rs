// src/config/mod.rs
mod types;

pub use types::{ClusterConfig, DEFAULT_CLUSTER_NAME};
