// src/kubeconfig/mod.rs
mod builder;
mod kube;
mod types;

pub use builder::KubeconfigBuilder;
pub use kube::{load, serialize, write_to};
pub use types::{ClusterEndpoint, ContextRef, Credential, KubeconfigDocument, Principal};
