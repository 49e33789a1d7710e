use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClusterEndpoint {
    pub server: String,
    /// PEM-encoded CA certificate.
    pub certificate_authority_data: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    pub name: String,
}

impl Principal {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
        }
    }
}

/// The credential carried by an auth-info entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Credential {
    ClientCertificate {
        certificate: Vec<u8>,
        private_key: Vec<u8>,
    },
    BearerToken(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContextRef {
    pub cluster: String,
    pub auth_info: String,
}

/// In-memory kubeconfig. Maps are ordered so serialization is stable.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct KubeconfigDocument {
    pub clusters: BTreeMap<String, ClusterEndpoint>,
    pub auth_infos: BTreeMap<String, Credential>,
    pub contexts: BTreeMap<String, ContextRef>,
    pub current_context: String,
}

impl KubeconfigDocument {
    pub fn current_context(&self) -> Option<&ContextRef> {
        self.contexts.get(&self.current_context)
    }

    pub fn current_cluster(&self) -> Option<&ClusterEndpoint> {
        self.current_context()
            .and_then(|context| self.clusters.get(&context.cluster))
    }

    pub fn current_auth_info(&self) -> Option<&Credential> {
        self.current_context()
            .and_then(|context| self.auth_infos.get(&context.auth_info))
    }

    /// Checks that the current context exists and that every context points
    /// at an existing cluster and auth-info.
    pub fn check_references(&self) -> Result<(), String> {
        if self.clusters.is_empty() {
            return Err("document has no clusters".to_string());
        }
        if self.auth_infos.is_empty() {
            return Err("document has no users".to_string());
        }
        if self.current_context.is_empty() {
            return Err("current-context is not set".to_string());
        }
        if !self.contexts.contains_key(&self.current_context) {
            return Err(format!(
                "current-context {:?} does not name a context",
                self.current_context
            ));
        }
        for (name, context) in &self.contexts {
            if !self.clusters.contains_key(&context.cluster) {
                return Err(format!(
                    "context {:?} references unknown cluster {:?}",
                    name, context.cluster
                ));
            }
            if !self.auth_infos.contains_key(&context.auth_info) {
                return Err(format!(
                    "context {:?} references unknown user {:?}",
                    name, context.auth_info
                ));
            }
        }
        Ok(())
    }
}
