use super::types::{ClusterEndpoint, ContextRef, Credential, KubeconfigDocument, Principal};
use crate::cert::certificate_to_pem;
use crate::config::DEFAULT_CLUSTER_NAME;
use crate::error::{KubeconfigError, Result};
use std::collections::BTreeMap;
use url::Url;

pub struct KubeconfigBuilder {
    cluster_name: String,
}

impl Default for KubeconfigBuilder {
    fn default() -> Self {
        Self::new(DEFAULT_CLUSTER_NAME)
    }
}

impl KubeconfigBuilder {
    pub fn new(cluster_name: &str) -> Self {
        Self {
            cluster_name: cluster_name.to_string(),
        }
    }

    pub fn context_name(&self, principal: &Principal) -> String {
        format!("{}@{}", principal.name, self.cluster_name)
    }

    /// Assembles a single-cluster, single-user document with its context
    /// selected as current.
    pub fn build(
        &self,
        endpoint: &ClusterEndpoint,
        principal: &Principal,
        credential: Credential,
    ) -> Result<KubeconfigDocument> {
        if self.cluster_name.trim().is_empty() {
            return Err(KubeconfigError::Validation(
                "cluster name must not be empty".to_string(),
            ));
        }
        validate_server(&endpoint.server)?;
        let certificate_authority_data = certificate_to_pem(&endpoint.certificate_authority_data)
            .map_err(|e| KubeconfigError::Validation(format!("CA certificate: {}", e)))?;
        if principal.name.trim().is_empty() {
            return Err(KubeconfigError::Validation(
                "client name must not be empty".to_string(),
            ));
        }
        validate_credential(&credential)?;

        let context_name = self.context_name(principal);

        let mut clusters = BTreeMap::new();
        clusters.insert(
            self.cluster_name.clone(),
            ClusterEndpoint {
                server: endpoint.server.clone(),
                certificate_authority_data,
            },
        );

        let mut auth_infos = BTreeMap::new();
        auth_infos.insert(principal.name.clone(), credential);

        let mut contexts = BTreeMap::new();
        contexts.insert(
            context_name.clone(),
            ContextRef {
                cluster: self.cluster_name.clone(),
                auth_info: principal.name.clone(),
            },
        );

        Ok(KubeconfigDocument {
            clusters,
            auth_infos,
            contexts,
            current_context: context_name,
        })
    }
}

fn validate_server(server: &str) -> Result<()> {
    let url = Url::parse(server).map_err(|e| {
        KubeconfigError::Validation(format!("server {:?} is not a valid URL: {}", server, e))
    })?;
    if url.scheme() != "https" {
        return Err(KubeconfigError::Validation(format!(
            "server {:?} must use the https scheme",
            server
        )));
    }
    if url.host_str().map_or(true, str::is_empty) {
        return Err(KubeconfigError::Validation(format!(
            "server {:?} has no host",
            server
        )));
    }
    Ok(())
}

fn validate_credential(credential: &Credential) -> Result<()> {
    match credential {
        Credential::ClientCertificate {
            certificate,
            private_key,
        } => {
            if certificate.is_empty() {
                return Err(KubeconfigError::Validation(
                    "client certificate must not be empty".to_string(),
                ));
            }
            if private_key.is_empty() {
                return Err(KubeconfigError::Validation(
                    "client key must not be empty".to_string(),
                ));
            }
        }
        Credential::BearerToken(token) => {
            if token.is_empty() {
                return Err(KubeconfigError::Validation(
                    "token must not be empty".to_string(),
                ));
            }
        }
    }
    Ok(())
}
