// cert/types.rs
use openssl::{
    pkey::{PKey, Private},
    x509::X509,
};

pub const CA_CERT_AND_KEY_BASE_NAME: &str = "ca";
pub const DEFAULT_KEY_SIZE: u32 = 2048;

/// Parameters for a client certificate signed by the cluster CA.
#[derive(Debug, Clone)]
pub struct CertificateConfig {
    pub common_name: String,
    pub organizations: Vec<String>,
    pub validity_days: u32,
    pub key_size: u32,
}

impl CertificateConfig {
    pub fn client(common_name: &str, organizations: &[String], validity_days: u32) -> Self {
        Self {
            common_name: common_name.to_string(),
            organizations: organizations.to_vec(),
            validity_days,
            key_size: DEFAULT_KEY_SIZE,
        }
    }
}

/// A loaded certificate authority: certificate plus its signing key.
pub struct CertificateAuthority {
    pub cert: X509,
    pub key: PKey<Private>,
}

/// PEM-encoded certificate and private key of an issued client.
#[derive(Debug, Clone)]
pub struct IssuedCertificate {
    pub cert_pem: Vec<u8>,
    pub key_pem: Vec<u8>,
}
