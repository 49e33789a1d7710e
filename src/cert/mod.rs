// src/cert/mod.rs
mod ca;
mod openssl;
#[cfg(test)]
pub mod testutil;
mod types;
pub mod verification;

pub use ca::{
    certificate_authority_from_pem, CertificateAuthorityProvider, DiskCertificateAuthority,
};
pub use self::openssl::{certificate_to_pem, sign_client_certificate};
pub use types::{
    CertificateAuthority, CertificateConfig, IssuedCertificate, CA_CERT_AND_KEY_BASE_NAME,
};
