use super::{
    openssl::sign_client_certificate,
    types::{CertificateAuthority, CertificateConfig, IssuedCertificate},
    verification::inspect_certificate,
};
use crate::error::{KubeconfigError, Result};
use crate::utils::logging::Logger;
use openssl::{pkey::PKey, x509::X509};
use std::{fs, io, path::Path};

/// Source of the cluster CA and of client certificates signed by it.
pub trait CertificateAuthorityProvider {
    fn load_certificate_authority(
        &self,
        cert_dir: &Path,
        base_name: &str,
        logger: &mut dyn Logger,
    ) -> Result<CertificateAuthority>;

    fn issue_client_certificate(
        &self,
        ca: &CertificateAuthority,
        config: &CertificateConfig,
        logger: &mut dyn Logger,
    ) -> Result<IssuedCertificate> {
        sign_client_certificate(ca, config, logger)
    }
}

/// Reads `<dir>/<base>.crt` and `<dir>/<base>.key` from disk.
#[derive(Debug, Default, Clone, Copy)]
pub struct DiskCertificateAuthority;

fn read_pki_file(path: &Path) -> Result<Vec<u8>> {
    fs::read(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => KubeconfigError::NotFound(format!(
            "couldn't load {}: file does not exist",
            path.display()
        )),
        _ => KubeconfigError::Io(e),
    })
}

impl CertificateAuthorityProvider for DiskCertificateAuthority {
    fn load_certificate_authority(
        &self,
        cert_dir: &Path,
        base_name: &str,
        logger: &mut dyn Logger,
    ) -> Result<CertificateAuthority> {
        let cert_path = cert_dir.join(format!("{}.crt", base_name));
        let key_path = cert_dir.join(format!("{}.key", base_name));
        logger.debug_log(&format!(
            "Loading certificate authority from {} and {}",
            cert_path.display(),
            key_path.display()
        ));

        let cert_pem = read_pki_file(&cert_path)?;
        let key_pem = read_pki_file(&key_path)?;
        let ca = certificate_authority_from_pem(&cert_pem, &key_pem)?;

        logger.log(&format!(
            "Using existing certificate authority {}",
            cert_path.display()
        ));
        Ok(ca)
    }
}

/// Parses a CA pair and checks that it can actually sign: the certificate
/// must carry the CA basic constraint and match the private key.
pub fn certificate_authority_from_pem(
    cert_pem: &[u8],
    key_pem: &[u8],
) -> Result<CertificateAuthority> {
    let cert = X509::from_pem(cert_pem).map_err(|e| {
        KubeconfigError::Decode(format!("couldn't parse CA certificate: {}", e))
    })?;
    let key = PKey::private_key_from_pem(key_pem)
        .map_err(|e| KubeconfigError::Decode(format!("couldn't parse CA key: {}", e)))?;

    let der = cert
        .to_der()
        .map_err(|e| KubeconfigError::Decode(format!("couldn't re-encode CA certificate: {}", e)))?;
    let info = inspect_certificate(&der)?;
    if !info.is_ca {
        return Err(KubeconfigError::Decode(format!(
            "certificate {} is not a certificate authority",
            info.subject
        )));
    }

    let matches = cert
        .public_key()
        .map(|public| public.public_eq(&key))
        .unwrap_or(false);
    if !matches {
        return Err(KubeconfigError::Decode(
            "CA certificate and key do not match".to_string(),
        ));
    }

    Ok(CertificateAuthority { cert, key })
}
