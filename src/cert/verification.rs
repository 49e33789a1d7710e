// src/cert/verification.rs
use super::{openssl::parse_certificate, types::CertificateAuthority};
use crate::error::{KubeconfigError, Result};
use chrono::{DateTime, TimeZone, Utc};
use openssl::hash::{hash, MessageDigest};
use x509_parser::prelude::{FromDer, ParsedExtension, X509Certificate};

#[derive(Debug, Clone)]
pub struct CertificateInfo {
    pub subject: String,
    pub issuer: String,
    pub common_name: Option<String>,
    pub organizations: Vec<String>,
    pub not_before: DateTime<Utc>,
    pub not_after: DateTime<Utc>,
    pub serial: String,
    pub fingerprint: String,
    pub is_ca: bool,
}

fn timestamp(seconds: i64, what: &str) -> Result<DateTime<Utc>> {
    Utc.timestamp_opt(seconds, 0)
        .single()
        .ok_or_else(|| KubeconfigError::Decode(format!("Invalid {} timestamp", what)))
}

pub fn inspect_certificate(cert_der: &[u8]) -> Result<CertificateInfo> {
    let (_remainder, cert) = X509Certificate::from_der(cert_der)
        .map_err(|e| KubeconfigError::Decode(format!("couldn't parse certificate: {}", e)))?;

    let common_name = cert
        .subject()
        .iter_common_name()
        .next()
        .and_then(|cn| cn.as_str().ok())
        .map(str::to_string);
    let organizations = cert
        .subject()
        .iter_organization()
        .filter_map(|o| o.as_str().ok())
        .map(str::to_string)
        .collect();

    let is_ca = cert
        .extensions()
        .iter()
        .find_map(|ext| match ext.parsed_extension() {
            ParsedExtension::BasicConstraints(bc) => Some(bc.ca),
            _ => None,
        })
        .unwrap_or(false);

    let fingerprint = hash(MessageDigest::sha256(), cert_der)
        .map_err(|e| KubeconfigError::Decode(format!("couldn't hash certificate: {}", e)))?;

    Ok(CertificateInfo {
        subject: cert.subject().to_string(),
        issuer: cert.issuer().to_string(),
        common_name,
        organizations,
        not_before: timestamp(cert.validity().not_before.timestamp(), "not_before")?,
        not_after: timestamp(cert.validity().not_after.timestamp(), "not_after")?,
        serial: hex::encode(cert.raw_serial()),
        fingerprint: hex::encode(fingerprint),
        is_ca,
    })
}

/// Checks that `cert_bytes` was signed by `ca` and names `common_name`.
pub fn verify_client_certificate(
    cert_bytes: &[u8],
    ca: &CertificateAuthority,
    common_name: &str,
) -> Result<CertificateInfo> {
    let cert = parse_certificate(cert_bytes)
        .map_err(|e| KubeconfigError::Decode(format!("couldn't parse client certificate: {}", e)))?;

    let signed_by_ca = ca
        .cert
        .public_key()
        .and_then(|public| cert.verify(&public))
        .unwrap_or(false);
    if !signed_by_ca {
        return Err(KubeconfigError::Validation(
            "client certificate is not signed by the certificate authority".to_string(),
        ));
    }

    let der = cert
        .to_der()
        .map_err(|e| KubeconfigError::Decode(format!("couldn't re-encode certificate: {}", e)))?;
    let info = inspect_certificate(&der)?;
    if info.common_name.as_deref() != Some(common_name) {
        return Err(KubeconfigError::Validation(format!(
            "client certificate common name {:?} does not match {:?}",
            info.common_name, common_name
        )));
    }
    Ok(info)
}
