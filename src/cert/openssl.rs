// src/cert/openssl.rs
use super::types::{CertificateAuthority, CertificateConfig, IssuedCertificate};
use crate::error::{KubeconfigError, Result};
use crate::utils::logging::Logger;
use openssl::{
    asn1::Asn1Time,
    bn::{BigNum, MsbOption},
    error::ErrorStack,
    hash::MessageDigest,
    nid::Nid,
    pkey::{PKey, Private},
    rsa::Rsa,
    x509::{
        extension::{AuthorityKeyIdentifier, BasicConstraints, ExtendedKeyUsage, KeyUsage},
        X509Builder, X509NameBuilder, X509,
    },
};

const PEM_CERT_HEADER: &[u8] = b"-----BEGIN CERTIFICATE-----";

fn generation_error(what: &str, error: ErrorStack) -> KubeconfigError {
    KubeconfigError::Encoding(format!("{}: {}", what, error))
}

pub fn generate_private_key(key_size: u32, logger: &mut dyn Logger) -> Result<PKey<Private>> {
    logger.debug_log(&format!("Generating {}-bit RSA private key", key_size));

    let rsa = Rsa::generate(key_size)
        .map_err(|e| generation_error("Failed to generate private key", e))?;
    PKey::from_rsa(rsa).map_err(|e| generation_error("Failed to wrap private key", e))
}

fn random_serial() -> std::result::Result<openssl::asn1::Asn1Integer, ErrorStack> {
    let mut serial = BigNum::new()?;
    serial.rand(159, MsbOption::MAYBE_ZERO, false)?;
    serial.to_asn1_integer()
}

fn build_client_certificate(
    config: &CertificateConfig,
    key: &PKey<Private>,
    ca: &CertificateAuthority,
) -> std::result::Result<X509, ErrorStack> {
    let mut name = X509NameBuilder::new()?;
    for organization in &config.organizations {
        name.append_entry_by_nid(Nid::ORGANIZATIONNAME, organization)?;
    }
    name.append_entry_by_nid(Nid::COMMONNAME, &config.common_name)?;
    let name = name.build();

    let mut builder = X509Builder::new()?;
    builder.set_version(2)?;
    let serial = random_serial()?;
    builder.set_serial_number(&serial)?;
    builder.set_subject_name(&name)?;
    builder.set_issuer_name(ca.cert.subject_name())?;
    builder.set_pubkey(key)?;
    let not_before = Asn1Time::days_from_now(0)?;
    let not_after = Asn1Time::days_from_now(config.validity_days)?;
    builder.set_not_before(&not_before)?;
    builder.set_not_after(&not_after)?;

    builder.append_extension(BasicConstraints::new().critical().build()?)?;
    builder.append_extension(
        KeyUsage::new()
            .critical()
            .digital_signature()
            .key_encipherment()
            .build()?,
    )?;
    builder.append_extension(ExtendedKeyUsage::new().client_auth().build()?)?;
    let authority_key_id = AuthorityKeyIdentifier::new()
        .keyid(false)
        .issuer(false)
        .build(&builder.x509v3_context(Some(&ca.cert), None))?;
    builder.append_extension(authority_key_id)?;

    builder.sign(&ca.key, MessageDigest::sha256())?;
    Ok(builder.build())
}

/// Issues a clientAuth certificate for `config.common_name`, signed by `ca`.
pub fn sign_client_certificate(
    ca: &CertificateAuthority,
    config: &CertificateConfig,
    logger: &mut dyn Logger,
) -> Result<IssuedCertificate> {
    if config.common_name.trim().is_empty() {
        return Err(KubeconfigError::Validation(
            "client certificate common name must not be empty".to_string(),
        ));
    }

    let key = generate_private_key(config.key_size, logger)?;

    logger.debug_log(&format!(
        "Signing client certificate CN={} O={:?} valid for {} days",
        config.common_name, config.organizations, config.validity_days
    ));
    let cert = build_client_certificate(config, &key, ca)
        .map_err(|e| generation_error("Failed to sign client certificate", e))?;

    let cert_pem = cert
        .to_pem()
        .map_err(|e| generation_error("Failed to encode client certificate", e))?;
    let key_pem = key
        .rsa()
        .and_then(|rsa| rsa.private_key_to_pem())
        .map_err(|e| generation_error("Failed to encode client key", e))?;

    logger.debug_log(&format!(
        "Issued client certificate for {}",
        config.common_name
    ));
    Ok(IssuedCertificate { cert_pem, key_pem })
}

// PEM files may start with blank lines or indentation before the header.
fn pem_body(bytes: &[u8]) -> Option<&[u8]> {
    let start = bytes
        .iter()
        .position(|b| !b.is_ascii_whitespace())
        .unwrap_or(bytes.len());
    let body = &bytes[start..];
    body.starts_with(PEM_CERT_HEADER).then_some(body)
}

/// Parses a certificate given either as PEM or as raw DER.
pub fn parse_certificate(bytes: &[u8]) -> std::result::Result<X509, ErrorStack> {
    match pem_body(bytes) {
        Some(pem) => X509::from_pem(pem),
        None => X509::from_der(bytes),
    }
}

/// Normalizes a PEM or DER certificate to PEM.
pub fn certificate_to_pem(bytes: &[u8]) -> Result<Vec<u8>> {
    if bytes.is_empty() {
        return Err(KubeconfigError::Validation(
            "certificate data is empty".to_string(),
        ));
    }
    let cert = parse_certificate(bytes).map_err(|e| {
        KubeconfigError::Validation(format!("certificate data is not a valid certificate: {}", e))
    })?;
    if let Some(pem) = pem_body(bytes) {
        return Ok(pem.to_vec());
    }
    cert.to_pem()
        .map_err(|e| generation_error("Failed to encode certificate", e))
}
