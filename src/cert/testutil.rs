// In-memory PKI fixtures for tests.
use super::ca::CertificateAuthorityProvider;
use super::types::CertificateAuthority;
use crate::error::Result;
use crate::utils::logging::Logger;
use openssl::{
    asn1::Asn1Time,
    bn::{BigNum, MsbOption},
    hash::MessageDigest,
    nid::Nid,
    pkey::PKey,
    rsa::Rsa,
    x509::{
        extension::{BasicConstraints, KeyUsage, SubjectKeyIdentifier},
        X509Builder, X509NameBuilder,
    },
};
use std::{fs, path::Path};

/// Self-signed CA with CN=kubernetes, matching what a control plane bootstrap
/// would leave in the pki directory.
pub fn new_test_ca() -> CertificateAuthority {
    let key = PKey::from_rsa(Rsa::generate(2048).unwrap()).unwrap();

    let mut name = X509NameBuilder::new().unwrap();
    name.append_entry_by_nid(Nid::COMMONNAME, "kubernetes").unwrap();
    let name = name.build();

    let mut serial = BigNum::new().unwrap();
    serial.rand(159, MsbOption::MAYBE_ZERO, false).unwrap();

    let mut builder = X509Builder::new().unwrap();
    builder.set_version(2).unwrap();
    builder
        .set_serial_number(&serial.to_asn1_integer().unwrap())
        .unwrap();
    builder.set_subject_name(&name).unwrap();
    builder.set_issuer_name(&name).unwrap();
    builder.set_pubkey(&key).unwrap();
    builder
        .set_not_before(&Asn1Time::days_from_now(0).unwrap())
        .unwrap();
    builder
        .set_not_after(&Asn1Time::days_from_now(3650).unwrap())
        .unwrap();
    builder
        .append_extension(BasicConstraints::new().critical().ca().build().unwrap())
        .unwrap();
    builder
        .append_extension(
            KeyUsage::new()
                .critical()
                .digital_signature()
                .key_encipherment()
                .key_cert_sign()
                .build()
                .unwrap(),
        )
        .unwrap();
    let subject_key_id = SubjectKeyIdentifier::new()
        .build(&builder.x509v3_context(None, None))
        .unwrap();
    builder.append_extension(subject_key_id).unwrap();
    builder.sign(&key, MessageDigest::sha256()).unwrap();

    CertificateAuthority {
        cert: builder.build(),
        key,
    }
}

/// Writes `ca.crt` / `ca.key` into `dir`.
pub fn write_ca_to_dir(ca: &CertificateAuthority, dir: &Path) {
    fs::create_dir_all(dir).unwrap();
    fs::write(dir.join("ca.crt"), ca.cert.to_pem().unwrap()).unwrap();
    fs::write(
        dir.join("ca.key"),
        ca.key.rsa().unwrap().private_key_to_pem().unwrap(),
    )
    .unwrap();
}

/// Hands out a fixed CA instead of reading the filesystem.
pub struct StaticCertificateAuthority {
    cert_pem: Vec<u8>,
    key_pem: Vec<u8>,
}

impl StaticCertificateAuthority {
    pub fn new(ca: &CertificateAuthority) -> Self {
        Self {
            cert_pem: ca.cert.to_pem().unwrap(),
            key_pem: ca.key.private_key_to_pem_pkcs8().unwrap(),
        }
    }
}

impl CertificateAuthorityProvider for StaticCertificateAuthority {
    fn load_certificate_authority(
        &self,
        _cert_dir: &Path,
        _base_name: &str,
        _logger: &mut dyn Logger,
    ) -> Result<CertificateAuthority> {
        super::ca::certificate_authority_from_pem(&self.cert_pem, &self.key_pem)
    }
}
