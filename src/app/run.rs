use crate::cert::{
    verification::{inspect_certificate, verify_client_certificate},
    CertificateAuthorityProvider, CertificateConfig, CA_CERT_AND_KEY_BASE_NAME,
};
use crate::config::ClusterConfig;
use crate::error::{KubeconfigError, Result};
use crate::kubeconfig::{write_to, ClusterEndpoint, Credential, KubeconfigBuilder, Principal};
use crate::types::UserArgs;
use crate::utils::logging::Logger;
use std::{
    fs::{self, OpenOptions},
    io::Write,
    path::Path,
};

// Owner-only from the moment it is opened; an existing file keeps its old mode
// on open, so it is tightened through the handle before anything is written.
fn open_private_file(path: &Path) -> Result<fs::File> {
    let mut options = OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }
    let file = options.open(path)?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        file.set_permissions(fs::Permissions::from_mode(0o600))?;
    }
    Ok(file)
}

fn resolve_config(args: &UserArgs) -> Result<ClusterConfig> {
    let mut config = match &args.config {
        Some(path) => ClusterConfig::load_from_file(path)?,
        None => ClusterConfig::default(),
    };
    args.apply_to(&mut config);
    config.validate()?;
    Ok(config)
}

fn validate_user_args(args: &UserArgs) -> Result<()> {
    if args.client_name.trim().is_empty() {
        return Err(KubeconfigError::Validation(
            "--client-name must not be empty".to_string(),
        ));
    }
    if matches!(&args.token, Some(token) if token.is_empty()) {
        return Err(KubeconfigError::Validation(
            "--token must not be empty".to_string(),
        ));
    }
    if let Some(name) = &args.output_file {
        if name.trim().is_empty() || name.contains(std::path::MAIN_SEPARATOR) {
            return Err(KubeconfigError::Validation(format!(
                "--output-file {:?} must be a plain file name",
                name
            )));
        }
    }
    Ok(())
}

/// Runs the `user` phase: loads the CA, picks the credential and writes the
/// kubeconfig either to `out` or to `--output-file` inside `--kubeconfig-dir`.
pub fn run_user_command(
    args: &UserArgs,
    provider: &dyn CertificateAuthorityProvider,
    out: &mut dyn Write,
    logger: &mut dyn Logger,
) -> Result<()> {
    validate_user_args(args)?;
    let config = resolve_config(args)?;
    let server = config.server_url()?;
    let principal = Principal::new(&args.client_name);

    let ca = provider.load_certificate_authority(
        &config.cert_dir_path(),
        CA_CERT_AND_KEY_BASE_NAME,
        logger,
    )?;
    let ca_pem = ca
        .cert
        .to_pem()
        .map_err(|e| KubeconfigError::Decode(format!("couldn't encode CA certificate: {}", e)))?;
    if let Ok(der) = ca.cert.to_der() {
        if let Ok(info) = inspect_certificate(&der) {
            logger.debug_log(&format!(
                "CA {} sha256:{} valid until {}",
                info.subject, info.fingerprint, info.not_after
            ));
        }
    }

    let credential = match &args.token {
        Some(token) => {
            logger.debug_log(&format!("Using token authentication for {}", principal.name));
            Credential::BearerToken(token.clone())
        }
        None => {
            logger.log(&format!(
                "Creating client certificate for {}",
                principal.name
            ));
            let cert_config = CertificateConfig::client(
                &principal.name,
                &args.organizations,
                config.validity_days,
            );
            let issued = provider.issue_client_certificate(&ca, &cert_config, logger)?;
            let info = verify_client_certificate(&issued.cert_pem, &ca, &principal.name)?;
            logger.debug_log(&format!(
                "Client certificate serial {} expires {}",
                info.serial, info.not_after
            ));
            Credential::ClientCertificate {
                certificate: issued.cert_pem,
                private_key: issued.key_pem,
            }
        }
    };

    let endpoint = ClusterEndpoint {
        server,
        certificate_authority_data: ca_pem,
    };
    let document = KubeconfigBuilder::new(&config.cluster_name).build(
        &endpoint,
        &principal,
        credential,
    )?;

    match &args.output_file {
        Some(name) => {
            let dir = config.kubeconfig_dir_path();
            fs::create_dir_all(&dir)?;
            let path = dir.join(name);
            let mut file = open_private_file(&path)?;
            write_to(&document, &mut file)?;
            logger.log(&format!("Wrote kubeconfig file to disk: {}", path.display()));
        }
        None => write_to(&document, out)?,
    }

    Ok(())
}
