//! Configuration validation with aggregated errors.
//! - Aggregates all issues into Vec<String>
//! - Validates:
//!   * identity service url
//!   * credentials required by the selected protocol family
//!   * tls material pairing
//!   * logging / http settings

use tracing::{error, info};

use crate::config::credentials::{Credentials, ProtocolVersion};
use crate::config::settings::{SettingsConfig, TlsConfig};
use crate::config::types::ServiceConfig;
use crate::observability::metrics::get_metrics;

/// Public entrypoint: returns Ok(()) or Err(Vec<String>) containing all issues.
pub async fn validate_service_config(cfg: &ServiceConfig) -> Result<(), Vec<String>> {
    let mut errors: Vec<String> = Vec::new();

    validate_settings(&cfg.settings, &mut errors);
    validate_credentials(&cfg.keystone, &mut errors);
    if let Some(tls) = &cfg.tls {
        validate_tls(tls, &mut errors);
    }

    if errors.is_empty() {
        info!("config valid");
        Ok(())
    } else {
        error!("configuration validation errors ({}):", errors.len());
        for e in &errors {
            error!(" - {}", e);
        }
        get_metrics().await.config_errors.inc();
        Err(errors)
    }
}

fn validate_settings(settings: &SettingsConfig, errors: &mut Vec<String>) {
    // logging level
    if let Some(logging) = &settings.logging {
        let valid = ["trace", "debug", "info", "warn", "error"];
        if !valid.contains(&logging.level.to_lowercase().as_str()) {
            errors.push(format!(
                "settings.logging.level '{}' invalid; allowed: {:?}",
                logging.level, valid
            ));
        }
    }

    if let Some(timeout_ms) = settings.http.as_ref().and_then(|http| http.timeout_ms) {
        if timeout_ms == 0 {
            errors.push("settings.http.timeout_ms must be greater than 0".to_string());
        }
    }
}

fn validate_credentials(credentials: &Credentials, errors: &mut Vec<String>) {
    let auth_url = credentials.auth_url.trim();
    if auth_url.is_empty() {
        errors.push("keystone.auth_url must not be empty".to_string());
    } else if !auth_url.starts_with("http://") && !auth_url.starts_with("https://") {
        errors.push(format!(
            "keystone.auth_url '{}' must start with http:// or https://",
            auth_url
        ));
    }

    match credentials.protocol {
        ProtocolVersion::V2 => {
            // admin token exchange needs nothing else
            if credentials.admin_token().is_none() {
                if credentials.username.is_empty() {
                    errors.push("keystone.username is required for v2 password authentication (or set keystone.admin_token)".to_string());
                }
                if credentials.password.is_empty() {
                    errors.push("keystone.password is required for v2 password authentication (or set keystone.admin_token)".to_string());
                }
            }
        }
        ProtocolVersion::V3 => {
            if credentials.username.is_empty() {
                errors.push("keystone.username is required for v3 authentication".to_string());
            }
            if credentials.password.is_empty() {
                errors.push("keystone.password is required for v3 authentication".to_string());
            }
            if credentials.project_name.is_empty() {
                errors.push("keystone.project_name is required for v3 authentication".to_string());
            }
        }
    }
}

fn validate_tls(tls: &TlsConfig, errors: &mut Vec<String>) {
    let transport = &tls.transport;
    if transport.insecure_skip_verify {
        // certificate material is ignored in insecure mode
        return;
    }
    match (&transport.cert_file, &transport.key_file) {
        (Some(_), None) => errors.push("tls.cert_file is set but tls.key_file is missing".to_string()),
        (None, Some(_)) => errors.push("tls.key_file is set but tls.cert_file is missing".to_string()),
        _ => {}
    }
}
