//! Token management commands.
//!
//! `tessera token issue` - Issue a token for a subject id.
//! `tessera token inspect` - Inspect a token's contents without verifying it.
//! `tessera token verify` - Verify a token is valid now.

use anyhow::Context;
use chrono::{DateTime, Utc};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tessera_core::parse_duration;
use tessera_token::{
    inspect_token_unverified, unix_now, IssuerSettings, SecretKey, Signer, TokenIssuer,
    TokenValidator, ValidatedToken,
};

/// Resolve the signing secret from either a file path or a base64-encoded string.
///
/// The key string can be:
/// - A path to a file containing the base64-encoded secret
/// - The base64-encoded secret directly (e.g., from TESSERA_SECRET_KEY env var)
fn resolve_secret(key: Option<String>) -> anyhow::Result<SecretKey> {
    let key_str = key.context(
        "Secret key not provided. Either pass --key <path> or set TESSERA_SECRET_KEY env var",
    )?;

    // If it looks like a file path and the file exists, load from file
    let path = Path::new(&key_str);
    if path.exists() {
        return SecretKey::load_from_file(path)
            .with_context(|| format!("Failed to load secret key from file: {}", path.display()));
    }

    SecretKey::from_base64(&key_str).context("Failed to parse secret key. Expected base64")
}

/// Read a token from a file if the argument names one, otherwise use it as-is.
fn resolve_token(token: String) -> anyhow::Result<String> {
    if Path::new(&token).exists() {
        Ok(fs::read_to_string(&token)?.trim().to_string())
    } else {
        Ok(token.trim().to_string())
    }
}

fn format_timestamp(secs: i64) -> String {
    DateTime::<Utc>::from_timestamp(secs, 0)
        .map(|t| t.to_rfc3339())
        .unwrap_or_else(|| secs.to_string())
}

/// Issue a new token.
pub fn issue(
    secret: Option<String>,
    subject: i64,
    message: Option<String>,
    validity: Option<String>,
    output: Option<PathBuf>,
) -> anyhow::Result<()> {
    let key = resolve_secret(secret)?;

    let mut settings = IssuerSettings::default();
    if let Some(v) = &validity {
        settings = settings.with_validity(parse_duration(v)?);
    }
    if settings.validity <= chrono::Duration::zero() {
        anyhow::bail!("validity must be positive");
    }

    let message: Value = match message {
        Some(raw) => serde_json::from_str(&raw).context("--message must be valid JSON")?,
        None => Value::Null,
    };

    let issuer = TokenIssuer::new(Signer::new(Arc::new(key)), settings);
    let issued = issuer.issue_token(subject, &message, unix_now())?;

    if let Some(output_path) = output {
        fs::write(&output_path, &issued.token)?;
        println!("✔ Token written to: {}", output_path.display());
        println!("  Subject: {}", subject);
        println!("  Expires: {}", format_timestamp(issued.expires_at));
    } else {
        println!("{}", issued.token);
    }

    Ok(())
}

/// Inspect a token without verification.
pub fn inspect(token: String) -> anyhow::Result<()> {
    let token_str = resolve_token(token)?;
    let info = inspect_token_unverified(&token_str)?;

    println!("Token Information (signature NOT verified):");
    println!("  Header: {}", info.header);
    println!("  Issuer: {}", info.claims.iss);
    println!("  Subject group: {}", info.claims.sub);
    println!("  Audience: {}", info.claims.aud);
    println!("  Issued at: {}", info.claims.iat);
    println!("  Not before: {}", info.claims.nbf);
    println!("  Expires: {}", info.claims.exp);
    println!("  Signature: {} bytes", info.signature_len);
    println!();
    println!("{}", serde_json::to_string_pretty(&info.claims.message)?);

    Ok(())
}

/// Verify a token is valid now.
pub fn verify(secret: Option<String>, token: String) -> anyhow::Result<ValidatedToken> {
    let key = resolve_secret(secret)?;
    let validator = TokenValidator::new(Signer::new(Arc::new(key)));

    let token_str = resolve_token(token)?;
    let verified: ValidatedToken = validator
        .validate_now(&token_str)
        .context("✖ Token verification failed")?;

    println!("✔ Token is valid");
    println!();
    println!("Token Details:");
    println!("  Operator: {}", verified.audience);
    println!("  Issuer: {}", verified.issuer);
    println!("  Subject group: {}", verified.subject_group);
    println!("  Expires: {}", format_timestamp(verified.expires_at));
    println!("  Message: {}", verified.message);

    Ok(verified)
}
