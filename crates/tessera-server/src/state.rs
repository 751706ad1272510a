use std::sync::Arc;
use tessera_core::TesseraConfig;
use tessera_token::{IssuerSettings, SecretKey, Signer, TokenIssuer, TokenValidator};

/// Shared application state.
///
/// Issuer and validator share one signer over the secret loaded at startup;
/// nothing here is mutated after construction.
pub struct AppState {
    pub cfg: TesseraConfig,
    pub issuer: TokenIssuer,
    pub validator: TokenValidator,
}

impl AppState {
    /// Build state from configuration, resolving the secret from env or file.
    pub fn init(cfg: &TesseraConfig) -> anyhow::Result<Self> {
        let key = SecretKey::from_config(&cfg.token)?;
        Self::with_key(cfg, key)
    }

    /// Build state with an explicit secret.
    pub fn with_key(cfg: &TesseraConfig, key: SecretKey) -> anyhow::Result<Self> {
        let settings = IssuerSettings::from_config(&cfg.token)?;
        let signer = Signer::new(Arc::new(key));

        Ok(Self {
            cfg: cfg.clone(),
            issuer: TokenIssuer::new(signer.clone(), settings),
            validator: TokenValidator::new(signer),
        })
    }
}
