use std::{env, path::PathBuf};
use tessera_core::TesseraConfig;

/// Load and validate the server configuration.
///
/// An explicitly configured path must exist; the default `tessera.yaml` is
/// optional and defaults apply when it is absent.
pub fn load_config() -> anyhow::Result<TesseraConfig> {
    let (path, explicit) = config_path();

    let cfg = if path.exists() || explicit {
        TesseraConfig::from_file(&path)
            .map_err(|e| anyhow::anyhow!("failed to load {}: {e}", path.display()))?
    } else {
        TesseraConfig::default()
    };

    cfg.validate()?;
    Ok(cfg)
}

fn config_path() -> (PathBuf, bool) {
    if let Ok(p) = env::var("TESSERA_CONFIG") {
        return (PathBuf::from(p), true);
    }
    (PathBuf::from("tessera.yaml"), false)
}
