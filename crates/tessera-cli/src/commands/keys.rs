//! Key management commands.
//!
//! `tessera keys generate` - Generate a new signing secret.

use std::fs;
use std::path::PathBuf;
use tessera_token::SecretKey;

/// Generate a new signing secret.
pub fn generate(output: Option<PathBuf>) -> anyhow::Result<()> {
    let key = SecretKey::generate();

    if let Some(output_dir) = output {
        // Create output directory if it doesn't exist
        fs::create_dir_all(&output_dir)?;

        let secret_path = output_dir.join("secret.key");
        key.save_to_file(&secret_path)?;
        tracing::debug!(path = %secret_path.display(), "wrote secret key");

        println!("✔ Generated signing secret:");
        println!("  Secret key: {}", secret_path.display());
        println!();
        println!("⚠️  Keep this file secure! Anyone holding it can mint tokens.");
        println!();
        println!("Set as environment variable:");
        println!("  export TESSERA_SECRET_KEY=$(cat {})", secret_path.display());
    } else {
        println!("Secret key (keep secure!):");
        println!("{}", key.to_base64());
        println!();
        println!("Use --output <dir> to save the key to a file.");
    }

    Ok(())
}
