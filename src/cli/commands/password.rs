use serde_json::json;

use crate::auth::password::{hash_password, verify_password};
use crate::cli::{utils::output, OutputFormat};

pub async fn hash(password: &str, cost: Option<u32>, output_format: OutputFormat) -> anyhow::Result<()> {
    let hashed = hash_password(password, cost).await?;
    output(output_format, &json!({ "hashed_password": hashed }), || hashed.clone())
}

pub async fn verify(password: &str, hashed: &str, output_format: OutputFormat) -> anyhow::Result<()> {
    let matches = verify_password(password, hashed).await?;
    output(output_format, &json!({ "matches": matches }), || {
        (if matches { "✓ password matches" } else { "✗ password does not match" }).to_string()
    })?;
    if !matches {
        anyhow::bail!("password does not match");
    }
    Ok(())
}
