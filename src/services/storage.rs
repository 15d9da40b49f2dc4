use crate::domain::models::{Department, TokenStore};
use anyhow::Context;
use serde::Serialize;
use std::path::{Path, PathBuf};

pub const TOKENS_FILE: &str = "tokens.json";

pub fn tokens_path(dir: Option<&Path>) -> PathBuf {
    dir.unwrap_or_else(|| Path::new("")).join(TOKENS_FILE)
}

/// Loads cached tokens, or builds an all-`null` store when no file exists yet.
pub fn load_tokens(path: &Path, departments: &[Department]) -> anyhow::Result<TokenStore> {
    if !path.exists() {
        return Ok(TokenStore::synthesize(departments));
    }
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read tokens file {}", path.display()))?;
    serde_json::from_str(&raw)
        .with_context(|| format!("invalid tokens file {}", path.display()))
}

/// Rewrites the whole tokens document.
pub fn save_tokens(path: &Path, tokens: &mut TokenStore) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, to_pretty_json(tokens)?)
        .with_context(|| format!("failed to write tokens file {}", path.display()))?;
    tokens.mark_saved();
    Ok(())
}

fn to_pretty_json<T: Serialize>(value: &T) -> anyhow::Result<Vec<u8>> {
    let mut out = Vec::new();
    let fmt = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut out, fmt);
    value.serialize(&mut ser)?;
    Ok(out)
}
