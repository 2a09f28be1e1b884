use std::path::Path;

use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Error, Debug)]
pub enum SecretsError {
    #[error("failed to read secrets file '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse secrets file: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Structured secrets store, e.g.
///
/// ```toml
/// [openai]
/// api_key = "sk-proj-..."
/// ```
#[derive(Debug, Default, Clone, Deserialize)]
pub struct SecretsFile {
    #[serde(default)]
    pub openai: Option<ProviderSecret>,
    #[serde(default)]
    pub anthropic: Option<ProviderSecret>,
    #[serde(default)]
    pub google: Option<ProviderSecret>,
}

#[derive(Debug, Default, Clone, Deserialize)]
pub struct ProviderSecret {
    pub api_key: Option<String>,
}

impl SecretsFile {
    pub fn from_toml_str(s: &str) -> Result<Self, SecretsError> {
        Ok(toml::from_str(s)?)
    }

    pub fn load(path: &Path) -> Result<Self, SecretsError> {
        let contents = std::fs::read_to_string(path).map_err(|source| SecretsError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&contents)
    }

    /// A missing file is normal (keys usually come from the environment);
    /// a malformed one is logged and ignored.
    pub fn load_or_default(path: &Path) -> Self {
        if !path.exists() {
            debug!("No secrets file at {}, relying on environment", path.display());
            return Self::default();
        }

        match Self::load(path) {
            Ok(secrets) => secrets,
            Err(e) => {
                warn!("Ignoring secrets file: {}", e);
                Self::default()
            }
        }
    }

    pub fn openai_key(&self) -> Option<&str> {
        key_of(&self.openai)
    }

    pub fn anthropic_key(&self) -> Option<&str> {
        key_of(&self.anthropic)
    }

    pub fn google_key(&self) -> Option<&str> {
        key_of(&self.google)
    }
}

fn key_of(secret: &Option<ProviderSecret>) -> Option<&str> {
    secret
        .as_ref()
        .and_then(|s| s.api_key.as_deref())
        .map(str::trim)
        .filter(|k| !k.is_empty())
}

/// Environment value wins over the secrets file; blank values count as unset.
pub fn resolve_credential(env_value: Option<String>, file_value: Option<&str>) -> Option<String> {
    env_value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .or_else(|| file_value.map(str::to_string))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn parses_provider_tables() {
        let secrets = SecretsFile::from_toml_str(
            r#"
            [openai]
            api_key = "sk-proj-abc"

            [google]
            api_key = "  "
            "#,
        )
        .unwrap();

        assert_eq!(secrets.openai_key(), Some("sk-proj-abc"));
        assert_eq!(secrets.anthropic_key(), None);
        assert_eq!(secrets.google_key(), None);
    }

    #[test]
    fn loads_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[anthropic]\napi_key = \"sk-ant-xyz\"").unwrap();

        let secrets = SecretsFile::load(file.path()).unwrap();
        assert_eq!(secrets.anthropic_key(), Some("sk-ant-xyz"));
    }

    #[test]
    fn malformed_file_falls_back_to_empty() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[openai\napi_key = ").unwrap();

        assert!(SecretsFile::load(file.path()).is_err());
        let secrets = SecretsFile::load_or_default(file.path());
        assert!(secrets.openai_key().is_none());
    }

    #[test]
    fn environment_takes_precedence() {
        assert_eq!(
            resolve_credential(Some("sk-proj-env".into()), Some("sk-proj-file")),
            Some("sk-proj-env".to_string())
        );
        assert_eq!(
            resolve_credential(Some("   ".into()), Some("sk-proj-file")),
            Some("sk-proj-file".to_string())
        );
        assert_eq!(resolve_credential(None, None), None);
    }
}
