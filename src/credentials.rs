//! API key loading.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use tracing::{debug, info};

use crate::error::{GenError, Result};

/// Read an API key from `path`, falling back to the `env_var` environment
/// variable when the file does not exist.
pub fn load_api_key(path: &Path, env_var: &str) -> Result<String> {
    match fs::read_to_string(path) {
        Ok(contents) => {
            let key = clean_key(&contents);
            if key.is_empty() {
                return Err(GenError::MissingCredential {
                    path: path.to_path_buf(),
                    env_var: env_var.to_string(),
                });
            }
            info!("Loaded API key from {}", path.display());
            Ok(key)
        }
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!("No key file at {}, trying ${env_var}", path.display());
            std::env::var(env_var)
                .ok()
                .map(|v| clean_key(&v))
                .filter(|k| !k.is_empty())
                .ok_or_else(|| GenError::MissingCredential {
                    path: path.to_path_buf(),
                    env_var: env_var.to_string(),
                })
        }
        Err(e) => Err(GenError::io(path, e)),
    }
}

/// Key files are hand-edited: strip whitespace, quotes and a trailing period.
fn clean_key(raw: &str) -> String {
    raw.trim()
        .replace(['"', '\''], "")
        .trim_end_matches('.')
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cleans_quotes_and_trailing_dot() {
        assert_eq!(clean_key("  \"sk-abc123\".\n"), "sk-abc123");
        assert_eq!(clean_key("'xi_key'"), "xi_key");
        assert_eq!(clean_key("plain"), "plain");
    }

    #[test]
    fn reads_key_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("api key");
        fs::write(&path, "sk-test.\n").unwrap();

        let key = load_api_key(&path, "MATB_VOICEGEN_TEST_UNSET_KEY").unwrap();
        assert_eq!(key, "sk-test");
    }

    #[test]
    fn missing_file_and_env_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent");

        let err = load_api_key(&path, "MATB_VOICEGEN_TEST_UNSET_KEY").unwrap_err();
        assert!(matches!(err, GenError::MissingCredential { .. }));
    }

    #[test]
    fn blank_file_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("blank");
        fs::write(&path, " \n").unwrap();

        assert!(load_api_key(&path, "MATB_VOICEGEN_TEST_UNSET_KEY").is_err());
    }
}
