//! Recognises the vault's own account item and pulls its password out.

use zeroize::Zeroizing;

use crate::errors::{BackupError, Result};
use crate::vault::ItemFields;

/// Field id that holds the account password.
const PASSWORD_FIELD: &str = "password";

/// Finds the master password among fetched items.
#[derive(Debug, Clone)]
pub struct SecretExtractor {
    title_prefix: String,
}

impl SecretExtractor {
    pub fn new(title_prefix: impl Into<String>) -> Self {
        Self {
            title_prefix: title_prefix.into(),
        }
    }

    /// Whether an item with this title can carry the master password.
    pub fn is_candidate(&self, title: &str) -> bool {
        title.starts_with(&self.title_prefix)
    }

    /// Return the master password if `content` is the account item.
    ///
    /// Non-account items are never parsed.  An account item that does
    /// not parse is an error: without it the backup would be unusable.
    pub fn extract(&self, title: &str, content: &str) -> Result<Option<Zeroizing<String>>> {
        if !self.is_candidate(title) {
            return Ok(None);
        }

        let item: ItemFields =
            serde_json::from_str(content).map_err(|e| BackupError::MalformedRecord {
                title: title.to_string(),
                reason: e.to_string(),
            })?;

        let value = item
            .fields
            .into_iter()
            .find(|field| field.id == PASSWORD_FIELD)
            .map(|field| Zeroizing::new(field.value))
            .filter(|value| !value.is_empty());

        Ok(value)
    }
}

impl Default for SecretExtractor {
    fn default() -> Self {
        Self::new("1Password Account")
    }
}
