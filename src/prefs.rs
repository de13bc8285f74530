//! Persisted language preference

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::types::Lang;

pub const PREFS_FILE: &str = ".ainotes-prefs.json";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Prefs {
    /// Stored as written; anything but "en" reads as Chinese
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lang: Option<String>,
}

impl Prefs {
    /// A missing or unreadable file is the same as no preference
    pub fn load(path: &Path) -> Prefs {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(_) => return Prefs::default(),
        };
        match serde_json::from_str(&content) {
            Ok(prefs) => prefs,
            Err(e) => {
                log::warn!("Ignoring malformed preferences in {}: {}", path.display(), e);
                Prefs::default()
            }
        }
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))
    }

    pub fn set_lang(&mut self, lang: Lang) {
        self.lang = Some(lang.as_str().to_string());
    }
}

/// An explicit `en` request wins, then the stored preference, then Chinese
pub fn initial_lang(requested: Option<&str>, prefs: &Prefs) -> Lang {
    if requested == Some("en") {
        return Lang::En;
    }
    prefs.lang.as_deref().map(Lang::from_str).unwrap_or_default()
}
