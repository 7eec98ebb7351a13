//! Sales channel normalization.
//!
//! The `canal_vendas` column is free text typed by reps, so the same channel
//! shows up as "VAREJO", "varejo " or "Loja física". An embedded YAML seed
//! maps known spellings to one canonical name; anything unknown passes
//! through trimmed and upper-cased.

use serde::Deserialize;
use std::collections::HashMap;

use crate::error::EngineError;

/// Top-level structure for the channel alias YAML file.
#[derive(Deserialize, Debug)]
pub struct ChannelAliasFile {
    pub aliases: Vec<ChannelAlias>,
}

/// A single channel alias.
///
/// `to: null` folds the spelling into the general bucket, the same as a
/// missing channel.
#[derive(Deserialize, Debug, Clone)]
pub struct ChannelAlias {
    pub from: String,
    pub to: Option<String>,
}

/// Lookup table from lower-cased spelling to canonical channel.
#[derive(Debug, Clone, Default)]
pub struct ChannelAliases {
    map: HashMap<String, Option<String>>,
}

impl ChannelAliases {
    /// No aliases: every channel is only trimmed and upper-cased.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Canonical channel for a raw column value. `None` is the general bucket.
    pub fn resolve(&self, raw: Option<&str>) -> Option<String> {
        let trimmed = raw?.trim();
        if trimmed.is_empty() {
            return None;
        }
        match self.map.get(&trimmed.to_lowercase()) {
            Some(canonical) => canonical.clone(),
            None => Some(trimmed.to_uppercase()),
        }
    }
}

/// Parse channel aliases from YAML content.
pub fn parse_channel_aliases(yaml_content: &str) -> Result<ChannelAliases, EngineError> {
    let file: ChannelAliasFile = serde_yml::from_str(yaml_content)?;

    let mut map = HashMap::new();
    for alias in file.aliases {
        let key = alias.from.trim().to_lowercase();
        if map.contains_key(&key) {
            return Err(EngineError::DuplicateAlias(alias.from));
        }
        map.insert(key, alias.to);
    }

    Ok(ChannelAliases { map })
}

/// Load channel aliases from the embedded YAML file.
pub fn load_channel_aliases() -> Result<ChannelAliases, EngineError> {
    let yaml_content = include_str!("../../seed_data/channel_aliases.yml");
    parse_channel_aliases(yaml_content)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_aliases() {
        let yaml = r#"
aliases:
  - from: "varejo"
    to: "VAREJO"
  - from: "Loja Virtual"
    to: "E-COMMERCE"
"#;
        let aliases = parse_channel_aliases(yaml).unwrap();
        assert_eq!(aliases.len(), 2);
        assert_eq!(aliases.resolve(Some("loja virtual")), Some("E-COMMERCE".to_string()));
        assert_eq!(aliases.resolve(Some("  VAREJO ")), Some("VAREJO".to_string()));
    }

    #[test]
    fn test_null_target_folds_into_general() {
        let yaml = r#"
aliases:
  - from: "outros"
    to: ~
"#;
        let aliases = parse_channel_aliases(yaml).unwrap();
        assert_eq!(aliases.resolve(Some("Outros")), None);
    }

    #[test]
    fn test_duplicate_from_rejected() {
        let yaml = r#"
aliases:
  - from: "varejo"
    to: "VAREJO"
  - from: "VAREJO"
    to: "RETAIL"
"#;
        let result = parse_channel_aliases(yaml);
        assert!(matches!(result, Err(EngineError::DuplicateAlias(_))));
    }

    #[test]
    fn test_unknown_channel_passes_through_uppercased() {
        let aliases = ChannelAliases::empty();
        assert_eq!(aliases.resolve(Some(" porta a porta ")), Some("PORTA A PORTA".to_string()));
    }

    #[test]
    fn test_blank_channel_is_general() {
        let aliases = ChannelAliases::empty();
        assert_eq!(aliases.resolve(None), None);
        assert_eq!(aliases.resolve(Some("   ")), None);
    }

    #[test]
    fn test_embedded_seed_loads() {
        let aliases = load_channel_aliases().unwrap();
        assert!(!aliases.is_empty());
        assert_eq!(aliases.resolve(Some("Loja Física")), Some("VAREJO".to_string()));
        assert_eq!(aliases.resolve(Some("ecommerce")), Some("E-COMMERCE".to_string()));
        assert_eq!(aliases.resolve(Some("GERAL")), None);
    }
}
