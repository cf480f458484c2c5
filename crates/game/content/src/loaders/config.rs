//! Rules configuration loader.

use std::path::Path;

use rules_core::RulesConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for rules configuration from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config data from a TOML file.
    ///
    /// Keys absent from the file keep their [`RulesConfig::default`] values.
    pub fn load(path: &Path) -> LoadResult<RulesConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<RulesConfig> {
        let config: RulesConfig = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))?;

        tracing::debug!(
            subclass_policy = ?config.subclass_policy,
            name_fallback = config.two_handed_name_fallback,
            "loaded rules config"
        );
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use rules_core::SubclassPolicy;

    use super::*;

    #[test]
    fn partial_file_keeps_defaults() {
        let config = ConfigLoader::parse("subclass_policy = \"overwrite\"\n").expect("parses");

        assert_eq!(config.subclass_policy, SubclassPolicy::Overwrite);
        assert!(config.two_handed_name_fallback);
        assert_eq!(config.two_handed_keywords, RulesConfig::default().two_handed_keywords);
    }

    #[test]
    fn empty_file_is_default() {
        assert_eq!(ConfigLoader::parse("").expect("parses"), RulesConfig::default());
    }

    #[test]
    fn unknown_policy_is_rejected() {
        assert!(ConfigLoader::parse("subclass_policy = \"sometimes\"").is_err());
    }
}
