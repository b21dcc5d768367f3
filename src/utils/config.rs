use crate::constants::{DEFAULT_MAX_ARBITRAGE_CANDIDATES, WMNT};
use crate::utils::config_loader::{ConfigLoader, ConfigLoaderSync, LoadConfigError, load_from_file, load_from_file_sync};
use alloy_primitives::Address;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use strum_macros::Display;

/// What to do with arbitrage profit in an asset other than the trade's output token.
#[derive(Copy, Clone, Debug, Display, Default, PartialEq, Eq, Serialize, Deserialize)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ForeignProfitPolicy {
    /// Send it to the trade's recipient without counting it toward the output total.
    #[default]
    ForwardToRecipient,
    /// Keep it in the router until the owner sweeps it.
    RetainInEngine,
}

#[derive(Clone, Deserialize, Debug)]
pub struct RouterConfigRoot {
    pub router: RouterConfigSection,
}

#[derive(Clone, Deserialize, Serialize, Debug, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct RouterConfigSection {
    pub owner: Address,
    #[serde(default = "default_wrapped_native")]
    pub wrapped_native: Address,
    #[serde(default = "default_max_arbitrage_candidates")]
    pub max_arbitrage_candidates: usize,
    #[serde(default)]
    pub foreign_profit_policy: ForeignProfitPolicy,
}

fn default_wrapped_native() -> Address {
    WMNT
}

fn default_max_arbitrage_candidates() -> usize {
    DEFAULT_MAX_ARBITRAGE_CANDIDATES
}

impl RouterConfigSection {
    pub fn new(owner: Address) -> Self {
        Self {
            owner,
            wrapped_native: default_wrapped_native(),
            max_arbitrage_candidates: default_max_arbitrage_candidates(),
            foreign_profit_policy: ForeignProfitPolicy::default(),
        }
    }

    pub fn with_wrapped_native(self, wrapped_native: Address) -> Self {
        Self { wrapped_native, ..self }
    }

    pub fn with_max_arbitrage_candidates(self, max_arbitrage_candidates: usize) -> Self {
        Self { max_arbitrage_candidates, ..self }
    }

    pub fn with_foreign_profit_policy(self, foreign_profit_policy: ForeignProfitPolicy) -> Self {
        Self { foreign_profit_policy, ..self }
    }
}

#[async_trait]
impl ConfigLoader for RouterConfigSection {
    type SectionType = RouterConfigSection;

    async fn load_section_from_file(file_name: String) -> Result<Self::SectionType, LoadConfigError> {
        let root: RouterConfigRoot = load_from_file(file_name).await?;
        Ok(root.router)
    }
}

impl ConfigLoaderSync for RouterConfigSection {
    type SectionType = RouterConfigSection;

    fn load_section_from_file_sync(file_name: String) -> Result<Self::SectionType, LoadConfigError> {
        let root: RouterConfigRoot = load_from_file_sync(file_name)?;
        Ok(root.router)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::config_loader::load_from_str;
    use alloy_primitives::address;

    #[test]
    fn test_defaults_fill_optional_fields() -> eyre::Result<()> {
        let root: RouterConfigRoot = load_from_str(
            r#"
            [router]
            owner = "0x1111111111111111111111111111111111111111"
            "#,
        )?;
        assert_eq!(root.router, RouterConfigSection::new(Address::repeat_byte(0x11)));
        assert_eq!(root.router.wrapped_native, WMNT);
        assert_eq!(root.router.foreign_profit_policy, ForeignProfitPolicy::ForwardToRecipient);
        Ok(())
    }

    #[test]
    fn test_full_section() -> eyre::Result<()> {
        let root: RouterConfigRoot = load_from_str(
            r#"
            [router]
            owner = "0x1111111111111111111111111111111111111111"
            wrapped_native = "0xC02aaA39b223FE8D0A0e5C4F27eAD9083C756Cc2"
            max_arbitrage_candidates = 2
            foreign_profit_policy = "RETAIN_IN_ENGINE"
            "#,
        )?;
        assert_eq!(root.router.wrapped_native, address!("0xC02aaA39b223FE8D0A0e5C4F27eAD9083C756Cc2"));
        assert_eq!(root.router.max_arbitrage_candidates, 2);
        assert_eq!(root.router.foreign_profit_policy, ForeignProfitPolicy::RetainInEngine);
        Ok(())
    }

    #[test]
    fn test_unknown_fields_are_rejected() {
        let result: Result<RouterConfigRoot, _> = load_from_str(
            r#"
            [router]
            owner = "0x1111111111111111111111111111111111111111"
            max_hops = 3
            "#,
        );
        assert!(matches!(result, Err(LoadConfigError::TomlError(_))));
    }

    #[tokio::test]
    async fn test_load_section_from_file() -> eyre::Result<()> {
        let path = std::env::temp_dir().join(format!("swap-router-config-{}.toml", std::process::id()));
        tokio::fs::write(&path, "[router]\nowner = \"0x2222222222222222222222222222222222222222\"\nmax_arbitrage_candidates = 1\n").await?;

        let section = RouterConfigSection::load_section_from_file(path.to_string_lossy().to_string()).await?;
        let section_sync = RouterConfigSection::load_section_from_file_sync(path.to_string_lossy().to_string())?;
        tokio::fs::remove_file(&path).await?;

        assert_eq!(section.owner, Address::repeat_byte(0x22));
        assert_eq!(section.max_arbitrage_candidates, 1);
        assert_eq!(section, section_sync);
        Ok(())
    }
}
