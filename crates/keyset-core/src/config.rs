//! Module: config
//! Responsibility: page limits and entity allow-lists loaded from TOML.
//! Does not own: request handling; the coordinator only reads this.

use crate::model::{ColumnModel, EntityModel, ModelError};
use serde::Deserialize;
use thiserror::Error as ThisError;

///
/// ConfigError
///

#[derive(Debug, ThisError)]
pub enum ConfigError {
    #[error("config parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error(
        "invalid page limits: min {min_limit}, max {max_limit}, default {default_limit} \
         (need 0 < min <= default <= max)"
    )]
    InvalidLimits {
        min_limit: u32,
        max_limit: u32,
        default_limit: u32,
    },

    #[error("entity '{path}' is configured more than once")]
    DuplicateEntity { path: String },

    #[error(transparent)]
    Model(#[from] ModelError),
}

///
/// PageConfig
///
/// Page-size bounds. Requested limits are clamped into
/// `[min_limit, max_limit]`; an absent limit uses `default_limit`.
///

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct PageConfig {
    pub min_limit: u32,
    pub max_limit: u32,
    pub default_limit: u32,
}

impl PageConfig {
    pub const DEFAULT_MIN_LIMIT: u32 = 10;
    pub const DEFAULT_MAX_LIMIT: u32 = 100;
    pub const DEFAULT_LIMIT: u32 = 20;

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_limit == 0
            || self.min_limit > self.max_limit
            || self.default_limit < self.min_limit
            || self.default_limit > self.max_limit
        {
            return Err(ConfigError::InvalidLimits {
                min_limit: self.min_limit,
                max_limit: self.max_limit,
                default_limit: self.default_limit,
            });
        }

        Ok(())
    }

    /// Effective page size for a request.
    #[must_use]
    pub fn clamp_limit(&self, requested: Option<u32>) -> u32 {
        // max-then-min so an unvalidated config degrades instead of panicking
        requested
            .unwrap_or(self.default_limit)
            .max(self.min_limit)
            .min(self.max_limit)
    }
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            min_limit: Self::DEFAULT_MIN_LIMIT,
            max_limit: Self::DEFAULT_MAX_LIMIT,
            default_limit: Self::DEFAULT_LIMIT,
        }
    }
}

///
/// EntityConfig
/// TOML shape of one `[[entity]]` table.
///

#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct EntityConfig {
    path: String,
    primary_key: String,
    columns: Vec<ColumnModel>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct KeysetConfigFile {
    #[serde(default)]
    page: PageConfig,
    #[serde(default, rename = "entity")]
    entities: Vec<EntityConfig>,
}

///
/// KeysetConfig
///
/// Validated page bounds plus every paginated entity's allow-list.
///
/// ```toml
/// [page]
/// min_limit = 10
/// max_limit = 100
/// default_limit = 20
///
/// [[entity]]
/// path = "shop::product"
/// primary_key = "id"
/// columns = [
///     { name = "id", type = "int" },
///     { name = "rating", type = "int" },
///     { name = "sku", type = "text", unique = true },
/// ]
/// ```
///

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct KeysetConfig {
    page: PageConfig,
    entities: Vec<EntityModel>,
}

impl KeysetConfig {
    pub fn new(page: PageConfig, entities: Vec<EntityModel>) -> Result<Self, ConfigError> {
        page.validate()?;

        for (idx, entity) in entities.iter().enumerate() {
            if entities[..idx].iter().any(|e| e.path() == entity.path()) {
                return Err(ConfigError::DuplicateEntity {
                    path: entity.path().to_string(),
                });
            }
        }

        Ok(Self { page, entities })
    }

    pub fn from_toml_str(input: &str) -> Result<Self, ConfigError> {
        let file: KeysetConfigFile = toml::from_str(input)?;

        let entities = file
            .entities
            .into_iter()
            .map(|e| EntityModel::try_new(e.path, e.primary_key, e.columns))
            .collect::<Result<Vec<_>, _>>()?;

        Self::new(file.page, entities)
    }

    #[must_use]
    pub const fn page(&self) -> &PageConfig {
        &self.page
    }

    #[must_use]
    pub fn entities(&self) -> &[EntityModel] {
        &self.entities
    }

    #[must_use]
    pub fn entity(&self, path: &str) -> Option<&EntityModel> {
        self.entities.iter().find(|e| e.path() == path)
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::{ConfigError, KeysetConfig, PageConfig};
    use crate::model::{ModelError, ScalarType};

    const SHOP: &str = r#"
        [page]
        min_limit = 5
        max_limit = 50
        default_limit = 25

        [[entity]]
        path = "shop::product"
        primary_key = "id"
        columns = [
            { name = "id", type = "int" },
            { name = "rating", type = "float64" },
            { name = "sku", type = "text", unique = true },
            { name = "published", type = "bool" },
        ]
    "#;

    #[test]
    fn defaults_match_documented_bounds() {
        let config = PageConfig::default();

        assert_eq!(config.min_limit, 10);
        assert_eq!(config.max_limit, 100);
        assert_eq!(config.default_limit, 20);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn clamp_limit_applies_default_then_bounds() {
        let config = PageConfig::default();

        assert_eq!(config.clamp_limit(None), 20);
        assert_eq!(config.clamp_limit(Some(0)), 10);
        assert_eq!(config.clamp_limit(Some(5)), 10);
        assert_eq!(config.clamp_limit(Some(42)), 42);
        assert_eq!(config.clamp_limit(Some(500)), 100);
    }

    #[test]
    fn invalid_limits_are_rejected() {
        for (min_limit, max_limit, default_limit) in [(0, 10, 5), (20, 10, 15), (10, 100, 200)] {
            let config = PageConfig {
                min_limit,
                max_limit,
                default_limit,
            };
            assert!(matches!(
                config.validate(),
                Err(ConfigError::InvalidLimits { .. })
            ));
        }
    }

    #[test]
    fn toml_loads_page_bounds_and_entities() {
        let config = KeysetConfig::from_toml_str(SHOP).expect("config should parse");

        assert_eq!(config.page().default_limit, 25);
        let product = config.entity("shop::product").expect("entity present");
        assert_eq!(product.primary_key().name, "id");
        assert_eq!(
            product.column("rating").map(|c| c.kind),
            Some(ScalarType::Float64)
        );
        assert!(product.is_unique("sku"));
        assert!(product.is_unique("id"));
        assert!(!product.is_unique("published"));
        assert!(config.entity("shop::order").is_none());
    }

    #[test]
    fn missing_page_table_uses_defaults() {
        let config = KeysetConfig::from_toml_str(
            r#"
            [[entity]]
            path = "shop::order"
            primary_key = "id"
            columns = [{ name = "id", type = "int" }]
            "#,
        )
        .expect("config should parse");

        assert_eq!(config.page(), &PageConfig::default());
    }

    #[test]
    fn toml_errors_are_typed() {
        let err = KeysetConfig::from_toml_str("[page]\nmin_limit = \"ten\"").expect_err("bad type");
        assert!(matches!(err, ConfigError::Parse(_)));

        let err = KeysetConfig::from_toml_str("[page]\nmin_limit = 200").expect_err("bad bounds");
        assert!(matches!(err, ConfigError::InvalidLimits { .. }));

        let err = KeysetConfig::from_toml_str(
            r#"
            [[entity]]
            path = "shop::order"
            primary_key = "uuid"
            columns = [{ name = "id", type = "int" }]
            "#,
        )
        .expect_err("missing primary key");
        assert!(matches!(
            err,
            ConfigError::Model(ModelError::MissingPrimaryKey { .. })
        ));

        let twice = format!("{SHOP}\n{}", &SHOP[SHOP.find("[[entity]]").expect("entity table")..]);
        let err = KeysetConfig::from_toml_str(&twice).expect_err("duplicate entity");
        assert!(matches!(err, ConfigError::DuplicateEntity { path } if path == "shop::product"));
    }
}
