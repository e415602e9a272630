//! Portfolio configuration

use serde::Deserialize;

use core_kernel::{CoreError, MAX_MINOR_CURRENCY_DIGITS};

/// Engine configuration
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PortfolioConfig {
    /// Page size used when a caller does not ask for one
    pub default_page_size: u32,
    /// Larger requested page sizes are clamped to this
    pub max_page_size: u32,
    /// Balance scale for products that do not declare one
    pub default_minor_currency_digits: u32,
}

impl Default for PortfolioConfig {
    fn default() -> Self {
        Self {
            default_page_size: 20,
            max_page_size: 100,
            default_minor_currency_digits: 2,
        }
    }
}

impl PortfolioConfig {
    /// Loads configuration from `PORTFOLIO_*` environment variables
    ///
    /// A `.env` file in the working directory is read first if present.
    /// Unset values keep their defaults.
    pub fn from_env() -> Result<Self, CoreError> {
        dotenvy::dotenv().ok();

        let config: Self = config::Config::builder()
            .add_source(config::Environment::with_prefix("PORTFOLIO").try_parsing(true))
            .build()
            .and_then(|c| c.try_deserialize())
            .map_err(|e| CoreError::configuration(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Checks the values for consistency
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.max_page_size == 0 {
            return Err(CoreError::configuration("max_page_size must be at least 1"));
        }
        if self.default_page_size == 0 || self.default_page_size > self.max_page_size {
            return Err(CoreError::configuration(format!(
                "default_page_size must be within 1..={}",
                self.max_page_size
            )));
        }
        if self.default_minor_currency_digits > MAX_MINOR_CURRENCY_DIGITS {
            return Err(CoreError::configuration(format!(
                "default_minor_currency_digits must not exceed {}",
                MAX_MINOR_CURRENCY_DIGITS
            )));
        }
        Ok(())
    }
}
