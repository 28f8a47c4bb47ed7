use chrono::{FixedOffset, Offset, Utc};
use gym_catalog::PriceTable;
use gym_offer::OfferRules;
use gym_shared::Masked;
use serde::Deserialize;
use std::env;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub auth: AuthConfig,
    pub gym: GymConfig,
    pub email: EmailConfig,
    #[serde(default)]
    pub pricing: PricingConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AuthConfig {
    pub admin_username: String,
    pub admin_password: Masked<String>,
    pub jwt_secret: Masked<String>,
    pub jwt_expiration_seconds: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct GymConfig {
    pub name: String,
    /// Local timezone as minutes east of UTC (IST = 330)
    pub utc_offset_minutes: i32,
    #[serde(default = "default_birthday_hour")]
    pub birthday_hour: u32,
    #[serde(default = "default_birthday_minute")]
    pub birthday_minute: u32,
}

/// Admin tokens live at most a year
pub const MAX_TOKEN_LIFETIME_SECONDS: u64 = 365 * 24 * 60 * 60;

fn default_birthday_hour() -> u32 { 0 }
fn default_birthday_minute() -> u32 { 2 }

impl GymConfig {
    pub fn offset(&self) -> Option<FixedOffset> {
        FixedOffset::east_opt(self.utc_offset_minutes * 60)
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct EmailConfig {
    pub from_address: String,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct PricingConfig {
    #[serde(default)]
    pub prices: PriceTable,
    #[serde(default)]
    pub offers: OfferRules,
}

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let s = config::Config::builder()
            .add_source(config::File::with_name("config/default"))
            // Per-environment overrides are optional
            .add_source(config::File::with_name(&format!("config/{}", run_mode)).required(false))
            // Local overrides, not checked in
            .add_source(config::File::with_name("config/local").required(false))
            // GYM__SERVER__PORT=8080 sets server.port
            .add_source(config::Environment::with_prefix("GYM").separator("__"))
            .build()?;

        let config: Self = s.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Parse a TOML document; used for embedded defaults and tests
    pub fn from_toml(source: &str) -> Result<Self, config::ConfigError> {
        let config: Self = config::Config::builder()
            .add_source(config::File::from_str(source, config::FileFormat::Toml))
            .build()?
            .try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), config::ConfigError> {
        if self.gym.offset().is_none() {
            return Err(config::ConfigError::Message(format!(
                "gym.utc_offset_minutes out of range: {}",
                self.gym.utc_offset_minutes
            )));
        }
        if self.auth.jwt_expiration_seconds == 0 || self.auth.jwt_expiration_seconds > MAX_TOKEN_LIFETIME_SECONDS {
            return Err(config::ConfigError::Message(format!(
                "auth.jwt_expiration_seconds must be between 1 and {}, got {}",
                MAX_TOKEN_LIFETIME_SECONDS, self.auth.jwt_expiration_seconds
            )));
        }
        if self.gym.birthday_hour > 23 || self.gym.birthday_minute > 59 {
            return Err(config::ConfigError::Message(format!(
                "invalid birthday job time {:02}:{:02}",
                self.gym.birthday_hour, self.gym.birthday_minute
            )));
        }
        self.pricing
            .prices
            .validate()
            .map_err(|e| config::ConfigError::Message(e.to_string()))?;
        self.pricing
            .offers
            .validate()
            .map_err(|e| config::ConfigError::Message(e.to_string()))?;
        Ok(())
    }

    pub fn offset(&self) -> FixedOffset {
        // In range once validate() has passed
        self.gym.offset().unwrap_or_else(|| Utc.fix())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DEFAULT_TOML: &str = include_str!("../../config/default.toml");

    #[test]
    fn test_default_config_matches_built_in_tables() {
        let config = Config::from_toml(DEFAULT_TOML).expect("default config should load");
        assert_eq!(config.pricing.prices, PriceTable::default());
        assert_eq!(config.pricing.offers, OfferRules::default());
        assert_eq!(config.gym.utc_offset_minutes, 330);
        assert_eq!(config.offset().local_minus_utc(), 330 * 60);
        assert_eq!((config.gym.birthday_hour, config.gym.birthday_minute), (0, 2));
    }

    #[test]
    fn test_secrets_are_masked_in_debug() {
        let config = Config::from_toml(DEFAULT_TOML).unwrap();
        let dump = format!("{:?}", config.auth);
        assert!(!dump.contains(config.auth.admin_password.expose().as_str()));
        assert!(dump.contains("********"));
    }

    #[test]
    fn test_invalid_offer_rejected() {
        let broken = DEFAULT_TOML.replace("gym_pt_combo = 30", "gym_pt_combo = 130");
        assert!(Config::from_toml(&broken).is_err());
    }

    #[test]
    fn test_token_lifetime_bounded() {
        let forever = DEFAULT_TOML.replace("jwt_expiration_seconds = 43200", "jwt_expiration_seconds = 9223372036854775807");
        assert!(Config::from_toml(&forever).is_err());
        let zero = DEFAULT_TOML.replace("jwt_expiration_seconds = 43200", "jwt_expiration_seconds = 0");
        assert!(Config::from_toml(&zero).is_err());
    }

    #[test]
    fn test_pricing_section_is_optional() {
        let minimal = r#"
            [server]
            port = 5000
            [auth]
            admin_username = "admin"
            admin_password = "secret"
            jwt_secret = "jwt"
            jwt_expiration_seconds = 3600
            [gym]
            name = "Test Gym"
            utc_offset_minutes = 0
            [email]
            from_address = "desk@example.com"
            [pricing]
        "#;
        let config = Config::from_toml(minimal).unwrap();
        assert_eq!(config.pricing.prices.admission_fee, 100);
        assert_eq!(config.gym.birthday_minute, 2);
    }
}
