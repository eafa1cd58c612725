use crate::core::{LinkSettings, MAX_SHORT_KEY_LENGTH, MIN_SHORT_KEY_LENGTH};
use figment::providers::{Env, Serialized};
use figment::Figment;
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;

/// A century of retention; anything longer is a typo.
pub const MAX_DAYS_TO_LIVE: u64 = 36_500;

#[derive(Debug, Serialize, Deserialize)]
pub struct Configuration {
    pub table_name: String,
    pub days_to_live: u64,
    pub short_key_length: u16,
    pub max_attempts: u32,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            table_name: "urlsTable".to_string(),
            days_to_live: 2,
            short_key_length: 6,
            max_attempts: 10,
        }
    }
}

impl Configuration {
    pub fn load() -> Result<Self, figment::Error> {
        let config: Configuration = Figment::from(Serialized::defaults(Configuration::default()))
            // .merge overrides the defaults with whatever the environment sets
            .merge(Env::raw().only(&[
                "TABLE_NAME",
                "DAYS_TO_LIVE",
                "SHORT_KEY_LENGTH",
                "MAX_ATTEMPTS",
            ]))
            .extract()?;
        config.validate()?;

        Ok(config)
    }

    fn validate(&self) -> Result<(), figment::Error> {
        check_range(
            "SHORT_KEY_LENGTH",
            self.short_key_length,
            MIN_SHORT_KEY_LENGTH..=MAX_SHORT_KEY_LENGTH,
        )?;
        check_range("MAX_ATTEMPTS", self.max_attempts, 1..=u32::MAX)?;
        check_range("DAYS_TO_LIVE", self.days_to_live, 1..=MAX_DAYS_TO_LIVE)
    }

    pub fn link_settings(&self) -> LinkSettings {
        LinkSettings {
            days_to_live: self.days_to_live,
            max_attempts: self.max_attempts,
        }
    }
}

fn check_range<T>(name: &str, value: T, range: RangeInclusive<T>) -> Result<(), figment::Error>
where
    T: PartialOrd + std::fmt::Display,
{
    if range.contains(&value) {
        Ok(())
    } else {
        Err(figment::Error::from(format!(
            "{} must be between {} and {}, got {}",
            name,
            range.start(),
            range.end(),
            value
        )))
    }
}

impl std::fmt::Display for Configuration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Configuration {{ table_name: {}, days_to_live: {}, short_key_length: {}, max_attempts: {} }}",
            self.table_name, self.days_to_live, self.short_key_length, self.max_attempts
        )
    }
}
