use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;
use crate::models::ScoringWeights;

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub matching: MatchingSettings,
    #[serde(default)]
    pub scoring: ScoringSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    pub workers: Option<usize>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            workers: None,
        }
    }
}

fn default_host() -> String { "0.0.0.0".to_string() }
fn default_port() -> u16 { 8080 }

#[derive(Debug, Clone, Deserialize)]
pub struct MatchingSettings {
    #[serde(default = "default_max_roster_size")]
    pub max_roster_size: usize,
    #[serde(default = "default_name_prefix")]
    pub default_name_prefix: String,
}

impl Default for MatchingSettings {
    fn default() -> Self {
        Self {
            max_roster_size: default_max_roster_size(),
            default_name_prefix: default_name_prefix(),
        }
    }
}

fn default_max_roster_size() -> usize { 2000 }
fn default_name_prefix() -> String { "Match".to_string() }

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScoringSettings {
    #[serde(default)]
    pub weights: WeightsConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WeightsConfig {
    #[serde(default = "default_major_working_field_weight")]
    pub major_working_field_match: f64,
    #[serde(default = "default_common_fields_weight")]
    pub common_fields_per_match: f64,
    #[serde(default = "default_common_soft_skills_weight")]
    pub common_soft_skills_per_match: f64,
    #[serde(default = "default_gender_exact_weight")]
    pub gender_preference_exact: f64,
    #[serde(default = "default_gender_flexible_weight")]
    pub gender_preference_flexible: f64,
    #[serde(default = "default_student_year_weight")]
    pub student_year_match: f64,
    #[serde(default = "default_working_style_exact_weight")]
    pub working_style_exact: f64,
    #[serde(default = "default_working_style_flexible_weight")]
    pub working_style_flexible: f64,
}

impl Default for WeightsConfig {
    fn default() -> Self {
        Self {
            major_working_field_match: default_major_working_field_weight(),
            common_fields_per_match: default_common_fields_weight(),
            common_soft_skills_per_match: default_common_soft_skills_weight(),
            gender_preference_exact: default_gender_exact_weight(),
            gender_preference_flexible: default_gender_flexible_weight(),
            student_year_match: default_student_year_weight(),
            working_style_exact: default_working_style_exact_weight(),
            working_style_flexible: default_working_style_flexible_weight(),
        }
    }
}

impl From<&WeightsConfig> for ScoringWeights {
    fn from(config: &WeightsConfig) -> Self {
        Self {
            major_working_field_match: config.major_working_field_match,
            common_fields_per_match: config.common_fields_per_match,
            common_soft_skills_per_match: config.common_soft_skills_per_match,
            gender_preference_exact: config.gender_preference_exact,
            gender_preference_flexible: config.gender_preference_flexible,
            student_year_match: config.student_year_match,
            working_style_exact: config.working_style_exact,
            working_style_flexible: config.working_style_flexible,
        }
    }
}

fn default_major_working_field_weight() -> f64 { 2.0 }
fn default_common_fields_weight() -> f64 { 1.0 }
fn default_common_soft_skills_weight() -> f64 { 2.0 }
fn default_gender_exact_weight() -> f64 { 1.0 }
fn default_gender_flexible_weight() -> f64 { 0.5 }
fn default_student_year_weight() -> f64 { 1.0 }
fn default_working_style_exact_weight() -> f64 { 1.0 }
fn default_working_style_flexible_weight() -> f64 { 0.5 }

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "json".to_string() }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with MENTOR_MATCH__)
    pub fn load() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., MENTOR_MATCH__SERVER__PORT -> server.port
            .add_source(env_source())
            .build()?;

        Self::from_config(settings)
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(env_source())
            .build()?;

        Self::from_config(settings)
    }

    /// Weights the scorer runs with when a request does not override them
    pub fn scoring_weights(&self) -> ScoringWeights {
        ScoringWeights::from(&self.scoring.weights)
    }

    fn from_config(config: Config) -> Result<Self, ConfigError> {
        let settings: Self = config.try_deserialize()?;

        if !settings.scoring_weights().is_valid() {
            return Err(ConfigError::Message(
                "scoring.weights must all be finite and non-negative".to_string(),
            ));
        }

        Ok(settings)
    }
}

fn env_source() -> Environment {
    Environment::with_prefix("MENTOR_MATCH")
        .prefix_separator("__")
        .separator("__")
        .try_parsing(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::FileFormat;

    fn from_toml(toml: &str) -> Result<Settings, ConfigError> {
        let config = Config::builder()
            .add_source(File::from_str(toml, FileFormat::Toml))
            .build()?;
        Settings::from_config(config)
    }

    #[test]
    fn test_default_weights() {
        let weights = WeightsConfig::default();
        assert_eq!(weights.major_working_field_match, 2.0);
        assert_eq!(weights.common_fields_per_match, 1.0);
        assert_eq!(weights.common_soft_skills_per_match, 2.0);
        assert_eq!(weights.gender_preference_exact, 1.0);
        assert_eq!(weights.gender_preference_flexible, 0.5);
        assert_eq!(weights.student_year_match, 1.0);
        assert_eq!(weights.working_style_exact, 1.0);
        assert_eq!(weights.working_style_flexible, 0.5);
        assert_eq!(ScoringWeights::from(&weights), ScoringWeights::default());
    }

    #[test]
    fn test_default_logging() {
        let level = default_log_level();
        let format = default_log_format();
        assert_eq!(level, "info");
        assert_eq!(format, "json");
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let settings = from_toml("").unwrap();

        assert_eq!(settings.server.port, 8080);
        assert_eq!(settings.matching.max_roster_size, 2000);
        assert_eq!(settings.matching.default_name_prefix, "Match");
        assert_eq!(settings.scoring_weights(), ScoringWeights::default());
    }

    #[test]
    fn test_partial_weight_section() {
        let settings = from_toml(
            r#"
            [scoring.weights]
            student_year_match = 0.0
            common_fields_per_match = 1.5
            "#,
        )
        .unwrap();

        let weights = settings.scoring_weights();
        assert_eq!(weights.student_year_match, 0.0);
        assert_eq!(weights.common_fields_per_match, 1.5);
        assert_eq!(weights.major_working_field_match, 2.0);
    }

    #[test]
    fn test_negative_weight_rejected() {
        let result = from_toml(
            r#"
            [scoring.weights]
            working_style_exact = -1.0
            "#,
        );

        assert!(result.is_err());
    }
}
