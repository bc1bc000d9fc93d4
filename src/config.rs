use crate::labels::FontMetrics;
use crate::render::{DEFAULT_COLUMN_WIDTH_PX, RenderConfig};
use std::env;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {key}: {message}")]
    Invalid { key: &'static str, message: String },
}

#[derive(Debug, Clone)]
pub struct DashboardConfig {
    pub port: u16,
    pub api_url: String,
    pub people: Vec<String>,
    pub fetch_timeout: Duration,
    pub render: RenderConfig,
}

impl DashboardConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Reads settings through `lookup`, falling back to defaults for unset keys.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let people: Vec<String> = lookup("DASHBOARD_PEOPLE")
            .unwrap_or_else(|| "adi,aashima".to_string())
            .split(',')
            .map(|id| id.trim().to_string())
            .filter(|id| !id.is_empty())
            .collect();
        if people.is_empty() {
            return Err(ConfigError::Invalid {
                key: "DASHBOARD_PEOPLE",
                message: "at least one person id is required".to_string(),
            });
        }

        let column_width_px: f64 = parse(&lookup, "DASHBOARD_COLUMN_WIDTH", DEFAULT_COLUMN_WIDTH_PX)?;
        if !column_width_px.is_finite() || column_width_px <= 0.0 {
            return Err(ConfigError::Invalid {
                key: "DASHBOARD_COLUMN_WIDTH",
                message: "must be a positive number".to_string(),
            });
        }

        let fetch_timeout_ms: u64 = parse(&lookup, "DASHBOARD_FETCH_TIMEOUT_MS", 5000)?;
        if fetch_timeout_ms == 0 {
            return Err(ConfigError::Invalid {
                key: "DASHBOARD_FETCH_TIMEOUT_MS",
                message: "must be a positive number of milliseconds".to_string(),
            });
        }

        let defaults = RenderConfig::default();
        let render = RenderConfig {
            rows: parse(&lookup, "DASHBOARD_GRID_ROWS", defaults.rows)?.max(1),
            fill: parse(&lookup, "DASHBOARD_FILL", defaults.fill)?,
            source: parse(&lookup, "DASHBOARD_POSITION", defaults.source)?,
            level: parse(&lookup, "DASHBOARD_LEVELS", defaults.level)?,
            label: parse(&lookup, "DASHBOARD_LABELS", defaults.label)?,
            column_width_px,
            font: FontMetrics::default(),
            segments: parse(&lookup, "DASHBOARD_SEGMENTS", defaults.segments)?.max(1),
        };

        Ok(Self {
            port: parse(&lookup, "PORT", 8080)?,
            api_url: lookup("DASHBOARD_API_URL").unwrap_or_else(|| "http://127.0.0.1:5000".to_string()),
            people,
            fetch_timeout: Duration::from_millis(fetch_timeout_ms),
            render,
        })
    }
}

fn parse<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        Some(raw) => raw.trim().parse().map_err(|err: T::Err| ConfigError::Invalid {
            key,
            message: err.to_string(),
        }),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::labels::LabelPolicy;
    use crate::layout::{FillPolicy, PositionSource};
    use crate::level::LevelPolicy;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<DashboardConfig, ConfigError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        DashboardConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_when_unset() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.people, vec!["adi", "aashima"]);
        assert_eq!(config.fetch_timeout, Duration::from_millis(5000));
        assert_eq!(config.render, RenderConfig::default());
    }

    #[test]
    fn policies_come_from_env() {
        let config = config_from(&[
            ("DASHBOARD_FILL", "calendar-weeks"),
            ("DASHBOARD_POSITION", "day-offset"),
            ("DASHBOARD_LEVELS", "quartiles"),
            ("DASHBOARD_LABELS", "absolute"),
            ("DASHBOARD_SEGMENTS", "2"),
            ("DASHBOARD_PEOPLE", " sam , , kim "),
        ])
        .unwrap();
        assert_eq!(config.render.fill, FillPolicy::CalendarWeeks);
        assert_eq!(config.render.source, PositionSource::DayOffset);
        assert_eq!(config.render.level, LevelPolicy::LinearQuartiles);
        assert_eq!(config.render.label, LabelPolicy::Absolute);
        assert_eq!(config.render.segments, 2);
        assert_eq!(config.people, vec!["sam", "kim"]);
    }

    #[test]
    fn invalid_values_are_rejected() {
        assert!(config_from(&[("PORT", "eighty")]).is_err());
        assert!(config_from(&[("DASHBOARD_LEVELS", "log")]).is_err());
        assert!(config_from(&[("DASHBOARD_COLUMN_WIDTH", "-3")]).is_err());
        assert!(config_from(&[("DASHBOARD_PEOPLE", " , ")]).is_err());
        assert!(config_from(&[("DASHBOARD_FETCH_TIMEOUT_MS", "0")]).is_err());
    }
}
