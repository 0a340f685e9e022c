use std::str::FromStr;

use serde::Deserialize;

use crate::insights::ReportOptions;

#[derive(Debug, Clone, Deserialize)]
pub struct JwtConfig {
    pub secret: String,
    pub audience: String,
    /// Checked only when set; the hosted service does not always fill `iss`.
    pub issuer: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct InsightsConfig {
    pub window_days: u16,
    pub trend_window_days: u16,
    pub report: ReportOptions,
}

impl Default for InsightsConfig {
    fn default() -> Self {
        Self {
            window_days: 7,
            trend_window_days: 14,
            report: ReportOptions::default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    pub jwt: JwtConfig,
    pub insights: InsightsConfig,
}

fn env_or<T: FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.trim().parse::<T>().ok())
        .unwrap_or(default)
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = std::env::var("DATABASE_URL")?;
        let jwt = JwtConfig {
            secret: std::env::var("JWT_SECRET")?,
            audience: std::env::var("JWT_AUDIENCE").unwrap_or_else(|_| "authenticated".into()),
            issuer: std::env::var("JWT_ISSUER").ok().filter(|v| !v.is_empty()),
        };

        let defaults = InsightsConfig::default();
        let insights = InsightsConfig {
            window_days: env_or("INSIGHTS_WINDOW_DAYS", defaults.window_days).max(1),
            trend_window_days: env_or("TREND_WINDOW_DAYS", defaults.trend_window_days).max(1),
            report: ReportOptions {
                trend_threshold: env_or("TREND_THRESHOLD", defaults.report.trend_threshold),
                momentum_threshold: env_or("MOMENTUM_THRESHOLD", defaults.report.momentum_threshold),
                top_symptoms_limit: env_or("TOP_SYMPTOMS_LIMIT", defaults.report.top_symptoms_limit),
            },
        };

        Ok(Self {
            database_url,
            host: std::env::var("APP_HOST").unwrap_or_else(|_| "0.0.0.0".into()),
            port: env_or("APP_PORT", 8080),
            jwt,
            insights,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_insights_screen() {
        let cfg = InsightsConfig::default();
        assert_eq!(cfg.window_days, 7);
        assert_eq!(cfg.trend_window_days, 14);
        assert_eq!(cfg.report.trend_threshold, 0.5);
        assert_eq!(cfg.report.momentum_threshold, 0.2);
        assert_eq!(cfg.report.top_symptoms_limit, 4);
    }

    #[test]
    fn unparsable_values_fall_back() {
        assert_eq!(env_or("GUTWISE_TEST_UNSET_KEY", 3u16), 3);
    }
}
