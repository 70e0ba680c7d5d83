use crate::app_config::{AppConfig, Environment, ProjectionSettings};
use crate::directions::DEFAULT_MAPS_BASE_URL;
use crate::projection::{GeoPoint, Viewport};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Every variable is optional; tests drive this with a `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let parse_positive = |var: &str, raw: &str| -> Result<f64, ConfigError> {
        let value = raw
            .trim()
            .parse::<f64>()
            .map_err(|e| invalid(var, e.to_string()))?;
        if value.is_finite() && value > 0.0 {
            Ok(value)
        } else {
            Err(invalid(var, format!("must be a positive number, got {value}")))
        }
    };

    let parse_dimension = |var: &str, default: &str| -> Result<f64, ConfigError> {
        parse_positive(var, &or_default(var, default))
    };

    let env = parse_environment(&or_default("AISLES_ENV", "development"))?;
    let log_level = or_default("AISLES_LOG_LEVEL", "info");
    let log_path = lookup("AISLES_LOG_PATH")
        .ok()
        .filter(|p| !p.trim().is_empty())
        .map(PathBuf::from);
    let maps_base_url = or_default("AISLES_MAPS_BASE_URL", DEFAULT_MAPS_BASE_URL);

    let map_viewport = Viewport {
        width: parse_dimension("AISLES_MAP_WIDTH", "800")?,
        height: parse_dimension("AISLES_MAP_HEIGHT", "600")?,
    };

    let padding_raw = or_default("AISLES_MAP_PADDING", "40");
    let padding = padding_raw
        .trim()
        .parse::<f64>()
        .map_err(|e| invalid("AISLES_MAP_PADDING", e.to_string()))?;
    if !padding.is_finite() || padding < 0.0 {
        return Err(invalid(
            "AISLES_MAP_PADDING",
            format!("must be zero or positive, got {padding}"),
        ));
    }

    let origin = lookup("AISLES_MAP_ORIGIN")
        .ok()
        .map(|raw| parse_origin(&raw))
        .transpose()?;
    let scale = lookup("AISLES_MAP_SCALE")
        .ok()
        .map(|raw| parse_positive("AISLES_MAP_SCALE", &raw))
        .transpose()?;

    let projection = match (origin, scale) {
        (Some(origin), Some(scale)) => ProjectionSettings::Fixed { origin, scale },
        (None, None) => ProjectionSettings::Fit { padding },
        (Some(_), None) => {
            return Err(invalid(
                "AISLES_MAP_SCALE",
                "required when AISLES_MAP_ORIGIN is set".to_string(),
            ))
        }
        (None, Some(_)) => {
            return Err(invalid(
                "AISLES_MAP_ORIGIN",
                "required when AISLES_MAP_SCALE is set".to_string(),
            ))
        }
    };

    Ok(AppConfig {
        env,
        log_level,
        log_path,
        maps_base_url,
        map_viewport,
        projection,
    })
}

/// Parse a string into an `Environment` variant.
///
/// # Errors
///
/// Returns `ConfigError::InvalidEnvVar` for anything other than
/// `development`, `test` or `production`.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "AISLES_ENV".to_string(),
            reason: format!("unknown environment '{other}'"),
        }),
    }
}

/// Parse a `lat,lng` pair.
fn parse_origin(raw: &str) -> Result<GeoPoint, ConfigError> {
    let invalid = |reason: String| ConfigError::InvalidEnvVar {
        var: "AISLES_MAP_ORIGIN".to_string(),
        reason,
    };

    let (lat, lng) = raw
        .split_once(',')
        .ok_or_else(|| invalid(format!("expected 'lat,lng', got '{raw}'")))?;
    let lat = lat
        .trim()
        .parse::<f64>()
        .map_err(|e| invalid(format!("latitude: {e}")))?;
    let lng = lng
        .trim()
        .parse::<f64>()
        .map_err(|e| invalid(format!("longitude: {e}")))?;

    if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lng) {
        return Err(invalid(format!("coordinates out of range: {lat},{lng}")));
    }

    Ok(GeoPoint { lat, lng })
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
