use serde::Serialize;
use serde_json::Value;

use super::Route;
use crate::error::Result;
use crate::models::{HttpMethod, Operation, Parameters};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChangeThemeBody {
    pub theme: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LocationBody {
    pub location: String,
    pub longitude: String,
    pub latitude: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WeatherLocationBody {
    pub location: LocationBody,
    pub unit: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BackupBody {
    pub password: String,
}

fn theme_body(params: &Parameters) -> Result<Value> {
    let body = ChangeThemeBody {
        theme: params.required_str("theme")?,
    };
    Ok(serde_json::to_value(body)?)
}

fn location_body(params: &Parameters) -> Result<Value> {
    let body = WeatherLocationBody {
        location: LocationBody {
            location: params.required_str("locationName")?,
            longitude: params.required_str("longitude")?,
            latitude: params.required_str("latitude")?,
        },
        unit: params.required_str("unit")?,
    };
    Ok(serde_json::to_value(body)?)
}

fn backup_body(params: &Parameters) -> Result<Value> {
    let body = BackupBody {
        password: params.required_str("backupPassword")?,
    };
    Ok(serde_json::to_value(body)?)
}

pub(super) fn routes() -> Vec<(Operation, Route)> {
    vec![
        (
            Operation::ChangeTheme,
            Route::new(HttpMethod::Put, "/api/v1/public/set-theme").with_body(theme_body),
        ),
        (
            Operation::ChangeLocation,
            Route::new(HttpMethod::Put, "/api/v1/public/weather-location")
                .with_body(location_body),
        ),
        (
            Operation::Backup,
            Route::new(HttpMethod::Post, "/api/v1/public/backup")
                .with_body(backup_body)
                .binary(),
        ),
    ]
}
