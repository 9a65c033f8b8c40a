//! Form definitions backing the console routes.

use std::fmt::Display;
use std::str::FromStr;

use serde::{Deserialize, Deserializer};
use thiserror::Error;
use validator::ValidationErrors;

pub mod auth;
pub mod list;
pub mod maintenance;
pub mod vehicle;
pub mod workshop;

#[derive(Debug, Error)]
/// Errors that can occur when processing form data.
pub enum FormError {
    #[error("validation errors: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("invalid email address")]
    InvalidEmail,

    #[error("invalid license plate")]
    InvalidPlate,

    #[error("invalid vehicle id")]
    InvalidVehicleId,

    #[error("invalid client id")]
    InvalidClientId,

    #[error("invalid workshop id")]
    InvalidWorkshopId,

    #[error("invalid status: {0}")]
    InvalidStatus(String),
}

/// Deserializes an optional form field, treating a blank input as absent.
pub(crate) fn blank_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: Display,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => value.parse().map(Some).map_err(serde::de::Error::custom),
    }
}

/// Trims free text and drops it when nothing remains.
pub(crate) fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}
