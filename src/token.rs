//! Loading the refresh token from a saved authentication response.
//!
//! The saved response is whatever the auth service returned on login, dumped to disk.
//! Only `data.tokens.refreshToken` is used, everything else is ignored.

use serde::Deserialize;
use serde_json::Value;
use std::{
    fs, io,
    path::{Path, PathBuf},
};
use thiserror::Error;
use tracing::debug;

/// Number of characters of the token shown in the preview line
pub const PREVIEW_LEN: usize = 50;

#[derive(Error, Debug)]
pub enum TokenError {
    #[error("Failed to read saved auth response {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Saved auth response is not valid JSON")]
    Parse(#[source] serde_json::Error),

    #[error("Missing data.tokens.refreshToken in saved auth response")]
    MissingRefreshToken(#[source] serde_json::Error),
}

#[derive(Deserialize)]
struct SavedAuthResponse {
    #[serde(rename = "data")]
    data: SavedAuthData,
}

#[derive(Deserialize)]
struct SavedAuthData {
    #[serde(rename = "tokens")]
    tokens: SavedTokens,
}

#[derive(Deserialize)]
struct SavedTokens {
    #[serde(rename = "refreshToken")]
    refresh_token: String,
}

/// Reads the saved auth response at `path` and returns its refresh token.
///
/// Syntax errors and a missing token are reported separately, so a truncated file
/// doesn't look like a response from a different endpoint.
pub fn load_refresh_token(path: &Path) -> Result<String, TokenError> {
    debug!(path = %path.display(), "reading saved auth response");

    let content = fs::read_to_string(path).map_err(|source| TokenError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let document: Value = serde_json::from_str(&content).map_err(TokenError::Parse)?;
    let saved: SavedAuthResponse =
        serde_json::from_value(document).map_err(TokenError::MissingRefreshToken)?;

    Ok(saved.data.tokens.refresh_token)
}

/// Shortened form of the token suitable for printing.
///
/// Always appends `...`, even when the token fits entirely.
pub fn preview(token: &str) -> String {
    let mut preview: String = token.chars().take(PREVIEW_LEN).collect();
    preview.push_str("...");
    preview
}
