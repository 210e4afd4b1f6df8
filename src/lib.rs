use std::io::{self, Write};
use thiserror::Error;

pub mod config;
pub mod logging;
pub mod refresh;
pub mod token;

pub use config::{Config, ConfigError};
pub use refresh::{RefreshError, RefreshResponse};
pub use token::TokenError;

#[derive(Error, Debug)]
pub enum ProbeError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Token(#[from] TokenError),

    #[error(transparent)]
    Refresh(#[from] RefreshError),

    #[error("Failed to write output")]
    Output(#[from] io::Error),
}

/// Replays the saved refresh token against the refresh endpoint.
///
/// Writes the token preview and then the raw response body to `out`. Nothing is sent
/// if the token can't be loaded.
pub async fn run_probe(
    config: &Config,
    out: &mut impl Write,
) -> Result<RefreshResponse, ProbeError> {
    let refresh_token = token::load_refresh_token(&config.input_path)?;
    writeln!(out, "Refresh token: {}", token::preview(&refresh_token))?;
    out.flush()?;

    let http_client = refresh::create_http_client()?;
    let response =
        refresh::send_refresh(&http_client, &config.refresh_url, &refresh_token).await?;

    writeln!(out, "\nRefresh response:")?;
    out.write_all(&response.body)?;
    writeln!(out)?;
    out.flush()?;

    Ok(response)
}

/// Joins an error with all of its sources, outermost first.
pub fn error_chain(err: &dyn std::error::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}
