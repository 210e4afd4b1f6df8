use std::path::PathBuf;
use thiserror::Error;
use url::Url;

/// Where the login flow dumps its response
pub const DEFAULT_INPUT_PATH: &str = "/tmp/response.json";

/// Refresh endpoint of the locally running auth service
pub const DEFAULT_REFRESH_URL: &str = "http://localhost:3001/api/auth/refresh";

pub const INPUT_ENV: &str = "REFRESH_PROBE_INPUT";
pub const URL_ENV: &str = "REFRESH_PROBE_URL";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid refresh URL {url}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub input_path: PathBuf,
    pub refresh_url: Url,
}

impl Config {
    /// Resolves the configuration.
    ///
    /// Explicit values win over the ones found through `lookup` (usually the process
    /// environment), which in turn win over the built-in defaults.
    pub fn resolve(
        input_path: Option<PathBuf>,
        refresh_url: Option<String>,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let input_path = input_path
            .or_else(|| lookup(INPUT_ENV).map(PathBuf::from))
            .unwrap_or_else(|| DEFAULT_INPUT_PATH.into());

        let url = refresh_url
            .or_else(|| lookup(URL_ENV))
            .unwrap_or_else(|| DEFAULT_REFRESH_URL.into());
        let refresh_url =
            Url::parse(&url).map_err(|source| ConfigError::InvalidUrl { url, source })?;

        Ok(Self {
            input_path,
            refresh_url,
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input_path: DEFAULT_INPUT_PATH.into(),
            refresh_url: Url::parse(DEFAULT_REFRESH_URL).expect("Default refresh URL is valid"),
        }
    }
}
