//! Google Maps API credentials.

use std::fmt;

use rideshare_core::ErrorKind;
use thiserror::Error;

/// Environment variable holding the Google Maps API key.
pub const GOOGLE_MAPS_API_KEY_ENV: &str = "GOOGLE_MAPS_API_KEY";

/// Missing provider settings, fatal at start-up.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    /// No API key was configured.
    #[error("missing Google Maps API key; set {env_var}")]
    MissingApiKey {
        /// Variable the key is read from.
        env_var: &'static str,
    },
}

impl ConfigurationError {
    /// Machine-readable category, always [`ErrorKind::Configuration`].
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        ErrorKind::Configuration
    }
}

/// API key for the Google Maps web services.
///
/// The key is redacted from `Debug` output.
///
/// # Examples
/// ```
/// use rideshare_data::GoogleMapsCredentials;
///
/// let credentials = GoogleMapsCredentials::new("secret")?;
/// assert_eq!(credentials.api_key(), "secret");
/// assert!(!format!("{credentials:?}").contains("secret"));
/// assert!(GoogleMapsCredentials::new("  ").is_err());
/// # Ok::<(), rideshare_data::ConfigurationError>(())
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct GoogleMapsCredentials {
    api_key: String,
}

impl fmt::Debug for GoogleMapsCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GoogleMapsCredentials")
            .field("api_key", &"<redacted>")
            .finish()
    }
}

impl GoogleMapsCredentials {
    /// Wrap an API key.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError::MissingApiKey`] when `api_key` is blank.
    pub fn new(api_key: impl Into<String>) -> Result<Self, ConfigurationError> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(ConfigurationError::MissingApiKey {
                env_var: GOOGLE_MAPS_API_KEY_ENV,
            });
        }
        Ok(Self { api_key })
    }

    /// Read the key from [`GOOGLE_MAPS_API_KEY_ENV`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError::MissingApiKey`] when the variable is
    /// unset, not valid Unicode or blank.
    pub fn from_env() -> Result<Self, ConfigurationError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read the key through `lookup`, which maps a variable name to its value.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError::MissingApiKey`] when `lookup` yields
    /// nothing or a blank value.
    pub fn from_lookup(
        lookup: impl FnOnce(&str) -> Option<String>,
    ) -> Result<Self, ConfigurationError> {
        lookup(GOOGLE_MAPS_API_KEY_ENV).map_or(
            Err(ConfigurationError::MissingApiKey {
                env_var: GOOGLE_MAPS_API_KEY_ENV,
            }),
            Self::new,
        )
    }

    /// The raw key, for request signing only.
    #[must_use]
    pub fn api_key(&self) -> &str {
        &self.api_key
    }
}
