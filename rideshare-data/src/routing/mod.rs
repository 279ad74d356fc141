//! Travel costs from the Google Distance Matrix API.
//!
//! [`HttpCostMatrixProvider`] implements
//! [`rideshare_core::CostMatrixProvider`] by sending every stop as both an
//! origin and a destination and mapping the response rows into a
//! [`rideshare_core::CostMatrix`].
//!
//! # Example
//!
//! ```no_run
//! use std::time::Duration;
//! use rideshare_core::CostMatrixProvider;
//! use rideshare_data::GoogleMapsCredentials;
//! use rideshare_data::routing::{HttpCostMatrixProvider, HttpCostMatrixProviderConfig};
//!
//! let credentials = GoogleMapsCredentials::from_env()?;
//! let config = HttpCostMatrixProviderConfig::new(credentials)
//!     .with_timeout(Duration::from_secs(10));
//! let provider = HttpCostMatrixProvider::with_config(config)?;
//!
//! let locations = vec!["1 Main St".to_owned(), "2 High St".to_owned()];
//! let matrix = provider.get_matrix(&locations)?;
//! println!("{:?}", matrix.leg(0, 1));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod distance_matrix;
mod provider;

#[doc(hidden)]
pub mod test_support;

pub use provider::{
    DEFAULT_USER_AGENT, DISTANCE_MATRIX_PATH, HttpCostMatrixProvider, HttpCostMatrixProviderConfig,
};
