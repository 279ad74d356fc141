//! Pairwise travel costs between route stops.
//!
//! The [`CostMatrixProvider`] trait abstracts the external distance-matrix
//! service. Callers supply the ordered stop locations and receive a square
//! [`CostMatrix`] whose element `(i, j)` is the leg from `locations[i]` to
//! `locations[j]`.
//!
//! Individual elements may be unavailable; the matrix as a whole is an error
//! only when the provider itself fails.

mod error;
mod provider;

pub use error::CostMatrixError;
pub use provider::{CostMatrix, CostMatrixProvider, ElementStatus, TravelCost};
