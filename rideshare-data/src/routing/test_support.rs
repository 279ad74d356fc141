//! Test utilities for cost-matrix providers.
//!
//! [`StubCostMatrixProvider`] returns pre-configured responses without making
//! HTTP requests.

use rideshare_core::{CostMatrix, CostMatrixError, CostMatrixProvider, TravelCost};

/// Stub `CostMatrixProvider` for testing.
///
/// # Example
///
/// ```
/// use rideshare_core::{CostMatrix, CostMatrixProvider, TravelCost};
/// use rideshare_data::routing::test_support::StubCostMatrixProvider;
///
/// let provider = StubCostMatrixProvider::with_uniform_matrix(2, TravelCost::ok(500, 30));
/// let matrix = provider.get_matrix(&["A".to_owned(), "B".to_owned()])?;
/// assert_eq!(matrix.leg(0, 1), Some(&TravelCost::ok(500, 30)));
/// # Ok::<(), rideshare_core::CostMatrixError>(())
/// ```
#[derive(Debug, Clone)]
pub struct StubCostMatrixProvider {
    response: StubResponse,
}

#[derive(Debug, Clone)]
enum StubResponse {
    Matrix(CostMatrix),
    Error(CostMatrixError),
}

impl StubCostMatrixProvider {
    /// Create a provider that returns `matrix` for any non-empty input.
    #[must_use]
    pub fn with_matrix(matrix: CostMatrix) -> Self {
        Self {
            response: StubResponse::Matrix(matrix),
        }
    }

    /// Create a provider that fails with `error` for any non-empty input.
    ///
    /// Empty input still returns `CostMatrixError::EmptyInput`.
    #[must_use]
    pub fn with_error(error: CostMatrixError) -> Self {
        Self {
            response: StubResponse::Error(error),
        }
    }

    /// Create a provider returning a `size x size` matrix with a zero
    /// diagonal and `leg` everywhere else.
    #[must_use]
    pub fn with_uniform_matrix(size: usize, leg: TravelCost) -> Self {
        Self::with_matrix(CostMatrix::from_fn(size, |from, to| {
            if from == to { TravelCost::ok(0, 0) } else { leg }
        }))
    }
}

impl CostMatrixProvider for StubCostMatrixProvider {
    fn get_matrix(&self, locations: &[String]) -> Result<CostMatrix, CostMatrixError> {
        if locations.is_empty() {
            return Err(CostMatrixError::EmptyInput);
        }

        match &self.response {
            StubResponse::Matrix(matrix) => Ok(matrix.clone()),
            StubResponse::Error(error) => Err(error.clone()),
        }
    }
}
