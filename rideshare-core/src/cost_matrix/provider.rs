//! Cost-matrix provider trait and the square matrix it returns.

use super::error::CostMatrixError;

/// Whether the provider could compute a single leg.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum ElementStatus {
    /// Distance and duration are meaningful.
    #[default]
    Ok,
    /// No route was found, or the provider rejected this pair.
    Unavailable,
}

/// Travel distance and duration for one ordered pair of locations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TravelCost {
    /// Driving distance in metres.
    pub distance_meters: u64,
    /// Driving time in seconds.
    pub duration_secs: u64,
    /// Whether this element may be used.
    pub status: ElementStatus,
}

impl TravelCost {
    /// A usable leg.
    #[must_use]
    pub const fn ok(distance_meters: u64, duration_secs: u64) -> Self {
        Self {
            distance_meters,
            duration_secs,
            status: ElementStatus::Ok,
        }
    }

    /// A leg the provider could not compute.
    #[must_use]
    pub const fn unavailable() -> Self {
        Self {
            distance_meters: 0,
            duration_secs: 0,
            status: ElementStatus::Unavailable,
        }
    }

    /// Whether the element carries usable data.
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        matches!(self.status, ElementStatus::Ok)
    }
}

/// Square matrix of travel costs indexed by `(origin, destination)`.
///
/// # Examples
/// ```
/// use rideshare_core::{CostMatrix, TravelCost};
///
/// let matrix = CostMatrix::new(vec![
///     vec![TravelCost::ok(0, 0), TravelCost::ok(1_000, 60)],
///     vec![TravelCost::unavailable(), TravelCost::ok(0, 0)],
/// ]);
/// assert_eq!(matrix.leg(0, 1).map(|c| c.distance_meters), Some(1_000));
/// assert!(matrix.leg(1, 0).is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(transparent)
)]
pub struct CostMatrix {
    rows: Vec<Vec<TravelCost>>,
}

impl CostMatrix {
    /// Wrap provider rows without checking their shape.
    ///
    /// Use [`CostMatrix::ensure_covers`] before relying on the dimensions.
    #[must_use]
    pub const fn new(rows: Vec<Vec<TravelCost>>) -> Self {
        Self { rows }
    }

    /// Build a matrix from a function of `(origin, destination)`.
    pub fn from_fn(size: usize, mut cost: impl FnMut(usize, usize) -> TravelCost) -> Self {
        Self::new(
            (0..size)
                .map(|from| (0..size).map(|to| cost(from, to)).collect())
                .collect(),
        )
    }

    /// Number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the matrix has no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Raw element lookup, regardless of status.
    #[must_use]
    pub fn get(&self, from: usize, to: usize) -> Option<&TravelCost> {
        self.rows.get(from).and_then(|row| row.get(to))
    }

    /// Usable element lookup: `None` when out of bounds or not ok.
    #[must_use]
    pub fn leg(&self, from: usize, to: usize) -> Option<&TravelCost> {
        self.get(from, to).filter(|cost| cost.is_ok())
    }

    /// Borrow the underlying rows.
    #[must_use]
    pub fn rows(&self) -> &[Vec<TravelCost>] {
        &self.rows
    }

    /// Check the matrix is `size x size`.
    ///
    /// # Errors
    ///
    /// Returns [`CostMatrixError::DimensionMismatch`] naming the first row
    /// count or row length that differs from `size`.
    pub fn ensure_covers(&self, size: usize) -> Result<(), CostMatrixError> {
        if self.rows.len() != size {
            return Err(CostMatrixError::DimensionMismatch {
                expected: size,
                found: self.rows.len(),
            });
        }
        match self.rows.iter().find(|row| row.len() != size) {
            Some(row) => Err(CostMatrixError::DimensionMismatch {
                expected: size,
                found: row.len(),
            }),
            None => Ok(()),
        }
    }
}

/// Fetch pairwise travel costs for an ordered list of locations.
///
/// Implementers must return a square `n x n` matrix where
/// `n == locations.len()`; element `(i, j)` is the leg from `locations[i]`
/// to `locations[j]`. Elements the provider could not compute are marked
/// [`ElementStatus::Unavailable`] rather than failing the whole call.
///
/// # Examples
///
/// ```rust
/// use rideshare_core::{CostMatrix, CostMatrixError, CostMatrixProvider, TravelCost};
///
/// struct KilometreProvider;
///
/// impl CostMatrixProvider for KilometreProvider {
///     fn get_matrix(&self, locations: &[String]) -> Result<CostMatrix, CostMatrixError> {
///         if locations.is_empty() {
///             return Err(CostMatrixError::EmptyInput);
///         }
///         Ok(CostMatrix::from_fn(locations.len(), |i, j| {
///             if i == j { TravelCost::ok(0, 0) } else { TravelCost::ok(1_000, 60) }
///         }))
///     }
/// }
///
/// let matrix = KilometreProvider.get_matrix(&["A".to_owned(), "B".to_owned()])?;
/// assert_eq!(matrix.len(), 2);
/// # Ok::<(), CostMatrixError>(())
/// ```
pub trait CostMatrixProvider {
    /// Return the cost matrix for `locations`.
    ///
    /// Implementations must return `Err(CostMatrixError::EmptyInput)` when
    /// `locations` is empty.
    fn get_matrix(&self, locations: &[String]) -> Result<CostMatrix, CostMatrixError>;
}

impl<P: CostMatrixProvider + ?Sized> CostMatrixProvider for &P {
    fn get_matrix(&self, locations: &[String]) -> Result<CostMatrix, CostMatrixError> {
        (**self).get_matrix(locations)
    }
}
