//! Error types for the `homestead-world` crate.
//!
//! Plot operations return [`WorldError`] to explain why an action is
//! illegal. The simulation core absorbs these as no-ops.

use homestead_types::{CropType, PlotState, Season};

/// Errors raised by plot and field operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WorldError {
    /// The plot index is outside the collection.
    #[error("plot {index} does not exist (field has {len} plots)")]
    PlotNotFound {
        /// Requested index.
        index: usize,
        /// Collection length.
        len: usize,
    },

    /// The plot is not in the state the operation needs.
    #[error("plot is {actual:?}, expected {expected:?}")]
    WrongPlotState {
        /// State the operation requires.
        expected: PlotState,
        /// State the plot is in.
        actual: PlotState,
    },

    /// Fertilizer was already applied to this plot.
    #[error("plot is already fertilized")]
    AlreadyFertilized,

    /// The crop cannot be planted outdoors this season.
    #[error("{crop:?} cannot be planted outdoors in {season:?}")]
    OutOfSeason {
        /// The crop.
        crop: CropType,
        /// Current season.
        season: Season,
    },

    /// Outdoor ground is frozen during winter.
    #[error("outdoor plots are frozen in winter")]
    FrozenGround,

    /// A blizzard is blocking outdoor work.
    #[error("a blizzard is blocking outdoor plots")]
    Blizzard,

    /// Arithmetic overflow during a timestamp calculation.
    #[error("arithmetic overflow in plot timing")]
    ArithmeticOverflow,
}
