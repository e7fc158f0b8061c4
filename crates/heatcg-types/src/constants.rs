//! Numerical defaults shared across the solver and the problem setup.

/// Default relative-residual stopping tolerance for CG.
pub const DEFAULT_TOLERANCE: f64 = 1.0e-5;

/// Default number of iterations between intermediate snapshots.
pub const DEFAULT_SNAPSHOT_INTERVAL: usize = 10;

/// Default value of every entry of the initial guess.
pub const DEFAULT_INITIAL_GUESS: f64 = 1.0;

/// Minimum digit count of the iteration number in snapshot file names.
pub const SNAPSHOT_INDEX_WIDTH: usize = 3;

/// Decay rate of the Gaussian dip in the cold-boundary temperature profile.
pub const COLD_PROFILE_DECAY: f64 = 10.0;

/// Diagonal weight of the 5-point stencil (in units of 1/h²).
pub const STENCIL_CENTER: f64 = 4.0;

/// Off-diagonal weight of the 5-point stencil (in units of 1/h²).
pub const STENCIL_NEIGHBOR: f64 = -1.0;

/// Triplets the heat setup emits per unknown (two diagonal halves plus
/// at most four neighbors).
pub const STENCIL_TRIPLETS_PER_UNKNOWN: usize = 6;

/// Largest grid (`nx * ny` unknowns) the heat setup will assemble.
pub const MAX_GRID_UNKNOWNS: usize = 4_000_000;
