#![warn(
    clippy::all,
    clippy::imprecise_flops,
    clippy::suboptimal_flops,
    clippy::unseparated_literal_suffix,
    clippy::unreadable_literal,
    clippy::option_option,
    clippy::implicit_clone
)]
//! Default values for priors and view construction
pub use rv;

use rv::dist::{NormalInvChiSquared, SymmetricDirichlet};

/// Default CRP concentration parameter
pub const DEFAULT_CRP_ALPHA: f64 = 1.0;

/// Default symmetric Dirichlet concentration for categorical columns
pub const DEFAULT_CSD_ALPHA: f64 = 1.0;

/// The largest number of categories a categorical column can hold. Values are
/// stored as `u8`.
pub const MAX_CATEGORICAL_K: usize = 256;

/// Accumulated score drift above which a refresh is logged as a warning
pub const SCORE_DRIFT_WARN: f64 = 1E-8;

/// Default Normal-Inverse-Chi-Squared prior for continuous columns
pub fn default_nix_prior() -> NormalInvChiSquared {
    NormalInvChiSquared::new_unchecked(0.0, 1.0, 1.0, 1.0)
}

/// Default symmetric Dirichlet prior for a `k`-category column
pub fn default_csd_prior(k: usize) -> SymmetricDirichlet {
    SymmetricDirichlet::new_unchecked(DEFAULT_CSD_ALPHA, k)
}
