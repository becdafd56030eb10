use serde::{Deserialize, Serialize};
use vista_consts::{
    default_csd_prior, default_nix_prior, DEFAULT_CRP_ALPHA, MAX_CATEGORICAL_K,
};
use vista_stats::rv::dist::{NormalInvChiSquared, SymmetricDirichlet};

use crate::cluster::ColComponent;
use crate::component::ConjugateComponent;
use crate::error::BuildViewError;

/// The model of one column of the view
///
/// Priors left unset fall back to the defaults in `vista_consts`.
#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(rename_all = "snake_case")]
pub enum ColType {
    /// Gaussian data with a Normal-Inverse-Chi-Squared prior
    Continuous {
        #[serde(default)]
        prior: Option<NormalInvChiSquared>,
    },
    /// Values in `0..k` with a symmetric Dirichlet prior
    Categorical {
        k: usize,
        #[serde(default)]
        prior: Option<SymmetricDirichlet>,
    },
}

impl ColType {
    /// A continuous column with the default prior
    pub fn continuous() -> Self {
        ColType::Continuous { prior: None }
    }

    /// A `k`-category column with the default prior
    pub fn categorical(k: usize) -> Self {
        ColType::Categorical { k, prior: None }
    }

    pub fn is_continuous(&self) -> bool {
        matches!(self, ColType::Continuous { .. })
    }

    pub fn is_categorical(&self) -> bool {
        matches!(self, ColType::Categorical { .. })
    }

    /// Check that the column type describes a usable model
    pub fn validate(&self, col_ix: usize) -> Result<(), BuildViewError> {
        match self {
            ColType::Continuous { prior: None } => Ok(()),
            // Deserialized priors skip the checks in the rv constructors
            ColType::Continuous { prior: Some(pr) } => {
                NormalInvChiSquared::new(pr.m(), pr.k(), pr.v(), pr.s2())
                    .map(|_| ())
                    .map_err(|err| BuildViewError::InvalidPrior {
                        col_ix,
                        reason: err.to_string(),
                    })
            }
            ColType::Categorical { k, prior } => {
                if *k == 0 || *k > MAX_CATEGORICAL_K {
                    return Err(BuildViewError::InvalidCategoricalK {
                        col_ix,
                        k: *k,
                        max_k: MAX_CATEGORICAL_K,
                    });
                }
                match prior {
                    Some(pr) if pr.k() != *k => {
                        Err(BuildViewError::CategoricalPriorMismatch {
                            col_ix,
                            k: *k,
                            prior_k: pr.k(),
                        })
                    }
                    Some(pr) => SymmetricDirichlet::new(pr.alpha(), pr.k())
                        .map(|_| ())
                        .map_err(|err| BuildViewError::InvalidPrior {
                            col_ix,
                            reason: err.to_string(),
                        }),
                    None => Ok(()),
                }
            }
        }
    }

    /// Create an empty component for this column
    pub(crate) fn component(&self) -> ColComponent {
        match self {
            ColType::Continuous { prior } => {
                let prior = prior.clone().unwrap_or_else(default_nix_prior);
                ColComponent::Continuous(ConjugateComponent::new(prior))
            }
            ColType::Categorical { k, prior } => {
                let prior =
                    prior.clone().unwrap_or_else(|| default_csd_prior(*k));
                ColComponent::Categorical(ConjugateComponent::new(prior))
            }
        }
    }
}

fn default_crp_alpha() -> f64 {
    DEFAULT_CRP_ALPHA
}

/// Configuration for building a `View`
///
/// Sets the CRP concentration and the model of every column. The number of
/// columns is the number of column types.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ViewConfig {
    /// CRP concentration parameter. Fixed for the life of the view.
    #[serde(default = "default_crp_alpha")]
    pub crp_alpha: f64,
    /// The model of each column
    pub col_types: Vec<ColType>,
}

impl Default for ViewConfig {
    fn default() -> Self {
        ViewConfig {
            crp_alpha: DEFAULT_CRP_ALPHA,
            col_types: Vec::new(),
        }
    }
}

impl ViewConfig {
    /// `n_cols` continuous columns with default priors
    pub fn continuous(n_cols: usize, crp_alpha: f64) -> Self {
        ViewConfig {
            crp_alpha,
            col_types: vec![ColType::continuous(); n_cols],
        }
    }

    pub fn n_cols(&self) -> usize {
        self.col_types.len()
    }

    pub fn validate(&self) -> Result<(), BuildViewError> {
        if !(self.crp_alpha.is_finite() && self.crp_alpha > 0.0) {
            return Err(BuildViewError::InvalidCrpAlpha(self.crp_alpha));
        }
        self.col_types
            .iter()
            .enumerate()
            .try_for_each(|(col_ix, col_type)| col_type.validate(col_ix))
    }
}
