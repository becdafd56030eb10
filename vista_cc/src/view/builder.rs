use super::View;

use vista_consts::DEFAULT_CRP_ALPHA;

use crate::config::{ColType, ViewConfig};
use crate::error::BuildViewError;

/// Builds a `View`
pub struct Builder {
    col_types: Vec<ColType>,
    crp_alpha: Option<f64>,
}

impl Builder {
    /// Start building a view of `n_cols` continuous columns with default
    /// priors
    pub fn new(n_cols: usize) -> Self {
        Builder {
            col_types: vec![ColType::continuous(); n_cols],
            crp_alpha: None,
        }
    }

    /// Start building a view with the given column models.
    ///
    /// The number of columns will be the number of column types.
    pub fn from_col_types(col_types: Vec<ColType>) -> Self {
        Builder {
            col_types,
            crp_alpha: None,
        }
    }

    pub fn from_config(config: ViewConfig) -> Self {
        Builder {
            col_types: config.col_types,
            crp_alpha: Some(config.crp_alpha),
        }
    }

    /// Set the CRP concentration parameter
    #[must_use]
    pub fn crp_alpha(mut self, crp_alpha: f64) -> Self {
        self.crp_alpha = Some(crp_alpha);
        self
    }

    /// Build the `View` with no rows assigned
    pub fn build(self) -> Result<View, BuildViewError> {
        let config = ViewConfig {
            crp_alpha: self.crp_alpha.unwrap_or(DEFAULT_CRP_ALPHA),
            col_types: self.col_types,
        };
        config.validate()?;
        Ok(View::from_parts(config.col_types, config.crp_alpha))
    }
}
