use thiserror::Error;

/// Ways a row insertion, removal, or cluster lookup can violate the view's
/// bookkeeping contract.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum RowError {
    /// Clusters can be addressed up to one past the last cluster
    #[error(
        "Asked for cluster index {cluster_ix} but there are {n_clusters} \
        clusters"
    )]
    ClusterIndexOutOfBounds { cluster_ix: usize, n_clusters: usize },
    #[error("Row {row_ix} is already assigned to cluster {cluster_ix}")]
    RowAlreadyAssigned { row_ix: usize, cluster_ix: usize },
    #[error("Row {row_ix} is not assigned to any cluster")]
    RowNotAssigned { row_ix: usize },
    #[error(
        "Row {row_ix} is assigned to cluster {actual}, not cluster {requested}"
    )]
    WrongCluster {
        row_ix: usize,
        requested: usize,
        actual: usize,
    },
    #[error("Row vector has {n} entries but the view has {n_cols} columns")]
    DimensionMismatch { n_cols: usize, n: usize },
    #[error("Value {value} is not valid for column {col_ix}")]
    InvalidCell { col_ix: usize, value: f64 },
}

/// Errors that can occur when building a `View`
#[derive(Clone, Debug, Error, PartialEq)]
pub enum BuildViewError {
    #[error("CRP alpha must be positive and finite, but was {0}")]
    InvalidCrpAlpha(f64),
    #[error(
        "Categorical column {col_ix} has k = {k}, but k must be in 1..={max_k}"
    )]
    InvalidCategoricalK {
        col_ix: usize,
        k: usize,
        max_k: usize,
    },
    #[error(
        "Categorical column {col_ix} has k = {k} but its prior has \
        {prior_k} categories"
    )]
    CategoricalPriorMismatch {
        col_ix: usize,
        k: usize,
        prior_k: usize,
    },
    #[error("Column {col_ix} has an invalid prior: {reason}")]
    InvalidPrior { col_ix: usize, reason: String },
}

/// The ways a view's bookkeeping can be found inconsistent
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ViewError {
    #[error("The sum of cluster counts does not equal the number of vectors")]
    CountsDoNotSumToNVectors,
    #[error("The number of looked-up rows does not equal the number of vectors")]
    LookupSizeIsNotNVectors,
    #[error("A looked-up row points past the last cluster")]
    LookupIndexOutOfBounds,
    #[error("The row lookup disagrees with cluster membership")]
    LookupDisagreesWithMembership,
}
