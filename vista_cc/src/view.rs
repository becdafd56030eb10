use std::collections::BTreeMap;
use std::fmt;

use itertools::Itertools;
use log::{debug, trace, warn};
use vista_consts::SCORE_DRIFT_WARN;
use vista_stats::crp::{
    crp_predictive_logp, crp_predictive_logps, partition_log_prior,
};
use vista_utils::normalize_logps;

use crate::cluster::Cluster;
use crate::config::ColType;
use crate::error::{BuildViewError, RowError};

mod builder;
mod diagnostics;

pub use builder::Builder;
pub use diagnostics::ViewDiagnostics;

/// A single row clustering shared by a group of columns
///
/// `View` keeps a partition of rows into clusters under a Chinese Restaurant
/// Process mixture and a running log joint probability of the partition and
/// the data. The caller decides where rows go; the view scores the candidates
/// and keeps the books.
///
/// Clusters are never removed. An emptied cluster keeps its index, so cluster
/// indices held by the caller stay valid across calls.
#[derive(Clone, Debug)]
pub struct View {
    col_types: Vec<ColType>,
    crp_alpha: f64,
    n_vectors: usize,
    score: f64,
    clusters: Vec<Cluster>,
    cluster_lookup: BTreeMap<usize, usize>,
    // Stands in for the cluster one past the end
    empty_cluster: Cluster,
}

impl View {
    /// A view of `n_cols` continuous columns with default priors
    pub fn new(n_cols: usize, crp_alpha: f64) -> Result<Self, BuildViewError> {
        Builder::new(n_cols).crp_alpha(crp_alpha).build()
    }

    pub(crate) fn from_parts(col_types: Vec<ColType>, crp_alpha: f64) -> Self {
        let empty_cluster = Cluster::new(&col_types);
        View {
            col_types,
            crp_alpha,
            n_vectors: 0,
            score: 0.0,
            clusters: Vec::new(),
            cluster_lookup: BTreeMap::new(),
            empty_cluster,
        }
    }

    /// The running log joint probability
    #[inline]
    pub fn score(&self) -> f64 {
        self.score
    }

    /// The number of rows assigned to a cluster
    #[inline]
    pub fn n_vectors(&self) -> usize {
        self.n_vectors
    }

    /// The dimension of each row vector
    #[inline]
    pub fn n_cols(&self) -> usize {
        self.col_types.len()
    }

    #[inline]
    pub fn crp_alpha(&self) -> f64 {
        self.crp_alpha
    }

    #[inline]
    pub fn col_types(&self) -> &[ColType] {
        &self.col_types
    }

    /// The number of clusters, including empty ones
    #[inline]
    pub fn n_clusters(&self) -> usize {
        self.clusters.len()
    }

    /// The number of clusters that hold at least one row
    pub fn n_nonempty_clusters(&self) -> usize {
        self.clusters.iter().filter(|c| !c.is_empty()).count()
    }

    #[inline]
    pub fn clusters(&self) -> &[Cluster] {
        &self.clusters
    }

    /// The index of the cluster holding `row_ix`, if it is assigned
    #[inline]
    pub fn get_cluster_location(&self, row_ix: usize) -> Option<usize> {
        self.cluster_lookup.get(&row_ix).copied()
    }

    /// Append a new empty cluster and return it. Its index is
    /// `n_clusters() - 1` after the call.
    pub fn get_new_cluster(&mut self) -> &mut Cluster {
        let k = self.clusters.len();
        self.clusters.push(self.empty_cluster.clone());
        debug!("Created cluster {k}");
        &mut self.clusters[k]
    }

    fn check_cluster_ix(&self, cluster_ix: usize) -> Result<(), RowError> {
        if cluster_ix > self.clusters.len() {
            Err(RowError::ClusterIndexOutOfBounds {
                cluster_ix,
                n_clusters: self.clusters.len(),
            })
        } else {
            Ok(())
        }
    }

    fn assert_cluster_ix(&self, cluster_ix: usize) {
        if let Err(err) = self.check_cluster_ix(cluster_ix) {
            panic!("{err}");
        }
    }

    /// Get cluster `cluster_ix`, creating it if it is one past the last
    /// cluster.
    ///
    /// # Panics
    ///
    /// Panics if `cluster_ix > n_clusters()`
    pub fn get_cluster(&mut self, cluster_ix: usize) -> &mut Cluster {
        self.assert_cluster_ix(cluster_ix);
        if cluster_ix == self.clusters.len() {
            self.get_new_cluster()
        } else {
            &mut self.clusters[cluster_ix]
        }
    }

    // Like `copy_cluster` without the copy
    fn cluster_or_empty(&self, cluster_ix: usize) -> &Cluster {
        self.assert_cluster_ix(cluster_ix);
        self.clusters.get(cluster_ix).unwrap_or(&self.empty_cluster)
    }

    /// A copy of cluster `cluster_ix`, or a detached empty cluster if
    /// `cluster_ix` is one past the last cluster. Does not change the view.
    ///
    /// # Panics
    ///
    /// Panics if `cluster_ix > n_clusters()`
    pub fn copy_cluster(&self, cluster_ix: usize) -> Cluster {
        self.cluster_or_empty(cluster_ix).clone()
    }

    /// The change in score from adding `x` to cluster `cluster_ix`, assuming
    /// `x` is not already counted in the view. Does not change the view.
    ///
    /// # Panics
    ///
    /// Panics if `cluster_ix > n_clusters()` or if `x` is not a valid row.
    pub fn calc_cluster_vector_logp(&self, x: &[f64], cluster_ix: usize) -> f64 {
        let cluster = self.cluster_or_empty(cluster_ix);
        let crp_logp =
            crp_predictive_logp(cluster.count(), self.n_vectors, self.crp_alpha);
        crp_logp + cluster.calc_data_logp(x)
    }

    /// The score change of adding `x` to each cluster. The last entry is for a
    /// new cluster, so there are `n_clusters() + 1` entries.
    pub fn calc_cluster_vector_logps(&self, x: &[f64]) -> Vec<f64> {
        let crp_logps =
            crp_predictive_logps(&self.get_cluster_counts(), self.crp_alpha);
        self.clusters
            .iter()
            .chain(std::iter::once(&self.empty_cluster))
            .zip(crp_logps)
            .map(|(cluster, crp_logp)| crp_logp + cluster.calc_data_logp(x))
            .collect()
    }

    /// The normalized log posterior of `x` joining each cluster, with a new
    /// cluster last.
    pub fn calc_cluster_vector_ln_posterior(&self, x: &[f64]) -> Vec<f64> {
        let mut logps = self.calc_cluster_vector_logps(x);
        normalize_logps(&mut logps);
        logps
    }

    /// Assign row `row_ix` with data `x` to cluster `cluster_ix`. Returns the
    /// change in score. The view is unchanged if an error is returned.
    pub fn try_insert_row(
        &mut self,
        x: &[f64],
        cluster_ix: usize,
        row_ix: usize,
    ) -> Result<f64, RowError> {
        self.check_cluster_ix(cluster_ix)?;
        if let Some(assigned_ix) = self.get_cluster_location(row_ix) {
            return Err(RowError::RowAlreadyAssigned {
                row_ix,
                cluster_ix: assigned_ix,
            });
        }
        self.empty_cluster.check_row(x)?;

        self.get_cluster(cluster_ix);
        // Scored before the row arrives
        let score_delta = self.calc_cluster_vector_logp(x, cluster_ix);

        self.clusters[cluster_ix].insert_row(x, row_ix);
        self.cluster_lookup.insert(row_ix, cluster_ix);
        self.score += score_delta;
        self.n_vectors += 1;

        trace!("Inserted row {row_ix} into cluster {cluster_ix} ({score_delta})");
        Ok(score_delta)
    }

    /// Assign row `row_ix` with data `x` to cluster `cluster_ix`. Returns the
    /// change in score.
    ///
    /// # Panics
    ///
    /// Panics if the row is already assigned, if `cluster_ix > n_clusters()`,
    /// or if `x` is not a valid row. Nothing is changed before panicking.
    pub fn insert_row(&mut self, x: &[f64], cluster_ix: usize, row_ix: usize) -> f64 {
        self.try_insert_row(x, cluster_ix, row_ix)
            .unwrap_or_else(|err| panic!("{err}"))
    }

    /// Remove row `row_ix` with data `x` from cluster `cluster_ix`. `x` must
    /// be the data the row was inserted with. Returns the score delta that
    /// was subtracted from the score. The view is unchanged if an error is
    /// returned.
    ///
    /// The view does not keep row data, so removing with different data than
    /// was inserted is not caught here or by [`View::validate`]. It corrupts
    /// the cluster statistics and shows up as a non-zero
    /// [`View::score_drift`].
    pub fn try_remove_row(
        &mut self,
        x: &[f64],
        cluster_ix: usize,
        row_ix: usize,
    ) -> Result<f64, RowError> {
        let assigned_ix = self
            .get_cluster_location(row_ix)
            .ok_or(RowError::RowNotAssigned { row_ix })?;
        if assigned_ix != cluster_ix {
            return Err(RowError::WrongCluster {
                row_ix,
                requested: cluster_ix,
                actual: assigned_ix,
            });
        }
        self.empty_cluster.check_row(x)?;

        self.cluster_lookup.remove(&row_ix);
        self.clusters[cluster_ix].remove_row(x, row_ix);
        self.n_vectors -= 1;

        // Scored after the row leaves
        let score_delta = self.calc_cluster_vector_logp(x, cluster_ix);
        self.score -= score_delta;

        trace!("Removed row {row_ix} from cluster {cluster_ix} ({score_delta})");
        Ok(score_delta)
    }

    /// Remove row `row_ix` with data `x` from cluster `cluster_ix`. Returns
    /// the score delta that was subtracted from the score.
    ///
    /// # Panics
    ///
    /// Panics if the row is not assigned to `cluster_ix` or if `x` is not a
    /// valid row. Nothing is changed before panicking.
    pub fn remove_row(&mut self, x: &[f64], cluster_ix: usize, row_ix: usize) -> f64 {
        self.try_remove_row(x, cluster_ix, row_ix)
            .unwrap_or_else(|err| panic!("{err}"))
    }

    /// The number of rows in each cluster in cluster order
    pub fn get_cluster_counts(&self) -> Vec<usize> {
        self.clusters.iter().map(Cluster::count).collect()
    }

    /// The log CRP prior of the partition
    pub fn get_crp_score(&self) -> f64 {
        partition_log_prior(&self.get_cluster_counts(), self.crp_alpha, None, true)
    }

    /// The log marginal likelihood of the data in every cluster
    pub fn get_data_score(&self) -> f64 {
        self.clusters.iter().map(Cluster::calc_sum_logp).sum()
    }

    /// The score computed from scratch
    pub fn exact_score(&self) -> f64 {
        self.get_crp_score() + self.get_data_score()
    }

    /// How far the running score has wandered from the exact score
    pub fn score_drift(&self) -> f64 {
        self.score - self.exact_score()
    }

    /// Replace the running score with the exact score. Returns the drift that
    /// was removed.
    pub fn refresh_score(&mut self) -> f64 {
        let exact = self.exact_score();
        let drift = self.score - exact;
        if drift.abs() > SCORE_DRIFT_WARN {
            warn!("Score drifted by {drift} over {} rows", self.n_vectors);
        }
        self.score = exact;
        drift
    }

    /// Check the bookkeeping of the view
    pub fn validate(&self) -> ViewDiagnostics {
        ViewDiagnostics::new(self)
    }

    pub(crate) fn cluster_lookup(&self) -> &BTreeMap<usize, usize> {
        &self.cluster_lookup
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "View(n_cols: {}, crp_alpha: {}, n_vectors: {}, score: {})",
            self.n_cols(),
            self.crp_alpha,
            self.n_vectors,
            self.score
        )?;
        writeln!(f, "counts: [{}]", self.get_cluster_counts().iter().join(", "))?;
        for (k, cluster) in self.clusters.iter().enumerate() {
            writeln!(
                f,
                "  cluster {k}: {} rows, logp {}",
                cluster.count(),
                cluster.calc_sum_logp()
            )?;
        }
        Ok(())
    }
}
