//! A cluster of rows and the sufficient statistics of their data
use std::collections::BTreeSet;
use std::fmt::Debug;

use enum_dispatch::enum_dispatch;
use vista_stats::rv::dist::{
    Categorical, Gaussian, NormalInvChiSquared, SymmetricDirichlet,
};

use crate::component::ConjugateComponent;
use crate::config::ColType;
use crate::error::RowError;
use crate::traits::{VistaDatum, VistaLikelihood, VistaPrior, VistaStat};

/// The statistics of one column of one cluster, addressed by row-vector cell
#[enum_dispatch(ColComponent)]
pub trait CellModel {
    /// The number of observed cells
    fn n_obs(&self) -> usize;
    /// Whether `cell` is in the support of the column
    fn accepts(&self, cell: f64) -> bool;
    fn observe_cell(&mut self, cell: f64);
    fn forget_cell(&mut self, cell: f64);
    /// Log posterior predictive of `cell` given the observed cells
    fn ln_pp_cell(&self, cell: f64) -> f64;
    /// Log marginal likelihood of the observed cells
    fn ln_m_cells(&self) -> f64;
}

impl<X, Fx, Pr> ConjugateComponent<X, Fx, Pr>
where
    X: VistaDatum,
    Fx: VistaLikelihood<X>,
    Fx::Stat: VistaStat,
    Pr: VistaPrior<X, Fx>,
    Pr::LnPpCache: Send + Sync + Clone + Debug,
{
    fn translate(&self, cell: f64) -> X {
        self.prior
            .translate_cell(cell)
            .unwrap_or_else(|| panic!("Invalid cell value {cell}"))
    }
}

impl<X, Fx, Pr> CellModel for ConjugateComponent<X, Fx, Pr>
where
    X: VistaDatum,
    Fx: VistaLikelihood<X>,
    Fx::Stat: VistaStat,
    Pr: VistaPrior<X, Fx>,
    Pr::LnPpCache: Send + Sync + Clone + Debug,
{
    fn n_obs(&self) -> usize {
        self.n()
    }

    fn accepts(&self, cell: f64) -> bool {
        self.prior.translate_cell(cell).is_some()
    }

    fn observe_cell(&mut self, cell: f64) {
        let x = self.translate(cell);
        self.observe(&x);
    }

    fn forget_cell(&mut self, cell: f64) {
        let x = self.translate(cell);
        self.forget(&x);
    }

    fn ln_pp_cell(&self, cell: f64) -> f64 {
        self.ln_pp(&self.translate(cell))
    }

    fn ln_m_cells(&self) -> f64 {
        self.ln_m()
    }
}

/// The column component of a cluster
#[enum_dispatch]
#[derive(Clone, Debug)]
pub enum ColComponent {
    Continuous(ConjugateComponent<f64, Gaussian, NormalInvChiSquared>),
    Categorical(ConjugateComponent<u8, Categorical, SymmetricDirichlet>),
}

/// A cluster of rows
///
/// Holds one conjugate component per column and the identities of the rows
/// whose data the components have observed.
#[derive(Clone, Debug)]
pub struct Cluster {
    components: Vec<ColComponent>,
    rows: BTreeSet<usize>,
}

impl Cluster {
    /// An empty cluster with one component per column type
    pub fn new(col_types: &[ColType]) -> Self {
        Cluster {
            components: col_types.iter().map(ColType::component).collect(),
            rows: BTreeSet::new(),
        }
    }

    /// An empty cluster of `n_cols` continuous columns with default priors
    pub fn continuous(n_cols: usize) -> Self {
        Self::new(&vec![ColType::continuous(); n_cols])
    }

    /// The dimension of the row vectors
    #[inline]
    pub fn n_cols(&self) -> usize {
        self.components.len()
    }

    /// The number of rows in the cluster
    #[inline]
    pub fn count(&self) -> usize {
        self.rows.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Whether the row `row_ix` is a member of this cluster
    #[inline]
    pub fn contains(&self, row_ix: usize) -> bool {
        self.rows.contains(&row_ix)
    }

    /// The member rows in ascending order
    pub fn rows(&self) -> impl Iterator<Item = usize> + '_ {
        self.rows.iter().copied()
    }

    pub fn components(&self) -> &[ColComponent] {
        &self.components
    }

    /// Check that `x` has one valid cell per column
    pub fn check_row(&self, x: &[f64]) -> Result<(), RowError> {
        if x.len() != self.n_cols() {
            return Err(RowError::DimensionMismatch {
                n_cols: self.n_cols(),
                n: x.len(),
            });
        }
        self.components.iter().zip(x.iter()).enumerate().try_for_each(
            |(col_ix, (cpnt, &value))| {
                if cpnt.accepts(value) {
                    Ok(())
                } else {
                    Err(RowError::InvalidCell { col_ix, value })
                }
            },
        )
    }

    fn assert_row(&self, x: &[f64]) {
        if let Err(err) = self.check_row(x) {
            panic!("{err}");
        }
    }

    /// Add the row `row_ix` with data `x` to the cluster
    ///
    /// # Panics
    ///
    /// Panics if the row is already a member or if `x` is not a valid row.
    pub fn insert_row(&mut self, x: &[f64], row_ix: usize) {
        self.assert_row(x);
        assert!(
            self.rows.insert(row_ix),
            "Row {row_ix} is already in the cluster"
        );
        self.components
            .iter_mut()
            .zip(x.iter())
            .for_each(|(cpnt, &cell)| cpnt.observe_cell(cell));
    }

    /// Remove the row `row_ix` with data `x` from the cluster. `x` must be the
    /// data the row was inserted with.
    ///
    /// # Panics
    ///
    /// Panics if the row is not a member or if `x` is not a valid row.
    pub fn remove_row(&mut self, x: &[f64], row_ix: usize) {
        self.assert_row(x);
        assert!(
            self.rows.remove(&row_ix),
            "Row {row_ix} is not in the cluster"
        );
        self.components
            .iter_mut()
            .zip(x.iter())
            .for_each(|(cpnt, &cell)| cpnt.forget_cell(cell));
    }

    /// The log likelihood of `x` joining the cluster with the component
    /// parameters marginalized away. Does not change the cluster.
    pub fn calc_data_logp(&self, x: &[f64]) -> f64 {
        self.assert_row(x);
        self.components
            .iter()
            .zip(x.iter())
            .map(|(cpnt, &cell)| cpnt.ln_pp_cell(cell))
            .sum()
    }

    /// The joint log marginal likelihood of the data in the cluster. Zero for
    /// an empty cluster.
    pub fn calc_sum_logp(&self) -> f64 {
        self.components.iter().map(CellModel::ln_m_cells).sum()
    }
}
