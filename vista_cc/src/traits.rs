use std::fmt::Debug;

use vista_stats::rv::data::{CategoricalSuffStat, GaussianSuffStat};
use vista_stats::rv::dist::{
    Categorical, Gaussian, NormalInvChiSquared, SymmetricDirichlet,
};
use vista_stats::rv::traits::{ConjugatePrior, HasSuffStat, Rv};

/// A vista-ready datum.
pub trait VistaDatum: Sync + Send + Clone + Debug {}

impl<X> VistaDatum for X where X: Sync + Send + Clone + Debug {}

/// A vista-ready sufficient statistic.
pub trait VistaStat: Sync + Send + Clone + Debug + PartialEq {}

impl<X> VistaStat for X where X: Sync + Send + Clone + Debug + PartialEq {}

/// A vista-ready likelihood function, f(x).
pub trait VistaLikelihood<X: VistaDatum>:
    Rv<X> + HasSuffStat<X> + Sync + Send + Clone + Debug
{
}

impl<X, Fx> VistaLikelihood<X> for Fx
where
    X: VistaDatum,
    Fx: Rv<X> + HasSuffStat<X> + Sync + Send + Clone + Debug,
{
}

/// A vista-ready prior π(f)
pub trait VistaPrior<X: VistaDatum, Fx: VistaLikelihood<X>>:
    ConjugatePrior<X, Fx> + Sync + Send + Clone + Debug
{
    /// Create an empty sufficient statistic for a component
    fn empty_suffstat(&self) -> Fx::Stat;

    /// Read a row-vector cell as a datum of this column. Returns `None` if
    /// the cell is not in the support of the likelihood.
    fn translate_cell(&self, cell: f64) -> Option<X>;
}

impl VistaPrior<f64, Gaussian> for NormalInvChiSquared {
    fn empty_suffstat(&self) -> GaussianSuffStat {
        GaussianSuffStat::new()
    }

    fn translate_cell(&self, cell: f64) -> Option<f64> {
        cell.is_finite().then_some(cell)
    }
}

impl VistaPrior<u8, Categorical> for SymmetricDirichlet {
    fn empty_suffstat(&self) -> CategoricalSuffStat {
        CategoricalSuffStat::new(self.k())
    }

    // Categories are stored in the row vector as integral floats
    fn translate_cell(&self, cell: f64) -> Option<u8> {
        let in_support =
            cell >= 0.0 && cell.fract() == 0.0 && cell < self.k() as f64;
        if in_support && cell <= f64::from(u8::MAX) {
            Some(cell as u8)
        } else {
            None
        }
    }
}
