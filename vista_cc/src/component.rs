//! Conjugate component data structure
use std::fmt::Debug;
use std::sync::OnceLock;

use vista_stats::rv::data::DataOrSuffStat;
use vista_stats::rv::traits::{ConjugatePrior, SuffStat};

use crate::traits::{VistaDatum, VistaLikelihood, VistaPrior, VistaStat};

/// Maintains a conjugate prior and a sufficient statistic capturing the data
/// assigned to the component. The component parameters are always
/// marginalized away.
#[derive(Clone, Debug)]
pub struct ConjugateComponent<X, Fx, Pr>
where
    X: VistaDatum,
    Fx: VistaLikelihood<X>,
    Fx::Stat: VistaStat,
    Pr: VistaPrior<X, Fx>,
    Pr::LnPpCache: Send + Sync + Clone + Debug,
{
    pub prior: Pr,
    pub stat: Fx::Stat,
    ln_pp_cache: OnceLock<Pr::LnPpCache>,
}

impl<X, Fx, Pr> ConjugateComponent<X, Fx, Pr>
where
    X: VistaDatum,
    Fx: VistaLikelihood<X>,
    Fx::Stat: VistaStat,
    Pr: VistaPrior<X, Fx>,
    Pr::LnPpCache: Send + Sync + Clone + Debug,
{
    /// Create a new ConjugateComponent with no observations
    #[inline]
    pub fn new(prior: Pr) -> Self {
        let stat = prior.empty_suffstat();
        ConjugateComponent {
            prior,
            stat,
            ln_pp_cache: OnceLock::new(),
        }
    }

    /// The number of observations
    #[inline]
    pub fn n(&self) -> usize {
        self.stat.n()
    }

    /// Return the observations
    #[inline]
    pub fn obs(&self) -> DataOrSuffStat<'_, X, Fx> {
        DataOrSuffStat::SuffStat(&self.stat)
    }

    #[inline]
    pub fn reset_ln_pp_cache(&mut self) {
        self.ln_pp_cache = OnceLock::new()
    }

    #[inline]
    pub fn ln_pp_cache(&self) -> &Pr::LnPpCache {
        self.ln_pp_cache
            .get_or_init(|| self.prior.ln_pp_cache(&self.obs()))
    }

    #[inline]
    pub fn observe(&mut self, x: &X) {
        self.reset_ln_pp_cache();
        self.stat.observe(x);
    }

    #[inline]
    pub fn forget(&mut self, x: &X) {
        self.reset_ln_pp_cache();
        self.stat.forget(x);
    }

    /// Log posterior predictive of `x` given the observations
    #[inline]
    pub fn ln_pp(&self, x: &X) -> f64 {
        self.prior.ln_pp_with_cache(self.ln_pp_cache(), x)
    }

    /// Log marginal likelihood of the observations
    #[inline]
    pub fn ln_m(&self) -> f64 {
        self.prior.ln_m(&self.obs())
    }
}
