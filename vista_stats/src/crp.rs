//! Chinese Restaurant Process predictive and partition probabilities

#[inline]
fn ln_gamma(x: f64) -> f64 {
    ::special::Gamma::ln_gamma(x).0
}

/// Log probability that the next item joins a cluster of size
/// `cluster_count` given `total_count` items already seated.
///
/// A `cluster_count` of zero denotes a new cluster, which is weighted by
/// `alpha` rather than by its size.
///
/// # Example
///
/// ```
/// # use vista_stats::crp_predictive_logp;
/// // two of three items sit in the cluster
/// let logp = crp_predictive_logp(2, 3, 1.0);
/// assert!((logp - 0.5_f64.ln()).abs() < 1E-12);
/// ```
#[inline]
pub fn crp_predictive_logp(
    cluster_count: usize,
    total_count: usize,
    alpha: f64,
) -> f64 {
    let weight = if cluster_count == 0 {
        alpha
    } else {
        cluster_count as f64
    };
    weight.ln() - (total_count as f64 + alpha).ln()
}

/// The predictive log probability of the next item joining each of the
/// clusters in `counts` followed by the log probability of it starting a new
/// cluster. The entries are normalized.
pub fn crp_predictive_logps(counts: &[usize], alpha: f64) -> Vec<f64> {
    let n: usize = counts.iter().sum();
    counts
        .iter()
        .map(|&ct| crp_predictive_logp(ct, n, alpha))
        .chain(std::iter::once(crp_predictive_logp(0, n, alpha)))
        .collect()
}

/// Log prior probability of a partition under CRP(`alpha`) via the Ewens
/// sampling formula.
///
/// Zero entries in `counts` are empty clusters, not blocks of the partition,
/// and are ignored. The number of items defaults to the sum of `counts`;
/// `total` overrides it. When `absolute` is `false` the count-dependent term,
/// `sum_k ln Γ(n_k)`, is left out, which is all that is needed when comparing
/// values of `alpha` for a fixed partition.
pub fn partition_log_prior(
    counts: &[usize],
    alpha: f64,
    total: Option<usize>,
    absolute: bool,
) -> f64 {
    let (n_blocks, sum_counts) = counts
        .iter()
        .filter(|&&ct| ct > 0)
        .fold((0_usize, 0_usize), |(k, n), &ct| (k + 1, n + ct));

    let n = total.unwrap_or(sum_counts);
    let ln_alpha_part = (n_blocks as f64)
        .mul_add(alpha.ln(), ln_gamma(alpha) - ln_gamma(n as f64 + alpha));

    if absolute {
        let ln_counts_part = counts
            .iter()
            .filter(|&&ct| ct > 0)
            .map(|&ct| ln_gamma(ct as f64))
            .sum::<f64>();
        ln_alpha_part + ln_counts_part
    } else {
        ln_alpha_part
    }
}

/// Log CRP probability of the partition with block sizes `cts` over `n`
/// items. Every entry of `cts` must be non-zero.
pub fn lcrp(n: usize, cts: &[usize], alpha: f64) -> f64 {
    let k: f64 = cts.len() as f64;
    let gsum = cts.iter().fold(0.0, |acc, ct| acc + ln_gamma(*ct as f64));
    let cpnt_2 = ln_gamma(alpha) - ln_gamma(n as f64 + alpha);
    gsum + k.mul_add(alpha.ln(), cpnt_2)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::*;
    use rand::seq::SliceRandom;
    use rand::SeedableRng;
    use rand_xoshiro::Xoshiro256Plus;
    use vista_utils::logsumexp;

    const TOL: f64 = 1E-12;

    #[test]
    fn predictive_logp_existing_cluster() {
        let logp = crp_predictive_logp(2, 3, 1.0);
        assert_relative_eq!(logp, -0.693_147_180_559_945_3, epsilon = TOL);
    }

    #[test]
    fn predictive_logp_new_cluster_uses_alpha() {
        let logp = crp_predictive_logp(0, 3, 0.5);
        assert_relative_eq!(logp, -1.945_910_149_055_313_3, epsilon = TOL);
    }

    #[test]
    fn predictive_logp_first_item_is_certain() {
        let logp = crp_predictive_logp(0, 0, 2.3);
        assert_relative_eq!(logp, 0.0, epsilon = TOL);
    }

    #[test]
    fn predictive_logps_are_normalized() {
        let counts = vec![4, 1, 7, 2];
        let logps = crp_predictive_logps(&counts, 1.7);

        assert_eq!(logps.len(), 5);
        assert_relative_eq!(logsumexp(&logps), 0.0, epsilon = 1E-10);
        assert_relative_eq!(
            logps[4],
            (1.7_f64 / 15.7).ln(),
            epsilon = TOL
        );
    }

    #[test]
    fn partition_log_prior_by_hand() {
        // seq: new (2/2), join (1/3), join (2/4), new (2/5) => 1/15
        let lp = partition_log_prior(&[3, 1], 2.0, None, true);
        assert_relative_eq!(lp, -2.708_050_201_102_210_3, epsilon = 1E-10);
    }

    #[test]
    fn partition_log_prior_without_count_term() {
        let lp = partition_log_prior(&[3, 1], 2.0, None, false);
        assert_relative_eq!(lp, -3.401_197_381_662_155_5, epsilon = 1E-10);
    }

    #[test]
    fn partition_log_prior_ignores_empty_clusters() {
        let lp_a = partition_log_prior(&[2, 1], 1.0, None, true);
        let lp_b = partition_log_prior(&[2, 0, 1, 0], 1.0, None, true);
        assert_relative_eq!(lp_a, -6.0_f64.ln(), epsilon = TOL);
        assert_relative_eq!(lp_a, lp_b, epsilon = TOL);
    }

    #[test]
    fn partition_log_prior_with_total_override() {
        let lp = partition_log_prior(&[1, 1], 1.0, Some(5), false);
        assert_relative_eq!(lp, -120.0_f64.ln(), epsilon = 1E-10);
    }

    #[test]
    fn partition_log_prior_of_empty_partition_is_zero() {
        assert_relative_eq!(
            partition_log_prior(&[], 1.5, None, true),
            0.0,
            epsilon = TOL
        );
        assert_relative_eq!(
            partition_log_prior(&[0, 0], 1.5, None, true),
            0.0,
            epsilon = TOL
        );
    }

    #[test]
    fn lcrp_all_ones() {
        let lcrp_1 = lcrp(4, &[1, 1, 1, 1], 1.0);
        assert_relative_eq!(lcrp_1, -3.178_053_830_347_95, epsilon = 10E-8);

        let lcrp_2 = lcrp(4, &[1, 1, 1, 1], 2.1);
        assert_relative_eq!(lcrp_2, -1.945_817_590_743_51, epsilon = 10E-8);
    }

    #[test]
    fn lcrp_agrees_with_partition_log_prior() {
        let cts = vec![5, 1, 3, 3];
        for &alpha in &[0.3, 1.0, 4.2] {
            assert_relative_eq!(
                lcrp(12, &cts, alpha),
                partition_log_prior(&cts, alpha, None, true),
                epsilon = 1E-10
            );
        }
    }

    #[test]
    fn sequential_predictive_matches_partition_prior_in_any_order() {
        let mut rng = Xoshiro256Plus::seed_from_u64(1337);
        let mut asgn: Vec<usize> =
            vec![0, 0, 0, 1, 1, 2, 3, 3, 3, 3, 4, 0, 2];
        let expected = partition_log_prior(&[4, 2, 2, 4, 1], 0.8, None, true);

        for _ in 0..20 {
            asgn.shuffle(&mut rng);
            let mut counts = vec![0_usize; 5];
            let logp = asgn.iter().enumerate().fold(0.0, |acc, (n, &z)| {
                let lp = crp_predictive_logp(counts[z], n, 0.8);
                counts[z] += 1;
                acc + lp
            });
            assert_relative_eq!(logp, expected, epsilon = 1E-10);
        }
    }
}
