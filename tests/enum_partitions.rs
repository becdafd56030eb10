//! Partition enumeration tests
//!
//! Scores every partition of a small data set by insertion and checks the
//! scores against the closed-form CRP prior and against each other.
use approx::*;
use rand::SeedableRng;
use rand_distr::{Distribution, Normal};
use rand_xoshiro::Xoshiro256Plus;

use vista::stats::lcrp;
use vista::utils::logsumexp;
use vista::View;

/// All partitions of `n` items as restricted growth strings
fn partitions(n: usize) -> Vec<Vec<usize>> {
    fn grow(z: &mut Vec<usize>, n: usize, out: &mut Vec<Vec<usize>>) {
        if z.len() == n {
            out.push(z.clone());
            return;
        }
        let n_cats = z.iter().max().map_or(0, |&k| k + 1);
        for k in 0..=n_cats {
            z.push(k);
            grow(z, n, out);
            z.pop();
        }
    }

    let mut out = Vec::new();
    grow(&mut Vec::with_capacity(n), n, &mut out);
    out
}

fn view_from_partition(rows: &[Vec<f64>], z: &[usize], alpha: f64) -> View {
    let mut view = View::new(rows[0].len(), alpha).unwrap();
    for (row_ix, (x, &k)) in rows.iter().zip(z.iter()).enumerate() {
        view.insert_row(x, k, row_ix);
    }
    view
}

fn gen_rows(n: usize, n_cols: usize, seed: u64) -> Vec<Vec<f64>> {
    let mut rng = Xoshiro256Plus::seed_from_u64(seed);
    let gauss = Normal::new(1.0, 2.0).unwrap();
    (0..n)
        .map(|_| (0..n_cols).map(|_| gauss.sample(&mut rng)).collect())
        .collect()
}

#[test]
fn bell_numbers() {
    let bell: Vec<usize> = (1..=6).map(|n| partitions(n).len()).collect();
    assert_eq!(bell, vec![1, 2, 5, 15, 52, 203]);
}

#[test]
fn crp_prior_sums_to_one_over_all_partitions() {
    let n = 5;
    let rows = gen_rows(n, 1, 1);
    for alpha in [0.5, 1.0, 3.2] {
        let crp_scores: Vec<f64> = partitions(n)
            .iter()
            .map(|z| view_from_partition(&rows, z, alpha).get_crp_score())
            .collect();
        assert_relative_eq!(logsumexp(&crp_scores), 0.0, epsilon = 1E-10);
    }
}

#[test]
fn running_score_matches_exact_score_for_every_partition() {
    let n = 5;
    let rows = gen_rows(n, 2, 2);
    for z in partitions(n) {
        let view = view_from_partition(&rows, &z, 1.1);
        assert_relative_eq!(view.score(), view.exact_score(), epsilon = 1E-9);

        let counts = view.get_cluster_counts();
        assert_relative_eq!(
            view.get_crp_score(),
            lcrp(n, &counts, 1.1),
            epsilon = 1E-10
        );
    }
}

#[test]
fn last_row_posterior_matches_enumeration() {
    // Fix the partition of the first n-1 rows, and compare the posterior of
    // the last row over all of its placements with the normalized joint
    // scores of the completed partitions.
    let n = 5;
    let rows = gen_rows(n, 2, 3);
    let alpha = 0.8;

    for z_head in partitions(n - 1) {
        let head = view_from_partition(&rows[..n - 1], &z_head, alpha);
        let ln_post = head.calc_cluster_vector_ln_posterior(&rows[n - 1]);

        let joints: Vec<f64> = (0..=head.n_clusters())
            .map(|k| {
                let mut z = z_head.clone();
                z.push(k);
                view_from_partition(&rows, &z, alpha).exact_score()
            })
            .collect();
        let norm = logsumexp(&joints);

        for (lp, joint) in ln_post.iter().zip(joints.iter()) {
            assert_relative_eq!(*lp, joint - norm, epsilon = 1E-9);
        }
    }
}
