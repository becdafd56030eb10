/// Numerically stable `log(sum(exp(xs))`
///
/// # Panics
///
/// Panics if `xs` is empty or contains a NaN.
#[inline]
pub fn logsumexp(xs: &[f64]) -> f64 {
    if xs.is_empty() {
        panic!("Empty container");
    } else if xs.len() == 1 {
        xs[0]
    } else {
        let maxval = xs
            .iter()
            .copied()
            .reduce(|max, x| match max.partial_cmp(&x) {
                Some(std::cmp::Ordering::Less) => x,
                Some(_) => max,
                None => panic!("Could not find maxval of {:?}", xs),
            })
            .expect("non-empty");

        if maxval == f64::NEG_INFINITY {
            return maxval;
        }

        xs.iter()
            .fold(0.0_f64, |acc, x| acc + (x - maxval).exp())
            .ln()
            + maxval
    }
}

/// Subtract `logsumexp(logps)` from each entry so that the entries are
/// normalized log probabilities. Returns the normalizer.
///
/// # Example
///
/// ```
/// # use vista_utils::{normalize_logps, logsumexp};
/// let mut logps = vec![-1.0, -2.0, -0.5];
/// normalize_logps(&mut logps);
///
/// assert!(logsumexp(&logps).abs() < 1E-12);
/// ```
pub fn normalize_logps(logps: &mut [f64]) -> f64 {
    let z = logsumexp(logps);
    logps.iter_mut().for_each(|lp| *lp -= z);
    z
}

/// Returns the index of the largest element in xs.
///
/// If there are multiple largest elements, returns the index of the first.
///
/// # Panics
///
/// Panics if `xs` is empty
pub fn argmax<T: PartialOrd>(xs: &[T]) -> usize {
    if xs.is_empty() {
        panic!("Empty container");
    }

    let mut max_ix = 0;
    for (ix, x) in xs.iter().enumerate().skip(1) {
        if *x > xs[max_ix] {
            max_ix = ix;
        }
    }
    max_ix
}
