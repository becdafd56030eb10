use super::View;

use crate::error::ViewError;

/// Checks of the bookkeeping invariants of a `View`
///
/// Only row membership and counts are checked. Row data is not kept, so a row
/// removed with data other than what it was inserted with goes unnoticed
/// here; use `View::score_drift` to catch it.
#[derive(Clone, Debug)]
pub struct ViewDiagnostics {
    /// The sum of the cluster counts should be `n_vectors`
    counts_sum_to_n_vectors: bool,
    /// Every assigned row should have an entry in the lookup
    lookup_size_is_n_vectors: bool,
    /// Every lookup entry should point at an existing cluster
    lookup_indices_in_bounds: bool,
    /// A row is a member of cluster `k` exactly when the lookup says `k`
    lookup_agrees_with_membership: bool,
}

impl ViewDiagnostics {
    pub fn new(view: &View) -> Self {
        let lookup = view.cluster_lookup();
        let clusters = view.clusters();
        ViewDiagnostics {
            counts_sum_to_n_vectors: {
                let n: usize = view.get_cluster_counts().iter().sum();
                n == view.n_vectors()
            },
            lookup_size_is_n_vectors: { lookup.len() == view.n_vectors() },
            lookup_indices_in_bounds: {
                lookup.values().all(|&k| k < clusters.len())
            },
            lookup_agrees_with_membership: {
                let members_found = lookup.iter().all(|(&row_ix, &k)| {
                    clusters.get(k).is_some_and(|c| c.contains(row_ix))
                });
                let no_strays = clusters.iter().enumerate().all(|(k, c)| {
                    c.rows().all(|row_ix| lookup.get(&row_ix) == Some(&k))
                });
                members_found && no_strays
            },
        }
    }

    /// `true` if none of the diagnostics was violated
    pub fn is_valid(&self) -> bool {
        self.counts_sum_to_n_vectors
            && self.lookup_size_is_n_vectors
            && self.lookup_indices_in_bounds
            && self.lookup_agrees_with_membership
    }

    pub fn counts_sum_to_n_vectors(&self) -> Result<(), ViewError> {
        if self.counts_sum_to_n_vectors {
            Ok(())
        } else {
            Err(ViewError::CountsDoNotSumToNVectors)
        }
    }

    pub fn lookup_size_is_n_vectors(&self) -> Result<(), ViewError> {
        if self.lookup_size_is_n_vectors {
            Ok(())
        } else {
            Err(ViewError::LookupSizeIsNotNVectors)
        }
    }

    pub fn lookup_indices_in_bounds(&self) -> Result<(), ViewError> {
        if self.lookup_indices_in_bounds {
            Ok(())
        } else {
            Err(ViewError::LookupIndexOutOfBounds)
        }
    }

    pub fn lookup_agrees_with_membership(&self) -> Result<(), ViewError> {
        if self.lookup_agrees_with_membership {
            Ok(())
        } else {
            Err(ViewError::LookupDisagreesWithMembership)
        }
    }

    /// The first violated diagnostic, if any
    pub fn emit_error(&self) -> Result<(), ViewError> {
        let mut results = vec![
            self.counts_sum_to_n_vectors(),
            self.lookup_size_is_n_vectors(),
            self.lookup_indices_in_bounds(),
            self.lookup_agrees_with_membership(),
        ];
        results.drain(..).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn view_with_rows() -> View {
        let mut view = View::new(1, 1.0).unwrap();
        view.insert_row(&[0.0], 0, 0);
        view.insert_row(&[1.0], 1, 1);
        view.insert_row(&[2.0], 1, 2);
        view
    }

    #[test]
    fn empty_view_is_valid() {
        let view = View::new(2, 1.0).unwrap();
        assert!(view.validate().is_valid());
        assert_eq!(view.validate().emit_error(), Ok(()));
    }

    #[test]
    fn view_with_emptied_cluster_is_valid() {
        let mut view = view_with_rows();
        view.remove_row(&[0.0], 0, 0);
        let diagnostics = view.validate();
        assert!(diagnostics.is_valid());
    }

    #[test]
    fn lookup_pointing_nowhere_is_caught() {
        let mut view = view_with_rows();
        view.cluster_lookup.insert(2, 5);

        let diagnostics = view.validate();
        assert!(!diagnostics.is_valid());
        assert_eq!(
            diagnostics.lookup_indices_in_bounds(),
            Err(ViewError::LookupIndexOutOfBounds)
        );
        assert_eq!(
            diagnostics.emit_error(),
            Err(ViewError::LookupIndexOutOfBounds)
        );
    }

    #[test]
    fn stale_lookup_is_caught() {
        let mut view = view_with_rows();
        view.cluster_lookup.insert(2, 0);
        assert_eq!(
            view.validate().emit_error(),
            Err(ViewError::LookupDisagreesWithMembership)
        );
    }

    #[test]
    fn bad_n_vectors_is_caught() {
        let mut view = view_with_rows();
        view.n_vectors = 4;
        assert_eq!(
            view.validate().emit_error(),
            Err(ViewError::CountsDoNotSumToNVectors)
        );
    }
}
