//! Incremental scoring of a single Dirichlet process mixture view.
//!
//! A [`View`] holds a partition of rows into clusters under a Chinese
//! Restaurant Process prior and keeps a running log joint probability of the
//! partition and the data. A sampler outside of the view decides where rows
//! go; the view scores each candidate cluster and keeps the books.
//!
//! # Example
//!
//! Build a view of two continuous columns and place three rows.
//!
//! ```rust
//! use vista::View;
//!
//! let mut view = View::new(2, 1.0).unwrap();
//!
//! view.insert_row(&[1.0, 2.0], 0, 0);
//! view.insert_row(&[1.1, 2.1], 0, 1);
//! view.insert_row(&[9.0, -9.0], 1, 2);
//!
//! assert_eq!(view.get_cluster_counts(), vec![2, 1]);
//! assert_eq!(view.get_cluster_location(2), Some(1));
//! ```
//!
//! Score a new row against every cluster. The last entry is for a new
//! cluster.
//!
//! ```rust
//! # use vista::View;
//! # let mut view = View::new(2, 1.0).unwrap();
//! # view.insert_row(&[1.0, 2.0], 0, 0);
//! # view.insert_row(&[1.1, 2.1], 0, 1);
//! # view.insert_row(&[9.0, -9.0], 1, 2);
//! let logps = view.calc_cluster_vector_logps(&[1.05, 2.05]);
//! assert_eq!(logps.len(), 3);
//! assert_eq!(vista::utils::argmax(&logps), 0);
//! ```
//!
//! Removing the last row of a cluster leaves the cluster in place, so the
//! cluster indices a caller holds stay valid.
//!
//! ```rust
//! # use vista::View;
//! # let mut view = View::new(2, 1.0).unwrap();
//! # view.insert_row(&[1.0, 2.0], 0, 0);
//! # view.insert_row(&[1.1, 2.1], 0, 1);
//! # view.insert_row(&[9.0, -9.0], 1, 2);
//! view.remove_row(&[9.0, -9.0], 1, 2);
//! assert_eq!(view.get_cluster_counts(), vec![2, 0]);
//! assert_eq!(view.n_vectors(), 2);
//! ```
//!
//! Views with categorical columns are built from a [`ViewConfig`].
//!
//! ```rust
//! use vista::{ViewBuilder, ViewConfig};
//!
//! let config: ViewConfig = serde_yaml::from_str(
//!     "
//! crp_alpha: 0.5
//! col_types:
//!   - !continuous {}
//!   - !categorical
//!     k: 3
//! ",
//! )
//! .unwrap();
//!
//! let mut view = ViewBuilder::from_config(config).build().unwrap();
//! view.insert_row(&[0.2, 2.0], 0, 0);
//! assert!(view.try_insert_row(&[0.2, 3.0], 0, 1).is_err());
//! ```
#![warn(unused_extern_crates)]
#![warn(
    clippy::all,
    clippy::imprecise_flops,
    clippy::suboptimal_flops,
    clippy::unseparated_literal_suffix,
    clippy::unreadable_literal,
    clippy::option_option,
    clippy::implicit_clone,
    clippy::perf
)]

pub use vista_cc::view::Builder as ViewBuilder;
pub use vista_cc::view::ViewDiagnostics;
pub use vista_cc::{
    BuildViewError, Cluster, ColType, RowError, View, ViewConfig, ViewError,
};

pub mod consts {
    pub use vista_consts::*;
}

pub mod cc {
    pub use vista_cc::*;
}

pub mod stats {
    pub use vista_stats::*;
}

pub mod utils {
    pub use vista_utils::*;
}
