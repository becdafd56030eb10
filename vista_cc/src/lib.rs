#![warn(
    clippy::all,
    clippy::imprecise_flops,
    clippy::suboptimal_flops,
    clippy::unseparated_literal_suffix,
    clippy::unreadable_literal,
    clippy::option_option,
    clippy::implicit_clone
)]
//! Partition bookkeeping and incremental scoring for a single
//! Dirichlet-process mixture view.
pub mod cluster;
pub mod component;
pub mod config;
pub mod error;
pub mod traits;
pub mod view;

pub use cluster::Cluster;
pub use config::{ColType, ViewConfig};
pub use error::{BuildViewError, RowError, ViewError};
pub use view::View;
