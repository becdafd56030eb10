#![warn(unused_extern_crates)]
#![warn(
    clippy::all,
    clippy::imprecise_flops,
    clippy::suboptimal_flops,
    clippy::unseparated_literal_suffix,
    clippy::unreadable_literal,
    clippy::option_option,
    clippy::implicit_clone
)]
//! Closed-form probabilities for Chinese Restaurant Process partitions
pub mod crp;

pub use crp::{
    crp_predictive_logp, crp_predictive_logps, lcrp, partition_log_prior,
};
pub use vista_consts::rv;
