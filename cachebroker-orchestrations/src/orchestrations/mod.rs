//! Lifecycle orchestrations of [`crate::CacheBroker`]
//!
//! Each operation makes at most one lifecycle call on the backend and returns
//! without waiting for the cluster to converge; the platform polls
//! `last_operation` for the outcome.

mod bind;
mod deprovision;
mod last_operation;
mod provision;
mod update;

#[cfg(test)]
pub(crate) mod fixtures;
