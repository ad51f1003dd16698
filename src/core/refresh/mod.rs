//! The country refresh pipeline
//!
//! - [`validator`] - Raw record validation and normalization
//! - [`estimator`] - Exchange rate lookup and estimated GDP
//! - [`engine`] - Fetch, reconcile and commit as one unit of work
//! - [`outcome`] - Report, error and caller-facing result types

pub mod engine;
pub mod estimator;
pub mod outcome;
pub mod validator;

pub use engine::ReconciliationEngine;
pub use estimator::{
    Estimate, FixedMultiplier, GdpEstimator, MultiplierSource, RandomMultiplier, MULTIPLIER_MAX,
    MULTIPLIER_MIN,
};
pub use outcome::{RefreshError, RefreshReport, RefreshResult};
pub use validator::validate;
