//! Process-local country store
//!
//! Backs the `memory` database target and the test suites.

pub mod store;

pub use store::MemoryCountryStore;
