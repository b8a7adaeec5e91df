//! Application layer containing the commission calculation.
//!
//! `CommissionEngine` is a pure function of a configuration and a user context.
//! It keeps nothing between calls, so hosts re-evaluate it whenever the context
//! changes.

pub mod engine;
