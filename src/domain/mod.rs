//! Domain model: the configuration, the affiliate's standing, and the earnings
//! produced from them.

pub mod config;
pub mod context;
pub mod earnings;
pub mod money;
pub mod ports;
pub mod tier;
