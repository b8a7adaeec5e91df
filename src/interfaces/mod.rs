//! Adapters between the outside world and the domain: the JSON configuration
//! document and the batch CSV formats used by the command line tool.

pub mod csv;
pub mod json;
