pub mod context_reader;
pub mod earnings_writer;
