pub mod output;

pub use output::{create_writer, AuditOutput, OutputFormat, OutputWriter};
