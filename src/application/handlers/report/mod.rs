//! Report handlers.

mod generate_report;

pub use generate_report::{GenerateReportCommand, GenerateReportHandler, GeneratedReport};
