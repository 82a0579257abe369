//! Output module: console/markdown/JSON rendering and spreadsheet export

pub mod formatter;
pub mod report;
pub mod xlsx;
