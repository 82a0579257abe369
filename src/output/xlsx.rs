//! Spreadsheet export of the full ranking

use crate::error::Result;
use crate::processing::ranker::Ranking;
use log::info;
use rust_xlsxwriter::{Format, FormatBorder, Workbook};
use std::path::Path;

pub const REPORT_FILE_NAME: &str = "ranked_resumes.xlsx";
pub const REPORT_MIME_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";
pub const SHEET_NAME: &str = "Ranked Resumes";
pub const NAME_HEADER: &str = "Resume Name";
pub const SCORE_HEADER: &str = "Similarity Score";

/// Serialize the ranking into a complete XLSX workbook held in memory.
pub fn export(ranking: &Ranking) -> Result<Vec<u8>> {
    export_with_sheet_name(ranking, SHEET_NAME)
}

/// One header row, then one row per candidate in ranking order with the
/// score multiplied by 100.
pub fn export_with_sheet_name(ranking: &Ranking, sheet_name: &str) -> Result<Vec<u8>> {
    let mut workbook = Workbook::new();
    let header = Format::new().set_bold().set_border(FormatBorder::Thin);

    let worksheet = workbook.add_worksheet();
    worksheet.set_name(sheet_name)?;
    worksheet.write_string_with_format(0, 0, NAME_HEADER, &header)?;
    worksheet.write_string_with_format(0, 1, SCORE_HEADER, &header)?;

    for (i, candidate) in ranking.iter().enumerate() {
        let row = (i + 1) as u32;
        worksheet.write_string(row, 0, candidate.name.as_str())?;
        worksheet.write_number(row, 1, candidate.percentage())?;
    }

    worksheet.set_column_width(0, 40)?;
    worksheet.set_column_width(1, 18)?;

    Ok(workbook.save_to_buffer()?)
}

/// A materialized report ready to hand out as a download.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportedReport {
    pub file_name: String,
    pub mime_type: &'static str,
    pub bytes: Vec<u8>,
}

impl ExportedReport {
    pub fn from_ranking(ranking: &Ranking) -> Result<Self> {
        Self::with_options(ranking, REPORT_FILE_NAME, SHEET_NAME)
    }

    pub fn with_options(ranking: &Ranking, file_name: &str, sheet_name: &str) -> Result<Self> {
        Ok(Self {
            file_name: file_name.to_string(),
            mime_type: REPORT_MIME_TYPE,
            bytes: export_with_sheet_name(ranking, sheet_name)?,
        })
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn write_to(&self, path: &Path) -> Result<()> {
        std::fs::write(path, &self.bytes)?;
        info!("Wrote {} bytes to {}", self.bytes.len(), path.display());
        Ok(())
    }
}
