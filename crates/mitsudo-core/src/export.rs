//! Spreadsheet export of density reports.
//!
//! Writes a two-sheet `.xlsx` workbook: one row per keyword on
//! [`KEYWORD_SHEET`] and one row per ranked word on [`TOP_WORDS_SHEET`].
//! Column headers are Japanese, matching what operators see in the CLI.

use camino::{Utf8Path, Utf8PathBuf};
use chrono::NaiveDate;
use rust_xlsxwriter::{Format, Workbook, Worksheet};

use crate::density::DensityReport;
use crate::density::reports::DensityFlag;
use crate::error::{ExportError, ExportResult};

/// Name of the per-keyword sheet.
pub const KEYWORD_SHEET: &str = "Keywords Analysis";

/// Name of the ranking sheet.
pub const TOP_WORDS_SHEET: &str = "Top 10 Words";

/// Headers of the per-keyword sheet: keyword, count, rate, add, remove.
pub const KEYWORD_HEADERS: [&str; 5] = ["キーワード", "回数", "出現率 (%)", "追加", "削除"];

/// Headers of the ranking sheet: independent word, count, rate.
pub const TOP_WORDS_HEADERS: [&str; 3] = ["自立語", "回数", "出現率 (%)"];

/// Build the download file name for a report.
///
/// Uses `{title}-{YYYY-MM-DD}.xlsx`, or the keywords joined with `-` when
/// the title is blank. Path separators are replaced so the name is always a
/// single path component.
pub fn export_file_name(title: &str, keywords: &[String], date: NaiveDate) -> String {
    let title = title.trim();
    let stem = if title.is_empty() {
        keywords
            .iter()
            .map(|k| k.trim())
            .filter(|k| !k.is_empty())
            .collect::<Vec<_>>()
            .join("-")
    } else {
        title.to_string()
    };
    let stem: String = stem
        .chars()
        .map(|c| if matches!(c, '/' | '\\') { '_' } else { c })
        .collect();

    format!("{stem}-{}.xlsx", date.format("%Y-%m-%d"))
}

/// Lay out `report` as a workbook.
#[tracing::instrument(skip_all, fields(keywords = report.keyword_stats.len()))]
pub fn build_workbook(report: &DensityReport) -> ExportResult<Workbook> {
    let mut workbook = Workbook::new();
    let header = Format::new().set_bold();

    let sheet = workbook.add_worksheet();
    sheet.set_name(KEYWORD_SHEET)?;
    write_headers(sheet, &KEYWORD_HEADERS, &header)?;
    let mut row: u32 = 1;
    for stat in &report.keyword_stats {
        sheet.write_string(row, 0, &stat.keyword)?;
        sheet.write_number(row, 1, stat.count as f64)?;
        sheet.write_number(row, 2, stat.rate)?;
        // Only the column for the flagged direction is filled.
        match stat.flag {
            DensityFlag::Below => {
                sheet.write_number(row, 3, stat.deficit as f64)?;
            }
            DensityFlag::Above => {
                sheet.write_number(row, 4, stat.excess as f64)?;
            }
            DensityFlag::InBand => {}
        }
        row += 1;
    }
    sheet.autofit();

    let sheet = workbook.add_worksheet();
    sheet.set_name(TOP_WORDS_SHEET)?;
    write_headers(sheet, &TOP_WORDS_HEADERS, &header)?;
    let mut row: u32 = 1;
    for top in &report.top_words {
        sheet.write_string(row, 0, &top.word)?;
        sheet.write_number(row, 1, top.count as f64)?;
        sheet.write_number(row, 2, top.rate)?;
        row += 1;
    }
    sheet.autofit();

    Ok(workbook)
}

fn write_headers(sheet: &mut Worksheet, headers: &[&str], format: &Format) -> ExportResult<()> {
    for (col, title) in (0u16..).zip(headers) {
        sheet.write_string_with_format(0, col, *title, format)?;
    }
    Ok(())
}

/// Serialize `report` as `.xlsx` bytes.
pub fn to_xlsx_bytes(report: &DensityReport) -> ExportResult<Vec<u8>> {
    let mut workbook = build_workbook(report)?;
    Ok(workbook.save_to_buffer()?)
}

/// Write `report` into `dir` under [`export_file_name`] and return the path.
///
/// Creates `dir` if needed and overwrites an existing file of the same name.
#[tracing::instrument(skip(report, keywords), fields(dir = %dir))]
pub fn export_to_dir(
    report: &DensityReport,
    dir: &Utf8Path,
    title: &str,
    keywords: &[String],
    date: NaiveDate,
) -> ExportResult<Utf8PathBuf> {
    std::fs::create_dir_all(dir.as_std_path()).map_err(|source| ExportError::Io {
        path: dir.to_path_buf(),
        source,
    })?;

    let path = dir.join(export_file_name(title, keywords, date));
    let mut workbook = build_workbook(report)?;
    workbook.save(path.as_std_path())?;

    tracing::info!(path = %path, "workbook written");
    Ok(path)
}
