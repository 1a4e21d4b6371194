use serde::Serialize;

use super::summary::CreditReport;

#[derive(Debug, thiserror::Error)]
pub enum ReportExportError {
    #[error("failed to write report row: {0}")]
    Csv(#[from] csv::Error),
    #[error("failed to flush report: {0}")]
    Io(#[from] std::io::Error),
    #[error("report is not valid UTF-8: {0}")]
    Encoding(#[from] std::string::FromUtf8Error),
}

/// Field order matches `HEADERS`.
#[derive(Serialize)]
struct CsvRow<'a> {
    student_id: &'a str,
    name: &'a str,
    email: &'a str,
    program_category: &'a str,
    program: &'a str,
    approved: usize,
    pending: usize,
    rejected: usize,
    total_credits: f64,
}

const HEADERS: [&str; 9] = [
    "Student ID",
    "Name",
    "Email",
    "Program Category",
    "Program",
    "Approved",
    "Pending",
    "Rejected",
    "Total Credits",
];

/// Renders the report rows as CSV. The header line is written even when there are no rows;
/// totals are not emitted.
pub fn to_csv(report: &CreditReport) -> Result<String, ReportExportError> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());
    writer.write_record(HEADERS)?;
    for row in &report.rows {
        writer.serialize(CsvRow {
            student_id: &row.student_id.0,
            name: &row.name,
            email: &row.email,
            program_category: row
                .program_category
                .map(|category| category.display_value())
                .unwrap_or_default(),
            program: row.program.as_deref().unwrap_or_default(),
            approved: row.approved,
            pending: row.pending,
            rejected: row.rejected,
            total_credits: row.total_credits,
        })?;
    }
    writer.flush()?;
    let bytes = writer
        .into_inner()
        .map_err(|err| ReportExportError::Io(err.into_error()))?;
    Ok(String::from_utf8(bytes)?)
}
