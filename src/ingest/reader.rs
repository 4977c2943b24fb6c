use csv::{ReaderBuilder, StringRecord, Trim};
use tracing::{debug, warn};

use crate::error::IngestionError;
use crate::ingest::IngestionReport;
use crate::ingest::header::{ColumnMap, Field};
use crate::ingest::numeric::{Cell, parse_cell};
use crate::models::Nutrients;

/// One table row after column resolution, before id assignment.
#[derive(Debug, Clone, PartialEq)]
pub struct CanonicalRow {
    pub code: Option<String>,
    pub group: Option<String>,
    pub description: String,
    pub kcal: f64,
    pub nutrients: Nutrients,
}

/// `;` or `,`, whichever appears more often in the header line. `;` wins ties.
pub fn detect_delimiter(header_line: &str) -> u8 {
    let semicolons = header_line.matches(';').count();
    let commas = header_line.matches(',').count();
    if commas > semicolons { b',' } else { b';' }
}

/// Parse delimited text into canonical rows.
///
/// The whole input is rejected when description or kcal cannot be resolved.
/// Blank rows and rows with a blank description are dropped; bad numeric
/// cells read as zero. Both are tallied in `report`.
pub fn read_rows(
    text: &str,
    report: &mut IngestionReport,
) -> Result<Vec<CanonicalRow>, IngestionError> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let header_line = text.lines().next().unwrap_or_default();
    let delimiter = detect_delimiter(header_line);
    debug!(delimiter = %char::from(delimiter), "detected delimiter");

    let mut reader = ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(true)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(text.as_bytes());

    let headers = reader.headers().cloned().unwrap_or_default();
    let columns = ColumnMap::resolve(headers.iter());
    let missing = columns.missing_required();
    if !missing.is_empty() {
        warn!(?missing, "rejecting table: required columns not found");
        return Err(IngestionError::MissingRequiredColumns { missing });
    }

    let mut rows = Vec::new();
    for (index, record) in reader.records().enumerate() {
        report.rows_read += 1;
        let record = match record {
            Ok(record) => record,
            Err(e) => {
                warn!(row = index + 1, error = %e, "skipping unreadable row");
                report.rows_unreadable += 1;
                continue;
            }
        };
        match parse_row(&record, &columns, report) {
            Some(row) => rows.push(row),
            None => report.rows_dropped_blank += 1,
        }
    }

    Ok(rows)
}

fn parse_row(
    record: &StringRecord,
    columns: &ColumnMap,
    report: &mut IngestionReport,
) -> Option<CanonicalRow> {
    let text = |field: Field| {
        columns
            .index(field)
            .and_then(|i| record.get(i))
            .map(str::trim)
            .filter(|s| !s.is_empty())
    };

    let description = text(Field::Description)?.to_string();

    let mut number = |field: Field| -> f64 {
        let Some(raw) = columns.index(field).and_then(|i| record.get(i)) else {
            return 0.0;
        };
        let cell = parse_cell(raw);
        if cell == Cell::Unparsable {
            report.values_defaulted += 1;
        }
        cell.value()
    };

    let kcal = number(Field::Kcal);
    let nutrients = Nutrients {
        protein: number(Field::Protein),
        carbs: number(Field::Carbs),
        fat: number(Field::Fat),
        fiber: number(Field::Fiber),
        sodium: number(Field::Sodium),
        potassium: number(Field::Potassium),
        calcium: number(Field::Calcium),
        iron: number(Field::Iron),
        vitamin_c: number(Field::VitaminC),
    };

    Some(CanonicalRow {
        code: text(Field::Id).map(str::to_string),
        group: text(Field::Group).map(str::to_string),
        description,
        kcal,
        nutrients,
    })
}
