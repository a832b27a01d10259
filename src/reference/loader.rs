use log::{debug, info};
use std::collections::HashMap;
use std::io::Read;

use super::{AlkaneRecord, ReferenceError, SubstanceRecord};
use crate::fragments::parse_fragment_field;
use crate::method::{Method, MethodValues};

pub(super) const SUBSTANCES_TABLE: &str = "Substances";
pub(super) const ALKANES_TABLE: &str = "Alkanes";

const NAME_COLUMN: &str = "Substância";
const FRAGMENTS_COLUMN: &str = "Fragmentos (m/z)";
const NOTES_COLUMN: &str = "Observações";
const CARBON_COLUMN: &str = "n-Alcano";

/// Options controlling how the delimited table exports are read
#[derive(Debug, Clone)]
pub struct LoadOptions {
    /// Field delimiter
    pub delimiter: u8,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self { delimiter: b',' }
    }
}

/// Header lookup, case-insensitive and tolerant of a UTF-8 BOM
struct Columns {
    table: &'static str,
    index: HashMap<String, usize>,
}

impl Columns {
    fn new(table: &'static str, headers: &csv::StringRecord) -> Self {
        let index = headers
            .iter()
            .enumerate()
            .map(|(i, h)| (normalize_header(h), i))
            .collect();
        Self { table, index }
    }

    fn find(&self, column: &str) -> Option<usize> {
        self.index.get(&normalize_header(column)).copied()
    }

    fn require(&self, column: &str) -> Result<usize, ReferenceError> {
        self.find(column).ok_or_else(|| ReferenceError::MissingColumn {
            table: self.table,
            column: column.to_string(),
        })
    }
}

fn normalize_header(header: &str) -> String {
    header.trim_start_matches('\u{feff}').trim().to_lowercase()
}

/// Cursor over one data row, carrying enough context for error messages
struct Row<'a> {
    table: &'static str,
    line: u64,
    record: &'a csv::StringRecord,
}

impl<'a> Row<'a> {
    fn text(&self, index: Option<usize>) -> &'a str {
        index.and_then(|i| self.record.get(i)).unwrap_or("").trim()
    }

    fn invalid(&self, column: &str, value: &str) -> ReferenceError {
        ReferenceError::InvalidValue {
            table: self.table,
            line: self.line,
            column: column.to_string(),
            value: value.to_string(),
        }
    }

    fn float(&self, index: Option<usize>, column: &str) -> Result<Option<f64>, ReferenceError> {
        let raw = self.text(index);
        if is_null(raw) {
            return Ok(None);
        }
        parse_decimal(raw)
            .map(Some)
            .ok_or_else(|| self.invalid(column, raw))
    }

    fn method_values(
        &self,
        indices: &[(Method, usize)],
        column: impl Fn(Method) -> String,
    ) -> Result<MethodValues, ReferenceError> {
        let mut values = MethodValues::new();
        for &(method, index) in indices {
            values.set(method, self.float(Some(index), &column(method))?);
        }
        Ok(values)
    }
}

fn is_null(raw: &str) -> bool {
    raw.is_empty()
        || raw == "-"
        || raw.eq_ignore_ascii_case("nan")
        || raw.eq_ignore_ascii_case("null")
        || raw.eq_ignore_ascii_case("none")
}

/// Parse a decimal number, accepting a decimal comma when no point is present
fn parse_decimal(raw: &str) -> Option<f64> {
    let value = if !raw.contains('.') && raw.matches(',').count() == 1 {
        raw.replacen(',', ".", 1).parse::<f64>().ok()?
    } else {
        raw.parse::<f64>().ok()?
    };
    value.is_finite().then_some(value)
}

/// Parse a carbon count such as `10`, `C10` or `10.0`
fn parse_carbon_count(raw: &str) -> Option<u32> {
    let digits = raw.strip_prefix(&['C', 'c'][..]).unwrap_or(raw).trim();
    if let Ok(n) = digits.parse::<u32>() {
        return (n >= 1).then_some(n);
    }
    let value = parse_decimal(digits)?;
    let valid = value.fract() == 0.0 && value >= 1.0 && value <= f64::from(u32::MAX);
    valid.then_some(value as u32)
}

fn open_table<R: Read>(reader: R, options: &LoadOptions) -> csv::Reader<R> {
    csv::ReaderBuilder::new()
        .delimiter(options.delimiter)
        .flexible(true)
        .has_headers(true)
        .from_reader(reader)
}

fn rt_indices(columns: &Columns) -> Result<Vec<(Method, usize)>, ReferenceError> {
    Method::ALL
        .into_iter()
        .map(|m| Ok((m, columns.require(&m.rt_column())?)))
        .collect()
}

/// Read the substance table
pub(super) fn read_substances<R: Read>(
    reader: R,
    options: &LoadOptions,
) -> Result<Vec<SubstanceRecord>, ReferenceError> {
    let mut csv_reader = open_table(reader, options);
    let columns = Columns::new(SUBSTANCES_TABLE, csv_reader.headers()?);

    let name_idx = columns.require(NAME_COLUMN)?;
    let rt_idx = rt_indices(&columns)?;
    let lri_idx: Vec<(Method, usize)> = Method::ALL
        .into_iter()
        .filter_map(|m| columns.find(&m.lri_column()).map(|i| (m, i)))
        .collect();
    let fragments_idx = columns.find(FRAGMENTS_COLUMN);
    let notes_idx = columns.find(NOTES_COLUMN);

    let mut substances = Vec::new();
    for record in csv_reader.records() {
        let record = record?;
        let row = Row {
            table: SUBSTANCES_TABLE,
            line: record.position().map_or(0, |p| p.line()),
            record: &record,
        };

        let name = row.text(Some(name_idx));
        if name.is_empty() {
            debug!("Skipping substance row without a name at line {}", row.line);
            continue;
        }

        let fragment_text = row.text(fragments_idx).to_string();
        let fragments = match parse_fragment_field(&fragment_text) {
            Ok(list) => Some(list),
            Err(e) => {
                debug!("Substance '{}' has a malformed fragment field: {}", name, e);
                None
            }
        };

        substances.push(SubstanceRecord {
            name: name.to_string(),
            retention_times: row.method_values(&rt_idx, |m| m.rt_column())?,
            reference_lri: row.method_values(&lri_idx, |m| m.lri_column())?,
            fragment_text,
            fragments,
            notes: row.text(notes_idx).to_string(),
        });
    }

    info!("Loaded {} substances", substances.len());
    Ok(substances)
}

/// Read the n-alkane table
pub(super) fn read_alkanes<R: Read>(
    reader: R,
    options: &LoadOptions,
) -> Result<Vec<AlkaneRecord>, ReferenceError> {
    let mut csv_reader = open_table(reader, options);
    let columns = Columns::new(ALKANES_TABLE, csv_reader.headers()?);

    let carbon_idx = columns.require(CARBON_COLUMN)?;
    let rt_idx = rt_indices(&columns)?;

    let mut alkanes = Vec::new();
    for record in csv_reader.records() {
        let record = record?;
        let row = Row {
            table: ALKANES_TABLE,
            line: record.position().map_or(0, |p| p.line()),
            record: &record,
        };

        let raw = row.text(Some(carbon_idx));
        if raw.is_empty() && record.iter().all(|c| c.trim().is_empty()) {
            continue;
        }
        let carbon_count =
            parse_carbon_count(raw).ok_or_else(|| row.invalid(CARBON_COLUMN, raw))?;

        alkanes.push(AlkaneRecord {
            carbon_count,
            retention_times: row.method_values(&rt_idx, |m| m.rt_column())?,
        });
    }

    info!("Loaded {} n-alkane reference points", alkanes.len());
    Ok(alkanes)
}
