//! CSV export ingestion and writing.
//!
//! The reservation page exports one row per reservation. Only three columns
//! matter here; everything else in the export is ignored.
//!
//! | Column     | Example           | Notes                                 |
//! |------------|-------------------|---------------------------------------|
//! | `Attendee` | `Gzeus`           | Rows with an empty attendee are skipped |
//! | `Item`     | `Band of Accuria` | Quoted values may contain commas      |
//! | `SR+`      | `3`               | Leading integer; empty -> 0; negative -> error |
//!
//! Header names are matched case-insensitively and may appear in any order.

use std::collections::HashMap;
use std::fmt;
use std::io::Write;
use std::path::Path;

use srp_schemas::{ItemClaim, ParticipantRoster, Period};
use tracing::warn;

const COL_ATTENDEE: &str = "attendee";
const COL_ITEM: &str = "item";
const COL_COUNTER: &str = "sr+";

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

#[derive(Debug)]
pub enum CsvRosterError {
    /// File system error.
    Io(String),
    /// Error from the CSV reader/writer itself.
    Csv(String),
    /// The header row is missing a required column.
    MissingHeader(String),
    /// A field violates the data model.
    ParseField {
        row: u64,
        field: &'static str,
        raw: String,
    },
}

impl fmt::Display for CsvRosterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CsvRosterError::Io(msg) => write!(f, "csv io error: {msg}"),
            CsvRosterError::Csv(msg) => write!(f, "csv format error: {msg}"),
            CsvRosterError::MissingHeader(col) => {
                write!(f, "csv missing required header column: '{col}'")
            }
            CsvRosterError::ParseField { row, field, raw } => {
                write!(
                    f,
                    "csv row {row}: cannot parse field '{field}' from value '{raw}'"
                )
            }
        }
    }
}

impl std::error::Error for CsvRosterError {}

impl From<csv::Error> for CsvRosterError {
    fn from(e: csv::Error) -> Self {
        CsvRosterError::Csv(e.to_string())
    }
}

// ---------------------------------------------------------------------------
// Read
// ---------------------------------------------------------------------------

/// Parse an export file. The period id is the file stem (`SNDQJT.csv` -> `SNDQJT`).
pub fn parse_roster_csv_file(path: &Path) -> Result<Period, CsvRosterError> {
    let src = std::fs::read_to_string(path)
        .map_err(|e| CsvRosterError::Io(format!("read '{}': {e}", path.display())))?;

    let period_id = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    parse_roster_csv_str(&period_id, &src)
}

/// Parse export text into a [`Period`]; participants in first-appearance order.
pub fn parse_roster_csv_str(period_id: &str, src: &str) -> Result<Period, CsvRosterError> {
    // Exports saved on Windows may carry a UTF-8 BOM.
    let src = src.strip_prefix('\u{feff}').unwrap_or(src);
    if src.trim().is_empty() {
        return Ok(Period::empty(period_id));
    }

    let mut rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(src.as_bytes());

    let col_idx = build_col_index(rdr.headers()?)?;
    let attendee_i = col_idx[COL_ATTENDEE];
    let item_i = col_idx[COL_ITEM];
    let counter_i = col_idx[COL_COUNTER];

    let mut participants: Vec<ParticipantRoster> = Vec::new();
    let mut by_name: HashMap<String, usize> = HashMap::new();

    for record in rdr.records() {
        let record = record?;
        let row = record.position().map(|p| p.line()).unwrap_or(0);

        let attendee = record.get(attendee_i).unwrap_or("");
        if attendee.is_empty() {
            continue;
        }
        let item = record.get(item_i).unwrap_or("");
        let counter = parse_counter(record.get(counter_i).unwrap_or(""), row)?;

        let slot = match by_name.get(attendee) {
            Some(&i) => i,
            None => {
                participants.push(ParticipantRoster::new(attendee, Vec::new()));
                by_name.insert(attendee.to_string(), participants.len() - 1);
                participants.len() - 1
            }
        };
        participants[slot].claims.push(ItemClaim::new(item, counter));
    }

    Ok(Period::new(period_id, participants))
}

/// Counter cell. Blank is a plain reservation (0). Otherwise the leading
/// integer is taken (`"3abc"` -> 3, `"2.5"` -> 2); a cell with no leading
/// digits reads as 0. Either lossy case is logged. A negative value is a
/// data-model violation.
pub fn parse_counter(raw: &str, row: u64) -> Result<u32, CsvRosterError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(0);
    }

    let bad_field = || CsvRosterError::ParseField {
        row,
        field: "SR+",
        raw: raw.to_string(),
    };

    let (negative, unsigned) = match raw.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, raw.strip_prefix('+').unwrap_or(raw)),
    };
    let end = unsigned
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(unsigned.len());
    let digits = &unsigned[..end];

    if digits.is_empty() {
        warn!(row, raw, "SR+ cell is not a number; reading it as 0");
        return Ok(0);
    }
    if end < unsigned.len() {
        warn!(row, raw, digits, "SR+ cell has trailing characters; keeping the leading integer");
    }

    let value: u64 = digits.parse().map_err(|_| bad_field())?;
    if negative && value > 0 {
        return Err(bad_field());
    }
    u32::try_from(value).map_err(|_| bad_field())
}

/// Build a lower-cased column-name -> index map and check required columns.
fn build_col_index(headers: &csv::StringRecord) -> Result<HashMap<String, usize>, CsvRosterError> {
    let mut idx: HashMap<String, usize> = HashMap::new();
    for (i, col) in headers.iter().enumerate() {
        idx.entry(col.trim().to_ascii_lowercase()).or_insert(i);
    }

    for req in [COL_ATTENDEE, COL_ITEM, COL_COUNTER] {
        if !idx.contains_key(req) {
            return Err(CsvRosterError::MissingHeader(req.to_string()));
        }
    }

    Ok(idx)
}

// ---------------------------------------------------------------------------
// Write
// ---------------------------------------------------------------------------

/// Write `period` in the three-column export layout understood by
/// [`parse_roster_csv_str`]. Participants without claims have no row.
pub fn write_roster_csv<W: Write>(period: &Period, out: W) -> Result<(), CsvRosterError> {
    let mut wtr = csv::Writer::from_writer(out);
    wtr.write_record(["Attendee", "Item", "SR+"])?;

    for roster in &period.participants {
        for claim in &roster.claims {
            wtr.write_record([
                roster.participant_name.as_str(),
                claim.item_name.as_str(),
                claim.counter.to_string().as_str(),
            ])?;
        }
    }

    wtr.flush()
        .map_err(|e| CsvRosterError::Io(format!("flush: {e}")))?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
