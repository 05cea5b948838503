use std::path::Path;

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime};

use crate::error::{LoclensError, Result};
use crate::model::LineRecord;

const COLUMNS: [&str; 11] = [
    "commit", "file", "line", "depth", "length", "type", "author", "date", "time", "timezone",
    "datetime",
];

/// Read and parse a per-line export file into typed records.
///
/// Any unreadable source or malformed row fails the whole load; callers must
/// propagate the error rather than continue with partial data.
pub fn load_records(path: &Path) -> Result<Vec<LineRecord>> {
    let raw = std::fs::read_to_string(path)?;
    parse_records(&raw)
}

/// Parse the raw tabular export. The first line is a header naming the eleven
/// required columns in any order; every following non-empty line is one record.
pub fn parse_records(input: &str) -> Result<Vec<LineRecord>> {
    let mut lines = input.lines().enumerate();
    let header = loop {
        match lines.next() {
            Some((_, l)) if l.trim().is_empty() => continue,
            Some((_, l)) => break l,
            None => return Err(LoclensError::Parse("export is missing a header row".into())),
        }
    };

    let names = split_row(header);
    let mut index = [0usize; COLUMNS.len()];
    for (slot, column) in index.iter_mut().zip(COLUMNS) {
        *slot = names
            .iter()
            .position(|n| n.trim() == column)
            .ok_or_else(|| LoclensError::Parse(format!("missing column '{column}'")))?;
    }

    let mut records = Vec::new();
    for (lineno, line) in lines {
        if line.trim().is_empty() {
            continue;
        }
        let row = lineno + 1;
        let fields = split_row(line);
        if fields.len() != names.len() {
            return Err(LoclensError::Parse(format!(
                "row {row}: expected {} fields, found {}",
                names.len(),
                fields.len()
            )));
        }
        records.push(parse_record(&fields, &index, row)?);
    }
    Ok(records)
}

fn parse_record(fields: &[String], index: &[usize; COLUMNS.len()], row: usize) -> Result<LineRecord> {
    let field = |i: usize| fields[index[i]].as_str();

    let timezone = field(9).to_string();
    let offset = parse_offset(&timezone)
        .map_err(|e| LoclensError::InvalidDate(format!("row {row}: {e}")))?;

    let date = parse_midnight(field(7), offset)
        .map_err(|e| LoclensError::InvalidDate(format!("row {row}: {e}")))?;
    let datetime = parse_instant(field(10), offset)
        .map_err(|e| LoclensError::InvalidDate(format!("row {row}: {e}")))?;

    Ok(LineRecord {
        commit: field(0).to_string(),
        file: field(1).to_string(),
        line: parse_int(field(2), "line", row)?,
        depth: parse_int(field(3), "depth", row)?,
        length: parse_int(field(4), "length", row)?,
        kind: field(5).to_string(),
        author: field(6).to_string(),
        date,
        time: field(8).to_string(),
        timezone,
        datetime,
    })
}

fn parse_int(value: &str, column: &str, row: usize) -> Result<u32> {
    value
        .trim()
        .parse()
        .map_err(|_| LoclensError::Parse(format!("row {row}: non-integer {column} '{value}'")))
}

/// Combine a calendar date with a literal midnight anchor in the row's offset.
fn parse_midnight(date: &str, offset: FixedOffset) -> std::result::Result<DateTime<FixedOffset>, String> {
    let naive = NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d")
        .map_err(|_| format!("unparseable date '{date}'"))?;
    let midnight = naive
        .and_hms_opt(0, 0, 0)
        .ok_or_else(|| format!("unparseable date '{date}'"))?;
    attach_offset(midnight, offset, date)
}

/// Parse the authoritative instant. The column usually carries its own offset;
/// when it is a bare local timestamp the row's timezone offset applies.
fn parse_instant(value: &str, offset: FixedOffset) -> std::result::Result<DateTime<FixedOffset>, String> {
    let value = value.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Ok(dt);
    }
    for format in ["%Y-%m-%dT%H:%M:%S%z", "%Y-%m-%dT%H:%M%z"] {
        if let Ok(dt) = DateTime::parse_from_str(value, format) {
            return Ok(dt);
        }
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(value, format) {
            return attach_offset(naive, offset, value);
        }
    }
    Err(format!("unparseable datetime '{value}'"))
}

fn attach_offset(
    naive: NaiveDateTime,
    offset: FixedOffset,
    original: &str,
) -> std::result::Result<DateTime<FixedOffset>, String> {
    use chrono::TimeZone;
    offset
        .from_local_datetime(&naive)
        .single()
        .ok_or_else(|| format!("ambiguous datetime '{original}'"))
}

/// Parse a `+HH:MM` / `-HHMM` style offset; an empty field means UTC.
fn parse_offset(value: &str) -> std::result::Result<FixedOffset, String> {
    let value = value.trim();
    let bad = || format!("unparseable timezone '{value}'");
    if value.is_empty() {
        return FixedOffset::east_opt(0).ok_or_else(bad);
    }
    let mut chars = value.chars();
    let sign = match chars.next() {
        Some('+') => 1i32,
        Some('-') => -1i32,
        _ => return Err(bad()),
    };
    let digits: String = chars.filter(|c| *c != ':').collect();
    if digits.len() != 4 || !digits.chars().all(|c| c.is_ascii_digit()) {
        return Err(bad());
    }
    let hours: i32 = digits[..2].parse().map_err(|_| bad())?;
    let minutes: i32 = digits[2..].parse().map_err(|_| bad())?;
    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60)).ok_or_else(bad)
}

/// Split one export row, honouring double-quoted fields with `""` escapes.
fn split_row(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '"' if in_quotes && chars.peek() == Some(&'"') => {
                current.push('"');
                chars.next();
            }
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => fields.push(std::mem::take(&mut current)),
            _ => current.push(c),
        }
    }
    fields.push(current);
    fields
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const HEADER: &str = "commit,file,line,depth,length,type,author,date,time,timezone,datetime";

    fn row(commit: &str, file: &str, line: u32, kind: &str, datetime: &str) -> String {
        format!("{commit},{file},{line},1,10,{kind},ada,2024-01-01,10:00,-08:00,{datetime}")
    }

    #[test]
    fn parses_typed_fields() {
        let input = format!("{HEADER}\n{}\n", row("a", "x.js", 3, "js", "2024-01-01T10:00"));
        let records = parse_records(&input).unwrap();
        assert_eq!(records.len(), 1);
        let r = &records[0];
        assert_eq!(r.commit, "a");
        assert_eq!(r.file, "x.js");
        assert_eq!((r.line, r.depth, r.length), (3, 1, 10));
        assert_eq!(r.kind, "js");
        assert_eq!(r.datetime.to_rfc3339(), "2024-01-01T10:00:00-08:00");
        // date column anchored at midnight in the row's offset
        assert_eq!(r.date.to_rfc3339(), "2024-01-01T00:00:00-08:00");
    }

    #[test]
    fn datetime_with_own_offset_wins() {
        let input = format!("{HEADER}\n{}\n", row("a", "x.js", 1, "js", "2024-01-01T10:00:00+02:00"));
        let records = parse_records(&input).unwrap();
        assert_eq!(records[0].datetime.to_rfc3339(), "2024-01-01T10:00:00+02:00");
    }

    #[test]
    fn header_order_is_flexible() {
        let input = "datetime,commit,file,line,depth,length,type,author,date,time,timezone\n\
                     2024-01-01T10:00,a,x.js,1,0,5,js,ada,2024-01-01,10:00,+00:00\n";
        let records = parse_records(input).unwrap();
        assert_eq!(records[0].commit, "a");
        assert_eq!(records[0].length, 5);
    }

    #[test]
    fn quoted_fields_may_contain_commas() {
        let input = format!(
            "{HEADER}\n\"a\",\"src/a,b.js\",1,0,5,js,\"Lovelace, Ada\",2024-01-01,10:00,+00:00,2024-01-01T10:00\n"
        );
        let records = parse_records(&input).unwrap();
        assert_eq!(records[0].file, "src/a,b.js");
        assert_eq!(records[0].author, "Lovelace, Ada");
    }

    #[test]
    fn missing_column_fails() {
        let input = "commit,file,line\na,x.js,1\n";
        let err = parse_records(input).unwrap_err();
        assert!(err.to_string().contains("missing column"));
    }

    #[test]
    fn non_integer_field_fails_with_row_number() {
        let input = format!("{HEADER}\na,x.js,one,1,10,js,ada,2024-01-01,10:00,+00:00,2024-01-01T10:00\n");
        let err = parse_records(&input).unwrap_err();
        assert!(err.to_string().contains("row 2"), "{err}");
    }

    #[test]
    fn empty_export_yields_no_records() {
        let records = parse_records(&format!("{HEADER}\n")).unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn bad_timezone_fails() {
        let input = format!("{HEADER}\na,x.js,1,1,10,js,ada,2024-01-01,10:00,PST,2024-01-01T10:00\n");
        assert!(parse_records(&input).is_err());
    }
}
