//! Flatten the active waypoints into table rows and write them out as CSV
use crate::track::WaypointStore;
use crate::Error;
use chrono::{Local, TimeZone};
use serde::Serialize;
use std::fmt::Display;
use std::io::Write;

/// A single row of the waypoint table, fields are in display order
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TableRow {
    /// one based point number
    pub point: usize,
    pub lat: f64,
    pub lng: f64,
    pub date: String,
    pub time: String,
    pub description: String,
    pub distance: String,
}

impl TableRow {
    pub const HEADERS: [&'static str; 7] =
        ["point", "lat", "lng", "date", "time", "description", "distance"];
}

/// Build table rows for the active waypoints using the local timezone
pub fn table_rows(store: &WaypointStore) -> Vec<TableRow> {
    table_rows_in(store, &Local)
}

/// Build table rows for the active waypoints with creation times shown in the given timezone
pub fn table_rows_in<Tz>(store: &WaypointStore, tz: &Tz) -> Vec<TableRow>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    store
        .active_waypoints()
        .filter_map(|w| {
            let pos = w.position()?;
            let time = w.created_at().with_timezone(tz);
            Some(TableRow {
                point: w.id() + 1,
                lat: pos.latitude(),
                lng: pos.longitude(),
                date: time.format("%a %b %d %Y").to_string(),
                time: time.format("%H:%M:%S GMT%z").to_string(),
                description: w.description().unwrap_or_default().to_string(),
                distance: format!(
                    "{} meters",
                    to_precision(store.distance_from_previous(w.id()), 5)
                ),
            })
        })
        .collect()
}

/// Write rows as CSV with every field quoted and CRLF line endings
pub fn write_csv<W: Write>(rows: &[TableRow], writer: W, has_headers: bool) -> Result<(), Error> {
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(has_headers)
        .quote_style(csv::QuoteStyle::Always)
        .terminator(csv::Terminator::CRLF)
        .from_writer(writer);
    // the serializer only emits headers alongside the first record
    if has_headers && rows.is_empty() {
        wtr.write_record(&TableRow::HEADERS)?;
    }
    for row in rows {
        wtr.serialize(row)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Format a number with a fixed count of significant digits, switching to exponent notation
/// for very large or small magnitudes.
fn to_precision(value: f64, digits: usize) -> String {
    if value == 0.0 {
        return format!("{:.*}", digits - 1, 0.0);
    }
    if !value.is_finite() {
        return value.to_string();
    }

    // the exponent has to come from the rounded value, 9.99996 becomes 1.0000e1
    let formatted = format!("{:.*e}", digits - 1, value);
    let parts = formatted
        .split_once('e')
        .and_then(|(mantissa, exp)| Some((mantissa.to_string(), exp.parse::<i32>().ok()?)));
    let (mantissa, exponent) = match parts {
        Some(parts) => parts,
        None => return formatted,
    };
    if exponent < -6 || exponent >= digits as i32 {
        if exponent < 0 {
            format!("{}e{}", mantissa, exponent)
        } else {
            format!("{}e+{}", mantissa, exponent)
        }
    } else {
        let decimals = (digits as i32 - 1 - exponent).max(0) as usize;
        format!("{:.*}", decimals, value)
    }
}
