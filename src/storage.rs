use crate::models::{DataRecord, DataType};
use crate::state::AppState;
use anyhow::{Context, Result};
use chrono::NaiveDate;
use csv::WriterBuilder;
use regex::Regex;
use std::fs::File;
use std::io::{BufReader, Write};
use std::path::Path;
use std::sync::OnceLock;

/// `China` -> `china`, `United  States` -> `united_states`.
pub fn country_slug(country: &str) -> String {
    static WS: OnceLock<Regex> = OnceLock::new();
    let ws = WS.get_or_init(|| Regex::new(r"\s+").expect("static regex"));
    ws.replace_all(&country.to_lowercase(), "_").into_owned()
}

/// `<dataType>_<country>_data.json`
pub fn json_file_name(data_type: DataType, country: &str) -> String {
    format!("{}_{}_data.json", data_type.as_str(), country_slug(country))
}

/// `<dataType>_<country>_<YYYY-MM-DD>.csv`
pub fn csv_file_name(data_type: DataType, country: &str, date: NaiveDate) -> String {
    format!(
        "{}_{}_{}.csv",
        data_type.as_str(),
        country_slug(country),
        date.format("%Y-%m-%d")
    )
}

/// Same as [`csv_file_name`] for today's local date.
pub fn csv_file_name_today(data_type: DataType, country: &str) -> String {
    csv_file_name(data_type, country, chrono::Local::now().date_naive())
}

/// Compact JSON export: `{country, dataType, crops, data}`.
pub fn to_json_string(state: &AppState) -> Result<String> {
    Ok(serde_json::to_string(state)?)
}

/// Save the session as JSON.
pub fn save_json<P: AsRef<Path>>(state: &AppState, path: P) -> Result<()> {
    let path = path.as_ref();
    let mut f = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    f.write_all(to_json_string(state)?.as_bytes())?;
    log::info!("saved JSON to {}", path.display());
    Ok(())
}

/// Read a session previously written by [`save_json`]. Records are re-sorted by year.
pub fn load_json<P: AsRef<Path>>(path: P) -> Result<AppState> {
    let path = path.as_ref();
    let f = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    let mut state: AppState = serde_json::from_reader(BufReader::new(f))
        .with_context(|| format!("parsing {}", path.display()))?;
    state.data.sort_by_key(|r| r.year);
    state.data.dedup_by_key(|r| r.year);
    Ok(state)
}

/// Prefix cells that a spreadsheet would treat as a formula.
fn sanitize_cell(s: &str) -> String {
    if s.starts_with(['=', '+', '-', '@']) {
        format!("'{s}")
    } else {
        s.to_string()
    }
}

/// Write `Year,<crop1>,<crop2>,...` plus one row per record, in collection order.
pub fn write_csv<W: Write>(state: &AppState, writer: W) -> Result<()> {
    let mut wtr = WriterBuilder::new().from_writer(writer);
    let mut header: Vec<String> = vec!["Year".to_string()];
    header.extend(state.crops.iter().map(sanitize_cell));
    wtr.write_record(&header)?;
    for rec in &state.data {
        wtr.write_record(csv_row(rec, state))?;
    }
    wtr.flush()?;
    Ok(())
}

fn csv_row(rec: &DataRecord, state: &AppState) -> Vec<String> {
    std::iter::once(rec.year.to_string())
        .chain(state.crops.iter().map(|c| rec.get(c).to_string()))
        .collect()
}

/// CSV export as an in-memory string.
pub fn to_csv_string(state: &AppState) -> Result<String> {
    let mut buf: Vec<u8> = Vec::new();
    write_csv(state, &mut buf)?;
    Ok(String::from_utf8(buf)?)
}

/// Save the table as CSV with header.
pub fn save_csv<P: AsRef<Path>>(state: &AppState, path: P) -> Result<()> {
    let path = path.as_ref();
    let f = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    write_csv(state, f)?;
    log::info!("saved CSV ({} rows) to {}", state.data.len(), path.display());
    Ok(())
}
