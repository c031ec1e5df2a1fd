//! Result printing

use cmsquery_core::Record;
use std::io::Write;

/// Records as a JSON array.
pub fn records_json(records: &[Record], pretty: bool) -> serde_json::Result<String> {
    if pretty {
        serde_json::to_string_pretty(records)
    } else {
        serde_json::to_string(records)
    }
}

pub fn write_records(out: &mut dyn Write, records: &[Record], pretty: bool) -> anyhow::Result<()> {
    writeln!(out, "{}", records_json(records, pretty)?)?;
    Ok(())
}
