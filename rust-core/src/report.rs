//! CSV rendering of outlier tables.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::error::Result;
use crate::models::OutlierTable;

/// Write `table` as CSV. The header row is always written, so an empty table
/// produces a single line.
pub fn write_table<W: Write>(table: &OutlierTable, writer: W) -> Result<()> {
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);

    wtr.write_record(OutlierTable::HEADERS)?;
    for row in table.rows() {
        wtr.serialize(row)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Create (or truncate) `path` and write `table` into it.
pub fn write_table_to_path(table: &OutlierTable, path: &Path) -> Result<()> {
    let file = File::create(path)?;
    write_table(table, file)
}
