use std::path::Path;

use rust_xlsxwriter::{Table, TableColumn, Workbook};
use tracing::{debug, instrument};

use crate::error::Result;
use crate::project::LeaderboardTable;

/// Writes the report table to an `.xlsx` workbook at the given path.
#[instrument(level = "info", skip_all, fields(path = %path.display(), rows = table.rows.len()))]
pub fn write_table(path: &Path, table: &LeaderboardTable) -> Result<()> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(&table.sheet_name)?;

    for (col_idx, header) in table.columns.iter().enumerate() {
        worksheet.write_string(0, col_idx as u16, header)?;
    }

    for (row_idx, row) in table.rows.iter().enumerate() {
        for (col_idx, cell) in row.cells().enumerate() {
            worksheet.write_string((row_idx + 1) as u32, col_idx as u16, cell)?;
        }
    }

    // Excel tables need at least one data row under the header.
    if !table.rows.is_empty() {
        let col_end = (table.columns.len() as u16).saturating_sub(1);
        let row_end = table.rows.len() as u32;
        let columns: Vec<TableColumn> = table
            .columns
            .iter()
            .map(|header| TableColumn::new().set_header(header))
            .collect();
        let mut excel_table = Table::new();
        excel_table.set_autofilter(true).set_columns(&columns);
        worksheet.add_table(0, 0, row_end, col_end, &excel_table)?;
    }
    worksheet.autofit();

    workbook.save(path)?;
    debug!("workbook saved");
    Ok(())
}
