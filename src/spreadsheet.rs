use std::fs::{self, File, OpenOptions};
use std::path::PathBuf;
use std::sync::Mutex;

use crate::domain::lead_row::{LeadRow, HEADER};

/// A spreadsheet kept on disk: one directory, one CSV file per worksheet.
pub struct Spreadsheet {
    directory: PathBuf,
    // Appends are serialized so concurrent requests never interleave partial rows
    write_lock: Mutex<()>,
}

#[derive(thiserror::Error, Debug)]
pub enum SpreadsheetError {
    #[error("{0} is not a valid worksheet name")]
    InvalidWorksheetName(String),
    #[error("Failed to access the spreadsheet file.")]
    Io(#[from] std::io::Error),
    #[error("Failed to read or write a worksheet row.")]
    Csv(#[from] csv::Error),
    #[error("Worksheet row is malformed: {0}")]
    MalformedRow(String),
    #[error("A previous writer panicked while holding the spreadsheet lock.")]
    Poisoned,
}

impl Spreadsheet {
    pub fn open(directory: impl Into<PathBuf>) -> Result<Spreadsheet, SpreadsheetError> {
        let directory = directory.into();

        fs::create_dir_all(&directory)?;

        Ok(Spreadsheet {
            directory,
            write_lock: Mutex::new(()),
        })
    }

    /// Appends one row, writing the header row first while the worksheet is empty.
    ///
    /// A failed write is rolled back so the worksheet never keeps a partial row.
    #[tracing::instrument(name = "Append a row to the spreadsheet", skip(self, row))]
    pub fn append_row(&self, worksheet: &str, row: &LeadRow) -> Result<(), SpreadsheetError> {
        let path = self.worksheet_path(worksheet)?;
        let _guard = self
            .write_lock
            .lock()
            .map_err(|_| SpreadsheetError::Poisoned)?;

        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        let original_len = file.metadata()?.len();

        if let Err(err) = write_rows(&file, original_len == 0, row) {
            tracing::error!("Failed to append to {}: {:?}", path.display(), err);
            file.set_len(original_len)?;
            return Err(err);
        }

        if original_len == 0 {
            tracing::info!("Created worksheet {}", path.display());
        }

        Ok(())
    }

    /// Returns every data row of a worksheet, header excluded. A missing worksheet has no rows.
    pub fn read_rows(&self, worksheet: &str) -> Result<Vec<LeadRow>, SpreadsheetError> {
        let path = self.worksheet_path(worksheet)?;

        if !path.exists() {
            return Ok(Vec::new());
        }

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_path(&path)?;

        reader
            .records()
            .map(|record| -> Result<LeadRow, SpreadsheetError> {
                let cells: Vec<String> = record?.iter().map(String::from).collect();
                LeadRow::try_from(cells).map_err(SpreadsheetError::MalformedRow)
            })
            .collect()
    }

    fn worksheet_path(&self, worksheet: &str) -> Result<PathBuf, SpreadsheetError> {
        let is_valid = !worksheet.trim().is_empty()
            && !worksheet.starts_with('.')
            && !worksheet.contains(['/', '\\']);

        if !is_valid {
            return Err(SpreadsheetError::InvalidWorksheetName(worksheet.to_string()));
        }

        Ok(self.directory.join(format!("{}.csv", worksheet)))
    }
}

fn write_rows(file: &File, with_header: bool, row: &LeadRow) -> Result<(), SpreadsheetError> {
    let mut writer = csv::Writer::from_writer(file);

    if with_header {
        writer.write_record(HEADER)?;
    }

    writer.write_record(row.as_record())?;
    writer.flush()?;

    Ok(())
}
