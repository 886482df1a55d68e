use crate::error::Result;
use crate::models::PanoramaRecord;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

/// Writes one `panoID: .. panoDate: ..` line per record into a batch file
pub struct LineWriter {
    writer: BufWriter<File>,
    lines_written: usize,
}

impl LineWriter {
    /// Create (or truncate) the batch file
    pub fn create(path: &Path) -> Result<Self> {
        let file = File::create(path)?;
        Ok(Self {
            writer: BufWriter::new(file),
            lines_written: 0,
        })
    }

    /// Append a record. Flushed immediately so an interrupted run keeps what it wrote.
    pub fn write_record(&mut self, record: &PanoramaRecord) -> Result<()> {
        self.writer.write_all(record.to_line().as_bytes())?;
        self.writer.flush()?;
        self.lines_written += 1;
        Ok(())
    }

    pub fn finish(mut self) -> Result<usize> {
        self.writer.flush()?;
        Ok(self.lines_written)
    }
}

/// Read back the records of an existing batch file, skipping lines that don't parse
pub fn read_records(path: &Path) -> Result<Vec<PanoramaRecord>> {
    let reader = BufReader::new(File::open(path)?);
    let mut records = Vec::new();
    for line in reader.lines() {
        if let Some(record) = PanoramaRecord::parse_line(&line?) {
            records.push(record);
        }
    }
    Ok(records)
}
