use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use super::textgrid_error::TextGridError;
use crate::annotation::domain::grid::Grid;

/// Serializes a [`Grid`] to an annotation file.
pub trait GridWriter: Send + Sync {
    fn write(&self, grid: &Grid, sink: &mut dyn Write) -> Result<(), TextGridError>;

    /// Creates (or truncates) `path` and writes the grid to it.
    fn write_path(&self, grid: &Grid, path: &Path) -> Result<(), TextGridError> {
        let file = File::create(path).map_err(|source| TextGridError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        let mut sink = BufWriter::new(file);
        self.write(grid, &mut sink)?;
        sink.flush()?;
        Ok(())
    }
}
