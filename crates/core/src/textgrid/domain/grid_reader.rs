use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use super::textgrid_error::TextGridError;
use crate::annotation::domain::grid::Grid;

/// Parses a [`Grid`] from an annotation file.
///
/// Implementations only deal with an already-open source; `read_path`
/// opens the file and drops it on every exit path, errors included.
pub trait GridReader: Send + Sync {
    fn read(&self, source: &mut dyn BufRead) -> Result<Grid, TextGridError>;

    fn read_path(&self, path: &Path) -> Result<Grid, TextGridError> {
        let file = File::open(path).map_err(|source| TextGridError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        self.read(&mut BufReader::new(file))
    }
}
