use std::path::{Path, PathBuf};

use crate::error::Result;

/// Writes a chart description to disk.
///
/// The statistical pipeline never depends on an implementation of this trait;
/// charts are built from already-computed results and handed over here.
pub trait ChartRenderer {
    type Chart;

    /// Render `chart` into `output_dir`, returning the path of the written file.
    fn render(&self, chart: &Self::Chart, output_dir: &Path) -> Result<PathBuf>;
}
