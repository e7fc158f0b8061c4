//! Plain-text grid snapshots of the solution.
//!
//! A snapshot file `<prefix><NNN>.txt` holds one line of hot-boundary
//! values, `ny` lines of `nx` interior values, and one line of
//! cold-boundary values. It is a visualization artifact; only the
//! row/column grouping and value order are meaningful.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use heatcg_types::constants::SNAPSHOT_INDEX_WIDTH;
use heatcg_types::{HeatError, HeatResult};

use crate::hooks::InspectionHook;

/// Width of every value field in a snapshot line.
const FIELD_WIDTH: usize = 12;
/// Digits after the decimal point.
const FIELD_PRECISION: usize = 6;

/// Builds `<prefix><NNN>.txt`, with the iteration zero-padded to at least
/// three digits.
pub fn snapshot_file_name(prefix: &str, iteration: usize) -> String {
    format!("{prefix}{iteration:0width$}.txt", width = SNAPSHOT_INDEX_WIDTH)
}

/// Shape of the interior grid plus the fixed boundary rows around it.
#[derive(Debug, Clone, PartialEq)]
pub struct GridLayout {
    /// Interior points per row.
    pub nx: usize,
    /// Interior rows.
    pub ny: usize,
    /// Temperatures along the hot (top) boundary, one per column.
    pub hot_boundary: Vec<f64>,
    /// Temperatures along the cold (bottom) boundary, one per column.
    pub cold_boundary: Vec<f64>,
}

impl GridLayout {
    /// Creates a layout, checking that both boundary rows have `nx` values.
    pub fn new(
        nx: usize,
        ny: usize,
        hot_boundary: Vec<f64>,
        cold_boundary: Vec<f64>,
    ) -> HeatResult<Self> {
        for row in [&hot_boundary, &cold_boundary] {
            if row.len() != nx {
                return Err(HeatError::DimensionMismatch {
                    expected: nx,
                    actual: row.len(),
                });
            }
        }
        Ok(Self {
            nx,
            ny,
            hot_boundary,
            cold_boundary,
        })
    }

    /// Number of interior unknowns, `nx * ny`.
    pub fn unknowns(&self) -> usize {
        self.nx * self.ny
    }
}

/// One iterate laid out on its grid.
#[derive(Debug, Clone, Copy)]
pub struct GridSnapshot<'a> {
    layout: &'a GridLayout,
    solution: &'a [f64],
}

impl<'a> GridSnapshot<'a> {
    /// Pairs a solution vector with its layout.
    pub fn new(layout: &'a GridLayout, solution: &'a [f64]) -> HeatResult<Self> {
        if solution.len() != layout.unknowns() {
            return Err(HeatError::DimensionMismatch {
                expected: layout.unknowns(),
                actual: solution.len(),
            });
        }
        Ok(Self { layout, solution })
    }

    /// Writes the snapshot text.
    pub fn write_to<W: Write>(&self, w: &mut W) -> io::Result<()> {
        write_row(w, &self.layout.hot_boundary)?;
        if self.layout.nx > 0 {
            for row in self.solution.chunks(self.layout.nx) {
                write_row(w, row)?;
            }
        }
        write_row(w, &self.layout.cold_boundary)?;
        Ok(())
    }

    /// Renders the snapshot text into a `String`.
    pub fn render(&self) -> String {
        let mut buf = Vec::new();
        // Writing into a Vec cannot fail.
        let _ = self.write_to(&mut buf);
        String::from_utf8_lossy(&buf).into_owned()
    }
}

fn write_row<W: Write>(w: &mut W, values: &[f64]) -> io::Result<()> {
    for v in values {
        write!(w, " {v:>width$.prec$}", width = FIELD_WIDTH - 1, prec = FIELD_PRECISION)?;
    }
    writeln!(w)
}

/// Hook that writes a snapshot file for every snapshot callback.
pub struct SnapshotHook {
    prefix: String,
    layout: GridLayout,
    written: Vec<PathBuf>,
}

impl SnapshotHook {
    /// `prefix` may include a directory; it is not created here.
    pub fn new(prefix: impl Into<String>, layout: GridLayout) -> Self {
        Self {
            prefix: prefix.into(),
            layout,
            written: Vec::new(),
        }
    }

    /// Paths written so far, in write order.
    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }

    /// Grid layout used for every file.
    pub fn layout(&self) -> &GridLayout {
        &self.layout
    }
}

impl InspectionHook for SnapshotHook {
    fn on_snapshot(&mut self, iteration: usize, solution: &[f64]) -> HeatResult<()> {
        let snapshot = GridSnapshot::new(&self.layout, solution)?;
        let path = PathBuf::from(snapshot_file_name(&self.prefix, iteration));

        let mut writer = BufWriter::new(File::create(&path)?);
        snapshot.write_to(&mut writer)?;
        writer.flush()?;

        tracing::debug!(iteration, path = %path.display(), "snapshot_written");
        self.written.push(path);
        Ok(())
    }

    fn name(&self) -> &str {
        "snapshot_hook"
    }
}
