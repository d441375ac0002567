//! Dataset files: naming, text format, writing and reading back.
//!
//! A record file holds a commented header followed by the grid:
//!
//! ```text
//! # cx    cy    r    ncircle
//! # 12    30    9    2
//! # 40    22    14    2
//! 0 0 0 1 0 ...
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Result, SynthError};
use crate::grid::Grid;
use crate::sampler::CircleSpec;

const COMMENT: &str = "# ";
const HEADER_COLUMNS: &str = "cx    cy    r    ncircle";

/// One persisted grid together with the circles that generated it.
#[derive(Debug, Clone, PartialEq)]
pub struct DatasetRecord {
    pub circles: Vec<CircleSpec>,
    pub grid: Grid,
}

impl DatasetRecord {
    /// Header text (without comment markers): a column line, then one row per circle.
    pub fn header(&self) -> String {
        let mut out = String::from(HEADER_COLUMNS);
        out.push('\n');
        for c in &self.circles {
            out.push_str(&format!(
                "{}    {}    {}    {}\n",
                c.center[0],
                c.center[1],
                c.radius,
                self.circles.len()
            ));
        }
        out
    }

    /// Full file contents.
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        for line in self.header().lines() {
            out.push_str(COMMENT);
            out.push_str(line);
            out.push('\n');
        }
        out.push_str(&self.grid.to_text());
        out
    }

    /// Parse the contents of a record file; `path` is only used in error messages.
    pub fn parse(path: &Path, text: &str) -> Result<Self> {
        let err = |line: usize, message: String| SynthError::Parse {
            path: path.to_path_buf(),
            line,
            message,
        };

        let mut circles = Vec::new();
        let mut cells: Vec<u8> = Vec::new();
        let mut width: Option<usize> = None;
        let mut rows = 0usize;

        for (i, raw) in text.lines().enumerate() {
            let lineno = i + 1;
            let line = raw.trim();
            if line.is_empty() {
                continue;
            }
            if let Some(comment) = line.strip_prefix('#') {
                let fields: Vec<&str> = comment.split_whitespace().collect();
                if fields.is_empty() || fields[0] == "cx" {
                    continue;
                }
                if fields.len() != 4 {
                    return Err(err(
                        lineno,
                        format!("expected 4 header fields, got {}", fields.len()),
                    ));
                }
                let parse_i64 = |s: &str| {
                    s.parse::<i64>()
                        .map_err(|e| err(lineno, format!("bad header value '{}': {}", s, e)))
                };
                let cx = parse_i64(fields[0])?;
                let cy = parse_i64(fields[1])?;
                let radius = fields[2]
                    .parse::<u32>()
                    .map_err(|e| err(lineno, format!("bad radius '{}': {}", fields[2], e)))?;
                circles.push(CircleSpec {
                    center: [cx, cy],
                    radius,
                });
                continue;
            }

            let before = cells.len();
            for tok in line.split_whitespace() {
                let v = tok
                    .parse::<u8>()
                    .map_err(|e| err(lineno, format!("bad cell value '{}': {}", tok, e)))?;
                cells.push(v);
            }
            let w = cells.len() - before;
            match width {
                None => width = Some(w),
                Some(expected) if expected != w => {
                    return Err(err(
                        lineno,
                        format!("row has {} values, expected {}", w, expected),
                    ));
                }
                Some(_) => {}
            }
            rows += 1;
        }

        let n = width.unwrap_or(0);
        if rows != n {
            return Err(err(0, format!("grid is {}x{}, expected a square grid", rows, n)));
        }
        let grid = Grid::from_vec(n, cells)?;
        Ok(Self { circles, grid })
    }

    /// Read a record file.
    pub fn read(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        Self::parse(path, &text)
    }
}

/// Number of decimal digits of `v`.
fn digit_width(v: usize) -> usize {
    v.to_string().len()
}

/// File name for sample `index` of a run with `n_circles` circles and `n_samples` samples.
///
/// The circle count is zero-padded to the width of `n_circles - 1` and the
/// index to the width of `n_samples - 1`, e.g. `3circle_007.txt` for the
/// eighth of 120 three-circle samples.
pub fn record_file_name(n_circles: usize, n_samples: usize, index: usize) -> String {
    let wc = digit_width(n_circles.saturating_sub(1));
    let ws = digit_width(n_samples.saturating_sub(1));
    format!("{:0wc$}circle_{:0ws$}.txt", n_circles, index, wc = wc, ws = ws)
}

/// Writes records into one output directory.
#[derive(Debug, Clone)]
pub struct DatasetWriter {
    dir: PathBuf,
    png_scale: Option<u32>,
}

impl DatasetWriter {
    /// Use `dir` as output directory, creating it (and parents) if needed.
    pub fn create(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        if !dir.exists() {
            tracing::info!("creating output directory {}", dir.display());
        }
        fs::create_dir_all(&dir)?;
        Ok(Self {
            dir,
            png_scale: None,
        })
    }

    /// Also write a PNG with `scale x scale` pixels per cell next to each record.
    pub fn with_png(mut self, scale: u32) -> Self {
        self.png_scale = Some(scale);
        self
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Write `record` as `file_name` and return its path.
    pub fn write(&self, file_name: &str, record: &DatasetRecord) -> Result<PathBuf> {
        let path = self.dir.join(file_name);
        fs::write(&path, record.to_text())?;
        if let Some(scale) = self.png_scale {
            let png = path.with_extension("png");
            record.grid.to_image(scale).save(&png)?;
        }
        tracing::debug!("wrote {}", path.display());
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn sample_record() -> DatasetRecord {
        let mut grid = Grid::zeros(4);
        grid.set(0, 1, 1);
        grid.set(3, 2, 1);
        DatasetRecord {
            circles: vec![
                CircleSpec {
                    center: [1, 2],
                    radius: 3,
                },
                CircleSpec {
                    center: [0, 3],
                    radius: 1,
                },
            ],
            grid,
        }
    }

    #[test]
    fn file_names_are_padded() {
        assert_eq!(record_file_name(1, 1, 0), "1circle_0.txt");
        assert_eq!(record_file_name(3, 120, 7), "3circle_007.txt");
        assert_eq!(record_file_name(3, 100, 99), "3circle_99.txt");
        assert_eq!(record_file_name(12, 10, 4), "12circle_4.txt");
        assert_eq!(record_file_name(10, 11, 10), "10circle_10.txt");
    }

    #[test]
    fn header_lists_every_circle() {
        let rec = sample_record();
        assert_eq!(
            rec.header(),
            "cx    cy    r    ncircle\n1    2    3    2\n0    3    1    2\n"
        );
        let text = rec.to_text();
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("# cx    cy    r    ncircle"));
        assert_eq!(lines.next(), Some("# 1    2    3    2"));
        assert_eq!(lines.next(), Some("# 0    3    1    2"));
        assert_eq!(lines.next(), Some("0 1 0 0"));
    }

    #[test]
    fn write_then_read_back() {
        let dir = tempdir().unwrap();
        let writer = DatasetWriter::create(dir.path().join("data")).unwrap();
        let rec = sample_record();
        let path = writer.write("2circle_0.txt", &rec).unwrap();
        assert!(path.exists());
        let back = DatasetRecord::read(&path).unwrap();
        assert_eq!(back, rec);
    }

    #[test]
    fn png_written_when_requested() {
        let dir = tempdir().unwrap();
        let writer = DatasetWriter::create(dir.path()).unwrap().with_png(2);
        let path = writer.write("1circle_0.txt", &sample_record()).unwrap();
        let png = path.with_extension("png");
        assert!(png.exists());
        assert!(std::fs::metadata(&png).unwrap().len() > 0);
    }

    #[test]
    fn parse_rejects_ragged_rows() {
        let err = DatasetRecord::parse(Path::new("x.txt"), "0 1\n1\n").unwrap_err();
        assert!(matches!(err, SynthError::Parse { line: 2, .. }));
    }

    #[test]
    fn parse_rejects_non_square() {
        let err = DatasetRecord::parse(Path::new("x.txt"), "0 1 0\n1 0 0\n").unwrap_err();
        assert!(matches!(err, SynthError::Parse { .. }));
    }

    #[test]
    fn parse_keeps_non_binary_values() {
        let text = "# cx cy r ncircle\n0 2\n1 0\n";
        let rec = DatasetRecord::parse(Path::new("x.txt"), text).unwrap();
        assert!(rec.circles.is_empty());
        assert_eq!(rec.grid.first_non_binary(), Some((0, 1, 2)));
    }
}
