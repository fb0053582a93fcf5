//! Line overlays from coordinate files
//!
//! Loads a whitespace-delimited text file of (x, z) pairs and draws it as a
//! solid line, either as one connected polyline or as disconnected two-point
//! segments.

use std::path::Path;

use tracing::warn;

use crate::error::{PlotError, Result};
use crate::surface::axes::Axes;
use crate::surface::elements::LineStyle;

/// Load (x, z) rows from a whitespace-delimited text file
///
/// Blank lines are skipped; rows with fewer than two numeric columns fail.
pub fn load_line_file(path: &Path) -> Result<Vec<(f64, f64)>> {
    let content = std::fs::read_to_string(path).map_err(|source| PlotError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let mut rows = Vec::new();
    for (number, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let mut fields = line.split_whitespace();
        let row = (|| {
            let x: f64 = fields.next()?.parse().ok()?;
            let z: f64 = fields.next()?.parse().ok()?;
            Some((x, z))
        })();

        match row {
            Some(pair) => rows.push(pair),
            None => {
                return Err(PlotError::LineFile {
                    path: path.to_path_buf(),
                    line: number + 1,
                    reason: format!("expected two numeric columns, got '{line}'"),
                })
            }
        }
    }

    Ok(rows)
}

/// Draw the line file's coordinates into `ax` as solid black lines
///
/// `step == 1` connects all rows into one polyline. `step == 2` draws a
/// separate two-point segment per consecutive pair, dropping an odd leftover
/// row. Any other step draws nothing; that gap is inherited behavior, kept
/// rather than guessed into a general chunking rule.
pub fn draw_line_file(ax: &mut Axes, path: &Path, step: usize) -> Result<()> {
    let rows = load_line_file(path)?;

    match step {
        1 => {
            let (xs, ys) = rows.into_iter().unzip();
            ax.plot_line(xs, ys, LineStyle::default());
        }
        2 => {
            for pair in rows.chunks_exact(2) {
                ax.plot_line(
                    vec![pair[0].0, pair[1].0],
                    vec![pair[0].1, pair[1].1],
                    LineStyle::default(),
                );
            }
        }
        other => {
            warn!("unsupported line step {other}, nothing drawn");
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::elements::Element;
    use std::io::Write;

    fn write_lines(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    fn drawn_lines(ax: &Axes) -> Vec<(&Vec<f64>, &Vec<f64>)> {
        ax.elements()
            .iter()
            .filter_map(|e| match e {
                Element::Line { xs, ys, .. } => Some((xs, ys)),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_step_one_connects_all_rows() {
        let file = write_lines("0 0\n1 1\n2 0\n");
        let mut ax = Axes::default();
        draw_line_file(&mut ax, file.path(), 1).unwrap();

        let lines = drawn_lines(&ax);
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].0, &vec![0.0, 1.0, 2.0]);
        assert_eq!(lines[0].1, &vec![0.0, 1.0, 0.0]);
    }

    #[test]
    fn test_step_two_drops_odd_leftover() {
        let file = write_lines("0 0\n1 1\n2 0\n");
        let mut ax = Axes::default();
        draw_line_file(&mut ax, file.path(), 2).unwrap();

        // One segment (0,0)-(1,1); the third row stays undrawn
        let lines = drawn_lines(&ax);
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].0, &vec![0.0, 1.0]);
        assert_eq!(lines[0].1, &vec![0.0, 1.0]);
    }

    #[test]
    fn test_other_steps_draw_nothing() {
        let file = write_lines("0 0\n1 1\n2 0\n");
        let mut ax = Axes::default();
        draw_line_file(&mut ax, file.path(), 3).unwrap();
        assert!(ax.elements().is_empty());
    }

    #[test]
    fn test_blank_lines_and_extra_whitespace() {
        let file = write_lines("  0   0\n\n1\t1\n");
        let rows = load_line_file(file.path()).unwrap();
        assert_eq!(rows, vec![(0.0, 0.0), (1.0, 1.0)]);
    }

    #[test]
    fn test_non_numeric_content_fails_with_line_number() {
        let file = write_lines("0 0\n1 abc\n");
        let err = load_line_file(file.path());
        assert!(matches!(
            err,
            Err(PlotError::LineFile { line: 2, .. })
        ));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let mut ax = Axes::default();
        let err = draw_line_file(&mut ax, Path::new("/no/such/file.xz"), 1);
        assert!(matches!(err, Err(PlotError::Io { .. })));
    }
}
