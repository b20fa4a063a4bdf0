//! Level grid loading and validation
//!
//! A level is a plain text file, one line per grid row. Every character is
//! either a block symbol or filler (usually `.`). Blank lines are skipped, so
//! a level cannot contain an all-blank row.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Reasons a level cannot be loaded
#[derive(Debug, thiserror::Error)]
pub enum LevelError {
    #[error("level not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("cannot read level {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("level is empty")]
    EmptyLevel,

    #[error("level is not rectangular: row {row} has length {actual}, expected {expected}")]
    NotRectangular {
        row: usize,
        actual: usize,
        expected: usize,
    },
}

/// A validated, rectangular grid of level characters
///
/// Serialized as its list of rows. Deserializing goes through the same
/// checks as [`LevelGrid::parse`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct LevelGrid {
    rows: Vec<String>,
    width: usize,
}

impl LevelGrid {
    /// Read and validate a level file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, LevelError> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(LevelError::NotFound {
                path: path.to_path_buf(),
            });
        }

        let text = std::fs::read_to_string(path).map_err(|source| LevelError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let grid = Self::parse(&text)?;
        log::info!(
            "Loaded level {} ({}x{})",
            path.display(),
            grid.width(),
            grid.height()
        );
        Ok(grid)
    }

    /// Validate level text already in memory
    ///
    /// `\n`, `\r\n` and a lone `\r` all end a line.
    pub fn parse(text: &str) -> Result<Self, LevelError> {
        let text = text.replace("\r\n", "\n").replace('\r', "\n");
        let rows: Vec<String> = text
            .lines()
            .filter(|line| !line.is_empty())
            .map(str::to_owned)
            .collect();

        let Some(first) = rows.first() else {
            return Err(LevelError::EmptyLevel);
        };
        let width = first.chars().count();

        for (row, line) in rows.iter().enumerate().skip(1) {
            let actual = line.chars().count();
            if actual != width {
                return Err(LevelError::NotRectangular {
                    row,
                    actual,
                    expected: width,
                });
            }
        }

        Ok(Self { rows, width })
    }

    pub fn rows(&self) -> &[String] {
        &self.rows
    }

    /// Number of characters per row
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of rows
    pub fn height(&self) -> usize {
        self.rows.len()
    }

    /// Every cell as `(row, col, symbol)`, row-major
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize, char)> + '_ {
        self.rows.iter().enumerate().flat_map(|(row, line)| {
            line.chars()
                .enumerate()
                .map(move |(col, symbol)| (row, col, symbol))
        })
    }
}

impl TryFrom<Vec<String>> for LevelGrid {
    type Error = LevelError;

    fn try_from(rows: Vec<String>) -> Result<Self, Self::Error> {
        Self::parse(&rows.join("\n"))
    }
}

impl From<LevelGrid> for Vec<String> {
    fn from(grid: LevelGrid) -> Self {
        grid.rows
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::io::Write;

    #[test]
    fn test_parse_single_row() {
        let grid = LevelGrid::parse("#.#\n").unwrap();
        assert_eq!(grid.rows(), ["#.#"]);
        assert_eq!(grid.width(), 3);
        assert_eq!(grid.height(), 1);
    }

    #[test]
    fn test_blank_lines_dropped() {
        let grid = LevelGrid::parse("##\n\n..\n\n\n").unwrap();
        assert_eq!(grid.rows(), ["##", ".."]);
    }

    #[test]
    fn test_crlf_line_endings() {
        let grid = LevelGrid::parse("#.\r\n.#\r\n").unwrap();
        assert_eq!(grid.rows(), ["#.", ".#"]);
        assert_eq!(grid.width(), 2);
    }

    #[test]
    fn test_lone_cr_line_endings() {
        let grid = LevelGrid::parse("##\r##\r").unwrap();
        assert_eq!(grid.rows(), ["##", "##"]);
        assert_eq!(grid.width(), 2);
        assert_eq!(grid.height(), 2);
    }

    #[test]
    fn test_mixed_line_endings() {
        let grid = LevelGrid::parse("##\r\n##\r").unwrap();
        assert_eq!(grid.rows(), ["##", "##"]);

        let grid = LevelGrid::parse("#.\r.#\n##\r\n").unwrap();
        assert_eq!(grid.height(), 3);
    }

    #[test]
    fn test_empty_level() {
        assert!(matches!(LevelGrid::parse(""), Err(LevelError::EmptyLevel)));
        assert!(matches!(LevelGrid::parse("\n\n\n"), Err(LevelError::EmptyLevel)));
    }

    #[test]
    fn test_not_rectangular() {
        let err = LevelGrid::parse("##\n###\n").unwrap_err();
        match err {
            LevelError::NotRectangular {
                row,
                actual,
                expected,
            } => {
                assert_eq!(row, 1);
                assert_eq!(actual, 3);
                assert_eq!(expected, 2);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_not_rectangular_counts_retained_rows() {
        // The blank line is skipped, so the short row is the third retained one.
        let err = LevelGrid::parse("###\n\n###\n##\n").unwrap_err();
        assert!(matches!(
            err,
            LevelError::NotRectangular {
                row: 2,
                actual: 2,
                expected: 3
            }
        ));
    }

    #[test]
    fn test_width_counts_chars_not_bytes() {
        let grid = LevelGrid::parse("é.\n.é\n").unwrap();
        assert_eq!(grid.width(), 2);
    }

    #[test]
    fn test_cells_row_major() {
        let grid = LevelGrid::parse("ab\ncd").unwrap();
        let cells: Vec<_> = grid.cells().collect();
        assert_eq!(
            cells,
            vec![(0, 0, 'a'), (0, 1, 'b'), (1, 0, 'c'), (1, 1, 'd')]
        );
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "#.#\n.#.\n").unwrap();
        let grid = LevelGrid::load(file.path()).unwrap();
        assert_eq!(grid.height(), 2);
    }

    #[test]
    fn test_load_invalid_utf8_is_io_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(&[0xff, 0xfe, b'#']).unwrap();
        let result = LevelGrid::load(file.path());
        assert!(matches!(result, Err(LevelError::Io { .. })));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.txt");
        assert!(matches!(
            LevelGrid::load(&path),
            Err(LevelError::NotFound { .. })
        ));
    }

    #[test]
    fn test_load_directory_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            LevelGrid::load(dir.path()),
            Err(LevelError::NotFound { .. })
        ));
    }

    #[test]
    fn test_bundled_levels_load() {
        let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("levels");
        for name in ["classic.txt", "gaps.txt"] {
            let grid = LevelGrid::load(dir.join(name)).unwrap();
            assert_eq!(grid.width(), 12, "{name}");
        }
    }

    #[test]
    fn test_error_messages() {
        let err = LevelError::NotRectangular {
            row: 1,
            actual: 3,
            expected: 2,
        };
        assert_eq!(
            err.to_string(),
            "level is not rectangular: row 1 has length 3, expected 2"
        );
    }

    #[test]
    fn test_deserialize_validates_rows() {
        let grid: LevelGrid = serde_json::from_str(r##"["#.", ".#"]"##).unwrap();
        assert_eq!(grid.width(), 2);
        assert_eq!(grid.height(), 2);

        let json = serde_json::to_string(&grid).unwrap();
        assert_eq!(json, r##"["#.",".#"]"##);

        assert!(serde_json::from_str::<LevelGrid>(r####"["##", "###"]"####).is_err());
        assert!(serde_json::from_str::<LevelGrid>("[]").is_err());
    }

    proptest! {
        #[test]
        fn prop_rectangular_iff_equal_lengths(
            lines in prop::collection::vec("[#.@]{0,6}", 0..8)
        ) {
            let text = lines.join("\n");
            let kept: Vec<&String> = lines.iter().filter(|l| !l.is_empty()).collect();
            match LevelGrid::parse(&text) {
                Ok(grid) => {
                    prop_assert!(!kept.is_empty());
                    prop_assert!(kept.iter().all(|l| l.len() == kept[0].len()));
                    prop_assert_eq!(grid.height(), kept.len());
                }
                Err(LevelError::EmptyLevel) => prop_assert!(kept.is_empty()),
                Err(LevelError::NotRectangular { row, actual, expected }) => {
                    let first_bad = kept
                        .iter()
                        .position(|l| l.len() != kept[0].len())
                        .unwrap();
                    prop_assert_eq!(row, first_bad);
                    prop_assert_eq!(actual, kept[row].len());
                    prop_assert_eq!(expected, kept[0].len());
                }
                Err(other) => prop_assert!(false, "unexpected error: {other:?}"),
            }
        }
    }
}
