//! Fixed palette file loading
//!
//! A palette file is plain text with one `#rrggbb` color per line. Lines
//! that do not parse as colors (names, comments, blanks) are ignored, so
//! published palette listings can be dropped in unedited.

use crate::color::{self, Rgb};
use crate::io::error::{RenderError, Result, invalid_source};
use std::path::Path;

/// Load a fixed palette from a hex-line text file
///
/// # Errors
///
/// Returns `FileSystem` when the file cannot be read and
/// `InvalidSourceData` when it contains no parseable colors.
pub fn load_palette(path: &Path) -> Result<Vec<Rgb>> {
    let contents = std::fs::read_to_string(path).map_err(|e| RenderError::FileSystem {
        path: path.to_path_buf(),
        operation: "read palette",
        source: e,
    })?;

    let palette: Vec<Rgb> = contents
        .lines()
        .filter_map(|line| color::parse_hex(line.trim()))
        .collect();

    if palette.is_empty() {
        return Err(invalid_source(format!(
            "no #rrggbb entries found in '{}'",
            path.display()
        )));
    }
    Ok(palette)
}

#[cfg(test)]
mod tests {
    use super::load_palette;
    use std::io::Write;

    #[test]
    fn test_palette_file_parses_hex_lines_and_skips_noise() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        writeln!(file, "Material red").expect("write");
        writeln!(file, "#f44336").expect("write");
        writeln!(file, "  #2196f3  ").expect("write");
        writeln!(file).expect("write");
        writeln!(file, "not-a-color").expect("write");

        let palette = load_palette(file.path()).expect("palette should parse");
        assert_eq!(palette, vec![[244, 67, 54], [33, 150, 243]]);
    }

    #[test]
    fn test_palette_file_with_no_colors_fails() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        writeln!(file, "just a comment").expect("write");
        assert!(load_palette(file.path()).is_err());
    }

    #[test]
    fn test_missing_palette_file_fails() {
        let missing = std::path::Path::new("/nonexistent/palette.txt");
        assert!(load_palette(missing).is_err());
    }
}
