//! Color representation, sampling, quantization, and gradient construction

/// Linear two-color gradient construction
pub mod gradient;
/// Median-cut palette reduction and palette matching
pub mod quantize;
/// Clamped pixel sampling from a source raster
pub mod sampler;

/// A color as packed 8-bit RGB channels
pub type Rgb = [u8; 3];

/// Parse a `#rrggbb` hex string into a color
///
/// Returns `None` for anything that is not exactly a `#` followed by six
/// hex digits, so palette files can carry comments and blank lines.
pub fn parse_hex(text: &str) -> Option<Rgb> {
    let digits = text.strip_prefix('#')?;
    if digits.len() != 6 {
        return None;
    }
    let r = u8::from_str_radix(digits.get(0..2)?, 16).ok()?;
    let g = u8::from_str_radix(digits.get(2..4)?, 16).ok()?;
    let b = u8::from_str_radix(digits.get(4..6)?, 16).ok()?;
    Some([r, g, b])
}

#[cfg(test)]
mod tests {
    use super::parse_hex;

    #[test]
    fn test_parse_hex_accepts_six_digit_colors() {
        assert_eq!(parse_hex("#ff8000"), Some([255, 128, 0]));
        assert_eq!(parse_hex("#000000"), Some([0, 0, 0]));
    }

    #[test]
    fn test_parse_hex_rejects_malformed_input() {
        assert_eq!(parse_hex("ff8000"), None);
        assert_eq!(parse_hex("#fff"), None);
        assert_eq!(parse_hex("#gg0000"), None);
        assert_eq!(parse_hex(""), None);
    }
}
