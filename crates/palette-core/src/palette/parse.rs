//! Color attribute parsing
//!
//! Styling documents describe a color either as a decimal `r,g,b` triplet or
//! as a hex string, and transparency as a fraction in `[0, 1]`.

use super::error::ParseColorError;

/// Parse a hex color into three channels.
///
/// A leading `#` is ignored. The remaining digits are split into three
/// equal-length substrings, one per channel, so both `"ff8000"` and
/// `"f80"` are accepted (the latter as `(15, 8, 0)`, not expanded).
///
/// # Example
///
/// ```
/// use palette_core::parse_hex_rgb;
///
/// assert_eq!(parse_hex_rgb("#FF8000").unwrap(), (255, 128, 0));
/// ```
pub fn parse_hex_rgb(value: &str) -> Result<(u8, u8, u8), ParseColorError> {
    let hex = value.trim().trim_start_matches('#');
    if !hex.is_ascii() {
        return Err(ParseColorError::NotAscii);
    }
    let len = hex.len();
    if len == 0 || len % 3 != 0 {
        return Err(ParseColorError::InvalidLength(len));
    }

    let step = len / 3;
    let channel = |i: usize| -> Result<u8, ParseColorError> {
        let raw = u32::from_str_radix(&hex[i * step..(i + 1) * step], 16)?;
        u8::try_from(raw).map_err(|_| ParseColorError::ChannelOutOfRange(raw))
    };

    Ok((channel(0)?, channel(1)?, channel(2)?))
}

/// Parse a comma-separated decimal `r,g,b` triplet.
pub fn parse_rgb_triplet(value: &str) -> Result<(u8, u8, u8), ParseColorError> {
    let invalid = || ParseColorError::InvalidTriplet(value.to_string());

    let channels = value
        .split(',')
        .map(|part| part.trim().parse::<u8>().map_err(|_| invalid()))
        .collect::<Result<Vec<u8>, _>>()?;

    match channels.as_slice() {
        [r, g, b] => Ok((*r, *g, *b)),
        _ => Err(invalid()),
    }
}

/// Scale an opacity fraction to an 8-bit alpha.
///
/// The product is truncated toward zero, so `0.5` becomes `127`. Values
/// outside `[0, 1]` are clamped.
pub fn opacity_to_alpha(fraction: f64) -> Result<u8, ParseColorError> {
    if !fraction.is_finite() {
        return Err(ParseColorError::InvalidOpacity(fraction.to_string()));
    }
    Ok((fraction * 255.0).trunc().clamp(0.0, 255.0) as u8)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex_six_digits() {
        assert_eq!(parse_hex_rgb("#00ff7f").unwrap(), (0, 255, 127));
        assert_eq!(parse_hex_rgb("A0B0C0").unwrap(), (160, 176, 192));
    }

    #[test]
    fn test_parse_hex_three_digits_not_expanded() {
        assert_eq!(parse_hex_rgb("#f80").unwrap(), (15, 8, 0));
    }

    #[test]
    fn test_parse_hex_invalid_length() {
        assert_eq!(
            parse_hex_rgb("#ff00ff00"),
            Err(ParseColorError::InvalidLength(8))
        );
        assert_eq!(parse_hex_rgb("#"), Err(ParseColorError::InvalidLength(0)));
    }

    #[test]
    fn test_parse_hex_invalid_digit() {
        assert!(matches!(
            parse_hex_rgb("#gg0000"),
            Err(ParseColorError::InvalidHex(_))
        ));
    }

    #[test]
    fn test_parse_hex_channel_out_of_range() {
        assert_eq!(
            parse_hex_rgb("fff000000"),
            Err(ParseColorError::ChannelOutOfRange(0xfff))
        );
    }

    #[test]
    fn test_parse_hex_non_ascii() {
        assert_eq!(parse_hex_rgb("#ééé"), Err(ParseColorError::NotAscii));
    }

    #[test]
    fn test_parse_triplet() {
        assert_eq!(parse_rgb_triplet("10,20,30").unwrap(), (10, 20, 30));
        assert_eq!(parse_rgb_triplet(" 10 , 20 ,30 ").unwrap(), (10, 20, 30));
    }

    #[test]
    fn test_parse_triplet_rejects_bad_input() {
        assert!(parse_rgb_triplet("10,20").is_err());
        assert!(parse_rgb_triplet("10,20,30,40").is_err());
        assert!(parse_rgb_triplet("10,20,300").is_err());
        assert!(parse_rgb_triplet("red").is_err());
    }

    #[test]
    fn test_opacity_truncates() {
        assert_eq!(opacity_to_alpha(1.0).unwrap(), 255);
        assert_eq!(opacity_to_alpha(0.0).unwrap(), 0);
        assert_eq!(opacity_to_alpha(0.5).unwrap(), 127);
        assert_eq!(opacity_to_alpha(0.8).unwrap(), 204);
    }

    #[test]
    fn test_opacity_clamps() {
        assert_eq!(opacity_to_alpha(1.5).unwrap(), 255);
        assert_eq!(opacity_to_alpha(-0.2).unwrap(), 0);
        assert!(opacity_to_alpha(f64::NAN).is_err());
    }
}
