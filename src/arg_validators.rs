use color::{AlphaColor, ParseError};
use image::Rgb;

pub(crate) fn validate_positive_integer(value: &str) -> Result<usize, String> {
    let num = value
        .parse::<usize>()
        .map_err(|_| "Not a valid integer".to_string())?;
    if num == 0 {
        return Err("Number must be greater than 0".to_string());
    }
    Ok(num)
}

pub(crate) fn validate_background_color(value: &str) -> Result<Rgb<u8>, String> {
    match parse_color(value) {
        Ok(color) => Ok(color),
        Err(e) => Err(e.to_string()),
    }
}

/// Parse a string into a color, with format like this #RRGGBB
fn parse_color(color: &str) -> Result<Rgb<u8>, ParseError> {
    let color = color::parse_color(color)?;
    let color: AlphaColor<color::Srgb> = color.to_alpha_color();
    let [r, g, b, _] = color.to_rgba8().to_u8_array();
    Ok(Rgb([r, g, b]))
}
