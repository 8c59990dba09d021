use bevy::color::Color;

/// Seconds between FPS notifications to the host page.
pub const FPS_NOTIFICATION_INTERVAL: f32 = 0.5;

/// Convert a 0xRRGGBB value into an sRGB colour.
pub fn hex_colour(hex: u32) -> Color {
    Color::srgb_u8(
        ((hex >> 16) & 0xff) as u8,
        ((hex >> 8) & 0xff) as u8,
        (hex & 0xff) as u8,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_colour_splits_channels() {
        assert_eq!(hex_colour(0xfffaaa), Color::srgb_u8(0xff, 0xfa, 0xaa));
        assert_eq!(hex_colour(0x404040), Color::srgb_u8(0x40, 0x40, 0x40));
    }
}
