//! Color palettes for the light and dark themes.

use ratatui::style::Color;

/// Named color roles used by the screen. Resolved from the dark-mode flag;
/// every role is fixed per palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub primary: Color,
    pub secondary: Color,
    pub background: Color,
    pub card: Color,
    pub text: Color,
    pub secondary_text: Color,
    pub error: Color,
    pub activity_indicator: Color,
    pub switch_thumb: Color,
    pub switch_track: Color,
}

const LIGHT: Palette = Palette {
    primary: Color::Rgb(0x81, 0xb0, 0xff),
    secondary: Color::Rgb(0x76, 0x75, 0x77),
    background: Color::Rgb(0xff, 0xff, 0xff),
    card: Color::Rgb(0xbc, 0xbc, 0xbc),
    text: Color::Rgb(0x00, 0x00, 0x00),
    secondary_text: Color::Rgb(0x55, 0x55, 0x55),
    error: Color::Rgb(0xff, 0x00, 0x00),
    activity_indicator: Color::Rgb(0x00, 0x00, 0xff),
    switch_thumb: Color::Rgb(0x00, 0x00, 0x00),
    switch_track: Color::Rgb(0x76, 0x75, 0x77),
};

const DARK: Palette = Palette {
    primary: Color::Rgb(0x4a, 0x90, 0xe2),
    secondary: Color::Rgb(0x55, 0x55, 0x55),
    background: Color::Rgb(0x00, 0x00, 0x00),
    card: Color::Rgb(0x33, 0x33, 0x33),
    text: Color::Rgb(0xff, 0xff, 0xff),
    secondary_text: Color::Rgb(0xcc, 0xcc, 0xcc),
    error: Color::Rgb(0xff, 0x00, 0x00),
    activity_indicator: Color::Rgb(0x00, 0x00, 0xff),
    switch_thumb: Color::Rgb(0xff, 0xff, 0xff),
    switch_track: Color::Rgb(0x81, 0xb0, 0xff),
};

impl Palette {
    /// Map the dark-mode flag to its palette. Pure and total.
    pub fn resolve(dark_mode: bool) -> Palette {
        if dark_mode {
            DARK
        } else {
            LIGHT
        }
    }
}
