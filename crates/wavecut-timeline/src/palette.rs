//! Cut colours.

/// An 8-bit RGB colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serialization",
    derive(serde::Serialize, serde::Deserialize)
)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

const fn rgb(r: u8, g: u8, b: u8) -> Rgb {
    Rgb { r, g, b }
}

/// Colours assigned to cuts by position, wrapping after the last entry.
pub const PALETTE: [Rgb; 16] = [
    rgb(255, 99, 132),
    rgb(54, 162, 235),
    rgb(255, 205, 86),
    rgb(75, 192, 192),
    rgb(153, 102, 255),
    rgb(255, 159, 64),
    rgb(201, 203, 207),
    rgb(255, 99, 255),
    rgb(54, 235, 162),
    rgb(205, 86, 255),
    rgb(192, 75, 192),
    rgb(102, 153, 255),
    rgb(255, 205, 159),
    rgb(99, 255, 132),
    rgb(162, 54, 235),
    rgb(86, 255, 205),
];

/// Palette slot for the cut at `index`.
pub fn color_index(index: usize) -> usize {
    index % PALETTE.len()
}

pub fn color(color_index: usize) -> Rgb {
    PALETTE[color_index % PALETTE.len()]
}
