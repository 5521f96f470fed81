use colored::Color;

pub const PRIMARY: Color = Color::TrueColor { r: 102, g: 217, b: 239 };
pub const ACCENT: Color = Color::BrightGreen;
pub const SEPARATOR: Color = Color::BrightBlack;
pub const TEXT_DEFAULT: Color = Color::White;
pub const IPV4_ADDR: Color = Color::TrueColor { r: 166, g: 226, b: 46 };
pub const HOSTNAME: Color = Color::TrueColor { r: 174, g: 129, b: 255 };
pub const PORTS: Color = Color::Cyan;

pub const STATUS_SUPPORTED: Color = Color::Green;
pub const STATUS_OBSOLETE: Color = Color::BrightRed;
pub const STATUS_UNKNOWN: Color = Color::Yellow;
pub const STATUS_ERROR: Color = Color::Magenta;
