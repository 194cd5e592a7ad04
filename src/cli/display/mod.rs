//! Display module for formatted CLI output

pub mod age;
pub mod colors;
pub mod icons;
pub mod table;

pub use age::format_age;
pub use colors::ColorTheme;
pub use icons::StatusIcon;
pub use table::TableRenderer;
