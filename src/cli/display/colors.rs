//! Color theme for CLI output

use comfy_table::Color as TableColor;

/// Color theme for terminal output
#[derive(Debug, Clone)]
pub struct ColorTheme {
    pub success: TableColor,
    pub warning: TableColor,
    pub error: TableColor,
    pub muted: TableColor,
}

impl Default for ColorTheme {
    fn default() -> Self {
        Self {
            success: TableColor::Green,
            warning: TableColor::Yellow,
            error: TableColor::Red,
            muted: TableColor::DarkGrey,
        }
    }
}

impl ColorTheme {
    /// Get color for a node, namespace or pod status string
    pub fn get_status_color(&self, status: &str) -> TableColor {
        match status {
            "Ready" | "Running" | "Active" | "Succeeded" => self.success,
            "Pending" | "Terminating" => self.warning,
            "NotReady" | "Failed" => self.error,
            _ => self.muted,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_theme() {
        let theme = ColorTheme::default();
        assert_eq!(theme.success, TableColor::Green);
        assert_eq!(theme.warning, TableColor::Yellow);
        assert_eq!(theme.error, TableColor::Red);
    }

    #[test]
    fn test_get_status_color() {
        let theme = ColorTheme::default();
        assert_eq!(theme.get_status_color("Ready"), TableColor::Green);
        assert_eq!(theme.get_status_color("Running"), TableColor::Green);
        assert_eq!(theme.get_status_color("Pending"), TableColor::Yellow);
        assert_eq!(theme.get_status_color("NotReady"), TableColor::Red);
        assert_eq!(theme.get_status_color("Unknown"), TableColor::DarkGrey);
    }
}
