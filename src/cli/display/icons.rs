//! Status icons for CLI output

/// Status icons for different states
pub struct StatusIcon;

impl StatusIcon {
    pub const SUCCESS: &'static str = "✓";

    pub const WARNING: &'static str = "⚠";

    pub const ERROR: &'static str = "✗";

    pub const SKIPPED: &'static str = "-";

    pub const UNKNOWN: &'static str = "?";

    /// Get status icon for a node, namespace or pod status string
    pub fn get_status_icon(status: &str) -> &'static str {
        match status {
            "Ready" | "Running" | "Active" | "Succeeded" => Self::SUCCESS,
            "Pending" | "Terminating" => Self::WARNING,
            "NotReady" | "Failed" => Self::ERROR,
            _ => Self::UNKNOWN,
        }
    }
}
