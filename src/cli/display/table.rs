//! Table rendering for CLI output

use super::{format_age, ColorTheme, StatusIcon};
use crate::domain::cluster::{
    ApiVersions, ApplyReport, ApplyResult, ClusterInfo, NamespaceSummary, NodeSummary, PodSummary,
};
use crate::infrastructure::kubernetes::ContextSwitch;
use chrono::{DateTime, Utc};
use colored::Colorize;
use comfy_table::{presets::UTF8_FULL, Cell, CellAlignment, ContentArrangement, Table};

const NONE: &str = "<none>";

/// Table renderer for formatted output
pub struct TableRenderer {
    theme: ColorTheme,
}

impl Default for TableRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl TableRenderer {
    /// Create a new table renderer with default theme
    pub fn new() -> Self {
        Self {
            theme: ColorTheme::default(),
        }
    }

    fn new_table(headers: &[&str]) -> Table {
        let mut table = Table::new();
        table
            .load_preset(UTF8_FULL)
            .set_content_arrangement(ContentArrangement::Dynamic)
            .set_header(
                headers
                    .iter()
                    .map(|h| Cell::new(h).set_alignment(CellAlignment::Left))
                    .collect::<Vec<_>>(),
            );
        table
    }

    fn status_cell(&self, status: &str) -> Cell {
        Cell::new(format!("{} {}", StatusIcon::get_status_icon(status), status))
            .fg(self.theme.get_status_color(status))
    }

    pub fn render_cluster_info(&self, info: &ClusterInfo) -> String {
        let mut output = String::new();
        output.push_str(&format!("API Resources: {}\n", info.api_resource_count));
        output.push_str(&format!(
            "Kubernetes control plane is running at {}\n",
            info.control_plane_url.green()
        ));
        output.push_str(&format!("KubeDNS is running at {}\n", info.kube_dns_url().green()));
        output
    }

    pub fn render_api_versions(&self, versions: &ApiVersions) -> String {
        let server = &versions.server;
        let mut output = String::new();
        output.push_str("Kubernetes API Versions:\n");
        output.push_str(&format!("Major: {}\n", server.major));
        output.push_str(&format!("Minor: {}\n", server.minor));
        output.push_str(&format!("Platform: {}\n", server.platform));
        output.push_str(&format!("Git Version: {}\n", server.git_version));

        if !versions.group_versions.is_empty() {
            output.push_str(&format!(
                "\nServed API versions {}:\n",
                format!("[{}]", versions.group_versions.len()).bright_black()
            ));
            for gv in &versions.group_versions {
                output.push_str(&format!("  {}\n", gv));
            }
        }
        output
    }

    /// Render cluster nodes as a formatted table
    pub fn render_nodes(&self, nodes: &[NodeSummary]) -> String {
        if nodes.is_empty() {
            return "No nodes found".to_string();
        }

        let mut table = Self::new_table(&[
            "NAME",
            "STATUS",
            "VERSION",
            "OS-IMAGE",
            "CONTAINER-RUNTIME",
            "ADDRESSES",
        ]);

        for node in nodes {
            let addresses = if node.addresses.is_empty() {
                NONE.to_string()
            } else {
                node.addresses
                    .iter()
                    .map(|a| format!("{}: {}", a.address_type, a.address))
                    .collect::<Vec<_>>()
                    .join("\n")
            };

            table.add_row(vec![
                Cell::new(&node.name),
                self.status_cell(&node.status),
                Cell::new(&node.kubelet_version),
                Cell::new(&node.os_image),
                Cell::new(&node.container_runtime),
                Cell::new(addresses),
            ]);
        }

        let mut output = String::new();
        output.push_str(&format!(
            "Cluster Nodes {}\n",
            format!("[{} nodes]", nodes.len()).bright_black()
        ));
        output.push_str(&table.to_string());
        output
    }

    /// Render namespaces with ages relative to `now`
    pub fn render_namespaces(&self, namespaces: &[NamespaceSummary], now: DateTime<Utc>) -> String {
        if namespaces.is_empty() {
            return "No namespaces found".to_string();
        }

        let mut table = Self::new_table(&["NAMESPACE", "STATUS", "AGE"]);
        for ns in namespaces {
            let age = ns
                .created
                .map(|created| format_age(created, now))
                .unwrap_or_else(|| NONE.to_string());
            table.add_row(vec![
                Cell::new(&ns.name),
                self.status_cell(&ns.status),
                Cell::new(age).fg(self.theme.muted),
            ]);
        }
        table.to_string()
    }

    pub fn render_pods(&self, namespace: &str, pods: &[PodSummary]) -> String {
        if pods.is_empty() {
            return format!("No pods found in namespace '{}'", namespace);
        }

        let mut table = Self::new_table(&["NAME", "STATUS", "IP", "NODE"]);
        for pod in pods {
            table.add_row(vec![
                Cell::new(&pod.name),
                self.status_cell(&pod.status),
                Cell::new(pod.ip.as_deref().unwrap_or(NONE)),
                Cell::new(pod.node.as_deref().unwrap_or(NONE)),
            ]);
        }

        let mut output = String::new();
        output.push_str(&format!("Pods in namespace '{}':\n", namespace));
        output.push_str(&table.to_string());
        output
    }

    /// One line per manifest object, kubectl style
    pub fn render_apply_report(&self, report: &ApplyReport) -> String {
        let mut output = String::new();
        for entry in &report.entries {
            let subject = format!(
                "{}/{} (namespace {})",
                entry.kind.to_lowercase(),
                entry.name,
                entry.namespace
            );
            let line = match &entry.result {
                ApplyResult::Applied(outcome) => {
                    format!("{} {} {}", StatusIcon::SUCCESS.green(), subject, outcome)
                }
                ApplyResult::Skipped => format!(
                    "{} {} skipped: unsupported resource kind",
                    StatusIcon::SKIPPED.bright_black(),
                    subject
                ),
                ApplyResult::Failed(reason) => {
                    format!("{} {} failed: {}", StatusIcon::ERROR.red(), subject, reason)
                }
            };
            output.push_str(&line);
            output.push('\n');
        }
        output
    }

    pub fn render_context_switch(&self, switched: &ContextSwitch) -> String {
        let mut output = format!("Switched to context '{}'\n", switched.name.green());
        if let Some(ref previous) = switched.previous {
            output.push_str(&format!("  Previous context: {}\n", previous));
        }
        output.push_str(&format!("  Cluster: {}\n", switched.cluster_url));
        output.push_str(&format!("  Default namespace: {}\n", switched.default_namespace));
        output
    }
}
