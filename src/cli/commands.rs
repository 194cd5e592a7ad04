// CLI flag definitions

use crate::infrastructure::constants::CONF_FILE_ENV;
use clap::{ArgGroup, Parser};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "nautilus",
    version,
    about = "Describe Kubernetes cluster information",
    long_about = "A small CLI that reads cluster information and creates or applies basic workloads through the Kubernetes API"
)]
#[command(group(
    ArgGroup::new("action")
        .required(true)
        .multiple(false)
        .args([
            "cluster_info",
            "api_versions",
            "nodes",
            "list_namespaces",
            "list_pods",
            "switch_context",
            "apply",
            "create",
        ])
))]
pub struct CliArgs {
    /// Namespace for namespaced operations (default: "default")
    #[arg(long, short = 'n')]
    pub namespace: Option<String>,

    /// Print the cluster information
    #[arg(long, visible_alias = "cluster")]
    pub cluster_info: bool,

    /// Print the server version and the served API versions
    #[arg(long)]
    pub api_versions: bool,

    /// Print information about all nodes
    #[arg(long)]
    pub nodes: bool,

    /// Print information about all namespaces
    #[arg(long, alias = "list_namespaces")]
    pub list_namespaces: bool,

    /// List all pods in the selected namespace
    #[arg(long)]
    pub list_pods: bool,

    /// Switch to a different kubeconfig context
    #[arg(long, value_name = "CONTEXT")]
    pub switch_context: Option<String>,

    /// Apply a manifest file (Deployment, Service and Pod objects)
    #[arg(long, value_name = "FILE")]
    pub apply: Option<PathBuf>,

    /// Create a resource: `deployment <NAME> <IMAGE>` or `service <NAME>`
    #[arg(long, num_args = 2..=3, value_names = ["RESOURCE_TYPE", "NAME", "IMAGE"])]
    pub create: Option<Vec<String>>,

    /// Number of replicas for `--create deployment`
    #[arg(long, value_parser = clap::value_parser!(i32).range(0..))]
    pub replicas: Option<i32>,

    /// Path to kubeconfig file
    /// If not specified, uses default kubeconfig resolution (KUBECONFIG env or ~/.kube/config)
    #[arg(long)]
    pub kubeconfig: Option<String>,

    /// Kubernetes context to use
    /// If not specified, uses current context from kubeconfig
    #[arg(long)]
    pub context: Option<String>,

    /// Path to nautilus configuration file (TOML)
    #[arg(long, env = CONF_FILE_ENV, value_name = "PATH")]
    pub config: Option<String>,
}
