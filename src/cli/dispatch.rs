//! Flag-to-action mapping and execution

use super::commands::CliArgs;
use super::display::TableRenderer;
use crate::domain::cluster::{ClusterDescriptor, CreateRequest};
use crate::domain::config::{KubernetesConfig, KubernetesConfigBuilder, NautilusConf};
use crate::domain::manifest::Manifest;
use crate::infrastructure::kubernetes::kubeconfig::switch_context;
use crate::shared::error::KubeError;
use tracing::debug;

/// The single operation selected on the command line.
#[derive(Debug, Clone)]
pub enum Action {
    /// Only reads kubeconfig, no cluster client is built.
    SwitchContext { name: String },
    Cluster(ClusterAction),
}

/// Operations that run against the cluster through a client.
#[derive(Debug, Clone)]
pub enum ClusterAction {
    ClusterInfo,
    ApiVersions,
    Nodes,
    Namespaces,
    Pods,
    Apply(Manifest),
    Create(CreateRequest),
}

impl Action {
    /// Resolves the action flag. Manifests are read and parsed here, so a bad
    /// file is rejected before a client is ever built.
    pub fn from_args(args: &CliArgs) -> Result<Self, KubeError> {
        if args.replicas.is_some() && args.create.is_none() {
            return Err(KubeError::usage("--replicas requires --create deployment"));
        }

        if let Some(ref name) = args.switch_context {
            return Ok(Self::SwitchContext { name: name.clone() });
        }

        let action = if args.cluster_info {
            ClusterAction::ClusterInfo
        } else if args.api_versions {
            ClusterAction::ApiVersions
        } else if args.nodes {
            ClusterAction::Nodes
        } else if args.list_namespaces {
            ClusterAction::Namespaces
        } else if args.list_pods {
            ClusterAction::Pods
        } else if let Some(ref path) = args.apply {
            ClusterAction::Apply(Manifest::from_file(path)?)
        } else if let Some(ref values) = args.create {
            let request = CreateRequest::parse(values, args.replicas)?;
            crate::domain::cluster::validator::validate_create_request(&request)?;
            ClusterAction::Create(request)
        } else {
            return Err(KubeError::usage("no action given, see --help"));
        };
        Ok(Self::Cluster(action))
    }
}

/// Rendered command output plus whether the command fully succeeded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutput {
    pub text: String,
    pub success: bool,
}

impl CommandOutput {
    fn ok(text: String) -> Self {
        Self {
            text,
            success: true,
        }
    }
}

/// Runs a cluster action through `descriptor` and renders the result.
pub async fn run(
    action: &ClusterAction,
    descriptor: &ClusterDescriptor,
    config: &KubernetesConfig,
) -> Result<CommandOutput, KubeError> {
    let renderer = TableRenderer::new();

    let output = match action {
        ClusterAction::ClusterInfo => {
            CommandOutput::ok(renderer.render_cluster_info(&descriptor.cluster_info().await?))
        }
        ClusterAction::ApiVersions => {
            CommandOutput::ok(renderer.render_api_versions(&descriptor.api_versions().await?))
        }
        ClusterAction::Nodes => {
            CommandOutput::ok(renderer.render_nodes(&descriptor.nodes().await?))
        }
        ClusterAction::Namespaces => CommandOutput::ok(
            renderer.render_namespaces(&descriptor.namespaces().await?, chrono::Utc::now()),
        ),
        ClusterAction::Pods => CommandOutput::ok(
            renderer.render_pods(descriptor.namespace(), &descriptor.pods().await?),
        ),
        ClusterAction::Apply(manifest) => {
            let report = descriptor.apply(manifest).await;
            CommandOutput {
                text: renderer.render_apply_report(&report),
                success: !report.has_failures(),
            }
        }
        ClusterAction::Create(request) => {
            descriptor.create(request, config.service_port).await?;
            CommandOutput::ok(format!(
                "{} '{}' created in namespace '{}'.",
                request.kind(),
                request.name(),
                descriptor.namespace()
            ))
        }
    };

    Ok(output)
}

/// Validates `name` against the resolved kubeconfig and renders the result.
pub async fn switch(name: &str, config: &KubernetesConfig) -> Result<CommandOutput, KubeError> {
    let switched = switch_context(config.kubeconfig.as_deref(), name).await?;
    Ok(CommandOutput::ok(TableRenderer::new().render_context_switch(&switched)))
}

/// Entry point used by the binary.
pub async fn execute(args: CliArgs) -> anyhow::Result<()> {
    let action = Action::from_args(&args)?;

    let conf = match args.config {
        Some(ref path) => Some(NautilusConf::from(path)?),
        None => None,
    };

    let config = KubernetesConfigBuilder::new()
        .namespace(args.namespace.clone())
        .kubeconfig(args.kubeconfig.clone())
        .context(args.context.clone())
        .conf(conf)
        .build()?;
    debug!(?config, "resolved settings");

    let output = match action {
        Action::SwitchContext { ref name } => switch(name, &config).await?,
        Action::Cluster(ref action) => {
            let descriptor = ClusterDescriptor::new_with_config(&config)
                .await
                .map_err(|e| anyhow::anyhow!("Failed to connect to cluster: {}", e))?;
            run(action, &descriptor, &config).await?
        }
    };
    println!("{}", output.text.trim_end());

    if !output.success {
        anyhow::bail!("one or more objects failed to apply");
    }
    Ok(())
}
