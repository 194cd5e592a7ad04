// Copyright 2025 JiangLong.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use crate::domain::cluster::request::CreateRequest;
use crate::domain::cluster::status::{
    ApiVersions, ApplyEntry, ApplyReport, ApplyResult, ClusterInfo, NamespaceSummary, NodeSummary,
    PodSummary,
};
use crate::domain::cluster::validator::validate_create_request;
use crate::domain::config::KubernetesConfig;
use crate::domain::manifest::{Manifest, ManifestObject};
use crate::infrastructure::kubernetes::client::{NautilusKubeClient, NautilusKubeClientImpl};
use crate::infrastructure::kubernetes::resources::{DeploymentBuilder, ServiceBuilder};
use crate::shared::error::KubeError;
use tracing::{info, warn};

/// Runs each CLI operation against a cluster client.
pub struct ClusterDescriptor {
    client: Box<dyn NautilusKubeClient>,
    namespace: String,
}

impl ClusterDescriptor {
    pub async fn new_with_config(config: &KubernetesConfig) -> Result<Self, KubeError> {
        let client = NautilusKubeClientImpl::new_with_config(config).await?;
        Ok(Self::with_client(Box::new(client)))
    }

    pub fn with_client(client: Box<dyn NautilusKubeClient>) -> Self {
        let namespace = client.namespace().to_string();
        Self { client, namespace }
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub async fn cluster_info(&self) -> Result<ClusterInfo, KubeError> {
        let resources = self.client.list_core_api_resources().await?;
        Ok(ClusterInfo {
            control_plane_url: self.client.cluster_url(),
            api_resource_count: resources.resources.len(),
        })
    }

    pub async fn api_versions(&self) -> Result<ApiVersions, KubeError> {
        let server = self.client.get_server_version().await?;
        let group_versions = self.client.list_api_versions().await?;
        Ok(ApiVersions {
            server,
            group_versions,
        })
    }

    pub async fn nodes(&self) -> Result<Vec<NodeSummary>, KubeError> {
        let nodes = self.client.list_nodes().await?;
        Ok(nodes.iter().map(NodeSummary::from).collect())
    }

    pub async fn namespaces(&self) -> Result<Vec<NamespaceSummary>, KubeError> {
        let namespaces = self.client.list_namespaces().await?;
        Ok(namespaces.iter().map(NamespaceSummary::from).collect())
    }

    pub async fn pods(&self) -> Result<Vec<PodSummary>, KubeError> {
        let pods = self.client.list_pods().await?;
        Ok(pods.iter().map(PodSummary::from).collect())
    }

    pub async fn create(
        &self,
        request: &CreateRequest,
        service_port: i32,
    ) -> Result<(), KubeError> {
        validate_create_request(request)?;

        match request {
            CreateRequest::Deployment {
                name,
                image,
                replicas,
            } => {
                let deployment = DeploymentBuilder::new(
                    name.clone(),
                    self.namespace.clone(),
                    image.clone(),
                    *replicas,
                )
                .build()?;
                self.client.create_deployment(&deployment).await
            }
            CreateRequest::Service { name } => {
                let service =
                    ServiceBuilder::new(name.clone(), self.namespace.clone(), service_port)
                        .build()?;
                self.client.create_service(&service).await
            }
        }
    }

    /// Applies every object in file order. A failing object does not stop the rest.
    pub async fn apply(&self, manifest: &Manifest) -> ApplyReport {
        info!(path = %manifest.path, objects = manifest.objects.len(), "applying manifest");
        let mut report = ApplyReport::default();

        for object in &manifest.objects {
            let outcome = match object {
                ManifestObject::Deployment(d) => Some(self.client.apply_deployment(d).await),
                ManifestObject::Service(s) => Some(self.client.apply_service(s).await),
                ManifestObject::Pod(p) => Some(self.client.apply_pod(p).await),
                ManifestObject::Unsupported { kind, name } => {
                    warn!(%kind, %name, "skipping unsupported kind");
                    None
                }
            };

            let result = match outcome {
                Some(Ok(applied)) => ApplyResult::Applied(applied),
                Some(Err(e)) => ApplyResult::Failed(e.to_string()),
                None => ApplyResult::Skipped,
            };

            report.entries.push(ApplyEntry {
                kind: object.kind().to_string(),
                name: object.name().to_string(),
                namespace: object.namespace().unwrap_or(&self.namespace).to_string(),
                result,
            });
        }

        report
    }
}
