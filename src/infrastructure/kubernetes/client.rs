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

use crate::domain::config::KubernetesConfig;
use crate::shared::error::KubeError;
use k8s_openapi::api::apps::v1::Deployment;
use k8s_openapi::api::core::v1::{Namespace, Node, Pod, Service};
use k8s_openapi::apimachinery::pkg::apis::meta::v1::APIResourceList;
use k8s_openapi::apimachinery::pkg::version::Info;
use k8s_openapi::NamespaceResourceScope;
use kube::api::{ListParams, Patch, PatchParams, PostParams};
use kube::config::{KubeConfigOptions, Kubeconfig};
use kube::{Api, Client, Resource, ResourceExt};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt;
use tracing::{debug, info};

/// Result of applying one object.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyOutcome {
    Created,
    Configured,
}

impl fmt::Display for ApplyOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApplyOutcome::Created => write!(f, "created"),
            ApplyOutcome::Configured => write!(f, "configured"),
        }
    }
}

/// Every cluster call the CLI makes goes through this trait.
#[async_trait::async_trait]
pub trait NautilusKubeClient: Send + Sync {
    /// Namespace used when an object does not carry its own.
    fn namespace(&self) -> &str;

    /// API server URL from the loaded kubeconfig.
    fn cluster_url(&self) -> String;

    async fn list_core_api_resources(&self) -> Result<APIResourceList, KubeError>;

    async fn get_server_version(&self) -> Result<Info, KubeError>;

    /// Served group versions, core `v1` first.
    async fn list_api_versions(&self) -> Result<Vec<String>, KubeError>;

    async fn list_nodes(&self) -> Result<Vec<Node>, KubeError>;

    async fn list_namespaces(&self) -> Result<Vec<Namespace>, KubeError>;

    async fn list_pods(&self) -> Result<Vec<Pod>, KubeError>;

    async fn create_deployment(&self, deployment: &Deployment) -> Result<(), KubeError>;

    async fn create_service(&self, service: &Service) -> Result<(), KubeError>;

    async fn apply_deployment(&self, deployment: &Deployment) -> Result<ApplyOutcome, KubeError>;

    async fn apply_service(&self, service: &Service) -> Result<ApplyOutcome, KubeError>;

    async fn apply_pod(&self, pod: &Pod) -> Result<ApplyOutcome, KubeError>;
}

pub struct NautilusKubeClientImpl {
    client: Client,
    namespace: String,
    cluster_url: String,
    field_manager: String,
}

impl NautilusKubeClientImpl {
    pub async fn new_with_config(config: &KubernetesConfig) -> Result<Self, KubeError> {
        let kube_config = if config.kubeconfig.is_none() && config.context.is_none() {
            kube::Config::infer().await.map_err(|e| {
                KubeError::KubeError(format!("Failed to infer Kubernetes config: {}", e))
            })?
        } else {
            let kubeconfig = if let Some(ref path) = config.kubeconfig {
                Kubeconfig::read_from(path)
                    .map_err(|e| KubeError::KubeError(format!("Failed to load kubeconfig: {}", e)))?
            } else {
                Kubeconfig::read()
                    .map_err(|e| KubeError::KubeError(format!("Failed to load kubeconfig: {}", e)))?
            };

            let config_options = KubeConfigOptions {
                context: config.context.clone(),
                cluster: None,
                user: None,
            };

            kube::Config::from_custom_kubeconfig(kubeconfig, &config_options)
                .await
                .map_err(|e| {
                    KubeError::KubeError(format!("Failed to create Kubernetes config: {}", e))
                })?
        };

        let cluster_url = kube_config.cluster_url.to_string();
        debug!(%cluster_url, namespace = %config.namespace, "connecting to cluster");

        let client = Client::try_from(kube_config).map_err(|e| {
            KubeError::KubeError(format!("Failed to create Kubernetes client: {}", e))
        })?;

        Ok(Self::from_client(client, &cluster_url, config))
    }

    /// Wraps an already built `kube::Client`.
    pub fn from_client(client: Client, cluster_url: &str, config: &KubernetesConfig) -> Self {
        Self {
            client,
            namespace: config.namespace.clone(),
            cluster_url: cluster_url.trim_end_matches('/').to_string(),
            field_manager: config.field_manager.clone(),
        }
    }

    async fn create_resource<K>(&self, object: &K) -> Result<(), KubeError>
    where
        K: Resource<Scope = NamespaceResourceScope, DynamicType = ()>
            + Clone
            + DeserializeOwned
            + Serialize
            + fmt::Debug,
    {
        let kind = K::kind(&()).to_string();
        let name = object.name_any();
        let namespace = object.namespace().unwrap_or_else(|| self.namespace.clone());
        let api: Api<K> = Api::namespaced(self.client.clone(), &namespace);
        let pp = PostParams::default();

        info!(%kind, %name, %namespace, "creating");
        match api.create(&pp, object).await {
            Ok(_) => Ok(()),
            Err(kube::Error::Api(ae)) if ae.code == 409 => {
                Err(KubeError::already_exists(kind, name, namespace))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Creates the object, or server-side applies it when it already exists.
    async fn apply_resource<K>(&self, object: &K) -> Result<ApplyOutcome, KubeError>
    where
        K: Resource<Scope = NamespaceResourceScope, DynamicType = ()>
            + Clone
            + DeserializeOwned
            + Serialize
            + fmt::Debug,
    {
        let kind = K::kind(&()).to_string();
        let name = object
            .meta()
            .name
            .clone()
            .ok_or_else(|| KubeError::ConfigError(format!("{} name is required", kind)))?;
        let namespace = object.namespace().unwrap_or_else(|| self.namespace.clone());
        let api: Api<K> = Api::namespaced(self.client.clone(), &namespace);

        match api.get(&name).await {
            Ok(_) => {
                info!(%kind, %name, %namespace, "patching existing object");
                let patch_params = PatchParams::apply(&self.field_manager).force();
                let patch = serde_json::to_value(object)?;
                api.patch(&name, &patch_params, &Patch::Apply(patch)).await?;
                Ok(ApplyOutcome::Configured)
            }
            Err(kube::Error::Api(ae)) if ae.code == 404 => {
                info!(%kind, %name, %namespace, "creating new object");
                let pp = PostParams::default();
                api.create(&pp, object).await?;
                Ok(ApplyOutcome::Created)
            }
            Err(e) => Err(KubeError::KubeError(e.to_string())),
        }
    }
}

#[async_trait::async_trait]
impl NautilusKubeClient for NautilusKubeClientImpl {
    fn namespace(&self) -> &str {
        &self.namespace
    }

    fn cluster_url(&self) -> String {
        self.cluster_url.clone()
    }

    async fn list_core_api_resources(&self) -> Result<APIResourceList, KubeError> {
        debug!("listing core API resources");
        Ok(self
            .client
            .list_core_api_resources(crate::infrastructure::constants::CORE_API_VERSION)
            .await?)
    }

    async fn get_server_version(&self) -> Result<Info, KubeError> {
        debug!("fetching server version");
        Ok(self.client.apiserver_version().await?)
    }

    async fn list_api_versions(&self) -> Result<Vec<String>, KubeError> {
        debug!("listing API group versions");
        let core = self.client.list_core_api_versions().await?;
        let groups = self.client.list_api_groups().await?;

        let mut versions = core.versions;
        for group in groups.groups {
            versions.extend(group.versions.into_iter().map(|v| v.group_version));
        }
        Ok(versions)
    }

    async fn list_nodes(&self) -> Result<Vec<Node>, KubeError> {
        debug!("listing nodes");
        let api: Api<Node> = Api::all(self.client.clone());
        let nodes = api.list(&ListParams::default()).await?;
        Ok(nodes.items)
    }

    async fn list_namespaces(&self) -> Result<Vec<Namespace>, KubeError> {
        debug!("listing namespaces");
        let api: Api<Namespace> = Api::all(self.client.clone());
        let namespaces = api.list(&ListParams::default()).await?;
        Ok(namespaces.items)
    }

    async fn list_pods(&self) -> Result<Vec<Pod>, KubeError> {
        debug!(namespace = %self.namespace, "listing pods");
        let api: Api<Pod> = Api::namespaced(self.client.clone(), &self.namespace);
        let pods = api.list(&ListParams::default()).await?;
        Ok(pods.items)
    }

    async fn create_deployment(&self, deployment: &Deployment) -> Result<(), KubeError> {
        self.create_resource(deployment).await
    }

    async fn create_service(&self, service: &Service) -> Result<(), KubeError> {
        self.create_resource(service).await
    }

    async fn apply_deployment(&self, deployment: &Deployment) -> Result<ApplyOutcome, KubeError> {
        self.apply_resource(deployment).await
    }

    async fn apply_service(&self, service: &Service) -> Result<ApplyOutcome, KubeError> {
        self.apply_resource(service).await
    }

    async fn apply_pod(&self, pod: &Pod) -> Result<ApplyOutcome, KubeError> {
        self.apply_resource(pod).await
    }
}
