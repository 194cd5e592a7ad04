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

use crate::infrastructure::constants::{KUBE_DNS_NAMESPACE, KUBE_DNS_SERVICE, NODE_CONDITION_READY};
use crate::infrastructure::kubernetes::ApplyOutcome;
use chrono::{DateTime, Utc};
use k8s_openapi::api::core::v1::{Namespace, Node, Pod};
use k8s_openapi::apimachinery::pkg::version::Info;

const UNKNOWN: &str = "Unknown";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClusterInfo {
    pub control_plane_url: String,
    pub api_resource_count: usize,
}

impl ClusterInfo {
    pub fn kube_dns_url(&self) -> String {
        format!(
            "{}/api/v1/namespaces/{}/services/{}/proxy",
            self.control_plane_url, KUBE_DNS_NAMESPACE, KUBE_DNS_SERVICE
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ApiVersions {
    pub server: Info,
    pub group_versions: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeAddress {
    pub address_type: String,
    pub address: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeSummary {
    pub name: String,
    pub status: String,
    pub kubelet_version: String,
    pub os_image: String,
    pub container_runtime: String,
    pub addresses: Vec<NodeAddress>,
}

impl From<&Node> for NodeSummary {
    fn from(node: &Node) -> Self {
        let status = node.status.as_ref();
        let info = status.and_then(|s| s.node_info.as_ref());

        let ready = status
            .and_then(|s| s.conditions.as_ref())
            .and_then(|conds| conds.iter().find(|c| c.type_ == NODE_CONDITION_READY))
            .map(|c| match c.status.as_str() {
                "True" => "Ready",
                "False" => "NotReady",
                _ => UNKNOWN,
            })
            .unwrap_or(UNKNOWN);

        let addresses = status
            .and_then(|s| s.addresses.as_ref())
            .map(|addrs| {
                addrs
                    .iter()
                    .map(|a| NodeAddress {
                        address_type: a.type_.clone(),
                        address: a.address.clone(),
                    })
                    .collect()
            })
            .unwrap_or_default();

        Self {
            name: node.metadata.name.clone().unwrap_or_default(),
            status: ready.to_string(),
            kubelet_version: info.map(|i| i.kubelet_version.clone()).unwrap_or_default(),
            os_image: info.map(|i| i.os_image.clone()).unwrap_or_default(),
            container_runtime: info
                .map(|i| i.container_runtime_version.clone())
                .unwrap_or_default(),
            addresses,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamespaceSummary {
    pub name: String,
    pub status: String,
    pub created: Option<DateTime<Utc>>,
}

impl From<&Namespace> for NamespaceSummary {
    fn from(ns: &Namespace) -> Self {
        Self {
            name: ns.metadata.name.clone().unwrap_or_default(),
            status: ns
                .status
                .as_ref()
                .and_then(|s| s.phase.clone())
                .unwrap_or_else(|| UNKNOWN.to_string()),
            created: ns.metadata.creation_timestamp.as_ref().map(|t| t.0),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PodSummary {
    pub name: String,
    pub status: String,
    pub ip: Option<String>,
    pub node: Option<String>,
}

impl From<&Pod> for PodSummary {
    fn from(pod: &Pod) -> Self {
        let status = pod.status.as_ref();
        Self {
            name: pod.metadata.name.clone().unwrap_or_default(),
            status: status
                .and_then(|s| s.phase.clone())
                .unwrap_or_else(|| UNKNOWN.to_string()),
            ip: status.and_then(|s| s.pod_ip.clone()),
            node: pod.spec.as_ref().and_then(|s| s.node_name.clone()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApplyResult {
    Applied(ApplyOutcome),
    Skipped,
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplyEntry {
    pub kind: String,
    pub name: String,
    pub namespace: String,
    pub result: ApplyResult,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApplyReport {
    pub entries: Vec<ApplyEntry>,
}

impl ApplyReport {
    pub fn failures(&self) -> usize {
        self.entries
            .iter()
            .filter(|e| matches!(e.result, ApplyResult::Failed(_)))
            .count()
    }

    pub fn has_failures(&self) -> bool {
        self.failures() > 0
    }
}
