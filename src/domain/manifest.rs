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

//! Multi-document manifest parsing.
//!
//! The whole file is parsed into typed objects up front, so a malformed
//! document rejects the file before any request is sent.

use crate::infrastructure::constants::{KIND_DEPLOYMENT, KIND_POD, KIND_SERVICE};
use crate::shared::error::KubeError;
use k8s_openapi::api::apps::v1::Deployment;
use k8s_openapi::api::core::v1::{Pod, Service};
use serde::Deserialize;
use serde_yaml::Value;
use std::path::Path;

#[derive(Debug, Clone)]
pub enum ManifestObject {
    Deployment(Box<Deployment>),
    Service(Box<Service>),
    Pod(Box<Pod>),
    /// A well-formed object of a kind this tool does not apply.
    Unsupported { kind: String, name: String },
}

impl ManifestObject {
    pub fn kind(&self) -> &str {
        match self {
            Self::Deployment(_) => KIND_DEPLOYMENT,
            Self::Service(_) => KIND_SERVICE,
            Self::Pod(_) => KIND_POD,
            Self::Unsupported { kind, .. } => kind,
        }
    }

    pub fn name(&self) -> &str {
        let name = match self {
            Self::Deployment(d) => d.metadata.name.as_deref(),
            Self::Service(s) => s.metadata.name.as_deref(),
            Self::Pod(p) => p.metadata.name.as_deref(),
            Self::Unsupported { name, .. } => Some(name.as_str()),
        };
        name.unwrap_or_default()
    }

    pub fn namespace(&self) -> Option<&str> {
        match self {
            Self::Deployment(d) => d.metadata.namespace.as_deref(),
            Self::Service(s) => s.metadata.namespace.as_deref(),
            Self::Pod(p) => p.metadata.namespace.as_deref(),
            Self::Unsupported { .. } => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Manifest {
    pub path: String,
    pub objects: Vec<ManifestObject>,
}

impl Manifest {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, KubeError> {
        let display = path.as_ref().display().to_string();
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| KubeError::invalid_manifest(&display, e.to_string()))?;
        Self::parse(&display, &content)
    }

    pub fn parse(path: &str, content: &str) -> Result<Self, KubeError> {
        let mut objects = Vec::new();

        for (idx, document) in serde_yaml::Deserializer::from_str(content).enumerate() {
            let doc_no = idx + 1;
            let value = Value::deserialize(document).map_err(|e| {
                KubeError::invalid_manifest(path, format!("document {}: {}", doc_no, e))
            })?;

            if value.is_null() {
                continue;
            }

            objects.push(parse_object(value).map_err(|reason| {
                KubeError::invalid_manifest(path, format!("document {}: {}", doc_no, reason))
            })?);
        }

        if objects.is_empty() {
            return Err(KubeError::invalid_manifest(path, "no objects found"));
        }

        Ok(Self {
            path: path.to_string(),
            objects,
        })
    }
}

fn parse_object(value: Value) -> Result<ManifestObject, String> {
    if !value.is_mapping() {
        return Err("expected a mapping at the top level".to_string());
    }

    let kind = value
        .get("kind")
        .and_then(Value::as_str)
        .filter(|k| !k.is_empty())
        .ok_or_else(|| "missing 'kind'".to_string())?
        .to_string();

    let name = value
        .get("metadata")
        .and_then(|m| m.get("name"))
        .and_then(Value::as_str)
        .filter(|n| !n.is_empty())
        .ok_or_else(|| format!("{} is missing 'metadata.name'", kind))?
        .to_string();

    let typed_err = |e: serde_yaml::Error| format!("{} '{}': {}", kind, name, e);

    let object = match kind.as_str() {
        KIND_DEPLOYMENT => {
            ManifestObject::Deployment(Box::new(serde_yaml::from_value(value).map_err(typed_err)?))
        }
        KIND_SERVICE => {
            ManifestObject::Service(Box::new(serde_yaml::from_value(value).map_err(typed_err)?))
        }
        KIND_POD => {
            ManifestObject::Pod(Box::new(serde_yaml::from_value(value).map_err(typed_err)?))
        }
        _ => ManifestObject::Unsupported {
            kind: kind.clone(),
            name: name.clone(),
        },
    };

    Ok(object)
}
