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

use crate::shared::error::KubeError;
use kube::config::{KubeConfigOptions, Kubeconfig};
use tracing::debug;

/// A context that was found in kubeconfig and produced a usable client configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContextSwitch {
    pub name: String,
    pub previous: Option<String>,
    pub cluster_url: String,
    pub default_namespace: String,
}

/// Reads kubeconfig from `path`, or from `KUBECONFIG` / `~/.kube/config`.
pub fn load_kubeconfig(path: Option<&str>) -> Result<Kubeconfig, KubeError> {
    let kubeconfig = match path {
        Some(path) => Kubeconfig::read_from(path),
        None => Kubeconfig::read(),
    };
    kubeconfig.map_err(|e| KubeError::ConfigError(format!("Failed to load kubeconfig: {}", e)))
}

pub fn context_names(kubeconfig: &Kubeconfig) -> Vec<String> {
    kubeconfig.contexts.iter().map(|c| c.name.clone()).collect()
}

/// Selects `name` for this process.
///
/// The kubeconfig file on disk is left untouched.
pub async fn switch_context(path: Option<&str>, name: &str) -> Result<ContextSwitch, KubeError> {
    let kubeconfig = load_kubeconfig(path)?;
    let names = context_names(&kubeconfig);

    if !names.iter().any(|n| n == name) {
        let available = if names.is_empty() {
            "none".to_string()
        } else {
            names.join(", ")
        };
        return Err(KubeError::ContextNotFound {
            name: name.to_string(),
            available,
        });
    }

    let previous = kubeconfig.current_context.clone();
    let options = KubeConfigOptions {
        context: Some(name.to_string()),
        cluster: None,
        user: None,
    };

    let config = kube::Config::from_custom_kubeconfig(kubeconfig, &options)
        .await
        .map_err(|e| KubeError::ConfigError(format!("context '{}': {}", name, e)))?;

    debug!(context = name, cluster_url = %config.cluster_url, "context loaded");

    Ok(ContextSwitch {
        name: name.to_string(),
        previous,
        cluster_url: config.cluster_url.to_string().trim_end_matches('/').to_string(),
        default_namespace: config.default_namespace,
    })
}
