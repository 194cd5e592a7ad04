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

use crate::domain::config::NautilusConf;
use crate::infrastructure::constants::{
    DEFAULT_FIELD_MANAGER, DEFAULT_NAMESPACE, DEFAULT_SERVICE_PORT,
};
use crate::shared::error::KubeError;

/// Connection and request settings resolved for one invocation.
#[derive(Debug, Clone, PartialEq)]
pub struct KubernetesConfig {
    pub namespace: String,
    pub kubeconfig: Option<String>,
    pub context: Option<String>,
    pub field_manager: String,
    pub service_port: i32,
}

impl Default for KubernetesConfig {
    fn default() -> Self {
        Self {
            namespace: DEFAULT_NAMESPACE.to_string(),
            kubeconfig: None,
            context: None,
            field_manager: DEFAULT_FIELD_MANAGER.to_string(),
            service_port: DEFAULT_SERVICE_PORT,
        }
    }
}

impl KubernetesConfig {
    pub fn validate(&self) -> Result<(), KubeError> {
        if !crate::domain::cluster::validator::is_valid_dns_label(&self.namespace) {
            return Err(KubeError::ConfigError(format!(
                "Invalid namespace: {}",
                self.namespace
            )));
        }

        if !(1..=65535).contains(&self.service_port) {
            return Err(KubeError::ConfigError(format!(
                "service_port must be between 1 and 65535, got {}",
                self.service_port
            )));
        }

        if self.field_manager.is_empty() {
            return Err(KubeError::ConfigError(
                "field_manager must not be empty".to_string(),
            ));
        }

        Ok(())
    }
}

/// Merges command line values over the config file over built-in defaults.
#[derive(Debug, Default)]
pub struct KubernetesConfigBuilder {
    namespace: Option<String>,
    kubeconfig: Option<String>,
    context: Option<String>,
    conf: Option<NautilusConf>,
}

impl KubernetesConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn namespace(mut self, namespace: Option<String>) -> Self {
        self.namespace = namespace;
        self
    }

    pub fn kubeconfig(mut self, kubeconfig: Option<String>) -> Self {
        self.kubeconfig = kubeconfig;
        self
    }

    pub fn context(mut self, context: Option<String>) -> Self {
        self.context = context;
        self
    }

    pub fn conf(mut self, conf: Option<NautilusConf>) -> Self {
        self.conf = conf;
        self
    }

    pub fn build(self) -> Result<KubernetesConfig, KubeError> {
        let defaults = KubernetesConfig::default();
        let file = self.conf.unwrap_or_default();

        let config = KubernetesConfig {
            namespace: self
                .namespace
                .or(file.kubernetes.namespace)
                .unwrap_or(defaults.namespace),
            kubeconfig: self.kubeconfig.or(file.kubernetes.kubeconfig),
            context: self.context.or(file.kubernetes.context),
            field_manager: file
                .kubernetes
                .field_manager
                .unwrap_or(defaults.field_manager),
            service_port: file.create.service_port.unwrap_or(defaults.service_port),
        };

        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::config::{CreateConf, KubernetesConf};

    fn file_conf() -> NautilusConf {
        NautilusConf {
            kubernetes: KubernetesConf {
                namespace: Some("from-file".to_string()),
                kubeconfig: Some("/etc/kubeconfig".to_string()),
                context: Some("file-ctx".to_string()),
                field_manager: Some("file-manager".to_string()),
            },
            create: CreateConf {
                service_port: Some(8080),
            },
        }
    }

    #[test]
    fn test_defaults() {
        let config = KubernetesConfigBuilder::new().build().unwrap();
        assert_eq!(config, KubernetesConfig::default());
        assert_eq!(config.namespace, "default");
        assert_eq!(config.service_port, 80);
    }

    #[test]
    fn test_file_over_defaults() {
        let config = KubernetesConfigBuilder::new()
            .conf(Some(file_conf()))
            .build()
            .unwrap();
        assert_eq!(config.namespace, "from-file");
        assert_eq!(config.kubeconfig.as_deref(), Some("/etc/kubeconfig"));
        assert_eq!(config.context.as_deref(), Some("file-ctx"));
        assert_eq!(config.field_manager, "file-manager");
        assert_eq!(config.service_port, 8080);
    }

    #[test]
    fn test_command_line_over_file() {
        let config = KubernetesConfigBuilder::new()
            .namespace(Some("cli-ns".to_string()))
            .context(Some("cli-ctx".to_string()))
            .conf(Some(file_conf()))
            .build()
            .unwrap();
        assert_eq!(config.namespace, "cli-ns");
        assert_eq!(config.context.as_deref(), Some("cli-ctx"));
        assert_eq!(config.kubeconfig.as_deref(), Some("/etc/kubeconfig"));
    }

    #[test]
    fn test_invalid_namespace() {
        let result = KubernetesConfigBuilder::new()
            .namespace(Some("Not_Valid".to_string()))
            .build();
        assert!(matches!(result, Err(KubeError::ConfigError(_))));
    }

    #[test]
    fn test_invalid_service_port() {
        let mut conf = NautilusConf::default();
        conf.create.service_port = Some(0);
        let result = KubernetesConfigBuilder::new().conf(Some(conf)).build();
        assert!(result.is_err());
    }
}
