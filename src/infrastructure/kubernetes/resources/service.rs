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

use crate::infrastructure::constants::{LABEL_APP, PROTOCOL_TCP};
use crate::shared::error::KubeError;
use k8s_openapi::api::core::v1::{Service, ServicePort, ServiceSpec};
use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;
use std::collections::BTreeMap;

/// Builds a Service selecting pods labelled `app=<name>` on one TCP port.
pub struct ServiceBuilder {
    name: String,
    namespace: String,
    port: i32,
}

impl ServiceBuilder {
    pub fn new(name: String, namespace: String, port: i32) -> Self {
        Self {
            name,
            namespace,
            port,
        }
    }

    pub fn build(&self) -> Result<Service, KubeError> {
        if !(1..=65535).contains(&self.port) {
            return Err(KubeError::InvalidResource(format!(
                "Service '{}' port out of range: {}",
                self.name, self.port
            )));
        }

        let mut selector = BTreeMap::new();
        selector.insert(LABEL_APP.to_string(), self.name.clone());

        let service = Service {
            metadata: ObjectMeta {
                name: Some(self.name.clone()),
                namespace: Some(self.namespace.clone()),
                labels: Some(selector.clone()),
                ..Default::default()
            },
            spec: Some(ServiceSpec {
                selector: Some(selector),
                ports: Some(vec![self.create_service_port()]),
                ..Default::default()
            }),
            ..Default::default()
        };

        Ok(service)
    }

    fn create_service_port(&self) -> ServicePort {
        ServicePort {
            port: self.port,
            protocol: Some(PROTOCOL_TCP.to_string()),
            ..Default::default()
        }
    }
}
