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

use crate::infrastructure::constants::{KIND_DEPLOYMENT, KIND_SERVICE};
use crate::shared::error::KubeError;

/// A resource to create from `--create` arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CreateRequest {
    Deployment {
        name: String,
        image: String,
        replicas: Option<i32>,
    },
    Service {
        name: String,
    },
}

impl CreateRequest {
    /// Parses `RESOURCE_TYPE NAME [IMAGE]`, as collected by `--create`.
    pub fn parse(values: &[String], replicas: Option<i32>) -> Result<Self, KubeError> {
        let (resource_type, rest) = values
            .split_first()
            .ok_or_else(|| KubeError::usage("--create requires a resource type"))?;

        match resource_type.to_lowercase().as_str() {
            "deployment" | "deploy" => match rest {
                [name, image] => Ok(Self::Deployment {
                    name: name.clone(),
                    image: image.clone(),
                    replicas,
                }),
                [_] => Err(KubeError::usage(
                    "--create deployment requires an image: --create deployment <NAME> <IMAGE>",
                )),
                _ => Err(KubeError::usage(
                    "usage: --create deployment <NAME> <IMAGE> [--replicas <N>]",
                )),
            },
            "service" | "svc" => {
                if replicas.is_some() {
                    return Err(KubeError::usage(
                        "--replicas only applies to --create deployment",
                    ));
                }
                match rest {
                    [name] => Ok(Self::Service { name: name.clone() }),
                    [_, image] => Err(KubeError::usage(format!(
                        "--create service does not take an image (got '{}')",
                        image
                    ))),
                    _ => Err(KubeError::usage("usage: --create service <NAME>")),
                }
            }
            other => Err(KubeError::usage(format!(
                "Unsupported resource type: {} (expected deployment or service)",
                other
            ))),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Self::Deployment { name, .. } | Self::Service { name } => name,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::Deployment { .. } => KIND_DEPLOYMENT,
            Self::Service { .. } => KIND_SERVICE,
        }
    }
}
