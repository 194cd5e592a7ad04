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

/// Defaults
pub const DEFAULT_NAMESPACE: &str = "default";
pub const DEFAULT_FIELD_MANAGER: &str = "nautilus";
pub const DEFAULT_SERVICE_PORT: i32 = 80;

/// Environment variable pointing at the TOML configuration file
pub const CONF_FILE_ENV: &str = "NAUTILUS_CONF_FILE";

/// Resource labels
pub const LABEL_APP: &str = "app";

/// Cluster DNS
pub const KUBE_DNS_NAMESPACE: &str = "kube-system";
pub const KUBE_DNS_SERVICE: &str = "kube-dns:dns";

/// Core API group version
pub const CORE_API_VERSION: &str = "v1";

/// Supported resource kinds for create and apply
pub const KIND_DEPLOYMENT: &str = "Deployment";
pub const KIND_SERVICE: &str = "Service";
pub const KIND_POD: &str = "Pod";

/// Node condition that determines readiness
pub const NODE_CONDITION_READY: &str = "Ready";

/// Service protocol
pub const PROTOCOL_TCP: &str = "TCP";
