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

use clap::Parser;
use k8s_openapi::api::apps::v1::Deployment;
use k8s_openapi::api::core::v1::{Namespace, Node, Pod, Service};
use k8s_openapi::apimachinery::pkg::apis::meta::v1::{APIResource, APIResourceList, ObjectMeta};
use k8s_openapi::apimachinery::pkg::version::Info;
use nautilus::cli::{run, switch, Action, CliArgs, ClusterAction};
use nautilus::*;
use std::io::Write;
use std::sync::{Arc, Mutex};

mod test_utils {
    use super::*;

    /// In-memory client that records every call it receives.
    #[derive(Default)]
    pub struct RecordingClient {
        pub namespace: String,
        pub calls: Arc<Mutex<Vec<String>>>,
        pub deployments: Arc<Mutex<Vec<Deployment>>>,
        pub services: Arc<Mutex<Vec<Service>>>,
        pub existing: Vec<String>,
        pub failing: Vec<String>,
    }

    impl RecordingClient {
        pub fn new(namespace: &str) -> Self {
            Self {
                namespace: namespace.to_string(),
                ..Default::default()
            }
        }

        fn record(&self, call: String) {
            self.calls.lock().unwrap().push(call);
        }

        fn outcome(&self, kind: &str, meta: &ObjectMeta) -> Result<ApplyOutcome> {
            let name = meta.name.clone().unwrap_or_default();
            let namespace = meta
                .namespace
                .clone()
                .unwrap_or_else(|| self.namespace.clone());
            self.record(format!("apply_{}:{}/{}", kind, namespace, name));

            if self.failing.contains(&name) {
                return Err(KubeError::KubeError(format!("{} '{}' rejected", kind, name)));
            }
            if self.existing.contains(&name) {
                Ok(ApplyOutcome::Configured)
            } else {
                Ok(ApplyOutcome::Created)
            }
        }
    }

    fn named<T: Default>(name: &str, build: impl FnOnce(ObjectMeta) -> T) -> T {
        build(ObjectMeta {
            name: Some(name.to_string()),
            ..Default::default()
        })
    }

    #[async_trait::async_trait]
    impl NautilusKubeClient for RecordingClient {
        fn namespace(&self) -> &str {
            &self.namespace
        }

        fn cluster_url(&self) -> String {
            "https://10.0.0.1:6443".to_string()
        }

        async fn list_core_api_resources(&self) -> Result<APIResourceList> {
            self.record("list_core_api_resources".to_string());
            Ok(APIResourceList {
                group_version: "v1".to_string(),
                resources: vec![APIResource::default(), APIResource::default()],
            })
        }

        async fn get_server_version(&self) -> Result<Info> {
            self.record("get_server_version".to_string());
            Ok(Info {
                major: "1".to_string(),
                minor: "30".to_string(),
                platform: "linux/amd64".to_string(),
                ..Default::default()
            })
        }

        async fn list_api_versions(&self) -> Result<Vec<String>> {
            self.record("list_api_versions".to_string());
            Ok(vec!["v1".to_string(), "apps/v1".to_string()])
        }

        async fn list_nodes(&self) -> Result<Vec<Node>> {
            self.record("list_nodes".to_string());
            Ok(vec![named("node-a", |metadata| Node {
                metadata,
                ..Default::default()
            })])
        }

        async fn list_namespaces(&self) -> Result<Vec<Namespace>> {
            self.record("list_namespaces".to_string());
            Ok(vec![named("kube-system", |metadata| Namespace {
                metadata,
                ..Default::default()
            })])
        }

        async fn list_pods(&self) -> Result<Vec<Pod>> {
            self.record(format!("list_pods:{}", self.namespace));
            Ok(vec![named("web-0", |metadata| Pod {
                metadata,
                ..Default::default()
            })])
        }

        async fn create_deployment(&self, deployment: &Deployment) -> Result<()> {
            let name = deployment.metadata.name.clone().unwrap_or_default();
            self.record(format!("create_deployment:{}/{}", self.namespace, name));
            if self.existing.contains(&name) {
                return Err(KubeError::already_exists("Deployment", name, &self.namespace));
            }
            self.deployments.lock().unwrap().push(deployment.clone());
            Ok(())
        }

        async fn create_service(&self, service: &Service) -> Result<()> {
            let name = service.metadata.name.clone().unwrap_or_default();
            self.record(format!("create_service:{}/{}", self.namespace, name));
            self.services.lock().unwrap().push(service.clone());
            Ok(())
        }

        async fn apply_deployment(&self, deployment: &Deployment) -> Result<ApplyOutcome> {
            self.outcome("deployment", &deployment.metadata)
        }

        async fn apply_service(&self, service: &Service) -> Result<ApplyOutcome> {
            self.outcome("service", &service.metadata)
        }

        async fn apply_pod(&self, pod: &Pod) -> Result<ApplyOutcome> {
            self.outcome("pod", &pod.metadata)
        }
    }

    pub fn parse(args: &[&str]) -> CliArgs {
        CliArgs::try_parse_from(std::iter::once("nautilus").chain(args.iter().copied()))
            .expect("arguments should parse")
    }

    pub fn config(namespace: &str) -> KubernetesConfig {
        KubernetesConfig {
            namespace: namespace.to_string(),
            ..Default::default()
        }
    }

    pub fn write_manifest(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    pub fn cluster_action(args: &[&str]) -> ClusterAction {
        match Action::from_args(&parse(args)).expect("action should resolve") {
            Action::Cluster(action) => action,
            other => panic!("expected a cluster action, got {:?}", other),
        }
    }
}

use test_utils::*;

async fn run_with(
    client: RecordingClient,
    args: &[&str],
) -> (Result<nautilus::cli::CommandOutput>, Vec<String>) {
    let calls = client.calls.clone();
    let namespace = client.namespace.clone();
    let descriptor = ClusterDescriptor::with_client(Box::new(client));
    let action = cluster_action(args);
    let result = run(&action, &descriptor, &config(&namespace)).await;
    let calls = calls.lock().unwrap().clone();
    (result, calls)
}

#[tokio::test]
async fn test_cluster_info_calls_resource_discovery_once() {
    let (result, calls) = run_with(RecordingClient::new("default"), &["--cluster"]).await;
    let output = result.unwrap();

    assert_eq!(calls, vec!["list_core_api_resources"]);
    assert!(output.success);
    assert!(output.text.contains("API Resources: 2"));
    assert!(output
        .text
        .contains("Kubernetes control plane is running at"));
}

#[tokio::test]
async fn test_api_versions() {
    let (result, calls) = run_with(RecordingClient::new("default"), &["--api-versions"]).await;
    let output = result.unwrap();

    assert_eq!(calls, vec!["get_server_version", "list_api_versions"]);
    assert!(output.text.contains("Minor: 30"));
    assert!(output.text.contains("apps/v1"));
}

#[tokio::test]
async fn test_nodes() {
    let (result, calls) = run_with(RecordingClient::new("default"), &["--nodes"]).await;
    assert_eq!(calls, vec!["list_nodes"]);
    assert!(result.unwrap().text.contains("node-a"));
}

#[tokio::test]
async fn test_list_namespaces() {
    let (result, calls) = run_with(RecordingClient::new("default"), &["--list-namespaces"]).await;
    assert_eq!(calls, vec!["list_namespaces"]);
    assert!(result.unwrap().text.contains("kube-system"));
}

#[tokio::test]
async fn test_list_pods_uses_selected_namespace() {
    let (result, calls) = run_with(RecordingClient::new("apps"), &["--list-pods"]).await;
    assert_eq!(calls, vec!["list_pods:apps"]);
    assert!(result.unwrap().text.contains("Pods in namespace 'apps'"));
}

#[tokio::test]
async fn test_create_deployment() {
    let client = RecordingClient::new("apps");
    let deployments = client.deployments.clone();

    let (result, calls) = run_with(
        client,
        &["--create", "deployment", "web", "nginx:1.27", "--replicas", "2"],
    )
    .await;

    assert_eq!(calls, vec!["create_deployment:apps/web"]);
    assert_eq!(
        result.unwrap().text,
        "Deployment 'web' created in namespace 'apps'."
    );

    let created = deployments.lock().unwrap();
    let spec = created[0].spec.as_ref().unwrap();
    assert_eq!(spec.replicas, Some(2));
    let container = &spec.template.spec.as_ref().unwrap().containers[0];
    assert_eq!(container.image.as_deref(), Some("nginx:1.27"));
}

#[tokio::test]
async fn test_create_service_uses_configured_port() {
    let client = RecordingClient::new("default");
    let calls = client.calls.clone();
    let services = client.services.clone();
    let descriptor = ClusterDescriptor::with_client(Box::new(client));

    let action = cluster_action(&["--create", "service", "web"]);
    let mut config = config("default");
    config.service_port = 8080;
    run(&action, &descriptor, &config).await.unwrap();

    assert_eq!(*calls.lock().unwrap(), vec!["create_service:default/web"]);
    let services = services.lock().unwrap();
    let ports = services[0].spec.as_ref().unwrap().ports.as_ref().unwrap();
    assert_eq!(ports[0].port, 8080);
}

#[tokio::test]
async fn test_create_existing_deployment_surfaces_error() {
    let mut client = RecordingClient::new("default");
    client.existing = vec!["web".to_string()];

    let (result, _) = run_with(client, &["--create", "deployment", "web", "nginx"]).await;
    let err = result.unwrap_err();
    assert!(matches!(err, KubeError::AlreadyExists { .. }));
}

const MANIFEST: &str = r#"
apiVersion: apps/v1
kind: Deployment
metadata:
  name: web
spec:
  selector:
    matchLabels:
      app: web
  template:
    metadata:
      labels:
        app: web
    spec:
      containers:
        - name: web
          image: nginx
---
apiVersion: v1
kind: ConfigMap
metadata:
  name: settings
---
apiVersion: v1
kind: Service
metadata:
  name: web
  namespace: edge
spec:
  selector:
    app: web
  ports:
    - port: 80
"#;

#[tokio::test]
async fn test_apply_manifest_in_order() {
    let file = write_manifest(MANIFEST);
    let mut client = RecordingClient::new("apps");
    client.existing = vec!["web".to_string()];

    let (result, calls) = run_with(client, &["--apply", file.path().to_str().unwrap()]).await;
    let output = result.unwrap();

    assert_eq!(
        calls,
        vec!["apply_deployment:apps/web", "apply_service:edge/web"]
    );
    assert!(output.success);
    assert!(output.text.contains("deployment/web (namespace apps) configured"));
    assert!(output.text.contains("configmap/settings (namespace apps) skipped"));
    assert!(output.text.contains("service/web (namespace edge) configured"));
}

#[tokio::test]
async fn test_apply_continues_after_failure() {
    let file = write_manifest(MANIFEST);
    let mut client = RecordingClient::new("apps");
    client.failing = vec!["web".to_string()];

    let (result, calls) = run_with(client, &["--apply", file.path().to_str().unwrap()]).await;
    let output = result.unwrap();

    assert_eq!(calls.len(), 2);
    assert!(!output.success);
    assert!(output.text.contains("failed"));
}

#[test]
fn test_malformed_manifest_rejected_before_any_call() {
    let file = write_manifest(
        "apiVersion: v1\nkind: Service\nmetadata:\n  name: web\nspec:\n  ports: 80\n",
    );
    let args = parse(&["--apply", file.path().to_str().unwrap()]);

    let err = Action::from_args(&args).unwrap_err();
    assert!(matches!(err, KubeError::InvalidManifest { .. }));
    assert!(err.is_usage());
}

#[test]
fn test_invalid_create_rejected_before_any_call() {
    let err =
        Action::from_args(&parse(&["--create", "deployment", "Web_App", "nginx"])).unwrap_err();
    assert!(matches!(err, KubeError::InvalidResource(_)));

    let err = Action::from_args(&parse(&["--create", "deployment", "web"])).unwrap_err();
    assert!(matches!(err, KubeError::UsageError(_)));

    let err = Action::from_args(&parse(&["--create", "secret", "web"])).unwrap_err();
    assert!(err.to_string().contains("Unsupported resource type"));
}

#[test]
fn test_switch_context_action() {
    let action = Action::from_args(&parse(&["--switch-context", "staging"])).unwrap();
    assert!(matches!(action, Action::SwitchContext { ref name } if name == "staging"));
}

const KUBECONFIG: &str = r#"
apiVersion: v1
kind: Config
clusters:
  - name: dev
    cluster:
      server: https://127.0.0.1:6443
  - name: staging
    cluster:
      server: https://10.0.0.1:6443/
users:
  - name: staging-user
    user:
      token: staging-token
contexts:
  - name: dev
    context:
      cluster: dev
      user: staging-user
  - name: staging
    context:
      cluster: staging
      user: staging-user
      namespace: apps
current-context: dev
"#;

#[tokio::test]
async fn test_switch_context_reads_only_kubeconfig() {
    let file = write_manifest(KUBECONFIG);
    let mut config = config("default");
    config.kubeconfig = Some(file.path().to_str().unwrap().to_string());

    let output = switch("staging", &config).await.unwrap();
    assert!(output.success);
    assert!(output.text.contains("Switched to context '"));
    assert!(output.text.contains("staging"));
    assert!(output.text.contains("Previous context: dev"));
    assert!(output.text.contains("Cluster: https://10.0.0.1:6443\n"));
    assert!(output.text.contains("Default namespace: apps"));

    let on_disk = std::fs::read_to_string(file.path()).unwrap();
    assert!(on_disk.contains("current-context: dev"));
}

#[tokio::test]
async fn test_switch_to_unknown_context_lists_available() {
    let file = write_manifest(KUBECONFIG);
    let mut config = config("default");
    config.kubeconfig = Some(file.path().to_str().unwrap().to_string());

    let err = switch("prod", &config).await.unwrap_err();
    assert!(matches!(err, KubeError::ContextNotFound { .. }));
    assert!(err.to_string().contains("dev, staging"));
}

#[test]
fn test_replicas_without_create_rejected_before_any_call() {
    let err = Action::from_args(&parse(&["--nodes", "--replicas", "2"])).unwrap_err();
    assert!(matches!(err, KubeError::UsageError(_)));
}

#[tokio::test]
#[ignore] // Requires Kubernetes cluster
async fn test_cluster_info_against_cluster() {
    let descriptor = ClusterDescriptor::new_with_config(&KubernetesConfig::default())
        .await
        .expect("Failed to create descriptor");
    let info = descriptor.cluster_info().await.expect("cluster info");
    assert!(info.api_resource_count > 0);
    assert!(info.control_plane_url.starts_with("http"));
}
