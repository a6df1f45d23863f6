//! HTTP client for the workspace API and the per-workspace project agent.
//!
//! Implements `WorkspaceApi`, `AgentConnector` and `TemplateSource` on top of
//! `reqwest`. Non-2xx responses are turned into errors carrying the status
//! and the response body.

use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use cradle_common::{
    Command, ProjectSource, ProjectTemplate, Workspace, WorkspaceConfig, WorkspaceStatus,
};
use reqwest::{Client, Method, RequestBuilder, Response, Url};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::application::ports::{
    AgentConnector, CreateOptions, ProjectAgent, ProjectTypeResolver, TemplateSource,
    WorkspaceApi,
};
use crate::domain::config::ApiConfig;
use crate::domain::{ProvisionError, SourceEstimation, pick_project_type};

/// Connection to the workspace API.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base: Url,
    token: Option<String>,
    poll_interval: Duration,
}

impl ApiClient {
    /// Build a client for `api`, polling status every `poll_interval`.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is invalid or the HTTP client cannot be
    /// built.
    pub fn new(api: &ApiConfig, poll_interval: Duration) -> Result<Self> {
        let base = Url::parse(&api.url).with_context(|| format!("invalid API URL '{}'", api.url))?;
        let http = Client::builder()
            .user_agent(concat!("cradle/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("building HTTP client")?;
        Ok(Self {
            http,
            base,
            token: api.token.clone(),
            poll_interval,
        })
    }

    fn request(&self, method: Method, segments: &[&str]) -> Result<RequestBuilder> {
        let url = endpoint(&self.base, segments)?;
        debug!(%method, %url, "api request");
        Ok(authorize(self.http.request(method, url), self.token.as_deref()))
    }
}

impl WorkspaceApi for ApiClient {
    async fn create_from_config(
        &self,
        namespace: &str,
        config: &WorkspaceConfig,
        options: &CreateOptions,
    ) -> Result<Workspace> {
        let mut query = vec![("namespace".to_string(), namespace.to_string())];
        query.extend(
            options
                .attributes
                .iter()
                .map(|(k, v)| ("attribute".to_string(), format!("{k}:{v}"))),
        );
        let req = self
            .request(Method::POST, &["api", "workspace"])?
            .query(&query)
            .json(config);
        receive_json(req, "create workspace").await
    }

    async fn start(&self, workspace_id: &str, env_name: &str) -> Result<()> {
        let req = self
            .request(Method::POST, &["api", "workspace", workspace_id, "runtime"])?
            .query(&[("environment", env_name)]);
        receive_empty(req, "start workspace").await
    }

    async fn fetch_status_change(
        &self,
        workspace_id: &str,
        target: WorkspaceStatus,
    ) -> Result<()> {
        let mut seen = Vec::new();
        loop {
            let status = self.fetch_details(workspace_id).await?.status;
            if status == target {
                return Ok(());
            }
            check_transition(workspace_id, &seen, status, target)?;
            if seen.last() != Some(&status) {
                debug!(workspace_id, %status, %target, "waiting for status");
                seen.push(status);
            }
            tokio::time::sleep(self.poll_interval).await;
        }
    }

    async fn fetch_details(&self, workspace_id: &str) -> Result<Workspace> {
        let req = self.request(Method::GET, &["api", "workspace", workspace_id])?;
        receive_json(req, "fetch workspace").await
    }

    async fn list_by_namespace(&self, namespace: &str) -> Result<Vec<Workspace>> {
        let req = self.request(Method::GET, &["api", "workspace", "namespace", namespace])?;
        receive_json(req, "list namespace workspaces").await
    }

    async fn list_owned(&self) -> Result<Vec<Workspace>> {
        let req = self.request(Method::GET, &["api", "workspace"])?;
        receive_json(req, "list workspaces").await
    }

    async fn add_command(&self, workspace_id: &str, command: &Command) -> Result<()> {
        let req = self
            .request(Method::POST, &["api", "workspace", workspace_id, "command"])?
            .json(command);
        receive_empty(req, "add command").await
    }
}

impl TemplateSource for ApiClient {
    async fn templates(&self) -> Result<Vec<ProjectTemplate>> {
        let req = self.request(Method::GET, &["api", "project-template"])?;
        receive_json(req, "list project templates").await
    }
}

impl AgentConnector for ApiClient {
    type Agent = AgentClient;

    fn connect(&self, workspace: &Workspace) -> Result<AgentClient> {
        let href = workspace
            .ws_agent_url()
            .ok_or_else(|| ProvisionError::AgentUnavailable {
                workspace_id: workspace.id.clone(),
            })?;
        let base =
            Url::parse(href).with_context(|| format!("invalid project agent URL '{href}'"))?;
        Ok(AgentClient {
            http: self.http.clone(),
            base,
            token: self.token.clone(),
        })
    }
}

// ── Project agent ─────────────────────────────────────────────────────────────

/// Project agent of one running workspace.
#[derive(Debug, Clone)]
pub struct AgentClient {
    http: Client,
    base: Url,
    token: Option<String>,
}

/// Project description accepted by the agent's project endpoints.
#[derive(Debug, Serialize, PartialEq, Eq)]
struct ProjectConfig<'a> {
    name: &'a str,
    path: &'a str,
    description: &'a str,
    #[serde(rename = "type")]
    kind: String,
    source: &'a ProjectSource,
}

impl<'a> ProjectConfig<'a> {
    fn new(template: &'a ProjectTemplate, kind: String) -> Self {
        Self {
            name: &template.name,
            path: &template.path,
            description: &template.description,
            kind,
            source: &template.source,
        }
    }
}

impl AgentClient {
    fn request(&self, method: Method, segments: &[&str]) -> Result<RequestBuilder> {
        let url = endpoint(&self.base, segments)?;
        debug!(%method, %url, "agent request");
        Ok(authorize(self.http.request(method, url), self.token.as_deref()))
    }
}

impl ProjectAgent for AgentClient {
    async fn create_projects(&self, templates: &[ProjectTemplate]) -> Result<()> {
        let body: Vec<ProjectConfig<'_>> = templates
            .iter()
            .map(|t| {
                let kind = t
                    .project_type
                    .clone()
                    .unwrap_or_else(|| crate::domain::project::BLANK_PROJECT_TYPE.to_string());
                ProjectConfig::new(t, kind)
            })
            .collect();
        let req = self.request(Method::POST, &["project", "batch"])?.json(&body);
        receive_empty(req, "create projects").await
    }
}

impl ProjectTypeResolver for AgentClient {
    async fn resolve_type(&self, template: &ProjectTemplate) -> Result<()> {
        let path = path_segments(&template.path, &template.name);

        let mut resolve = vec!["project", "resolve"];
        resolve.extend(&path);
        let estimations: Vec<SourceEstimation> =
            receive_json(self.request(Method::GET, &resolve)?, "estimate project type").await?;

        let kind = pick_project_type(template, &estimations);
        debug!(project = %template.name, %kind, "project type chosen");

        let mut update = vec!["project"];
        update.extend(&path);
        let req = self
            .request(Method::PUT, &update)?
            .json(&ProjectConfig::new(template, kind));
        receive_empty(req, "update project type").await
    }
}

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Append `segments` to `base`, percent-encoding each one.
fn endpoint(base: &Url, segments: &[&str]) -> Result<Url> {
    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|()| anyhow!("URL '{base}' cannot take a path"))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

/// Segments of a project path, falling back to the project name.
fn path_segments<'a>(path: &'a str, name: &'a str) -> Vec<&'a str> {
    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
    if segments.is_empty() { vec![name] } else { segments }
}

fn authorize(req: RequestBuilder, token: Option<&str>) -> RequestBuilder {
    match token {
        Some(token) => req.bearer_auth(token),
        None => req,
    }
}

/// Fail when the status sequence can no longer reach `target`.
fn check_transition(
    workspace_id: &str,
    seen: &[WorkspaceStatus],
    status: WorkspaceStatus,
    target: WorkspaceStatus,
) -> Result<()> {
    match status {
        WorkspaceStatus::Error => {
            anyhow::bail!("workspace '{workspace_id}' entered ERROR while waiting for {target}")
        }
        WorkspaceStatus::Stopped
            if target == WorkspaceStatus::Running && seen.contains(&WorkspaceStatus::Starting) =>
        {
            anyhow::bail!("workspace '{workspace_id}' stopped before reaching {target}")
        }
        _ => Ok(()),
    }
}

async fn checked(req: RequestBuilder, what: &str) -> Result<Response> {
    let response = req
        .send()
        .await
        .with_context(|| format!("{what}: request failed"))?;
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    anyhow::bail!("{what}: HTTP {status} {}", body.trim())
}

async fn receive_json<T: DeserializeOwned>(req: RequestBuilder, what: &str) -> Result<T> {
    checked(req, what)
        .await?
        .json()
        .await
        .with_context(|| format!("{what}: invalid response body"))
}

async fn receive_empty(req: RequestBuilder, what: &str) -> Result<()> {
    checked(req, what).await.map(drop)
}
