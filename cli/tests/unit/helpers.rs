//! Shared fakes for service tests.
//!
//! `FakeCloud` implements every remote port and records each call in a
//! shared event log, so tests can assert on ordering across ports.

#![allow(clippy::expect_used, dead_code)]

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use anyhow::{Result, bail};
use cradle_cli::application::ports::{
    AgentConnector, CreateOptions, Navigator, ProgressReporter, ProjectAgent,
    ProjectTypeResolver, WorkspaceApi,
};
use cradle_common::{
    Command, Link, ProjectTemplate, WSAGENT_LINK_REL, Workspace, WorkspaceConfig,
    WorkspaceRuntime, WorkspaceStatus,
};

pub type EventLog = Arc<Mutex<Vec<String>>>;
type FailureKeys = Arc<Mutex<HashSet<String>>>;

// ── Builders ──────────────────────────────────────────────────────────────────

pub fn workspace(id: &str, namespace: &str, name: &str) -> Workspace {
    Workspace {
        id: id.to_string(),
        namespace: namespace.to_string(),
        config: config(name),
        status: WorkspaceStatus::Stopped,
        runtime: None,
    }
}

pub fn config(name: &str) -> WorkspaceConfig {
    WorkspaceConfig {
        name: name.to_string(),
        default_env: "default".to_string(),
        ..WorkspaceConfig::default()
    }
}

pub fn command(name: &str) -> Command {
    Command {
        name: name.to_string(),
        kind: "custom".to_string(),
        command_line: format!("run {name}"),
        ..Command::default()
    }
}

pub fn template(name: &str, commands: &[&str]) -> ProjectTemplate {
    ProjectTemplate {
        name: name.to_string(),
        path: format!("/{name}"),
        commands: commands.iter().map(|c| command(c)).collect(),
        ..ProjectTemplate::default()
    }
}

pub fn names(list: &[String]) -> Vec<&str> {
    list.iter().map(String::as_str).collect()
}

/// Asserts that every `<kind>:begin:X` is directly followed by `<kind>:end:X`.
pub fn assert_never_overlapping(events: &[String], kind: &str) {
    let begin = format!("{kind}:begin:");
    let end = format!("{kind}:end:");
    let scoped: Vec<_> = events
        .iter()
        .filter(|e| e.starts_with(&begin) || e.starts_with(&end))
        .collect();
    for pair in scoped.chunks(2) {
        let [b, e] = pair else {
            panic!("unbalanced {kind} events: {scoped:?}");
        };
        assert_eq!(
            b.strip_prefix(&begin),
            e.strip_prefix(&end),
            "{kind} calls overlapped: {scoped:?}"
        );
    }
}

// ── Fake remote ports ─────────────────────────────────────────────────────────

/// Scripted workspace API plus agent connector.
///
/// Failure keys: `create`, `start`, `await`, `details`, `connect`,
/// `list_by_namespace`, `list_owned`, `create_projects`, `command:<scoped name>`,
/// `resolve:<project>`.
#[derive(Default)]
pub struct FakeCloud {
    pub events: EventLog,
    failures: FailureKeys,
    namespace_listing: Mutex<Vec<Workspace>>,
    owned_listing: Mutex<Vec<Workspace>>,
    never_running: bool,
}

impl FakeCloud {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every call identified by `key` fail.
    pub fn failing(self, key: &str) -> Self {
        self.failures
            .lock()
            .expect("lock")
            .insert(key.to_string());
        self
    }

    /// Let the RUNNING wait never resolve.
    pub fn never_running(mut self) -> Self {
        self.never_running = true;
        self
    }

    pub fn with_namespace_listing(self, list: Vec<Workspace>) -> Self {
        *self.namespace_listing.lock().expect("lock") = list;
        self
    }

    pub fn with_owned_listing(self, list: Vec<Workspace>) -> Self {
        *self.owned_listing.lock().expect("lock") = list;
        self
    }

    /// Stop failing calls identified by `key`.
    pub fn recover(&self, key: &str) {
        self.failures.lock().expect("lock").remove(key);
    }

    pub fn events(&self) -> Vec<String> {
        self.events.lock().expect("lock").clone()
    }

    /// Events starting with `prefix`, in order.
    pub fn events_with(&self, prefix: &str) -> Vec<String> {
        self.events()
            .into_iter()
            .filter(|e| e.starts_with(prefix))
            .collect()
    }

    /// Position of the first event equal to `event`.
    pub fn position(&self, event: &str) -> usize {
        let events = self.events();
        events
            .iter()
            .position(|e| e == event)
            .unwrap_or_else(|| panic!("event '{event}' not recorded: {events:?}"))
    }

    pub fn navigator(&self) -> RecordingNavigator {
        RecordingNavigator {
            events: Arc::clone(&self.events),
        }
    }

    fn record(&self, event: String) {
        self.events.lock().expect("lock").push(event);
    }

    fn check(&self, key: &str) -> Result<()> {
        check(&self.failures, key)
    }
}

fn check(failures: &Mutex<HashSet<String>>, key: &str) -> Result<()> {
    if failures.lock().expect("lock").contains(key) {
        bail!("{key} failed");
    }
    Ok(())
}

impl WorkspaceApi for FakeCloud {
    async fn create_from_config(
        &self,
        namespace: &str,
        config: &WorkspaceConfig,
        _options: &CreateOptions,
    ) -> Result<Workspace> {
        self.record(format!("create:{namespace}/{}", config.name));
        self.check("create")?;
        Ok(Workspace {
            config: config.clone(),
            ..workspace("ws-1", namespace, &config.name)
        })
    }

    async fn start(&self, workspace_id: &str, env_name: &str) -> Result<()> {
        self.record(format!("start:{workspace_id}:{env_name}"));
        self.check("start")
    }

    async fn fetch_status_change(
        &self,
        workspace_id: &str,
        target: WorkspaceStatus,
    ) -> Result<()> {
        self.record(format!("await:{workspace_id}:{target}"));
        self.check("await")?;
        if self.never_running {
            std::future::pending::<()>().await;
        }
        self.record(format!("observed:{target}"));
        Ok(())
    }

    async fn fetch_details(&self, workspace_id: &str) -> Result<Workspace> {
        self.record(format!("details:{workspace_id}"));
        self.check("details")?;
        Ok(Workspace {
            status: WorkspaceStatus::Running,
            runtime: Some(WorkspaceRuntime {
                links: vec![Link {
                    rel: WSAGENT_LINK_REL.to_string(),
                    href: "http://agent.local/api".to_string(),
                }],
            }),
            ..workspace(workspace_id, "ns", "demo")
        })
    }

    async fn list_by_namespace(&self, namespace: &str) -> Result<Vec<Workspace>> {
        self.record(format!("list_by_namespace:{namespace}"));
        self.check("list_by_namespace")?;
        Ok(self.namespace_listing.lock().expect("lock").clone())
    }

    async fn list_owned(&self) -> Result<Vec<Workspace>> {
        self.record("list_owned".to_string());
        self.check("list_owned")?;
        Ok(self.owned_listing.lock().expect("lock").clone())
    }

    async fn add_command(&self, _workspace_id: &str, command: &Command) -> Result<()> {
        self.record(format!("command:begin:{}", command.name));
        tokio::task::yield_now().await;
        self.record(format!("command:end:{}", command.name));
        self.check(&format!("command:{}", command.name))
    }
}

impl AgentConnector for FakeCloud {
    type Agent = FakeAgent;

    fn connect(&self, workspace: &Workspace) -> Result<FakeAgent> {
        self.record(format!("connect:{}", workspace.id));
        self.check("connect")?;
        Ok(FakeAgent {
            events: Arc::clone(&self.events),
            failures: Arc::clone(&self.failures),
        })
    }
}

/// Agent handed out by [`FakeCloud::connect`], sharing its log and failures.
#[derive(Default)]
pub struct FakeAgent {
    pub events: EventLog,
    failures: FailureKeys,
}

impl FakeAgent {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing(self, key: &str) -> Self {
        self.failures
            .lock()
            .expect("lock")
            .insert(key.to_string());
        self
    }

    pub fn events(&self) -> Vec<String> {
        self.events.lock().expect("lock").clone()
    }

    fn record(&self, event: String) {
        self.events.lock().expect("lock").push(event);
    }
}

impl ProjectAgent for FakeAgent {
    async fn create_projects(&self, templates: &[ProjectTemplate]) -> Result<()> {
        let batch: Vec<_> = templates.iter().map(|t| t.name.as_str()).collect();
        self.record(format!("create_projects:{}", batch.join(",")));
        check(&self.failures, "create_projects")
    }
}

impl ProjectTypeResolver for FakeAgent {
    async fn resolve_type(&self, template: &ProjectTemplate) -> Result<()> {
        self.record(format!("resolve:begin:{}", template.name));
        tokio::task::yield_now().await;
        self.record(format!("resolve:end:{}", template.name));
        check(&self.failures, &format!("resolve:{}", template.name))
    }
}

// ── Presentation fakes ────────────────────────────────────────────────────────

/// Navigator writing into the shared event log.
pub struct RecordingNavigator {
    events: EventLog,
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, path: &str) {
        self.events
            .lock()
            .expect("lock")
            .push(format!("navigate:{path}"));
    }
}

pub struct NoopReporter;

impl ProgressReporter for NoopReporter {
    fn step(&self, _: &str) {}
    fn success(&self, _: &str) {}
    fn warn(&self, _: &str) {}
}
