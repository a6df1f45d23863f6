//! Tests for the `project_import` application service.
//!
//! **Property 2: type resolution runs in input order, one project at a time**
//! **Property 3: command failures never fail the project**
//! **Property 7: only the failed project is reported**

#![allow(clippy::expect_used)]

use cradle_cli::application::services::project_import::import_projects;
use cradle_cli::domain::BatchOutcome;

use crate::helpers::{FakeAgent, FakeCloud, assert_never_overlapping, names, template};

#[tokio::test]
async fn test_import_projects_empty_batch_succeeds() {
    let api = FakeCloud::new();
    let agent = FakeAgent::new();
    let report = import_projects(&api, &agent, "ws-1", &[]).await;
    assert_eq!(report.outcome, BatchOutcome::Success);
    assert!(report.command_failures.is_empty());
}

#[tokio::test]
async fn test_import_projects_resolves_in_order_without_overlap() {
    let api = FakeCloud::new();
    let agent = FakeAgent::new();
    let batch = [template("a", &[]), template("b", &[]), template("c", &[])];

    let report = import_projects(&api, &agent, "ws-1", &batch).await;

    assert_eq!(report.outcome, BatchOutcome::Success);
    assert_eq!(
        agent
            .events()
            .into_iter()
            .filter(|e| e.starts_with("resolve:begin:"))
            .collect::<Vec<_>>(),
        ["resolve:begin:a", "resolve:begin:b", "resolve:begin:c"]
    );
    assert_never_overlapping(&agent.events(), "resolve");
}

#[tokio::test]
async fn test_import_projects_commands_run_before_type_resolution() {
    let cloud = FakeCloud::new();
    let agent = cloud_agent(&cloud);
    let batch = [template("p1", &["build"]), template("p2", &["run"])];

    import_projects(&cloud, &agent, "ws-1", &batch).await;

    let expected = [
        "command:begin:p1:build",
        "command:end:p1:build",
        "resolve:begin:p1",
        "resolve:end:p1",
        "command:begin:p2:run",
        "command:end:p2:run",
        "resolve:begin:p2",
        "resolve:end:p2",
    ];
    let events: Vec<_> = cloud
        .events()
        .into_iter()
        .filter(|e| !e.starts_with("connect:"))
        .collect();
    assert_eq!(events, expected);
}

#[tokio::test]
async fn test_import_projects_command_failure_is_swallowed() {
    let cloud = FakeCloud::new().failing("command:p1:build");
    let agent = cloud_agent(&cloud);
    let batch = [template("p1", &["build", "run"])];

    let report = import_projects(&cloud, &agent, "ws-1", &batch).await;

    assert_eq!(report.outcome, BatchOutcome::Success);
    assert_eq!(report.command_failures.len(), 1);
    assert_eq!(report.command_failures[0].project, "p1");
    assert_eq!(names(report.command_failures[0].commands.names()), ["p1:build"]);
    cloud.position("resolve:begin:p1");
}

#[tokio::test]
async fn test_import_projects_reports_only_failed_resolution() {
    let api = FakeCloud::new();
    let agent = FakeAgent::new().failing("resolve:p2");
    let batch = [template("p1", &["build"]), template("p2", &[])];

    let report = import_projects(&api, &agent, "ws-1", &batch).await;

    assert_eq!(names(report.outcome.failures()), ["p2"]);
    assert!(report.command_failures.is_empty());
    assert_eq!(api.events_with("command:end:"), ["command:end:p1:build"]);
}

#[tokio::test]
async fn test_import_projects_failure_does_not_stop_later_projects() {
    let api = FakeCloud::new();
    let agent = FakeAgent::new().failing("resolve:a").failing("resolve:c");
    let batch = [template("a", &[]), template("b", &[]), template("c", &[])];

    let report = import_projects(&api, &agent, "ws-1", &batch).await;

    assert_eq!(names(report.outcome.failures()), ["a", "c"]);
    assert!(agent.events().contains(&"resolve:end:b".to_string()));
}

/// Agent sharing the cloud's event log, so both streams interleave.
fn cloud_agent(cloud: &FakeCloud) -> FakeAgent {
    use cradle_cli::application::ports::AgentConnector;
    cloud
        .connect(&crate::helpers::workspace("ws-1", "ns", "demo"))
        .expect("connect")
}
