//! Integration tests for rendering workflows from templates

mod common;

use common::write_project;
use eyre::Result;
use n8n_builder::cli::{build_workflows, compare_workflows};
use n8n_builder::compare::Status;
use serde_json::{Value, json};
use serial_test::serial;
use std::path::Path;
use tempfile::TempDir;

const TEMPLATE: &str = r#"{
  // Slack report, rendered per channel
  name: "report-template",
  nodes: [
    {
      type: "n8n-nodes-base.slack",
      parameters: {
        channel: "{{ channel }}",
        text: "Daily report for {{ channel }}",
        token: "{{ secret:N8N_IT_SLACK_TOKEN }}",
      },
    },
    {
      type: "n8n-nodes-base.cron",
      parameters: { hour: "{{ hour }}" },
    },
  ],
}
"#;

const WORKFLOWS: &str = r##"
  - name: ops-report
    template: templates/report.json5
    parameters:
      channel: "#ops"
      hour: 9
  - name: sales-report
    template: templates/report.json5
    parameters:
      channel: "#sales"
      hour: 17
"##;

fn read_json(path: &Path) -> Value {
    serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap()
}

fn project(workflows: &str) -> (TempDir, std::path::PathBuf, std::path::PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    std::fs::create_dir_all(temp_dir.path().join("templates")).unwrap();
    std::fs::write(temp_dir.path().join("templates/report.json5"), TEMPLATE).unwrap();

    let (config, env) = write_project(temp_dir.path(), "http://localhost:5678", workflows);
    let mut env_content = std::fs::read_to_string(&env).unwrap();
    env_content.push_str("N8N_IT_SLACK_TOKEN=xoxb-test\n");
    std::fs::write(&env, env_content).unwrap();

    (temp_dir, config, env)
}

#[tokio::test]
async fn test_build_renders_every_definition() -> Result<()> {
    let (temp_dir, config, env) = project(WORKFLOWS);

    let count = build_workflows(&config, &env).await?;
    assert_eq!(count, 2);

    let built_dir = temp_dir.path().join("out/built");
    let ops = read_json(&built_dir.join("ops-report.json"));
    assert_eq!(
        ops,
        json!({
            "name": "ops-report",
            "nodes": [
                {
                    "type": "n8n-nodes-base.slack",
                    "parameters": {
                        "channel": "#ops",
                        "text": "Daily report for #ops",
                        "token": "xoxb-test"
                    }
                },
                {
                    "type": "n8n-nodes-base.cron",
                    "parameters": {"hour": 9}
                }
            ]
        })
    );

    let sales = read_json(&built_dir.join("sales-report.json"));
    assert_eq!(sales["nodes"][1]["parameters"]["hour"], 17);

    Ok(())
}

#[tokio::test]
async fn test_build_output_compares_identical_to_itself() -> Result<()> {
    let (temp_dir, config, env) = project(WORKFLOWS);
    build_workflows(&config, &env).await?;

    let built_dir = temp_dir.path().join("out/built");
    let pulled_dir = temp_dir.path().join("out/pulled");
    std::fs::create_dir_all(&pulled_dir)?;
    for name in ["ops-report.json", "sales-report.json"] {
        std::fs::copy(built_dir.join(name), pulled_dir.join(name))?;
    }

    let results = compare_workflows(&config)?;
    assert!(results.iter().all(|r| r.status == Status::Identical));

    Ok(())
}

#[tokio::test]
async fn test_build_fails_on_unknown_parameter() -> Result<()> {
    let workflows = r##"
  - name: partial
    template: templates/report.json5
    parameters:
      channel: "#ops"
"##;
    let (_temp_dir, config, env) = project(workflows);

    let err = build_workflows(&config, &env).await.unwrap_err();
    let message = format!("{:#}", err);
    assert!(message.contains("partial"), "unexpected error: {}", message);
    assert!(message.contains("unknown parameter 'hour'"));

    Ok(())
}

#[tokio::test]
async fn test_build_fails_on_missing_template() -> Result<()> {
    let workflows = r##"
  - name: orphan
    template: templates/missing.json
"##;
    let (temp_dir, config, env) = project(workflows);

    let err = build_workflows(&config, &env).await.unwrap_err();
    assert!(format!("{:#}", err).contains("Error building workflow 'orphan'"));
    assert!(!temp_dir.path().join("out/built/orphan.json").exists());

    Ok(())
}

#[tokio::test]
async fn test_build_rejects_invalid_config() -> Result<()> {
    let workflows = r##"
  - name: twin
    template: templates/report.json5
  - name: twin
    template: templates/report.json5
"##;
    let (_temp_dir, config, env) = project(workflows);

    let err = build_workflows(&config, &env).await.unwrap_err();
    assert!(err.to_string().contains("twin"));

    Ok(())
}

#[tokio::test]
#[serial]
async fn test_build_reads_secret_from_environment() -> Result<()> {
    let (temp_dir, config, env) = project(WORKFLOWS);
    std::fs::write(&env, "")?;

    // SAFETY: serialized with the other environment-touching tests
    unsafe { std::env::set_var("N8N_IT_SLACK_TOKEN", "from-env") };
    let result = build_workflows(&config, &env).await;
    unsafe { std::env::remove_var("N8N_IT_SLACK_TOKEN") };
    result?;

    let ops = read_json(&temp_dir.path().join("out/built/ops-report.json"));
    assert_eq!(ops["nodes"][0]["parameters"]["token"], "from-env");

    Ok(())
}

#[tokio::test]
#[serial]
async fn test_build_without_secret_fails() -> Result<()> {
    let (_temp_dir, config, env) = project(WORKFLOWS);
    std::fs::write(&env, "")?;

    let err = build_workflows(&config, &env).await.unwrap_err();
    assert!(format!("{:#}", err).contains("N8N_IT_SLACK_TOKEN"));

    Ok(())
}
