//! End-to-end tests for the GraphQL mutation, query and subscription roots

use anyhow::Result;
use async_graphql::Value;
use commander::database::migrations::Migrator;
use commander::graphql::{build_schema, GraphQLContext, GraphQLSchema, PlatformEvents};
use commander::services::PLATFORM_ADDED_TOPIC;
use futures_util::StreamExt;
use sea_orm::Database;
use sea_orm_migration::MigratorTrait;
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;

async fn setup() -> Result<(GraphQLSchema, Arc<PlatformEvents>)> {
    let db = Database::connect("sqlite::memory:").await?;
    Migrator::up(&db, None).await?;

    let events = Arc::new(PlatformEvents::new(16));
    let schema = build_schema(GraphQLContext::new(db, events.clone()));
    Ok((schema, events))
}

async fn run(schema: &GraphQLSchema, query: &str) -> Result<serde_json::Value> {
    let response = schema.execute(query).await;
    assert!(
        response.errors.is_empty(),
        "unexpected errors: {:?}",
        response.errors
    );
    Ok(response.data.into_json()?)
}

async fn error_code(schema: &GraphQLSchema, query: &str) -> Option<Value> {
    let response = schema.execute(query).await;
    response
        .errors
        .first()
        .and_then(|error| error.extensions.as_ref())
        .and_then(|extensions| extensions.get("code"))
        .cloned()
}

async fn add_platform(schema: &GraphQLSchema, name: &str) -> Result<i64> {
    let data = run(
        schema,
        &format!(
            r#"mutation {{ addPlatform(input: {{ name: "{}" }}) {{ platform {{ id name }} }} }}"#,
            name
        ),
    )
    .await?;

    Ok(data["addPlatform"]["platform"]["id"]
        .as_i64()
        .expect("platform id"))
}

async fn wait_for_subscriber(events: &PlatformEvents) {
    let topic = PLATFORM_ADDED_TOPIC.to_string();
    for _ in 0..500 {
        if events.receiver_count(&topic).await > 0 {
            return;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!("subscription was never registered");
}

#[tokio::test]
async fn add_platform_then_read_it_back() -> Result<()> {
    let (schema, _) = setup().await?;

    let id = add_platform(&schema, "Docker").await?;
    assert!(id > 0);

    let data = run(&schema, &format!("{{ platform(id: {}) {{ id name }} }}", id)).await?;
    assert_eq!(data["platform"], json!({ "id": id, "name": "Docker" }));

    Ok(())
}

#[tokio::test]
async fn add_platform_notifies_subscribers_once_per_call() -> Result<()> {
    let (schema, events) = setup().await?;

    let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
    let subscriber_schema = schema.clone();
    let subscriber = tokio::spawn(async move {
        let mut stream =
            subscriber_schema.execute_stream("subscription { onPlatformAdded { id name } }");
        while let Some(response) = stream.next().await {
            if tx.send(response).is_err() {
                break;
            }
        }
    });

    wait_for_subscriber(&events).await;

    let first = add_platform(&schema, "Kubernetes").await?;
    let second = add_platform(&schema, "Terraform").await?;

    for (expected_id, expected_name) in [(first, "Kubernetes"), (second, "Terraform")] {
        let response = tokio::time::timeout(Duration::from_secs(5), rx.recv())
            .await?
            .expect("subscription ended early");
        assert!(response.errors.is_empty());

        let data = response.data.into_json()?;
        assert_eq!(
            data["onPlatformAdded"],
            json!({ "id": expected_id, "name": expected_name })
        );
    }

    assert!(
        tokio::time::timeout(Duration::from_millis(200), rx.recv())
            .await
            .is_err(),
        "no further notifications expected"
    );

    subscriber.abort();
    Ok(())
}

#[tokio::test]
async fn add_command_for_existing_platform() -> Result<()> {
    let (schema, _) = setup().await?;
    let platform_id = add_platform(&schema, "dotnet").await?;

    let data = run(
        &schema,
        &format!(
            r#"mutation {{
                addCommand(input: {{ howTo: "Build a project", commandLine: "dotnet build", platformId: {} }}) {{
                    command {{ id howTo commandLine platformId platform {{ name }} }}
                }}
            }}"#,
            platform_id
        ),
    )
    .await?;

    let command = &data["addCommand"]["command"];
    assert_eq!(command["platformId"], json!(platform_id));
    assert_eq!(command["howTo"], "Build a project");
    assert_eq!(command["commandLine"], "dotnet build");
    assert_eq!(command["platform"]["name"], "dotnet");

    let data = run(
        &schema,
        &format!("{{ platform(id: {}) {{ commands {{ commandLine }} }} }}", platform_id),
    )
    .await?;
    assert_eq!(
        data["platform"]["commands"],
        json!([{ "commandLine": "dotnet build" }])
    );

    Ok(())
}

#[tokio::test]
async fn add_command_for_missing_platform_is_rejected() -> Result<()> {
    let (schema, _) = setup().await?;

    let code = error_code(
        &schema,
        r#"mutation { addCommand(input: { howTo: "x", commandLine: "y", platformId: 404 }) { command { id } } }"#,
    )
    .await;
    assert_eq!(code, Some(Value::from("INVALID_REFERENCE")));

    let data = run(&schema, "{ commands { id } }").await?;
    assert_eq!(data["commands"], json!([]));

    Ok(())
}

#[tokio::test]
async fn update_platform_changes_only_the_name() -> Result<()> {
    let (schema, _) = setup().await?;
    let id = add_platform(&schema, "Nodejs").await?;

    let data = run(
        &schema,
        &format!(
            r#"mutation {{ updatePlatform(input: {{ id: {}, name: "Node.js" }}) {{ platform {{ id name }} }} }}"#,
            id
        ),
    )
    .await?;
    assert_eq!(
        data["updatePlatform"]["platform"],
        json!({ "id": id, "name": "Node.js" })
    );

    let data = run(&schema, "{ platforms { id name } }").await?;
    assert_eq!(data["platforms"], json!([{ "id": id, "name": "Node.js" }]));

    Ok(())
}

#[tokio::test]
async fn remove_platform_makes_lookup_empty() -> Result<()> {
    let (schema, _) = setup().await?;
    let id = add_platform(&schema, "Windows").await?;

    let data = run(
        &schema,
        &format!(
            "mutation {{ removePlatform(input: {{ id: {} }}) {{ platform {{ id name }} }} }}",
            id
        ),
    )
    .await?;
    assert_eq!(
        data["removePlatform"]["platform"],
        json!({ "id": id, "name": "Windows" })
    );

    let data = run(&schema, &format!("{{ platform(id: {}) {{ id }} }}", id)).await?;
    assert_eq!(data["platform"], serde_json::Value::Null);

    Ok(())
}

#[tokio::test]
async fn missing_platform_is_reported_not_crashed() -> Result<()> {
    let (schema, _) = setup().await?;

    let code = error_code(
        &schema,
        "mutation { removePlatform(input: { id: 999 }) { platform { id } } }",
    )
    .await;
    assert_eq!(code, Some(Value::from("NOT_FOUND")));

    let code = error_code(
        &schema,
        r#"mutation { updatePlatform(input: { id: 999, name: "Ghost" }) { platform { id } } }"#,
    )
    .await;
    assert_eq!(code, Some(Value::from("NOT_FOUND")));

    Ok(())
}

#[tokio::test]
async fn missing_command_lookup_is_null() -> Result<()> {
    let (schema, _) = setup().await?;

    let data = run(&schema, "{ command(id: 404) { id howTo } }").await?;
    assert_eq!(data["command"], serde_json::Value::Null);

    Ok(())
}

#[tokio::test]
async fn blank_platform_name_is_rejected_without_notification() -> Result<()> {
    let (schema, events) = setup().await?;
    let mut receiver = events.subscribe(PLATFORM_ADDED_TOPIC.to_string()).await;

    let code = error_code(
        &schema,
        r#"mutation { addPlatform(input: { name: "   " }) { platform { id } } }"#,
    )
    .await;
    assert_eq!(code, Some(Value::from("VALIDATION_FAILED")));
    assert!(receiver.try_recv().is_err());

    let data = run(&schema, "{ platforms { id } }").await?;
    assert_eq!(data["platforms"], json!([]));

    Ok(())
}
