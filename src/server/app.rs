use anyhow::{anyhow, Result};
use async_graphql::{Request, Response as GraphQLResponse};
use axum::{
    extract::{Json, State},
    routing::get,
    Router,
};
use sea_orm::DatabaseConnection;
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};

use crate::config::ServerConfig;
use crate::graphql::{build_schema, GraphQLContext, GraphQLSchema, PlatformEvents};

use super::handlers::health;
use super::websocket::graphql_ws_handler;

#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub graphql_schema: GraphQLSchema,
}

pub fn create_app(db: DatabaseConnection, config: &ServerConfig) -> Result<Router> {
    let events = Arc::new(PlatformEvents::new(config.event_buffer_size));

    // Topics without subscribers are pruned periodically
    {
        let events = events.clone();
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(Duration::from_secs(300));
            interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
            interval.tick().await;

            loop {
                interval.tick().await;
                let removed = events.cleanup_idle().await;
                if removed > 0 {
                    tracing::debug!("Removed {} idle notification topic(s)", removed);
                }
            }
        });
    }

    let graphql_schema = build_schema(GraphQLContext::new(db.clone(), events));

    let state = AppState { db, graphql_schema };

    let cors = match config.cors_origin.as_deref() {
        Some(origin) => CorsLayer::new().allow_origin(
            origin
                .parse::<axum::http::HeaderValue>()
                .map_err(|e| anyhow!("Invalid CORS origin: {}", e))?,
        ),
        None => CorsLayer::new().allow_origin(Any),
    }
    .allow_methods([
        axum::http::Method::GET,
        axum::http::Method::POST,
        axum::http::Method::OPTIONS,
    ])
    .allow_headers(Any)
    .allow_credentials(false);

    let app = Router::new()
        .route("/health", get(health::health_check))
        .route(
            "/graphql",
            get(graphql_playground)
                .post(graphql_handler)
                .options(|| async { axum::http::StatusCode::OK }),
        )
        .route("/graphql/ws", get(graphql_ws_handler))
        .layer(ServiceBuilder::new().layer(cors))
        .with_state(state);

    Ok(app)
}

async fn graphql_handler(
    State(state): State<AppState>,
    Json(req): Json<Request>,
) -> Json<GraphQLResponse> {
    tracing::debug!("GraphQL request received");
    let response = state.graphql_schema.execute(req).await;
    tracing::debug!("GraphQL request completed");
    Json(response)
}

async fn graphql_playground() -> impl axum::response::IntoResponse {
    axum::response::Html(async_graphql::http::playground_source(
        async_graphql::http::GraphQLPlaygroundConfig::new("/graphql")
            .subscription_endpoint("/graphql/ws"),
    ))
}
