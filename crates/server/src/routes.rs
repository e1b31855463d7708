//! Router and request handlers.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use chainopt_agent::{render_report, AgentHandle, PeerOutcome, QueryResponder};
use chainopt_core::{unix_now, Proposal};
use serde::{Deserialize, Serialize};
use tokio::sync::watch;
use tower_http::trace::TraceLayer;

#[derive(Clone)]
struct AppState {
    handle: AgentHandle,
    responder: QueryResponder,
}

/// Build the agent's HTTP router.
pub fn router(handle: AgentHandle) -> Router {
    let state = AppState {
        responder: QueryResponder::new(handle.clone()),
        handle,
    };

    Router::new()
        .route("/healthz", get(healthz))
        .route("/status", get(status))
        .route("/metrics/latest", get(latest_metrics))
        .route("/proposals/latest", get(latest_proposal))
        .route("/proposals", post(submit_proposal))
        .route("/chat", post(chat))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Serve the router until shutdown is signalled.
pub async fn serve(
    addr: std::net::SocketAddr,
    handle: AgentHandle,
    mut shutdown: watch::Receiver<bool>,
) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, "http adapter listening");
    axum::serve(listener, router(handle))
        .with_graceful_shutdown(async move {
            let _ = shutdown.changed().await;
        })
        .await?;
    Ok(())
}

async fn healthz() -> &'static str {
    "ok"
}

async fn status(State(state): State<AppState>) -> Response {
    Json(state.handle.status().await).into_response()
}

async fn latest_metrics(State(state): State<AppState>) -> Response {
    match state.handle.latest_snapshot().await {
        Some(snapshot) => Json(snapshot).into_response(),
        None => not_yet("no metrics yet"),
    }
}

#[derive(Debug, Deserialize)]
struct ProposalParams {
    detail: Option<String>,
}

async fn latest_proposal(
    State(state): State<AppState>,
    Query(params): Query<ProposalParams>,
) -> Response {
    match state.handle.latest_proposal().await {
        Some(proposal) if params.detail.as_deref() == Some("report") => {
            render_report(&proposal).into_response()
        }
        Some(proposal) => Json(proposal).into_response(),
        None => not_yet("no proposals yet"),
    }
}

#[derive(Debug, Serialize)]
struct PeerReply {
    outcome: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    proposal_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    confidence: Option<f64>,
}

async fn submit_proposal(
    State(state): State<AppState>,
    Json(proposal): Json<Proposal>,
) -> Response {
    match state.handle.submit_peer_proposal(proposal).await {
        PeerOutcome::Accepted { proposal_id } => (
            StatusCode::CREATED,
            Json(PeerReply {
                outcome: "accepted",
                proposal_id: Some(proposal_id),
                confidence: None,
            }),
        )
            .into_response(),
        PeerOutcome::LowConfidence { confidence } => (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(PeerReply {
                outcome: "low_confidence",
                proposal_id: None,
                confidence: Some(confidence),
            }),
        )
            .into_response(),
        PeerOutcome::Unsafe => (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(PeerReply {
                outcome: "unsafe",
                proposal_id: None,
                confidence: None,
            }),
        )
            .into_response(),
    }
}

#[derive(Debug, Deserialize)]
struct ChatRequest {
    message: String,
}

#[derive(Debug, Serialize)]
struct ChatReply {
    response: String,
    timestamp: i64,
}

async fn chat(State(state): State<AppState>, Json(request): Json<ChatRequest>) -> Response {
    let response = state.responder.respond(&request.message).await;
    Json(ChatReply {
        response,
        timestamp: unix_now(),
    })
    .into_response()
}

fn not_yet(message: &str) -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(serde_json::json!({ "error": message })),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use chainopt_core::{AgentConfig, NetworkSnapshot, ParamSet};
    use tower::ServiceExt;

    fn test_handle() -> AgentHandle {
        AgentHandle::new(ParamSet::default(), AgentConfig::default())
    }

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn healthz_answers() {
        let response = router(test_handle())
            .oneshot(Request::get("/healthz").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn status_reports_counts() {
        let handle = test_handle();
        handle
            .history()
            .append_snapshot(NetworkSnapshot {
                timestamp: 1_700_000_000,
                gas_price: 60.0,
                tps: 600,
                block_time: 2.0,
                congestion_level: 0.4,
                active_users: 10_000,
            })
            .await;

        let response = router(handle)
            .oneshot(Request::get("/status").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = body_json(response).await;
        assert_eq!(json["snapshot_count"], 1);
        assert_eq!(json["proposal_count"], 0);
    }

    #[tokio::test]
    async fn latest_proposal_is_404_before_any_decision() {
        let response = router(test_handle())
            .oneshot(Request::get("/proposals/latest").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn peer_proposal_roundtrip() {
        let proposed = ParamSet {
            gas_limit: 32_000_000,
            ..ParamSet::default()
        };
        let proposal = Proposal {
            proposal_id: Proposal::derive_id(1_700_000_000, &proposed),
            timestamp: 1_700_000_000,
            current_params: ParamSet::default(),
            proposed_params: proposed,
            expected_improvement: 0.02,
            confidence_score: 0.9,
            reasoning: "peer recommendation".into(),
            proof_reference: None,
        };

        let response = router(test_handle())
            .oneshot(
                Request::post("/proposals")
                    .header("content-type", "application/json")
                    .body(Body::from(serde_json::to_vec(&proposal).unwrap()))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);

        let json = body_json(response).await;
        assert_eq!(json["outcome"], "accepted");
    }

    #[tokio::test]
    async fn unsafe_peer_proposal_is_unprocessable() {
        let wild = ParamSet {
            gas_limit: ParamSet::default().gas_limit * 3,
            ..ParamSet::default()
        };
        let proposal = Proposal {
            proposal_id: Proposal::derive_id(1_700_000_000, &wild),
            timestamp: 1_700_000_000,
            current_params: ParamSet::default(),
            proposed_params: wild,
            expected_improvement: 0.5,
            confidence_score: 0.9,
            reasoning: "wild peer recommendation".into(),
            proof_reference: None,
        };

        let response = router(test_handle())
            .oneshot(
                Request::post("/proposals")
                    .header("content-type", "application/json")
                    .body(Body::from(serde_json::to_vec(&proposal).unwrap()))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body_json(response).await["outcome"], "unsafe");
    }

    #[tokio::test]
    async fn chat_answers_with_help() {
        let response = router(test_handle())
            .oneshot(
                Request::post("/chat")
                    .header("content-type", "application/json")
                    .body(Body::from(r#"{"message":"hello there"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = body_json(response).await;
        assert!(json["response"]
            .as_str()
            .unwrap()
            .contains("status, proposals, or metrics"));
    }
}
