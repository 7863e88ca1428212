pub mod health;

use axum::{
    http::Uri,
    routing::{get, post},
    Router,
};

use crate::errors::AppError;
use crate::tailor::handlers;

async fn not_found(uri: Uri) -> AppError {
    AppError::NotFound(format!("No route for {uri}"))
}

pub fn build_router() -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/tailor/normalize", post(handlers::handle_normalize))
        .route("/api/v1/tailor/completion", post(handlers::handle_completion))
        .route("/api/v1/tailor/highlight", post(handlers::handle_highlight))
        .fallback(not_found)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::{to_bytes, Body},
        http::{Request, StatusCode},
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    async fn post_json(path: &str, body: Value) -> (StatusCode, Value) {
        let request = Request::builder()
            .method("POST")
            .uri(path)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        let response = build_router().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_health() {
        let request = Request::builder().uri("/health").body(Body::empty()).unwrap();
        let response = build_router().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["status"], "ok");
        assert_eq!(body["service"], "tailor-api");
    }

    #[tokio::test]
    async fn test_normalize_returns_result_and_segments() {
        let (status, body) = post_json(
            "/api/v1/tailor/normalize",
            json!({
                "sourceText": "Led a team of engineers.",
                "jobDescription": "Engineering manager",
                "payload": {
                    "suggestions": [{
                        "currentPhrase": "Led a team",
                        "suggestedPhrase": "Managed 8 engineers",
                        "requirement": "People leadership",
                        "reason": "States team size",
                        "confidence": "high"
                    }],
                    "summary": { "atsAlignmentScore": 1.7, "keywordCoverage": ["team"] }
                }
            }),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["sourceText"], "Led a team of engineers.");
        assert_eq!(body["data"]["summary"]["alignmentScore"], 1.0);
        assert_eq!(body["data"]["suggestions"][0]["confidence"], "high");
        assert_eq!(body["segments"][0]["content"], "Led a team");
        assert_eq!(body["segments"][0]["suggestion"]["requirement"], "People leadership");
        assert_eq!(body["segments"][1], json!({ "content": " of engineers." }));
    }

    #[tokio::test]
    async fn test_normalize_missing_payload_is_bad_gateway() {
        let (status, body) = post_json(
            "/api/v1/tailor/normalize",
            json!({ "sourceText": "resume", "jobDescription": "jd" }),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body["error"]["code"], "AI_RESPONSE_FORMAT_ERROR");
    }

    #[tokio::test]
    async fn test_normalize_rejects_blank_source_text() {
        let (status, body) = post_json(
            "/api/v1/tailor/normalize",
            json!({ "sourceText": "   ", "jobDescription": "jd", "payload": {} }),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_completion_strips_fences() {
        let (status, body) = post_json(
            "/api/v1/tailor/completion",
            json!({
                "sourceText": "Wrote Python scripts.",
                "jobDescription": "Python developer",
                "completion": "```json\n{\"suggestions\": [{\"currentPhrase\": \"python\"}], \"summary\": {\"score\": 0.4}}\n```"
            }),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["summary"]["alignmentScore"], 0.4);
        assert_eq!(body["data"]["suggestions"][0]["confidence"], "medium");
        let segments = body["segments"].as_array().unwrap();
        assert_eq!(segments.len(), 3);
        assert_eq!(segments[1]["content"], "Python");
    }

    #[tokio::test]
    async fn test_completion_invalid_json_is_bad_gateway() {
        let (status, body) = post_json(
            "/api/v1/tailor/completion",
            json!({
                "sourceText": "resume",
                "jobDescription": "jd",
                "completion": "I could not analyse this resume."
            }),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body["error"]["message"], "Failed to parse AI response");
    }

    #[tokio::test]
    async fn test_highlight_with_supplied_suggestions() {
        let (status, body) = post_json(
            "/api/v1/tailor/highlight",
            json!({
                "sourceText": "Led a team of engineers.",
                "suggestions": [
                    { "currentPhrase": "a team" },
                    { "currentPhrase": "team of" }
                ]
            }),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body["segments"],
            json!([
                { "content": "Led " },
                {
                    "content": "a team",
                    "suggestion": {
                        "currentPhrase": "a team",
                        "suggestedPhrase": "",
                        "requirement": "",
                        "reason": "",
                        "confidence": "medium"
                    }
                },
                { "content": " of engineers." }
            ])
        );
    }

    #[tokio::test]
    async fn test_highlight_unknown_confidence_is_json_validation_error() {
        let (status, body) = post_json(
            "/api/v1/tailor/highlight",
            json!({
                "sourceText": "Led a team of engineers.",
                "suggestions": [{ "currentPhrase": "team", "confidence": "HIGH" }]
            }),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
        assert!(body["error"]["message"].as_str().unwrap().contains("HIGH"));
    }

    #[tokio::test]
    async fn test_malformed_body_is_json_validation_error() {
        for path in [
            "/api/v1/tailor/highlight",
            "/api/v1/tailor/normalize",
            "/api/v1/tailor/completion",
        ] {
            let request = Request::builder()
                .method("POST")
                .uri(path)
                .header("content-type", "application/json")
                .body(Body::from("{\"sourceText\": "))
                .unwrap();
            let response = build_router().oneshot(request).await.unwrap();
            assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{path}");
            let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
            let body: Value = serde_json::from_slice(&bytes).unwrap();
            assert_eq!(body["error"]["code"], "VALIDATION_ERROR", "{path}");
        }
    }

    #[tokio::test]
    async fn test_missing_content_type_is_json_validation_error() {
        let request = Request::builder()
            .method("POST")
            .uri("/api/v1/tailor/highlight")
            .body(Body::from(r#"{"sourceText": "resume"}"#))
            .unwrap();
        let response = build_router().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_unknown_route_is_not_found() {
        let (status, body) = post_json("/api/v1/resumes", json!({})).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["code"], "NOT_FOUND");
    }
}
