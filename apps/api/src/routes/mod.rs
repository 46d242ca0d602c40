pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::chat::handlers as chat;
use crate::classifier::handlers as classifier;
use crate::income::handlers as income;
use crate::prediction::handlers as prediction;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Prediction API
        .route("/api/v1/predict", post(prediction::handle_predict))
        // Chat API
        .route("/api/v1/chat", post(chat::handle_chat))
        .route("/api/v1/chat/suggestions", get(chat::handle_suggestions))
        // Income lookup
        .route("/api/v1/states", get(income::handle_list_states))
        .route(
            "/api/v1/states/:state/suburbs",
            get(income::handle_list_suburbs),
        )
        .route(
            "/api/v1/income/:state/:suburb",
            get(income::handle_get_income),
        )
        // House style classification
        .route("/api/v1/classify", post(classifier::handle_classify))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use axum::{
        body::{to_bytes, Body},
        http::{Request, StatusCode},
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::classifier::tests::FixedClassifier;
    use crate::classifier::{ImageClassifier, UnavailableClassifier};
    use crate::income::tests::sample_table;
    use crate::llm_client::tests::ScriptedTransport;
    use crate::llm_client::CompletionClient;

    fn state_with(transport: Arc<ScriptedTransport>, classifier: Arc<dyn ImageClassifier>) -> AppState {
        AppState {
            llm: CompletionClient::new(transport),
            incomes: Arc::new(sample_table()),
            classifier,
        }
    }

    fn app(reply: &str) -> Router {
        build_router(state_with(
            Arc::new(ScriptedTransport::reply(reply)),
            Arc::new(UnavailableClassifier),
        ))
    }

    async fn send(router: Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = router.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, body)
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let (status, body) = send(app(""), get("/health")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn test_predict_returns_parsed_records() {
        let reply = "2025|$120,000|$75,000|$800,000|$950,000|58%\nbadline";
        let request = post_json(
            "/api/v1/predict",
            json!({
                "state": "VIC",
                "suburb": "Clayton",
                "property_type": "House",
                "bedrooms": 3,
                "bathrooms": 2
            }),
        );

        let (status, body) = send(app(reply), request).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["outcome"], "predicted");
        assert_eq!(body["base_income"], 41_600);
        assert_eq!(body["skipped_lines"], 1);
        assert_eq!(body["predictions"][0]["year"], "2025");
        assert_eq!(body["predictions"][0]["display"]["price_range_high"], "$950,000");
        assert_eq!(body["predictions"][0]["display"]["percentage_change"], "58%");
    }

    #[tokio::test]
    async fn test_predict_rejects_zero_bedrooms() {
        let request = post_json(
            "/api/v1/predict",
            json!({
                "state": "VIC",
                "suburb": "Clayton",
                "property_type": "House",
                "bedrooms": 0,
                "bathrooms": 1
            }),
        );

        let (status, body) = send(app(""), request).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_chat_off_topic_makes_no_call() {
        let transport = Arc::new(ScriptedTransport::reply("unused"));
        let router = build_router(state_with(transport.clone(), Arc::new(UnavailableClassifier)));

        let (status, body) = send(
            router,
            post_json("/api/v1/chat", json!({"message": "What's the weather today?"})),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["outcome"], "off_topic");
        assert_eq!(transport.calls(), 0);
    }

    #[tokio::test]
    async fn test_chat_answers_in_domain() {
        let (status, body) = send(
            app("Around $600 a week."),
            post_json("/api/v1/chat", json!({"message": "Rent in Carlton?"})),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["outcome"], "answered");
        assert_eq!(body["content"], "Around $600 a week.");
    }

    #[tokio::test]
    async fn test_chat_rejects_blank_message() {
        let (status, _) = send(app(""), post_json("/api/v1/chat", json!({"message": " "}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_suggestions() {
        let (status, body) = send(app(""), get("/api/v1/chat/suggestions")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["questions"].as_array().unwrap().len(), 4);
    }

    #[tokio::test]
    async fn test_states_and_suburbs() {
        let (_, states) = send(app(""), get("/api/v1/states")).await;
        assert_eq!(states["states"], json!(["NSW", "VIC"]));

        let (status, suburbs) = send(app(""), get("/api/v1/states/VIC/suburbs?q=car")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(suburbs["suburbs"], json!(["Carlton"]));

        let (status, _) = send(app(""), get("/api/v1/states/WA/suburbs")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_income_lookup() {
        let (status, body) = send(app(""), get("/api/v1/income/NSW/Newtown")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["median_income"], 60_200);

        let (status, _) = send(app(""), get("/api/v1/income/NSW/Atlantis")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_classify_without_model_is_unavailable() {
        let request = Request::builder()
            .method("POST")
            .uri("/api/v1/classify")
            .body(Body::from(vec![1u8, 2, 3]))
            .unwrap();

        let (status, body) = send(app(""), request).await;

        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["error"]["code"], "CLASSIFIER_UNAVAILABLE");
    }

    #[tokio::test]
    async fn test_classify_with_plugged_model() {
        let router = build_router(state_with(
            Arc::new(ScriptedTransport::reply("")),
            Arc::new(FixedClassifier("Federation", 87.5)),
        ));
        let request = Request::builder()
            .method("POST")
            .uri("/api/v1/classify")
            .body(Body::from(vec![1u8, 2, 3]))
            .unwrap();

        let (status, body) = send(router, request).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["label"], "Federation");
        assert_eq!(body["confidence"], 87.5);
    }

    #[tokio::test]
    async fn test_classify_rejects_empty_body() {
        let request = Request::builder()
            .method("POST")
            .uri("/api/v1/classify")
            .body(Body::empty())
            .unwrap();

        let (status, _) = send(app(""), request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}
