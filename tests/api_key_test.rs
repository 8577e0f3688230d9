//! Integration tests for the credential API endpoints

mod test_utils;

#[cfg(test)]
mod tests {
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use serial_test::serial;
    use tower::util::ServiceExt;

    use crate::test_utils::{body_to_string, test_app, test_app_with_hostname};

    /// Tests that no key is configured initially
    #[tokio::test]
    #[serial]
    async fn it_reports_no_key_configured() {
        let app = test_app().await;

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/key")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_to_string(response.into_body()).await;
        assert!(body.contains("\"configured\":false"));
    }

    /// Tests storing a key and reading the status back
    #[tokio::test]
    #[serial]
    async fn it_stores_a_key() {
        let app = test_app().await;

        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .uri("/api/key")
                    .method("POST")
                    .header("content-type", "application/json")
                    .body(Body::from(
                        serde_json::json!({"key": "test-key"}).to_string(),
                    ))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/key")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        let body = body_to_string(response.into_body()).await;
        assert!(body.contains("\"configured\":true"));
    }

    /// Tests that a blank key is rejected
    #[tokio::test]
    #[serial]
    async fn it_rejects_a_blank_key() {
        let app = test_app().await;

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/key")
                    .method("POST")
                    .header("content-type", "application/json")
                    .body(Body::from(serde_json::json!({"key": "   "}).to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let body = body_to_string(response.into_body()).await;
        assert!(body.contains("non-empty"));
    }

    /// Tests clearing the stored key
    #[tokio::test]
    #[serial]
    async fn it_clears_the_key() {
        let app = test_app().await;

        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .uri("/api/key")
                    .method("POST")
                    .header("content-type", "application/json")
                    .body(Body::from(
                        serde_json::json!({"key": "test-key"}).to_string(),
                    ))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .uri("/api/key")
                    .method("DELETE")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        let body = body_to_string(response.into_body()).await;
        assert!(body.contains("\"cleared\":true"));

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/key")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        let body = body_to_string(response.into_body()).await;
        assert!(body.contains("\"configured\":false"));
    }

    /// Tests validating a key against a mock API server
    #[tokio::test]
    #[serial]
    async fn it_validates_a_key() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/v1beta/models/gemini-2.5-flash:generateContent")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                serde_json::json!({
                    "candidates": [{
                        "content": {"role": "model", "parts": [{"text": "Hello"}]},
                        "finishReason": "STOP"
                    }]
                })
                .to_string(),
            )
            .create();

        let app = test_app_with_hostname(&server.url()).await;

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/key/test")
                    .method("POST")
                    .header("content-type", "application/json")
                    .body(Body::from(
                        serde_json::json!({"key": "candidate-key"}).to_string(),
                    ))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_to_string(response.into_body()).await;
        assert!(body.contains("\"valid\":true"));

        mock.assert();
    }

    /// Tests that a bad key reports the API error after the fallback
    /// model also fails
    #[tokio::test]
    #[serial]
    async fn it_reports_an_invalid_key() {
        let mut server = mockito::Server::new_async().await;
        let error_body = serde_json::json!({
            "error": {"code": 400, "message": "API key not valid", "status": "INVALID_ARGUMENT"}
        })
        .to_string();
        let primary = server
            .mock("POST", "/v1beta/models/gemini-2.5-flash:generateContent")
            .with_status(400)
            .with_body(&error_body)
            .expect(1)
            .create();
        let fallback = server
            .mock("POST", "/v1beta/models/gemini-2.5-pro:generateContent")
            .with_status(400)
            .with_body(&error_body)
            .expect(1)
            .create();

        let app = test_app_with_hostname(&server.url()).await;

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/key/test")
                    .method("POST")
                    .header("content-type", "application/json")
                    .body(Body::from(
                        serde_json::json!({"key": "bad-key"}).to_string(),
                    ))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_to_string(response.into_body()).await;
        assert!(body.contains("\"valid\":false"));
        assert!(body.contains("API key not valid"));

        primary.assert();
        fallback.assert();
    }
}
