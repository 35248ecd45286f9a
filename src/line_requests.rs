
use std::sync::Arc;

use lambda_http::Error;
use lambda_http::{Body, Request, Response};

use crate::config::SignaturePolicy;
use crate::{line_events::LineEventHandler, runtime_context::RuntimeContext};
use crate::line_verification::verify_line_request;

pub struct LineRequestHandler {
    runtime_context: Arc<RuntimeContext>,
    event_handler: Arc<LineEventHandler>,
}

impl LineRequestHandler {
    pub fn new(runtime_context: &Arc<RuntimeContext>) -> Arc<Self> {
        let event_handler = LineEventHandler::new(runtime_context);
        let handler = Self {
            runtime_context: Arc::clone(runtime_context),
            event_handler,
        };
        Arc::new(handler)
    }

    pub async fn handle_line_request(&self, event: Request) -> Result<Response<Body>, Error> {
        let channel_secret = &self.runtime_context.config().channel_secret;
        let verification_result = verify_line_request(channel_secret, &event);
        match verification_result {
            Ok(()) => {
                let result = self.event_handler.handle_verified_events(event).await;
                match result {
                    Ok(response) => Ok(response),
                    Err(error) => {
                        tracing::info!("/line/events error {:?}", error);
                        self.internal_server_error_response()
                    }
                }
            },
            Err(error) => {
                tracing::info!("/line/events verification failed {:?}", error);
                match self.runtime_context.config().signature_policy {
                    SignaturePolicy::Strict => self.forbidden_response(),
                    // acknowledge and drop, so the sender does not redeliver
                    SignaturePolicy::AlwaysOk => self.ok_response(),
                }
            }
        }
    }

    fn ok_response(&self) -> Result<Response<Body>, Error> {
        let response = Response::builder()
            .status(200)
            .header("content-type", "text/plain")
            .body("ok".into())
            .map_err(Box::new)?;
        Ok(response)
    }

    fn internal_server_error_response(&self) -> Result<Response<Body>, Error> {
        let response = Response::builder()
            .status(500)
            .header("content-type", "text/plain")
            .body("internal server error".into())
            .map_err(Box::new)?;
        Ok(response)
    }

    fn forbidden_response(&self) -> Result<Response<Body>, Error> {
        let response = Response::builder()
            .status(403)
            .header("content-type", "text/plain")
            .body("forbidden".into())
            .map_err(Box::new)?;
        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use base64::{Engine as _, engine::general_purpose::STANDARD};
    use hmac::{Hmac, Mac};
    use sha2::Sha256;

    const CHANNEL_SECRET: &str = "test-channel-secret";

    fn test_handler(signature_policy: SignaturePolicy) -> Arc<LineRequestHandler> {
        let config = Config {
            channel_secret: CHANNEL_SECRET.into(),
            channel_access_token: "test-access-token".into(),
            dropbox_access_token: None,
            signature_policy,
        };
        let runtime_context = RuntimeContext::new(config);
        LineRequestHandler::new(&runtime_context)
    }

    fn sign(body: &str) -> String {
        let mut mac = Hmac::<Sha256>::new_from_slice(CHANNEL_SECRET.as_bytes()).unwrap();
        mac.update(body.as_bytes());
        STANDARD.encode(mac.finalize().into_bytes())
    }

    fn post(body: &str, signature: &str) -> Request {
        lambda_http::http::Request::builder()
            .method("POST")
            .uri("https://example.com/line/events")
            .header("x-line-signature", signature)
            .body(Body::Text(body.into()))
            .unwrap()
    }

    #[tokio::test]
    async fn invalid_signature_is_rejected_with_403_under_strict_policy() {
        let handler = test_handler(SignaturePolicy::Strict);
        let body = r#"{"events":[]}"#;
        let response = handler.handle_line_request(post(body, "aW52YWxpZA==")).await.unwrap();
        assert_eq!(response.status(), 403);
    }

    #[tokio::test]
    async fn invalid_signature_is_acknowledged_under_always_ok_policy() {
        let handler = test_handler(SignaturePolicy::AlwaysOk);
        let body = r#"{"events":[]}"#;
        let response = handler.handle_line_request(post(body, "aW52YWxpZA==")).await.unwrap();
        assert_eq!(response.status(), 200);
    }

    #[tokio::test]
    async fn valid_signature_reaches_event_handling() {
        let handler = test_handler(SignaturePolicy::Strict);
        let body = r#"{"events":[]}"#;
        let signature = sign(body);
        let response = handler.handle_line_request(post(body, &signature)).await.unwrap();
        assert_eq!(response.status(), 200);
    }

    #[tokio::test]
    async fn signature_must_cover_the_received_bytes() {
        let handler = test_handler(SignaturePolicy::Strict);
        // signature computed over a re-serialized variant of the same JSON
        let received = r#"{"events": []}"#;
        let reserialized = r#"{"events":[]}"#;
        let signature = sign(reserialized);
        let response = handler.handle_line_request(post(received, &signature)).await.unwrap();
        assert_eq!(response.status(), 403);
    }

    #[tokio::test]
    async fn malformed_json_with_valid_signature_is_an_internal_error() {
        let handler = test_handler(SignaturePolicy::Strict);
        let body = "not json";
        let signature = sign(body);
        let response = handler.handle_line_request(post(body, &signature)).await.unwrap();
        assert_eq!(response.status(), 500);
    }
}
