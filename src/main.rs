use std::sync::Arc;

use lambda_http::{run, service_fn, Body, Error, Request, RequestExt, Response, http::Method};

mod config;
mod runtime_context;
mod line_client;
mod dropbox_client;
mod line_requests;
mod line_events;
mod line_verification;
mod member_folder;

use config::Config;
use runtime_context::RuntimeContext;
use line_requests::LineRequestHandler;

// https://github.com/awslabs/aws-lambda-rust-runtime/tree/main/examples
async fn function_handler(event: Request, context: &Arc<RuntimeContext>) -> Result<Response<Body>, Error> {
    match (event.method(), event.raw_http_path()) {
        (&Method::POST, "/line/events") => {
            let request_handler = LineRequestHandler::new(context);
            request_handler.handle_line_request(event).await
        },
        (&Method::GET, _) => {
            // LINE sends a bodyless GET to verify the webhook URL
            handle_get(event).await
        },
        (&Method::POST, _) => {
            handle_not_found(event).await
        },
        _ => {
            handle_method_not_allowed(event).await
        }
    }
}

async fn handle_get(_event: Request) -> Result<Response<Body>, Error> {
    let response = Response::builder()
        .status(200)
        .header("content-type", "text/plain")
        .body("ok".into())
        .map_err(Box::new)?;
    Ok(response)
}

async fn handle_not_found(_event: Request) -> Result<Response<Body>, Error> {
    let response = Response::builder()
        .status(404)
        .header("content-type", "text/plain")
        .body("not found".into())
        .map_err(Box::new)?;
    Ok(response)
}

async fn handle_method_not_allowed(_event: Request) -> Result<Response<Body>, Error> {
    let response = Response::builder()
        .status(405)
        .header("content-type", "text/plain")
        .body("method not allowed".into())
        .map_err(Box::new)?;
    Ok(response)
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        // disable printing the name of the module in every log line.
        .with_target(false)
        // disabling time is handy because CloudWatch will add the ingestion time.
        .without_time()
        .init();
    let config = Config::from_env()?;
    let runtime_context = RuntimeContext::new(config);
    let func = |event| async {
        function_handler(event, &runtime_context).await
    };
    run(service_fn(func)).await
}
