
use std::sync::Arc;

use lambda_http::{Body, Request, Response};
use serde_json;
use tokio_util::task::TaskTracker;

use serde::Deserialize;
use anyhow::{Result, bail};

use crate::member_folder::{self, MemberId};
use crate::runtime_context::RuntimeContext;

// https://developers.line.biz/en/reference/messaging-api/#webhook-event-objects
#[derive(Deserialize, Debug)]
struct WebhookContent {
    #[serde(default)]
    events: Vec<WebhookEvent>,
}

#[derive(Deserialize, Debug)]
struct WebhookEvent {
    r#type: String,
    #[serde(rename = "replyToken")]
    reply_token: Option<String>,
    message: Option<MessageContent>,
}

#[derive(Deserialize, Debug)]
struct MessageContent {
    r#type: String,
    text: Option<String>,
}

pub struct LineEventHandler {
    runtime_context: Arc<RuntimeContext>,
}

impl LineEventHandler {
    pub fn new(runtime_context: &Arc<RuntimeContext>) -> Arc<Self> {
        let runtime_context = Arc::clone(runtime_context);
        let handler = Self {
            runtime_context,
        };
        Arc::new(handler)
    }

    pub async fn handle_verified_events(self: &Arc<Self>, event: Request) -> Result<Response<Body>> {
        let content: WebhookContent = match event.body() {
            Body::Text(body) => serde_json::from_str(body)?,
            Body::Binary(body) => serde_json::from_slice(body)?,
            Body::Empty => bail!("no body"),
        };
        // one payload may carry several events; replies are sent concurrently
        // and joined before the webhook is acknowledged, in no particular order
        let tracker = TaskTracker::new();
        for webhook_event in content.events {
            let handler = Arc::clone(self);
            tracker.spawn(async move {
                handler.handle_event(webhook_event).await;
            });
        }
        tracker.close();
        tracker.wait().await;
        let response = Response::builder()
            .status(200)
            .header("content-type", "text/plain")
            .body("ok".into())
            .map_err(Box::new)?;
        Ok(response)
    }

    async fn handle_event(&self, webhook_event: WebhookEvent) {
        if webhook_event.r#type != "message" {
            return;
        }
        let Some(message) = &webhook_event.message else { return };
        if message.r#type != "text" {
            return;
        }
        let Some(text) = &message.text else { return };
        let Some(reply_token) = webhook_event.reply_token.clone() else { return };
        let reply_text = self.member_folder_reply(text).await;
        let line_client = self.runtime_context.line_client();
        // delivery failure must not fail the inbound request
        if let Err(error) = line_client.reply(reply_token, reply_text).await {
            tracing::warn!("reply error {:?}", error);
        }
    }

    async fn member_folder_reply(&self, text: &str) -> String {
        let Some(member_id) = MemberId::parse(text) else {
            return member_folder::INVALID_ID_REPLY.to_string();
        };
        let folder_exists = match self.runtime_context.dropbox_client() {
            Some(dropbox_client) => dropbox_client.folder_exists(member_id.folder_path()).await,
            // no Dropbox credentials configured: link the folder without checking
            None => true,
        };
        member_folder::folder_reply(&member_id, folder_exists)
    }
}
