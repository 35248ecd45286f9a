
use std::sync::Arc;
use anyhow::{Result, bail};
use reqwest::{self, Client};
use serde::Serialize;
use tracing::info;

#[derive(Serialize)]
struct ReplyRequestBody {
    #[serde(rename = "replyToken")]
    reply_token: String,
    messages: Vec<ReplyMessage>,
}

#[derive(Serialize)]
struct ReplyMessage {
    r#type: String,
    text: String,
}

pub struct LineClient {
    client: Client,
    channel_access_token: String,
}

// https://developers.line.biz/en/reference/messaging-api/#send-reply-message
impl LineClient {
    pub fn new(channel_access_token: String) -> Arc<Self> {
        let client = reqwest::Client::new();
        let this = Self {
            client,
            channel_access_token,
        };
        Arc::new(this)
    }

    // a reply token addresses one inbound event and is valid for a single use
    pub async fn reply(&self, reply_token: String, text: String) -> Result<()> {
        let request_body = ReplyRequestBody {
            reply_token,
            messages: vec![
                ReplyMessage {
                    r#type: "text".into(),
                    text,
                },
            ],
        };
        let response = self.client.post("https://api.line.me/v2/bot/message/reply")
            .header("Content-type", "application/json; charset=utf-8")
            .header("Authorization", ["Bearer", &self.channel_access_token].join(" "))
            .json(&request_body)
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            let text = response.text().await?;
            bail!("line message/reply failed {} {}", status, text);
        }
        info!("line message/reply response {}", status);
        Ok(())
    }
}
