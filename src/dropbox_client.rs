
use std::sync::Arc;
use anyhow::Result;
use reqwest::{self, Client};
use serde::Serialize;
use tracing::warn;

#[derive(Serialize)]
struct GetMetadataRequestBody {
    path: String,
}

pub struct DropboxClient {
    client: Client,
    access_token: String,
}

// https://www.dropbox.com/developers/documentation/http/documentation#files-get_metadata
impl DropboxClient {
    pub fn new(access_token: String) -> Arc<Self> {
        let client = reqwest::Client::new();
        let this = Self {
            client,
            access_token,
        };
        Arc::new(this)
    }

    /// Whether a folder exists at the given path. Lookup failures of any
    /// kind count as "does not exist"; the caller never sees an error.
    pub async fn folder_exists(&self, path: String) -> bool {
        match self.get_metadata(path).await {
            Ok(found) => found,
            Err(error) => {
                warn!("dropbox files/get_metadata error {:?}", error);
                false
            }
        }
    }

    async fn get_metadata(&self, path: String) -> Result<bool> {
        let request_body = GetMetadataRequestBody {
            path,
        };
        let response = self.client.post("https://api.dropboxapi.com/2/files/get_metadata")
            .header("Content-type", "application/json")
            .header("Authorization", ["Bearer", &self.access_token].join(" "))
            .json(&request_body)
            .send()
            .await?;
        // Dropbox answers 409 for an unknown path
        Ok(response.status().is_success())
    }
}
