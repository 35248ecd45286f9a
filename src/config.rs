
use std::env;

use anyhow::{Result, bail, Context};

/// Response policy for requests that fail signature verification.
///
/// LINE redelivers webhooks that are not acknowledged with a 200, so some
/// deployments prefer to acknowledge a bad signature instead of rejecting it.
/// The request is dropped before business logic either way.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignaturePolicy {
    Strict,
    AlwaysOk,
}

pub struct Config {
    pub channel_secret: String,
    pub channel_access_token: String,
    pub dropbox_access_token: Option<String>,
    pub signature_policy: SignaturePolicy,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let channel_secret = env::var("LINE_CHANNEL_SECRET")
            .context("LINE_CHANNEL_SECRET is empty")?;
        let channel_access_token = env::var("LINE_CHANNEL_ACCESS_TOKEN")
            .context("LINE_CHANNEL_ACCESS_TOKEN is empty")?;
        // without a Dropbox token the folder existence check is skipped
        let dropbox_access_token = env::var("DROPBOX_ACCESS_TOKEN").ok();
        let signature_policy = match env::var("WEBHOOK_SIGNATURE_POLICY") {
            Ok(value) => Self::parse_signature_policy(&value)?,
            Err(_) => SignaturePolicy::Strict,
        };
        let config = Self {
            channel_secret,
            channel_access_token,
            dropbox_access_token,
            signature_policy,
        };
        Ok(config)
    }

    fn parse_signature_policy(value: &str) -> Result<SignaturePolicy> {
        match value {
            "strict" => Ok(SignaturePolicy::Strict),
            "always-ok" => Ok(SignaturePolicy::AlwaysOk),
            _ => bail!("WEBHOOK_SIGNATURE_POLICY must be strict or always-ok, got {:?}", value),
        }
    }
}
