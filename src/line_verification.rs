
use sha2::Sha256;
use hmac::{Hmac, Mac};
use base64::{Engine as _, engine::general_purpose::STANDARD};

use lambda_http::{Request, Body};
use anyhow::{Context, Result, bail};

type HmacSha256 = Hmac<Sha256>;

// https://developers.line.biz/en/reference/messaging-api/#signature-validation
pub fn verify_line_request(channel_secret: &str, request: &Request) -> Result<()> {
    let headers = request.headers();
    let claimed_signature = headers.get("x-line-signature")
        .context("x-line-signature is empty")?
        .to_str()?;
    // the digest covers the body bytes exactly as received, before any JSON parsing
    let body = match request.body() {
        Body::Text(text) => text.as_bytes(),
        Body::Binary(data) => data.as_slice(),
        Body::Empty => bail!("no body"),
    };
    verify_signature(channel_secret, body, claimed_signature)
}

fn verify_signature(channel_secret: &str, body: &[u8], claimed_signature: &str) -> Result<()> {
    let Ok(claimed_digest) = STANDARD.decode(claimed_signature) else {
        bail!("x-line-signature is not valid base64");
    };
    let mut mac = HmacSha256::new_from_slice(channel_secret.as_bytes())?;
    mac.update(body);
    // constant-time comparison against the decoded digest
    if mac.verify_slice(&claimed_digest).is_err() {
        bail!("signature mismatch");
    }
    Ok(())
}
