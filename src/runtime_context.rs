
use std::sync::Arc;

use crate::config::Config;
use crate::dropbox_client::DropboxClient;
use crate::line_client::LineClient;

/// Process-wide state built once before the runtime starts serving requests.
/// Clients are constructed here with their credentials; request handlers
/// never read the environment themselves.
pub struct RuntimeContext {
    config: Config,
    line_client: Arc<LineClient>,
    dropbox_client: Option<Arc<DropboxClient>>,
}

impl RuntimeContext {
    pub fn new(config: Config) -> Arc<Self> {
        let line_client = LineClient::new(config.channel_access_token.clone());
        let dropbox_client = config.dropbox_access_token.clone().map(DropboxClient::new);
        let context = Self {
            config,
            line_client,
            dropbox_client,
        };
        Arc::new(context)
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn line_client(&self) -> &Arc<LineClient> {
        &self.line_client
    }

    pub fn dropbox_client(&self) -> Option<&Arc<DropboxClient>> {
        self.dropbox_client.as_ref()
    }
}
