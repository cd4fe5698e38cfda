//! Operations context for dependency injection

use safely_config::Config;
use safely_errors::Error;
use safely_events::{EventEmitter, EventSender};
use safely_net::NetClient;

/// Everything an operation needs: the signed client, the configuration it
/// was built from and the event channel to report through.
pub struct OpsCtx {
    pub net: NetClient,
    pub tx: EventSender,
    pub config: Config,
}

impl EventEmitter for OpsCtx {
    fn event_sender(&self) -> Option<&EventSender> {
        Some(&self.tx)
    }
}

/// Builder for operations context
#[derive(Default)]
pub struct OpsContextBuilder {
    net: Option<NetClient>,
    tx: Option<EventSender>,
    config: Option<Config>,
}

impl OpsContextBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_net(mut self, net: NetClient) -> Self {
        self.net = Some(net);
        self
    }

    #[must_use]
    pub fn with_event_sender(mut self, tx: EventSender) -> Self {
        self.tx = Some(tx);
        self
    }

    #[must_use]
    pub fn with_config(mut self, config: Config) -> Self {
        self.config = Some(config);
        self
    }

    /// Build the context
    ///
    /// # Errors
    ///
    /// Returns an error if the network client or event sender is missing.
    /// A missing configuration falls back to defaults.
    pub fn build(self) -> Result<OpsCtx, Error> {
        let net = self.net.ok_or_else(|| missing("net"))?;
        let tx = self.tx.ok_or_else(|| missing("event_sender"))?;

        Ok(OpsCtx {
            net,
            tx,
            config: self.config.unwrap_or_default(),
        })
    }
}

fn missing(component: &str) -> Error {
    Error::internal(format!("operations context is missing {component}"))
}
