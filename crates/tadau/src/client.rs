//! Tadau client implementation.

use crate::config::{Config, TadauBuilder};
use crate::payload::build_payload;
use crate::transport::HttpTransport;
use crate::types::Event;
use crate::Error;
use tracing::{debug, error, info};

/// Opt-in usage telemetry client for the GA4 Measurement Protocol.
///
/// Events are delivered best-effort, one HTTP request per event, with no
/// retries and no queuing: a failed delivery is logged and forgotten, and
/// never interrupts the host application.
///
/// # Example
///
/// ```rust,no_run
/// use tadau::{Event, Tadau};
///
/// #[tokio::main]
/// async fn main() -> Result<(), tadau::Error> {
///     let client = Tadau::builder()
///         .api_secret("my_api_secret")
///         .measurement_id("G-XXXXXXXXXX")
///         .opt_in(true)
///         .fixed_dimension("deploy_id", "123456asc")
///         .build()?;
///
///     client
///         .send_events(&[Event::new("download").param("value", "42")])
///         .await;
///     Ok(())
/// }
/// ```
pub struct Tadau {
    config: Config,
    transport: HttpTransport,
}

impl Tadau {
    /// Create a new builder.
    pub fn builder() -> TadauBuilder {
        TadauBuilder::new()
    }

    pub(crate) fn from_config(config: Config) -> Result<Self, Error> {
        let transport = HttpTransport::new(&config)?;
        Ok(Self { config, transport })
    }

    /// Get the client configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Send a batch of events, one request per event, in input order.
    ///
    /// Nothing happens when the client is not opted in or the batch is
    /// empty. Events without a usable name are skipped, and a delivery
    /// failure on one event never affects the rest of the batch. Errors
    /// are only observable through logging.
    pub async fn send_events(&self, events: &[Event]) {
        if !self.config.opt_in() {
            debug!("not opted in, dropping events");
            return;
        }
        if events.is_empty() {
            debug!("events empty");
            return;
        }

        for event in events {
            let Some(payload) = build_payload(event, self.config.fixed_dimensions()) else {
                continue;
            };

            match self.transport.send(&payload).await {
                Ok(()) => info!(
                    name = %payload.events[0].name,
                    client_id = %payload.client_id,
                    "event sent"
                ),
                Err(e) => error!(name = %event.name(), error = %e, "failed to send event"),
            }
        }
    }

    /// Report an interaction with an ads platform resource.
    #[allow(clippy::too_many_arguments)]
    pub async fn send_ads_event(
        &self,
        event_action: impl Into<String>,
        event_context: impl Into<String>,
        ads_platform: impl Into<String>,
        ads_platform_id: impl Into<String>,
        ads_resource: impl Into<String>,
        ads_resource_id: impl Into<String>,
    ) {
        let event = Event::new("ads_event")
            .param("event_is_impact_action", true)
            .param("event_action", event_action.into())
            .param("event_context", event_context.into())
            .param("ads_platform", ads_platform.into())
            .param("ads_platform_id", ads_platform_id.into())
            .param("ads_resource", ads_resource.into())
            .param("ads_resource_id", ads_resource_id.into());

        self.send_events(&[event]).await;
    }

    /// Report a custom application event.
    pub async fn send_custom_event(
        &self,
        event_action: impl Into<String>,
        event_is_impact_action: bool,
        event_context: impl Into<String>,
    ) {
        let event = Event::new("custom_event")
            .param("event_action", event_action.into())
            .param("event_is_impact_action", event_is_impact_action)
            .param("event_context", event_context.into());

        self.send_events(&[event]).await;
    }

    /// Report an application error.
    pub async fn send_error_event(
        &self,
        error_message: impl Into<String>,
        error_code: impl Into<String>,
        error_location: impl Into<String>,
        error_location_id: impl Into<String>,
    ) {
        let event = Event::new("error_event")
            .param("error_message", error_message.into())
            .param("error_code", error_code.into())
            .param("error_location", error_location.into())
            .param("error_location_id", error_location_id.into());

        self.send_events(&[event]).await;
    }
}

impl TadauBuilder {
    /// Build the Tadau client.
    ///
    /// Fails with [`Error::Config`] when the resolved `api_secret` or
    /// `measurement_id` is empty.
    pub fn build(self) -> Result<Tadau, Error> {
        let config = self.build_config()?;
        Tadau::from_config(config)
    }
}
