use reqwest::Client;
use secrecy::{ExposeSecret, Secret};
use std::time;

use crate::domain::NewLead;

/// Placeholder shipped in the configuration until a real endpoint is deployed.
pub const UNCONFIGURED_ENDPOINT: &str = "YOUR_GOOGLE_APPS_SCRIPT_URL_HERE";

#[derive(Clone)]
pub enum LeadEndpoint {
    /// No endpoint deployed yet: leads are logged and reported as delivered.
    Unconfigured,
    Url(Secret<String>),
}

impl LeadEndpoint {
    pub fn parse(url: &str) -> LeadEndpoint {
        let url = url.trim();

        if url.is_empty() || url == UNCONFIGURED_ENDPOINT {
            LeadEndpoint::Unconfigured
        } else {
            LeadEndpoint::Url(Secret::new(url.to_string()))
        }
    }
}

/// How much of the endpoint's answer the client gets to see.
#[derive(serde::Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TransportMode {
    /// Status and body are discarded, like a `no-cors` browser request.
    /// A remote failure is indistinguishable from a success.
    #[default]
    Opaque,
    /// Non-2xx statuses and `{"success": false}` bodies are delivery errors.
    Observed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    Demonstration,
    Dispatched,
    Confirmed,
}

#[derive(thiserror::Error, Debug)]
pub enum LeadClientError {
    #[error("Failed to dispatch the lead to the endpoint.")]
    Transport(#[source] reqwest::Error),
    #[error("The endpoint rejected the lead: {0}")]
    Rejected(String),
}

#[derive(serde::Deserialize, Debug)]
struct AppendResponse {
    success: bool,
    error: Option<String>,
}

pub struct LeadClient {
    http_client: Client,
    endpoint: LeadEndpoint,
    transport: TransportMode,
}

impl LeadClient {
    /// Without `timeout` the request may wait as long as the connection allows.
    pub fn new(
        endpoint: LeadEndpoint,
        transport: TransportMode,
        timeout: Option<time::Duration>,
    ) -> Result<LeadClient, reqwest::Error> {
        let mut builder = Client::builder();

        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(LeadClient {
            http_client: builder.build()?,
            endpoint,
            transport,
        })
    }

    pub fn is_configured(&self) -> bool {
        matches!(self.endpoint, LeadEndpoint::Url(_))
    }

    #[tracing::instrument(
        name = "Sending a lead to the append endpoint",
        skip(self, lead),
        fields(transport = ?self.transport)
    )]
    pub async fn send_lead(&self, lead: &NewLead) -> Result<Delivery, LeadClientError> {
        let url = match &self.endpoint {
            LeadEndpoint::Unconfigured => {
                tracing::info!(
                    lead_name = %lead.name().as_ref(),
                    lead_phone = %lead.phone().as_ref(),
                    "Demonstration mode, the lead was not sent"
                );
                return Ok(Delivery::Demonstration);
            }
            LeadEndpoint::Url(url) => url,
        };

        let response = self
            .http_client
            .post(url.expose_secret())
            .json(lead)
            .send()
            .await
            .map_err(LeadClientError::Transport)?;

        match self.transport {
            // Whatever came back stays invisible to the caller
            TransportMode::Opaque => Ok(Delivery::Dispatched),
            TransportMode::Observed => read_append_response(response).await,
        }
    }
}

async fn read_append_response(response: reqwest::Response) -> Result<Delivery, LeadClientError> {
    let status = response.status();

    match response.json::<AppendResponse>().await {
        Ok(AppendResponse { success: true, .. }) if status.is_success() => Ok(Delivery::Confirmed),
        Ok(body) => Err(LeadClientError::Rejected(
            body.error.unwrap_or_else(|| status.to_string()),
        )),
        Err(err) => {
            tracing::warn!("Unreadable append response: {:?}", err);
            Err(LeadClientError::Rejected(format!(
                "{} with an unreadable body",
                status
            )))
        }
    }
}
