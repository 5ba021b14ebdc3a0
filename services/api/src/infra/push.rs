use std::time::Duration;

use anyhow::Context as _;
use serde::{Deserialize, Serialize};

use crate::domain::repository::PushSender;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Client for an Expo-compatible push endpoint.
#[derive(Clone)]
pub struct ExpoPushClient {
    http: reqwest::Client,
    url: String,
}

impl ExpoPushClient {
    pub fn new(url: impl Into<String>) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .context("build push http client")?;
        Ok(Self {
            http,
            url: url.into(),
        })
    }
}

#[derive(Debug, Serialize)]
struct PushMessage<'a> {
    to: &'a str,
    title: &'a str,
    body: &'a str,
    sound: &'a str,
}

#[derive(Debug, Deserialize)]
struct PushResponse {
    data: Option<PushTicket>,
}

#[derive(Debug, Deserialize)]
struct PushTicket {
    status: String,
    message: Option<String>,
}

impl PushSender for ExpoPushClient {
    async fn send(&self, push_token: &str, title: &str, body: &str) -> anyhow::Result<()> {
        let message = PushMessage {
            to: push_token,
            title,
            body,
            sound: "default",
        };
        let response: PushResponse = self
            .http
            .post(&self.url)
            .json(&message)
            .send()
            .await
            .context("send push request")?
            .error_for_status()
            .context("push endpoint status")?
            .json()
            .await
            .context("decode push response")?;

        if let Some(ticket) = response.data
            && ticket.status == "error"
        {
            anyhow::bail!(
                "push rejected: {}",
                ticket.message.unwrap_or_else(|| "unknown error".to_owned())
            );
        }
        Ok(())
    }
}
