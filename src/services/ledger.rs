//! Best-effort ledger export.
//!
//! Flattened calculation and lead rows are forwarded to an external webhook
//! (a spreadsheet bridge in the original deployment) for offline analysis.
//! Delivery is fire-and-forget through an unbounded channel and a background
//! worker: a request handler only enqueues, and delivery failures are logged
//! and dropped, never retried and never surfaced to the caller.

use anyhow::{Context, Result};
use reqwest::Client;
use serde::Serialize;
use std::time::Duration;
use tokio::sync::mpsc;

use crate::domain::ledger::{CalculationRow, LeadRow};

#[derive(Debug)]
enum LedgerEvent {
    Calculation(CalculationRow),
    Lead(LeadRow),
}

impl LedgerEvent {
    fn sheet(&self) -> &'static str {
        match self {
            Self::Calculation(_) => "calculations",
            Self::Lead(_) => "leads",
        }
    }
}

/// Cheap cloneable handle held in application state. When the webhook is not
/// configured the handle is disabled and every record call is a no-op.
#[derive(Clone)]
pub struct LedgerHandle {
    tx: Option<mpsc::UnboundedSender<LedgerEvent>>,
}

impl LedgerHandle {
    pub fn disabled() -> Self {
        Self { tx: None }
    }

    pub fn is_enabled(&self) -> bool {
        self.tx.is_some()
    }

    pub fn record_calculation(&self, row: CalculationRow) {
        self.send(LedgerEvent::Calculation(row));
    }

    pub fn record_lead(&self, row: LeadRow) {
        self.send(LedgerEvent::Lead(row));
    }

    fn send(&self, event: LedgerEvent) {
        let Some(tx) = &self.tx else {
            return;
        };
        if tx.send(event).is_err() {
            tracing::warn!("Ledger worker is gone, dropping row");
        }
    }
}

/// HTTP client for the ledger webhook.
#[derive(Clone)]
pub struct LedgerClient {
    client: Client,
    webhook_url: String,
    token: Option<String>,
}

#[derive(Serialize)]
struct AppendRequest<'a, T: Serialize> {
    sheet: &'static str,
    row: &'a T,
}

impl LedgerClient {
    pub fn new(webhook_url: &str, token: Option<&str>, timeout_seconds: u64) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_seconds))
            .build()
            .context("Failed to create ledger HTTP client")?;

        tracing::info!(webhook_url = webhook_url, "Ledger client initialized");

        Ok(Self {
            client,
            webhook_url: webhook_url.to_string(),
            token: token.map(str::to_string),
        })
    }

    async fn append<T: Serialize>(&self, sheet: &'static str, row: &T) -> Result<()> {
        let mut req = self
            .client
            .post(&self.webhook_url)
            .json(&AppendRequest { sheet, row });
        if let Some(token) = &self.token {
            req = req.bearer_auth(token);
        }

        let response = req.send().await.context("ledger request failed")?;
        let status = response.status();
        if !status.is_success() {
            anyhow::bail!("ledger webhook answered {status}");
        }
        Ok(())
    }
}

/// Spawn the delivery worker and return the handle that feeds it.
pub fn spawn_ledger_worker(client: LedgerClient) -> LedgerHandle {
    let (tx, mut rx) = mpsc::unbounded_channel::<LedgerEvent>();

    tokio::spawn(async move {
        while let Some(event) = rx.recv().await {
            let sheet = event.sheet();
            let outcome = match &event {
                LedgerEvent::Calculation(row) => client.append(sheet, row).await,
                LedgerEvent::Lead(row) => client.append(sheet, row).await,
            };
            match outcome {
                Ok(()) => tracing::debug!(sheet = sheet, "Ledger row appended"),
                Err(e) => tracing::warn!(sheet = sheet, error = %e, "Failed to append ledger row"),
            }
        }
    });

    LedgerHandle { tx: Some(tx) }
}
