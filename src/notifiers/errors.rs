//! Webhook delivery errors and outcomes

use thiserror::Error;

/// Reasons a webhook trigger did not succeed
#[derive(Debug, Error)]
pub enum WebhookError {
    /// The service answered with a 4xx or 5xx status
    #[error("IFTTT webhook trigger for {hook} failed HTTP error occurred: status {status}")]
    Http { hook: String, status: u16 },

    /// Connecting or waiting for the response took longer than allowed
    #[error("IFTTT webhook trigger for {hook} failed request timed out")]
    Timeout { hook: String },

    /// Any other transport failure (DNS, refused connection, TLS, ...)
    #[error("IFTTT webhook trigger for {hook} failed other error occurred: {source}")]
    Transport {
        hook: String,
        #[source]
        source: reqwest::Error,
    },
}

impl WebhookError {
    /// HTTP errors and timeouts are logged and the run carries on
    pub fn is_recoverable(&self) -> bool {
        matches!(self, WebhookError::Http { .. } | WebhookError::Timeout { .. })
    }

    pub fn hook(&self) -> &str {
        match self {
            WebhookError::Http { hook, .. }
            | WebhookError::Timeout { hook }
            | WebhookError::Transport { hook, .. } => hook,
        }
    }
}

/// Tagged result of a single webhook POST
#[derive(Debug)]
pub enum DeliveryOutcome {
    /// The service accepted the trigger
    Delivered { status: u16 },
    /// The trigger failed but the run may continue
    Recovered(WebhookError),
    /// The trigger failed in a way that must abort the run
    Fatal(WebhookError),
}

impl DeliveryOutcome {
    /// Classifies an error into a recovered or fatal outcome
    pub fn from_error(error: WebhookError) -> Self {
        if error.is_recoverable() {
            DeliveryOutcome::Recovered(error)
        } else {
            DeliveryOutcome::Fatal(error)
        }
    }

    pub fn is_delivered(&self) -> bool {
        matches!(self, DeliveryOutcome::Delivered { .. })
    }

    /// Turns a fatal outcome into an error and passes the others through
    pub fn check(self) -> Result<Self, WebhookError> {
        match self {
            DeliveryOutcome::Fatal(error) => Err(error),
            other => Ok(other),
        }
    }
}
