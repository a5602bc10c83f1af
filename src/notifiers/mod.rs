//! IFTTT webhook notifications
//!
//! - `ifttt`: the [`Notifier`] client, webhook targets and payload builders
//! - `errors`: [`WebhookError`] and the tagged [`DeliveryOutcome`] of one POST

pub mod errors;
pub mod ifttt;

pub use errors::{DeliveryOutcome, WebhookError};
pub use ifttt::{
    alert_payload, notify_payload, results_payload, Notifier, WebhookTarget, IFTTT_BASE_URL,
    WEBHOOK_TIMEOUT,
};
