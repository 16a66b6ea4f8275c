//! financas-ingest: bank-notification ingestion and the
//! notification-to-transaction classifier.
//!
//! The OS-level capture service delivers one [`NotificationEvent`] per
//! posted notification; [`NotificationClassifier`] turns the ones that
//! describe a completed transaction into [`financas_core::Transaction`]
//! records and silently drops everything else.

pub mod amount;
pub mod classifier;
pub mod event;
pub mod sources;

pub use classifier::NotificationClassifier;
pub use event::{NotificationEvent, RawNotification, parse_event_line};
pub use sources::known_source;
