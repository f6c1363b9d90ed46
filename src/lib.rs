pub mod classifier;
pub mod config;
pub mod error;
pub mod logging;
pub mod notifier;
pub mod prompt;
pub mod risk;
pub mod select;
pub mod signatures;
pub mod types;
pub mod watch;

pub use classifier::{Classifier, HEADER_LEN};
pub use config::AppConfig;
pub use error::{Error, Result};
pub use notifier::{Delivery, Notification, NotificationSink, Notifier};
pub use risk::{RiskBand, compose_message, describe};
pub use select::{FilePicker, SelectDriver, SelectOutcome};
pub use signatures::{SignatureEntry, SignatureTable};
pub use types::{Classification, ClassificationResult, DangerScore};
pub use watch::{DirectoryWatch, WatchDriver, WatchState};
