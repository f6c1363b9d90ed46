//! Delivery of classification results.
//!
//! Every readable result produces a console summary line. When a
//! [`NotificationSink`] is configured the composed message is also sent as a
//! desktop notification; sink failures downgrade to console-only output.

use std::time::Duration;

use console::style;
use tracing::warn;

use crate::config::AppConfig;
use crate::error::Result;
use crate::risk::{self, compose_message, summary_line};
use crate::types::ClassificationResult;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub title: String,
    pub body: String,
    pub app_label: String,
    pub timeout: Duration,
}

/// A channel that can display a [`Notification`].
pub trait NotificationSink: Send + Sync {
    fn emit(&self, notification: &Notification) -> Result<()>;
}

/// Desktop notifications through the host's native facility.
#[cfg(feature = "desktop-notifications")]
#[derive(Debug, Default, Clone, Copy)]
pub struct DesktopSink;

#[cfg(feature = "desktop-notifications")]
impl NotificationSink for DesktopSink {
    fn emit(&self, notification: &Notification) -> Result<()> {
        let handle = notify_rust::Notification::new()
            .summary(&notification.title)
            .body(&notification.body)
            .appname(&notification.app_label)
            .timeout(notification.timeout)
            .show()
            .map_err(|e| crate::error::Error::Notification(e.to_string()))?;
        tracing::debug!("Desktop notification sent: {:?}", handle);
        Ok(())
    }
}

/// How a result ended up being reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    /// Desktop notification and console line.
    Desktop,
    /// Console line only, either by configuration or because the sink failed.
    ConsoleOnly,
    /// Unreadable file: diagnostic line, no notification.
    Skipped,
}

pub struct Notifier {
    config: AppConfig,
    sink: Option<Box<dyn NotificationSink>>,
}

impl Notifier {
    /// Uses the desktop sink when enabled in `config` and compiled in.
    pub fn new(config: AppConfig) -> Self {
        #[cfg(feature = "desktop-notifications")]
        let sink: Option<Box<dyn NotificationSink>> = if config.desktop_notifications {
            Some(Box::new(DesktopSink))
        } else {
            None
        };
        #[cfg(not(feature = "desktop-notifications"))]
        let sink: Option<Box<dyn NotificationSink>> = None;

        Self { config, sink }
    }

    pub fn with_sink(config: AppConfig, sink: Box<dyn NotificationSink>) -> Self {
        Self {
            config,
            sink: Some(sink),
        }
    }

    pub fn console_only(config: AppConfig) -> Self {
        Self { config, sink: None }
    }

    pub fn has_sink(&self) -> bool {
        self.sink.is_some()
    }

    /// Builds the notification for `result`; `None` for unreadable files.
    pub fn notification_for(&self, result: &ClassificationResult) -> Option<Notification> {
        compose_message(result).map(|body| Notification {
            title: self.config.notification_title.clone(),
            body,
            app_label: self.config.app_label.clone(),
            timeout: self.config.notification_timeout,
        })
    }

    pub fn notify(&self, result: &ClassificationResult) -> Delivery {
        let Some(notification) = self.notification_for(result) else {
            println!("{}", style(summary_line(result)).yellow());
            return Delivery::Skipped;
        };

        let delivery = match &self.sink {
            Some(sink) => match sink.emit(&notification) {
                Ok(()) => Delivery::Desktop,
                Err(e) => {
                    warn!(
                        file = result.file_name(),
                        error = %e,
                        "Failed to send desktop notification"
                    );
                    Delivery::ConsoleOnly
                }
            },
            None => Delivery::ConsoleOnly,
        };

        let line = summary_line(result);
        match result.danger_score() {
            Some(score) if risk::is_dangerous(score) => {
                println!("{}", style(line).red().bold());
                println!("{}", style(risk::WARNING_TEXT).red());
            }
            _ => println!("{line}"),
        }

        delivery
    }
}
