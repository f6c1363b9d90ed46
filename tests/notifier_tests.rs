mod common;

use common::RecordingSink;
use magicguard::config::{DEFAULT_APP_LABEL, DEFAULT_NOTIFICATION_TITLE};
use magicguard::{
    AppConfig, Classification, ClassificationResult, DangerScore, Delivery, Error, Notification,
    NotificationSink, Notifier,
};
use rstest::*;
use std::time::Duration;

struct FailingSink;

impl NotificationSink for FailingSink {
    fn emit(&self, _notification: &Notification) -> magicguard::Result<()> {
        Err(Error::Notification("no notification daemon".to_string()))
    }
}

#[fixture]
fn exe_result() -> ClassificationResult {
    ClassificationResult::new(
        "setup.exe",
        Classification::Known {
            type_id: "EXE".to_string(),
            danger_score: DangerScore::new(10).unwrap(),
        },
    )
}

#[rstest]
fn test_desktop_delivery(exe_result: ClassificationResult) {
    let sink = RecordingSink::default();
    let notifier = Notifier::with_sink(AppConfig::default(), Box::new(sink.clone()));

    assert_eq!(notifier.notify(&exe_result), Delivery::Desktop);

    let sent = sink.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].title, DEFAULT_NOTIFICATION_TITLE);
    assert_eq!(sent[0].app_label, DEFAULT_APP_LABEL);
    assert_eq!(sent[0].timeout, Duration::from_secs(10));
    assert!(sent[0].body.starts_with("File: setup.exe\nType: EXE\n"));
    assert!(sent[0].body.contains("Warning:"));
}

#[rstest]
fn test_sink_failure_degrades_to_console(exe_result: ClassificationResult) {
    let notifier = Notifier::with_sink(AppConfig::default(), Box::new(FailingSink));
    assert_eq!(notifier.notify(&exe_result), Delivery::ConsoleOnly);
}

#[rstest]
fn test_console_only_notifier(exe_result: ClassificationResult) {
    let notifier = Notifier::console_only(AppConfig::default());
    assert!(!notifier.has_sink());
    assert_eq!(notifier.notify(&exe_result), Delivery::ConsoleOnly);
}

#[test]
fn test_unreadable_is_not_notified() {
    let sink = RecordingSink::default();
    let notifier = Notifier::with_sink(AppConfig::default(), Box::new(sink.clone()));
    let result = ClassificationResult::new("missing", Classification::Unreadable);

    assert_eq!(notifier.notification_for(&result), None);
    assert_eq!(notifier.notify(&result), Delivery::Skipped);
    assert!(sink.sent().is_empty());
}

#[test]
fn test_unknown_is_notified_without_score() {
    let sink = RecordingSink::default();
    let notifier = Notifier::with_sink(AppConfig::default(), Box::new(sink.clone()));
    let result = ClassificationResult::new("data.bin", Classification::Unknown);

    assert_eq!(notifier.notify(&result), Delivery::Desktop);
    assert_eq!(sink.sent()[0].body, "File: data.bin\nType: Unknown");
}

#[rstest]
fn test_config_overrides_notification_fields(exe_result: ClassificationResult) {
    let config = AppConfig {
        app_label: "Scanner".to_string(),
        notification_timeout: Duration::from_secs(3),
        ..AppConfig::default()
    };
    let notifier = Notifier::console_only(config);

    let notification = notifier.notification_for(&exe_result).unwrap();
    assert_eq!(notification.app_label, "Scanner");
    assert_eq!(notification.timeout, Duration::from_secs(3));
    assert_eq!(notification.title, DEFAULT_NOTIFICATION_TITLE);
}

#[test]
fn test_disabled_desktop_config_has_no_sink() {
    let config = AppConfig {
        desktop_notifications: false,
        ..AppConfig::default()
    };
    assert!(!Notifier::new(config).has_sink());
}
