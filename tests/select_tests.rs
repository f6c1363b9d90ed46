use magicguard::{
    AppConfig, Classification, Classifier, Error, FilePicker, Notifier, SelectDriver,
    SelectOutcome,
};
use rstest::*;
use std::cell::Cell;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// Returns a fixed answer and counts how often it was asked.
struct StubPicker {
    answer: Option<PathBuf>,
    fail: bool,
    calls: Cell<usize>,
}

impl StubPicker {
    fn returning(answer: Option<PathBuf>) -> Self {
        Self {
            answer,
            fail: false,
            calls: Cell::new(0),
        }
    }

    fn failing() -> Self {
        Self {
            answer: None,
            fail: true,
            calls: Cell::new(0),
        }
    }
}

impl FilePicker for StubPicker {
    fn select(&self) -> magicguard::Result<Option<PathBuf>> {
        self.calls.set(self.calls.get() + 1);
        if self.fail {
            return Err(Error::Picker("no display".to_string()));
        }
        Ok(self.answer.clone())
    }
}

#[fixture]
fn driver() -> SelectDriver {
    SelectDriver::new(
        Classifier::default(),
        Notifier::console_only(AppConfig::default()),
    )
}

#[rstest]
fn test_cancelled_selection(driver: SelectDriver) {
    let picker = StubPicker::returning(None);
    assert_eq!(driver.run(&picker), SelectOutcome::Cancelled);
    assert_eq!(picker.calls.get(), 1);
}

#[rstest]
fn test_picker_failure_is_treated_as_cancel(driver: SelectDriver) {
    let picker = StubPicker::failing();
    assert_eq!(driver.run(&picker), SelectOutcome::Cancelled);
}

#[rstest]
fn test_selected_file_is_checked_once(driver: SelectDriver) {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("document.pdf");
    fs::write(&path, b"%PDF-1.7\n").unwrap();
    let picker = StubPicker::returning(Some(path));

    match driver.run(&picker) {
        SelectOutcome::Checked(result) => {
            assert_eq!(result.file_name(), "document.pdf");
            assert_eq!(result.type_id(), Some("PDF"));
            assert_eq!(result.danger_score().unwrap().get(), 2);
        }
        other => panic!("expected a checked file, got {other:?}"),
    }
    assert_eq!(picker.calls.get(), 1);
}

#[rstest]
fn test_selected_missing_file_is_unreadable(driver: SelectDriver) {
    let dir = TempDir::new().unwrap();
    let picker = StubPicker::returning(Some(dir.path().join("missing.doc")));

    let outcome = driver.run(&picker);
    let SelectOutcome::Checked(result) = outcome else {
        panic!("expected a checked file");
    };
    assert_eq!(result.outcome(), &Classification::Unreadable);
}
