//! One-shot file selection.
//!
//! [`FilePicker`] is the capability seam: the native dialog and the terminal
//! prompt both sit behind it, and [`SelectDriver`] runs exactly one
//! classify and notify cycle for whatever it returns.

use std::path::PathBuf;

use tracing::{debug, info, warn};

use crate::classifier::Classifier;
use crate::error::{Error, Result};
use crate::notifier::Notifier;
use crate::prompt;
use crate::types::ClassificationResult;

/// Dialog title and prompt text.
pub const PICKER_TITLE: &str = "Select a file to check";
pub const NO_FILE_SELECTED: &str = "No file selected.";

/// Single-file selection. `Ok(None)` means the user cancelled.
pub trait FilePicker {
    fn select(&self) -> Result<Option<PathBuf>>;
}

/// Terminal prompt for a path; an empty answer cancels.
#[derive(Debug, Default, Clone, Copy)]
pub struct PromptPicker;

impl FilePicker for PromptPicker {
    fn select(&self) -> Result<Option<PathBuf>> {
        let answer = prompt::read_line(PICKER_TITLE).map_err(|e| Error::Picker(e.to_string()))?;
        Ok(parse_selection(&answer))
    }
}

/// Native modal file dialog.
#[cfg(feature = "native-dialog")]
#[derive(Debug, Default, Clone, Copy)]
pub struct NativePicker;

#[cfg(feature = "native-dialog")]
impl FilePicker for NativePicker {
    fn select(&self) -> Result<Option<PathBuf>> {
        Ok(rfd::FileDialog::new().set_title(PICKER_TITLE).pick_file())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickerKind {
    Native,
    Prompt,
}

/// Native dialog when a display is reachable and the session is
/// interactive; the terminal prompt otherwise (SSH, CI, piped input).
pub fn picker_kind(native_compiled: bool, interactive: bool, display: bool) -> PickerKind {
    if native_compiled && interactive && display {
        PickerKind::Native
    } else {
        PickerKind::Prompt
    }
}

/// Whether a graphical session is available. Only X11/Wayland hosts can
/// lack one; elsewhere the desktop is assumed.
pub fn has_display<F>(lookup: F) -> bool
where
    F: Fn(&str) -> Option<String>,
{
    if cfg!(all(unix, not(target_os = "macos"))) {
        ["DISPLAY", "WAYLAND_DISPLAY"]
            .iter()
            .any(|key| lookup(*key).is_some_and(|v| !v.trim().is_empty()))
    } else {
        true
    }
}

/// The picker the binary uses.
pub fn default_picker() -> Box<dyn FilePicker> {
    let kind = picker_kind(
        cfg!(feature = "native-dialog"),
        prompt::is_interactive(),
        has_display(|key| std::env::var(key).ok()),
    );
    debug!(?kind, "Selected file picker");

    match kind {
        #[cfg(feature = "native-dialog")]
        PickerKind::Native => Box::new(NativePicker),
        _ => Box::new(PromptPicker),
    }
}

/// Trims whitespace and the quotes terminals add to dropped paths.
fn parse_selection(answer: &str) -> Option<PathBuf> {
    let trimmed = answer.trim().trim_matches(|c| c == '"' || c == '\'');
    if trimmed.is_empty() {
        None
    } else {
        Some(PathBuf::from(trimmed))
    }
}

/// Result of one select run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectOutcome {
    Cancelled,
    Checked(ClassificationResult),
}

/// Drives a single selection through classification and notification.
pub struct SelectDriver {
    classifier: Classifier,
    notifier: Notifier,
}

impl SelectDriver {
    pub fn new(classifier: Classifier, notifier: Notifier) -> Self {
        Self {
            classifier,
            notifier,
        }
    }

    /// Prompts once and checks the chosen file, if any.
    pub fn run(&self, picker: &dyn FilePicker) -> SelectOutcome {
        let path = match picker.select() {
            Ok(Some(path)) => path,
            Ok(None) => {
                println!("{NO_FILE_SELECTED}");
                return SelectOutcome::Cancelled;
            }
            Err(e) => {
                warn!(error = %e, "File selection failed");
                println!("{NO_FILE_SELECTED}");
                return SelectOutcome::Cancelled;
            }
        };

        info!(path = %path.display(), "Checking selected file");
        let result = self.classifier.classify(&path);
        self.notifier.notify(&result);
        SelectOutcome::Checked(result)
    }
}
