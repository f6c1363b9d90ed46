//! Directory watching.
//!
//! [`DirectoryWatch`] is a subscription to file-creation events in a single
//! directory (non-recursive). Its paths are consumed one at a time by
//! [`WatchDriver`], which runs a full classify and notify cycle for each
//! before pulling the next. Bursts are not coalesced, and a file that is
//! still being written when its header is read may classify misleadingly.

use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::time::{Duration, Instant};

use notify::event::{CreateKind, EventKind};
use notify::{Event, RecommendedWatcher, RecursiveMode, Watcher};
use tracing::{debug, info, warn};

use crate::classifier::Classifier;
use crate::error::{Error, Result};
use crate::notifier::Notifier;
use crate::types::ClassificationResult;

/// Paths of regular files created by `event`. Directory creations and every
/// other event kind yield nothing.
pub fn created_paths(event: &Event) -> Vec<PathBuf> {
    match event.kind {
        EventKind::Create(CreateKind::File) => event.paths.clone(),
        EventKind::Create(CreateKind::Folder) => Vec::new(),
        // Backends that cannot tell files from folders report Any/Other.
        EventKind::Create(_) => event
            .paths
            .iter()
            .filter(|path| !path.is_dir())
            .cloned()
            .collect(),
        _ => Vec::new(),
    }
}

enum Poll {
    Created(PathBuf),
    Idle,
    Closed,
}

/// Live subscription to creation events in one directory.
pub struct DirectoryWatch {
    dir: PathBuf,
    watcher: RecommendedWatcher,
    events: Receiver<notify::Result<Event>>,
    pending: VecDeque<PathBuf>,
    poll_interval: Duration,
}

impl DirectoryWatch {
    /// Validates `dir` and starts watching it. Nothing is subscribed when
    /// `dir` is not an existing directory.
    pub fn start(dir: impl AsRef<Path>, poll_interval: Duration) -> Result<Self> {
        let dir = dir.as_ref();
        if !dir.is_dir() {
            return Err(Error::NotADirectory(dir.to_path_buf()));
        }

        let (tx, rx) = mpsc::channel();
        let mut watcher = notify::recommended_watcher(tx)?;
        watcher.watch(dir, RecursiveMode::NonRecursive)?;
        info!(dir = %dir.display(), "Watching directory");

        Ok(Self {
            dir: dir.to_path_buf(),
            watcher,
            events: rx,
            pending: VecDeque::new(),
            poll_interval,
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Waits up to `timeout` for the next created file.
    pub fn next_created(&mut self, timeout: Duration) -> Option<PathBuf> {
        match self.poll(timeout) {
            Poll::Created(path) => Some(path),
            Poll::Idle | Poll::Closed => None,
        }
    }

    /// Created files until `running` is cleared or the backend goes away.
    /// The flag is checked at least once per poll interval.
    pub fn created_files<'a>(&'a mut self, running: &'a AtomicBool) -> CreatedFiles<'a> {
        CreatedFiles {
            watch: self,
            running,
        }
    }

    /// Unsubscribes and releases the watcher.
    pub fn stop(mut self) {
        if let Err(e) = self.watcher.unwatch(&self.dir) {
            debug!(dir = %self.dir.display(), error = %e, "Unwatch failed");
        }
        info!(dir = %self.dir.display(), "Stopped watching directory");
    }

    fn poll(&mut self, timeout: Duration) -> Poll {
        let deadline = Instant::now() + timeout;
        loop {
            if let Some(path) = self.pending.pop_front() {
                return Poll::Created(path);
            }

            let remaining = deadline.saturating_duration_since(Instant::now());
            match self.events.recv_timeout(remaining) {
                Ok(Ok(event)) => {
                    debug!(kind = ?event.kind, paths = ?event.paths, "File system event");
                    self.pending.extend(created_paths(&event));
                }
                Ok(Err(e)) => warn!(error = %e, "Watcher reported an error"),
                Err(RecvTimeoutError::Timeout) => return Poll::Idle,
                Err(RecvTimeoutError::Disconnected) => return Poll::Closed,
            }
        }
    }
}

/// Lazy, unbounded sequence of created file paths. Not restartable.
pub struct CreatedFiles<'a> {
    watch: &'a mut DirectoryWatch,
    running: &'a AtomicBool,
}

impl Iterator for CreatedFiles<'_> {
    type Item = PathBuf;

    fn next(&mut self) -> Option<PathBuf> {
        let interval = self.watch.poll_interval;
        while self.running.load(Ordering::SeqCst) {
            match self.watch.poll(interval) {
                Poll::Created(path) => return Some(path),
                Poll::Idle => {}
                Poll::Closed => {
                    warn!("Watcher channel closed");
                    return None;
                }
            }
        }
        None
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WatchState {
    Idle,
    Watching,
    Classifying,
    Stopped,
}

pub struct WatchDriver {
    classifier: Classifier,
    notifier: Notifier,
    state: WatchState,
}

impl WatchDriver {
    pub fn new(classifier: Classifier, notifier: Notifier) -> Self {
        Self {
            classifier,
            notifier,
            state: WatchState::Idle,
        }
    }

    pub fn state(&self) -> WatchState {
        self.state
    }

    /// One classify and notify cycle.
    pub fn handle(&self, path: &Path) -> ClassificationResult {
        let result = self.classifier.classify(path);
        let delivery = self.notifier.notify(&result);
        debug!(path = %path.display(), ?delivery, "Handled created file");
        result
    }

    /// Handles created files until `running` is cleared, then releases the
    /// watch.
    pub fn run(&mut self, mut watch: DirectoryWatch, running: &AtomicBool) -> WatchState {
        self.state = WatchState::Watching;

        for path in watch.created_files(running) {
            self.state = WatchState::Classifying;
            self.handle(&path);
            self.state = WatchState::Watching;
        }

        watch.stop();
        self.state = WatchState::Stopped;
        self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_folder_creation_is_ignored() {
        let event = Event::new(EventKind::Create(CreateKind::Folder)).add_path("/tmp/sub".into());
        assert!(created_paths(&event).is_empty());
    }

    #[test]
    fn test_file_creation_yields_path() {
        let event =
            Event::new(EventKind::Create(CreateKind::File)).add_path("/tmp/new.bin".into());
        assert_eq!(created_paths(&event), vec![PathBuf::from("/tmp/new.bin")]);
    }

    #[test]
    fn test_modify_and_remove_are_ignored() {
        use notify::event::{ModifyKind, RemoveKind};

        let modify = Event::new(EventKind::Modify(ModifyKind::Any)).add_path("/tmp/a".into());
        let remove = Event::new(EventKind::Remove(RemoveKind::File)).add_path("/tmp/a".into());
        assert!(created_paths(&modify).is_empty());
        assert!(created_paths(&remove).is_empty());
    }
}
