//! Interactive menu: watch a directory or check a single file.

use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use anyhow::{Context, Result};
use console::style;

use magicguard::prompt;
use magicguard::select::default_picker;
use magicguard::{
    AppConfig, Classifier, DirectoryWatch, Error, Notifier, SelectDriver, WatchDriver,
};

pub const MENU_PROMPT: &str = "Enter '1' to monitor a directory or '2' to check a file";
pub const DIRECTORY_PROMPT: &str = "Please enter the directory you want to monitor";
pub const INVALID_OPTION: &str = "Invalid option.";

/// Top-level menu entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Watch,
    Select,
}

impl MenuChoice {
    /// `1` or `2`, surrounding whitespace ignored.
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim() {
            "1" => Some(MenuChoice::Watch),
            "2" => Some(MenuChoice::Select),
            _ => None,
        }
    }
}

fn ask(text: &str) -> Result<String> {
    prompt::read_line(text).context("Failed to read input")
}

/// Shows the menu once and runs the chosen mode to completion.
pub fn run(config: AppConfig, classifier: Classifier) -> Result<()> {
    let answer = ask(MENU_PROMPT)?;

    match MenuChoice::parse(&answer) {
        Some(MenuChoice::Watch) => {
            let dir = ask(DIRECTORY_PROMPT)?;
            run_watch(config, classifier, dir.trim())
        }
        Some(MenuChoice::Select) => {
            let driver = SelectDriver::new(classifier, Notifier::new(config));
            driver.run(default_picker().as_ref());
            Ok(())
        }
        None => {
            println!("{INVALID_OPTION}");
            Ok(())
        }
    }
}

fn run_watch(config: AppConfig, classifier: Classifier, dir: &str) -> Result<()> {
    let watch = match DirectoryWatch::start(Path::new(dir), config.poll_interval) {
        Ok(watch) => watch,
        Err(e @ Error::NotADirectory(_)) => {
            println!("{}", style(e).yellow());
            return Ok(());
        }
        Err(e) => return Err(e).context(format!("Failed to watch directory: {dir}")),
    };

    let running = Arc::new(AtomicBool::new(true));
    let r = running.clone();
    ctrlc::set_handler(move || {
        r.store(false, Ordering::SeqCst);
    })
    .context("Failed to set Ctrl+C handler")?;

    println!(
        "{} {}",
        style("Monitoring directory:").cyan().bold(),
        watch.dir().display()
    );
    println!("Press Ctrl+C to stop.");

    let mut driver = WatchDriver::new(classifier, Notifier::new(config));
    driver.run(watch, &running);

    println!("Stopped monitoring {dir}.");
    Ok(())
}
