//! magicguard - identify files by their magic bytes.

mod cli;

use anyhow::Result;
use console::style;
use tracing::debug;

use magicguard::{AppConfig, Classifier, SignatureTable, logging};

fn main() -> Result<()> {
    logging::init();

    let config = AppConfig::from_env();
    let classifier = Classifier::new(SignatureTable::builtin());
    for (shadowed, by) in classifier.table().shadowed_entries() {
        debug!(
            "{} is never selected: {} comes first with prefix {}",
            shadowed.type_id(),
            by.type_id(),
            by.prefix_hex()
        );
    }

    print_banner();
    cli::run(config, classifier)
}

fn print_banner() {
    println!();
    println!("{}", style("magicguard - File Type Detector").cyan().bold());
}
