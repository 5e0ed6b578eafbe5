//! Subcommand implementations.

pub mod carousel;
pub mod cart;
pub mod catalog;

use std::io::{self, Write};
use std::sync::Arc;

use thiserror::Error;

use stall_storefront::config::StorefrontConfig;
use stall_storefront::notify::{Notice, Notifier};
use stall_storefront::page::Page;
use stall_storefront::store::FileStore;
use stall_storefront::{AppError, Storefront};

/// Errors from running a subcommand.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error(transparent)]
    Storefront(#[from] AppError),

    #[error("Failed to write output: {0}")]
    Output(#[from] io::Error),
}

/// Prints notices to stdout, standing in for a blocking dialog.
struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&self, notice: &Notice) {
        let mut out = io::stdout().lock();
        // A closed stdout leaves nothing to report to
        let _ = writeln!(out, "{notice}");
    }
}

/// Load the storefront for `config`'s origin onto `page`.
fn open(config: &StorefrontConfig, page: Page) -> Result<Storefront<FileStore>, CommandError> {
    let store = FileStore::open(&config.storage_dir, &config.origin).map_err(AppError::from)?;
    Ok(Storefront::load(store, Arc::new(ConsoleNotifier), page)?)
}

/// Write one line to stdout.
fn print_line(line: &str) -> Result<(), CommandError> {
    writeln!(io::stdout().lock(), "{line}")?;
    Ok(())
}
