//! Command line arguments.

use std::path::PathBuf;

use clap::Parser;

#[derive(Debug, Parser)]
#[command(
    name = "swipedeck",
    version,
    about = "Swipe through job postings or candidates in the terminal",
    long_about = "Swipe through job postings or candidates in the terminal.\n\n\
                  Drag a card with the mouse, or use the arrow keys. Without an \
                  items file a built-in sample deck is shown."
)]
pub struct Cli {
    /// Show the candidate deck instead of jobs.
    #[arg(long)]
    pub candidates: bool,

    /// Id of the item to open first.
    #[arg(long, value_name = "ID")]
    pub initial: Option<String>,

    /// JSON file with the items; re-read every few seconds.
    #[arg(value_name = "ITEMS_JSON")]
    pub items: Option<PathBuf>,
}
