use std::fs::File;

use anyhow::{Context, Result};
use bankomat::{
    bin_utils::{OperationError, Service},
    notes::{NoteBundle, NoteInventory},
};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let mut args = std::env::args().skip(1);
    let filename = args
        .next()
        .context("Expected a scenario file name as the first argument")?;
    let notes = match args.next() {
        Some(inventory) => inventory
            .parse::<NoteBundle>()
            .with_context(|| format!("Invalid initial inventory `{inventory}`"))?
            .into(),
        None => NoteInventory::new(),
    };
    let file = File::open(&filename).with_context(|| format!("Failed to open `{filename}`"))?;

    let service = Service {
        input: file,
        output: &mut std::io::stdout(),
        bank_name: "bankomat".to_string(),
        notes,
        error_printer: Box::new(|line: u64, err: OperationError| match err {
            OperationError::Row(err) => eprintln!("Malformed row at line {line}: {err}"),
            err => eprintln!("Error at line {line}: {err}"),
        }),
    };
    service.run()
}
