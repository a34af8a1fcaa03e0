use std::io::Write;

use crate::{bank::Bank, client::Money, notes::NoteInventory};
use csv::Writer;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct ClientRow<'a> {
    pub client: &'a str,
    pub balance: Money,
}

#[derive(Debug, Serialize)]
pub struct NoteRow {
    pub note: u32,
    pub count: u32,
}

fn write_rows<W, T>(output: &mut W, rows: impl Iterator<Item = T>) -> anyhow::Result<()>
where
    W: Write,
    T: Serialize,
{
    let mut writer = Writer::from_writer(output);
    for row in rows {
        if let Err(err) = writer.serialize(row) {
            anyhow::bail!("Failed to write to CSV: {err}")
        }
    }
    // Ensure all data is flushed to the output
    if let Err(err) = writer.flush() {
        anyhow::bail!("Failed to flush CSV writer: {err}")
    }
    Ok(())
}

/// Prints the roster in insertion order.
pub fn print_clients<W>(output: &mut W, bank: &Bank) -> anyhow::Result<()>
where
    W: Write,
{
    write_rows(
        output,
        bank.clients().map(|c| ClientRow {
            client: c.name(),
            balance: c.balance(),
        }),
    )
}

/// Prints every denomination, highest first, including empty ones.
pub fn print_notes<W>(output: &mut W, notes: &NoteInventory) -> anyhow::Result<()>
where
    W: Write,
{
    write_rows(
        output,
        notes.iter().map(|(denomination, count)| NoteRow {
            note: denomination.face_value(),
            count,
        }),
    )
}
