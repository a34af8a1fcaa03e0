//! This module could be a separate crate on its own, to bootstrap [`bankomat`](crate) within
//! a binary, but it is also what the integration tests drive.

use std::io::{Read, Write};

use crate::{
    bank::{Bank, BankError, SharedBank},
    bankomat::{Bankomat, BankomatError},
    client::{Client, ClientError, Money, create_client},
    command::{Command, CommandError},
    notes::NoteInventory,
};
use anyhow::{Context, Result};
use csv_parser::{CsvOperationParser, Operation};
use csv_printer::{print_clients, print_notes};
use thiserror::Error;
use tracing::{debug, info};

pub mod csv_parser;
pub mod csv_printer;

#[derive(Debug, Error)]
pub enum OperationError {
    #[error("Malformed row: {0}")]
    Row(#[from] csv::Error),
    #[error(transparent)]
    Command(#[from] CommandError),
    #[error(transparent)]
    Client(#[from] ClientError),
    #[error(transparent)]
    Bank(#[from] BankError),
    #[error(transparent)]
    Bankomat(#[from] BankomatError),
}

/// Runs a scenario against a fresh bank and one machine, then prints the
/// roster followed by the machine's notes.
pub struct Service<'w, R, W: 'w> {
    pub input: R,
    pub output: &'w mut W,
    pub bank_name: String,
    pub notes: NoteInventory,
    pub error_printer: Box<dyn FnMut(u64, OperationError)>,
}

impl<'w, R, W> Service<'w, R, W>
where
    R: Read,
    W: Write + 'w,
{
    pub fn run(mut self) -> Result<()> {
        let parser =
            CsvOperationParser::new(self.input).context("Failed to read scenario header")?;

        let bank = Bank::new(self.bank_name).into_shared();
        let mut atm = Bankomat::new(self.notes, bank.clone());

        for (line, row) in parser {
            if let Err(err) = execute(&bank, &mut atm, row) {
                debug!(line, %err, "operation rejected");
                (self.error_printer)(line, err);
            }
        }

        info!(
            clients = bank.borrow().len(),
            notes_value = atm.notes().total_value(),
            "scenario finished"
        );
        print_clients(&mut *self.output, &bank.borrow())?;
        writeln!(self.output)?;
        print_notes(self.output, atm.notes())
    }
}

fn execute(
    bank: &SharedBank,
    atm: &mut Bankomat,
    row: csv::Result<Operation>,
) -> Result<(), OperationError> {
    let row = row?;
    let command = Command::parse_command(
        row.op,
        row.client,
        row.balance,
        row.amount,
        row.notes.as_deref(),
    )?;
    match command {
        Command::Register(candidate) => {
            let client = Client::try_from(candidate)?;
            bank.borrow_mut().add_client(client)?;
        }
        Command::Unregister { name } => {
            bank.borrow_mut().remove_client(&name)?;
        }
        Command::Open { name } => {
            let registered = bank.borrow().client(&name).cloned();
            let client = match registered {
                Some(client) => client,
                None => create_client(name, Money::ZERO)?,
            };
            atm.set_client(&client)?;
        }
        Command::Close => atm.remove_client(),
        Command::Deposit(bundle) => {
            atm.add_money(&[bundle])?;
        }
        Command::Withdraw { amount } => {
            let plan = atm.give_money(amount)?;
            info!(%amount, notes = %plan, "notes dispensed");
        }
    }
    Ok(())
}
