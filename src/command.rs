use serde::Deserialize;
use thiserror::Error;

use crate::{
    client::{ClientCandidate, Money},
    notes::{NoteBundle, NotesParseError},
};

#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OperationKind {
    Register,
    Unregister,
    Open,
    Close,
    Deposit,
    Withdraw,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("Client name is required for {kind:?}")]
    ClientRequired { kind: OperationKind },
    #[error("Amount is required for {kind:?}")]
    AmountRequired { kind: OperationKind },
    #[error("Notes are required for {kind:?}")]
    NotesRequired { kind: OperationKind },
    #[error("Invalid notes for {kind:?}: {source}")]
    InvalidNotes {
        kind: OperationKind,
        source: NotesParseError,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Add a client to the bank. The record is checked when it is built.
    Register(ClientCandidate),
    Unregister { name: String },
    Open { name: String },
    Close,
    Deposit(NoteBundle),
    Withdraw { amount: Money },
}

impl Command {
    pub fn parse_command(
        kind: OperationKind,
        client: Option<String>,
        balance: Option<Money>,
        amount: Option<Money>,
        notes: Option<&str>,
    ) -> Result<Self, CommandError> {
        match kind {
            OperationKind::Register => Ok(Self::Register(ClientCandidate {
                name: client,
                balance: balance.or(Some(Money::ZERO)),
            })),
            OperationKind::Unregister => Ok(Self::Unregister {
                name: Self::require_client(kind, client)?,
            }),
            OperationKind::Open => Ok(Self::Open {
                name: Self::require_client(kind, client)?,
            }),
            OperationKind::Close => Ok(Self::Close),
            OperationKind::Deposit => {
                let Some(notes) = notes else {
                    return Err(CommandError::NotesRequired { kind });
                };
                notes
                    .parse()
                    .map(Self::Deposit)
                    .map_err(|source| CommandError::InvalidNotes { kind, source })
            }
            OperationKind::Withdraw => amount
                .map(|amount| Self::Withdraw { amount })
                .ok_or(CommandError::AmountRequired { kind }),
        }
    }

    fn require_client(kind: OperationKind, client: Option<String>) -> Result<String, CommandError> {
        client.ok_or(CommandError::ClientRequired { kind })
    }
}
