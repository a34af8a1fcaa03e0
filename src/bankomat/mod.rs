use rust_decimal::prelude::ToPrimitive;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::{
    bank::SharedBank,
    client::{Client, Money},
    notes::{Denomination, NoteBundle, NoteInventory, WithdrawalPlan},
};

pub mod greedy;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum BankomatError {
    #[error("No client is working with the machine")]
    NoActiveSession,
    #[error("Machine is already serving client `{name}`")]
    SessionAlreadyActive { name: String },
    #[error("`{name}` is not a client of bank `{bank}`")]
    NotAClient { name: String, bank: String },
    #[error("Client `{name}` left the bank during the session")]
    SessionClientMissing { name: String },
    #[error("Requested {requested} exceeds client balance {available}")]
    InsufficientBalance { requested: Money, available: Money },
    #[error("Requested {amount} is not a multiple of {smallest}")]
    NotDivisible { amount: Money, smallest: u32 },
    #[error("Requested amount must not be negative, got {amount}")]
    NegativeAmount { amount: Money },
    #[error("Not enough notes to pay {amount}, {remaining} left over")]
    InsufficientNotes { amount: Money, remaining: Money },
    #[error("Too many {denomination} notes in the machine")]
    NoteCountOverflow { denomination: Denomination },
    #[error("Balance of client `{name}` cannot hold the deposit")]
    BalanceOverflow { name: String },
}

/// Cash machine bound to one bank, serving at most one client at a time.
///
/// The session only remembers the client name; balances are always read and
/// written through the bank roster.
#[derive(Debug)]
pub struct Bankomat {
    bank: SharedBank,
    notes: NoteInventory,
    current_client: Option<String>,
}

impl Bankomat {
    pub fn new(notes: NoteInventory, bank: SharedBank) -> Self {
        Self {
            bank,
            notes,
            current_client: None,
        }
    }

    pub fn notes(&self) -> &NoteInventory {
        &self.notes
    }

    pub fn current_client(&self) -> Option<&str> {
        self.current_client.as_deref()
    }

    /// Starts a session for `client`, who must be on the bank roster.
    pub fn set_client(&mut self, client: &Client) -> Result<(), BankomatError> {
        if let Some(name) = &self.current_client {
            return Err(BankomatError::SessionAlreadyActive { name: name.clone() });
        }
        let bank = self.bank.borrow();
        if !bank.contains(client.name()) {
            return Err(BankomatError::NotAClient {
                name: client.name().to_string(),
                bank: bank.bank_name().to_string(),
            });
        }
        drop(bank);
        debug!(client = client.name(), "session started");
        self.current_client = Some(client.name().to_string());
        Ok(())
    }

    /// Ends the current session, if any.
    pub fn remove_client(&mut self) {
        if let Some(name) = self.current_client.take() {
            debug!(client = %name, "session ended");
        }
    }

    pub fn current_balance(&self) -> Result<Money, BankomatError> {
        let name = self.session()?;
        self.bank
            .borrow()
            .client(name)
            .map(Client::balance)
            .ok_or_else(|| BankomatError::SessionClientMissing {
                name: name.to_string(),
            })
    }

    /// Accepts notes from the current client and credits their value.
    ///
    /// Face values the machine does not know are skipped. Returns `self` so
    /// several deposits can be chained within the session.
    pub fn add_money(&mut self, bundles: &[NoteBundle]) -> Result<&mut Self, BankomatError> {
        let name = self.session()?.to_string();
        let balance = self.current_balance()?;
        let overflow = || BankomatError::BalanceOverflow { name: name.clone() };

        let mut notes = self.notes;
        let mut sum = Money::ZERO;
        for bundle in bundles {
            for denomination in Denomination::ALL {
                let Some(count) = bundle.count(denomination.face_value()) else {
                    continue;
                };
                notes
                    .checked_add(denomination, count)
                    .ok_or(BankomatError::NoteCountOverflow { denomination })?;
                sum = Money::from(count)
                    .checked_mul(Money::from(denomination.face_value()))
                    .and_then(|value| sum.checked_add(value))
                    .ok_or_else(overflow)?;
            }
            for face in bundle.unrecognized() {
                warn!(face, "ignoring unknown denomination in deposit");
            }
        }
        let balance = balance.checked_add(sum).ok_or_else(overflow)?;

        self.notes = notes;
        if let Some(client) = self.bank.borrow_mut().client_mut(&name) {
            client.set_balance(balance);
        }
        info!(client = %name, %sum, "deposit accepted");
        Ok(self)
    }

    /// Pays `amount` to the current client in notes, largest first.
    ///
    /// Nothing is changed when the machine cannot pay the exact amount.
    pub fn give_money(&mut self, amount: Money) -> Result<WithdrawalPlan, BankomatError> {
        let name = self.session()?.to_string();
        let available = self.current_balance()?;
        if amount > available {
            return Err(BankomatError::InsufficientBalance {
                requested: amount,
                available,
            });
        }
        let smallest = Denomination::SMALLEST.face_value();
        if !(amount % Money::from(smallest)).is_zero() {
            return Err(BankomatError::NotDivisible { amount, smallest });
        }
        if amount < Money::ZERO {
            return Err(BankomatError::NegativeAmount { amount });
        }

        let insufficient = |remaining: u64| BankomatError::InsufficientNotes {
            amount,
            remaining: Money::from(remaining),
        };
        let Some(requested) = amount.to_u64() else {
            return Err(BankomatError::InsufficientNotes {
                amount,
                remaining: amount,
            });
        };
        let plan = greedy::plan_withdrawal(&self.notes, requested).map_err(insufficient)?;

        self.notes.take(&plan);
        // 0 <= amount <= available, so this cannot overflow
        if let Some(client) = self.bank.borrow_mut().client_mut(&name) {
            client.set_balance(available - amount);
        }
        info!(client = %name, %amount, notes = %plan, "withdrawal dispensed");
        Ok(plan)
    }

    fn session(&self) -> Result<&str, BankomatError> {
        self.current_client
            .as_deref()
            .ok_or(BankomatError::NoActiveSession)
    }
}
