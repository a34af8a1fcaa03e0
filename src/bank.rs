use std::{cell::RefCell, rc::Rc};

use thiserror::Error;
use tracing::debug;

use crate::client::Client;

/// Bank handle shared between the owner and any number of machines.
pub type SharedBank = Rc<RefCell<Bank>>;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum BankError {
    #[error("Client `{name}` already exists")]
    DuplicateClient { name: String },
    #[error("Client `{name}` does not exist")]
    UnknownClient { name: String },
}

/// Ordered roster of clients, unique by name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Bank {
    bank_name: String,
    clients: Vec<Client>,
}

impl Bank {
    pub fn new(bank_name: impl Into<String>) -> Self {
        Self {
            bank_name: bank_name.into(),
            clients: Vec::new(),
        }
    }

    /// Creates a bank with an initial roster. Duplicate names are rejected
    /// just like with [`Bank::add_client`].
    pub fn with_clients(
        bank_name: impl Into<String>,
        clients: impl IntoIterator<Item = Client>,
    ) -> Result<Self, BankError> {
        let mut bank = Self::new(bank_name);
        for client in clients {
            bank.add_client(client)?;
        }
        Ok(bank)
    }

    pub fn into_shared(self) -> SharedBank {
        Rc::new(RefCell::new(self))
    }

    pub fn bank_name(&self) -> &str {
        &self.bank_name
    }

    pub fn add_client(&mut self, client: Client) -> Result<(), BankError> {
        if self.contains(client.name()) {
            return Err(BankError::DuplicateClient {
                name: client.name().to_string(),
            });
        }
        debug!(bank = %self.bank_name, client = client.name(), "client added");
        self.clients.push(client);
        Ok(())
    }

    /// Removes the client with the given name. Nothing but the name is looked at.
    pub fn remove_client(&mut self, name: &str) -> Result<Client, BankError> {
        let Some(position) = self.position(name) else {
            return Err(BankError::UnknownClient {
                name: name.to_string(),
            });
        };
        debug!(bank = %self.bank_name, client = name, "client removed");
        Ok(self.clients.remove(position))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    pub fn client(&self, name: &str) -> Option<&Client> {
        self.clients.iter().find(|c| c.name() == name)
    }

    pub(crate) fn client_mut(&mut self, name: &str) -> Option<&mut Client> {
        self.clients.iter_mut().find(|c| c.name() == name)
    }

    /// Clients in insertion order.
    pub fn clients(&self) -> impl Iterator<Item = &Client> {
        self.clients.iter()
    }

    pub fn len(&self) -> usize {
        self.clients.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clients.is_empty()
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.clients.iter().position(|c| c.name() == name)
    }
}

#[cfg(test)]
mod tests {
    use crate::client::{Money, create_client};

    use super::*;

    #[test]
    fn add_and_remove_clients() {
        let mut bank = Bank::new("first");
        assert!(bank.is_empty());
        bank.add_client(Client::new("alice").unwrap()).unwrap();
        bank.add_client(create_client("bob", Money::from(50)).unwrap())
            .unwrap();

        let names: Vec<_> = bank.clients().map(Client::name).collect();
        assert_eq!(names, vec!["alice", "bob"]);

        // same name with a different balance is still a duplicate
        let err = bank
            .add_client(create_client("alice", Money::from(10)).unwrap())
            .unwrap_err();
        assert_eq!(
            err,
            BankError::DuplicateClient {
                name: "alice".to_string()
            }
        );
        assert_eq!(err.to_string(), "Client `alice` already exists");

        // names are case sensitive
        bank.add_client(Client::new("Alice").unwrap()).unwrap();
        assert_eq!(bank.len(), 3);

        let removed = bank.remove_client("bob").unwrap();
        assert_eq!(removed.balance(), Money::from(50));
        assert!(!bank.contains("bob"));

        let err = bank.remove_client("bob").unwrap_err();
        assert_eq!(
            err,
            BankError::UnknownClient {
                name: "bob".to_string()
            }
        );

        // the name can be reused once removed
        bank.add_client(Client::new("bob").unwrap()).unwrap();
        let names: Vec<_> = bank.clients().map(Client::name).collect();
        assert_eq!(names, vec!["alice", "Alice", "bob"]);
    }

    #[test]
    fn initial_roster() {
        let bank = Bank::with_clients(
            "second",
            [Client::new("alice").unwrap(), Client::new("bob").unwrap()],
        )
        .unwrap();
        assert_eq!(bank.bank_name(), "second");
        assert_eq!(bank.len(), 2);
        assert!(bank.client("bob").is_some());

        let err = Bank::with_clients(
            "third",
            [Client::new("alice").unwrap(), Client::new("alice").unwrap()],
        )
        .unwrap_err();
        assert!(matches!(err, BankError::DuplicateClient { .. }));
    }
}
