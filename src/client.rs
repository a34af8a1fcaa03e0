use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;

/// Money amounts, in whole currency units by convention.
pub type Money = Decimal;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ClientError {
    #[error("Client name must not be empty")]
    EmptyName,
    #[error("Client record is malformed: name={name:?}, balance={balance:?}")]
    Malformed {
        name: Option<String>,
        balance: Option<Money>,
    },
}

/// A bank client. Balance is changed only by cash operations of a machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Client {
    name: String,
    balance: Money,
}

impl Client {
    /// Client with a zero balance.
    pub fn new(name: impl Into<String>) -> Result<Self, ClientError> {
        create_client(name, Money::ZERO)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn balance(&self) -> Money {
        self.balance
    }

    /// Callers check the arithmetic; `Decimal` operators panic on overflow.
    pub(crate) fn set_balance(&mut self, balance: Money) {
        self.balance = balance;
    }
}

pub fn create_client(name: impl Into<String>, balance: Money) -> Result<Client, ClientError> {
    let name = name.into();
    if name.is_empty() {
        return Err(ClientError::EmptyName);
    }
    Ok(Client { name, balance })
}

/// Client-like value coming from outside, with every field optional.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct ClientCandidate {
    pub name: Option<String>,
    pub balance: Option<Money>,
}

/// Structural check, never fails loudly: `false` for an absent candidate or a missing field.
pub fn validate_client(candidate: Option<&ClientCandidate>) -> bool {
    matches!(
        candidate,
        Some(ClientCandidate {
            name: Some(_),
            balance: Some(_),
        })
    )
}

impl TryFrom<ClientCandidate> for Client {
    type Error = ClientError;

    fn try_from(candidate: ClientCandidate) -> Result<Self, Self::Error> {
        if !validate_client(Some(&candidate)) {
            return Err(ClientError::Malformed {
                name: candidate.name,
                balance: candidate.balance,
            });
        }
        create_client(
            candidate.name.unwrap_or_default(),
            candidate.balance.unwrap_or_default(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_clients() {
        let client = create_client("alice", Money::from(120)).unwrap();
        assert_eq!(client.name(), "alice");
        assert_eq!(client.balance(), Money::from(120));

        let client = Client::new("bob").unwrap();
        assert_eq!(client.balance(), Money::ZERO);

        assert_eq!(
            create_client("", Money::ZERO).unwrap_err(),
            ClientError::EmptyName
        );
    }

    #[test]
    fn validate_candidates() {
        assert!(!validate_client(None));
        assert!(!validate_client(Some(&ClientCandidate::default())));
        assert!(!validate_client(Some(&ClientCandidate {
            name: Some("alice".to_string()),
            balance: None,
        })));
        assert!(!validate_client(Some(&ClientCandidate {
            name: None,
            balance: Some(Money::ZERO),
        })));
        assert!(validate_client(Some(&ClientCandidate {
            name: Some("alice".to_string()),
            balance: Some(Money::ZERO),
        })));
    }

    #[test]
    fn client_from_candidate() {
        let client = Client::try_from(ClientCandidate {
            name: Some("alice".to_string()),
            balance: Some(Money::from(10)),
        })
        .unwrap();
        assert_eq!(client.balance(), Money::from(10));

        let err = Client::try_from(ClientCandidate {
            name: Some("alice".to_string()),
            balance: None,
        })
        .unwrap_err();
        assert!(matches!(err, ClientError::Malformed { balance: None, .. }));

        let err = Client::try_from(ClientCandidate {
            name: Some(String::new()),
            balance: Some(Money::ZERO),
        })
        .unwrap_err();
        assert_eq!(err, ClientError::EmptyName);
    }

    #[test]
    fn set_balance() {
        let mut client = Client::new("alice").unwrap();
        client.set_balance(Money::from(250));
        assert_eq!(client.balance(), Money::from(250));
    }
}
