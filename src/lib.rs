/// Client records, their factory and the structural validator for
/// externally supplied client data.
pub mod client;

/// Bank registry: an ordered roster of clients, unique by name.
pub mod bank;

/// Denominations, note bundles, the machine's note inventory and withdrawal plans.
pub mod notes;

/// The cash machine: sessions, deposits and greedy note selection for withdrawals.
///
/// Failed withdrawals leave the note inventory untouched, and a successful
/// withdrawal decreases the client balance by the requested amount.
pub mod bankomat;

/// Typed commands built from scenario rows, executed against [`bank`] and [`bankomat`].
pub mod command;

/// CSV scenario runner. Lives in the library so that integration tests can use it.
pub mod bin_utils;
