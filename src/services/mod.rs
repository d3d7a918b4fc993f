//! Service layer modules for external integrations.

pub mod ledger;

pub use ledger::{spawn_ledger_worker, LedgerClient, LedgerHandle};
