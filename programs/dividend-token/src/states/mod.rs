pub mod holder_account;
pub mod holder_set;
pub mod holder_registry;
pub mod dividend_ledger;
pub mod dividend_tracker;
pub mod fee_schedule;
pub mod token_ledger;
pub mod token_state;

pub use holder_account::*;
pub use holder_set::*;
pub use holder_registry::*;
pub use dividend_ledger::*;
pub use dividend_tracker::*;
pub use fee_schedule::*;
pub use token_ledger::*;
pub use token_state::*;
