pub mod holder_accounts;
pub use holder_accounts::*;

pub mod payout;
pub use payout::*;

pub mod initialize;
pub use initialize::*;

pub mod open_holder;
pub use open_holder::*;

pub mod close_holder;
pub use close_holder::*;

pub mod transfer;
pub use transfer::*;

pub mod deposit_rewards;
pub use deposit_rewards::*;

pub mod claim;
pub use claim::*;

pub mod process_dividends;
pub use process_dividends::*;

pub mod update_config;
pub use update_config::*;

pub mod query_holder;
pub use query_holder::*;
