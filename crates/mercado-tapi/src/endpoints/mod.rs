//! API endpoint implementations
//!
//! Each group turns typed arguments into form parameters and hands them to
//! the client's signed request primitive.

pub mod account;
pub mod system;
pub mod trading;
pub mod withdrawals;

pub use account::AccountEndpoints;
pub use system::SystemEndpoints;
pub use trading::TradingEndpoints;
pub use withdrawals::WithdrawalEndpoints;
