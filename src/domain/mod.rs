mod account;
mod error;
mod expense;
mod ledger;
mod money;
mod period;
mod report;

pub use account::*;
pub use error::*;
pub use expense::*;
pub use ledger::*;
pub use money::*;
pub use period::*;
pub use report::*;
