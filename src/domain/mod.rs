mod amount;
mod ledger;
mod record;

pub use amount::*;
pub use ledger::*;
pub use record::*;
