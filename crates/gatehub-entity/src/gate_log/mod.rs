//! Entry/exit log domain entities.

pub mod key;
pub mod kind;
pub mod model;

pub use key::NaturalKey;
pub use kind::{Direction, EntryType};
pub use model::{EntryExitLog, GateLogSubmission, NewEntryExitLog};
