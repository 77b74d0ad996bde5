//! Named accounts whose passwords are derived on demand, never stored.

pub mod record;
pub mod registry;

pub use record::AccountRecord;
pub use registry::{AccountRegistry, OnMissing};
