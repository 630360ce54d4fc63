#[path = "1-order.rs"]
mod order;

#[path = "2-record.rs"]
mod record;

#[path = "3-envelope.rs"]
mod envelope;

#[path = "4-collection.rs"]
mod collection;

#[path = "5-session.rs"]
mod session;

pub use collection::*;
pub use envelope::SCHEMA_VERSION;
pub use record::*;
pub use session::*;
