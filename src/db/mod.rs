pub mod helpers;
pub mod memory_store;
pub mod pg_store;
pub mod store;

pub use memory_store::MemoryStore;
pub use pg_store::PgStore;
pub use store::{AppliedMatch, LogChange, RivalryStore};
