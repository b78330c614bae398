//! Session module
//!
//! The logged-in identity lives in an explicit session object owned by a
//! store. Views read it once when they start and write it back whenever
//! they change it.

mod file_store;
mod memory_store;
mod model;
mod store;

pub use file_store::FileSessionStore;
pub use memory_store::MemorySessionStore;
pub use model::Session;
pub use store::SessionStore;
