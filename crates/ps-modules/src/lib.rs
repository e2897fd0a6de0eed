//! The PS module loader.
//!
//! A module is a document whose mapping body names its exports. Loading is
//! suspending end to end: fetching goes through a host-supplied
//! [`ModuleHost`], dependencies load recursively with the importing module's
//! URL as the resolution base, and bindings evaluate strictly in source
//! order against the symbols accumulated so far. Dropping the load future
//! cancels the whole load, discarding any half-built symbol table.

mod error;
mod host;
mod loader;

pub use error::LoadError;
pub use host::{FsHost, ModuleHost};
pub use loader::{load, Module};
