//! Content-addressed local cache keyed by `(namespace, key)`.
//!
//! Each entry is one file at `<root>/<namespace>/<key>` holding exactly the
//! bytes last written for it. Entries never expire.

mod error;
mod store;

pub use error::{CacheError, CacheResult};
pub use store::CacheStore;
