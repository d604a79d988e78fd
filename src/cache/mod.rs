//! Cache LRU limitado e thread-safe.
//!
//! Este módulo implementa um cache Least Recently Used (LRU) com
//! capacidade fixa. O índice de chaves e a lista de recência ficam sob um
//! único lock, então cada operação pública é atômica.

mod key;
mod list;
mod lru;

pub use key::CacheKey;
pub use lru::{LruCache, SharedCache};
