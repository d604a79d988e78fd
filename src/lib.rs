//! # recache
//!
//! Cache chave/valor em memória, com capacidade fixa e eviction LRU,
//! seguro para uso concorrente.
//!
//! ## Módulos
//!
//! - [`cache`] - Cache LRU e validação de chaves
//! - [`replay`] - Scripts de operações aplicados a um cache
//! - [`cli`] - Interface de linha de comando
//! - [`types`] - Tipos compartilhados (configuração e erros)

pub mod cache;
#[cfg(feature = "cli")]
pub mod cli;
pub mod replay;
pub mod types;

pub use cache::{CacheKey, LruCache, SharedCache};
pub use types::config::Config;
pub use types::errors::{CacheError, CacheResult};
