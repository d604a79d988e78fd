//! Validação de chaves do cache.

use std::borrow::Cow;
use std::rc::Rc;
use std::sync::Arc;

/// Chave aceita pelo [`LruCache`](super::LruCache).
///
/// Chaves textuais vazias ou compostas apenas de espaços são rejeitadas
/// com `InvalidKey`. Chaves numéricas nunca são vazias.
pub trait CacheKey {
    /// Retorna `true` se a chave deve ser rejeitada.
    fn is_blank(&self) -> bool;
}

impl CacheKey for str {
    fn is_blank(&self) -> bool {
        self.trim().is_empty()
    }
}

impl CacheKey for String {
    fn is_blank(&self) -> bool {
        self.as_str().is_blank()
    }
}

impl CacheKey for Box<str> {
    fn is_blank(&self) -> bool {
        (**self).is_blank()
    }
}

impl CacheKey for Arc<str> {
    fn is_blank(&self) -> bool {
        (**self).is_blank()
    }
}

impl CacheKey for Rc<str> {
    fn is_blank(&self) -> bool {
        (**self).is_blank()
    }
}

impl CacheKey for Cow<'_, str> {
    fn is_blank(&self) -> bool {
        self.as_ref().is_blank()
    }
}

impl<T: CacheKey + ?Sized> CacheKey for &T {
    fn is_blank(&self) -> bool {
        (**self).is_blank()
    }
}

macro_rules! never_blank {
    ($($t:ty),* $(,)?) => {
        $(
            impl CacheKey for $t {
                #[inline]
                fn is_blank(&self) -> bool {
                    false
                }
            }
        )*
    };
}

never_blank!(u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize, char, bool);
