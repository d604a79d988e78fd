//! Cache LRU com capacidade fixa e seguro para uso entre threads.

use std::borrow::Borrow;
use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;
use std::sync::Arc;

use parking_lot::Mutex;

use super::key::CacheKey;
use super::list::{NodeIndex, RecencyList};
use crate::types::config::CacheConfig;
use crate::{CacheError, CacheResult};

/// Handle compartilhado para um cache único entre vários consumidores.
pub type SharedCache<K, V> = Arc<LruCache<K, V>>;

/// Índice e lista de recência; só são acessados juntos, sob o mesmo lock.
struct Inner<K, V> {
    index: HashMap<K, NodeIndex>,
    order: RecencyList<K, V>,
}

/// Cache LRU limitado.
///
/// Toda operação pública adquire um único `Mutex` durante toda a seção
/// crítica, então nenhuma thread observa o índice e a lista de recência
/// fora de sincronia. `get` promove a chave encontrada; `set` em chave
/// nova com o cache cheio remove a entrada menos recente e devolve a
/// chave removida.
pub struct LruCache<K, V> {
    inner: Mutex<Inner<K, V>>,
    threshold: usize,
}

impl<K, V> LruCache<K, V>
where
    K: CacheKey + Eq + Hash + Clone,
{
    /// Cria um novo cache.
    ///
    /// # Argumentos
    /// - `capacity`: Número máximo de entradas (>= 1)
    pub fn new(capacity: usize) -> CacheResult<Self> {
        if capacity == 0 {
            return Err(CacheError::invalid_configuration(
                "a capacidade do cache deve ser >= 1",
            ));
        }

        tracing::debug!(capacity, "cache LRU criado");

        Ok(Self {
            inner: Mutex::new(Inner {
                index: HashMap::with_capacity(capacity),
                order: RecencyList::with_capacity(capacity),
            }),
            threshold: capacity,
        })
    }

    /// Cria um cache a partir da seção `[cache]` da configuração.
    pub fn from_config(config: &CacheConfig) -> CacheResult<Self> {
        Self::new(config.capacity()?)
    }

    /// Busca no cache, promovendo a chave se encontrada.
    ///
    /// Retorna `Ok(None)` se a chave não existe; nesse caso a ordem de
    /// recência não muda.
    pub fn get<Q>(&self, key: &Q) -> CacheResult<Option<V>>
    where
        K: Borrow<Q>,
        Q: CacheKey + Hash + Eq + ?Sized,
        V: Clone,
    {
        self.get_with(key, V::clone)
    }

    /// Como [`get`](Self::get), mas aplica `f` ao valor sob o lock em vez
    /// de cloná-lo.
    ///
    /// `f` roda com o lock do cache adquirido e não deve chamar métodos
    /// deste mesmo cache: o `Mutex` não é reentrante e a chamada trava.
    pub fn get_with<Q, R, F>(&self, key: &Q, f: F) -> CacheResult<Option<R>>
    where
        K: Borrow<Q>,
        Q: CacheKey + Hash + Eq + ?Sized,
        F: FnOnce(&V) -> R,
    {
        if key.is_blank() {
            return Err(CacheError::InvalidKey);
        }

        let mut guard = self.inner.lock();
        let inner = &mut *guard;

        let Some(&idx) = inner.index.get(key) else {
            drop(guard);
            tracing::trace!("cache miss");
            return Ok(None);
        };

        inner.order.move_to_front(idx);
        let result = f(inner.order.value(idx));
        drop(guard);

        tracing::trace!("cache hit");
        Ok(Some(result))
    }

    /// Insere ou sobrescreve uma entrada.
    ///
    /// Retorna a chave evictada, se houve eviction. Sobrescrever uma chave
    /// existente nunca evicta.
    pub fn set(&self, key: K, value: V) -> CacheResult<Option<K>> {
        if key.is_blank() {
            return Err(CacheError::InvalidKey);
        }

        let mut guard = self.inner.lock();
        let inner = &mut *guard;

        if let Some(&idx) = inner.index.get(&key) {
            *inner.order.value_mut(idx) = value;
            inner.order.move_to_front(idx);
            drop(guard);
            tracing::trace!("entrada sobrescrita");
            return Ok(None);
        }

        let evicted = if inner.order.len() >= self.threshold {
            match inner.order.pop_back() {
                Some((old_key, _)) => {
                    inner.index.remove(&old_key);
                    Some(old_key)
                }
                None => None,
            }
        } else {
            None
        };

        let idx = inner.order.push_front(key.clone(), value);
        inner.index.insert(key, idx);
        let count = inner.index.len();
        drop(guard);

        if evicted.is_some() {
            tracing::debug!(count, threshold = self.threshold, "entrada menos recente evictada");
        } else {
            tracing::trace!(count, "entrada inserida");
        }

        Ok(evicted)
    }

    /// Insere um valor que pode estar ausente.
    ///
    /// `None` é rejeitado com `InvalidValue` sem alterar o cache. A chave
    /// é validada primeiro.
    pub fn set_optional(&self, key: K, value: Option<V>) -> CacheResult<Option<K>> {
        if key.is_blank() {
            return Err(CacheError::InvalidKey);
        }
        match value {
            Some(value) => self.set(key, value),
            None => Err(CacheError::InvalidValue),
        }
    }

    /// Limpa todo o cache. A capacidade não muda.
    pub fn flush(&self) {
        let removed = {
            let mut guard = self.inner.lock();
            let removed = guard.index.len();
            guard.index.clear();
            guard.order.clear();
            removed
        };

        tracing::debug!(removed, "cache esvaziado");
    }

    /// Número atual de entradas.
    pub fn count(&self) -> usize {
        self.inner.lock().index.len()
    }

    /// Capacidade máxima, fixa desde a construção.
    pub fn threshold(&self) -> usize {
        self.threshold
    }

    pub fn is_empty(&self) -> bool {
        self.count() == 0
    }

    /// Chaves do mais recente ao menos recente.
    #[cfg(test)]
    pub(crate) fn recency_keys(&self) -> Vec<K> {
        self.inner.lock().order.keys().cloned().collect()
    }

    /// Verifica que índice e lista contêm exatamente as mesmas chaves.
    #[cfg(test)]
    pub(crate) fn assert_consistent(&self) {
        let guard = self.inner.lock();
        let keys: Vec<&K> = guard.order.keys().collect();
        assert_eq!(keys.len(), guard.index.len());
        assert_eq!(keys.len(), guard.order.len());
        assert!(keys.len() <= self.threshold);
        for key in keys {
            assert!(guard.index.contains_key(key));
        }
    }
}

impl<K, V> fmt::Debug for LruCache<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut debug = f.debug_struct("LruCache");
        // try_lock: formatar dentro de um callback de get_with não pode travar
        match self.inner.try_lock() {
            Some(guard) => debug.field("count", &guard.index.len()),
            None => debug.field("count", &format_args!("<locked>")),
        };
        debug.field("threshold", &self.threshold).finish()
    }
}
