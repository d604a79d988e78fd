//! Lista de recência sobre uma arena de nós.
//!
//! Os nós vivem em um `Vec` e se ligam por índices. Slots liberados vão
//! para uma free list e são reutilizados, então inserções em regime
//! estável não alocam.

/// Índice de um nó dentro da arena.
pub(crate) type NodeIndex = usize;

#[derive(Debug)]
struct Node<K, V> {
    key: K,
    value: V,
    /// Vizinho mais recente.
    prev: Option<NodeIndex>,
    /// Vizinho menos recente.
    next: Option<NodeIndex>,
}

/// Lista duplamente ligada ordenada do mais recente (frente) ao menos
/// recente (fundo).
#[derive(Debug)]
pub(crate) struct RecencyList<K, V> {
    slots: Vec<Option<Node<K, V>>>,
    free: Vec<NodeIndex>,
    head: Option<NodeIndex>,
    tail: Option<NodeIndex>,
    len: usize,
}

impl<K, V> RecencyList<K, V> {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            free: Vec::new(),
            head: None,
            tail: None,
            len: 0,
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.len
    }

    /// Insere na frente e retorna o índice do novo nó.
    pub(crate) fn push_front(&mut self, key: K, value: V) -> NodeIndex {
        let node = Node {
            key,
            value,
            prev: None,
            next: None,
        };

        let idx = match self.free.pop() {
            Some(idx) => {
                self.slots[idx] = Some(node);
                idx
            }
            None => {
                self.slots.push(Some(node));
                self.slots.len() - 1
            }
        };

        self.link_front(idx);
        self.len += 1;
        idx
    }

    /// Move um nó existente para a frente.
    pub(crate) fn move_to_front(&mut self, idx: NodeIndex) {
        if self.head == Some(idx) {
            return;
        }
        self.unlink(idx);
        self.link_front(idx);
    }

    /// Remove o nó do fundo (menos recente).
    pub(crate) fn pop_back(&mut self) -> Option<(K, V)> {
        let idx = self.tail?;
        self.unlink(idx);
        let node = self.slots[idx].take()?;
        self.free.push(idx);
        self.len -= 1;
        Some((node.key, node.value))
    }

    /// Valor de um nó ocupado; `idx` deve vir do índice do cache.
    pub(crate) fn value(&self, idx: NodeIndex) -> &V {
        &self.node(idx).value
    }

    pub(crate) fn value_mut(&mut self, idx: NodeIndex) -> &mut V {
        &mut self.node_mut(idx).value
    }

    /// Esvazia a lista e libera a arena.
    pub(crate) fn clear(&mut self) {
        self.slots.clear();
        self.free.clear();
        self.head = None;
        self.tail = None;
        self.len = 0;
    }

    /// Chaves da frente para o fundo.
    #[cfg(test)]
    pub(crate) fn keys(&self) -> Keys<'_, K, V> {
        Keys {
            list: self,
            cursor: self.head,
        }
    }

    /// Total de slots alocados na arena (ocupados ou livres).
    #[cfg(test)]
    pub(crate) fn allocated(&self) -> usize {
        self.slots.len()
    }

    fn node(&self, idx: NodeIndex) -> &Node<K, V> {
        match &self.slots[idx] {
            Some(node) => node,
            None => unreachable!("índice {} aponta para slot livre", idx),
        }
    }

    fn node_mut(&mut self, idx: NodeIndex) -> &mut Node<K, V> {
        match &mut self.slots[idx] {
            Some(node) => node,
            None => unreachable!("índice {} aponta para slot livre", idx),
        }
    }

    fn unlink(&mut self, idx: NodeIndex) {
        let (prev, next) = {
            let node = self.node(idx);
            (node.prev, node.next)
        };

        match prev {
            Some(p) => self.node_mut(p).next = next,
            None => self.head = next,
        }
        match next {
            Some(n) => self.node_mut(n).prev = prev,
            None => self.tail = prev,
        }

        let node = self.node_mut(idx);
        node.prev = None;
        node.next = None;
    }

    fn link_front(&mut self, idx: NodeIndex) {
        let old_head = self.head;
        {
            let node = self.node_mut(idx);
            node.prev = None;
            node.next = old_head;
        }
        if let Some(h) = old_head {
            self.node_mut(h).prev = Some(idx);
        }
        self.head = Some(idx);
        if self.tail.is_none() {
            self.tail = Some(idx);
        }
    }
}

/// Iterador de chaves em ordem de recência.
#[cfg(test)]
pub(crate) struct Keys<'a, K, V> {
    list: &'a RecencyList<K, V>,
    cursor: Option<NodeIndex>,
}

#[cfg(test)]
impl<'a, K, V> Iterator for Keys<'a, K, V> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        let idx = self.cursor?;
        let list = self.list;
        let node = list.node(idx);
        self.cursor = node.next;
        Some(&node.key)
    }
}
