//! Slot arena for tree nodes.

/// Slot number of a node in the arena.
pub(crate) type NodeId = usize;

/// A tree node. Children are slot numbers, never references.
#[derive(Debug, Clone)]
pub(crate) struct Node<K, V> {
    pub(crate) key: K,
    pub(crate) value: V,
    pub(crate) left: Option<NodeId>,
    pub(crate) right: Option<NodeId>,
}

impl<K, V> Node<K, V> {
    pub(crate) fn leaf(key: K, value: V) -> Self {
        Self {
            key,
            value,
            left: None,
            right: None,
        }
    }
}

/// Contiguous node storage. Released slots are recycled by later
/// allocations, so slot numbers are only meaningful while the node is live.
#[derive(Debug, Clone)]
pub(crate) struct NodeArena<K, V> {
    slots: Vec<Option<Node<K, V>>>,
    free: Vec<NodeId>,
    live: usize,
}

impl<K, V> NodeArena<K, V> {
    pub(crate) fn new() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
            live: 0,
        }
    }

    /// Stores a node and returns its slot.
    pub(crate) fn allocate(&mut self, node: Node<K, V>) -> NodeId {
        self.live += 1;
        match self.free.pop() {
            Some(id) => {
                self.slots[id] = Some(node);
                id
            }
            None => {
                self.slots.push(Some(node));
                self.slots.len() - 1
            }
        }
    }

    /// Removes a node from its slot and makes the slot reusable.
    pub(crate) fn release(&mut self, id: NodeId) -> Node<K, V> {
        let node = self.slots[id]
            .take()
            .expect("released a node slot that was already free");
        self.free.push(id);
        self.live -= 1;
        node
    }

    #[inline]
    pub(crate) fn node(&self, id: NodeId) -> &Node<K, V> {
        self.slots[id]
            .as_ref()
            .expect("tree link points at a free node slot")
    }

    #[inline]
    pub(crate) fn node_mut(&mut self, id: NodeId) -> &mut Node<K, V> {
        self.slots[id]
            .as_mut()
            .expect("tree link points at a free node slot")
    }

    /// Number of live nodes.
    pub(crate) fn len(&self) -> usize {
        self.live
    }

    /// Number of slots ever allocated, live or free.
    pub(crate) fn capacity(&self) -> usize {
        self.slots.len()
    }
}
