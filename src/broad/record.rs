use crate::narrow::Shape;
use slotmap::{new_key_type, SlotMap};
use std::sync::atomic::{AtomicU64, Ordering};

new_key_type! {
    /// Arena slot of a registered record. Removal bumps the slot's generation.
    pub(crate) struct RecordKey;
}

/// One registered collidable: caller-owned payload, its shape, and an enabled flag.
#[derive(Debug, Clone, PartialEq)]
pub struct CollisionRecord<T> {
    pub payload: T,
    pub shape: Shape,
    pub enabled: bool,
}
impl<T> CollisionRecord<T> {
    pub fn new(payload: T, shape: Shape) -> CollisionRecord<T> {
        CollisionRecord { payload, shape, enabled: true }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct WorldId(u64);
impl WorldId {
    pub(crate) fn next() -> WorldId {
        static NEXT: AtomicU64 = AtomicU64::new(0);
        WorldId(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}

/// Reference to a registered record, minted only by `CollisionWorld::register`.
///
/// Copies of a handle all refer to the same record. Once the record is unregistered every
/// copy is stale, and using one fails with `CollisionError::StaleHandle`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Handle<G> {
    pub(crate) world: WorldId,
    pub(crate) group: G,
    pub(crate) key: RecordKey,
}
impl<G: Copy> Handle<G> {
    /// The group the record was registered into.
    pub fn group(&self) -> G {
        self.group
    }
}

// ---------- Group chain ---------- //

pub(crate) struct Node<T> {
    pub record: CollisionRecord<T>,
    prev: Option<RecordKey>,
    next: Option<RecordKey>,
}

pub(crate) type Arena<T> = SlotMap<RecordKey, Node<T>>;

/// Insertion-ordered, doubly linked sequence of one group's records, threaded through the arena.
#[derive(Debug, Default, Clone, Copy)]
pub(crate) struct Chain {
    head: Option<RecordKey>,
    tail: Option<RecordKey>,
    len: usize,
}
impl Chain {
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn push_back<T>(&mut self, arena: &mut Arena<T>, record: CollisionRecord<T>) -> RecordKey {
        let key = arena.insert(Node { record, prev: self.tail, next: None });
        match self.tail {
            Some(tail) => arena[tail].next = Some(key),
            None => self.head = Some(key),
        }
        self.tail = Some(key);
        self.len += 1;
        key
    }

    pub fn unlink<T>(
        &mut self,
        arena: &mut Arena<T>,
        key: RecordKey,
    ) -> Option<CollisionRecord<T>> {
        //! Removes `key` from the arena and splices its neighbours together.
        //! `key` must belong to this chain.
        let node = arena.remove(key)?;
        match node.prev {
            Some(prev) => arena[prev].next = node.next,
            None => self.head = node.next,
        }
        match node.next {
            Some(next) => arena[next].prev = node.prev,
            None => self.tail = node.prev,
        }
        self.len -= 1;
        Some(node.record)
    }

    pub fn iter<'a, T>(&self, arena: &'a Arena<T>) -> ChainIter<'a, T> {
        ChainIter { arena, cursor: self.head, remaining: self.len }
    }
}

pub(crate) struct ChainIter<'a, T> {
    arena: &'a Arena<T>,
    cursor: Option<RecordKey>,
    remaining: usize,
}
impl<'a, T> Iterator for ChainIter<'a, T> {
    type Item = (RecordKey, &'a CollisionRecord<T>);

    fn next(&mut self) -> Option<Self::Item> {
        let key = self.cursor?;
        let arena = self.arena;
        let node = &arena[key];
        self.cursor = node.next;
        self.remaining -= 1;
        Some((key, &node.record))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}
