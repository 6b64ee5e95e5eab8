use super::{
    record::{Arena, Chain, RecordKey, WorldId},
    CollisionRecord, GroupId, Handle, WorldConfig,
};
use crate::{
    error::CollisionError,
    narrow::{CollideType, Shape},
    Vec2,
};
use fnv::FnvBuildHasher;
use indexmap::IndexMap;
use log::trace;

/// Registry of collision records, partitioned into groups.
///
/// Each group keeps its records in registration order, which is also the order every
/// query visits them in. Groups are created on first registration; reading a group that
/// was never written to behaves as reading an empty one.
pub struct CollisionWorld<G: GroupId, T> {
    id: WorldId,
    pub(super) config: WorldConfig,
    arena: Arena<T>,
    groups: IndexMap<G, Chain, FnvBuildHasher>,
}

impl<G: GroupId, T> CollisionWorld<G, T> {
    pub fn new() -> CollisionWorld<G, T> {
        CollisionWorld::with_config(WorldConfig::default())
    }
    pub fn with_config(config: WorldConfig) -> CollisionWorld<G, T> {
        CollisionWorld {
            id: WorldId::next(),
            config,
            arena: Arena::with_key(),
            groups: IndexMap::default(),
        }
    }

    #[inline]
    pub fn config(&self) -> &WorldConfig {
        &self.config
    }

    // ---------- Registration ---------- //

    pub fn register(&mut self, group: G, payload: T, shape: impl Into<Shape>) -> Handle<G> {
        //! Appends an enabled record to the tail of `group`, creating the group if needed.
        let shape = shape.into();
        let chain = self.groups.entry(group).or_insert_with(Chain::default);
        let key = chain.push_back(&mut self.arena, CollisionRecord::new(payload, shape));
        trace!("registered {:?} into {:?} ({} records)", shape.kind(), group, chain.len());

        Handle { world: self.id, group, key }
    }

    pub fn unregister(&mut self, handle: Handle<G>) -> Result<CollisionRecord<T>, CollisionError> {
        //! Removes the record and hands it back.
        //! Other handles and the group's order are unaffected.
        self.check(&handle)?;
        let chain = self.groups.get_mut(&handle.group).ok_or(CollisionError::StaleHandle)?;
        let record = chain.unlink(&mut self.arena, handle.key).ok_or(CollisionError::StaleHandle)?;
        trace!(
            "unregistered {:?} from {:?} ({} records)",
            record.shape.kind(),
            handle.group,
            chain.len()
        );

        Ok(record)
    }

    fn check(&self, handle: &Handle<G>) -> Result<(), CollisionError> {
        if handle.world != self.id {
            Err(CollisionError::ForeignHandle)
        } else if !self.arena.contains_key(handle.key) {
            Err(CollisionError::StaleHandle)
        } else {
            Ok(())
        }
    }

    /// Whether `handle` still refers to a live record in this world.
    pub fn contains(&self, handle: &Handle<G>) -> bool {
        self.check(handle).is_ok()
    }

    // ---------- Handle access ---------- //

    pub fn record(&self, handle: &Handle<G>) -> Result<&CollisionRecord<T>, CollisionError> {
        self.check(handle)?;
        self.arena.get(handle.key).map(|n| &n.record).ok_or(CollisionError::StaleHandle)
    }
    pub fn record_mut(
        &mut self,
        handle: &Handle<G>,
    ) -> Result<&mut CollisionRecord<T>, CollisionError> {
        self.check(handle)?;
        self.arena
            .get_mut(handle.key)
            .map(|n| &mut n.record)
            .ok_or(CollisionError::StaleHandle)
    }

    pub fn payload(&self, handle: &Handle<G>) -> Result<&T, CollisionError> {
        Ok(&self.record(handle)?.payload)
    }
    pub fn payload_mut(&mut self, handle: &Handle<G>) -> Result<&mut T, CollisionError> {
        Ok(&mut self.record_mut(handle)?.payload)
    }
    pub fn set_payload(&mut self, handle: &Handle<G>, payload: T) -> Result<T, CollisionError> {
        //! Replaces the payload, returning the previous one.
        Ok(std::mem::replace(&mut self.record_mut(handle)?.payload, payload))
    }

    pub fn shape(&self, handle: &Handle<G>) -> Result<&Shape, CollisionError> {
        Ok(&self.record(handle)?.shape)
    }
    pub fn set_shape(
        &mut self,
        handle: &Handle<G>,
        shape: impl Into<Shape>,
    ) -> Result<(), CollisionError> {
        self.record_mut(handle)?.shape = shape.into();
        Ok(())
    }
    pub fn set_position(&mut self, handle: &Handle<G>, pos: Vec2) -> Result<(), CollisionError> {
        self.record_mut(handle)?.shape.set_pos(pos);
        Ok(())
    }

    pub fn enabled(&self, handle: &Handle<G>) -> Result<bool, CollisionError> {
        Ok(self.record(handle)?.enabled)
    }
    pub fn set_enabled(&mut self, handle: &Handle<G>, enabled: bool) -> Result<(), CollisionError> {
        self.record_mut(handle)?.enabled = enabled;
        Ok(())
    }

    // ---------- Introspection ---------- //

    /// Number of records in `group`, disabled ones included.
    pub fn len(&self, group: G) -> usize {
        self.groups.get(&group).map_or(0, Chain::len)
    }
    pub fn is_empty(&self, group: G) -> bool {
        self.len(group) == 0
    }

    /// Groups that have been registered into, in order of first use.
    pub fn groups(&self) -> impl Iterator<Item = G> + '_ {
        self.groups.keys().copied()
    }

    /// All records of `group` in registration order, disabled ones included.
    pub fn records(&self, group: G) -> impl Iterator<Item = &CollisionRecord<T>> + '_ {
        self.chain(group).iter(&self.arena).map(|(_, r)| r)
    }

    fn chain(&self, group: G) -> Chain {
        self.groups.get(&group).copied().unwrap_or_default()
    }

    pub(super) fn candidates(
        &self,
        group: G,
    ) -> impl Iterator<Item = (RecordKey, &CollisionRecord<T>)> + '_ {
        //! Records that take part in queries, in registration order.
        let skip_disabled = self.config.skip_disabled;
        self.chain(group)
            .iter(&self.arena)
            .filter(move |(_, r)| r.enabled || !skip_disabled)
    }

    // ---------- Queries ---------- //

    pub fn any_collides(&self, shape: &Shape, group: G, ty: CollideType) -> bool {
        self.candidates(group).any(|(_, r)| shape.shape_test(&r.shape, ty))
    }

    pub fn first_colliding(
        &self,
        shape: &Shape,
        group: G,
        ty: CollideType,
    ) -> Option<&CollisionRecord<T>> {
        //! Returns the earliest registered record that `shape` collides with.
        self.candidates(group)
            .map(|(_, r)| r)
            .find(|r| shape.shape_test(&r.shape, ty))
    }

    pub fn all_colliding(
        &self,
        shape: &Shape,
        group: G,
        ty: CollideType,
    ) -> Vec<&CollisionRecord<T>> {
        //! Returns every record that `shape` collides with, in registration order.
        self.candidates(group)
            .map(|(_, r)| r)
            .filter(|r| shape.shape_test(&r.shape, ty))
            .collect()
    }
}

impl<G: GroupId, T> Default for CollisionWorld<G, T> {
    fn default() -> Self {
        CollisionWorld::new()
    }
}
