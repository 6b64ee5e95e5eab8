//! Per-tick positional correction of a moving shape against a group.

use super::{record::RecordKey, world::CollisionWorld, GroupId, Handle};
use crate::{
    error::CollisionError,
    narrow::{CollideType, Shape},
    Vec2,
};
use log::{debug, trace, warn};

impl<G: GroupId, T> CollisionWorld<G, T> {
    /// Returns where `shape` should end up after moving by `vel` this tick without
    /// penetrating any record of `group`.
    ///
    /// Records are visited in registration order, each one clamping the tentative
    /// position before the next is tested. Against each record a probe marches from the
    /// pre-move position along the direction of travel in unit steps; once the probe
    /// collides, the tentative position is pulled back to the probe's last free step.
    /// The result is only as precise as the unit step.
    ///
    /// Fails with `CollisionError::MarchLimit` if the configured march limit is reached.
    pub fn resolve_motion(
        &self,
        shape: &Shape,
        group: G,
        vel: Vec2,
        ty: CollideType,
    ) -> Result<Vec2, CollisionError> {
        self.march(shape, group, vel, ty, None)
    }

    /// Resolves the motion of `handle`'s own shape against `against`, ignoring the record
    /// itself, and stores the corrected position back into the record.
    pub fn advance(
        &mut self,
        handle: &Handle<G>,
        against: G,
        vel: Vec2,
        ty: CollideType,
    ) -> Result<Vec2, CollisionError> {
        let shape = *self.shape(handle)?;
        let pos = self.march(&shape, against, vel, ty, Some(handle.key))?;
        self.set_position(handle, pos)?;
        Ok(pos)
    }

    fn march(
        &self,
        shape: &Shape,
        group: G,
        vel: Vec2,
        ty: CollideType,
        exclude: Option<RecordKey>,
    ) -> Result<Vec2, CollisionError> {
        if vel == Vec2::ZERO {
            return Ok(shape.pos());
        }

        let mut trial = shape.translate(vel);
        let mut probe = *shape;
        let unit = vel.normalize();
        let limit = self.config.march_limit;

        for (key, record) in self.candidates(group) {
            if Some(key) == exclude {
                continue;
            }

            let mut steps = 0u32;
            while trial.shape_test(&record.shape, ty) {
                if let Some(limit) = limit {
                    if steps >= limit {
                        warn!(
                            "gave up correcting {:?} against {:?} in {:?} after {} steps",
                            shape.kind(),
                            record.shape.kind(),
                            group,
                            steps
                        );
                        return Err(CollisionError::MarchLimit { limit });
                    }
                }
                steps += 1;

                if !probe.shape_test(&record.shape, ty) {
                    probe.set_pos(probe.pos() + unit);
                } else {
                    // step back to the last free position and clamp there
                    probe.set_pos(probe.pos() - unit);
                    trial.set_pos(probe.pos());
                }
            }
            if steps > 0 {
                trace!(
                    "corrected against {:?} in {} steps, now at {:?}",
                    record.shape.kind(),
                    steps,
                    trial.pos()
                );
            }
        }

        let pos = trial.pos();
        if pos != shape.pos() + vel {
            debug!(
                "{:?} motion in {:?} clamped from {:?} to {:?}",
                shape.kind(),
                group,
                shape.pos() + vel,
                pos
            );
        }
        Ok(pos)
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        broad::{CollisionWorld, WorldConfig},
        error::CollisionError,
        narrow::{CollideType, Point, Rect, Shape},
        Vec2,
    };
    use approx::assert_abs_diff_eq;

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    enum Group {
        Faller,
        Wall,
    }

    const ALL: CollideType = CollideType::All;

    fn init() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn floor_world(config: WorldConfig) -> CollisionWorld<Group, &'static str> {
        let mut world = CollisionWorld::with_config(config);
        world.register(Group::Wall, "floor", Rect::new(0.0, 25.0, 10.0, 10.0));
        world
    }

    #[test]
    fn zero_velocity_is_a_no_op() {
        let world = floor_world(WorldConfig::default());
        let shape = Shape::from(Rect::new(10.0, 10.0, 5.0, 5.0));

        let pos = world.resolve_motion(&shape, Group::Wall, Vec2::ZERO, ALL);
        assert_eq!(pos, Ok(Vec2::new(10.0, 10.0)));
    }

    #[test]
    fn empty_group_applies_full_translation() {
        init();
        let world: CollisionWorld<Group, ()> = CollisionWorld::new();
        let faller = Shape::from(Rect::new(100.0, -50.0, 20.0, 35.0));

        let pos = world.resolve_motion(&faller, Group::Faller, Vec2::new(0.0, 60.0), ALL);
        assert_eq!(pos, Ok(Vec2::new(100.0, 10.0)));
    }

    #[test]
    fn stops_at_last_free_step_before_obstacle() {
        init();
        let world = floor_world(WorldConfig::default());
        let shape = Shape::from(Rect::new(0.0, 0.0, 10.0, 10.0));

        let first = world.resolve_motion(&shape, Group::Wall, Vec2::new(0.0, 20.0), ALL);
        let second = world.resolve_motion(&shape, Group::Wall, Vec2::new(0.0, 20.0), ALL);

        // the bottom edge touches the floor (inclusive) at y = 15, one step back is free
        assert_eq!(first, Ok(Vec2::new(0.0, 14.0)));
        assert_eq!(first, second);
    }

    #[test]
    fn misses_leave_motion_untouched() {
        let mut world = CollisionWorld::new();
        world.register(Group::Wall, (), Rect::new(40.0, 0.0, 10.0, 10.0));
        let shape = Shape::from(Rect::new(0.0, 0.0, 10.0, 10.0));

        let pos = world.resolve_motion(&shape, Group::Wall, Vec2::new(0.0, 20.0), ALL).unwrap();
        assert_abs_diff_eq!(pos, Vec2::new(0.0, 20.0));
    }

    #[test]
    fn earlier_records_clamp_before_later_ones() {
        let mut world = CollisionWorld::new();
        world.register(Group::Wall, "far", Rect::new(30.0, 0.0, 5.0, 10.0));
        world.register(Group::Wall, "near", Rect::new(20.0, 0.0, 5.0, 10.0));
        let shape = Shape::from(Rect::new(0.0, 0.0, 10.0, 10.0));

        // "far" clamps to x = 19, where "near" already collides;
        // the shared probe then backs off to x = 9
        let pos = world.resolve_motion(&shape, Group::Wall, Vec2::new(30.0, 0.0), ALL).unwrap();
        assert_abs_diff_eq!(pos, Vec2::new(9.0, 0.0));

        let landed = Shape::from(Rect::new(pos.x, pos.y, 10.0, 10.0));
        assert!(!world.any_collides(&landed, Group::Wall, ALL));
    }

    #[test]
    fn march_limit_is_reported() {
        let world = floor_world(WorldConfig::default().with_march_limit(Some(3)));
        let shape = Shape::from(Rect::new(0.0, 0.0, 10.0, 10.0));

        assert_eq!(
            world.resolve_motion(&shape, Group::Wall, Vec2::new(0.0, 20.0), ALL),
            Err(CollisionError::MarchLimit { limit: 3 })
        );
    }

    #[test]
    fn uncapped_world_resolves_like_the_default() {
        init();
        let config = WorldConfig::default().with_march_limit(None);
        let world = floor_world(config);
        let shape = Shape::from(Rect::new(0.0, 0.0, 10.0, 10.0));

        assert_eq!(world.config().march_limit, None);
        assert_eq!(
            world.resolve_motion(&shape, Group::Wall, Vec2::new(0.0, 20.0), ALL),
            Ok(Vec2::new(0.0, 14.0))
        );
        // a long fall marches over a thousand steps before reaching the floor
        let high = Shape::from(Rect::new(0.0, -1000.0, 10.0, 10.0));
        assert_eq!(
            world.resolve_motion(&high, Group::Wall, Vec2::new(0.0, 1020.0), ALL),
            Ok(Vec2::new(0.0, 14.0))
        );
    }

    #[test]
    fn disabled_records_block_unless_skipped() {
        for &skip in [false, true].iter() {
            let config = WorldConfig::default().with_skip_disabled(skip);
            let mut world = CollisionWorld::with_config(config);
            let floor = world.register(Group::Wall, (), Rect::new(0.0, 25.0, 10.0, 10.0));
            world.set_enabled(&floor, false).unwrap();
            let shape = Shape::from(Rect::new(0.0, 0.0, 10.0, 10.0));

            let expected = if skip { Vec2::new(0.0, 20.0) } else { Vec2::new(0.0, 14.0) };
            let pos = world.resolve_motion(&shape, Group::Wall, Vec2::new(0.0, 20.0), ALL);
            assert_eq!(pos, Ok(expected));
        }
    }

    #[test]
    fn advance_moves_the_record_and_skips_itself() {
        init();
        let mut world = CollisionWorld::new();
        let dude = world.register(Group::Wall, "dude", Rect::new(0.0, 0.0, 10.0, 10.0));
        world.register(Group::Wall, "floor", Rect::new(0.0, 25.0, 10.0, 10.0));
        let click = world.register(Group::Faller, "click", Point::new(5.0, 100.0));

        let pos = world.advance(&dude, Group::Wall, Vec2::new(0.0, 20.0), ALL);
        assert_eq!(pos, Ok(Vec2::new(0.0, 14.0)));
        assert_eq!(world.shape(&dude).map(Shape::pos), Ok(Vec2::new(0.0, 14.0)));

        let pos = world.advance(&dude, Group::Faller, Vec2::new(0.0, 3.0), ALL);
        assert_eq!(pos, Ok(Vec2::new(0.0, 17.0)));

        world.unregister(dude).unwrap();
        let pos = world.advance(&dude, Group::Wall, Vec2::new(0.0, 1.0), ALL);
        assert_eq!(pos, Err(CollisionError::StaleHandle));
        assert!(world.contains(&click));
    }
}
