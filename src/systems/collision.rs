//! Axis-separated collision resolution against static obstacles.
//!
//! Movers translate their hitbox one axis at a time and resolve after each
//! step, so the x pass never needs the y overlap and vice versa.
//!
//! Resolution is overlap-based: for each obstacle still intersecting the
//! hitbox, the hitbox is pushed out along the current axis by the smaller of
//! the two edge overhangs (ties push toward negative coordinates). Obstacles
//! are visited nearest first, by squared distance between hitbox centers,
//! keeping group order for equal distances.

use bevy_ecs::prelude::Entity;

use crate::components::boxcollider::BoxCollider;
use crate::geometry::{Axis, Rect};
use crate::resources::group::SpriteGroup;

/// Pushes `hitbox` out of every overlapping obstacle along `axis`.
///
/// Returns `true` if the hitbox moved.
pub fn resolve_axis(hitbox: &mut Rect, axis: Axis, obstacles: &[Rect]) -> bool {
    let center = hitbox.center();
    let mut order: Vec<(f32, &Rect)> = obstacles
        .iter()
        .map(|o| ((o.center() - center).length_sqr(), o))
        .collect();
    order.sort_by(|a, b| a.0.total_cmp(&b.0));

    let mut moved = false;
    for (_, obstacle) in order {
        if !hitbox.intersects(obstacle) {
            continue;
        }
        match axis {
            Axis::X => {
                let back = hitbox.right() - obstacle.left();
                let forward = obstacle.right() - hitbox.left();
                if back <= forward {
                    hitbox.x -= back;
                } else {
                    hitbox.x += forward;
                }
            }
            Axis::Y => {
                let back = hitbox.bottom() - obstacle.top();
                let forward = obstacle.bottom() - hitbox.top();
                if back <= forward {
                    hitbox.y -= back;
                } else {
                    hitbox.y += forward;
                }
            }
        }
        moved = true;
    }
    moved
}

/// Moves a collider by `(dx, dy)`: x first, then y, resolving after each
/// axis, then re-centers the visual rect on the hitbox.
pub fn move_and_collide(collider: &mut BoxCollider, dx: i32, dy: i32, obstacles: &[Rect]) {
    collider.translate_hitbox(dx, 0);
    resolve_axis(&mut collider.hitbox, Axis::X, obstacles);
    collider.translate_hitbox(0, dy);
    resolve_axis(&mut collider.hitbox, Axis::Y, obstacles);
    collider.center_rect_on_hitbox();
}

/// Hitboxes of the members of `group` for which `hitbox_of` resolves one.
pub fn group_hitboxes(
    group: &SpriteGroup,
    hitbox_of: impl Fn(Entity) -> Option<Rect>,
) -> Vec<Rect> {
    group.iter().filter_map(hitbox_of).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::boxcollider::CHARACTER_INSET_Y;

    #[test]
    fn x_overlap_is_pushed_back_by_the_smaller_overhang() {
        let wall = Rect::new(100, 0, 64, 64);
        let mut hitbox = Rect::new(40, 0, 64, 64);
        assert!(resolve_axis(&mut hitbox, Axis::X, &[wall]));
        assert_eq!(hitbox.x, 36);
        assert!(!hitbox.intersects(&wall));

        let mut from_right = Rect::new(160, 0, 64, 64);
        resolve_axis(&mut from_right, Axis::X, &[wall]);
        assert_eq!(from_right.x, 164);
    }

    #[test]
    fn resolution_never_touches_the_other_axis() {
        let wall = Rect::new(0, 100, 64, 64);
        let mut hitbox = Rect::new(10, 90, 64, 64);
        resolve_axis(&mut hitbox, Axis::Y, &[wall]);
        assert_eq!((hitbox.x, hitbox.y), (10, 36));
    }

    #[test]
    fn equal_overhangs_push_negative() {
        let wall = Rect::new(0, 0, 64, 64);
        let mut hitbox = Rect::new(0, 0, 64, 64);
        resolve_axis(&mut hitbox, Axis::X, &[wall]);
        assert_eq!(hitbox.x, -64);
    }

    #[test]
    fn touching_is_not_a_collision() {
        let wall = Rect::new(64, 0, 64, 64);
        let mut hitbox = Rect::new(0, 0, 64, 64);
        assert!(!resolve_axis(&mut hitbox, Axis::X, &[wall]));
        assert_eq!(hitbox.x, 0);
    }

    #[test]
    fn obstacle_order_does_not_change_the_outcome() {
        let near = Rect::new(40, 0, 64, 64);
        let far = Rect::new(60, 0, 64, 64);
        let mut a = Rect::new(0, 0, 64, 64);
        let mut b = a;
        resolve_axis(&mut a, Axis::X, &[far, near]);
        resolve_axis(&mut b, Axis::X, &[near, far]);
        assert_eq!(a, b);
        assert_eq!(a.x, -24);
        assert!(!a.intersects(&near));
        assert!(!a.intersects(&far));
    }

    #[test]
    fn mover_slides_along_a_wall() {
        let wall = Rect::new(0, 64, 320, 64);
        let mut collider = BoxCollider::inset(Rect::new(0, 0, 64, 64), CHARACTER_INSET_Y);
        // hitbox bottom sits at 54; moving 5 right and 15 down hits the wall
        move_and_collide(&mut collider, 5, 15, &[wall]);
        assert_eq!(collider.hitbox.x, 5);
        assert_eq!(collider.hitbox.bottom(), 64);
        assert!(!collider.hitbox.intersects(&wall));
        assert!(collider.rect.contains_rect(&collider.hitbox));
    }
}
