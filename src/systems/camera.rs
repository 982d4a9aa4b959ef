use bevy_ecs::prelude::*;

use crate::components::boxcollider::BoxCollider;
use crate::components::player::Player;
use crate::resources::camera2d::Camera2D;

/// Keeps the camera centered on the player's rect.
pub fn camera_follow(mut camera: ResMut<Camera2D>, players: Query<&BoxCollider, With<Player>>) {
    if let Some(collider) = players.iter().next() {
        camera.center_on(collider.rect);
    }
}
