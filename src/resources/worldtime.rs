use bevy_ecs::prelude::Resource;

/// Simulation clock in seconds. Cooldowns compare against `elapsed`.
#[derive(Resource, Clone, Copy, Debug)]
pub struct WorldTime {
    pub elapsed: f32,
    pub delta: f32,
    pub time_scale: f32,
    pub frame_count: u64,
}

impl Default for WorldTime {
    fn default() -> Self {
        WorldTime {
            elapsed: 0.0,
            delta: 0.0,
            time_scale: 1.0,
            frame_count: 0,
        }
    }
}

impl WorldTime {
    /// Advances the clock by `dt` real seconds.
    pub fn advance(&mut self, dt: f32) {
        let scaled = dt * self.time_scale;
        self.delta = scaled;
        self.elapsed += scaled;
        self.frame_count += 1;
    }
}
