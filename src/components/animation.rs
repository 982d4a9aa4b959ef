use bevy_ecs::prelude::Component;
use serde::{Deserialize, Serialize};

/// Per-tick cursor advance shared by the player and enemies.
pub const ANIMATION_SPEED: f32 = 0.15;

/// Playback state of a frame track.
///
/// `cursor` is fractional; the discrete frame is its integer part. The
/// backing texture only needs refreshing when [`Animation::advance`] reports
/// a new frame.
#[derive(Debug, Clone, Component, Serialize, Deserialize)]
pub struct Animation {
    pub key: String,
    pub cursor: f32,
    /// Frame currently shown, `None` until the first advance on this track.
    pub frame: Option<usize>,
    pub speed: f32,
}

impl Animation {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            cursor: 0.0,
            frame: None,
            speed: ANIMATION_SPEED,
        }
    }

    /// Advances the cursor by one tick over a track of `frame_count` frames.
    ///
    /// Returns the new frame index when the integer frame changed, `None`
    /// otherwise. A track without frames never reports a frame.
    pub fn advance(&mut self, frame_count: usize) -> Option<usize> {
        self.cursor += self.speed;
        if frame_count == 0 {
            self.cursor = 0.0;
            return None;
        }
        if self.cursor >= frame_count as f32 {
            self.cursor = 0.0;
        }
        let index = self.cursor as usize;
        if self.frame == Some(index) {
            None
        } else {
            self.frame = Some(index);
            Some(index)
        }
    }

    /// Switches track. The cursor keeps running; the shown frame is
    /// invalidated so the next advance refreshes the texture.
    pub fn set_key(&mut self, key: &str) {
        if self.key != key {
            self.key.clear();
            self.key.push_str(key);
            self.frame = None;
        }
    }

    /// Back to frame zero, forcing a refresh on the next advance.
    pub fn restart(&mut self) {
        self.cursor = 0.0;
        self.frame = None;
    }

    pub fn on_last_frame(&self, frame_count: usize) -> bool {
        frame_count > 0 && self.frame == Some(frame_count - 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frame_changes_only_on_integer_step() {
        let mut anim = Animation::new("down_idle");
        anim.speed = 0.25;
        assert_eq!(anim.advance(4), Some(0));
        assert_eq!(anim.advance(4), None);
        assert_eq!(anim.advance(4), None);
        assert_eq!(anim.advance(4), Some(1));
    }

    #[test]
    fn cursor_wraps_at_frame_count() {
        let mut anim = Animation::new("squid/move");
        anim.speed = 0.5;
        let frames: Vec<_> = (0..6).map(|_| anim.advance(2)).collect();
        assert_eq!(frames, vec![Some(0), Some(1), None, Some(0), None, Some(1)]);
        assert!(anim.on_last_frame(2));
    }

    #[test]
    fn empty_track_never_reports_a_frame() {
        let mut anim = Animation::new("missing");
        for _ in 0..10 {
            assert_eq!(anim.advance(0), None);
        }
        assert!(!anim.on_last_frame(0));
    }

    #[test]
    fn track_switch_forces_refresh() {
        let mut anim = Animation::new("down");
        anim.speed = 0.5;
        anim.advance(4);
        assert_eq!(anim.frame, Some(0));
        anim.set_key("down_attack");
        assert_eq!(anim.advance(4), Some(1));
        anim.restart();
        assert_eq!(anim.cursor, 0.0);
        assert_eq!(anim.advance(4), Some(0));
    }
}
