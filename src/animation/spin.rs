//! Per-frame spin applied to an already generated tree
//!
//! Each tick turns every group a little further about its own growth axis.
//! Besides grafts, this is the only change a node sees after generation. There is no
//! background task: the host stops the animation by not calling `tick`.

use crate::scene::Container;

#[derive(Debug, Clone)]
pub struct SpinAnimation {
    /// Full-speed spin in radians per second
    pub speed: f32,
    /// Seconds to ease from rest up to full speed
    pub ramp: f32,
    elapsed: f32,
}

impl Default for SpinAnimation {
    fn default() -> Self {
        Self {
            speed: 0.2,
            ramp: 1.5,
            elapsed: 0.0,
        }
    }
}

impl SpinAnimation {
    pub fn new(speed: f32) -> Self {
        Self {
            speed,
            ..Default::default()
        }
    }

    /// Start the ramp over, e.g. after the host toggles animation back on
    pub fn reset(&mut self) {
        self.elapsed = 0.0;
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    /// Rotation increment for a frame of `dt` seconds
    pub fn step(&mut self, dt: f32) -> f32 {
        let dt = dt.max(0.0);
        self.elapsed += dt;
        let ramp = if self.ramp > 0.0 {
            ease_in(self.elapsed / self.ramp)
        } else {
            1.0
        };
        self.speed * ramp * dt
    }

    /// Advance one frame, returning the increment applied to every group
    pub fn tick(&mut self, dt: f32, containers: &mut [&mut Container]) -> f32 {
        let increment = self.step(dt);
        if increment != 0.0 {
            for container in containers.iter_mut() {
                container.for_each_node_mut(&mut |node| node.transform.rotation.y += increment);
            }
        }
        increment
    }
}

/// Quadratic ramp from rest, `t` clamped to [0, 1]
fn ease_in(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    t * t
}
