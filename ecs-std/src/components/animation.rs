use ember_core::scene::SceneAnimation;

/// Maximum bone matrices the animation vertex shader accepts.
pub const MAX_BONES: usize = 128;

/// Plays one scene animation on a skinned mesh.
#[derive(Debug, Clone, PartialEq)]
pub struct Animation {
    /// Index into the scene animation table.
    pub animation: usize,
    /// Duration in ticks.
    pub duration: f32,
    pub ticks_per_second: f32,
    pub track_count: usize,
    /// Playback position in seconds.
    pub time: f32,
    pub bone_matrices: Vec<glam::Mat4>,
}

impl Animation {
    pub fn new(animation: usize, data: &SceneAnimation) -> Self {
        Self {
            animation,
            duration: data.duration,
            ticks_per_second: data.ticks_per_second,
            track_count: data.tracks.len(),
            time: 0.0,
            bone_matrices: vec![glam::Mat4::IDENTITY; MAX_BONES],
        }
    }

    pub fn duration_seconds(&self) -> f32 {
        if self.ticks_per_second > 0.0 {
            self.duration / self.ticks_per_second
        } else {
            self.duration
        }
    }

    /// Advance playback, wrapping at the end of the clip.
    pub fn advance(&mut self, seconds: f32) {
        let length = self.duration_seconds();
        self.time = if length > 0.0 {
            (self.time + seconds).rem_euclid(length)
        } else {
            0.0
        };
    }
}
