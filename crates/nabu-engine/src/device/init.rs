/// Initialization parameters for the GL context.
///
/// Keep this structure stable and minimal. Add configuration flags only when a
/// concrete platform requirement exists.
#[derive(Debug, Clone)]
pub struct GpuInit {
    /// Requested desktop GL version `(major, minor)`; always a core profile.
    ///
    /// Shaders shipped with the studio target `#version 330 core`.
    pub gl_version: (u8, u8),

    /// Synchronize buffer swaps with the display refresh.
    pub vsync: bool,

    /// Preferred MSAA sample count. The closest supported config is used.
    pub samples: u8,
}

impl Default for GpuInit {
    fn default() -> Self {
        Self {
            gl_version: (3, 3),
            vsync: true,
            samples: 0,
        }
    }
}
