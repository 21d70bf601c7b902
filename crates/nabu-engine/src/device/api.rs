use std::num::NonZeroU32;

/// Opaque GPU object name (buffer, vertex array, shader, program, texture).
///
/// GL reserves `0` for "no object", so a live handle is always non-zero and
/// "unbind" is expressed as `None`.
pub type RawHandle = NonZeroU32;

/// Resolved uniform location inside one linked program.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct UniformLocation(pub u32);

/// The slice of OpenGL 3.3 core this engine talks to.
///
/// Enumerations are plain `glow` constants (`glow::ARRAY_BUFFER`,
/// `glow::FLOAT`, ...). Implementations do not check errors themselves; every
/// call is expected to go through [`Gpu::call`](super::Gpu::call), which
/// drains and polls `glGetError` around it.
///
/// All methods take `&self`: GL state is global to the current context and the
/// engine is single-threaded.
pub trait GlApi {
    fn get_error(&self) -> u32;

    // ── buffers ───────────────────────────────────────────────────────────
    fn create_buffer(&self) -> Result<RawHandle, String>;
    fn delete_buffer(&self, buffer: RawHandle);
    fn bind_buffer(&self, target: u32, buffer: Option<RawHandle>);
    fn buffer_data(&self, target: u32, data: &[u8], usage: u32);

    // ── vertex arrays ─────────────────────────────────────────────────────
    fn create_vertex_array(&self) -> Result<RawHandle, String>;
    fn delete_vertex_array(&self, vertex_array: RawHandle);
    fn bind_vertex_array(&self, vertex_array: Option<RawHandle>);
    fn enable_vertex_attrib_array(&self, index: u32);
    fn vertex_attrib_pointer(
        &self,
        index: u32,
        size: i32,
        data_type: u32,
        normalized: bool,
        stride: i32,
        offset: i32,
    );

    // ── shaders & programs ────────────────────────────────────────────────
    fn create_shader(&self, stage: u32) -> Result<RawHandle, String>;
    fn shader_source(&self, shader: RawHandle, source: &str);
    fn compile_shader(&self, shader: RawHandle);
    fn shader_compile_status(&self, shader: RawHandle) -> bool;
    fn shader_info_log(&self, shader: RawHandle) -> String;
    fn delete_shader(&self, shader: RawHandle);

    fn create_program(&self) -> Result<RawHandle, String>;
    fn attach_shader(&self, program: RawHandle, shader: RawHandle);
    fn link_program(&self, program: RawHandle);
    fn program_link_status(&self, program: RawHandle) -> bool;
    fn validate_program(&self, program: RawHandle);
    fn program_validate_status(&self, program: RawHandle) -> bool;
    fn program_info_log(&self, program: RawHandle) -> String;
    fn use_program(&self, program: Option<RawHandle>);
    fn delete_program(&self, program: RawHandle);

    // ── uniforms ──────────────────────────────────────────────────────────
    fn uniform_location(&self, program: RawHandle, name: &str) -> Option<UniformLocation>;
    fn uniform_1_i32(&self, location: Option<UniformLocation>, value: i32);
    fn uniform_1_f32(&self, location: Option<UniformLocation>, value: f32);
    fn uniform_4_f32(&self, location: Option<UniformLocation>, values: [f32; 4]);
    /// Column-major 4x4 matrix.
    fn uniform_matrix_4_f32(&self, location: Option<UniformLocation>, values: &[f32; 16]);

    // ── textures ──────────────────────────────────────────────────────────
    fn create_texture(&self) -> Result<RawHandle, String>;
    fn delete_texture(&self, texture: RawHandle);
    fn active_texture(&self, unit: u32);
    fn bind_texture(&self, target: u32, texture: Option<RawHandle>);
    fn tex_parameter_i32(&self, target: u32, parameter: u32, value: i32);
    /// Uploads level 0 of a tightly packed RGBA8 image.
    fn tex_image_2d_rgba8(&self, target: u32, width: i32, height: i32, pixels: Option<&[u8]>);

    // ── frame state & draws ───────────────────────────────────────────────
    fn clear_color(&self, rgba: [f32; 4]);
    fn clear(&self, mask: u32);
    fn enable(&self, capability: u32);
    fn blend_func(&self, src: u32, dst: u32);
    fn viewport(&self, x: i32, y: i32, width: i32, height: i32);
    fn draw_elements(&self, mode: u32, count: i32, index_type: u32, offset: i32);
}
