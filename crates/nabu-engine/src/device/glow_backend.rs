use std::sync::Arc;

use glow::HasContext;

use super::api::{GlApi, RawHandle, UniformLocation};

/// [`GlApi`] over a live `glow` context.
///
/// The context is shared as an `Arc` so that other GL consumers on the same
/// thread (the UI overlay painter) can hold it too.
///
/// # Safety contract
/// The wrapped context must be current on the calling thread for the whole
/// lifetime of this value. The window runtime guarantees this by creating and
/// dropping everything on the event-loop thread.
pub struct GlowBackend {
    gl: Arc<glow::Context>,
}

impl GlowBackend {
    pub fn new(gl: Arc<glow::Context>) -> Self {
        Self { gl }
    }

    pub fn context(&self) -> &Arc<glow::Context> {
        &self.gl
    }
}

fn uniform(location: Option<UniformLocation>) -> Option<glow::NativeUniformLocation> {
    location.map(|l| glow::NativeUniformLocation(l.0))
}

// SAFETY (all blocks below): the context is current (see type docs) and every
// handle passed in was produced by this same context.
impl GlApi for GlowBackend {
    fn get_error(&self) -> u32 {
        unsafe { self.gl.get_error() }
    }

    fn create_buffer(&self) -> Result<RawHandle, String> {
        unsafe { self.gl.create_buffer() }.map(|b| b.0)
    }

    fn delete_buffer(&self, buffer: RawHandle) {
        unsafe { self.gl.delete_buffer(glow::NativeBuffer(buffer)) }
    }

    fn bind_buffer(&self, target: u32, buffer: Option<RawHandle>) {
        unsafe { self.gl.bind_buffer(target, buffer.map(glow::NativeBuffer)) }
    }

    fn buffer_data(&self, target: u32, data: &[u8], usage: u32) {
        unsafe { self.gl.buffer_data_u8_slice(target, data, usage) }
    }

    fn create_vertex_array(&self) -> Result<RawHandle, String> {
        unsafe { self.gl.create_vertex_array() }.map(|v| v.0)
    }

    fn delete_vertex_array(&self, vertex_array: RawHandle) {
        unsafe { self.gl.delete_vertex_array(glow::NativeVertexArray(vertex_array)) }
    }

    fn bind_vertex_array(&self, vertex_array: Option<RawHandle>) {
        unsafe { self.gl.bind_vertex_array(vertex_array.map(glow::NativeVertexArray)) }
    }

    fn enable_vertex_attrib_array(&self, index: u32) {
        unsafe { self.gl.enable_vertex_attrib_array(index) }
    }

    fn vertex_attrib_pointer(
        &self,
        index: u32,
        size: i32,
        data_type: u32,
        normalized: bool,
        stride: i32,
        offset: i32,
    ) {
        unsafe {
            self.gl
                .vertex_attrib_pointer_f32(index, size, data_type, normalized, stride, offset)
        }
    }

    fn create_shader(&self, stage: u32) -> Result<RawHandle, String> {
        unsafe { self.gl.create_shader(stage) }.map(|s| s.0)
    }

    fn shader_source(&self, shader: RawHandle, source: &str) {
        unsafe { self.gl.shader_source(glow::NativeShader(shader), source) }
    }

    fn compile_shader(&self, shader: RawHandle) {
        unsafe { self.gl.compile_shader(glow::NativeShader(shader)) }
    }

    fn shader_compile_status(&self, shader: RawHandle) -> bool {
        unsafe { self.gl.get_shader_compile_status(glow::NativeShader(shader)) }
    }

    fn shader_info_log(&self, shader: RawHandle) -> String {
        unsafe { self.gl.get_shader_info_log(glow::NativeShader(shader)) }
    }

    fn delete_shader(&self, shader: RawHandle) {
        unsafe { self.gl.delete_shader(glow::NativeShader(shader)) }
    }

    fn create_program(&self) -> Result<RawHandle, String> {
        unsafe { self.gl.create_program() }.map(|p| p.0)
    }

    fn attach_shader(&self, program: RawHandle, shader: RawHandle) {
        unsafe {
            self.gl
                .attach_shader(glow::NativeProgram(program), glow::NativeShader(shader))
        }
    }

    fn link_program(&self, program: RawHandle) {
        unsafe { self.gl.link_program(glow::NativeProgram(program)) }
    }

    fn program_link_status(&self, program: RawHandle) -> bool {
        unsafe { self.gl.get_program_link_status(glow::NativeProgram(program)) }
    }

    fn validate_program(&self, program: RawHandle) {
        unsafe { self.gl.validate_program(glow::NativeProgram(program)) }
    }

    fn program_validate_status(&self, program: RawHandle) -> bool {
        unsafe { self.gl.get_program_validate_status(glow::NativeProgram(program)) }
    }

    fn program_info_log(&self, program: RawHandle) -> String {
        unsafe { self.gl.get_program_info_log(glow::NativeProgram(program)) }
    }

    fn use_program(&self, program: Option<RawHandle>) {
        unsafe { self.gl.use_program(program.map(glow::NativeProgram)) }
    }

    fn delete_program(&self, program: RawHandle) {
        unsafe { self.gl.delete_program(glow::NativeProgram(program)) }
    }

    fn uniform_location(&self, program: RawHandle, name: &str) -> Option<UniformLocation> {
        unsafe { self.gl.get_uniform_location(glow::NativeProgram(program), name) }
            .map(|l| UniformLocation(l.0))
    }

    fn uniform_1_i32(&self, location: Option<UniformLocation>, value: i32) {
        unsafe { self.gl.uniform_1_i32(uniform(location).as_ref(), value) }
    }

    fn uniform_1_f32(&self, location: Option<UniformLocation>, value: f32) {
        unsafe { self.gl.uniform_1_f32(uniform(location).as_ref(), value) }
    }

    fn uniform_4_f32(&self, location: Option<UniformLocation>, values: [f32; 4]) {
        let [x, y, z, w] = values;
        unsafe { self.gl.uniform_4_f32(uniform(location).as_ref(), x, y, z, w) }
    }

    fn uniform_matrix_4_f32(&self, location: Option<UniformLocation>, values: &[f32; 16]) {
        unsafe {
            self.gl
                .uniform_matrix_4_f32_slice(uniform(location).as_ref(), false, values)
        }
    }

    fn create_texture(&self) -> Result<RawHandle, String> {
        unsafe { self.gl.create_texture() }.map(|t| t.0)
    }

    fn delete_texture(&self, texture: RawHandle) {
        unsafe { self.gl.delete_texture(glow::NativeTexture(texture)) }
    }

    fn active_texture(&self, unit: u32) {
        unsafe { self.gl.active_texture(unit) }
    }

    fn bind_texture(&self, target: u32, texture: Option<RawHandle>) {
        unsafe { self.gl.bind_texture(target, texture.map(glow::NativeTexture)) }
    }

    fn tex_parameter_i32(&self, target: u32, parameter: u32, value: i32) {
        unsafe { self.gl.tex_parameter_i32(target, parameter, value) }
    }

    fn tex_image_2d_rgba8(&self, target: u32, width: i32, height: i32, pixels: Option<&[u8]>) {
        unsafe {
            self.gl.tex_image_2d(
                target,
                0,
                glow::RGBA8 as i32,
                width,
                height,
                0,
                glow::RGBA,
                glow::UNSIGNED_BYTE,
                glow::PixelUnpackData::Slice(pixels),
            )
        }
    }

    fn clear_color(&self, rgba: [f32; 4]) {
        let [r, g, b, a] = rgba;
        unsafe { self.gl.clear_color(r, g, b, a) }
    }

    fn clear(&self, mask: u32) {
        unsafe { self.gl.clear(mask) }
    }

    fn enable(&self, capability: u32) {
        unsafe { self.gl.enable(capability) }
    }

    fn blend_func(&self, src: u32, dst: u32) {
        unsafe { self.gl.blend_func(src, dst) }
    }

    fn viewport(&self, x: i32, y: i32, width: i32, height: i32) {
        unsafe { self.gl.viewport(x, y, width, height) }
    }

    fn draw_elements(&self, mode: u32, count: i32, index_type: u32, offset: i32) {
        unsafe { self.gl.draw_elements(mode, count, index_type, offset) }
    }
}
