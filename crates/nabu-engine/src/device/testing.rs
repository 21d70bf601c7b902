//! A recording stand-in for a GL context.
//!
//! [`RecordingGl`] implements [`GlApi`] without a GPU. It logs every state
//! changing call as a [`GlCall`], hands out handles, tracks which objects are
//! alive and raises the GL errors this engine is expected never to trigger:
//!
//! - binding a handle that was never created (or already deleted),
//! - uploading a uniform while no program is in use,
//! - configuring attributes or drawing with no vertex array bound,
//! - uploading buffer data with nothing bound to the target.
//!
//! Errors are queued and surface through `get_error`, so the normal
//! [`Gpu`] error channel turns them into panics.

use std::cell::RefCell;
use std::collections::{HashMap, HashSet, VecDeque};
use std::num::NonZeroU32;
use std::rc::Rc;

use super::api::{GlApi, RawHandle, UniformLocation};
use super::gpu::Gpu;

/// One recorded GL call.
#[derive(Debug, Clone, PartialEq)]
pub enum GlCall {
    CreateBuffer(RawHandle),
    DeleteBuffer(RawHandle),
    BindBuffer { target: u32, buffer: Option<RawHandle> },
    BufferData { target: u32, bytes: Vec<u8>, usage: u32 },

    CreateVertexArray(RawHandle),
    DeleteVertexArray(RawHandle),
    BindVertexArray(Option<RawHandle>),
    EnableVertexAttribArray(u32),
    VertexAttribPointer {
        index: u32,
        size: i32,
        data_type: u32,
        normalized: bool,
        stride: i32,
        offset: i32,
    },

    CreateShader { stage: u32, shader: RawHandle },
    ShaderSource { shader: RawHandle, source: String },
    CompileShader(RawHandle),
    DeleteShader(RawHandle),
    CreateProgram(RawHandle),
    AttachShader { program: RawHandle, shader: RawHandle },
    LinkProgram(RawHandle),
    ValidateProgram(RawHandle),
    UseProgram(Option<RawHandle>),
    DeleteProgram(RawHandle),

    GetUniformLocation { program: RawHandle, name: String },
    Uniform1i { location: Option<UniformLocation>, value: i32 },
    Uniform1f { location: Option<UniformLocation>, value: f32 },
    Uniform4f { location: Option<UniformLocation>, values: [f32; 4] },
    UniformMatrix4f { location: Option<UniformLocation>, values: [f32; 16] },

    CreateTexture(RawHandle),
    DeleteTexture(RawHandle),
    ActiveTexture(u32),
    BindTexture { target: u32, texture: Option<RawHandle> },
    TexParameter { target: u32, parameter: u32, value: i32 },
    TexImage2D { target: u32, width: i32, height: i32, pixel_bytes: Option<usize> },

    ClearColor([f32; 4]),
    Clear(u32),
    Enable(u32),
    BlendFunc { src: u32, dst: u32 },
    Viewport { x: i32, y: i32, width: i32, height: i32 },
    DrawElements { mode: u32, count: i32, index_type: u32, offset: i32 },
}

#[derive(Default)]
struct State {
    calls: Vec<GlCall>,
    errors: VecDeque<u32>,
    fail_next: Option<u32>,
    refuse_allocations: bool,

    next_handle: u32,
    buffers: HashSet<RawHandle>,
    vertex_arrays: HashSet<RawHandle>,
    shaders: HashMap<RawHandle, u32>,
    programs: HashSet<RawHandle>,
    textures: HashSet<RawHandle>,

    buffer_bindings: HashMap<u32, RawHandle>,
    bound_vertex_array: Option<RawHandle>,
    current_program: Option<RawHandle>,

    failing_stages: HashSet<u32>,
    fail_link: bool,
    fail_validation: bool,
    uniforms: Vec<String>,
}

impl State {
    fn allocate(&mut self) -> Result<RawHandle, String> {
        if self.refuse_allocations {
            return Err("out of object names".to_string());
        }
        self.next_handle += 1;
        NonZeroU32::new(self.next_handle).ok_or_else(|| "handle space exhausted".to_string())
    }

    fn record(&mut self, call: GlCall) {
        self.calls.push(call);
        if let Some(code) = self.fail_next.take() {
            self.errors.push_back(code);
        }
    }

    fn raise(&mut self, code: u32) {
        self.errors.push_back(code);
    }

    fn require(&mut self, ok: bool) {
        if !ok {
            self.raise(glow::INVALID_OPERATION);
        }
    }
}

/// Recording fake of a GL context. Clones share the same log and state.
#[derive(Clone, Default)]
pub struct RecordingGl {
    state: Rc<RefCell<State>>,
}

impl RecordingGl {
    pub fn new() -> Self {
        Self::default()
    }

    /// A [`Gpu`] talking to this recorder.
    pub fn gpu(&self) -> Gpu {
        Gpu::new(self.clone())
    }

    /// Declares uniforms the linked program exposes, in location order.
    /// Any other name resolves to "not found".
    pub fn declare_uniforms(&self, names: &[&str]) {
        let mut st = self.state.borrow_mut();
        st.uniforms = names.iter().map(|n| n.to_string()).collect();
    }

    /// Makes compilation of the given stage (`glow::VERTEX_SHADER` or
    /// `glow::FRAGMENT_SHADER`) report failure.
    pub fn fail_compile(&self, stage: u32) {
        self.state.borrow_mut().failing_stages.insert(stage);
    }

    pub fn fail_link(&self) {
        self.state.borrow_mut().fail_link = true;
    }

    /// Makes linked programs report that they do not validate.
    pub fn fail_validation(&self) {
        self.state.borrow_mut().fail_validation = true;
    }

    /// Queues an error flag as if an earlier, unrelated call had set it.
    pub fn push_error(&self, code: u32) {
        self.state.borrow_mut().raise(code);
    }

    /// Raises `code` right after the next recorded call.
    pub fn fail_next_call(&self, code: u32) {
        self.state.borrow_mut().fail_next = Some(code);
    }

    /// Makes every `create_*` call fail.
    pub fn refuse_allocations(&self) {
        self.state.borrow_mut().refuse_allocations = true;
    }

    pub fn pending_errors(&self) -> usize {
        self.state.borrow().errors.len()
    }

    pub fn calls(&self) -> Vec<GlCall> {
        self.state.borrow().calls.clone()
    }

    /// Returns and forgets the calls recorded so far.
    pub fn take_calls(&self) -> Vec<GlCall> {
        std::mem::take(&mut self.state.borrow_mut().calls)
    }

    pub fn count(&self, pred: impl Fn(&GlCall) -> bool) -> usize {
        self.state.borrow().calls.iter().filter(|c| pred(c)).count()
    }

    /// Number of GL objects created and not yet deleted.
    pub fn live_objects(&self) -> usize {
        let st = self.state.borrow();
        st.buffers.len()
            + st.vertex_arrays.len()
            + st.shaders.len()
            + st.programs.len()
            + st.textures.len()
    }

    pub fn is_live(&self, handle: RawHandle) -> bool {
        let st = self.state.borrow();
        st.buffers.contains(&handle)
            || st.vertex_arrays.contains(&handle)
            || st.shaders.contains_key(&handle)
            || st.programs.contains(&handle)
            || st.textures.contains(&handle)
    }

    pub fn current_program(&self) -> Option<RawHandle> {
        self.state.borrow().current_program
    }

    fn with<R>(&self, f: impl FnOnce(&mut State) -> R) -> R {
        f(&mut self.state.borrow_mut())
    }
}

impl GlApi for RecordingGl {
    fn get_error(&self) -> u32 {
        self.with(|st| st.errors.pop_front().unwrap_or(glow::NO_ERROR))
    }

    fn create_buffer(&self) -> Result<RawHandle, String> {
        self.with(|st| {
            let id = st.allocate()?;
            st.buffers.insert(id);
            st.record(GlCall::CreateBuffer(id));
            Ok(id)
        })
    }

    fn delete_buffer(&self, buffer: RawHandle) {
        self.with(|st| {
            st.buffers.remove(&buffer);
            st.buffer_bindings.retain(|_, b| *b != buffer);
            st.record(GlCall::DeleteBuffer(buffer));
        })
    }

    fn bind_buffer(&self, target: u32, buffer: Option<RawHandle>) {
        self.with(|st| {
            match buffer {
                Some(b) if !st.buffers.contains(&b) => st.raise(glow::INVALID_OPERATION),
                Some(b) => {
                    st.buffer_bindings.insert(target, b);
                }
                None => {
                    st.buffer_bindings.remove(&target);
                }
            }
            st.record(GlCall::BindBuffer { target, buffer });
        })
    }

    fn buffer_data(&self, target: u32, data: &[u8], usage: u32) {
        self.with(|st| {
            let bound = st.buffer_bindings.contains_key(&target);
            st.require(bound);
            st.record(GlCall::BufferData { target, bytes: data.to_vec(), usage });
        })
    }

    fn create_vertex_array(&self) -> Result<RawHandle, String> {
        self.with(|st| {
            let id = st.allocate()?;
            st.vertex_arrays.insert(id);
            st.record(GlCall::CreateVertexArray(id));
            Ok(id)
        })
    }

    fn delete_vertex_array(&self, vertex_array: RawHandle) {
        self.with(|st| {
            st.vertex_arrays.remove(&vertex_array);
            if st.bound_vertex_array == Some(vertex_array) {
                st.bound_vertex_array = None;
            }
            st.record(GlCall::DeleteVertexArray(vertex_array));
        })
    }

    fn bind_vertex_array(&self, vertex_array: Option<RawHandle>) {
        self.with(|st| {
            match vertex_array {
                Some(v) if !st.vertex_arrays.contains(&v) => st.raise(glow::INVALID_OPERATION),
                other => st.bound_vertex_array = other,
            }
            st.record(GlCall::BindVertexArray(vertex_array));
        })
    }

    fn enable_vertex_attrib_array(&self, index: u32) {
        self.with(|st| {
            let ok = st.bound_vertex_array.is_some();
            st.require(ok);
            st.record(GlCall::EnableVertexAttribArray(index));
        })
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
        self.with(|st| {
            let ok = st.bound_vertex_array.is_some()
                && st.buffer_bindings.contains_key(&glow::ARRAY_BUFFER);
            st.require(ok);
            if !(1..=4).contains(&size) {
                st.raise(glow::INVALID_VALUE);
            }
            st.record(GlCall::VertexAttribPointer {
                index,
                size,
                data_type,
                normalized,
                stride,
                offset,
            });
        })
    }

    fn create_shader(&self, stage: u32) -> Result<RawHandle, String> {
        self.with(|st| {
            let id = st.allocate()?;
            st.shaders.insert(id, stage);
            st.record(GlCall::CreateShader { stage, shader: id });
            Ok(id)
        })
    }

    fn shader_source(&self, shader: RawHandle, source: &str) {
        self.with(|st| {
            if !st.shaders.contains_key(&shader) {
                st.raise(glow::INVALID_VALUE);
            }
            st.record(GlCall::ShaderSource { shader, source: source.to_string() });
        })
    }

    fn compile_shader(&self, shader: RawHandle) {
        self.with(|st| st.record(GlCall::CompileShader(shader)))
    }

    fn shader_compile_status(&self, shader: RawHandle) -> bool {
        self.with(|st| match st.shaders.get(&shader) {
            Some(stage) => !st.failing_stages.contains(stage),
            None => false,
        })
    }

    fn shader_info_log(&self, _shader: RawHandle) -> String {
        "0:1(1): error: syntax error, unexpected end of file".to_string()
    }

    fn delete_shader(&self, shader: RawHandle) {
        self.with(|st| {
            st.shaders.remove(&shader);
            st.record(GlCall::DeleteShader(shader));
        })
    }

    fn create_program(&self) -> Result<RawHandle, String> {
        self.with(|st| {
            let id = st.allocate()?;
            st.programs.insert(id);
            st.record(GlCall::CreateProgram(id));
            Ok(id)
        })
    }

    fn attach_shader(&self, program: RawHandle, shader: RawHandle) {
        self.with(|st| {
            if !st.programs.contains(&program) || !st.shaders.contains_key(&shader) {
                st.raise(glow::INVALID_VALUE);
            }
            st.record(GlCall::AttachShader { program, shader });
        })
    }

    fn link_program(&self, program: RawHandle) {
        self.with(|st| st.record(GlCall::LinkProgram(program)))
    }

    fn program_link_status(&self, program: RawHandle) -> bool {
        self.with(|st| st.programs.contains(&program) && !st.fail_link)
    }

    fn validate_program(&self, program: RawHandle) {
        self.with(|st| {
            if !st.programs.contains(&program) {
                st.raise(glow::INVALID_VALUE);
            }
            st.record(GlCall::ValidateProgram(program));
        })
    }

    fn program_validate_status(&self, program: RawHandle) -> bool {
        self.with(|st| st.programs.contains(&program) && !st.fail_validation)
    }

    fn program_info_log(&self, _program: RawHandle) -> String {
        "error: vertex shader output `v_TexCoord` not read by fragment shader".to_string()
    }

    fn use_program(&self, program: Option<RawHandle>) {
        self.with(|st| {
            match program {
                Some(p) if !st.programs.contains(&p) => st.raise(glow::INVALID_OPERATION),
                other => st.current_program = other,
            }
            st.record(GlCall::UseProgram(program));
        })
    }

    fn delete_program(&self, program: RawHandle) {
        self.with(|st| {
            st.programs.remove(&program);
            if st.current_program == Some(program) {
                st.current_program = None;
            }
            st.record(GlCall::DeleteProgram(program));
        })
    }

    fn uniform_location(&self, program: RawHandle, name: &str) -> Option<UniformLocation> {
        self.with(|st| {
            st.record(GlCall::GetUniformLocation { program, name: name.to_string() });
            st.uniforms
                .iter()
                .position(|u| u == name)
                .map(|i| UniformLocation(i as u32))
        })
    }

    fn uniform_1_i32(&self, location: Option<UniformLocation>, value: i32) {
        self.with(|st| {
            let ok = st.current_program.is_some();
            st.require(ok);
            st.record(GlCall::Uniform1i { location, value });
        })
    }

    fn uniform_1_f32(&self, location: Option<UniformLocation>, value: f32) {
        self.with(|st| {
            let ok = st.current_program.is_some();
            st.require(ok);
            st.record(GlCall::Uniform1f { location, value });
        })
    }

    fn uniform_4_f32(&self, location: Option<UniformLocation>, values: [f32; 4]) {
        self.with(|st| {
            let ok = st.current_program.is_some();
            st.require(ok);
            st.record(GlCall::Uniform4f { location, values });
        })
    }

    fn uniform_matrix_4_f32(&self, location: Option<UniformLocation>, values: &[f32; 16]) {
        self.with(|st| {
            let ok = st.current_program.is_some();
            st.require(ok);
            st.record(GlCall::UniformMatrix4f { location, values: *values });
        })
    }

    fn create_texture(&self) -> Result<RawHandle, String> {
        self.with(|st| {
            let id = st.allocate()?;
            st.textures.insert(id);
            st.record(GlCall::CreateTexture(id));
            Ok(id)
        })
    }

    fn delete_texture(&self, texture: RawHandle) {
        self.with(|st| {
            st.textures.remove(&texture);
            st.record(GlCall::DeleteTexture(texture));
        })
    }

    fn active_texture(&self, unit: u32) {
        self.with(|st| {
            if unit < glow::TEXTURE0 {
                st.raise(glow::INVALID_ENUM);
            }
            st.record(GlCall::ActiveTexture(unit));
        })
    }

    fn bind_texture(&self, target: u32, texture: Option<RawHandle>) {
        self.with(|st| {
            if let Some(t) = texture {
                let ok = st.textures.contains(&t);
                st.require(ok);
            }
            st.record(GlCall::BindTexture { target, texture });
        })
    }

    fn tex_parameter_i32(&self, target: u32, parameter: u32, value: i32) {
        self.with(|st| st.record(GlCall::TexParameter { target, parameter, value }))
    }

    fn tex_image_2d_rgba8(&self, target: u32, width: i32, height: i32, pixels: Option<&[u8]>) {
        self.with(|st| {
            st.record(GlCall::TexImage2D {
                target,
                width,
                height,
                pixel_bytes: pixels.map(<[u8]>::len),
            })
        })
    }

    fn clear_color(&self, rgba: [f32; 4]) {
        self.with(|st| st.record(GlCall::ClearColor(rgba)))
    }

    fn clear(&self, mask: u32) {
        self.with(|st| st.record(GlCall::Clear(mask)))
    }

    fn enable(&self, capability: u32) {
        self.with(|st| st.record(GlCall::Enable(capability)))
    }

    fn blend_func(&self, src: u32, dst: u32) {
        self.with(|st| st.record(GlCall::BlendFunc { src, dst }))
    }

    fn viewport(&self, x: i32, y: i32, width: i32, height: i32) {
        self.with(|st| {
            if width < 0 || height < 0 {
                st.raise(glow::INVALID_VALUE);
            }
            st.record(GlCall::Viewport { x, y, width, height })
        })
    }

    fn draw_elements(&self, mode: u32, count: i32, index_type: u32, offset: i32) {
        self.with(|st| {
            let ok = st.bound_vertex_array.is_some();
            st.require(ok);
            st.record(GlCall::DrawElements { mode, count, index_type, offset });
        })
    }
}
