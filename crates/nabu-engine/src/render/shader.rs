use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

use crate::device::{Gpu, RawHandle, UniformLocation};
use crate::gl_call;

/// Line prefix that switches the section the following lines belong to.
const SECTION_MARKER: &str = "#shader";

/// The two stage sources split out of one `.shader` file.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct ShaderProgramSource {
    pub vertex: String,
    pub fragment: String,
}

/// Splits a combined shader file into its vertex and fragment sources.
///
/// A line containing `#shader` selects the section for the lines after it:
/// `vertex` or `fragment` anywhere on that line picks the stage. Marker lines
/// are never copied. Every other line is appended to the active section with
/// a trailing `\n`. Lines before the first marker belong to no section and
/// are dropped.
pub fn parse_shader(source: &str) -> ShaderProgramSource {
    let mut out = ShaderProgramSource::default();
    let mut active: Option<ShaderStage> = None;

    for line in source.lines() {
        if line.contains(SECTION_MARKER) {
            if line.contains("vertex") {
                active = Some(ShaderStage::Vertex);
            } else if line.contains("fragment") {
                active = Some(ShaderStage::Fragment);
            }
            continue;
        }

        let target = match active {
            Some(ShaderStage::Vertex) => &mut out.vertex,
            Some(ShaderStage::Fragment) => &mut out.fragment,
            None => continue,
        };
        target.push_str(line);
        target.push('\n');
    }

    out
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl ShaderStage {
    pub const fn gl_enum(self) -> u32 {
        match self {
            ShaderStage::Vertex => glow::VERTEX_SHADER,
            ShaderStage::Fragment => glow::FRAGMENT_SHADER,
        }
    }
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ShaderStage::Vertex => "vertex",
            ShaderStage::Fragment => "fragment",
        })
    }
}

#[derive(Debug)]
pub enum ShaderError {
    Io { path: PathBuf, source: io::Error },
    Compile { label: String, stage: ShaderStage, log: String },
    Link { label: String, log: String },
}

impl fmt::Display for ShaderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShaderError::Io { path, source } => {
                write!(f, "failed to read shader `{}`: {source}", path.display())
            }
            ShaderError::Compile { label, stage, log } => {
                write!(f, "failed to compile {stage} shader of `{label}`: {}", log.trim_end())
            }
            ShaderError::Link { label, log } => {
                write!(f, "failed to link `{label}`: {}", log.trim_end())
            }
        }
    }
}

impl std::error::Error for ShaderError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ShaderError::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// A linked vertex + fragment program with a uniform-location cache.
pub struct Shader {
    gpu: Gpu,
    id: RawHandle,
    label: String,

    /// Name -> resolved location. Misses are cached as `None` and passed to
    /// the upload calls, where GL ignores them.
    uniform_cache: RefCell<HashMap<String, Option<UniformLocation>>>,
}

impl Shader {
    /// Reads, splits, compiles and links the `.shader` file at `path`.
    pub fn from_file(gpu: &Gpu, path: impl AsRef<Path>) -> Result<Self, ShaderError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| ShaderError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_source(gpu, &path.display().to_string(), &source)
    }

    /// Builds a program from combined source text. `label` names the program
    /// in diagnostics.
    pub fn from_source(gpu: &Gpu, label: &str, source: &str) -> Result<Self, ShaderError> {
        let sources = parse_shader(source);
        let id = create_program(gpu, label, &sources)?;
        log::debug!("linked shader program `{label}` ({id})");

        Ok(Self {
            gpu: gpu.clone(),
            id,
            label: label.to_string(),
            uniform_cache: RefCell::new(HashMap::new()),
        })
    }

    pub fn bind(&self) {
        gl_call!(self.gpu, use_program(Some(self.id)));
    }

    pub fn unbind(&self) {
        gl_call!(self.gpu, use_program(None));
    }

    pub fn id(&self) -> RawHandle {
        self.id
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    // Uploads target the program in use; call `bind` first.

    pub fn set_uniform_1i(&self, name: &str, value: i32) {
        let location = self.uniform_location(name);
        gl_call!(self.gpu, uniform_1_i32(location, value));
    }

    pub fn set_uniform_1f(&self, name: &str, value: f32) {
        let location = self.uniform_location(name);
        gl_call!(self.gpu, uniform_1_f32(location, value));
    }

    pub fn set_uniform_4f(&self, name: &str, v0: f32, v1: f32, v2: f32, v3: f32) {
        let location = self.uniform_location(name);
        gl_call!(self.gpu, uniform_4_f32(location, [v0, v1, v2, v3]));
    }

    pub fn set_uniform_mat4f(&self, name: &str, matrix: &glam::Mat4) {
        let location = self.uniform_location(name);
        gl_call!(self.gpu, uniform_matrix_4_f32(location, &matrix.to_cols_array()));
    }

    /// Resolves `name`, asking GL at most once per name.
    ///
    /// An unknown name logs one warning and yields `None` from then on.
    pub fn uniform_location(&self, name: &str) -> Option<UniformLocation> {
        if let Some(&cached) = self.uniform_cache.borrow().get(name) {
            return cached;
        }

        let location = gl_call!(self.gpu, uniform_location(self.id, name));
        if location.is_none() {
            log::warn!("uniform `{name}` does not exist in `{}`", self.label);
        }
        self.uniform_cache
            .borrow_mut()
            .insert(name.to_string(), location);
        location
    }
}

impl Drop for Shader {
    fn drop(&mut self) {
        gl_call!(self.gpu, delete_program(self.id));
    }
}

impl fmt::Debug for Shader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Shader")
            .field("id", &self.id)
            .field("label", &self.label)
            .finish_non_exhaustive()
    }
}

/// Compiles both stages, then links and validates them.
///
/// A stage that fails to compile aborts construction before a program object
/// exists. Validation failures are logged only. Stage objects never outlive
/// this function.
fn create_program(
    gpu: &Gpu,
    label: &str,
    sources: &ShaderProgramSource,
) -> Result<RawHandle, ShaderError> {
    let vs = compile_stage(gpu, label, ShaderStage::Vertex, &sources.vertex)?;
    let fs = match compile_stage(gpu, label, ShaderStage::Fragment, &sources.fragment) {
        Ok(fs) => fs,
        Err(e) => {
            gl_call!(gpu, delete_shader(vs));
            return Err(e);
        }
    };

    let program = gl_call!(create gpu, create_program());
    gl_call!(gpu, attach_shader(program, vs));
    gl_call!(gpu, attach_shader(program, fs));
    gl_call!(gpu, link_program(program));
    let linked = gl_call!(gpu, program_link_status(program));

    if linked {
        gl_call!(gpu, validate_program(program));
        if !gl_call!(gpu, program_validate_status(program)) {
            let log = gl_call!(gpu, program_info_log(program));
            log::warn!("program `{label}` did not validate:\n{log}");
        }
    }

    gl_call!(gpu, delete_shader(vs));
    gl_call!(gpu, delete_shader(fs));

    if !linked {
        let log = gl_call!(gpu, program_info_log(program));
        log::error!("failed to link `{label}`:\n{log}");
        gl_call!(gpu, delete_program(program));
        return Err(ShaderError::Link {
            label: label.to_string(),
            log,
        });
    }

    Ok(program)
}

fn compile_stage(
    gpu: &Gpu,
    label: &str,
    stage: ShaderStage,
    source: &str,
) -> Result<RawHandle, ShaderError> {
    let id = gl_call!(create gpu, create_shader(stage.gl_enum()));
    gl_call!(gpu, shader_source(id, source));
    gl_call!(gpu, compile_shader(id));

    if gl_call!(gpu, shader_compile_status(id)) {
        return Ok(id);
    }

    let log = gl_call!(gpu, shader_info_log(id));
    log::error!("failed to compile {stage} shader of `{label}`:\n{log}");
    gl_call!(gpu, delete_shader(id));
    Err(ShaderError::Compile {
        label: label.to_string(),
        stage,
        log,
    })
}
