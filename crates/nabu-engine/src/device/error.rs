use std::fmt;

/// A non-zero value returned by `glGetError`.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct GlErrorCode(pub u32);

impl GlErrorCode {
    /// Symbolic GL name of the code, or `"UNKNOWN"`.
    pub fn name(self) -> &'static str {
        match self.0 {
            glow::INVALID_ENUM => "GL_INVALID_ENUM",
            glow::INVALID_VALUE => "GL_INVALID_VALUE",
            glow::INVALID_OPERATION => "GL_INVALID_OPERATION",
            glow::STACK_OVERFLOW => "GL_STACK_OVERFLOW",
            glow::STACK_UNDERFLOW => "GL_STACK_UNDERFLOW",
            glow::OUT_OF_MEMORY => "GL_OUT_OF_MEMORY",
            glow::INVALID_FRAMEBUFFER_OPERATION => "GL_INVALID_FRAMEBUFFER_OPERATION",
            glow::CONTEXT_LOST => "GL_CONTEXT_LOST",
            _ => "UNKNOWN",
        }
    }
}

impl fmt::Display for GlErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#06x} {}", self.0, self.name())
    }
}
