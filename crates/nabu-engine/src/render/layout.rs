use std::fmt;

/// Scalar type of one vertex attribute component.
///
/// Only the three lanes the engine uses are representable. `Uint8` is always
/// uploaded normalized (`0..=255` maps to `0.0..=1.0`).
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum ComponentType {
    Float32,
    Uint32,
    Uint8,
}

impl ComponentType {
    /// Size of one component in bytes.
    pub const fn size(self) -> u32 {
        match self {
            ComponentType::Float32 => 4,
            ComponentType::Uint32 => 4,
            ComponentType::Uint8 => 1,
        }
    }

    pub const fn gl_enum(self) -> u32 {
        match self {
            ComponentType::Float32 => glow::FLOAT,
            ComponentType::Uint32 => glow::UNSIGNED_INT,
            ComponentType::Uint8 => glow::UNSIGNED_BYTE,
        }
    }

    pub const fn normalized(self) -> bool {
        matches!(self, ComponentType::Uint8)
    }

    pub fn from_gl(gl_enum: u32) -> Option<Self> {
        match gl_enum {
            glow::FLOAT => Some(ComponentType::Float32),
            glow::UNSIGNED_INT => Some(ComponentType::Uint32),
            glow::UNSIGNED_BYTE => Some(ComponentType::Uint8),
            _ => None,
        }
    }
}

/// One attribute of a vertex record: `count` components of `ty`.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct VertexBufferElement {
    pub ty: ComponentType,
    pub count: u32,
    pub normalized: bool,
}

impl VertexBufferElement {
    /// Bytes this attribute occupies inside one vertex.
    pub const fn byte_width(&self) -> u32 {
        self.count * self.ty.size()
    }
}

mod sealed {
    pub trait Sealed {}
    impl Sealed for f32 {}
    impl Sealed for u32 {}
    impl Sealed for u8 {}
}

/// Rust scalar types that can be pushed onto a [`VertexBufferLayout`].
///
/// Sealed: pushing any other type is rejected at compile time.
pub trait VertexComponent: sealed::Sealed {
    const TYPE: ComponentType;
}

impl VertexComponent for f32 {
    const TYPE: ComponentType = ComponentType::Float32;
}

impl VertexComponent for u32 {
    const TYPE: ComponentType = ComponentType::Uint32;
}

impl VertexComponent for u8 {
    const TYPE: ComponentType = ComponentType::Uint8;
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub enum LayoutError {
    /// A GL type enum outside `FLOAT`, `UNSIGNED_INT`, `UNSIGNED_BYTE`.
    UnsupportedAttributeType(u32),
}

impl fmt::Display for LayoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LayoutError::UnsupportedAttributeType(ty) => {
                write!(f, "unsupported vertex attribute type {ty:#06x}")
            }
        }
    }
}

impl std::error::Error for LayoutError {}

/// Ordered description of the attributes packed into one vertex buffer.
///
/// Attribute `i` is fed to shader slot `i` by
/// [`VertexArray::add_buffer`](super::VertexArray::add_buffer). The stride is
/// kept in sync on every push.
#[derive(Debug, Clone, Default)]
pub struct VertexBufferLayout {
    elements: Vec<VertexBufferElement>,
    stride: u32,
}

impl VertexBufferLayout {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `count` components of `T`.
    ///
    /// ```ignore
    /// let mut layout = VertexBufferLayout::new();
    /// layout.push::<f32>(2).push::<f32>(2);
    /// ```
    ///
    /// # Panics
    /// If `count` is not in `1..=4`.
    pub fn push<T: VertexComponent>(&mut self, count: u32) -> &mut Self {
        self.push_component(T::TYPE, count)
    }

    /// # Panics
    /// If `count` is not in `1..=4`.
    pub fn push_component(&mut self, ty: ComponentType, count: u32) -> &mut Self {
        assert!(
            (1..=4).contains(&count),
            "vertex attribute component count must be 1..=4, got {count}"
        );

        let element = VertexBufferElement {
            ty,
            count,
            normalized: ty.normalized(),
        };
        self.stride += element.byte_width();
        self.elements.push(element);
        self
    }

    /// Appends an attribute described by a raw GL type enum.
    pub fn push_gl(&mut self, gl_enum: u32, count: u32) -> Result<&mut Self, LayoutError> {
        let ty = ComponentType::from_gl(gl_enum)
            .ok_or(LayoutError::UnsupportedAttributeType(gl_enum))?;
        Ok(self.push_component(ty, count))
    }

    pub fn elements(&self) -> &[VertexBufferElement] {
        &self.elements
    }

    /// Byte distance between consecutive vertices.
    pub fn stride(&self) -> u32 {
        self.stride
    }
}
