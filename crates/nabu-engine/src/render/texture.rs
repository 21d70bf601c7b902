use std::fmt;
use std::path::{Path, PathBuf};

use crate::device::{Gpu, RawHandle, gl_sizei};
use crate::gl_call;

#[derive(Debug)]
pub enum TextureError {
    Decode { path: PathBuf, source: image::ImageError },
    /// Pixel data does not match `width * height * 4` bytes.
    DataSize { width: u32, height: u32, len: usize },
}

impl fmt::Display for TextureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TextureError::Decode { path, source } => {
                write!(f, "failed to load texture `{}`: {source}", path.display())
            }
            TextureError::DataSize { width, height, len } => write!(
                f,
                "RGBA8 data for a {width}x{height} texture must be {} bytes, got {len}",
                *width as usize * *height as usize * 4
            ),
        }
    }
}

impl std::error::Error for TextureError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TextureError::Decode { source, .. } => Some(source),
            TextureError::DataSize { .. } => None,
        }
    }
}

/// An immutable RGBA8 2D texture with linear filtering and edge clamping.
pub struct Texture {
    gpu: Gpu,
    id: RawHandle,
    width: u32,
    height: u32,
}

impl Texture {
    /// Decodes an image file and uploads it.
    ///
    /// Rows are flipped so the first row in memory is the bottom of the
    /// image, matching GL's texture-space origin.
    pub fn from_file(gpu: &Gpu, path: impl AsRef<Path>) -> Result<Self, TextureError> {
        let path = path.as_ref();
        let decoded = image::open(path).map_err(|source| TextureError::Decode {
            path: path.to_path_buf(),
            source,
        })?;
        let pixels = decoded.flipv().into_rgba8();
        let (width, height) = pixels.dimensions();

        let texture = Self::from_rgba8(gpu, width, height, pixels.as_raw())?;
        log::debug!("loaded texture `{}` ({width}x{height})", path.display());
        Ok(texture)
    }

    /// Uploads tightly packed RGBA8 rows, bottom row first.
    ///
    /// Leaves texture unit state with nothing bound to `TEXTURE_2D`.
    pub fn from_rgba8(
        gpu: &Gpu,
        width: u32,
        height: u32,
        pixels: &[u8],
    ) -> Result<Self, TextureError> {
        if pixels.len() != width as usize * height as usize * 4 {
            return Err(TextureError::DataSize {
                width,
                height,
                len: pixels.len(),
            });
        }

        let gl_width = gl_sizei(width, "texture width");
        let gl_height = gl_sizei(height, "texture height");

        let id = gl_call!(create gpu, create_texture());
        gl_call!(gpu, bind_texture(glow::TEXTURE_2D, Some(id)));

        for (parameter, value) in [
            (glow::TEXTURE_MIN_FILTER, glow::LINEAR),
            (glow::TEXTURE_MAG_FILTER, glow::LINEAR),
            (glow::TEXTURE_WRAP_S, glow::CLAMP_TO_EDGE),
            (glow::TEXTURE_WRAP_T, glow::CLAMP_TO_EDGE),
        ] {
            gl_call!(gpu, tex_parameter_i32(glow::TEXTURE_2D, parameter, value as i32));
        }

        gl_call!(
            gpu,
            tex_image_2d_rgba8(glow::TEXTURE_2D, gl_width, gl_height, Some(pixels))
        );
        gl_call!(gpu, bind_texture(glow::TEXTURE_2D, None));

        Ok(Self {
            gpu: gpu.clone(),
            id,
            width,
            height,
        })
    }

    /// Makes `TEXTURE0 + slot` active and binds this texture there.
    pub fn bind(&self, slot: u32) {
        gl_call!(self.gpu, active_texture(glow::TEXTURE0 + slot));
        gl_call!(self.gpu, bind_texture(glow::TEXTURE_2D, Some(self.id)));
    }

    /// Unbinds `TEXTURE_2D` on the active unit.
    pub fn unbind(&self) {
        gl_call!(self.gpu, bind_texture(glow::TEXTURE_2D, None));
    }

    pub fn id(&self) -> RawHandle {
        self.id
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }
}

impl Drop for Texture {
    fn drop(&mut self) {
        gl_call!(self.gpu, delete_texture(self.id));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::testing::{GlCall, RecordingGl};

    #[test]
    fn upload_sets_linear_clamped_sampling() {
        let gl = RecordingGl::new();
        let texture = Texture::from_rgba8(&gl.gpu(), 2, 3, &[255; 24]).unwrap();
        let id = texture.id();

        assert_eq!(
            gl.calls(),
            vec![
                GlCall::CreateTexture(id),
                GlCall::BindTexture { target: glow::TEXTURE_2D, texture: Some(id) },
                GlCall::TexParameter {
                    target: glow::TEXTURE_2D,
                    parameter: glow::TEXTURE_MIN_FILTER,
                    value: glow::LINEAR as i32,
                },
                GlCall::TexParameter {
                    target: glow::TEXTURE_2D,
                    parameter: glow::TEXTURE_MAG_FILTER,
                    value: glow::LINEAR as i32,
                },
                GlCall::TexParameter {
                    target: glow::TEXTURE_2D,
                    parameter: glow::TEXTURE_WRAP_S,
                    value: glow::CLAMP_TO_EDGE as i32,
                },
                GlCall::TexParameter {
                    target: glow::TEXTURE_2D,
                    parameter: glow::TEXTURE_WRAP_T,
                    value: glow::CLAMP_TO_EDGE as i32,
                },
                GlCall::TexImage2D {
                    target: glow::TEXTURE_2D,
                    width: 2,
                    height: 3,
                    pixel_bytes: Some(24),
                },
                GlCall::BindTexture { target: glow::TEXTURE_2D, texture: None },
            ]
        );
        assert_eq!((texture.width(), texture.height()), (2, 3));
    }

    #[test]
    fn wrong_pixel_count_is_rejected_before_any_gl_call() {
        let gl = RecordingGl::new();

        let err = Texture::from_rgba8(&gl.gpu(), 4, 4, &[0; 63]).err().unwrap();

        assert!(matches!(err, TextureError::DataSize { width: 4, height: 4, len: 63 }));
        assert!(gl.calls().is_empty());
    }

    #[test]
    fn bind_activates_the_requested_unit() {
        let gl = RecordingGl::new();
        let texture = Texture::from_rgba8(&gl.gpu(), 1, 1, &[0; 4]).unwrap();
        gl.take_calls();

        texture.bind(0);
        texture.bind(3);

        assert_eq!(
            gl.calls(),
            vec![
                GlCall::ActiveTexture(glow::TEXTURE0),
                GlCall::BindTexture { target: glow::TEXTURE_2D, texture: Some(texture.id()) },
                GlCall::ActiveTexture(glow::TEXTURE3),
                GlCall::BindTexture { target: glow::TEXTURE_2D, texture: Some(texture.id()) },
            ]
        );
    }

    #[test]
    fn unbind_is_idempotent_and_drop_deletes() {
        let gl = RecordingGl::new();
        let texture = Texture::from_rgba8(&gl.gpu(), 1, 1, &[0; 4]).unwrap();
        let id = texture.id();

        texture.unbind();
        texture.unbind();
        assert_eq!(gl.pending_errors(), 0);

        drop(texture);
        assert!(!gl.is_live(id));
    }

    #[test]
    fn undecodable_file_is_an_error() {
        let gl = RecordingGl::new();
        let path = std::env::temp_dir().join(format!("nabu-engine-{}.png", std::process::id()));
        std::fs::write(&path, b"not a png").unwrap();

        let result = Texture::from_file(&gl.gpu(), &path);
        std::fs::remove_file(&path).unwrap();

        assert!(matches!(result, Err(TextureError::Decode { .. })));
        assert!(gl.calls().is_empty());
    }

    #[test]
    fn decoded_image_uploads_as_rgba8() {
        let gl = RecordingGl::new();
        let path = std::env::temp_dir().join(format!("nabu-engine-flip-{}.png", std::process::id()));
        let mut img = image::RgbaImage::new(1, 2);
        img.put_pixel(0, 0, image::Rgba([255, 0, 0, 255]));
        img.put_pixel(0, 1, image::Rgba([0, 0, 255, 255]));
        img.save(&path).unwrap();

        let texture = Texture::from_file(&gl.gpu(), &path).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!((texture.width(), texture.height()), (1, 2));
        assert_eq!(
            gl.count(|c| matches!(c, GlCall::TexImage2D { pixel_bytes: Some(8), .. })),
            1
        );
    }
}
