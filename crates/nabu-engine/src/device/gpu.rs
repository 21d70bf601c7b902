use std::fmt;
use std::panic::Location;
use std::rc::Rc;

use super::api::{GlApi, RawHandle};
use super::error::GlErrorCode;

/// Upper bound on stale error flags discarded before a call.
///
/// A lost context may report errors indefinitely; the bound keeps the drain
/// from spinning forever in that case.
const MAX_DRAINED_ERRORS: usize = 64;

/// Shared handle to the current GL context.
///
/// Every resource keeps a clone so it can release its object on drop. Cloning
/// is a reference-count bump; all clones talk to the same context.
///
/// This type is also the engine's single error channel: every GL call is
/// issued through [`Gpu::call`] (usually via [`gl_call!`](crate::gl_call)),
/// which drains stale error flags, runs the call, then polls the error flag
/// once. Any error at that point is a contract violation and is fatal.
#[derive(Clone)]
pub struct Gpu {
    api: Rc<dyn GlApi>,
}

impl Gpu {
    pub fn new(api: impl GlApi + 'static) -> Self {
        Self { api: Rc::new(api) }
    }

    pub fn from_rc(api: Rc<dyn GlApi>) -> Self {
        Self { api }
    }

    /// Runs `f` against the context with error checking.
    ///
    /// `what` is the call text used in the diagnostic; the source location is
    /// the caller's.
    ///
    /// # Panics
    /// If `glGetError` reports an error after `f` returns.
    #[track_caller]
    pub fn call<R>(&self, what: &str, f: impl FnOnce(&dyn GlApi) -> R) -> R {
        let location = Location::caller();
        self.drain_errors();

        log::trace!(target: "nabu_engine::gl", "{what}");
        let out = f(self.api.as_ref());

        if let Some(code) = self.poll_error() {
            fatal(what, location, code);
        }
        out
    }

    /// Like [`call`](Self::call) for the `create_*` family, treating a
    /// backend refusal to allocate a name as fatal too.
    #[track_caller]
    pub fn create(
        &self,
        what: &str,
        f: impl FnOnce(&dyn GlApi) -> Result<RawHandle, String>,
    ) -> RawHandle {
        let location = Location::caller();
        match self.call(what, f) {
            Ok(handle) => handle,
            Err(message) => {
                log::error!(
                    "[OpenGL Error] {what} {}:{}: {message}",
                    location.file(),
                    location.line()
                );
                panic!("{what} failed at {location}: {message}");
            }
        }
    }

    fn drain_errors(&self) {
        for _ in 0..MAX_DRAINED_ERRORS {
            if self.api.get_error() == glow::NO_ERROR {
                return;
            }
        }
        log::warn!("GL error queue did not drain after {MAX_DRAINED_ERRORS} reads");
    }

    fn poll_error(&self) -> Option<GlErrorCode> {
        match self.api.get_error() {
            glow::NO_ERROR => None,
            code => Some(GlErrorCode(code)),
        }
    }
}

impl fmt::Debug for Gpu {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Gpu").finish_non_exhaustive()
    }
}

/// Converts a count, size or byte offset to `GLsizei`.
///
/// # Panics
/// If `value` does not fit in an `i32`.
#[track_caller]
pub(crate) fn gl_sizei<T>(value: T, what: &str) -> i32
where
    T: TryInto<i32> + Copy + fmt::Display,
{
    match value.try_into() {
        Ok(v) => v,
        Err(_) => panic!("{what} {value} exceeds the GLsizei range"),
    }
}

fn fatal(what: &str, location: &Location<'_>, code: GlErrorCode) -> ! {
    log::error!(
        "[OpenGL Error] ({code}) {what} {}:{}",
        location.file(),
        location.line()
    );
    panic!("OpenGL error {code} in `{what}` at {location}");
}

/// Issues one GL call through a [`Gpu`] with error checking.
///
/// ```ignore
/// gl_call!(self.gpu, bind_buffer(glow::ARRAY_BUFFER, Some(self.id)));
/// let id = gl_call!(create self.gpu, create_buffer());
/// ```
///
/// The call text is stringified into the diagnostic.
#[macro_export]
macro_rules! gl_call {
    (create $gpu:expr, $method:ident ( $($arg:expr),* $(,)? )) => {
        $gpu.create(
            concat!(stringify!($method), "(", stringify!($($arg),*), ")"),
            |gl| gl.$method($($arg),*),
        )
    };
    ($gpu:expr, $method:ident ( $($arg:expr),* $(,)? )) => {
        $gpu.call(
            concat!(stringify!($method), "(", stringify!($($arg),*), ")"),
            |gl| gl.$method($($arg),*),
        )
    };
}
