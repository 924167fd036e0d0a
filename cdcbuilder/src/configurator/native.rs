//! Production backend: the openCONFIGURATOR shared library via `libloading`.
//!
//! Every entry point returns a `{ code, message }` pair by value. The message
//! buffer belongs to the library and is only valid until the next call, so it
//! is copied immediately.

#![allow(unsafe_code)]

use std::ffi::{CStr, CString, c_char, c_int};
use std::path::{MAIN_SEPARATOR, Path, PathBuf};

use libloading::Library;
use thiserror::Error;
use tracing::{debug, instrument, warn};

use super::{Configurator, ErrorCode, LibraryResult, OutputLanguage};
use crate::io::config::BuilderConfig;

#[repr(C)]
#[derive(Clone, Copy)]
struct RawResult {
    code: c_int,
    message: *const c_char,
}

type SetResourcePathFn = unsafe extern "C" fn(*const c_char) -> RawResult;
type OpenProjectFn = unsafe extern "C" fn(*const c_char) -> RawResult;
type GenerateStackConfigurationFn =
    unsafe extern "C" fn(*const c_char, *const c_char) -> RawResult;
type GenerateProcessImageFn =
    unsafe extern "C" fn(c_int, *const c_char, *const c_char) -> RawResult;
type CloseProjectFn = unsafe extern "C" fn() -> RawResult;

#[derive(Debug, Error)]
pub enum NativeError {
    #[error("load configurator library {}", .path.display())]
    Load {
        path: PathBuf,
        #[source]
        source: libloading::Error,
    },
    #[error("resolve symbol {name} in {}", .path.display())]
    Symbol {
        name: &'static str,
        path: PathBuf,
        #[source]
        source: libloading::Error,
    },
    #[error("set library resource path {}: {result}", .path.display())]
    ResourcePath { path: PathBuf, result: LibraryResult },
}

/// Configurator backed by the native library.
///
/// Function pointers are copied out of the library at load time and stay
/// valid as long as `_library` is alive.
pub struct NativeConfigurator {
    set_resource_path: SetResourcePathFn,
    open: OpenProjectFn,
    generate_stack_configuration: GenerateStackConfigurationFn,
    generate_process_image: GenerateProcessImageFn,
    close: CloseProjectFn,
    project_open: bool,
    _library: Library,
}

impl NativeConfigurator {
    /// Load the library named by `config` and point it at the resource directory.
    #[instrument(skip_all, fields(library = %config.library_file().display()))]
    pub fn load(config: &BuilderConfig) -> Result<Self, NativeError> {
        let path = config.library_file();
        // SAFETY: loading runs the library's initialisers; the configured
        // directory is trusted to contain the genuine configurator.
        let library = unsafe { Library::new(&path) }.map_err(|source| NativeError::Load {
            path: path.clone(),
            source,
        })?;

        let configurator = Self {
            set_resource_path: symbol(&library, &path, "SetLibraryResourcePath")?,
            open: symbol(&library, &path, "OpenProject")?,
            generate_stack_configuration: symbol(&library, &path, "GenerateStackConfiguration")?,
            generate_process_image: symbol(&library, &path, "GenerateProcessImageDescription")?,
            close: symbol(&library, &path, "CloseProject")?,
            project_open: false,
            _library: library,
        };

        let result = configurator.apply_resource_path(&config.resource_path);
        if !result.is_success() {
            return Err(NativeError::ResourcePath {
                path: config.resource_path.clone(),
                result,
            });
        }
        debug!("configurator library loaded");
        Ok(configurator)
    }

    fn apply_resource_path(&self, resource_path: &Path) -> LibraryResult {
        match c_path(resource_path, true) {
            // SAFETY: pointer is valid for the duration of the call.
            Ok(dir) => unsafe { convert((self.set_resource_path)(dir.as_ptr())) },
            Err(result) => result,
        }
    }
}

fn symbol<T: Copy>(library: &Library, path: &Path, name: &'static str) -> Result<T, NativeError> {
    let mut symbol_name = name.as_bytes().to_vec();
    symbol_name.push(0);
    // SAFETY: `T` is one of the function pointer aliases above, matching the
    // library's exported C signatures.
    unsafe { library.get::<T>(&symbol_name) }
        .map(|symbol| *symbol)
        .map_err(|source| NativeError::Symbol {
            name,
            path: path.to_path_buf(),
            source,
        })
}

/// Convert a path for the library. Output directories carry a trailing separator.
fn c_path(path: &Path, directory: bool) -> Result<CString, LibraryResult> {
    let Some(text) = path.to_str() else {
        return Err(LibraryResult::failure(
            ErrorCode::InvalidParameter,
            format!("Path '{}' is not valid UTF-8.", path.display()),
        ));
    };
    let mut text = text.to_string();
    if directory && !text.ends_with(MAIN_SEPARATOR) {
        text.push(MAIN_SEPARATOR);
    }
    c_string(text)
}

fn c_string(text: impl Into<Vec<u8>>) -> Result<CString, LibraryResult> {
    CString::new(text).map_err(|err| {
        LibraryResult::failure(
            ErrorCode::InvalidParameter,
            format!("Argument contains an interior NUL byte at {}.", err.nul_position()),
        )
    })
}

/// Copy a raw result into an owned [`LibraryResult`].
///
/// # Safety
///
/// `raw.message` must be null or point to a NUL-terminated string that stays
/// valid for the duration of this call.
unsafe fn convert(raw: RawResult) -> LibraryResult {
    let message = if raw.message.is_null() {
        String::new()
    } else {
        // SAFETY: guaranteed by the caller.
        unsafe { CStr::from_ptr(raw.message) }
            .to_string_lossy()
            .into_owned()
    };
    match ErrorCode::from_raw(raw.code) {
        Some(code) => LibraryResult { code, message },
        None => LibraryResult::failure(
            ErrorCode::Unknown,
            format!("Unknown library result code {}: {}", raw.code, message),
        ),
    }
}

impl Configurator for NativeConfigurator {
    fn open_project(&mut self, project_file: &Path) -> LibraryResult {
        let project = match c_path(project_file, false) {
            Ok(project) => project,
            Err(result) => return result,
        };
        // SAFETY: pointer is valid for the duration of the call.
        let result = unsafe { convert((self.open)(project.as_ptr())) };
        if result.is_success() {
            self.project_open = true;
        }
        result
    }

    fn generate_stack_configuration(
        &mut self,
        output_dir: &Path,
        file_name: &str,
    ) -> LibraryResult {
        let (dir, name) = match (c_path(output_dir, true), c_string(file_name)) {
            (Ok(dir), Ok(name)) => (dir, name),
            (Err(result), _) | (_, Err(result)) => return result,
        };
        // SAFETY: pointers are valid for the duration of the call.
        unsafe {
            convert((self.generate_stack_configuration)(
                dir.as_ptr(),
                name.as_ptr(),
            ))
        }
    }

    fn generate_process_image_description(
        &mut self,
        language: OutputLanguage,
        output_dir: &Path,
        file_name: &str,
    ) -> LibraryResult {
        let (dir, name) = match (c_path(output_dir, true), c_string(file_name)) {
            (Ok(dir), Ok(name)) => (dir, name),
            (Err(result), _) | (_, Err(result)) => return result,
        };
        // SAFETY: pointers are valid for the duration of the call.
        unsafe {
            convert((self.generate_process_image)(
                language as c_int,
                dir.as_ptr(),
                name.as_ptr(),
            ))
        }
    }

    fn close_project(&mut self) -> LibraryResult {
        self.project_open = false;
        // SAFETY: no arguments; the returned message is copied at once.
        unsafe { convert((self.close)()) }
    }
}

impl Drop for NativeConfigurator {
    fn drop(&mut self) {
        if self.project_open {
            let result = self.close_project();
            if !result.is_success() {
                warn!(result = %result, "closing project on unload failed");
            }
        }
    }
}
