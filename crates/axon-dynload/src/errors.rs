use thiserror::Error;

#[derive(Debug, Error)]
pub enum DynloadError {
    /// The platform linker refused to map the shared object. `reason` is the
    /// linker's own `dlerror` text, not something this crate composes.
    #[error("failed to load shared object `{path}`: {reason}")]
    DynamicLoad { path: String, reason: String },
}

pub type Result<T> = std::result::Result<T, DynloadError>;
