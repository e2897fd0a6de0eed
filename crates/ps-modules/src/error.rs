//! Loader error kinds.
//!
//! Every failure mode a host can act on gets its own variant; evaluation
//! errors inside module bindings pass through unchanged. A dependency
//! failure is wrapped so the host can tell the importing module from the
//! module that actually failed by walking the `source` chain.

use ps_types::PsError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoadError {
    /// The location was neither an absolute URL nor resolvable against the
    /// importing module.
    #[error("invalid module location '{location}'")]
    InvalidLocation {
        location: String,
        #[source]
        source: url::ParseError,
    },

    #[error("unsupported protocol '{scheme}' in '{url}'")]
    UnsupportedProtocol { url: String, scheme: String },

    #[error("could not read '{url}'")]
    Io {
        url: String,
        #[source]
        source: std::io::Error,
    },

    #[error("import is missing its '{field}' field")]
    MissingImportField { field: &'static str },

    #[error("malformed import: {message}")]
    InvalidImportShape { message: String },

    #[error("'{from}' does not export '{name}'")]
    UndefinedExport { from: String, name: String },

    /// A module binding tried to redefine a global form.
    #[error("cannot override global binding '{name}'")]
    GlobalOverride { name: String },

    #[error("no native module support for '{url}'")]
    NativeUnsupported { url: String },

    /// A dependency of `url` failed to load; the actual failure is the cause.
    #[error("failed to load a dependency of '{url}'")]
    Dependency {
        url: String,
        #[source]
        source: Box<LoadError>,
    },

    #[error(transparent)]
    Eval(#[from] PsError),
}
