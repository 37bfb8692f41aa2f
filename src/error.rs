use thiserror::Error;

use crate::wire::DecodeError;
use crate::CompileError;

/// Unified error type covering decoding, compilation, and I/O.
///
/// Returned by convenience methods like
/// [`Compiler::compile_str()`](crate::Compiler::compile_str) and
/// [`Compiler::compile_file()`](crate::Compiler::compile_file).
#[derive(Debug, Error)]
pub enum LogicaError {
    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error(transparent)]
    Compile(#[from] CompileError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
