use std::fmt;

use inkwell::execution_engine::FunctionLookupError;
use inkwell::support::LLVMString;

pub type LiftResult<T = ()> = Result<T, LiftError>;

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum LiftErrorKind {
    /// A syntax-tree node shape with no lowering rule.
    UnsupportedConstruct,
    /// A value-position identifier not present in the active symbol table.
    UndeclaredVariable,
    /// A type-expression shape the resolver cannot interpret.
    UnsupportedAnnotation,
    /// More than one simultaneous assignment target.
    MultiTargetAssignment,
    /// A type descriptor with no sampling or marshaling rule.
    UnsupportedType,
    /// A failure in the native backend (parse, verify, engine, lookup).
    Compile,
}

impl fmt::Display for LiftErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                LiftErrorKind::UnsupportedConstruct => "unsupported construct",
                LiftErrorKind::UndeclaredVariable => "undeclared variable",
                LiftErrorKind::UnsupportedAnnotation => "unsupported annotation",
                LiftErrorKind::MultiTargetAssignment => "multi-target assignment",
                LiftErrorKind::UnsupportedType => "unsupported type",
                LiftErrorKind::Compile => "compile error",
            }
        )
    }
}

/// A terminal error. Every failure in translation, sampling, or native
/// compilation aborts the whole call; there is no partial result.
#[derive(Clone, Debug)]
pub struct LiftError {
    pub msg: String,
    pub kind: LiftErrorKind,
}

impl fmt::Display for LiftError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.msg)
    }
}

impl std::error::Error for LiftError {}

impl From<LLVMString> for LiftError {
    fn from(err: LLVMString) -> LiftError {
        LiftError {
            msg: err.to_string(),
            kind: LiftErrorKind::Compile,
        }
    }
}

impl From<FunctionLookupError> for LiftError {
    fn from(err: FunctionLookupError) -> LiftError {
        LiftError {
            msg: err.to_string(),
            kind: LiftErrorKind::Compile,
        }
    }
}
