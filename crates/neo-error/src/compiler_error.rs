use crate::{BuilderError, CodecError};
use thiserror::Error;

/// Errors raised while lowering a class-file IR to NeoVM bytecode and a manifest.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CompilerError {
    #[error("unsupported JVM opcode 0x{0:02x} in method `{1}`")]
    UnsupportedOpcode(u8, String),

    #[error("operand size mismatch for @Instruction on `{0}`: expected {expected} byte(s), got {got}")]
    InstructionOperandMismatch { symbol: String, expected: usize, got: usize },

    #[error("@ContractHash on `{0}` must be a 20-byte script hash, got {1} bytes")]
    ContractHashLengthMismatch(String, usize),

    #[error("too many static fields in `{0}`: {1} exceeds 255")]
    TooManyStaticFields(String, usize),

    #[error("too many local variables in `{0}`: {1} exceeds 255")]
    TooManyLocals(String, usize),

    #[error("too many parameters in `{0}`: {1} exceeds 255")]
    TooManyParameters(String, usize),

    #[error("method `{0}` falls off the end without a RET")]
    MissingReturn(String),

    #[error("non-static field `{0}` is not allowed on the contract class tree")]
    NonStaticField(String),

    #[error("non-static method `{0}` is not allowed on the contract class tree")]
    NonStaticMethod(String),

    #[error("instance constructor with a meaningful body is not allowed on `{0}`")]
    NonTrivialConstructor(String),

    #[error("floating-point local `{0}` is not allowed")]
    FloatingPointLocal(String),

    #[error("class `{0}` has unsupported inheritance: only the contract root or an @Struct base is allowed")]
    UnsupportedInheritance(String),

    #[error("no class is marked as the contract's designated entry class")]
    NoContractClass,

    #[error("{0} classes are marked as the contract's designated entry class; exactly one is required")]
    MultipleContractClasses(usize),

    #[error("instanceof target `{0}` does not map to a NeoVM stack item type")]
    UnsupportedInstanceofTarget(String),

    #[error("unresolved call target `{0}`")]
    UnresolvedCallTarget(String),

    #[error("unresolved jump label `{0}` in method `{1}`")]
    UnresolvedLabel(String, String),

    #[error("throw construct in `{0}` takes at most one String argument")]
    UnsupportedThrowArgument(String),

    #[error("codec error: {0}")]
    CodecError(#[from] CodecError),

    #[error("builder error: {0}")]
    BuilderError(#[from] BuilderError),
}
