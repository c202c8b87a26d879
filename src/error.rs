use crate::{ConstantPoolTag, HandleKind};
use java_string::{JavaString, Utf8Error};
use thiserror::Error;

/// Errors that mean the byte stream itself is malformed: bad header fields,
/// unknown tag or opcode bytes, or length accounting that does not add up.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StructuralError {
    #[error("wrong magic: {0:#010x}")]
    BadMagic(u32),
    #[error("unsupported class file major version: {0}")]
    UnsupportedVersion(u16),
    #[error("invalid constant pool count of zero")]
    InvalidPoolCount,
    #[error("unknown constant pool tag: {0}")]
    UnknownPoolTag(u8),
    #[error("eight-byte constant in final constant pool slot {0}")]
    EightByteConstantAtEnd(u16),
    #[error("unknown opcode: {0:#04x}")]
    UnknownOpcode(u8),
    #[error("wide prefix before non-widenable opcode {0}")]
    BadWidePrefix(&'static str),
    #[error("bytecode length mismatch: declared {declared}, decoded {decoded}")]
    CodeLengthMismatch { declared: u32, decoded: u32 },
    #[error("unknown stack map frame type: {0}")]
    UnknownFrameType(u8),
    #[error("unknown verification type tag: {0}")]
    UnknownVerificationType(u8),
    #[error("malformed descriptor: {0}")]
    MalformedDescriptor(JavaString),
    #[error("read past the end of the class file, position {position}, len {len}")]
    UnexpectedEof { position: usize, len: usize },
    #[error("modified utf8 error: {0}")]
    Utf8(#[from] Utf8Error),
}

/// Errors where every piece of the file is readable but pieces contradict
/// each other, usually a bad cross reference into the constant pool.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConsistencyError {
    #[error("bad constant pool index: {index}, pool size {len}")]
    BadPoolIndex { index: u16, len: usize },
    #[error("constant pool index {0} is the unusable slot after a long or double")]
    UnusedPoolSlot(u16),
    #[error("bad constant pool tag at index {index}: {actual}, expected {expected}")]
    WrongPoolTag {
        expected: ConstantPoolTag,
        actual: ConstantPoolTag,
        index: u16,
    },
    #[error("bad method handle reference kind: {0}")]
    BadHandleKind(u8),
    #[error("method handle kind {kind} does not allow a {tag} referent")]
    BadHandleReferent {
        kind: HandleKind,
        tag: ConstantPoolTag,
    },
    #[error("exception table entry with start_pc {start_pc} not below end_pc {end_pc}")]
    BadExceptionRange { start_pc: u16, end_pc: u16 },
    #[error("LocalVariableTypeTable entry for {name} (slot {index}) has no LocalVariableTable match")]
    UnmatchedLocalVariableType { name: JavaString, index: u16 },
    #[error("LocalVariableTypeTable has {lvtt} entries but LocalVariableTable only {lvt}")]
    OversizedLocalVariableTypeTable { lvtt: usize, lvt: usize },
    #[error("only one BootstrapMethods attribute is allowed per class")]
    DuplicateBootstrapMethods,
    #[error("{name} has more than one of public, protected, private set")]
    ConflictingVisibility { name: JavaString },
}

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ClassFileError {
    #[error(transparent)]
    Structural(#[from] StructuralError),
    #[error(transparent)]
    Consistency(#[from] ConsistencyError),
}

impl From<Utf8Error> for ClassFileError {
    fn from(err: Utf8Error) -> ClassFileError {
        ClassFileError::Structural(StructuralError::Utf8(err))
    }
}

pub type ClassFileResult<T> = Result<T, ClassFileError>;
