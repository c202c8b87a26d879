use crate::tree::Annotation;
use crate::{Constant, MethodAccess, NewArrayType, StackMapFrame};
use java_string::JavaString;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Method {
    pub name: JavaString,
    pub descriptor: JavaString,
    pub signature: Option<JavaString>,
    pub access: MethodAccess,
    pub instructions: Vec<Instruction>,
    pub exception_table: Vec<ExceptionTableEntry>,
    pub local_variable_table: Vec<LocalVariable>,
    pub stack_map_table: Vec<StackMapFrame>,
    pub annotations: Vec<Annotation>,
    pub source_location: SourceLocation,
}

/// One decoded instruction. `address` is the byte offset of the opcode
/// within the code array, `bytecode_index` its ordinal position.
#[derive(Debug, Clone, PartialEq)]
pub struct Instruction {
    pub mnemonic: &'static str,
    pub address: u32,
    pub bytecode_index: usize,
    pub operands: Vec<Operand>,
    pub source_location: SourceLocation,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Operand {
    /// A resolved constant pool operand.
    Pool(Constant),
    SignedByte(i8),
    SignedShort(i16),
    UnsignedByte(u8),
    /// A lookupswitch or tableswitch match value.
    Match(i32),
    /// A local variable slot; always widened to u16.
    Local(u16),
    /// An absolute branch target within the code array.
    Target(u32),
    /// The element type of newarray; `None` for unassigned type codes.
    ElementType(Option<NewArrayType>),
    /// The dimension count of multianewarray.
    Dimensions(u8),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExceptionTableEntry {
    pub start_pc: u16,
    pub end_pc: u16,
    pub handler_pc: u16,
    /// Dotted catch type, `None` for catch-all handlers.
    pub catch_type: Option<JavaString>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalVariable {
    pub index: u16,
    pub name: JavaString,
    pub descriptor: JavaString,
    /// Generic signature overlaid from the LocalVariableTypeTable.
    pub signature: Option<JavaString>,
    pub start_pc: u16,
    pub length: u16,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SourceLocation {
    pub file: Option<JavaString>,
    pub line: Option<u16>,
    pub function: Option<JavaString>,
}
