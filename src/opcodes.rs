use strum::{Display, FromRepr};

/// How the bytes following an opcode are laid out.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum OperandFormat {
    NoOperand,
    /// One-byte constant pool index (ldc).
    Const1,
    /// Two-byte constant pool index.
    Const2,
    /// Two-byte constant pool index followed by two raw bytes
    /// (invokeinterface, invokedynamic).
    Const2TwoU1,
    SignedByte,
    SignedShort,
    /// Two-byte signed branch offset.
    Branch2,
    /// Four-byte signed branch offset (goto_w, jsr_w).
    Branch4,
    /// Local variable slot (loads, stores, ret); widenable.
    LocalVar,
    /// Local variable slot plus signed increment (iinc); widenable.
    LocalVarDelta,
    LookupSwitch,
    TableSwitch,
    /// Two-byte constant pool index plus dimension count.
    MultiANewArray,
    /// Primitive array element type code (newarray).
    ArrayType,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct BytecodeInfo {
    pub mnemonic: &'static str,
    pub format: OperandFormat,
}

pub(crate) const WIDE: u8 = 0xc4;

/// Primitive element type codes for newarray.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Display, FromRepr)]
#[repr(u8)]
pub enum NewArrayType {
    Boolean = 4,
    Char = 5,
    Float = 6,
    Double = 7,
    Byte = 8,
    Short = 9,
    Int = 10,
    Long = 11,
}

impl NewArrayType {
    pub fn from_u8(code: u8) -> Option<NewArrayType> {
        Self::from_repr(code)
    }
}

/// The mnemonic and operand layout of `opcode`, or `None` when the byte is
/// not an assigned instruction. The wide prefix (0xc4) is not listed here;
/// the decoder treats it as a modifier.
pub(crate) const fn bytecode_info(opcode: u8) -> Option<BytecodeInfo> {
    use OperandFormat::*;

    const fn info(mnemonic: &'static str, format: OperandFormat) -> Option<BytecodeInfo> {
        Some(BytecodeInfo { mnemonic, format })
    }

    match opcode {
        0x00 => info("nop", NoOperand),
        0x01 => info("aconst_null", NoOperand),
        0x02 => info("iconst_m1", NoOperand),
        0x03 => info("iconst_0", NoOperand),
        0x04 => info("iconst_1", NoOperand),
        0x05 => info("iconst_2", NoOperand),
        0x06 => info("iconst_3", NoOperand),
        0x07 => info("iconst_4", NoOperand),
        0x08 => info("iconst_5", NoOperand),
        0x09 => info("lconst_0", NoOperand),
        0x0a => info("lconst_1", NoOperand),
        0x0b => info("fconst_0", NoOperand),
        0x0c => info("fconst_1", NoOperand),
        0x0d => info("fconst_2", NoOperand),
        0x0e => info("dconst_0", NoOperand),
        0x0f => info("dconst_1", NoOperand),
        0x10 => info("bipush", SignedByte),
        0x11 => info("sipush", SignedShort),
        0x12 => info("ldc", Const1),
        0x13 => info("ldc_w", Const2),
        0x14 => info("ldc2_w", Const2),
        0x15 => info("iload", LocalVar),
        0x16 => info("lload", LocalVar),
        0x17 => info("fload", LocalVar),
        0x18 => info("dload", LocalVar),
        0x19 => info("aload", LocalVar),
        0x1a => info("iload_0", NoOperand),
        0x1b => info("iload_1", NoOperand),
        0x1c => info("iload_2", NoOperand),
        0x1d => info("iload_3", NoOperand),
        0x1e => info("lload_0", NoOperand),
        0x1f => info("lload_1", NoOperand),
        0x20 => info("lload_2", NoOperand),
        0x21 => info("lload_3", NoOperand),
        0x22 => info("fload_0", NoOperand),
        0x23 => info("fload_1", NoOperand),
        0x24 => info("fload_2", NoOperand),
        0x25 => info("fload_3", NoOperand),
        0x26 => info("dload_0", NoOperand),
        0x27 => info("dload_1", NoOperand),
        0x28 => info("dload_2", NoOperand),
        0x29 => info("dload_3", NoOperand),
        0x2a => info("aload_0", NoOperand),
        0x2b => info("aload_1", NoOperand),
        0x2c => info("aload_2", NoOperand),
        0x2d => info("aload_3", NoOperand),
        0x2e => info("iaload", NoOperand),
        0x2f => info("laload", NoOperand),
        0x30 => info("faload", NoOperand),
        0x31 => info("daload", NoOperand),
        0x32 => info("aaload", NoOperand),
        0x33 => info("baload", NoOperand),
        0x34 => info("caload", NoOperand),
        0x35 => info("saload", NoOperand),
        0x36 => info("istore", LocalVar),
        0x37 => info("lstore", LocalVar),
        0x38 => info("fstore", LocalVar),
        0x39 => info("dstore", LocalVar),
        0x3a => info("astore", LocalVar),
        0x3b => info("istore_0", NoOperand),
        0x3c => info("istore_1", NoOperand),
        0x3d => info("istore_2", NoOperand),
        0x3e => info("istore_3", NoOperand),
        0x3f => info("lstore_0", NoOperand),
        0x40 => info("lstore_1", NoOperand),
        0x41 => info("lstore_2", NoOperand),
        0x42 => info("lstore_3", NoOperand),
        0x43 => info("fstore_0", NoOperand),
        0x44 => info("fstore_1", NoOperand),
        0x45 => info("fstore_2", NoOperand),
        0x46 => info("fstore_3", NoOperand),
        0x47 => info("dstore_0", NoOperand),
        0x48 => info("dstore_1", NoOperand),
        0x49 => info("dstore_2", NoOperand),
        0x4a => info("dstore_3", NoOperand),
        0x4b => info("astore_0", NoOperand),
        0x4c => info("astore_1", NoOperand),
        0x4d => info("astore_2", NoOperand),
        0x4e => info("astore_3", NoOperand),
        0x4f => info("iastore", NoOperand),
        0x50 => info("lastore", NoOperand),
        0x51 => info("fastore", NoOperand),
        0x52 => info("dastore", NoOperand),
        0x53 => info("aastore", NoOperand),
        0x54 => info("bastore", NoOperand),
        0x55 => info("castore", NoOperand),
        0x56 => info("sastore", NoOperand),
        0x57 => info("pop", NoOperand),
        0x58 => info("pop2", NoOperand),
        0x59 => info("dup", NoOperand),
        0x5a => info("dup_x1", NoOperand),
        0x5b => info("dup_x2", NoOperand),
        0x5c => info("dup2", NoOperand),
        0x5d => info("dup2_x1", NoOperand),
        0x5e => info("dup2_x2", NoOperand),
        0x5f => info("swap", NoOperand),
        0x60 => info("iadd", NoOperand),
        0x61 => info("ladd", NoOperand),
        0x62 => info("fadd", NoOperand),
        0x63 => info("dadd", NoOperand),
        0x64 => info("isub", NoOperand),
        0x65 => info("lsub", NoOperand),
        0x66 => info("fsub", NoOperand),
        0x67 => info("dsub", NoOperand),
        0x68 => info("imul", NoOperand),
        0x69 => info("lmul", NoOperand),
        0x6a => info("fmul", NoOperand),
        0x6b => info("dmul", NoOperand),
        0x6c => info("idiv", NoOperand),
        0x6d => info("ldiv", NoOperand),
        0x6e => info("fdiv", NoOperand),
        0x6f => info("ddiv", NoOperand),
        0x70 => info("irem", NoOperand),
        0x71 => info("lrem", NoOperand),
        0x72 => info("frem", NoOperand),
        0x73 => info("drem", NoOperand),
        0x74 => info("ineg", NoOperand),
        0x75 => info("lneg", NoOperand),
        0x76 => info("fneg", NoOperand),
        0x77 => info("dneg", NoOperand),
        0x78 => info("ishl", NoOperand),
        0x79 => info("lshl", NoOperand),
        0x7a => info("ishr", NoOperand),
        0x7b => info("lshr", NoOperand),
        0x7c => info("iushr", NoOperand),
        0x7d => info("lushr", NoOperand),
        0x7e => info("iand", NoOperand),
        0x7f => info("land", NoOperand),
        0x80 => info("ior", NoOperand),
        0x81 => info("lor", NoOperand),
        0x82 => info("ixor", NoOperand),
        0x83 => info("lxor", NoOperand),
        0x84 => info("iinc", LocalVarDelta),
        0x85 => info("i2l", NoOperand),
        0x86 => info("i2f", NoOperand),
        0x87 => info("i2d", NoOperand),
        0x88 => info("l2i", NoOperand),
        0x89 => info("l2f", NoOperand),
        0x8a => info("l2d", NoOperand),
        0x8b => info("f2i", NoOperand),
        0x8c => info("f2l", NoOperand),
        0x8d => info("f2d", NoOperand),
        0x8e => info("d2i", NoOperand),
        0x8f => info("d2l", NoOperand),
        0x90 => info("d2f", NoOperand),
        0x91 => info("i2b", NoOperand),
        0x92 => info("i2c", NoOperand),
        0x93 => info("i2s", NoOperand),
        0x94 => info("lcmp", NoOperand),
        0x95 => info("fcmpl", NoOperand),
        0x96 => info("fcmpg", NoOperand),
        0x97 => info("dcmpl", NoOperand),
        0x98 => info("dcmpg", NoOperand),
        0x99 => info("ifeq", Branch2),
        0x9a => info("ifne", Branch2),
        0x9b => info("iflt", Branch2),
        0x9c => info("ifge", Branch2),
        0x9d => info("ifgt", Branch2),
        0x9e => info("ifle", Branch2),
        0x9f => info("if_icmpeq", Branch2),
        0xa0 => info("if_icmpne", Branch2),
        0xa1 => info("if_icmplt", Branch2),
        0xa2 => info("if_icmpge", Branch2),
        0xa3 => info("if_icmpgt", Branch2),
        0xa4 => info("if_icmple", Branch2),
        0xa5 => info("if_acmpeq", Branch2),
        0xa6 => info("if_acmpne", Branch2),
        0xa7 => info("goto", Branch2),
        0xa8 => info("jsr", Branch2),
        0xa9 => info("ret", LocalVar),
        0xaa => info("tableswitch", TableSwitch),
        0xab => info("lookupswitch", LookupSwitch),
        0xac => info("ireturn", NoOperand),
        0xad => info("lreturn", NoOperand),
        0xae => info("freturn", NoOperand),
        0xaf => info("dreturn", NoOperand),
        0xb0 => info("areturn", NoOperand),
        0xb1 => info("return", NoOperand),
        0xb2 => info("getstatic", Const2),
        0xb3 => info("putstatic", Const2),
        0xb4 => info("getfield", Const2),
        0xb5 => info("putfield", Const2),
        0xb6 => info("invokevirtual", Const2),
        0xb7 => info("invokespecial", Const2),
        0xb8 => info("invokestatic", Const2),
        0xb9 => info("invokeinterface", Const2TwoU1),
        0xba => info("invokedynamic", Const2TwoU1),
        0xbb => info("new", Const2),
        0xbc => info("newarray", ArrayType),
        0xbd => info("anewarray", Const2),
        0xbe => info("arraylength", NoOperand),
        0xbf => info("athrow", NoOperand),
        0xc0 => info("checkcast", Const2),
        0xc1 => info("instanceof", Const2),
        0xc2 => info("monitorenter", NoOperand),
        0xc3 => info("monitorexit", NoOperand),
        0xc5 => info("multianewarray", MultiANewArray),
        0xc6 => info("ifnull", Branch2),
        0xc7 => info("ifnonnull", Branch2),
        0xc8 => info("goto_w", Branch4),
        0xc9 => info("jsr_w", Branch4),
        _ => None,
    }
}
