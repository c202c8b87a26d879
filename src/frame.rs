use crate::reader::ByteReader;
use crate::{ClassFileResult, StructuralError};

/// A StackMapTable frame, decoded from its frame-type byte.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StackMapFrame {
    /// Frame types 0..=63.
    Same,
    /// Frame types 64..=127.
    SameLocalsOneStack { stack: VerificationTypeInfo },
    /// Frame type 247.
    SameLocalsOneStackExtended {
        offset_delta: u16,
        stack: VerificationTypeInfo,
    },
    /// Frame types 248..=250; the number of chopped locals is implied by
    /// the frame-type byte and not stored.
    Chop { offset_delta: u16 },
    /// Frame type 251.
    SameExtended { offset_delta: u16 },
    /// Frame types 252..=254.
    Append {
        offset_delta: u16,
        locals: Vec<VerificationTypeInfo>,
    },
    /// Frame type 255.
    Full {
        offset_delta: u16,
        locals: Vec<VerificationTypeInfo>,
        stack: Vec<VerificationTypeInfo>,
    },
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum VerificationTypeInfo {
    Top,
    Integer,
    Float,
    Long,
    Double,
    Null,
    UninitializedThis,
    Object { cpool_index: u16 },
    Uninitialized { offset: u16 },
}

pub(crate) fn read_stack_map_frame(reader: &mut ByteReader) -> ClassFileResult<StackMapFrame> {
    let frame_type = reader.read_u8()?;
    match frame_type {
        0..=63 => Ok(StackMapFrame::Same),
        64..=127 => Ok(StackMapFrame::SameLocalsOneStack {
            stack: read_verification_type(reader)?,
        }),
        247 => Ok(StackMapFrame::SameLocalsOneStackExtended {
            offset_delta: reader.read_u16()?,
            stack: read_verification_type(reader)?,
        }),
        248..=250 => Ok(StackMapFrame::Chop {
            offset_delta: reader.read_u16()?,
        }),
        251 => Ok(StackMapFrame::SameExtended {
            offset_delta: reader.read_u16()?,
        }),
        252..=254 => {
            let offset_delta = reader.read_u16()?;
            let count = usize::from(frame_type - 251);
            let mut locals = Vec::with_capacity(count);
            for _ in 0..count {
                locals.push(read_verification_type(reader)?);
            }
            Ok(StackMapFrame::Append {
                offset_delta,
                locals,
            })
        }
        255 => {
            let offset_delta = reader.read_u16()?;
            let locals_count = reader.read_u16()?;
            let mut locals = Vec::with_capacity(locals_count as usize);
            for _ in 0..locals_count {
                locals.push(read_verification_type(reader)?);
            }
            let stack_count = reader.read_u16()?;
            let mut stack = Vec::with_capacity(stack_count as usize);
            for _ in 0..stack_count {
                stack.push(read_verification_type(reader)?);
            }
            Ok(StackMapFrame::Full {
                offset_delta,
                locals,
                stack,
            })
        }
        _ => Err(StructuralError::UnknownFrameType(frame_type).into()),
    }
}

fn read_verification_type(reader: &mut ByteReader) -> ClassFileResult<VerificationTypeInfo> {
    let tag = reader.read_u8()?;
    Ok(match tag {
        0 => VerificationTypeInfo::Top,
        1 => VerificationTypeInfo::Integer,
        2 => VerificationTypeInfo::Float,
        3 => VerificationTypeInfo::Long,
        4 => VerificationTypeInfo::Double,
        5 => VerificationTypeInfo::Null,
        6 => VerificationTypeInfo::UninitializedThis,
        7 => VerificationTypeInfo::Object {
            cpool_index: reader.read_u16()?,
        },
        8 => VerificationTypeInfo::Uninitialized {
            offset: reader.read_u16()?,
        },
        _ => return Err(StructuralError::UnknownVerificationType(tag).into()),
    })
}
