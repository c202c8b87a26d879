use crate::opcodes::{bytecode_info, OperandFormat, WIDE};
use crate::reader::ByteReader;
use crate::tree::{Instruction, Operand, SourceLocation};
use crate::{ClassFileResult, ConstantPool, NewArrayType, StructuralError};
use log::warn;

/// Decodes `code_length` bytes of bytecode into instructions. Branch
/// operands are converted to absolute addresses; switch padding is counted
/// relative to the start of the code array.
pub(crate) fn read_instructions(
    reader: &mut ByteReader,
    pool: &ConstantPool,
    code_length: u32,
) -> ClassFileResult<Vec<Instruction>> {
    let code_start = reader.position();
    let mut instructions = Vec::new();
    let mut bytecode_index = 0;

    while reader.position() - code_start < code_length as usize {
        let address = (reader.position() - code_start) as u32;
        let mut opcode = reader.read_u8()?;
        let wide = opcode == WIDE;
        if wide {
            opcode = reader.read_u8()?;
        }
        let info =
            bytecode_info(opcode).ok_or(StructuralError::UnknownOpcode(opcode))?;
        if wide
            && !matches!(
                info.format,
                OperandFormat::LocalVar | OperandFormat::LocalVarDelta
            )
        {
            return Err(StructuralError::BadWidePrefix(info.mnemonic).into());
        }

        let mut operands = Vec::new();
        match info.format {
            OperandFormat::NoOperand => {}
            OperandFormat::Const1 => {
                let index = u16::from(reader.read_u8()?);
                operands.push(Operand::Pool(pool.constant(index)?.clone()));
            }
            OperandFormat::Const2 => {
                let index = reader.read_u16()?;
                operands.push(Operand::Pool(pool.constant(index)?.clone()));
            }
            OperandFormat::Const2TwoU1 => {
                let index = reader.read_u16()?;
                operands.push(Operand::Pool(pool.constant(index)?.clone()));
                operands.push(Operand::UnsignedByte(reader.read_u8()?));
                operands.push(Operand::UnsignedByte(reader.read_u8()?));
            }
            OperandFormat::SignedByte => operands.push(Operand::SignedByte(reader.read_i8()?)),
            OperandFormat::SignedShort => {
                operands.push(Operand::SignedShort(reader.read_i16()?))
            }
            OperandFormat::Branch2 => {
                let offset = i32::from(reader.read_i16()?);
                operands.push(Operand::Target(address.wrapping_add_signed(offset)));
            }
            OperandFormat::Branch4 => {
                let offset = reader.read_i32()?;
                operands.push(Operand::Target(address.wrapping_add_signed(offset)));
            }
            OperandFormat::LocalVar => {
                operands.push(Operand::Local(read_local_slot(reader, wide)?));
            }
            OperandFormat::LocalVarDelta => {
                operands.push(Operand::Local(read_local_slot(reader, wide)?));
                let delta = if wide {
                    reader.read_i16()?
                } else {
                    i16::from(reader.read_i8()?)
                };
                operands.push(Operand::SignedShort(delta));
            }
            OperandFormat::LookupSwitch => {
                skip_switch_padding(reader, code_start)?;
                let default = reader.read_i32()?;
                operands.push(Operand::Target(address.wrapping_add_signed(default)));
                let npairs = reader.read_u32()?;
                for _ in 0..npairs {
                    let matched = reader.read_i32()?;
                    let offset = reader.read_i32()?;
                    operands.push(Operand::Match(matched));
                    operands.push(Operand::Target(address.wrapping_add_signed(offset)));
                }
            }
            OperandFormat::TableSwitch => {
                skip_switch_padding(reader, code_start)?;
                let default = reader.read_i32()?;
                operands.push(Operand::Target(address.wrapping_add_signed(default)));
                let low = reader.read_i32()?;
                let high = reader.read_i32()?;
                for matched in low..=high {
                    let offset = reader.read_i32()?;
                    operands.push(Operand::Match(matched));
                    operands.push(Operand::Target(address.wrapping_add_signed(offset)));
                }
            }
            OperandFormat::MultiANewArray => {
                let index = reader.read_u16()?;
                operands.push(Operand::Pool(pool.constant(index)?.clone()));
                operands.push(Operand::Dimensions(reader.read_u8()?));
            }
            OperandFormat::ArrayType => {
                let code = reader.read_u8()?;
                let element_type = NewArrayType::from_u8(code);
                if element_type.is_none() {
                    warn!("newarray with unassigned element type code {code}");
                }
                operands.push(Operand::ElementType(element_type));
            }
        }

        instructions.push(Instruction {
            mnemonic: info.mnemonic,
            address,
            bytecode_index,
            operands,
            source_location: SourceLocation::default(),
        });
        bytecode_index += 1;
    }

    let decoded = (reader.position() - code_start) as u32;
    if decoded != code_length {
        return Err(StructuralError::CodeLengthMismatch {
            declared: code_length,
            decoded,
        }
        .into());
    }
    Ok(instructions)
}

fn read_local_slot(reader: &mut ByteReader, wide: bool) -> ClassFileResult<u16> {
    if wide {
        reader.read_u16()
    } else {
        Ok(u16::from(reader.read_u8()?))
    }
}

/// Switch payloads start at the next four-byte boundary of the code array.
fn skip_switch_padding(reader: &mut ByteReader, code_start: usize) -> ClassFileResult<()> {
    while (reader.position() - code_start) % 4 != 0 {
        reader.read_u8()?;
    }
    Ok(())
}
