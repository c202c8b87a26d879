use crate::reader::ByteReader;
use crate::{ClassFileResult, ConsistencyError, HandleKind, StructuralError};
use java_string::{JavaStr, JavaString};
use strum::{Display, FromRepr};

#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Display, FromRepr)]
#[repr(u8)]
#[non_exhaustive]
pub enum ConstantPoolTag {
    Utf8 = 1,
    Integer = 3,
    Float = 4,
    Long = 5,
    Double = 6,
    Class = 7,
    String = 8,
    FieldRef = 9,
    MethodRef = 10,
    InterfaceMethodRef = 11,
    NameAndType = 12,
    MethodHandle = 15,
    MethodType = 16,
    InvokeDynamic = 18,
}

impl ConstantPoolTag {
    pub fn from_u8(tag: u8) -> ClassFileResult<ConstantPoolTag> {
        Self::from_repr(tag).ok_or_else(|| StructuralError::UnknownPoolTag(tag).into())
    }
}

/// One raw pool record as it sits in the file. Slot 0 and the slot after a
/// Long or Double carry no tag and must never be dereferenced.
#[derive(Debug, Clone, Default)]
pub(crate) struct RawEntry {
    pub(crate) tag: Option<ConstantPoolTag>,
    pub(crate) ref1: u16,
    pub(crate) ref2: u16,
    pub(crate) number: u64,
    pub(crate) bytes: Vec<u8>,
}

/// The resolved, symbolic view of a pool slot. Class references use the
/// dotted name form; method handle names are left in slash form so they can
/// be matched against the LambdaMetafactory signatures.
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum Constant {
    Utf8(JavaString),
    Integer(i32),
    Float(f32),
    Long(i64),
    Double(f64),
    /// A Class entry: the dotted class name, or the raw descriptor for
    /// array classes.
    Type(JavaString),
    StringLiteral(JavaString),
    FieldRef {
        class_name: JavaString,
        name: JavaString,
        descriptor: JavaString,
    },
    CallRef {
        class_name: JavaString,
        name: JavaString,
        descriptor: JavaString,
        /// `<class>.<name>:<descriptor>` with the dotted class name.
        identifier: JavaString,
    },
    NameAndType {
        name: JavaString,
        descriptor: JavaString,
    },
    MethodHandle {
        kind: HandleKind,
        /// `<class>.<name><descriptor>` with the slash-form class name.
        method_name: JavaString,
    },
    MethodType(JavaString),
    CallSite {
        bootstrap_method_index: u16,
        name: JavaString,
        descriptor: JavaString,
    },
    Unusable,
}

#[derive(Debug)]
pub struct ConstantPool {
    raw: Vec<RawEntry>,
    resolved: Vec<Constant>,
}

impl ConstantPool {
    /// Reads the pool count and every raw record, then resolves the
    /// symbolic view. Utf8 entries are decoded first so any entry may
    /// reference a later one.
    pub(crate) fn read(reader: &mut ByteReader) -> ClassFileResult<ConstantPool> {
        let count = reader.read_u16()?;
        if count == 0 {
            return Err(StructuralError::InvalidPoolCount.into());
        }

        let mut raw = Vec::with_capacity(count as usize);
        raw.push(RawEntry::default());
        let mut index = 1;
        while index < count {
            let tag = ConstantPoolTag::from_u8(reader.read_u8()?)?;
            let mut entry = RawEntry {
                tag: Some(tag),
                ..RawEntry::default()
            };
            match tag {
                ConstantPoolTag::Class
                | ConstantPoolTag::String
                | ConstantPoolTag::MethodType => entry.ref1 = reader.read_u16()?,
                ConstantPoolTag::FieldRef
                | ConstantPoolTag::MethodRef
                | ConstantPoolTag::InterfaceMethodRef
                | ConstantPoolTag::NameAndType
                | ConstantPoolTag::InvokeDynamic => {
                    entry.ref1 = reader.read_u16()?;
                    entry.ref2 = reader.read_u16()?;
                }
                ConstantPoolTag::MethodHandle => {
                    entry.ref1 = u16::from(reader.read_u8()?);
                    entry.ref2 = reader.read_u16()?;
                }
                ConstantPoolTag::Integer | ConstantPoolTag::Float => {
                    entry.number = u64::from(reader.read_u32()?)
                }
                ConstantPoolTag::Long | ConstantPoolTag::Double => {
                    entry.number = reader.read_u64()?
                }
                ConstantPoolTag::Utf8 => {
                    let length = reader.read_u16()?;
                    entry.bytes = reader.read_bytes(length as usize)?.to_vec();
                }
            }
            raw.push(entry);
            if matches!(tag, ConstantPoolTag::Long | ConstantPoolTag::Double) {
                // eight-byte constants occupy the following slot too
                index += 1;
                if index >= count {
                    return Err(StructuralError::EightByteConstantAtEnd(index - 1).into());
                }
                raw.push(RawEntry::default());
            }
            index += 1;
        }

        let mut resolved = Vec::with_capacity(raw.len());
        for entry in &raw {
            resolved.push(match entry.tag {
                Some(ConstantPoolTag::Utf8) => {
                    Constant::Utf8(JavaStr::from_modified_utf8(&entry.bytes)?.into_owned())
                }
                _ => Constant::Unusable,
            });
        }
        let mut pool = ConstantPool { raw, resolved };
        for index in 1..pool.raw.len() {
            if matches!(
                pool.raw[index].tag,
                None | Some(ConstantPoolTag::Utf8)
            ) {
                continue;
            }
            let constant = pool.resolve_entry(index as u16)?;
            pool.resolved[index] = constant;
        }
        Ok(pool)
    }

    fn resolve_entry(&self, index: u16) -> ClassFileResult<Constant> {
        let entry = self.entry(index)?;
        let Some(tag) = entry.tag else {
            return Ok(Constant::Unusable);
        };
        Ok(match tag {
            ConstantPoolTag::Utf8 => self.resolved[index as usize].clone(),
            ConstantPoolTag::Integer => Constant::Integer(entry.number as u32 as i32),
            ConstantPoolTag::Float => Constant::Float(f32::from_bits(entry.number as u32)),
            ConstantPoolTag::Long => Constant::Long(entry.number as i64),
            ConstantPoolTag::Double => Constant::Double(f64::from_bits(entry.number)),
            ConstantPoolTag::Class => {
                let name = self.utf8(entry.ref1)?;
                if name.as_bytes().first() == Some(&b'[') {
                    Constant::Type(name.to_owned())
                } else {
                    Constant::Type(dotted_class_name(name))
                }
            }
            ConstantPoolTag::String => Constant::StringLiteral(self.utf8(entry.ref1)?.to_owned()),
            ConstantPoolTag::FieldRef => {
                let class_name = self.class_name(entry.ref1)?;
                let (name, descriptor) = self.name_and_type(entry.ref2)?;
                Constant::FieldRef {
                    class_name,
                    name: name.to_owned(),
                    descriptor: descriptor.to_owned(),
                }
            }
            ConstantPoolTag::MethodRef | ConstantPoolTag::InterfaceMethodRef => {
                let class_name = self.class_name(entry.ref1)?;
                let (name, descriptor) = self.name_and_type(entry.ref2)?;
                let mut identifier = JavaString::with_capacity(
                    class_name.len() + name.len() + descriptor.len() + 2,
                );
                identifier.push_java_str(&class_name);
                identifier.push('.');
                identifier.push_java_str(name);
                identifier.push(':');
                identifier.push_java_str(descriptor);
                Constant::CallRef {
                    class_name,
                    name: name.to_owned(),
                    descriptor: descriptor.to_owned(),
                    identifier,
                }
            }
            ConstantPoolTag::NameAndType => {
                let (name, descriptor) = self.name_and_type(index)?;
                Constant::NameAndType {
                    name: name.to_owned(),
                    descriptor: descriptor.to_owned(),
                }
            }
            ConstantPoolTag::MethodHandle => {
                let kind = HandleKind::from_u8(entry.ref1 as u8)?;
                let referent = self.entry(entry.ref2)?;
                let referent_tag = match referent.tag {
                    Some(tag) => tag,
                    None => return Err(ConsistencyError::UnusedPoolSlot(entry.ref2).into()),
                };
                let allowed = match kind {
                    HandleKind::GetField
                    | HandleKind::GetStatic
                    | HandleKind::PutField
                    | HandleKind::PutStatic => referent_tag == ConstantPoolTag::FieldRef,
                    HandleKind::InvokeVirtual | HandleKind::NewInvokeSpecial => {
                        referent_tag == ConstantPoolTag::MethodRef
                    }
                    HandleKind::InvokeStatic | HandleKind::InvokeSpecial => matches!(
                        referent_tag,
                        ConstantPoolTag::MethodRef | ConstantPoolTag::InterfaceMethodRef
                    ),
                    HandleKind::InvokeInterface => {
                        referent_tag == ConstantPoolTag::InterfaceMethodRef
                    }
                };
                if !allowed {
                    return Err(ConsistencyError::BadHandleReferent {
                        kind,
                        tag: referent_tag,
                    }
                    .into());
                }
                let class_name = self.utf8(self.expect(referent.ref1, ConstantPoolTag::Class)?.ref1)?;
                let (name, descriptor) = self.name_and_type(referent.ref2)?;
                let mut method_name = JavaString::with_capacity(
                    class_name.len() + name.len() + descriptor.len() + 1,
                );
                method_name.push_java_str(class_name);
                method_name.push('.');
                method_name.push_java_str(name);
                method_name.push_java_str(descriptor);
                Constant::MethodHandle { kind, method_name }
            }
            ConstantPoolTag::MethodType => Constant::MethodType(self.utf8(entry.ref1)?.to_owned()),
            ConstantPoolTag::InvokeDynamic => {
                let (name, descriptor) = self.name_and_type(entry.ref2)?;
                Constant::CallSite {
                    bootstrap_method_index: entry.ref1,
                    name: name.to_owned(),
                    descriptor: descriptor.to_owned(),
                }
            }
        })
    }

    pub(crate) fn entry(&self, index: u16) -> ClassFileResult<&RawEntry> {
        match self.raw.get(index as usize) {
            Some(entry) if index != 0 => Ok(entry),
            _ => Err(ConsistencyError::BadPoolIndex {
                index,
                len: self.raw.len(),
            }
            .into()),
        }
    }

    pub(crate) fn expect(
        &self,
        index: u16,
        expected: ConstantPoolTag,
    ) -> ClassFileResult<&RawEntry> {
        let entry = self.entry(index)?;
        match entry.tag {
            Some(actual) if actual == expected => Ok(entry),
            Some(actual) => Err(ConsistencyError::WrongPoolTag {
                expected,
                actual,
                index,
            }
            .into()),
            None => Err(ConsistencyError::UnusedPoolSlot(index).into()),
        }
    }

    /// The resolved constant at `index`. Dereferencing slot 0 or the
    /// placeholder slot after a Long or Double is an error.
    pub fn constant(&self, index: u16) -> ClassFileResult<&Constant> {
        let entry = self.entry(index)?;
        if entry.tag.is_none() {
            return Err(ConsistencyError::UnusedPoolSlot(index).into());
        }
        Ok(&self.resolved[index as usize])
    }

    pub fn utf8(&self, index: u16) -> ClassFileResult<&JavaStr> {
        self.expect(index, ConstantPoolTag::Utf8)?;
        match &self.resolved[index as usize] {
            Constant::Utf8(string) => Ok(string),
            _ => Err(ConsistencyError::UnusedPoolSlot(index).into()),
        }
    }

    /// The dotted name of the Class entry at `index`.
    pub fn class_name(&self, index: u16) -> ClassFileResult<JavaString> {
        let entry = self.expect(index, ConstantPoolTag::Class)?;
        Ok(dotted_class_name(self.utf8(entry.ref1)?))
    }

    /// As [`Self::class_name`], with index 0 meaning absent.
    pub fn optional_class_name(&self, index: u16) -> ClassFileResult<Option<JavaString>> {
        if index == 0 {
            return Ok(None);
        }
        self.class_name(index).map(Some)
    }

    pub(crate) fn name_and_type(&self, index: u16) -> ClassFileResult<(&JavaStr, &JavaStr)> {
        let entry = self.expect(index, ConstantPoolTag::NameAndType)?;
        Ok((self.utf8(entry.ref1)?, self.utf8(entry.ref2)?))
    }

    /// Iterates the populated slots, skipping slot 0 and Long/Double
    /// placeholders.
    pub(crate) fn entries(&self) -> impl Iterator<Item = (u16, &RawEntry)> {
        self.raw
            .iter()
            .enumerate()
            .filter(|(_, entry)| entry.tag.is_some())
            .map(|(index, entry)| (index as u16, entry))
    }
}

/// Converts a binary class name to its dotted form, `java/lang/Object`
/// to `java.lang.Object`.
pub(crate) fn dotted_class_name(name: &JavaStr) -> JavaString {
    let mut result = JavaString::with_capacity(name.len());
    for ch in name.chars() {
        if ch == '/' {
            result.push('.');
        } else {
            result.push_java(ch);
        }
    }
    result
}
