use crate::access::visibility_is_consistent;
use crate::bytecode::read_instructions;
use crate::constant_pool::dotted_class_name;
use crate::constants::{attribute, MAGIC, MIN_MAJOR_VERSION};
use crate::descriptor::{collect_class_refs, java_type_from_descriptor, signature_class_refs};
use crate::frame::read_stack_map_frame;
use crate::handle::parse_method_handle;
use crate::reader::ByteReader;
use crate::tree::{
    Annotation, ClassFile, ExceptionTableEntry, Field, LocalVariable, Method, ParseTree,
};
use crate::{
    ClassAccess, ClassFileResult, ConsistencyError, Constant, ConstantPool, ConstantPoolTag,
    FieldAccess, MethodAccess, MethodHandleType, StructuralError,
};
use indexmap::IndexSet;
use java_string::{JavaStr, JavaString};
use log::{debug, warn};
use std::collections::HashMap;

/// Parses a complete class file image into a [`ParseTree`]: the decoded
/// class plus the set of classes it references.
pub fn parse_class_file(data: &[u8]) -> ClassFileResult<ParseTree> {
    let mut parser = ClassFileParser::new(data)?;
    let parsed_class = parser.parse()?;
    let class_refs = parser.class_refs(&parsed_class)?;
    Ok(ParseTree {
        parsed_class,
        class_refs,
    })
}

struct ClassFileParser<'class> {
    reader: ByteReader<'class>,
    pool: ConstantPool,
    minor_version: u16,
    major_version: u16,
}

impl<'class> ClassFileParser<'class> {
    fn new(data: &'class [u8]) -> ClassFileResult<ClassFileParser<'class>> {
        let mut reader = ByteReader::new(data);

        let magic = reader.read_u32()?;
        if magic != MAGIC {
            return Err(StructuralError::BadMagic(magic).into());
        }
        let minor_version = reader.read_u16()?;
        let major_version = reader.read_u16()?;
        if major_version < MIN_MAJOR_VERSION {
            return Err(StructuralError::UnsupportedVersion(major_version).into());
        }

        let pool = ConstantPool::read(&mut reader)?;
        Ok(ClassFileParser {
            reader,
            pool,
            minor_version,
            major_version,
        })
    }

    fn parse(&mut self) -> ClassFileResult<ClassFile> {
        let mut parsed_class = ClassFile {
            minor_version: self.minor_version,
            major_version: self.major_version,
            ..ClassFile::default()
        };

        parsed_class.access = ClassAccess::from_bits_retain(self.reader.read_u16()?);
        let this_class = self.reader.read_u16()?;
        parsed_class.name = self.pool.class_name(this_class)?;
        let super_class = self.reader.read_u16()?;
        parsed_class.extends = self.pool.optional_class_name(super_class)?;

        let interface_count = self.reader.read_u16()?;
        for _ in 0..interface_count {
            let index = self.reader.read_u16()?;
            parsed_class.implements.push(self.pool.class_name(index)?);
        }

        let field_count = self.reader.read_u16()?;
        for _ in 0..field_count {
            parsed_class.fields.push(self.read_field()?);
        }
        if parsed_class.access.contains(ClassAccess::Enum) {
            parsed_class.enum_elements = parsed_class
                .fields
                .iter()
                .filter(|field| field.access.contains(FieldAccess::Enum))
                .count();
        }

        let method_count = self.reader.read_u16()?;
        let class_name = parsed_class.name.clone();
        for _ in 0..method_count {
            let method = self.read_method(&class_name)?;
            parsed_class.methods.push(method);
        }

        let attribute_count = self.reader.read_u16()?;
        for _ in 0..attribute_count {
            self.read_class_attribute(&mut parsed_class)?;
        }

        Ok(parsed_class)
    }

    fn read_field(&mut self) -> ClassFileResult<Field> {
        let access_bits = self.reader.read_u16()?;
        let name = self.pool.utf8(self.reader.read_u16()?)?.to_owned();
        let descriptor = self.pool.utf8(self.reader.read_u16()?)?.to_owned();
        if !visibility_is_consistent(access_bits) {
            return Err(ConsistencyError::ConflictingVisibility { name }.into());
        }

        let mut field = Field {
            name,
            descriptor,
            signature: None,
            access: FieldAccess::from_bits_retain(access_bits),
            annotations: Vec::new(),
        };
        let attribute_count = self.reader.read_u16()?;
        for _ in 0..attribute_count {
            let attribute_name = self.pool.utf8(self.reader.read_u16()?)?.to_owned();
            let attribute_length = self.reader.read_u32()?;
            if attribute_name == attribute::SIGNATURE {
                field.signature = Some(self.pool.utf8(self.reader.read_u16()?)?.to_owned());
            } else if attribute_name == attribute::RUNTIME_VISIBLE_ANNOTATIONS
                || attribute_name == attribute::RUNTIME_INVISIBLE_ANNOTATIONS
            {
                let annotations = self.read_annotations()?;
                field.annotations.extend(annotations);
            } else {
                self.reader.skip(attribute_length as usize)?;
            }
        }
        Ok(field)
    }

    fn read_method(&mut self, class_name: &JavaStr) -> ClassFileResult<Method> {
        let access_bits = self.reader.read_u16()?;
        let name = self.pool.utf8(self.reader.read_u16()?)?.to_owned();
        let descriptor = self.pool.utf8(self.reader.read_u16()?)?.to_owned();
        if !visibility_is_consistent(access_bits) {
            return Err(ConsistencyError::ConflictingVisibility { name }.into());
        }

        let mut method = Method {
            name,
            descriptor,
            access: MethodAccess::from_bits_retain(access_bits),
            ..Method::default()
        };
        let attribute_count = self.reader.read_u16()?;
        for _ in 0..attribute_count {
            let attribute_name = self.pool.utf8(self.reader.read_u16()?)?.to_owned();
            let attribute_length = self.reader.read_u32()?;
            if attribute_name == attribute::CODE {
                self.read_code(&mut method, class_name)?;
            } else if attribute_name == attribute::SIGNATURE {
                method.signature = Some(self.pool.utf8(self.reader.read_u16()?)?.to_owned());
            } else if attribute_name == attribute::RUNTIME_VISIBLE_ANNOTATIONS
                || attribute_name == attribute::RUNTIME_INVISIBLE_ANNOTATIONS
            {
                let annotations = self.read_annotations()?;
                method.annotations.extend(annotations);
            } else {
                self.reader.skip(attribute_length as usize)?;
            }
        }
        Ok(method)
    }

    fn read_code(&mut self, method: &mut Method, class_name: &JavaStr) -> ClassFileResult<()> {
        // max_stack and max_locals are not used
        self.reader.skip(4)?;
        let code_length = self.reader.read_u32()?;
        method.instructions = read_instructions(&mut self.reader, &self.pool, code_length)?;

        let exception_table_length = self.reader.read_u16()?;
        for _ in 0..exception_table_length {
            let start_pc = self.reader.read_u16()?;
            let end_pc = self.reader.read_u16()?;
            let handler_pc = self.reader.read_u16()?;
            let catch_index = self.reader.read_u16()?;
            if start_pc >= end_pc {
                return Err(ConsistencyError::BadExceptionRange { start_pc, end_pc }.into());
            }
            method.exception_table.push(ExceptionTableEntry {
                start_pc,
                end_pc,
                handler_pc,
                catch_type: self.pool.optional_class_name(catch_index)?,
            });
        }

        let attribute_count = self.reader.read_u16()?;
        for _ in 0..attribute_count {
            self.read_code_attribute(method)?;
        }

        let identifier = method_identifier(class_name, &method.name, &method.descriptor);
        method.source_location.function = Some(identifier.clone());
        for instruction in &mut method.instructions {
            instruction.source_location.function = Some(identifier.clone());
        }

        // lines cover every following instruction up to the next entry
        let mut line = None;
        for instruction in &mut method.instructions {
            match instruction.source_location.line {
                Some(current) => line = Some(current),
                None => instruction.source_location.line = line,
            }
        }
        if let Some(first) = method.instructions.first() {
            method.source_location.line = first.source_location.line;
        }
        Ok(())
    }

    fn read_code_attribute(&mut self, method: &mut Method) -> ClassFileResult<()> {
        let attribute_name = self.pool.utf8(self.reader.read_u16()?)?.to_owned();
        let attribute_length = self.reader.read_u32()?;

        if attribute_name == attribute::LINE_NUMBER_TABLE {
            let by_address: HashMap<u32, usize> = method
                .instructions
                .iter()
                .enumerate()
                .map(|(index, instruction)| (instruction.address, index))
                .collect();
            let entry_count = self.reader.read_u16()?;
            for _ in 0..entry_count {
                let start_pc = self.reader.read_u16()?;
                let line_number = self.reader.read_u16()?;
                if let Some(&index) = by_address.get(&u32::from(start_pc)) {
                    method.instructions[index].source_location.line = Some(line_number);
                } else {
                    debug!("line number table entry for address {start_pc} has no instruction");
                }
            }
        } else if attribute_name == attribute::LOCAL_VARIABLE_TABLE {
            let entry_count = self.reader.read_u16()?;
            for _ in 0..entry_count {
                let start_pc = self.reader.read_u16()?;
                let length = self.reader.read_u16()?;
                let name = self.pool.utf8(self.reader.read_u16()?)?.to_owned();
                let descriptor = self.pool.utf8(self.reader.read_u16()?)?.to_owned();
                let index = self.reader.read_u16()?;
                method.local_variable_table.push(LocalVariable {
                    index,
                    name,
                    descriptor,
                    signature: None,
                    start_pc,
                    length,
                });
            }
        } else if attribute_name == attribute::LOCAL_VARIABLE_TYPE_TABLE {
            self.read_local_variable_type_table(method)?;
        } else if attribute_name == attribute::STACK_MAP_TABLE {
            let entry_count = self.reader.read_u16()?;
            for _ in 0..entry_count {
                method
                    .stack_map_table
                    .push(read_stack_map_frame(&mut self.reader)?);
            }
        } else {
            self.reader.skip(attribute_length as usize)?;
        }
        Ok(())
    }

    /// Overlays generic signatures from the LocalVariableTypeTable onto the
    /// LocalVariableTable. Every entry must match an existing variable on
    /// slot, name and liveness range.
    fn read_local_variable_type_table(&mut self, method: &mut Method) -> ClassFileResult<()> {
        let entry_count = self.reader.read_u16()? as usize;
        if entry_count > method.local_variable_table.len() {
            return Err(ConsistencyError::OversizedLocalVariableTypeTable {
                lvtt: entry_count,
                lvt: method.local_variable_table.len(),
            }
            .into());
        }
        for _ in 0..entry_count {
            let start_pc = self.reader.read_u16()?;
            let length = self.reader.read_u16()?;
            let name = self.pool.utf8(self.reader.read_u16()?)?.to_owned();
            let signature = self.pool.utf8(self.reader.read_u16()?)?.to_owned();
            let index = self.reader.read_u16()?;

            let variable = method.local_variable_table.iter_mut().find(|variable| {
                variable.index == index
                    && variable.name == name
                    && variable.start_pc == start_pc
                    && variable.length == length
            });
            match variable {
                Some(variable) => variable.signature = Some(signature),
                None => {
                    return Err(
                        ConsistencyError::UnmatchedLocalVariableType { name, index }.into()
                    )
                }
            }
        }
        Ok(())
    }

    fn read_annotations(&mut self) -> ClassFileResult<Vec<Annotation>> {
        let count = self.reader.read_u16()?;
        let mut annotations = Vec::with_capacity(count as usize);
        for _ in 0..count {
            annotations.push(self.read_annotation()?);
        }
        Ok(annotations)
    }

    fn read_annotation(&mut self) -> ClassFileResult<Annotation> {
        let type_descriptor = self.pool.utf8(self.reader.read_u16()?)?.to_owned();
        let pair_count = self.reader.read_u16()?;
        let mut element_value_pairs = Vec::with_capacity(pair_count as usize);
        for _ in 0..pair_count {
            let name = self.pool.utf8(self.reader.read_u16()?)?.to_owned();
            let value = self.read_element_value()?;
            element_value_pairs.push((name, value));
        }
        Ok(Annotation {
            type_descriptor,
            element_value_pairs,
        })
    }

    /// Reads one element_value. Enum, class, nested-annotation and array
    /// values are consumed but yield `None`.
    fn read_element_value(&mut self) -> ClassFileResult<Option<Constant>> {
        let tag = self.reader.read_u8()?;
        match tag {
            b'e' => {
                // type_name_index and const_name_index
                self.reader.skip(4)?;
                Ok(None)
            }
            b'c' => {
                self.reader.skip(2)?;
                Ok(None)
            }
            b'@' => {
                self.read_annotation()?;
                Ok(None)
            }
            b'[' => {
                let count = self.reader.read_u16()?;
                for _ in 0..count {
                    self.read_element_value()?;
                }
                Ok(None)
            }
            _ => {
                let index = self.reader.read_u16()?;
                Ok(Some(self.pool.constant(index)?.clone()))
            }
        }
    }

    fn read_class_attribute(&mut self, parsed_class: &mut ClassFile) -> ClassFileResult<()> {
        let attribute_name = self.pool.utf8(self.reader.read_u16()?)?.to_owned();
        let attribute_length = self.reader.read_u32()?;

        if attribute_name == attribute::SOURCE_FILE {
            let file_name = self.pool.utf8(self.reader.read_u16()?)?;
            let source_file = source_file_path(&parsed_class.name, file_name);
            for method in &mut parsed_class.methods {
                method.source_location.file = Some(source_file.clone());
                for instruction in &mut method.instructions {
                    if instruction.source_location.line.is_some() {
                        instruction.source_location.file = Some(source_file.clone());
                    }
                }
            }
        } else if attribute_name == attribute::SIGNATURE {
            parsed_class.signature = Some(self.pool.utf8(self.reader.read_u16()?)?.to_owned());
        } else if attribute_name == attribute::RUNTIME_VISIBLE_ANNOTATIONS
            || attribute_name == attribute::RUNTIME_INVISIBLE_ANNOTATIONS
        {
            let annotations = self.read_annotations()?;
            parsed_class.annotations.extend(annotations);
        } else if attribute_name == attribute::BOOTSTRAP_METHODS {
            if parsed_class.bootstrap_methods_read {
                return Err(ConsistencyError::DuplicateBootstrapMethods.into());
            }
            parsed_class.bootstrap_methods_read = true;
            self.read_bootstrap_methods(parsed_class)?;
        } else {
            self.reader.skip(attribute_length as usize)?;
        }
        Ok(())
    }

    fn read_bootstrap_methods(&mut self, parsed_class: &mut ClassFile) -> ClassFileResult<()> {
        let method_count = self.reader.read_u16()?;
        for entry_index in 0..method_count {
            let handle_index = self.reader.read_u16()?;
            let argument_count = self.reader.read_u16()?;

            let bootstrap_handle = parse_method_handle(&self.pool, handle_index)?;
            let is_metafactory = matches!(
                bootstrap_handle.as_ref().map(|handle| handle.handle_type),
                Some(
                    MethodHandleType::BootstrapMethodHandle
                        | MethodHandleType::BootstrapMethodHandleAlt
                )
            );
            if !is_metafactory || argument_count < 3 {
                debug!("bootstrap method {entry_index} is not a known lambda metafactory");
                self.reader.skip(usize::from(argument_count) * 2)?;
                continue;
            }

            let interface_type_index = self.reader.read_u16()?;
            let handle_argument_index = self.reader.read_u16()?;
            let method_type_index = self.reader.read_u16()?;
            // altMetafactory carries extra flag and marker arguments
            for _ in 3..argument_count {
                let extra = self.reader.read_u16()?;
                if self.pool.entry(extra)?.tag != Some(ConstantPoolTag::Integer) {
                    warn!("unexpected bootstrap method argument at pool index {extra}");
                }
            }

            let arguments_match = self.pool.entry(interface_type_index)?.tag
                == Some(ConstantPoolTag::MethodType)
                && self.pool.entry(handle_argument_index)?.tag
                    == Some(ConstantPoolTag::MethodHandle)
                && self.pool.entry(method_type_index)?.tag == Some(ConstantPoolTag::MethodType);
            if !arguments_match {
                debug!("bootstrap method {entry_index} has unexpected argument types");
                continue;
            }

            match parse_method_handle(&self.pool, handle_argument_index)? {
                Some(mut lambda)
                    if lambda.handle_type == MethodHandleType::LambdaMethodHandle =>
                {
                    lambda.interface_type =
                        Some(self.method_type_descriptor(interface_type_index)?);
                    lambda.method_type = Some(self.method_type_descriptor(method_type_index)?);
                    parsed_class
                        .lambda_method_handles
                        .insert((parsed_class.name.clone(), usize::from(entry_index)), lambda);
                }
                _ => debug!("bootstrap method {entry_index} does not name a lambda method"),
            }
        }
        Ok(())
    }

    fn method_type_descriptor(&self, index: u16) -> ClassFileResult<JavaString> {
        let entry = self.pool.expect(index, ConstantPoolTag::MethodType)?;
        Ok(self.pool.utf8(entry.ref1)?.to_owned())
    }

    /// Collects every class the parsed class refers to: Class and
    /// NameAndType pool entries, field and method descriptors, generic
    /// signatures, and local variable types.
    fn class_refs(&self, parsed_class: &ClassFile) -> ClassFileResult<IndexSet<JavaString>> {
        let mut refs = IndexSet::new();

        for (_, entry) in self.pool.entries() {
            match entry.tag {
                Some(ConstantPoolTag::Class) => {
                    let name = self.pool.utf8(entry.ref1)?;
                    if name.as_bytes().first() == Some(&b'[') {
                        let parsed = java_type_from_descriptor(name)?;
                        collect_class_refs(&parsed, &mut refs);
                    } else {
                        refs.insert(dotted_class_name(name));
                    }
                }
                Some(ConstantPoolTag::NameAndType) => {
                    let descriptor = self.pool.utf8(entry.ref2)?;
                    let parsed = java_type_from_descriptor(descriptor)?;
                    collect_class_refs(&parsed, &mut refs);
                }
                _ => {}
            }
        }

        if let Some(signature) = &parsed_class.signature {
            signature_class_refs(signature, &mut refs);
        }
        for field in &parsed_class.fields {
            let parsed = java_type_from_descriptor(&field.descriptor)?;
            collect_class_refs(&parsed, &mut refs);
            if let Some(signature) = &field.signature {
                signature_class_refs(signature, &mut refs);
            }
        }
        for method in &parsed_class.methods {
            let parsed = java_type_from_descriptor(&method.descriptor)?;
            collect_class_refs(&parsed, &mut refs);
            if let Some(signature) = &method.signature {
                signature_class_refs(signature, &mut refs);
            }
            for variable in &method.local_variable_table {
                let parsed = java_type_from_descriptor(&variable.descriptor)?;
                collect_class_refs(&parsed, &mut refs);
                if let Some(signature) = &variable.signature {
                    signature_class_refs(signature, &mut refs);
                }
            }
        }
        Ok(refs)
    }
}

/// `<class>.<name>:<descriptor>` with the dotted class name.
fn method_identifier(
    class_name: &JavaStr,
    name: &JavaStr,
    descriptor: &JavaStr,
) -> JavaString {
    let mut identifier =
        JavaString::with_capacity(class_name.len() + name.len() + descriptor.len() + 2);
    identifier.push_java_str(class_name);
    identifier.push('.');
    identifier.push_java_str(name);
    identifier.push(':');
    identifier.push_java_str(descriptor);
    identifier
}

/// Prefixes `file_name` with the package path of the dotted `class_name`,
/// so class `a.b.C` with file `C.java` yields `a/b/C.java`.
fn source_file_path(class_name: &JavaStr, file_name: &JavaStr) -> JavaString {
    let class_bytes = class_name.as_bytes();
    match class_bytes.iter().rposition(|&byte| byte == b'.') {
        Some(package_end) => {
            let mut path = JavaString::with_capacity(package_end + 1 + file_name.len());
            for ch in class_name[..package_end].chars() {
                if ch == '.' {
                    path.push('/');
                } else {
                    path.push_java(ch);
                }
            }
            path.push('/');
            path.push_java_str(file_name);
            path
        }
        None => file_name.to_owned(),
    }
}
