use crate::constant_pool::dotted_class_name;
use crate::{ClassFileResult, StructuralError};
use indexmap::IndexSet;
use java_string::{Chars, JavaStr, JavaString};
use std::iter::Peekable;

/// A parsed field or method descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JavaType {
    Boolean,
    Byte,
    Char,
    Short,
    Int,
    Long,
    Float,
    Double,
    Void,
    /// Slash-form binary class name.
    Class(JavaString),
    Array(Box<JavaType>),
    Method {
        parameters: Vec<JavaType>,
        return_type: Box<JavaType>,
    },
}

pub(crate) fn java_type_from_descriptor(descriptor: &JavaStr) -> ClassFileResult<JavaType> {
    let mut chars = descriptor.chars().peekable();
    let parsed = parse_type(&mut chars, descriptor)?;
    if chars.next().is_some() {
        return Err(StructuralError::MalformedDescriptor(descriptor.to_owned()).into());
    }
    Ok(parsed)
}

fn parse_type(
    chars: &mut Peekable<Chars>,
    descriptor: &JavaStr,
) -> ClassFileResult<JavaType> {
    let malformed = || StructuralError::MalformedDescriptor(descriptor.to_owned());
    let ch = chars.next().ok_or_else(malformed)?;
    if ch == 'Z' {
        Ok(JavaType::Boolean)
    } else if ch == 'B' {
        Ok(JavaType::Byte)
    } else if ch == 'C' {
        Ok(JavaType::Char)
    } else if ch == 'S' {
        Ok(JavaType::Short)
    } else if ch == 'I' {
        Ok(JavaType::Int)
    } else if ch == 'J' {
        Ok(JavaType::Long)
    } else if ch == 'F' {
        Ok(JavaType::Float)
    } else if ch == 'D' {
        Ok(JavaType::Double)
    } else if ch == 'V' {
        Ok(JavaType::Void)
    } else if ch == 'L' {
        let mut name = JavaString::new();
        loop {
            let ch = chars.next().ok_or_else(malformed)?;
            if ch == ';' {
                break;
            }
            name.push_java(ch);
        }
        Ok(JavaType::Class(name))
    } else if ch == '[' {
        Ok(JavaType::Array(Box::new(parse_type(chars, descriptor)?)))
    } else if ch == '(' {
        let mut parameters = Vec::new();
        while !chars.peek().is_some_and(|&ch| ch == ')') {
            parameters.push(parse_type(chars, descriptor)?);
        }
        chars.next();
        let return_type = Box::new(parse_type(chars, descriptor)?);
        Ok(JavaType::Method {
            parameters,
            return_type,
        })
    } else {
        Err(malformed().into())
    }
}

/// Adds every class named by `ty` to `refs` in dotted form, unwrapping
/// arrays and method parameter/return types. Primitives contribute nothing.
pub(crate) fn collect_class_refs(ty: &JavaType, refs: &mut IndexSet<JavaString>) {
    match ty {
        JavaType::Class(name) => {
            refs.insert(dotted_class_name(name));
        }
        JavaType::Array(element) => collect_class_refs(element, refs),
        JavaType::Method {
            parameters,
            return_type,
        } => {
            for parameter in parameters {
                collect_class_refs(parameter, refs);
            }
            collect_class_refs(return_type, refs);
        }
        _ => {}
    }
}

/// Extracts class references from a generic signature without parsing the
/// full signature grammar: every `L<name>;` or `L<name><` contributes the
/// dotted name, `T<var>;` type variables are skipped.
pub(crate) fn signature_class_refs(signature: &JavaStr, refs: &mut IndexSet<JavaString>) {
    let mut chars = signature.chars();
    while let Some(ch) = chars.next() {
        if ch == 'L' {
            let mut name = JavaString::new();
            for ch in chars.by_ref() {
                if ch == ';' || ch == '<' {
                    break;
                }
                if ch == '/' {
                    name.push('.');
                } else {
                    name.push_java(ch);
                }
            }
            if !name.is_empty() {
                refs.insert(name);
            }
        } else if ch == 'T' {
            for ch in chars.by_ref() {
                if ch == ';' {
                    break;
                }
            }
        }
    }
}
