use crate::tree::{Annotation, Method};
use crate::{ClassAccess, FieldAccess, LambdaMethodHandle};
use indexmap::IndexMap;
use java_string::JavaString;

/// A fully parsed class. All class names are in dotted form.
#[derive(Debug, Default)]
pub struct ClassFile {
    pub minor_version: u16,
    pub major_version: u16,
    pub name: JavaString,
    pub access: ClassAccess,
    pub extends: Option<JavaString>,
    pub implements: Vec<JavaString>,
    pub fields: Vec<Field>,
    pub methods: Vec<Method>,
    pub signature: Option<JavaString>,
    pub annotations: Vec<Annotation>,
    /// Number of enum-flagged fields of an enum class, 0 otherwise.
    pub enum_elements: usize,
    pub bootstrap_methods_read: bool,
    /// Recognized lambda synthesis handles, keyed by the dotted class name
    /// and the bootstrap method index.
    pub lambda_method_handles: IndexMap<(JavaString, usize), LambdaMethodHandle>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub name: JavaString,
    pub descriptor: JavaString,
    pub signature: Option<JavaString>,
    pub access: FieldAccess,
    pub annotations: Vec<Annotation>,
}
