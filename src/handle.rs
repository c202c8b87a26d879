use crate::constants::{LAMBDA_ALT_METAFACTORY, LAMBDA_METAFACTORY, LAMBDA_METHOD_PREFIX};
use crate::{ClassFileResult, ConsistencyError, ConstantPool, ConstantPoolTag};
use java_string::{JavaString, JavaStr};
use strum::{Display, FromRepr};

#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Display, FromRepr)]
#[repr(u8)]
#[non_exhaustive]
pub enum HandleKind {
    GetField = 1,
    GetStatic = 2,
    PutField = 3,
    PutStatic = 4,
    InvokeVirtual = 5,
    InvokeStatic = 6,
    InvokeSpecial = 7,
    NewInvokeSpecial = 8,
    InvokeInterface = 9,
}

impl HandleKind {
    pub fn from_u8(kind: u8) -> ClassFileResult<HandleKind> {
        Self::from_repr(kind).ok_or_else(|| ConsistencyError::BadHandleKind(kind).into())
    }
}

/// What a bootstrap-method handle was recognized as.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum MethodHandleType {
    BootstrapMethodHandle,
    BootstrapMethodHandleAlt,
    LambdaMethodHandle,
}

/// A recognized lambda synthesis handle. `interface_type` and
/// `method_type` are filled in from the bootstrap method arguments once
/// the surrounding BootstrapMethods entry has been read.
#[derive(Debug, Clone, PartialEq)]
pub struct LambdaMethodHandle {
    pub handle_type: MethodHandleType,
    pub lambda_method_name: JavaString,
    pub interface_type: Option<JavaString>,
    pub method_type: Option<JavaString>,
}

impl LambdaMethodHandle {
    fn new(handle_type: MethodHandleType, lambda_method_name: &JavaStr) -> LambdaMethodHandle {
        LambdaMethodHandle {
            handle_type,
            lambda_method_name: lambda_method_name.to_owned(),
            interface_type: None,
            method_type: None,
        }
    }
}

/// Classifies the MethodHandle pool entry at `index`: either one of the two
/// LambdaMetafactory entry points, a `lambda$...` implementation method, or
/// nothing we recognize (`Ok(None)`).
pub(crate) fn parse_method_handle(
    pool: &ConstantPool,
    index: u16,
) -> ClassFileResult<Option<LambdaMethodHandle>> {
    let handle = pool.expect(index, ConstantPoolTag::MethodHandle)?;
    let referent = pool.entry(handle.ref2)?;
    let class_name = pool.utf8(pool.expect(referent.ref1, ConstantPoolTag::Class)?.ref1)?;
    let (name, descriptor) = pool.name_and_type(referent.ref2)?;

    let mut method_name =
        JavaString::with_capacity(class_name.len() + name.len() + descriptor.len() + 1);
    method_name.push_java_str(class_name);
    method_name.push('.');
    method_name.push_java_str(name);
    method_name.push_java_str(descriptor);

    if method_name.as_bytes() == LAMBDA_METAFACTORY.as_bytes() {
        Ok(Some(LambdaMethodHandle::new(
            MethodHandleType::BootstrapMethodHandle,
            name,
        )))
    } else if name.as_bytes().starts_with(LAMBDA_METHOD_PREFIX) {
        Ok(Some(LambdaMethodHandle::new(
            MethodHandleType::LambdaMethodHandle,
            name,
        )))
    } else if method_name.as_bytes() == LAMBDA_ALT_METAFACTORY.as_bytes() {
        Ok(Some(LambdaMethodHandle::new(
            MethodHandleType::BootstrapMethodHandleAlt,
            name,
        )))
    } else {
        Ok(None)
    }
}
