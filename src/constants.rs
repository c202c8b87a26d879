use java_string::JavaStr;

pub(crate) const MAGIC: u32 = 0xcafe_babe;
/// JDK 1.0 class files carry major version 44.
pub(crate) const MIN_MAJOR_VERSION: u16 = 44;

pub(crate) mod attribute {
    use java_string::JavaStr;

    pub(crate) const CODE: &JavaStr = JavaStr::from_str("Code");
    pub(crate) const SIGNATURE: &JavaStr = JavaStr::from_str("Signature");
    pub(crate) const SOURCE_FILE: &JavaStr = JavaStr::from_str("SourceFile");
    pub(crate) const LINE_NUMBER_TABLE: &JavaStr = JavaStr::from_str("LineNumberTable");
    pub(crate) const LOCAL_VARIABLE_TABLE: &JavaStr = JavaStr::from_str("LocalVariableTable");
    pub(crate) const LOCAL_VARIABLE_TYPE_TABLE: &JavaStr =
        JavaStr::from_str("LocalVariableTypeTable");
    pub(crate) const STACK_MAP_TABLE: &JavaStr = JavaStr::from_str("StackMapTable");
    pub(crate) const BOOTSTRAP_METHODS: &JavaStr = JavaStr::from_str("BootstrapMethods");
    pub(crate) const RUNTIME_VISIBLE_ANNOTATIONS: &JavaStr =
        JavaStr::from_str("RuntimeVisibleAnnotations");
    pub(crate) const RUNTIME_INVISIBLE_ANNOTATIONS: &JavaStr =
        JavaStr::from_str("RuntimeInvisibleAnnotations");
}

/// Fully qualified handle names in `<class>.<name><descriptor>` form, as
/// built by [`crate::ConstantPool`] for MethodHandle entries.
pub(crate) const LAMBDA_METAFACTORY: &JavaStr = JavaStr::from_str(
    "java/lang/invoke/LambdaMetafactory.metafactory(\
     Ljava/lang/invoke/MethodHandles$Lookup;Ljava/lang/String;Ljava/lang/invoke/MethodType;\
     Ljava/lang/invoke/MethodType;Ljava/lang/invoke/MethodHandle;Ljava/lang/invoke/MethodType;)\
     Ljava/lang/invoke/CallSite;",
);
pub(crate) const LAMBDA_ALT_METAFACTORY: &JavaStr = JavaStr::from_str(
    "java/lang/invoke/LambdaMetafactory.altMetafactory(\
     Ljava/lang/invoke/MethodHandles$Lookup;Ljava/lang/String;Ljava/lang/invoke/MethodType;\
     [Ljava/lang/Object;)Ljava/lang/invoke/CallSite;",
);
pub(crate) const LAMBDA_METHOD_PREFIX: &[u8] = b"lambda$";
