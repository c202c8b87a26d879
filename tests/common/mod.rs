//! Hand-assembled class file images for the integration tests.
#![allow(dead_code)]

pub const ACC_PUBLIC: u16 = 0x0001;
pub const ACC_PRIVATE: u16 = 0x0002;
pub const ACC_PROTECTED: u16 = 0x0004;
pub const ACC_STATIC: u16 = 0x0008;
pub const ACC_FINAL: u16 = 0x0010;
pub const ACC_SUPER: u16 = 0x0020;
pub const ACC_ENUM: u16 = 0x4000;

pub fn push_u16(out: &mut Vec<u8>, value: u16) {
    out.extend_from_slice(&value.to_be_bytes());
}

pub fn push_u32(out: &mut Vec<u8>, value: u32) {
    out.extend_from_slice(&value.to_be_bytes());
}

/// Appends constant pool records and hands back their indices.
#[derive(Default)]
pub struct PoolBuilder {
    entries: Vec<u8>,
    slots: u16,
}

impl PoolBuilder {
    fn add(&mut self, bytes: &[u8], slots: u16) -> u16 {
        let index = self.slots + 1;
        self.entries.extend_from_slice(bytes);
        self.slots += slots;
        index
    }

    /// Appends a raw record for malformed-input tests.
    pub fn raw(&mut self, bytes: &[u8], slots: u16) -> u16 {
        self.add(bytes, slots)
    }

    pub fn utf8(&mut self, value: &str) -> u16 {
        let mut bytes = vec![1];
        push_u16(&mut bytes, value.len() as u16);
        bytes.extend_from_slice(value.as_bytes());
        self.add(&bytes, 1)
    }

    pub fn integer(&mut self, value: i32) -> u16 {
        let mut bytes = vec![3];
        bytes.extend_from_slice(&value.to_be_bytes());
        self.add(&bytes, 1)
    }

    pub fn long(&mut self, value: i64) -> u16 {
        let mut bytes = vec![5];
        bytes.extend_from_slice(&value.to_be_bytes());
        self.add(&bytes, 2)
    }

    pub fn class(&mut self, name: &str) -> u16 {
        let name_index = self.utf8(name);
        let mut bytes = vec![7];
        push_u16(&mut bytes, name_index);
        self.add(&bytes, 1)
    }

    pub fn string(&mut self, value: &str) -> u16 {
        let value_index = self.utf8(value);
        let mut bytes = vec![8];
        push_u16(&mut bytes, value_index);
        self.add(&bytes, 1)
    }

    pub fn name_and_type(&mut self, name: &str, descriptor: &str) -> u16 {
        let name_index = self.utf8(name);
        let descriptor_index = self.utf8(descriptor);
        let mut bytes = vec![12];
        push_u16(&mut bytes, name_index);
        push_u16(&mut bytes, descriptor_index);
        self.add(&bytes, 1)
    }

    fn member_ref(&mut self, tag: u8, class: &str, name: &str, descriptor: &str) -> u16 {
        let class_index = self.class(class);
        let name_and_type_index = self.name_and_type(name, descriptor);
        let mut bytes = vec![tag];
        push_u16(&mut bytes, class_index);
        push_u16(&mut bytes, name_and_type_index);
        self.add(&bytes, 1)
    }

    pub fn field_ref(&mut self, class: &str, name: &str, descriptor: &str) -> u16 {
        self.member_ref(9, class, name, descriptor)
    }

    pub fn method_ref(&mut self, class: &str, name: &str, descriptor: &str) -> u16 {
        self.member_ref(10, class, name, descriptor)
    }

    pub fn interface_method_ref(&mut self, class: &str, name: &str, descriptor: &str) -> u16 {
        self.member_ref(11, class, name, descriptor)
    }

    pub fn method_handle(&mut self, kind: u8, reference: u16) -> u16 {
        let mut bytes = vec![15, kind];
        push_u16(&mut bytes, reference);
        self.add(&bytes, 1)
    }

    pub fn method_type(&mut self, descriptor: &str) -> u16 {
        let descriptor_index = self.utf8(descriptor);
        let mut bytes = vec![16];
        push_u16(&mut bytes, descriptor_index);
        self.add(&bytes, 1)
    }

    pub fn invoke_dynamic(&mut self, bootstrap_index: u16, name: &str, descriptor: &str) -> u16 {
        let name_and_type_index = self.name_and_type(name, descriptor);
        let mut bytes = vec![18];
        push_u16(&mut bytes, bootstrap_index);
        push_u16(&mut bytes, name_and_type_index);
        self.add(&bytes, 1)
    }

    fn encode(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.entries.len() + 2);
        push_u16(&mut bytes, self.slots + 1);
        bytes.extend_from_slice(&self.entries);
        bytes
    }
}

pub struct Attr {
    pub name: u16,
    pub payload: Vec<u8>,
}

fn encode_attributes(out: &mut Vec<u8>, attributes: &[Attr]) {
    push_u16(out, attributes.len() as u16);
    for attribute in attributes {
        push_u16(out, attribute.name);
        push_u32(out, attribute.payload.len() as u32);
        out.extend_from_slice(&attribute.payload);
    }
}

pub struct Member {
    pub access: u16,
    pub name: u16,
    pub descriptor: u16,
    pub attributes: Vec<Attr>,
}

pub struct ClassFileBuilder {
    pub pool: PoolBuilder,
    pub access: u16,
    pub major_version: u16,
    this_class: u16,
    super_class: u16,
    pub interfaces: Vec<u16>,
    pub fields: Vec<Member>,
    pub methods: Vec<Member>,
    pub attributes: Vec<Attr>,
}

impl ClassFileBuilder {
    pub fn new(name: &str) -> ClassFileBuilder {
        let mut pool = PoolBuilder::default();
        let this_class = pool.class(name);
        let super_class = pool.class("java/lang/Object");
        ClassFileBuilder {
            pool,
            access: ACC_PUBLIC | ACC_SUPER,
            major_version: 52,
            this_class,
            super_class,
            interfaces: Vec::new(),
            fields: Vec::new(),
            methods: Vec::new(),
            attributes: Vec::new(),
        }
    }

    pub fn add_interface(&mut self, name: &str) {
        let index = self.pool.class(name);
        self.interfaces.push(index);
    }

    pub fn add_field(&mut self, access: u16, name: &str, descriptor: &str, attributes: Vec<Attr>) {
        let name = self.pool.utf8(name);
        let descriptor = self.pool.utf8(descriptor);
        self.fields.push(Member {
            access,
            name,
            descriptor,
            attributes,
        });
    }

    pub fn add_method(&mut self, access: u16, name: &str, descriptor: &str, attributes: Vec<Attr>) {
        let name = self.pool.utf8(name);
        let descriptor = self.pool.utf8(descriptor);
        self.methods.push(Member {
            access,
            name,
            descriptor,
            attributes,
        });
    }

    pub fn attribute(&mut self, name: &str, payload: Vec<u8>) -> Attr {
        Attr {
            name: self.pool.utf8(name),
            payload,
        }
    }

    pub fn code_attribute(
        &mut self,
        code: &[u8],
        exception_table: &[(u16, u16, u16, u16)],
        nested: Vec<Attr>,
    ) -> Attr {
        let mut payload = Vec::new();
        push_u16(&mut payload, 0); // max_stack
        push_u16(&mut payload, 0); // max_locals
        push_u32(&mut payload, code.len() as u32);
        payload.extend_from_slice(code);
        push_u16(&mut payload, exception_table.len() as u16);
        for &(start_pc, end_pc, handler_pc, catch_type) in exception_table {
            push_u16(&mut payload, start_pc);
            push_u16(&mut payload, end_pc);
            push_u16(&mut payload, handler_pc);
            push_u16(&mut payload, catch_type);
        }
        encode_attributes(&mut payload, &nested);
        self.attribute("Code", payload)
    }

    pub fn line_number_table(&mut self, entries: &[(u16, u16)]) -> Attr {
        let mut payload = Vec::new();
        push_u16(&mut payload, entries.len() as u16);
        for &(start_pc, line_number) in entries {
            push_u16(&mut payload, start_pc);
            push_u16(&mut payload, line_number);
        }
        self.attribute("LineNumberTable", payload)
    }

    pub fn local_variable_table(&mut self, entries: &[(u16, u16, &str, &str, u16)]) -> Attr {
        let mut payload = Vec::new();
        push_u16(&mut payload, entries.len() as u16);
        for &(start_pc, length, name, descriptor, index) in entries {
            let name = self.pool.utf8(name);
            let descriptor = self.pool.utf8(descriptor);
            push_u16(&mut payload, start_pc);
            push_u16(&mut payload, length);
            push_u16(&mut payload, name);
            push_u16(&mut payload, descriptor);
            push_u16(&mut payload, index);
        }
        self.attribute("LocalVariableTable", payload)
    }

    pub fn local_variable_type_table(&mut self, entries: &[(u16, u16, &str, &str, u16)]) -> Attr {
        let mut payload = Vec::new();
        push_u16(&mut payload, entries.len() as u16);
        for &(start_pc, length, name, signature, index) in entries {
            let name = self.pool.utf8(name);
            let signature = self.pool.utf8(signature);
            push_u16(&mut payload, start_pc);
            push_u16(&mut payload, length);
            push_u16(&mut payload, name);
            push_u16(&mut payload, signature);
            push_u16(&mut payload, index);
        }
        self.attribute("LocalVariableTypeTable", payload)
    }

    pub fn source_file(&mut self, file_name: &str) -> Attr {
        let file_name = self.pool.utf8(file_name);
        let mut payload = Vec::new();
        push_u16(&mut payload, file_name);
        self.attribute("SourceFile", payload)
    }

    pub fn signature(&mut self, signature: &str) -> Attr {
        let signature = self.pool.utf8(signature);
        let mut payload = Vec::new();
        push_u16(&mut payload, signature);
        self.attribute("Signature", payload)
    }

    pub fn stack_map_table(&mut self, frame_count: u16, frames: &[u8]) -> Attr {
        let mut payload = Vec::new();
        push_u16(&mut payload, frame_count);
        payload.extend_from_slice(frames);
        self.attribute("StackMapTable", payload)
    }

    pub fn bootstrap_methods(&mut self, entries: &[(u16, Vec<u16>)]) -> Attr {
        let mut payload = Vec::new();
        push_u16(&mut payload, entries.len() as u16);
        for (handle, arguments) in entries {
            push_u16(&mut payload, *handle);
            push_u16(&mut payload, arguments.len() as u16);
            for argument in arguments {
                push_u16(&mut payload, *argument);
            }
        }
        self.attribute("BootstrapMethods", payload)
    }

    pub fn build(&self) -> Vec<u8> {
        let mut bytes = Vec::new();
        push_u32(&mut bytes, 0xcafe_babe);
        push_u16(&mut bytes, 0); // minor
        push_u16(&mut bytes, self.major_version);
        bytes.extend_from_slice(&self.pool.encode());
        push_u16(&mut bytes, self.access);
        push_u16(&mut bytes, self.this_class);
        push_u16(&mut bytes, self.super_class);
        push_u16(&mut bytes, self.interfaces.len() as u16);
        for &interface in &self.interfaces {
            push_u16(&mut bytes, interface);
        }
        for members in [&self.fields, &self.methods] {
            push_u16(&mut bytes, members.len() as u16);
            for member in members {
                push_u16(&mut bytes, member.access);
                push_u16(&mut bytes, member.name);
                push_u16(&mut bytes, member.descriptor);
                encode_attributes(&mut bytes, &member.attributes);
            }
        }
        encode_attributes(&mut bytes, &self.attributes);
        bytes
    }
}

/// The LambdaMetafactory.metafactory MethodHandle pool entry.
pub fn metafactory_handle(pool: &mut PoolBuilder) -> u16 {
    let method_ref = pool.method_ref(
        "java/lang/invoke/LambdaMetafactory",
        "metafactory",
        "(Ljava/lang/invoke/MethodHandles$Lookup;Ljava/lang/String;Ljava/lang/invoke/MethodType;\
         Ljava/lang/invoke/MethodType;Ljava/lang/invoke/MethodHandle;Ljava/lang/invoke/MethodType;)\
         Ljava/lang/invoke/CallSite;",
    );
    pool.method_handle(6, method_ref)
}

/// The LambdaMetafactory.altMetafactory MethodHandle pool entry.
pub fn alt_metafactory_handle(pool: &mut PoolBuilder) -> u16 {
    let method_ref = pool.method_ref(
        "java/lang/invoke/LambdaMetafactory",
        "altMetafactory",
        "(Ljava/lang/invoke/MethodHandles$Lookup;Ljava/lang/String;Ljava/lang/invoke/MethodType;\
         [Ljava/lang/Object;)Ljava/lang/invoke/CallSite;",
    );
    pool.method_handle(6, method_ref)
}
