mod common;

use common::*;
use java_string::{JavaStr, JavaString};
use jclass::parse_class_file;
use pretty_assertions::assert_eq;

fn contains(refs: &indexmap::IndexSet<JavaString>, name: &str) -> bool {
    refs.iter().any(|class| class == JavaStr::from_str(name))
}

#[test]
fn pool_class_entries_are_collected_in_dotted_form() {
    let mut builder = ClassFileBuilder::new("a/B");
    builder.pool.class("java/util/List");
    let tree = parse_class_file(&builder.build()).unwrap();

    assert!(contains(&tree.class_refs, "a.B"));
    assert!(contains(&tree.class_refs, "java.lang.Object"));
    assert!(contains(&tree.class_refs, "java.util.List"));
}

#[test]
fn array_class_entries_contribute_their_element_class() {
    let mut builder = ClassFileBuilder::new("a/B");
    builder.pool.class("[[Ljava/lang/String;");
    let tree = parse_class_file(&builder.build()).unwrap();

    assert!(contains(&tree.class_refs, "java.lang.String"));
    assert!(!contains(&tree.class_refs, "[[Ljava.lang.String;"));
}

#[test]
fn name_and_type_descriptors_are_unwrapped() {
    let mut builder = ClassFileBuilder::new("a/B");
    builder
        .pool
        .name_and_type("accept", "(Ljava/util/Map;I)Ljava/util/Set;");
    let tree = parse_class_file(&builder.build()).unwrap();

    assert!(contains(&tree.class_refs, "java.util.Map"));
    assert!(contains(&tree.class_refs, "java.util.Set"));
}

#[test]
fn member_descriptors_and_signatures_contribute() {
    let mut builder = ClassFileBuilder::new("a/B");
    let field_signature = builder.signature("Ljava/util/List<Ljava/lang/Integer;>;");
    builder.add_field(ACC_PRIVATE, "xs", "Ljava/util/List;", vec![field_signature]);
    builder.add_method(ACC_PUBLIC, "f", "(Ljava/io/File;)Ljava/net/URL;", Vec::new());
    let tree = parse_class_file(&builder.build()).unwrap();

    assert!(contains(&tree.class_refs, "java.util.List"));
    assert!(contains(&tree.class_refs, "java.lang.Integer"));
    assert!(contains(&tree.class_refs, "java.io.File"));
    assert!(contains(&tree.class_refs, "java.net.URL"));
}

#[test]
fn local_variable_types_contribute() {
    let mut builder = ClassFileBuilder::new("a/B");
    let code = [0x00, 0xb1];
    let variables = builder.local_variable_table(&[(0, 2, "buffer", "Ljava/nio/ByteBuffer;", 1)]);
    let code_attribute = builder.code_attribute(&code, &[], vec![variables]);
    builder.add_method(ACC_PUBLIC, "f", "()V", vec![code_attribute]);
    let tree = parse_class_file(&builder.build()).unwrap();

    assert!(contains(&tree.class_refs, "java.nio.ByteBuffer"));
}

#[test]
fn primitives_contribute_nothing_and_order_is_deterministic() {
    let mut builder = ClassFileBuilder::new("a/B");
    builder.add_field(ACC_PRIVATE, "x", "I", Vec::new());
    builder.add_field(ACC_PRIVATE, "y", "[D", Vec::new());
    let tree = parse_class_file(&builder.build()).unwrap();

    let refs: Vec<_> = tree.class_refs.iter().cloned().collect();
    assert_eq!(
        refs,
        vec![
            JavaStr::from_str("a.B").to_owned(),
            JavaStr::from_str("java.lang.Object").to_owned(),
        ]
    );
}
