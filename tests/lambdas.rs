mod common;

use common::*;
use java_string::JavaStr;
use jclass::{parse_class_file, MethodHandleType};
use pretty_assertions::assert_eq;

/// A metafactory bootstrap entry whose second argument is a handle to the
/// given lambda implementation method.
fn lambda_entry(pool: &mut PoolBuilder, factory: u16, lambda_name: &str) -> (u16, Vec<u16>) {
    let interface_type = pool.method_type("()Ljava/lang/Runnable;");
    let implementation = pool.method_ref("a/B", lambda_name, "()V");
    let implementation_handle = pool.method_handle(6, implementation);
    let method_type = pool.method_type("()V");
    (
        factory,
        vec![interface_type, implementation_handle, method_type],
    )
}

#[test]
fn metafactory_entries_register_lambda_handles() {
    let mut builder = ClassFileBuilder::new("a/B");
    let factory = metafactory_handle(&mut builder.pool);
    let entry = lambda_entry(&mut builder.pool, factory, "lambda$main$0");
    let bootstrap = builder.bootstrap_methods(&[entry]);
    builder.attributes.push(bootstrap);

    let tree = parse_class_file(&builder.build()).unwrap();
    let class = &tree.parsed_class;
    assert!(class.bootstrap_methods_read);
    assert_eq!(class.lambda_method_handles.len(), 1);

    let key = (JavaStr::from_str("a.B").to_owned(), 0);
    let handle = &class.lambda_method_handles[&key];
    assert_eq!(handle.handle_type, MethodHandleType::LambdaMethodHandle);
    assert_eq!(handle.lambda_method_name, JavaStr::from_str("lambda$main$0"));
    assert_eq!(
        handle.interface_type.as_deref(),
        Some(JavaStr::from_str("()Ljava/lang/Runnable;"))
    );
    assert_eq!(handle.method_type.as_deref(), Some(JavaStr::from_str("()V")));
}

#[test]
fn alt_metafactory_extra_arguments_are_skipped() {
    let mut builder = ClassFileBuilder::new("a/B");
    let factory = alt_metafactory_handle(&mut builder.pool);
    let (handle, mut arguments) = lambda_entry(&mut builder.pool, factory, "lambda$run$0");
    arguments.push(builder.pool.integer(5)); // flags
    arguments.push(builder.pool.integer(0)); // marker count
    let bootstrap = builder.bootstrap_methods(&[(handle, arguments)]);
    builder.attributes.push(bootstrap);

    let tree = parse_class_file(&builder.build()).unwrap();
    let key = (JavaStr::from_str("a.B").to_owned(), 0);
    let handle = &tree.parsed_class.lambda_method_handles[&key];
    assert_eq!(
        handle.lambda_method_name,
        JavaStr::from_str("lambda$run$0")
    );
}

#[test]
fn non_integer_trailing_arguments_are_tolerated() {
    let mut builder = ClassFileBuilder::new("a/B");
    let factory = alt_metafactory_handle(&mut builder.pool);
    let (handle, mut arguments) = lambda_entry(&mut builder.pool, factory, "lambda$run$0");
    arguments.push(builder.pool.utf8("not a flag"));
    let bootstrap = builder.bootstrap_methods(&[(handle, arguments)]);
    builder.attributes.push(bootstrap);

    let tree = parse_class_file(&builder.build()).unwrap();
    assert_eq!(tree.parsed_class.lambda_method_handles.len(), 1);
}

#[test]
fn unrecognized_entries_are_skipped_without_losing_later_ones() {
    let mut builder = ClassFileBuilder::new("a/B");
    let something_else = builder
        .pool
        .method_ref("java/lang/invoke/StringConcatFactory", "makeConcat", "()V");
    let other_handle = builder.pool.method_handle(6, something_else);
    let junk = builder.pool.integer(9);
    let factory = metafactory_handle(&mut builder.pool);
    let entry = lambda_entry(&mut builder.pool, factory, "lambda$main$1");
    let bootstrap = builder.bootstrap_methods(&[(other_handle, vec![junk, junk, junk]), entry]);
    builder.attributes.push(bootstrap);

    let tree = parse_class_file(&builder.build()).unwrap();
    let class = &tree.parsed_class;
    assert_eq!(class.lambda_method_handles.len(), 1);
    let key = (JavaStr::from_str("a.B").to_owned(), 1);
    assert_eq!(
        class.lambda_method_handles[&key].lambda_method_name,
        JavaStr::from_str("lambda$main$1")
    );
}

#[test]
fn entries_with_unexpected_argument_types_are_skipped() {
    let mut builder = ClassFileBuilder::new("a/B");
    let factory = metafactory_handle(&mut builder.pool);
    // second argument should be a MethodHandle, not an integer
    let interface_type = builder.pool.method_type("()Ljava/lang/Runnable;");
    let bad = builder.pool.integer(3);
    let method_type = builder.pool.method_type("()V");
    let bootstrap =
        builder.bootstrap_methods(&[(factory, vec![interface_type, bad, method_type])]);
    builder.attributes.push(bootstrap);

    let tree = parse_class_file(&builder.build()).unwrap();
    assert!(tree.parsed_class.lambda_method_handles.is_empty());
    assert!(tree.parsed_class.bootstrap_methods_read);
}

#[test]
fn duplicate_bootstrap_methods_attributes_are_fatal() {
    let mut builder = ClassFileBuilder::new("a/B");
    let first = builder.bootstrap_methods(&[]);
    let second = builder.bootstrap_methods(&[]);
    builder.attributes.push(first);
    builder.attributes.push(second);
    assert!(parse_class_file(&builder.build()).is_err());
}
