mod annotation;
mod class;
mod method;

pub use annotation::*;
pub use class::*;
pub use method::*;

use indexmap::IndexSet;
use java_string::JavaString;

/// The result of parsing one class file: the class itself plus every class
/// it references (dotted names, insertion order preserved).
#[derive(Debug)]
pub struct ParseTree {
    pub parsed_class: ClassFile,
    pub class_refs: IndexSet<JavaString>,
}
