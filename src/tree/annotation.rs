use crate::Constant;
use java_string::JavaString;

/// A runtime visible or invisible annotation. Element values that resolve
/// to pool constants are kept; enum, class, nested-annotation and array
/// values are consumed for cursor correctness but not modeled.
#[derive(Debug, Clone, PartialEq)]
pub struct Annotation {
    pub type_descriptor: JavaString,
    pub element_value_pairs: Vec<(JavaString, Option<Constant>)>,
}
