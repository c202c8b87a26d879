#![warn(missing_debug_implementations)]

mod access;
mod bytecode;
mod class_reader;
mod constant_pool;
mod constants;
mod descriptor;
mod error;
mod frame;
mod handle;
mod opcodes;
mod reader;
pub mod tree;

pub use access::*;
pub use class_reader::*;
pub use constant_pool::*;
pub use descriptor::*;
pub use error::*;
pub use frame::*;
pub use handle::*;
pub use opcodes::*;
