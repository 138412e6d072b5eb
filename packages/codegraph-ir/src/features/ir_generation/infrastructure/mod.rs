pub mod ir_builder;
pub mod processor;
pub mod visitor;

pub use ir_builder::IRBuilder;
pub use processor::{generate_occurrences_pub, process_python_file, ProcessResult};
pub use visitor::{traverse_with_visitor, AstVisitor, CompositeVisitor};
