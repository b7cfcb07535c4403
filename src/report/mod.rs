//! Reporting: compiling the solved tree into a summary, printing it, and optionally dumping the
//! whole tree to disk.

pub mod print;
pub mod summary;
pub mod tree_dump;

pub use print::print;
pub use summary::{compile, Report};
pub use tree_dump::dump_tree;
