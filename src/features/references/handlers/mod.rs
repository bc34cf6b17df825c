pub mod reference_handler;

pub use reference_handler::{__path_list_references, list_references};
