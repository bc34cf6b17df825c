mod reference;

pub use reference::{ReferenceEntry, ReferenceKind};
