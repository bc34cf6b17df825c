mod file;

pub use file::{File, FileFilter, FileType, FileWithCount, NewFile, UnsupportedFileType};
