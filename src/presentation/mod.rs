//! Text rendering of file cards for front ends.

pub mod file_card;
pub mod format;

pub use file_card::FileCard;
