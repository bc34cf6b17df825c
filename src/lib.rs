//! Educational file repository: a catalogue of teaching documents tagged by
//! subject, grade and semester, with an admin-gated upload/delete surface,
//! download counting, and a typed client for front ends.

pub mod client;
pub mod core;
pub mod features;
pub mod modules;
pub mod presentation;
pub mod shared;
