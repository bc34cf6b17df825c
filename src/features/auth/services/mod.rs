mod session_service;

pub use session_service::{session_token, SessionService};
