pub mod dtos;
pub mod guards;
pub mod handlers;
pub mod model;
pub mod routes;
pub mod services;

pub use guards::RequireAdmin;
pub use model::AdminIdentity;
pub use routes::routes;
pub use services::SessionService;
