pub mod api;
pub mod config;
pub mod db;
pub mod domain;
pub mod error;
pub mod seed;

pub use config::Config;
pub use db::{init_db, RegistrationError, Repository};
pub use domain::{Activity, Email, NewActivity};
pub use error::AppError;
pub use seed::seed_if_empty;
