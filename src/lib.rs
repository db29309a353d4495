pub mod cli;
pub mod logging;
pub mod models;
pub mod repositories;
pub mod services;
pub mod settings;
pub mod validation;
