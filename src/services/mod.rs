//! Domain services called by the HTTP routes.

pub mod catalog;
pub mod dispatch;
pub mod login;
pub mod settings;
