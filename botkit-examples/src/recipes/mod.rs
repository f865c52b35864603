pub mod auth;
pub mod commands;
pub mod composition;
pub mod counter;
pub mod echo;
pub mod errors;
pub mod filters;
pub mod inline;
pub mod media;
pub mod retry;
pub mod session;
