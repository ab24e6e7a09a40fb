//! Typed wrappers over the backend routes the pages use.

mod auth;
mod cases;
mod dashboard;
mod patients;
