//! Request handling surface
//!
//! Transport-neutral: a caller (the CLI, or any HTTP layer) builds a
//! [`Request`], passes it to a [`RequestHandler`] for the addressed parent
//! kind, and receives a [`Response`] with status, headers, and a JSON body.

pub mod handler;
pub mod request;
pub mod response;

pub use handler::RequestHandler;
pub use request::{Method, Request};
pub use response::Response;
