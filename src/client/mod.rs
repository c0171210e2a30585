//! HTTP access to the quiz server

pub mod endpoints;
pub mod envelope;
pub mod quiz_api;
pub mod transport;

// Re-export commonly used items
pub use envelope::Reply;
pub use quiz_api::QuizApi;
pub use transport::{ApiRequest, HttpTransport, Method, RawResponse, Transport};
