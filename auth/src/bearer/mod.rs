pub mod errors;
pub mod header;

pub use errors::BearerError;
pub use header::extract_token;
pub use header::Scheme;
