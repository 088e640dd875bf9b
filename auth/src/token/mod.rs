pub mod errors;
pub mod generator;

pub use errors::TokenError;
pub use generator::byte_len;
pub use generator::generate;
pub use generator::generate_with_len;
pub use generator::REMEMBER_TOKEN_BYTES;
