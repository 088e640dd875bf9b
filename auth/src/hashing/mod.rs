pub mod errors;
pub mod hasher;

pub use errors::HashError;
pub use hasher::Hasher;
