pub mod errors;
pub mod gallery;
pub mod mail;
pub mod oauth;
pub mod password_reset;
pub mod user;
