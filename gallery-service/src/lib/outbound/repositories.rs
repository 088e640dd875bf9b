pub mod gallery;
pub mod memory;
pub mod oauth;
pub mod password_reset;
pub mod user;

pub use gallery::PostgresGalleryRepository;
pub use memory::MemoryGalleryRepository;
pub use memory::MemoryOAuthRepository;
pub use memory::MemoryPasswordResetRepository;
pub use memory::MemoryUserRepository;
pub use oauth::PostgresOAuthRepository;
pub use password_reset::PostgresPasswordResetRepository;
pub use user::PostgresUserRepository;
