pub mod dropbox;
pub mod email;
pub mod images;
pub mod repositories;
