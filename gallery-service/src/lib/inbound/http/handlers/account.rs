pub mod delete_me;
pub mod forgot_password;
pub mod login;
pub mod logout;
pub mod me;
pub mod reset_password;
pub mod signup;
pub mod update_me;

pub use delete_me::delete_me;
pub use forgot_password::forgot_password;
pub use login::login;
pub use logout::logout;
pub use me::me;
pub use reset_password::reset_password;
pub use signup::signup;
pub use update_me::update_me;

use serde::Serialize;

use super::ApiError;
use crate::domain::errors::ModelError;
use crate::domain::user::models::User;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MessageData {
    pub message: String,
}

/// Raw remember token of a user that was just issued one.
fn remember_token(user: &User) -> Result<String, ApiError> {
    user.remember_token.clone().ok_or_else(|| {
        ApiError::from(ModelError::Unexpected(
            "Remember token missing after issuance".to_string(),
        ))
    })
}
