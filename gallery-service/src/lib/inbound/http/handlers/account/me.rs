use axum::http::StatusCode;
use axum::Extension;

use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::handlers::UserData;
use crate::inbound::http::middleware::CurrentUser;

pub async fn me(current: Option<Extension<CurrentUser>>) -> ApiSuccess<Option<UserData>> {
    let user = current.map(|Extension(CurrentUser(user))| UserData::from(&user));
    ApiSuccess::new(StatusCode::OK, user)
}
