use actix_session::SessionExt;
use actix_web::{
    Error,
    body::MessageBody,
    dev::{ServiceRequest, ServiceResponse},
    http::Method,
    middleware::Next,
};

use crate::auth::session;
use crate::errors::see_other;

/// Middleware function that checks for an authenticated session.
/// Redirects to the login page if no user is signed in. After login, GET
/// requests come back to the same path and anything else lands on the index.
pub async fn require_auth(
    req: ServiceRequest,
    next: Next<impl MessageBody + 'static>,
) -> Result<ServiceResponse<impl MessageBody>, Error> {
    let signed_in = session::get_user_id(&req.get_session()).is_some();

    if !signed_in {
        let target = if req.method() == Method::GET {
            session::login_url(req.path())
        } else {
            session::login_url("/")
        };
        let response = see_other(&target);
        return Ok(req.into_response(response).map_into_right_body());
    }

    next.call(req).await.map(|res| res.map_into_left_body())
}
