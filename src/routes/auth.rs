use axum::extract::{Extension, State};
use axum::http::{header, StatusCode};
use axum::response::{AppendHeaders, IntoResponse};
use axum::Json;
use axum_macros::debug_handler;
use chrono::Utc;
use tracing::instrument;

use crate::core::error::Error;
use crate::core::state::AppState;
use crate::types::{request, response};
use crate::utils::auth::Session;
use crate::utils::cookie;

#[debug_handler]
#[instrument(skip_all)]
pub(crate) async fn register(
    State(state): State<AppState>,
    Json(params): Json<request::RegisterData>,
) -> Result<impl IntoResponse, Error> {
    if params.email.is_empty() || params.password.is_empty() {
        return Err(Error::MissingCredentials);
    }

    let user = state
        .users
        .register(&params.email, params.name.as_deref(), &params.password)
        .await?;

    let token = state.tokens.mint(user.id, Utc::now().timestamp())?;

    Ok((
        StatusCode::CREATED,
        AppendHeaders([(
            header::SET_COOKIE,
            cookie::set_header(&token, state.secure_cookies),
        )]),
        Json(response::User::from(&user)),
    ))
}

#[instrument(skip_all)]
pub(crate) async fn login(
    State(state): State<AppState>,
    Json(params): Json<request::LoginData>,
) -> Result<impl IntoResponse, Error> {
    if params.email.is_empty() || params.password.is_empty() {
        return Err(Error::MissingCredentials);
    }

    let user = state.users.login(&params.email, &params.password).await?;

    let token = state.tokens.mint(user.id, Utc::now().timestamp())?;

    Ok((
        AppendHeaders([(
            header::SET_COOKIE,
            cookie::set_header(&token, state.secure_cookies),
        )]),
        Json(response::User::from(&user)),
    ))
}

/// Logout clears the cookie client-side; tokens are not revocable and simply
/// age out.
#[instrument(skip_all)]
pub(crate) async fn logout(State(state): State<AppState>) -> impl IntoResponse {
    (
        AppendHeaders([(
            header::SET_COOKIE,
            cookie::clear_header(state.secure_cookies),
        )]),
        Json(response::Ok { ok: true }),
    )
}

#[instrument(skip_all)]
pub(crate) async fn session(
    State(state): State<AppState>,
    Extension(Session(session)): Extension<Session>,
) -> Result<Json<response::Session>, Error> {
    let Some(id) = session else {
        return Ok(Json(response::Session { session: None }));
    };

    // a valid token for a since-deleted user is still an anonymous session
    let Some(user) = state.users.get(id).await? else {
        return Ok(Json(response::Session { session: None }));
    };

    Ok(Json(response::Session {
        session: Some(response::SessionUser {
            user: response::User::from(&user),
        }),
    }))
}
