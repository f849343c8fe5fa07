//! Anti-forgery tokens for form posts
//!
//! Form pages hand out a random token in a cookie and in the page model. A
//! post is accepted only when its `__RequestVerificationToken` field matches
//! the cookie.

use axum::{
    body::{Body, Bytes},
    extract::{FromRequest, Request},
    http::{header::CONTENT_TYPE, HeaderValue, Method, StatusCode},
    response::{IntoResponse, Response},
    Form,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use rand::RngCore;
use serde::{de::DeserializeOwned, Deserialize};

use crate::error::problem;

pub const TOKEN_NAME: &str = "__RequestVerificationToken";

pub fn generate_token() -> String {
    let mut bytes = [0u8; 32];
    rand::thread_rng().fill_bytes(&mut bytes);
    URL_SAFE_NO_PAD.encode(bytes)
}

/// Reuse the visitor's token when it has one, otherwise set a fresh cookie
pub fn issue(jar: CookieJar, secure: bool) -> (CookieJar, String) {
    if let Some(existing) = jar.get(TOKEN_NAME) {
        if !existing.value().is_empty() {
            let token = existing.value().to_string();
            return (jar, token);
        }
    }

    let token = generate_token();
    let cookie = Cookie::build((TOKEN_NAME, token.clone()))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Strict)
        .secure(secure);
    (jar.add(cookie), token)
}

#[derive(Deserialize)]
struct TokenField {
    #[serde(rename = "__RequestVerificationToken", default)]
    token: Option<String>,
}

/// Form body whose anti-forgery token has been checked against the cookie
pub struct VerifiedForm<T>(pub T);

async fn parse_form<U: DeserializeOwned>(
    bytes: &Bytes,
    content_type: Option<&HeaderValue>,
) -> Result<U, Response> {
    let mut builder = Request::builder().method(Method::POST);
    if let Some(content_type) = content_type {
        builder = builder.header(CONTENT_TYPE, content_type);
    }
    let request = builder.body(Body::from(bytes.clone())).map_err(|e| {
        problem(StatusCode::BAD_REQUEST, "Malformed form submission.", e.to_string())
    })?;

    let Form(value) = Form::<U>::from_request(request, &())
        .await
        .map_err(IntoResponse::into_response)?;
    Ok(value)
}

impl<S, T> FromRequest<S> for VerifiedForm<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(req.headers());
        let content_type = req.headers().get(CONTENT_TYPE).cloned();
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(IntoResponse::into_response)?;

        let submitted: TokenField = parse_form(&bytes, content_type.as_ref()).await?;
        let expected = jar.get(TOKEN_NAME).map(|c| c.value().to_string());

        match (submitted.token, expected) {
            (Some(submitted), Some(expected)) if !expected.is_empty() && submitted == expected => {}
            _ => {
                tracing::warn!("Rejected form post with a missing or mismatched anti-forgery token");
                return Err(problem(
                    StatusCode::BAD_REQUEST,
                    "Bad Request",
                    "The anti-forgery token is missing or invalid.",
                ));
            }
        }

        let value = parse_form(&bytes, content_type.as_ref()).await?;
        Ok(VerifiedForm(value))
    }
}
