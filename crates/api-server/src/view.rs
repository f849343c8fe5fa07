//! Rendering instructions
//!
//! Handlers do not produce markup. They name a view and hand over its model;
//! the renderer in front of this service turns the pair into a page.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

pub struct View<M> {
    name: &'static str,
    status: StatusCode,
    model: M,
}

#[derive(Serialize)]
struct Envelope<'a, M> {
    view: &'a str,
    model: &'a M,
}

impl<M: Serialize> View<M> {
    pub fn new(name: &'static str, model: M) -> Self {
        Self {
            name,
            status: StatusCode::OK,
            model,
        }
    }

    pub fn with_status(mut self, status: StatusCode) -> Self {
        self.status = status;
        self
    }
}

impl<M: Serialize> IntoResponse for View<M> {
    fn into_response(self) -> Response {
        let envelope = Envelope {
            view: self.name,
            model: &self.model,
        };
        (self.status, Json(envelope)).into_response()
    }
}
