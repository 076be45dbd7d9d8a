use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};

use crate::error::{ProfileError, StoreError};
use crate::profile::DetailAssembler;
use crate::server::api;

pub struct HttpResponse {
    pub status_code: u16,
    pub content_type: &'static str,
    pub body: String,
}

impl HttpResponse {
    fn json(payload: Result<String, serde_json::Error>) -> Self {
        match payload {
            Ok(body) => HttpResponse {
                status_code: 200,
                content_type: "application/json",
                body,
            },
            Err(err) => error_response(500, &err.to_string()),
        }
    }
}

impl IntoResponse for HttpResponse {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, [(header::CONTENT_TYPE, self.content_type)], self.body).into_response()
    }
}

enum CreatureRoute {
    Record(u32),
    Profile(u32),
}

/// `/api/creatures/{id}` and `/api/creatures/{id}/profile`. `Err` carries the raw id
/// segment when it is not a number.
fn parse_creature_route(path: &str) -> Option<Result<CreatureRoute, String>> {
    let rest = path.strip_prefix("/api/creatures/")?;
    let mut segments = rest.trim_end_matches('/').split('/');
    let id_segment = segments.next().unwrap_or("");
    let tail = segments.next();
    if segments.next().is_some() {
        return None;
    }
    let make = match tail {
        None => CreatureRoute::Record,
        Some("profile") => CreatureRoute::Profile,
        Some(_) => return None,
    };
    Some(
        id_segment
            .parse::<u32>()
            .map(make)
            .map_err(|_| id_segment.to_string()),
    )
}

pub async fn route_request(
    assembler: &DetailAssembler,
    method: &str,
    path: &str,
) -> HttpResponse {
    let path = path.split('?').next().unwrap_or(path);
    match (method, path) {
        ("GET", "/api/health") => HttpResponse::json(api::health_payload()),
        ("GET", "/api/types") => HttpResponse::json(api::types_payload()),
        ("GET", path) if path.starts_with("/api/creatures/") => match parse_creature_route(path) {
            Some(Ok(CreatureRoute::Record(id))) => record_response(assembler, id).await,
            Some(Ok(CreatureRoute::Profile(id))) => profile_response(assembler, id).await,
            Some(Err(raw)) => error_response(400, &format!("Invalid creature id: {raw}")),
            None => error_response(404, "Route not found"),
        },
        _ => error_response(404, "Route not found"),
    }
}

async fn record_response(assembler: &DetailAssembler, id: u32) -> HttpResponse {
    match assembler.store().fetch_record(id).await {
        Ok(record) => HttpResponse::json(api::record_payload(&record)),
        Err(StoreError::NotFound(_)) => creature_not_found(id),
        Err(err) => {
            tracing::error!(id, %err, "record store unavailable");
            error_response(502, &err.to_string())
        }
    }
}

async fn profile_response(assembler: &DetailAssembler, id: u32) -> HttpResponse {
    match assembler.assemble(id).await {
        Ok(profile) => HttpResponse::json(api::profile_payload(&profile)),
        Err(ProfileError::NotFound(_)) => creature_not_found(id),
        Err(err @ ProfileError::Store(_)) => error_response(502, &err.to_string()),
    }
}

fn creature_not_found(id: u32) -> HttpResponse {
    error_response(404, &format!("Creature {id} not found"))
}

fn error_response(status_code: u16, message: &str) -> HttpResponse {
    HttpResponse {
        status_code,
        content_type: "application/json",
        body: format!(
            "{{\n  \"status\": \"error\",\n  \"message\": {}\n}}",
            serde_json::to_string(message).unwrap_or_else(|_| "\"Unknown error\"".to_string())
        ),
    }
}
