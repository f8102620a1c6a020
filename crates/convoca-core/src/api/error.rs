//! HTTP-boundary error taxonomy with user-facing Spanish messages.

use serde::Deserialize;
use thiserror::Error;

use crate::util::compact_text;

/// Failure talking to the REST backend.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request never produced an HTTP response
    #[error("Network error: {0}")]
    Network(String),
    /// The backend answered with a non-success status
    #[error("HTTP {status}: {message}")]
    Status { status: u16, message: String },
    /// The response body could not be read
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
    #[error("Invalid API configuration: {0}")]
    InvalidConfiguration(String),
}

impl ApiError {
    /// Build a status error, extracting the server's message when present.
    #[must_use]
    pub fn from_status(status: u16, body: &str) -> Self {
        Self::Status {
            status,
            message: parse_error_message(body),
        }
    }

    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// `true` when the session must be re-established.
    #[must_use]
    pub const fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Status { status: 401, .. })
    }

    /// Message suitable for a toast or alert.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Network(_) => {
                "No se pudo conectar con el servidor. Verifica tu conexión a internet.".to_string()
            }
            Self::InvalidResponse(_) => {
                "El servidor devolvió una respuesta inesperada.".to_string()
            }
            Self::InvalidConfiguration(_) => {
                "La aplicación no está configurada correctamente.".to_string()
            }
            Self::Status { status, message } => status_message(*status, message),
        }
    }
}

fn status_message(status: u16, server_message: &str) -> String {
    match status {
        400 if !server_message.is_empty() => server_message.to_string(),
        400 => "La solicitud no es válida.".to_string(),
        401 => "Credenciales inválidas o sesión expirada.".to_string(),
        403 => "No tienes permisos suficientes para realizar esta acción.".to_string(),
        404 => "El recurso solicitado no existe.".to_string(),
        409 => "El recurso ya existe o fue modificado por otro usuario.".to_string(),
        423 => "La cuenta está bloqueada temporalmente. Inténtalo más tarde.".to_string(),
        429 => "Demasiados intentos. Espera un momento e inténtalo de nuevo.".to_string(),
        500..=599 => "Error del servidor. Inténtalo más tarde.".to_string(),
        _ => format!("Error inesperado (HTTP {status})."),
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(error: reqwest::Error) -> Self {
        if let Some(status) = error.status() {
            Self::Status {
                status: status.as_u16(),
                message: error.to_string(),
            }
        } else if error.is_decode() || error.is_body() {
            Self::InvalidResponse(error.to_string())
        } else if error.is_builder() {
            Self::InvalidConfiguration(error.to_string())
        } else {
            Self::Network(error.to_string())
        }
    }
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
    error: Option<String>,
    detail: Option<String>,
    msg: Option<String>,
}

fn parse_error_message(body: &str) -> String {
    if let Ok(payload) = serde_json::from_str::<ErrorBody>(body) {
        if let Some(message) = payload
            .message
            .or(payload.detail)
            .or(payload.msg)
            .or(payload.error)
        {
            return compact_text(&message);
        }
    }
    compact_text(body)
}
