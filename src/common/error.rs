// src/common/error.rs

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// Nosso tipo de erro, com `thiserror` para melhor ergonomia.
// A taxonomia importa para o cliente: 403 (não autorizado) é diferente
// de 404 (não existe), e validação devolve detalhes por campo.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erro de validação")]
    ValidationError(#[from] validator::ValidationErrors),

    #[error("E-mail já existe")]
    EmailAlreadyExists,

    #[error("Credenciais inválidas")]
    InvalidCredentials,

    #[error("Token inválido")]
    InvalidToken,

    #[error("Usuário desativado")]
    UserInactive,

    // Negação do gate de autorização. Nunca é exceção interna:
    // o chamador recebe 403 com o motivo.
    #[error("Acesso negado: {0}")]
    Forbidden(String),

    // A agência do chamador não está 'active' (pending ou blocked)
    #[error("Agência não está ativa")]
    AgencyNotActive,

    #[error("Usuário não encontrado")]
    UserNotFound,

    #[error("Agência não encontrada")]
    AgencyNotFound,

    #[error("Registro de pagamento não encontrado")]
    PaymentRecordNotFound,

    // 404 genérico para os recursos CRUD (veículo, cliente, etc.)
    #[error("{0} não encontrado")]
    ResourceNotFound(&'static str),

    #[error("Violação de unicidade: {0}")]
    UniqueConstraintViolation(String),

    // Variante para erros de banco de dados (sqlx)
    #[error("Erro de banco de dados")]
    DatabaseError(#[from] sqlx::Error),

    // Variante genérica para qualquer outro erro inesperado.
    // `anyhow::Error` é ótimo para capturar o contexto do erro.
    #[error("Erro interno do servidor")]
    InternalServerError(#[from] anyhow::Error),

    #[error("Erro de Bcrypt: {0}")]
    BcryptError(#[from] bcrypt::BcryptError),

    #[error("Erro de JWT: {0}")]
    JwtError(#[from] jsonwebtoken::errors::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            // Retorna todos os detalhes da validação, campo a campo.
            AppError::ValidationError(errors) => {
                let mut details = std::collections::HashMap::new();
                for (field, field_errors) in errors.field_errors() {
                    let messages: Vec<String> = field_errors
                        .iter()
                        .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
                        .collect();
                    details.insert(field.to_string(), messages);
                }
                let body = Json(json!({
                    "error": "Um ou mais campos são inválidos.",
                    "details": details,
                }));
                return (StatusCode::BAD_REQUEST, body).into_response();
            }
            AppError::EmailAlreadyExists => {
                (StatusCode::CONFLICT, "Este e-mail já está em uso.".to_string())
            }
            AppError::InvalidCredentials => {
                (StatusCode::UNAUTHORIZED, "E-mail ou senha inválidos.".to_string())
            }
            AppError::InvalidToken => (
                StatusCode::UNAUTHORIZED,
                "Token de autenticação inválido ou ausente.".to_string(),
            ),
            AppError::UserInactive => {
                (StatusCode::UNAUTHORIZED, "Este usuário foi desativado.".to_string())
            }
            AppError::Forbidden(reason) => (StatusCode::FORBIDDEN, reason),
            AppError::AgencyNotActive => (
                StatusCode::FORBIDDEN,
                "A agência não está ativa na plataforma.".to_string(),
            ),
            AppError::UserNotFound => {
                (StatusCode::NOT_FOUND, "Usuário não encontrado.".to_string())
            }
            AppError::AgencyNotFound => {
                (StatusCode::NOT_FOUND, "Agência não encontrada.".to_string())
            }
            AppError::PaymentRecordNotFound => (
                StatusCode::NOT_FOUND,
                "Registro de pagamento não encontrado.".to_string(),
            ),
            AppError::ResourceNotFound(resource) => {
                (StatusCode::NOT_FOUND, format!("{} não encontrado.", resource))
            }
            AppError::UniqueConstraintViolation(msg) => (StatusCode::CONFLICT, msg),

            // Todos os outros erros (DatabaseError, InternalServerError) viram 500.
            // O `tracing` loga a mensagem detalhada que `thiserror` nos deu.
            ref e => {
                tracing::error!("Erro Interno do Servidor: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Ocorreu um erro inesperado.".to_string(),
                )
            }
        };

        // Resposta padrão para erros simples que só têm uma mensagem.
        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}

// Helper para erros de validação construídos manualmente (checagens que
// cruzam mais de um campo, como red > yellow nos limiares de estoque).
pub fn field_validation_error(
    field: &'static str,
    code: &'static str,
    message: &'static str,
) -> AppError {
    let mut err = validator::ValidationError::new(code);
    err.message = Some(message.into());
    let mut errors = validator::ValidationErrors::new();
    errors.add(field, err);
    AppError::ValidationError(errors)
}
