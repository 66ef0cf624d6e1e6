// src/services/auth_service.rs

use bcrypt::{hash, verify};
use chrono::Utc;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{AgencyRepository, UserRepository},
    models::auth::{Claims, RegisterAgencyPayload, User, UserRole},
};

#[derive(Clone)]
pub struct AuthService {
    user_repo: UserRepository,
    agency_repo: AgencyRepository,
    jwt_secret: String,
    pool: PgPool,
}

impl AuthService {
    pub fn new(
        user_repo: UserRepository,
        agency_repo: AgencyRepository,
        jwt_secret: String,
        pool: PgPool,
    ) -> Self {
        Self {
            user_repo,
            agency_repo,
            jwt_secret,
            pool,
        }
    }

    /// Cadastro de agência: cria a agência (pending) e o seu primeiro
    /// agency_admin numa única transação. Se qualquer passo falhar,
    /// nada é persistido.
    pub async fn register_agency(
        &self,
        payload: &RegisterAgencyPayload,
    ) -> Result<String, AppError> {
        // 1. Hashing (fora da transação, não toca no banco)
        let password_clone = payload.password.clone();
        let hashed_password =
            tokio::task::spawn_blocking(move || hash(&password_clone, bcrypt::DEFAULT_COST))
                .await
                .map_err(|e| anyhow::anyhow!("Falha na task de hashing: {}", e))??;

        // --- INÍCIO DA TRANSAÇÃO ---
        let mut tx = self.pool.begin().await?;

        // 2. Cria a agência (nasce 'pending'; só o super_admin ativa)
        let agency = self
            .agency_repo
            .create_agency(
                &mut *tx,
                &payload.agency_name,
                payload.legal_name.as_deref(),
                payload.tax_id.as_deref(),
                Some(&payload.email),
                payload.phone.as_deref(),
                payload.address.as_deref(),
            )
            .await?;

        // 3. Cria o administrador da agência (mesma transação: se falhar
        // aqui, a agência criada acima é desfeita)
        let admin = self
            .user_repo
            .create_user(
                &mut *tx,
                Some(agency.id),
                &payload.email,
                &hashed_password,
                UserRole::AgencyAdmin,
            )
            .await?;

        tx.commit().await?;
        // --- FIM DA TRANSAÇÃO ---

        tracing::info!("🏢 Nova agência cadastrada: {} ({})", agency.name, agency.id);

        self.create_token(admin.id)
    }

    /// Criação de agency_user pelo admin da agência. Não transacional:
    /// é uma única escrita.
    pub async fn create_agency_user(
        &self,
        agency_id: Uuid,
        email: &str,
        password: &str,
    ) -> Result<User, AppError> {
        let password_clone = password.to_owned();
        let hashed_password =
            tokio::task::spawn_blocking(move || hash(&password_clone, bcrypt::DEFAULT_COST))
                .await
                .map_err(|e| anyhow::anyhow!("Falha na task de hashing: {}", e))??;

        self.user_repo
            .create_user(
                &self.pool,
                Some(agency_id),
                email,
                &hashed_password,
                UserRole::AgencyUser,
            )
            .await
    }

    pub async fn login_user(&self, email: &str, password: &str) -> Result<String, AppError> {
        let user = self
            .user_repo
            .find_by_email(email)
            .await?
            .ok_or(AppError::InvalidCredentials)?;

        let password_clone = password.to_owned();
        let password_hash_clone = user.password_hash.clone();

        // Executa a verificação em um thread separado
        let is_password_valid =
            tokio::task::spawn_blocking(move || verify(&password_clone, &password_hash_clone))
                .await
                .map_err(|e| anyhow::anyhow!("Falha na task de verificação de senha: {}", e))??;

        if !is_password_valid {
            return Err(AppError::InvalidCredentials);
        }

        // Usuários desativados continuam no banco (histórico), mas não entram
        if !user.is_active {
            return Err(AppError::UserInactive);
        }

        self.create_token(user.id)
    }

    pub async fn validate_token(&self, token: &str) -> Result<User, AppError> {
        let validation = Validation::default();
        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.jwt_secret.as_ref()),
            &validation,
        )
        .map_err(|_| AppError::InvalidToken)?;

        let user = self
            .user_repo
            .find_by_id(token_data.claims.sub)
            .await?
            .ok_or(AppError::UserNotFound)?;

        // Desativação vale imediatamente, mesmo com token ainda válido
        if !user.is_active {
            return Err(AppError::UserInactive);
        }

        Ok(user)
    }

    fn create_token(&self, user_id: Uuid) -> Result<String, AppError> {
        let now = Utc::now();
        let expires_at = now + chrono::Duration::days(7);

        let claims = Claims {
            sub: user_id,
            exp: expires_at.timestamp() as usize,
            iat: now.timestamp() as usize,
        };

        Ok(encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.jwt_secret.as_ref()),
        )?)
    }
}
