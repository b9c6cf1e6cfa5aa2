//! Identity records and the role lookup keyed by the provider-issued id.

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{PgPool, Row};
use tracing::Instrument;
use utoipa::ToSchema;

use crate::gateway::GatewayUser;

/// Permission tier controlling the post-login destination. Mutated only by
/// administrative action, never by the sign-in/sign-up flow.
#[derive(ToSchema, Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    Admin,
    Provider,
    #[default]
    Customer,
}

impl Role {
    /// Stored values outside the enum resolve to the default tier.
    #[must_use]
    pub fn from_db(value: &str) -> Self {
        match value {
            "ADMIN" => Self::Admin,
            "PROVIDER" => Self::Provider,
            _ => Self::Customer,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "ADMIN",
            Self::Provider => "PROVIDER",
            Self::Customer => "CUSTOMER",
        }
    }
}

#[derive(ToSchema, Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Identity {
    pub id: String,
    pub email: String,
    pub name: String,
    pub role: Role,
    pub image: Option<String>,
    pub email_verified: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<GatewayUser> for Identity {
    /// Shape a freshly created provider user as an identity. New accounts
    /// carry the default role until an administrator changes it.
    fn from(user: GatewayUser) -> Self {
        let now = Utc::now();

        Self {
            id: user.id,
            email: user.email,
            name: user.name,
            role: Role::default(),
            image: user.image,
            email_verified: user.email_verified,
            created_at: user.created_at.unwrap_or(now),
            updated_at: user.updated_at.unwrap_or(now),
        }
    }
}

/// Record store resolving an authenticated id to its full identity.
#[async_trait]
pub trait IdentityStore: Send + Sync {
    async fn find_by_id(&self, id: &str) -> Result<Option<Identity>>;
}

pub struct PgIdentityStore {
    pool: PgPool,
}

impl PgIdentityStore {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl IdentityStore for PgIdentityStore {
    /// Fixed projection by id; the row owns more columns than the flow may see.
    async fn find_by_id(&self, id: &str) -> Result<Option<Identity>> {
        let query = r"
        SELECT id, email, name, role, image, email_verified, created_at, updated_at
        FROM users
        WHERE id = $1
    ";
        let span = tracing::info_span!(
            "db.query",
            db.system = "postgresql",
            db.operation = "SELECT",
            db.statement = query
        );
        let row = sqlx::query(query)
            .bind(id)
            .fetch_optional(&self.pool)
            .instrument(span)
            .await
            .context("failed to lookup identity")?;

        Ok(row.map(|row| Identity {
            id: row.get("id"),
            email: row.get("email"),
            name: row.get("name"),
            role: Role::from_db(&row.get::<String, _>("role")),
            image: row.get("image"),
            email_verified: row.get("email_verified"),
            created_at: row.get("created_at"),
            updated_at: row.get("updated_at"),
        }))
    }
}
