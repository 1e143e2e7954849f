//! PostgreSQL Repository Implementation

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::entities::PendingChallenge;
use crate::domain::repository::ChallengeBindingRepository;
use crate::error::SiweResult;

/// Challenges older than this are unverifiable garbage
const STALE_WINDOW_MS: i64 = 3600_000; // 1 hour

/// PostgreSQL-backed challenge binding store
///
/// `session_id` is the primary key, so the one-outstanding-challenge
/// invariant is enforced by the schema; `take` is a single
/// `DELETE ... RETURNING`, atomic under concurrent verification
/// attempts for the same session.
#[derive(Clone)]
pub struct PgChallengeRepository {
    pool: PgPool,
}

impl PgChallengeRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Clean up stale challenge bindings
    pub async fn cleanup_stale(&self) -> SiweResult<u64> {
        let cutoff = Utc::now() - chrono::Duration::milliseconds(STALE_WINDOW_MS);

        let deleted = sqlx::query("DELETE FROM siwe_challenges WHERE created_at < $1")
            .bind(cutoff)
            .execute(&self.pool)
            .await?
            .rows_affected();

        tracing::info!(challenges = deleted, "Cleaned up stale SIWE challenges");

        Ok(deleted)
    }
}

impl ChallengeBindingRepository for PgChallengeRepository {
    async fn store(&self, binding: &PendingChallenge) -> SiweResult<()> {
        sqlx::query(
            r#"
            INSERT INTO siwe_challenges (session_id, nonce, message_text, created_at)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (session_id) DO UPDATE
                SET nonce = EXCLUDED.nonce,
                    message_text = EXCLUDED.message_text,
                    created_at = EXCLUDED.created_at
            "#,
        )
        .bind(binding.session_id)
        .bind(&binding.nonce)
        .bind(&binding.message_text)
        .bind(binding.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn take(&self, session_id: Uuid) -> SiweResult<Option<PendingChallenge>> {
        let row: Option<(Uuid, String, String, DateTime<Utc>)> = sqlx::query_as(
            r#"
            DELETE FROM siwe_challenges
            WHERE session_id = $1
            RETURNING session_id, nonce, message_text, created_at
            "#,
        )
        .bind(session_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(
            |(session_id, nonce, message_text, created_at)| PendingChallenge {
                session_id,
                nonce,
                message_text,
                created_at,
            },
        ))
    }
}
