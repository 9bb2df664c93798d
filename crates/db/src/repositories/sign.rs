//! Sign repository for session/device tracking operations.
//!
//! A sign record is written on every successful login and keyed by the
//! issuer token handed to that client. Self-logout removes the record by
//! issuer; forced logout from another device removes it by login id.

use chrono::{Duration, Utc};
use sea_orm::prelude::DateTimeWithTimeZone;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Set,
};

use signtrack_shared::AppError;
use signtrack_shared::types::{PageRequest, PageResponse};

use crate::entities::signs;

/// Number of days a sign record counts as a recent device.
///
/// Issuer tokens are rotated on every login, so a record older than this
/// window can no longer belong to a live session.
const DEVICE_WINDOW_DAYS: i64 = 30;

/// Error types for sign operations.
#[derive(Debug, thiserror::Error)]
pub enum SignError {
    /// No sign record matched the lookup.
    #[error("Sign record not found")]
    NotFound,

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

impl From<SignError> for AppError {
    fn from(err: SignError) -> Self {
        match err {
            SignError::NotFound => Self::NotFound("sign record".to_string()),
            SignError::Database(e) => Self::Database(e.to_string()),
        }
    }
}

/// Input for recording a new sign-in.
#[derive(Debug, Clone)]
pub struct NewSign {
    /// Globally unique login id assigned at token issuance.
    pub login_id: i64,
    /// Owning account id.
    pub user_id: i64,
    /// Opaque token identifying this session.
    pub issuer: String,
    /// Client IP address.
    pub ip: String,
    /// Client user agent string.
    pub user_agent: String,
    /// User-editable device label.
    pub device_name: String,
}

/// Sign repository for CRUD operations.
#[derive(Debug, Clone)]
pub struct SignRepository {
    db: DatabaseConnection,
}

impl SignRepository {
    /// Creates a new sign repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Records a new sign-in.
    ///
    /// `online_time` and `created_at` are stamped with the current time.
    ///
    /// # Errors
    ///
    /// Returns an error if the database insert fails, including on a
    /// duplicate issuer or login id.
    pub async fn create(&self, input: NewSign) -> Result<signs::Model, SignError> {
        let now = Utc::now().into();

        let sign = signs::ActiveModel {
            id: Set(input.login_id),
            user_id: Set(input.user_id),
            issuer: Set(input.issuer),
            ip: Set(input.ip),
            user_agent: Set(input.user_agent),
            device_name: Set(input.device_name),
            online_time: Set(now),
            created_at: Set(now),
        };

        Ok(sign.insert(&self.db).await?)
    }

    /// Finds a sign record by issuer.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_issuer(&self, issuer: &str) -> Result<Option<signs::Model>, SignError> {
        Ok(signs::Entity::find()
            .filter(signs::Column::Issuer.eq(issuer))
            .one(&self.db)
            .await?)
    }

    /// Checks that an issuer belongs to a recorded session.
    ///
    /// # Errors
    ///
    /// Returns `SignError::NotFound` if no record matches, or a database
    /// error if the query fails.
    pub async fn validate_issuer(&self, issuer: &str) -> Result<(), SignError> {
        self.find_by_issuer(issuer)
            .await?
            .map(|_| ())
            .ok_or(SignError::NotFound)
    }

    /// Stamps the session matching the issuer as seen just now.
    ///
    /// Returns whether a row was updated; an issuer that matches nothing is
    /// reported as `false`, not an error, so the caller decides how much to
    /// care about a vanished session.
    ///
    /// # Errors
    ///
    /// Returns an error if the database update fails.
    pub async fn refresh_online_time(&self, issuer: &str) -> Result<bool, SignError> {
        let now: DateTimeWithTimeZone = Utc::now().into();

        let result = signs::Entity::update_many()
            .col_expr(
                signs::Column::OnlineTime,
                sea_orm::sea_query::Expr::value(now),
            )
            .filter(signs::Column::Issuer.eq(issuer))
            .exec(&self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }

    /// Resolves the login id recorded for a fingerprint triple.
    ///
    /// All three fields must match the same record.
    ///
    /// # Errors
    ///
    /// Returns `SignError::NotFound` if no record matches, or a database
    /// error if the query fails.
    pub async fn resolve_login_id(
        &self,
        user_id: i64,
        ip: &str,
        user_agent: &str,
    ) -> Result<i64, SignError> {
        let login_id: Option<i64> = signs::Entity::find()
            .select_only()
            .column(signs::Column::Id)
            .filter(signs::Column::UserId.eq(user_id))
            .filter(signs::Column::Ip.eq(ip))
            .filter(signs::Column::UserAgent.eq(user_agent))
            .into_tuple()
            .one(&self.db)
            .await?;

        login_id.ok_or(SignError::NotFound)
    }

    /// Deletes the session matching the issuer (self-logout).
    ///
    /// Idempotent: zero rows affected is still a success.
    ///
    /// # Errors
    ///
    /// Returns an error if the database delete fails.
    pub async fn delete_by_issuer(&self, issuer: &str) -> Result<u64, SignError> {
        let result = signs::Entity::delete_many()
            .filter(signs::Column::Issuer.eq(issuer))
            .exec(&self.db)
            .await?;

        Ok(result.rows_affected)
    }

    /// Deletes the session matching the login id (forced logout by another
    /// actor).
    ///
    /// Idempotent under the same rule as [`Self::delete_by_issuer`].
    ///
    /// # Errors
    ///
    /// Returns an error if the database delete fails.
    pub async fn delete_by_login_id(&self, login_id: i64) -> Result<u64, SignError> {
        let result = signs::Entity::delete_many()
            .filter(signs::Column::Id.eq(login_id))
            .exec(&self.db)
            .await?;

        Ok(result.rows_affected)
    }

    /// Lists a user's recent devices, newest first.
    ///
    /// Only records created within the device window are counted and
    /// returned. A total of zero short-circuits without a page query.
    /// Ordering is `created_at` descending with `id` descending as a
    /// tiebreak, so pages stay stable across requests.
    ///
    /// # Errors
    ///
    /// Returns an error if a database query fails.
    pub async fn list_devices(
        &self,
        user_id: i64,
        page: &PageRequest,
    ) -> Result<PageResponse<signs::Model>, SignError> {
        let window_start = Self::device_window_start();

        let total = signs::Entity::find()
            .filter(signs::Column::UserId.eq(user_id))
            .filter(signs::Column::CreatedAt.gt(window_start))
            .count(&self.db)
            .await?;

        if total == 0 {
            return Ok(PageResponse::new(Vec::new(), page, 0));
        }

        let devices = signs::Entity::find()
            .filter(signs::Column::UserId.eq(user_id))
            .filter(signs::Column::CreatedAt.gt(window_start))
            .order_by_desc(signs::Column::CreatedAt)
            .order_by_desc(signs::Column::Id)
            .offset(page.offset())
            .limit(page.limit())
            .all(&self.db)
            .await?;

        Ok(PageResponse::new(devices, page, total))
    }

    /// Updates the device label for a login id.
    ///
    /// A rename that matches no row is a no-op, not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the database update fails.
    pub async fn rename_device(&self, login_id: i64, device_name: &str) -> Result<u64, SignError> {
        let result = signs::Entity::update_many()
            .col_expr(
                signs::Column::DeviceName,
                sea_orm::sea_query::Expr::value(device_name),
            )
            .filter(signs::Column::Id.eq(login_id))
            .exec(&self.db)
            .await?;

        Ok(result.rows_affected)
    }

    /// Deletes sign records older than the device window (for maintenance).
    ///
    /// Stale records are never purged implicitly; this must be invoked by
    /// an operator or a scheduled job.
    ///
    /// # Errors
    ///
    /// Returns an error if the database delete fails.
    pub async fn delete_stale(&self) -> Result<u64, SignError> {
        let result = signs::Entity::delete_many()
            .filter(signs::Column::CreatedAt.lte(Self::device_window_start()))
            .exec(&self.db)
            .await?;

        tracing::debug!(rows = result.rows_affected, "Deleted stale sign records");

        Ok(result.rows_affected)
    }

    fn device_window_start() -> DateTimeWithTimeZone {
        (Utc::now() - Duration::days(DEVICE_WINDOW_DAYS)).into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(SignError::NotFound.to_string(), "Sign record not found");

        let err = SignError::Database(DbErr::Custom("connection reset".to_string()));
        assert!(err.to_string().contains("connection reset"));
    }

    #[test]
    fn test_app_error_conversion() {
        let err = AppError::from(SignError::NotFound);
        assert_eq!(err.status_code(), 404);
        assert_eq!(err.error_code(), "NOT_FOUND");

        let err = AppError::from(SignError::Database(DbErr::Custom("boom".to_string())));
        assert_eq!(err.status_code(), 500);
        assert!(err.to_string().contains("boom"));
    }
}
