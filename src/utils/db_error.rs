//! Classification of `sqlx` errors into [`StoreError`].

use crate::domain::errors::StoreError;

/// Name of the unique constraint on `links.code` (see `migrations/`).
pub const LINKS_CODE_CONSTRAINT: &str = "links_code_key";

pub fn is_unique_violation_on_code(e: &sqlx::Error) -> bool {
    let Some(db_err) = e.as_database_error() else {
        return false;
    };

    if !db_err.is_unique_violation() {
        return false;
    }

    matches!(db_err.constraint(), Some(LINKS_CODE_CONSTRAINT))
}

/// Returns true for errors that mean the database could not be reached.
pub fn is_connectivity_error(e: &sqlx::Error) -> bool {
    matches!(
        e,
        sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed
            | sqlx::Error::Io(_)
            | sqlx::Error::Tls(_)
            | sqlx::Error::WorkerCrashed
    )
}

/// Maps a `sqlx` error onto the store taxonomy.
///
/// `code` is the code involved in the failing statement, used to build
/// [`StoreError::Conflict`].
pub fn classify_sqlx_error(e: sqlx::Error, code: &str) -> StoreError {
    if is_unique_violation_on_code(&e) {
        return StoreError::Conflict {
            code: code.to_string(),
        };
    }

    if is_connectivity_error(&e) {
        return StoreError::Unavailable(e.to_string());
    }

    StoreError::Internal(e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pool_timeout_is_unavailable() {
        let err = classify_sqlx_error(sqlx::Error::PoolTimedOut, "abc");
        assert!(matches!(err, StoreError::Unavailable(_)));
    }

    #[test]
    fn test_io_error_is_unavailable() {
        let io = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused");
        let err = classify_sqlx_error(sqlx::Error::Io(io), "abc");
        assert!(matches!(err, StoreError::Unavailable(_)));
    }

    #[test]
    fn test_row_not_found_is_internal() {
        let err = classify_sqlx_error(sqlx::Error::RowNotFound, "abc");
        assert!(matches!(err, StoreError::Internal(_)));
        assert!(!is_unique_violation_on_code(&sqlx::Error::RowNotFound));
    }
}
