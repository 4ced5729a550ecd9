use std::time::Duration;

use crate::RepositoryError;

pub(crate) type Response<T> = Result<T, RepositoryError>;

pub(crate) trait IntoResponse<T> {
    fn into_response(self, message: &str) -> Response<T>;
}

impl<T> IntoResponse<T> for Result<T, sea_orm::DbErr> {
    fn into_response(self, message: &str) -> Response<T> {
        self.map_err(|e| RepositoryError::InSeaOrmDbErr {
            message: message.to_string(),
            source: e,
        })
    }
}

/// Bounds a store call so a stalled database fails the request instead of
/// hanging it.
pub(crate) async fn within<T, F>(
    timeout: Duration,
    message: &str,
    call: F,
) -> Response<T>
where
    F: std::future::Future<Output = Result<T, sea_orm::DbErr>>,
{
    match tokio::time::timeout(timeout, call).await {
        Ok(result) => result.into_response(message),
        Err(_) => Err(RepositoryError::Timeout {
            message: message.to_string(),
            after: timeout,
        }),
    }
}
