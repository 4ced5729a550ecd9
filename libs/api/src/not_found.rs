use crate::ApiError;

pub(super) async fn get_404() -> ApiError {
    ApiError::NotFound("Ruta no encontrada.".to_string())
}
