use uuid::Uuid;

use crate::domain::repository::NotificacionRepository;
use crate::domain::types::{Actor, Notificacion};
use crate::error::ApiError;

pub struct ListNotificacionesUseCase<R: NotificacionRepository> {
    pub repo: R,
}

impl<R: NotificacionRepository> ListNotificacionesUseCase<R> {
    pub async fn execute(&self, user_id: Uuid) -> Result<Vec<Notificacion>, ApiError> {
        self.repo.list_by_user(user_id).await
    }
}

pub struct MarkNotificacionReadUseCase<R: NotificacionRepository> {
    pub repo: R,
}

impl<R: NotificacionRepository> MarkNotificacionReadUseCase<R> {
    pub async fn execute(&self, actor: Actor, id: Uuid) -> Result<(), ApiError> {
        let notificacion = self
            .repo
            .get(id)
            .await?
            .ok_or(ApiError::NotificacionNotFound)?;
        if notificacion.user_id != actor.user_id {
            return Err(ApiError::Forbidden);
        }
        if notificacion.leida {
            return Ok(());
        }
        self.repo.mark_read(id).await
    }
}
