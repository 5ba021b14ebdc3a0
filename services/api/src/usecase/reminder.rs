use chrono::{Duration, NaiveDateTime, Utc};
use uuid::Uuid;

use crate::domain::repository::{NotificacionRepository, PushSender, ReservaRepository};
use crate::domain::types::{
    Notificacion, REMINDER_MAX_LEAD_MINUTES, ReminderTarget, due_for_reminder,
};
use crate::error::ApiError;

const REMINDER_TITLE: &str = "Recordatorio de clase";

fn reminder_message(target: &ReminderTarget) -> String {
    format!(
        "Tu clase de {} en {} empieza a las {}",
        target.disciplina,
        target.sede_nombre,
        target.starts_at.format("%H:%M"),
    )
}

pub struct SendRemindersUseCase<R, N, P>
where
    R: ReservaRepository,
    N: NotificacionRepository,
    P: PushSender,
{
    pub reservas: R,
    pub notificaciones: N,
    pub push: P,
}

impl<R, N, P> SendRemindersUseCase<R, N, P>
where
    R: ReservaRepository,
    N: NotificacionRepository,
    P: PushSender,
{
    /// One sweep at gym-local `now`. Returns the number of reminders pushed.
    ///
    /// Nothing marks a booking as reminded; a booking stays due for as long
    /// as its class start is inside the window.
    pub async fn execute(&self, now: NaiveDateTime) -> Result<usize, ApiError> {
        let horizon = now + Duration::minutes(REMINDER_MAX_LEAD_MINUTES);
        let targets = self
            .reservas
            .reminder_targets(now.date(), horizon.date())
            .await?;

        let mut sent = 0;
        for target in targets
            .iter()
            .filter(|t| due_for_reminder(t.starts_at, now))
        {
            let mensaje = reminder_message(target);
            if let Err(e) = self
                .push
                .send(&target.push_token, REMINDER_TITLE, &mensaje)
                .await
            {
                tracing::warn!(error = %format!("{e:#}"), reserva_id = %target.reserva_id, "reminder push failed");
                continue;
            }
            sent += 1;

            let notificacion = Notificacion {
                id: Uuid::now_v7(),
                user_id: target.user_id,
                titulo: REMINDER_TITLE.to_owned(),
                mensaje,
                leida: false,
                created_at: Utc::now(),
            };
            if let Err(e) = self.notificaciones.create(&notificacion).await {
                tracing::warn!(error = %e, reserva_id = %target.reserva_id, "reminder notification not recorded");
            }
        }
        Ok(sent)
    }
}
