//! Periodic class-reminder sweep.

use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::state::AppState;
use crate::usecase::reminder::SendRemindersUseCase;

/// Spawn the sweep loop. The first sweep runs immediately.
pub fn spawn_reminder_loop(state: AppState, every: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(every);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            ticker.tick().await;
            run_sweep(&state).await;
        }
    })
}

async fn run_sweep(state: &AppState) {
    let usecase = SendRemindersUseCase {
        reservas: state.reserva_repo(),
        notificaciones: state.notificacion_repo(),
        push: state.push.clone(),
    };
    match usecase.execute(state.local_now()).await {
        Ok(0) => tracing::debug!("reminder sweep: nothing due"),
        Ok(sent) => tracing::info!(sent, "reminder sweep done"),
        Err(e) => tracing::error!(error = %e, "reminder sweep failed"),
    }
}
