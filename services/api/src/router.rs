use axum::{
    Router,
    routing::{delete, get, patch, post, put},
};
use tower_http::trace::TraceLayer;

use ritmofit_core::health::healthz;
use ritmofit_core::middleware::{cors_layer, propagate_request_id_layer, request_id_layer};

use crate::handlers::{
    asistencia::{check_in, get_historial},
    auth::{
        forgot_password, login, login_pin, register, reset_password, verify_login,
        verify_register,
    },
    calificacion::{list_calificaciones, rate_clase},
    clase::{
        create_clase, delete_clase, get_clase, get_clase_ratings, get_roster, list_clases,
        update_clase,
    },
    health::readyz,
    noticia::{create_noticia, delete_noticia, get_noticia, list_noticias, update_noticia},
    notificacion::{list_notificaciones, mark_read},
    objetivo::{create_objetivo, delete_objetivo, get_objetivo, list_objetivos},
    reserva::{book_clase, cancel_reserva, list_reservas},
    sede::{create_sede, delete_sede, get_sede, list_sedes, update_sede},
    user::{
        delete_me, get_me, list_users, request_deletion, set_active, set_pin, set_push_token,
        set_role, update_me,
    },
};
use crate::state::AppState;

pub fn build_router(state: AppState, cors_origin: Option<&str>) -> Router {
    Router::new()
        // Health
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        // Auth
        .route("/api/auth/register", post(register))
        .route("/api/auth/register/verify", post(verify_register))
        .route("/api/auth/login", post(login))
        .route("/api/auth/login/verify", post(verify_login))
        .route("/api/auth/login/pin", post(login_pin))
        .route("/api/auth/password/forgot", post(forgot_password))
        .route("/api/auth/password/reset", post(reset_password))
        // Users
        .route("/api/users/me", get(get_me).patch(update_me).delete(delete_me))
        .route("/api/users/me/pin", put(set_pin))
        .route("/api/users/me/push-token", put(set_push_token))
        .route("/api/users/me/delete-request", post(request_deletion))
        .route("/api/users", get(list_users))
        .route("/api/users/{id}/role", patch(set_role))
        .route("/api/users/{id}/active", patch(set_active))
        // Sedes
        .route("/api/sedes", get(list_sedes).post(create_sede))
        .route(
            "/api/sedes/{id}",
            get(get_sede).patch(update_sede).delete(delete_sede),
        )
        // Clases
        .route("/api/clases", get(list_clases).post(create_clase))
        .route(
            "/api/clases/{id}",
            get(get_clase).patch(update_clase).delete(delete_clase),
        )
        .route("/api/clases/{id}/reservas", get(get_roster))
        .route("/api/clases/{id}/calificaciones", get(get_clase_ratings))
        // Reservas
        .route("/api/reservas", get(list_reservas).post(book_clase))
        .route("/api/reservas/{id}", delete(cancel_reserva))
        // Asistencias
        .route("/api/asistencias", post(check_in))
        .route("/api/historial", get(get_historial))
        // Calificaciones
        .route(
            "/api/calificaciones",
            get(list_calificaciones).post(rate_clase),
        )
        // Objetivos
        .route("/api/objetivos", get(list_objetivos).post(create_objetivo))
        .route(
            "/api/objetivos/{id}",
            get(get_objetivo).delete(delete_objetivo),
        )
        // Noticias
        .route("/api/noticias", get(list_noticias).post(create_noticia))
        .route(
            "/api/noticias/{id}",
            get(get_noticia).patch(update_noticia).delete(delete_noticia),
        )
        // Notificaciones
        .route("/api/notificaciones", get(list_notificaciones))
        .route("/api/notificaciones/{id}/leida", patch(mark_read))
        .layer(propagate_request_id_layer())
        .layer(TraceLayer::new_for_http())
        .layer(request_id_layer())
        .layer(cors_layer(cors_origin))
        .with_state(state)
}
