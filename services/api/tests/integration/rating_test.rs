use uuid::Uuid;

use ritmofit_api::domain::types::User;
use ritmofit_api::error::ApiError;
use ritmofit_api::usecase::calificacion::{RateClaseInput, RateClaseUseCase};
use ritmofit_domain::user::Role;

use crate::helpers::{
    MockAsistenciaRepo, MockCalificacionRepo, MockClaseRepo, MockStore, at, date, test_asistencia,
    test_clase, test_sede, test_user, time,
};

type Usecase = RateClaseUseCase<MockClaseRepo, MockAsistenciaRepo, MockCalificacionRepo>;

fn usecase(store: &MockStore) -> Usecase {
    RateClaseUseCase {
        clases: store.clases(),
        asistencias: store.asistencias(),
        calificaciones: store.calificaciones(),
    }
}

fn input(clase_id: Uuid, puntuacion: i16) -> RateClaseInput {
    RateClaseInput {
        clase_id,
        puntuacion,
        puntuacion_instructor: Some(4),
        comentario: Some("  Muy buena clase  ".to_owned()),
    }
}

/// A socio who checked in at 18:05 to the 2025-03-10 18:00 class.
fn attended() -> (MockStore, User, Uuid) {
    let store = MockStore::new();
    let sede = store.add_sede(test_sede());
    let instructor = store.add_user(test_user(Role::Instructor));
    let socio = store.add_user(test_user(Role::Socio));
    let clase = store.add_clase(test_clase(
        sede.id,
        instructor.id,
        date("2025-03-10"),
        time("18:00"),
        10,
    ));
    store.add_asistencia(test_asistencia(
        socio.id,
        clase.id,
        date("2025-03-10"),
        Some(time("18:05")),
    ));
    (store, socio, clase.id)
}

#[tokio::test]
async fn should_rate_attended_class_within_window() {
    let (store, socio, clase_id) = attended();

    let calificacion = usecase(&store)
        .execute(socio.actor(), input(clase_id, 5), at("2025-03-11 18:05"))
        .await
        .unwrap();

    assert_eq!(calificacion.puntuacion, 5);
    assert_eq!(calificacion.comentario.as_deref(), Some("Muy buena clase"));
    assert_eq!(store.tables().calificaciones.len(), 1);
}

#[tokio::test]
async fn should_close_window_24_hours_after_check_in() {
    let (store, socio, clase_id) = attended();

    let err = usecase(&store)
        .execute(socio.actor(), input(clase_id, 4), at("2025-03-11 18:06"))
        .await
        .unwrap_err();

    assert!(matches!(err, ApiError::RatingWindowExpired));
    assert!(store.tables().calificaciones.is_empty());
}

#[tokio::test]
async fn should_fall_back_to_class_start_without_check_in_time() {
    let store = MockStore::new();
    let sede = store.add_sede(test_sede());
    let socio = store.add_user(test_user(Role::Socio));
    let clase = store.add_clase(test_clase(
        sede.id,
        Uuid::new_v4(),
        date("2025-03-10"),
        time("18:00"),
        10,
    ));
    store.add_asistencia(test_asistencia(socio.id, clase.id, date("2025-03-10"), None));

    let err = usecase(&store)
        .execute(socio.actor(), input(clase.id, 4), at("2025-03-11 18:01"))
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::RatingWindowExpired));

    usecase(&store)
        .execute(socio.actor(), input(clase.id, 4), at("2025-03-11 18:00"))
        .await
        .unwrap();
}

#[tokio::test]
async fn should_fall_back_to_midnight_when_class_is_gone() {
    let store = MockStore::new();
    let socio = store.add_user(test_user(Role::Socio));
    let clase_id = Uuid::new_v4();
    store.add_asistencia(test_asistencia(socio.id, clase_id, date("2025-03-10"), None));

    let err = usecase(&store)
        .execute(socio.actor(), input(clase_id, 3), at("2025-03-11 00:01"))
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::RatingWindowExpired));

    usecase(&store)
        .execute(socio.actor(), input(clase_id, 3), at("2025-03-10 23:59"))
        .await
        .unwrap();
}

#[tokio::test]
async fn should_rate_a_class_only_once() {
    let (store, socio, clase_id) = attended();
    let now = at("2025-03-10 20:00");

    usecase(&store)
        .execute(socio.actor(), input(clase_id, 5), now)
        .await
        .unwrap();
    let err = usecase(&store)
        .execute(socio.actor(), input(clase_id, 1), now)
        .await
        .unwrap_err();

    assert!(matches!(err, ApiError::AlreadyRated));
    assert_eq!(store.tables().calificaciones.len(), 1);
}

#[tokio::test]
async fn should_require_attendance() {
    let (store, _, clase_id) = attended();
    let stranger = store.add_user(test_user(Role::Socio));

    let err = usecase(&store)
        .execute(stranger.actor(), input(clase_id, 5), at("2025-03-10 20:00"))
        .await
        .unwrap_err();

    assert!(matches!(err, ApiError::AsistenciaNotFound));
}

#[tokio::test]
async fn should_reject_scores_outside_one_to_five() {
    let (store, socio, clase_id) = attended();
    let now = at("2025-03-10 20:00");

    for score in [0, 6, -1] {
        let err = usecase(&store)
            .execute(socio.actor(), input(clase_id, score), now)
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::InvalidField("puntuacion")));
    }

    let mut bad_instructor = input(clase_id, 5);
    bad_instructor.puntuacion_instructor = Some(9);
    let err = usecase(&store)
        .execute(socio.actor(), bad_instructor, now)
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::InvalidField("puntuacion_instructor")));
    assert!(store.tables().calificaciones.is_empty());
}
