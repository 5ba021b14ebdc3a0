use uuid::Uuid;

use ritmofit_api::domain::types::User;
use ritmofit_api::error::ApiError;
use ritmofit_api::usecase::asistencia::{CheckInUseCase, HistorialUseCase};
use ritmofit_domain::booking::ReservaEstado;
use ritmofit_domain::user::Role;

use crate::helpers::{
    MockAsistenciaRepo, MockClaseRepo, MockReservaRepo, MockStore, at, date, test_clase,
    test_sede, test_user, time,
};

fn usecase(store: &MockStore) -> CheckInUseCase<MockClaseRepo, MockReservaRepo, MockAsistenciaRepo> {
    CheckInUseCase {
        clases: store.clases(),
        reservas: store.reservas(),
        asistencias: store.asistencias(),
    }
}

/// A booked socio and a 60-minute class on 2025-03-10 at 18:00.
fn booked() -> (MockStore, User, Uuid) {
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
    store.add_reserva(socio.id, clase.id);
    (store, socio, clase.id)
}

#[tokio::test]
async fn should_check_in_and_keep_booking_state() {
    let (store, socio, clase_id) = booked();

    let asistencia = usecase(&store)
        .execute(socio.actor(), clase_id, true, at("2025-03-10 17:45"))
        .await
        .unwrap();

    assert_eq!(asistencia.fecha_asistencia, date("2025-03-10"));
    assert_eq!(asistencia.checkin_hora, Some(time("17:45")));
    assert!(asistencia.confirmado_qr);
    let tables = store.tables();
    assert_eq!(tables.asistencias.len(), 1);
    assert_eq!(tables.reservas[0].estado, ReservaEstado::Activa);
}

#[tokio::test]
async fn should_only_open_check_in_from_an_hour_before_until_end() {
    let (store, socio, clase_id) = booked();

    for now in ["2025-03-10 16:59", "2025-03-10 19:01"] {
        let err = usecase(&store)
            .execute(socio.actor(), clase_id, false, at(now))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::CheckinWindowClosed));
    }

    usecase(&store)
        .execute(socio.actor(), clase_id, false, at("2025-03-10 19:00"))
        .await
        .unwrap();
}

#[tokio::test]
async fn should_require_a_booking() {
    let (store, _, clase_id) = booked();
    let walk_in = store.add_user(test_user(Role::Socio));

    let err = usecase(&store)
        .execute(walk_in.actor(), clase_id, false, at("2025-03-10 18:00"))
        .await
        .unwrap_err();

    assert!(matches!(err, ApiError::ReservaNotFound));
}

#[tokio::test]
async fn should_check_in_only_once() {
    let (store, socio, clase_id) = booked();

    usecase(&store)
        .execute(socio.actor(), clase_id, false, at("2025-03-10 17:50"))
        .await
        .unwrap();
    let err = usecase(&store)
        .execute(socio.actor(), clase_id, true, at("2025-03-10 18:10"))
        .await
        .unwrap_err();

    assert!(matches!(err, ApiError::AlreadyCheckedIn));
    assert_eq!(store.tables().asistencias.len(), 1);
}

#[tokio::test]
async fn should_list_history_newest_first_with_venue() {
    let store = MockStore::new();
    let sede = store.add_sede(test_sede());
    let socio = store.add_user(test_user(Role::Socio));
    for fecha in ["2025-03-03", "2025-03-10"] {
        let clase = store.add_clase(test_clase(
            sede.id,
            Uuid::new_v4(),
            date(fecha),
            time("18:00"),
            10,
        ));
        store.add_reserva(socio.id, clase.id);
        usecase(&store)
            .execute(socio.actor(), clase.id, false, at(&format!("{fecha} 18:00")))
            .await
            .unwrap();
    }

    let historial = HistorialUseCase {
        asistencias: store.asistencias(),
    };

    let items = historial.execute(socio.id, None, None).await.unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0].clase.fecha, date("2025-03-10"));
    assert_eq!(items[0].sede_nombre.as_deref(), Some("Sede Palermo"));

    let items = historial
        .execute(socio.id, Some(date("2025-03-05")), None)
        .await
        .unwrap();
    assert_eq!(items.len(), 1);

    let err = historial
        .execute(socio.id, Some(date("2025-03-10")), Some(date("2025-03-01")))
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::InvalidField("desde")));
}
