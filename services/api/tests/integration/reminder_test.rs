use chrono::Duration;
use uuid::Uuid;

use ritmofit_api::config::ApiConfig;
use ritmofit_api::usecase::reminder::SendRemindersUseCase;
use ritmofit_core::config::Config;
use ritmofit_domain::user::Role;

use crate::helpers::{MockPush, MockStore, at, date, test_clase, test_sede, test_user, time};

/// Book a socio with `push_token` into a class starting at `hora` on 2025-03-10.
fn book_with_token(store: &MockStore, sede_id: Uuid, hora: &str, push_token: Option<&str>) -> Uuid {
    let mut socio = test_user(Role::Socio);
    socio.push_token = push_token.map(str::to_owned);
    let socio = store.add_user(socio);
    let clase = store.add_clase(test_clase(
        sede_id,
        Uuid::new_v4(),
        date("2025-03-10"),
        time(hora),
        10,
    ));
    store.add_reserva(socio.id, clase.id);
    socio.id
}

async fn sweep(store: &MockStore, push: &MockPush, now: &str) -> usize {
    sweep_at(store, push, at(now)).await
}

async fn sweep_at(store: &MockStore, push: &MockPush, now: chrono::NaiveDateTime) -> usize {
    SendRemindersUseCase {
        reservas: store.reservas(),
        notificaciones: store.notificaciones(),
        push: push.clone(),
    }
    .execute(now)
    .await
    .unwrap()
}

#[tokio::test]
async fn should_remind_only_classes_starting_between_one_and_two_hours() {
    let store = MockStore::new();
    let sede = store.add_sede(test_sede());
    let due = book_with_token(&store, sede.id, "11:30", Some("ExponentPushToken[due]"));
    book_with_token(&store, sede.id, "11:00", Some("ExponentPushToken[exactly-1h]"));
    book_with_token(&store, sede.id, "12:00", Some("ExponentPushToken[exactly-2h]"));
    book_with_token(&store, sede.id, "10:30", Some("ExponentPushToken[too-soon]"));
    book_with_token(&store, sede.id, "15:00", Some("ExponentPushToken[too-late]"));
    let push = MockPush::new();

    let sent = sweep(&store, &push, "2025-03-10 10:00").await;

    assert_eq!(sent, 1);
    let pushes = push.sent();
    assert_eq!(pushes.len(), 1);
    assert_eq!(pushes[0].push_token, "ExponentPushToken[due]");
    assert!(pushes[0].body.contains("spinning"));
    assert!(pushes[0].body.contains("Sede Palermo"));
    assert!(pushes[0].body.contains("11:30"));

    let tables = store.tables();
    assert_eq!(tables.notificaciones.len(), 1);
    assert_eq!(tables.notificaciones[0].user_id, due);
    assert!(!tables.notificaciones[0].leida);
}

#[tokio::test]
async fn should_skip_users_without_push_token() {
    let store = MockStore::new();
    let sede = store.add_sede(test_sede());
    book_with_token(&store, sede.id, "11:30", None);
    let push = MockPush::new();

    assert_eq!(sweep(&store, &push, "2025-03-10 10:00").await, 0);
    assert!(store.tables().notificaciones.is_empty());
}

#[tokio::test]
async fn should_continue_sweep_after_a_failed_push() {
    let store = MockStore::new();
    let sede = store.add_sede(test_sede());
    book_with_token(&store, sede.id, "11:15", Some("ExponentPushToken[gone]"));
    let ok = book_with_token(&store, sede.id, "11:45", Some("ExponentPushToken[ok]"));
    let push = MockPush::rejecting(&["ExponentPushToken[gone]"]);

    let sent = sweep(&store, &push, "2025-03-10 10:00").await;

    assert_eq!(sent, 1);
    let tables = store.tables();
    assert_eq!(tables.notificaciones.len(), 1);
    assert_eq!(tables.notificaciones[0].user_id, ok);
}

#[tokio::test]
async fn should_find_classes_past_midnight() {
    let store = MockStore::new();
    let sede = store.add_sede(test_sede());
    let mut socio = test_user(Role::Socio);
    socio.push_token = Some("ExponentPushToken[night]".to_owned());
    let socio = store.add_user(socio);
    let clase = store.add_clase(test_clase(
        sede.id,
        Uuid::new_v4(),
        date("2025-03-11"),
        time("00:45"),
        10,
    ));
    store.add_reserva(socio.id, clase.id);
    let push = MockPush::new();

    assert_eq!(sweep(&store, &push, "2025-03-10 23:30").await, 1);
}

#[tokio::test]
async fn should_remind_each_booking_once_at_the_default_period() {
    let config = ApiConfig::from_pairs([
        ("DATABASE_URL".to_owned(), "mysql://localhost/ritmofit".to_owned()),
        ("JWT_SECRET".to_owned(), "secret".to_owned()),
    ])
    .unwrap();
    let period = Duration::seconds(config.reminder_interval_secs as i64);

    for first_sweep in ["2025-03-10 07:01", "2025-03-10 07:17", "2025-03-10 07:59:30"] {
        let store = MockStore::new();
        let sede = store.add_sede(test_sede());
        book_with_token(&store, sede.id, "12:00", Some("ExponentPushToken[once]"));
        let push = MockPush::new();

        let mut now = at(first_sweep);
        while now < at("2025-03-10 12:00") {
            sweep_at(&store, &push, now).await;
            now += period;
        }

        assert_eq!(push.sent().len(), 1, "first sweep at {first_sweep}");
        assert_eq!(store.tables().notificaciones.len(), 1);
    }
}
