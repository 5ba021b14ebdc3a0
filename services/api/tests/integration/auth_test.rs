use chrono::{Duration, Utc};
use uuid::Uuid;

use ritmofit_api::auth::authenticate;
use ritmofit_api::domain::types::{OtpCode, User};
use ritmofit_api::error::ApiError;
use ritmofit_api::usecase::auth::{
    ForgotPasswordUseCase, LoginInput, LoginUseCase, PinLoginInput, PinLoginUseCase,
    RegisterInput, RegisterUseCase, ResetPasswordInput, ResetPasswordUseCase, VerifyCodeInput,
    VerifyLoginUseCase, VerifyRegisterUseCase,
};
use ritmofit_api::usecase::user::{ConfirmDeletionUseCase, RequestDeletionUseCase, SetPinUseCase};
use ritmofit_auth_types::token::validate_access_token;
use ritmofit_domain::otp::OtpPurpose;
use ritmofit_domain::user::Role;
use ritmofit_testing::auth::MockAuth;

use crate::helpers::{
    MockMailer, MockOtpRepo, MockStore, MockUserRepo, TEST_JWT_SECRET, TEST_PASSWORD, test_user,
};

const TTL: u64 = 3600;

fn register_input(email: &str, username: &str) -> RegisterInput {
    RegisterInput {
        nombre: "Lucía Gómez".to_owned(),
        email: email.to_owned(),
        username: username.to_owned(),
        password: TEST_PASSWORD.to_owned(),
    }
}

fn verify_register(store: &MockStore) -> VerifyRegisterUseCase<MockUserRepo, MockOtpRepo> {
    VerifyRegisterUseCase {
        users: store.users(),
        otps: store.otps(),
        jwt_secret: TEST_JWT_SECRET.to_owned(),
        token_ttl_secs: TTL,
    }
}

fn verify_login(store: &MockStore) -> VerifyLoginUseCase<MockUserRepo, MockOtpRepo> {
    VerifyLoginUseCase {
        users: store.users(),
        otps: store.otps(),
        jwt_secret: TEST_JWT_SECRET.to_owned(),
        token_ttl_secs: TTL,
    }
}

async fn login(store: &MockStore, mailer: &MockMailer, user: &User) -> Result<(), ApiError> {
    LoginUseCase {
        users: store.users(),
        otps: store.otps(),
        mailer: mailer.clone(),
    }
    .execute(LoginInput {
        email: user.email.clone(),
        password: TEST_PASSWORD.to_owned(),
    })
    .await
}

// ── Register ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_register_inactive_then_activate_with_emailed_code() {
    let store = MockStore::new();
    let mailer = MockMailer::new();

    let user = RegisterUseCase {
        users: store.users(),
        otps: store.otps(),
        mailer: mailer.clone(),
    }
    .execute(register_input("  Lucia@Example.COM ", "lucia"))
    .await
    .unwrap();

    assert_eq!(user.email, "lucia@example.com");
    assert_eq!(user.role, Role::Socio);
    assert!(!user.activo);

    let code = mailer
        .last_code("lucia@example.com", OtpPurpose::Register)
        .expect("registration code emailed");

    let session = verify_register(&store)
        .execute(VerifyCodeInput {
            email: "lucia@example.com".to_owned(),
            code,
        })
        .await
        .unwrap();

    assert!(session.user.activo);
    assert!(store.find_user(user.id).unwrap().activo);
    let info = validate_access_token(&session.token, TEST_JWT_SECRET).unwrap();
    assert_eq!(info.user_id, user.id);
    assert!(store.tables().otps.is_empty());
}

#[tokio::test]
async fn should_reject_taken_email_and_username() {
    let store = MockStore::new();
    let mut existing = test_user(Role::Socio);
    existing.email = "ana@example.com".to_owned();
    existing.username = "ana".to_owned();
    store.add_user(existing);
    let usecase = RegisterUseCase {
        users: store.users(),
        otps: store.otps(),
        mailer: MockMailer::new(),
    };

    let err = usecase
        .execute(register_input("ANA@example.com", "ana2"))
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::EmailTaken));

    let err = usecase
        .execute(register_input("other@example.com", "ana"))
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::UsernameTaken));
}

#[tokio::test]
async fn should_restart_unconfirmed_registration_after_code_expires() {
    let store = MockStore::new();
    let mailer = MockMailer::new();
    let usecase = RegisterUseCase {
        users: store.users(),
        otps: store.otps(),
        mailer: mailer.clone(),
    };
    let first = usecase
        .execute(register_input("lucia@example.com", "lucia"))
        .await
        .unwrap();
    let stale = mailer
        .last_code("lucia@example.com", OtpPurpose::Register)
        .unwrap();
    store.tables().otps[0].expires_at = Utc::now() - Duration::minutes(1);

    let err = verify_register(&store)
        .execute(VerifyCodeInput {
            email: "lucia@example.com".to_owned(),
            code: stale,
        })
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::InvalidOtp));

    let again = usecase
        .execute(register_input("Lucia@example.com", "lucia.g"))
        .await
        .unwrap();
    assert_eq!(again.id, first.id);
    assert_eq!(store.tables().users.len(), 1);

    let code = mailer
        .last_code("lucia@example.com", OtpPurpose::Register)
        .unwrap();
    let session = verify_register(&store)
        .execute(VerifyCodeInput {
            email: "lucia@example.com".to_owned(),
            code,
        })
        .await
        .unwrap();
    assert!(session.user.activo);
    assert_eq!(session.user.username, "lucia.g");

    // Once confirmed, the email is taken for good.
    let err = usecase
        .execute(register_input("lucia@example.com", "lucia2"))
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::EmailTaken));
}

#[tokio::test]
async fn should_not_reopen_an_account_disabled_after_confirmation() {
    let store = MockStore::new();
    let mut disabled = test_user(Role::Socio);
    disabled.activo = false;
    let disabled = store.add_user(disabled);

    let err = RegisterUseCase {
        users: store.users(),
        otps: store.otps(),
        mailer: MockMailer::new(),
    }
    .execute(register_input(&disabled.email, "someone-else"))
    .await
    .unwrap_err();

    assert!(matches!(err, ApiError::EmailTaken));
    assert!(store.tables().otps.is_empty());
}

#[tokio::test]
async fn should_reject_short_password_and_missing_fields() {
    let store = MockStore::new();
    let usecase = RegisterUseCase {
        users: store.users(),
        otps: store.otps(),
        mailer: MockMailer::new(),
    };

    let mut input = register_input("ana@example.com", "ana");
    input.password = "short".to_owned();
    let err = usecase.execute(input).await.unwrap_err();
    assert!(matches!(err, ApiError::InvalidField("password")));

    let err = usecase
        .execute(register_input("ana@example.com", "   "))
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::MissingData));
    assert!(store.tables().users.is_empty());
}

#[tokio::test]
async fn should_register_even_when_email_delivery_fails() {
    let store = MockStore::new();

    let user = RegisterUseCase {
        users: store.users(),
        otps: store.otps(),
        mailer: MockMailer::failing(),
    }
    .execute(register_input("ana@example.com", "ana"))
    .await
    .unwrap();

    let tables = store.tables();
    assert_eq!(tables.users.len(), 1);
    assert!(
        tables
            .otps
            .iter()
            .any(|o| o.user_id == user.id && o.purpose == OtpPurpose::Register)
    );
}

// ── Login ────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_refuse_login_before_verification() {
    let store = MockStore::new();
    let mailer = MockMailer::new();
    let mut user = test_user(Role::Socio);
    user.activo = false;
    user.verificado = false;
    let user = store.add_user(user);

    let err = login(&store, &mailer, &user).await.unwrap_err();
    assert!(matches!(err, ApiError::AccountNotVerified));
    assert!(mailer.sent.lock().unwrap().is_empty());
}

#[tokio::test]
async fn should_refuse_wrong_password_and_unknown_email() {
    let store = MockStore::new();
    let user = store.add_user(test_user(Role::Socio));
    let usecase = LoginUseCase {
        users: store.users(),
        otps: store.otps(),
        mailer: MockMailer::new(),
    };

    let err = usecase
        .execute(LoginInput {
            email: user.email.clone(),
            password: "not-the-password".to_owned(),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::InvalidCredentials));

    let err = usecase
        .execute(LoginInput {
            email: "nobody@example.com".to_owned(),
            password: TEST_PASSWORD.to_owned(),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::InvalidCredentials));
}

#[tokio::test]
async fn should_login_with_emailed_code_only_once() {
    let store = MockStore::new();
    let mailer = MockMailer::new();
    let user = store.add_user(test_user(Role::Instructor));

    login(&store, &mailer, &user).await.unwrap();
    let code = mailer.last_code(&user.email, OtpPurpose::Login).unwrap();

    let session = verify_login(&store)
        .execute(VerifyCodeInput {
            email: user.email.clone(),
            code: code.clone(),
        })
        .await
        .unwrap();
    let info = validate_access_token(&session.token, TEST_JWT_SECRET).unwrap();
    assert_eq!(info.user_id, user.id);
    assert_eq!(info.user_role, Some(Role::Instructor));

    let err = verify_login(&store)
        .execute(VerifyCodeInput {
            email: user.email.clone(),
            code,
        })
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::InvalidOtp));
}

#[tokio::test]
async fn should_not_accept_a_code_issued_for_another_purpose() {
    let store = MockStore::new();
    let mailer = MockMailer::new();
    let user = store.add_user(test_user(Role::Socio));

    ForgotPasswordUseCase {
        users: store.users(),
        otps: store.otps(),
        mailer: mailer.clone(),
    }
    .execute(&user.email)
    .await
    .unwrap();
    let reset_code = mailer.last_code(&user.email, OtpPurpose::Reset).unwrap();

    let err = verify_login(&store)
        .execute(VerifyCodeInput {
            email: user.email.clone(),
            code: reset_code,
        })
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::InvalidOtp));
}

#[tokio::test]
async fn should_keep_codes_of_different_purposes_apart() {
    let store = MockStore::new();
    let mailer = MockMailer::new();
    let user = store.add_user(test_user(Role::Socio));

    login(&store, &mailer, &user).await.unwrap();
    ForgotPasswordUseCase {
        users: store.users(),
        otps: store.otps(),
        mailer: mailer.clone(),
    }
    .execute(&user.email)
    .await
    .unwrap();
    assert_eq!(store.tables().otps.len(), 2);

    // A second login request replaces only the login code.
    login(&store, &mailer, &user).await.unwrap();
    assert_eq!(store.tables().otps.len(), 2);
    let login_code = mailer.last_code(&user.email, OtpPurpose::Login).unwrap();
    verify_login(&store)
        .execute(VerifyCodeInput {
            email: user.email.clone(),
            code: login_code,
        })
        .await
        .unwrap();
}

#[tokio::test]
async fn should_reject_expired_code() {
    let store = MockStore::new();
    let user = store.add_user(test_user(Role::Socio));
    let issued = Utc::now() - Duration::minutes(20);
    store.tables().otps.push(OtpCode {
        id: Uuid::new_v4(),
        user_id: user.id,
        purpose: OtpPurpose::Login,
        code: "123456".to_owned(),
        expires_at: issued + Duration::minutes(15),
        attempts: 0,
        created_at: issued,
    });

    let err = verify_login(&store)
        .execute(VerifyCodeInput {
            email: user.email.clone(),
            code: "123456".to_owned(),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::InvalidOtp));
}

#[tokio::test]
async fn should_discard_code_after_repeated_wrong_guesses() {
    let store = MockStore::new();
    let mailer = MockMailer::new();
    let user = store.add_user(test_user(Role::Socio));
    let guess = |code: &str| VerifyCodeInput {
        email: user.email.clone(),
        code: code.to_owned(),
    };

    // A few misses leave the code usable.
    login(&store, &mailer, &user).await.unwrap();
    let code = mailer.last_code(&user.email, OtpPurpose::Login).unwrap();
    let wrong = if code == "000000" { "999999" } else { "000000" };
    for _ in 0..4 {
        let err = verify_login(&store).execute(guess(wrong)).await.unwrap_err();
        assert!(matches!(err, ApiError::InvalidOtp));
    }
    verify_login(&store).execute(guess(code.as_str())).await.unwrap();

    // The fifth miss burns it, so even the right digits fail afterwards.
    login(&store, &mailer, &user).await.unwrap();
    let code = mailer.last_code(&user.email, OtpPurpose::Login).unwrap();
    let wrong = if code == "000000" { "999999" } else { "000000" };
    for _ in 0..5 {
        let err = verify_login(&store).execute(guess(wrong)).await.unwrap_err();
        assert!(matches!(err, ApiError::InvalidOtp));
    }
    assert!(store.tables().otps.is_empty());
    let err = verify_login(&store).execute(guess(code.as_str())).await.unwrap_err();
    assert!(matches!(err, ApiError::InvalidOtp));
}

// ── PIN ──────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_require_a_pin_before_pin_login() {
    let store = MockStore::new();
    let user = store.add_user(test_user(Role::Socio));
    let usecase = PinLoginUseCase {
        users: store.users(),
        jwt_secret: TEST_JWT_SECRET.to_owned(),
        token_ttl_secs: TTL,
    };

    let err = usecase
        .execute(PinLoginInput {
            email: user.email.clone(),
            pin: "1234".to_owned(),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::PinNotSet));

    SetPinUseCase {
        users: store.users(),
    }
    .execute(user.clone(), "1234")
    .await
    .unwrap();

    let session = usecase
        .execute(PinLoginInput {
            email: user.email.clone(),
            pin: "1234".to_owned(),
        })
        .await
        .unwrap();
    assert_eq!(session.user.id, user.id);

    let err = usecase
        .execute(PinLoginInput {
            email: user.email.clone(),
            pin: "9999".to_owned(),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::InvalidCredentials));
}

#[tokio::test]
async fn should_reject_malformed_pin() {
    let store = MockStore::new();
    let user = store.add_user(test_user(Role::Socio));

    for pin in ["12", "1234567", "12a4"] {
        let err = SetPinUseCase {
            users: store.users(),
        }
        .execute(user.clone(), pin)
        .await
        .unwrap_err();
        assert!(matches!(err, ApiError::InvalidField("pin")));
    }
}

// ── Password reset ───────────────────────────────────────────────────────────

#[tokio::test]
async fn should_reset_password_with_emailed_code() {
    let store = MockStore::new();
    let mailer = MockMailer::new();
    let user = store.add_user(test_user(Role::Socio));

    ForgotPasswordUseCase {
        users: store.users(),
        otps: store.otps(),
        mailer: mailer.clone(),
    }
    .execute(&user.email)
    .await
    .unwrap();
    let code = mailer.last_code(&user.email, OtpPurpose::Reset).unwrap();

    ResetPasswordUseCase {
        users: store.users(),
        otps: store.otps(),
    }
    .execute(ResetPasswordInput {
        email: user.email.clone(),
        code,
        password: "brand-new-secret".to_owned(),
    })
    .await
    .unwrap();

    let err = login(&store, &mailer, &user).await.unwrap_err();
    assert!(matches!(err, ApiError::InvalidCredentials));

    LoginUseCase {
        users: store.users(),
        otps: store.otps(),
        mailer: mailer.clone(),
    }
    .execute(LoginInput {
        email: user.email.clone(),
        password: "brand-new-secret".to_owned(),
    })
    .await
    .unwrap();
}

#[tokio::test]
async fn should_report_unknown_email_on_forgot_password() {
    let store = MockStore::new();

    let err = ForgotPasswordUseCase {
        users: store.users(),
        otps: store.otps(),
        mailer: MockMailer::new(),
    }
    .execute("ghost@example.com")
    .await
    .unwrap_err();
    assert!(matches!(err, ApiError::UserNotFound));
}

// ── Token resolution ─────────────────────────────────────────────────────────

#[tokio::test]
async fn should_resolve_token_to_live_user() {
    let store = MockStore::new();
    let user = store.add_user(test_user(Role::Admin));
    let token = MockAuth::new(user.id, user.role).token();

    let resolved = authenticate(&store.users(), TEST_JWT_SECRET, Some(&token))
        .await
        .unwrap();
    assert_eq!(resolved.id, user.id);
}

#[tokio::test]
async fn should_reject_missing_or_malformed_token() {
    let store = MockStore::new();

    let err = authenticate(&store.users(), TEST_JWT_SECRET, None)
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::InvalidToken));

    let err = authenticate(&store.users(), TEST_JWT_SECRET, Some("not.a.jwt"))
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::InvalidToken));
}

#[tokio::test]
async fn should_reject_token_of_unknown_user() {
    let store = MockStore::new();
    let token = MockAuth::new(Uuid::new_v4(), Role::Socio).token();

    let err = authenticate(&store.users(), TEST_JWT_SECRET, Some(&token))
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::InvalidToken));
}

#[tokio::test]
async fn should_reject_token_of_deactivated_user() {
    let store = MockStore::new();
    let mut user = test_user(Role::Socio);
    user.activo = false;
    let user = store.add_user(user);
    let token = MockAuth::new(user.id, user.role).token();

    let err = authenticate(&store.users(), TEST_JWT_SECRET, Some(&token))
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::InvalidToken));
}

#[tokio::test]
async fn should_invalidate_tokens_after_account_deletion() {
    let store = MockStore::new();
    let mailer = MockMailer::new();
    let user = store.add_user(test_user(Role::Socio));
    let token = MockAuth::new(user.id, user.role).token();

    RequestDeletionUseCase {
        otps: store.otps(),
        mailer: mailer.clone(),
    }
    .execute(&user)
    .await
    .unwrap();
    let code = mailer.last_code(&user.email, OtpPurpose::Delete).unwrap();

    ConfirmDeletionUseCase {
        users: store.users(),
        otps: store.otps(),
    }
    .execute(user.clone(), &code)
    .await
    .unwrap();

    assert!(store.find_user(user.id).unwrap().eliminado);
    let err = authenticate(&store.users(), TEST_JWT_SECRET, Some(&token))
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::InvalidToken));
}
