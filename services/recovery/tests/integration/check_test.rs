use banter_recovery::usecase::reset::{CheckResetCodeInput, CheckResetCodeUseCase};

use crate::helpers::{
    MockResetCodeRepo, consumed_reset_code, expired_reset_code, test_reset_code,
};

const EMAIL: &str = "user@example.com";

#[tokio::test]
async fn should_report_valid_for_live_code() {
    let code = test_reset_code(EMAIL);
    let uc = CheckResetCodeUseCase {
        reset_codes: MockResetCodeRepo::new(vec![code.clone()]),
    };

    let valid = uc
        .execute(CheckResetCodeInput {
            email: EMAIL.to_owned(),
            code: code.code,
        })
        .await
        .unwrap();

    assert!(valid);
}

#[tokio::test]
async fn should_report_invalid_for_wrong_code() {
    let uc = CheckResetCodeUseCase {
        reset_codes: MockResetCodeRepo::new(vec![test_reset_code(EMAIL)]),
    };

    let valid = uc
        .execute(CheckResetCodeInput {
            email: EMAIL.to_owned(),
            code: "00000000".to_owned(),
        })
        .await
        .unwrap();

    assert!(!valid);
}

#[tokio::test]
async fn should_report_invalid_for_expired_code() {
    let code = expired_reset_code(EMAIL);
    let uc = CheckResetCodeUseCase {
        reset_codes: MockResetCodeRepo::new(vec![code.clone()]),
    };

    let valid = uc
        .execute(CheckResetCodeInput {
            email: EMAIL.to_owned(),
            code: code.code,
        })
        .await
        .unwrap();

    assert!(!valid, "expired code must not validate");
}

#[tokio::test]
async fn should_report_invalid_for_consumed_code() {
    let code = consumed_reset_code(EMAIL);
    let uc = CheckResetCodeUseCase {
        reset_codes: MockResetCodeRepo::new(vec![code.clone()]),
    };

    let valid = uc
        .execute(CheckResetCodeInput {
            email: EMAIL.to_owned(),
            code: code.code,
        })
        .await
        .unwrap();

    assert!(!valid, "consumed code must not validate");
}

#[tokio::test]
async fn should_report_invalid_for_blank_input() {
    let uc = CheckResetCodeUseCase {
        reset_codes: MockResetCodeRepo::new(vec![test_reset_code(EMAIL)]),
    };

    let valid = uc
        .execute(CheckResetCodeInput {
            email: "".to_owned(),
            code: "ABCD1234".to_owned(),
        })
        .await
        .unwrap();
    assert!(!valid, "blank identifier fails closed");

    let valid = uc
        .execute(CheckResetCodeInput {
            email: EMAIL.to_owned(),
            code: "  ".to_owned(),
        })
        .await
        .unwrap();
    assert!(!valid, "blank code fails closed");
}

#[tokio::test]
async fn should_not_consume_on_check() {
    let code = test_reset_code(EMAIL);
    let repo = MockResetCodeRepo::new(vec![code.clone()]);
    let codes_handle = repo.codes_handle();
    let uc = CheckResetCodeUseCase { reset_codes: repo };

    // Check-as-you-type: any number of checks, no state change.
    for _ in 0..3 {
        let valid = uc
            .execute(CheckResetCodeInput {
                email: EMAIL.to_owned(),
                code: code.code.clone(),
            })
            .await
            .unwrap();
        assert!(valid);
    }

    assert!(
        codes_handle.lock().unwrap()[0].consumed_at.is_none(),
        "validation must be side-effect free"
    );
}
