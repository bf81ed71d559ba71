use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};

use crate::error::RecoveryServiceError;
use crate::state::AppState;
use crate::usecase::reset::{
    CheckResetCodeInput, CheckResetCodeUseCase, IssueResetCodeInput, IssueResetCodeUseCase,
    ResetPasswordInput, ResetPasswordUseCase,
};

#[derive(Deserialize)]
pub struct IssueResetCodeRequest {
    pub email: String,
}

#[derive(Serialize)]
pub struct SuccessResponse {
    pub success: bool,
}

pub async fn issue_reset_code(
    State(state): State<AppState>,
    Json(body): Json<IssueResetCodeRequest>,
) -> Result<Json<SuccessResponse>, RecoveryServiceError> {
    let usecase = IssueResetCodeUseCase {
        accounts: state.account_port(),
        reset_codes: state.reset_code_repo(),
        mailer: state.mailer(),
    };
    usecase
        .execute(IssueResetCodeInput { email: body.email })
        .await?;
    Ok(Json(SuccessResponse { success: true }))
}

#[derive(Deserialize)]
pub struct CheckResetCodeRequest {
    pub email: String,
    pub code: String,
}

#[derive(Serialize)]
pub struct CheckResetCodeResponse {
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<&'static str>,
}

pub async fn check_reset_code(
    State(state): State<AppState>,
    Json(body): Json<CheckResetCodeRequest>,
) -> Result<Json<CheckResetCodeResponse>, RecoveryServiceError> {
    let usecase = CheckResetCodeUseCase {
        reset_codes: state.reset_code_repo(),
    };
    let valid = usecase
        .execute(CheckResetCodeInput {
            email: body.email,
            code: body.code,
        })
        .await?;
    // One generic reason for every invalid outcome; sub-causes would help
    // guessing.
    Ok(Json(CheckResetCodeResponse {
        valid,
        error: (!valid).then_some("invalid or expired code"),
    }))
}

#[derive(Deserialize)]
pub struct ResetPasswordRequest {
    pub email: String,
    pub code: String,
    pub new_password: String,
}

pub async fn reset_password(
    State(state): State<AppState>,
    Json(body): Json<ResetPasswordRequest>,
) -> Result<Json<SuccessResponse>, RecoveryServiceError> {
    let usecase = ResetPasswordUseCase {
        accounts: state.account_port(),
        reset_codes: state.reset_code_repo(),
    };
    usecase
        .execute(ResetPasswordInput {
            email: body.email,
            code: body.code,
            new_password: body.new_password,
        })
        .await?;
    Ok(Json(SuccessResponse { success: true }))
}
