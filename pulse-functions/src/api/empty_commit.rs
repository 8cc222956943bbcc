//! Empty Commit API Handler

use axum::extract::State;

use crate::api::AppState;
use crate::api::error::ApiResult;
use crate::service::InvocationStage;

/// ANY /empty-commit
/// Create a verified empty commit on the configured repository
///
/// The request body and method are ignored.
pub async fn empty_commit(State(state): State<AppState>) -> ApiResult<String> {
    let commit = state.empty_commit.run().await?;

    tracing::info!(
        stage = %InvocationStage::Responded,
        "Successfully created verified empty commit: {}",
        commit.oid
    );

    Ok(format!("Created verified empty commit: {}\n", commit.oid))
}
