use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::context::actions::ZcvAction;
use crate::errors::AppError;
use crate::state::AppState;
use crate::view::dashboard::{build_dashboard, Dashboard};
use crate::view::View;

#[derive(Debug, Serialize, Deserialize)]
pub struct ViewBody {
    pub view: View,
}

/// GET /api/v1/view
pub async fn handle_get_view(State(state): State<AppState>) -> Json<ViewBody> {
    let view = state.store.read(|s| s.current_view).await;
    Json(ViewBody { view })
}

/// PUT /api/v1/view
pub async fn handle_set_view(
    State(state): State<AppState>,
    Json(body): Json<ViewBody>,
) -> Result<Json<ViewBody>, AppError> {
    let view = state
        .store
        .dispatch_with(ZcvAction::SetView(body.view), |s| s.current_view)
        .await?;
    Ok(Json(ViewBody { view }))
}

/// GET /api/v1/dashboard
pub async fn handle_dashboard(State(state): State<AppState>) -> Json<Dashboard> {
    Json(state.store.read(build_dashboard).await)
}
