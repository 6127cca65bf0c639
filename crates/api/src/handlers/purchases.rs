//! Purchase ledger handlers.
//!
//! Customers start purchases; status moves only through the admin endpoint
//! and only along the allowed transitions.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use glaze_core::error::CoreError;
use glaze_core::purchase::{validate_transition, PurchaseStatus};
use glaze_core::types::DbId;
use glaze_db::models::purchase::{CreatePurchase, PurchaseRequest, UpdatePurchaseStatus};
use glaze_db::repositories::{OverlaySetRepo, PurchaseRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::{RequireAdmin, RequireAuth};
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/purchases
///
/// The caller's own purchases, newest first.
pub async fn list_mine(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let account = user.upsert_account(&state.pool).await?;
    let purchases = PurchaseRepo::list_for_user(&state.pool, account.id).await?;
    Ok(Json(DataResponse { data: purchases }))
}

/// POST /api/purchases
///
/// Start a pending purchase of an active paid set at its current price.
///
/// 409 when the caller already owns the set or has a pending purchase of
/// it. A failed or refunded purchase does not block a new one.
pub async fn create(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    Json(input): Json<PurchaseRequest>,
) -> AppResult<impl IntoResponse> {
    let set = OverlaySetRepo::find_by_id(&state.pool, input.set_id)
        .await?
        .filter(|s| s.is_active)
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "OverlaySet",
            id: input.set_id,
        }))?;

    let amount_cents = match (set.is_paid, set.price_cents) {
        (true, Some(cents)) => cents,
        _ => {
            return Err(AppError::BadRequest(format!(
                "Overlay set {} is free and cannot be purchased",
                set.id
            )))
        }
    };

    let account = user.upsert_account(&state.pool).await?;
    if let Some(open) = PurchaseRepo::find_open(&state.pool, account.id, set.id).await? {
        let reason = if open.status == PurchaseStatus::Succeeded.as_str() {
            "is already owned"
        } else {
            "already has a pending purchase"
        };
        return Err(AppError::Core(CoreError::Conflict(format!(
            "Overlay set {} {reason}",
            set.id
        ))));
    }

    let purchase = PurchaseRepo::create(
        &state.pool,
        &CreatePurchase {
            user_id: account.id,
            set_id: set.id,
            amount_cents,
        },
    )
    .await?;
    tracing::info!(
        purchase_id = purchase.id,
        user_id = account.id,
        set_id = set.id,
        amount_cents,
        "Purchase started"
    );
    Ok((StatusCode::CREATED, Json(DataResponse { data: purchase })))
}

/// PUT /api/admin/purchases/{id}/status
///
/// 409 when the transition is not allowed from the current status, or when
/// the status changed between the read and the write.
pub async fn update_status(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdatePurchaseStatus>,
) -> AppResult<impl IntoResponse> {
    let existing = PurchaseRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Purchase",
            id,
        }))?;

    let current = PurchaseStatus::from_name(&existing.status)
        .map_err(|e| AppError::InternalError(format!("Stored purchase status: {e}")))?;
    validate_transition(current, input.status)?;

    let purchase = PurchaseRepo::transition_status(&state.pool, id, current, input.status)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Conflict(format!(
                "Purchase {id} changed status concurrently"
            )))
        })?;
    tracing::info!(
        purchase_id = id,
        from = current.as_str(),
        to = input.status.as_str(),
        admin = %admin.external_id,
        "Purchase status updated"
    );
    Ok(Json(DataResponse { data: purchase }))
}
