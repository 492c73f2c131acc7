use {
    super::service::get_trusted_time::GetTrustedTimeInput,
    crate::{
        api::{
            RestError,
            WrappedRouter,
        },
        state::Store,
    },
    axum::{
        extract::{
            Path,
            State,
        },
        Json,
        Router,
    },
    outcry_api_types::{
        time_oracle::{
            RequestIdPathParam,
            Route,
            TrustedTime,
        },
        ErrorBodyResponse,
    },
    std::sync::Arc,
};

/// Resolve the trusted time of a request.
///
/// The first call for a request id asks every configured time source and records one of the
/// answers. Later calls return the recorded timestamp.
#[utoipa::path(post, path = "/v1/time/{request_id}", params(RequestIdPathParam), responses(
    (status = 200, body = TrustedTime),
    (status = 409, description = "A concurrent call resolved the same request id, retry to read it", body = ErrorBodyResponse),
    (status = 503, description = "No trusted time source was reachable", body = ErrorBodyResponse),
),)]
pub async fn post_trusted_time(
    State(store): State<Arc<Store>>,
    Path(params): Path<RequestIdPathParam>,
) -> Result<Json<TrustedTime>, RestError> {
    let tx = store.begin_transaction();
    let timestamp = store
        .time_oracle_service
        .get_trusted_time(
            &tx,
            GetTrustedTimeInput {
                request_id: params.request_id.clone(),
            },
        )
        .await?;
    tx.commit().await?;
    Ok(Json(TrustedTime {
        request_id: params.request_id,
        timestamp,
    }))
}

pub fn get_routes() -> Router<Arc<Store>> {
    WrappedRouter::new()
        .route(Route::PostTrustedTime, post_trusted_time)
        .router
}
