use {
    crate::{
        auction,
        config::RunOptions,
        kernel::{
            identity::ClientIdentity,
            in_memory_ledger::CommitError,
        },
        server::{
            EXIT_CHECK_INTERVAL,
            SHOULD_EXIT,
        },
        state::Store,
        time_oracle,
    },
    anyhow::Result,
    axum::{
        async_trait,
        extract::{
            self,
            FromRequestParts,
        },
        handler::Handler,
        http::{
            request::Parts,
            HeaderMap,
            Method,
            StatusCode,
        },
        middleware,
        response::{
            IntoResponse,
            Response,
        },
        routing::{
            get,
            post,
        },
        Json,
        Router,
    },
    clap::crate_version,
    outcry_api_types::{
        AccessLevel,
        ErrorBodyResponse,
        Routable,
        Route,
        CLIENT_ID_HEADER,
        CLIENT_ORG_HEADER,
    },
    std::{
        fmt,
        sync::{
            atomic::Ordering,
            Arc,
        },
    },
    tower_http::cors::CorsLayer,
    utoipa::OpenApi,
    utoipa_redoc::{
        Redoc,
        Servable,
    },
};

async fn root() -> String {
    format!("Open Outcry Auction Server API {}", crate_version!())
}

#[derive(Debug, Clone, PartialEq)]
pub enum RestError {
    /// A value in the request was malformed
    ValidationError(String),
    /// The record is missing or does not allow the requested transition
    StateError(String),
    /// The caller is not allowed to perform the operation
    AuthorizationError(String),
    /// The operation is not allowed at this point in time
    TimingError(String),
    /// No trusted time source could be reached
    OracleError(String),
    /// Another transaction changed the state this request read
    TransactionConflict,
    /// Internal error occurred during processing the request
    TemporarilyUnavailable,
}

impl RestError {
    pub fn to_status_and_message(&self) -> (StatusCode, String) {
        match self {
            RestError::ValidationError(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            RestError::StateError(msg) => (StatusCode::CONFLICT, msg.clone()),
            RestError::AuthorizationError(msg) => (StatusCode::FORBIDDEN, msg.clone()),
            RestError::TimingError(msg) => (StatusCode::CONFLICT, msg.clone()),
            RestError::OracleError(msg) => (StatusCode::SERVICE_UNAVAILABLE, msg.clone()),
            RestError::TransactionConflict => (
                StatusCode::CONFLICT,
                "The request conflicted with a concurrent update, please retry".to_string(),
            ),
            RestError::TemporarilyUnavailable => (
                StatusCode::SERVICE_UNAVAILABLE,
                "This service is temporarily unavailable".to_string(),
            ),
        }
    }
}

impl fmt::Display for RestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (status, msg) = self.to_status_and_message();
        write!(f, "{}: {}", status, msg)
    }
}

impl IntoResponse for RestError {
    fn into_response(self) -> Response {
        let (status, msg) = self.to_status_and_message();
        (status, Json(ErrorBodyResponse { error: msg })).into_response()
    }
}

impl From<CommitError> for RestError {
    fn from(error: CommitError) -> Self {
        match error {
            CommitError::MvccReadConflict { .. } => {
                tracing::info!(error = %error, "Transaction aborted");
                RestError::TransactionConflict
            }
        }
    }
}

pub async fn live() -> Response {
    (StatusCode::OK, "OK").into_response()
}

fn header_value<'a>(headers: &'a HeaderMap, name: &str) -> Result<Option<&'a str>, RestError> {
    headers
        .get(name)
        .map(|value| {
            value.to_str().map_err(|_| {
                RestError::AuthorizationError(format!("header {} is not valid ascii", name))
            })
        })
        .transpose()
}

#[async_trait]
impl<S> FromRequestParts<S> for ClientIdentity
where
    S: Send + Sync,
{
    type Rejection = RestError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let id = header_value(&parts.headers, CLIENT_ID_HEADER)?;
        let org = header_value(&parts.headers, CLIENT_ORG_HEADER)?;
        ClientIdentity::from_encoded(id, org)
            .map_err(|e| RestError::AuthorizationError(format!("invalid client identity: {}", e)))
    }
}

async fn require_member(
    identity: ClientIdentity,
    request: extract::Request,
    next: middleware::Next,
) -> Result<Response, RestError> {
    if identity.id.is_none() || identity.org.is_none() {
        return Err(RestError::AuthorizationError(format!(
            "headers {} and {} are required",
            CLIENT_ID_HEADER, CLIENT_ORG_HEADER
        )));
    }
    Ok(next.run(request).await)
}

/// Registers handlers at the path, method and access level their route declares.
pub struct WrappedRouter {
    pub router: Router<Arc<Store>>,
}

impl WrappedRouter {
    pub fn new() -> Self {
        Self {
            router: Router::new(),
        }
    }

    pub fn route<H, T>(mut self, route: impl Routable, handler: H) -> Self
    where
        H: Handler<T, Arc<Store>>,
        T: 'static,
    {
        let properties = route.properties();
        let method_router = if properties.method == Method::POST {
            post(handler)
        } else {
            get(handler)
        };
        let method_router = match properties.access_level {
            AccessLevel::Member => method_router.route_layer(middleware::from_fn(require_member)),
            AccessLevel::Public => method_router,
        };
        self.router = self.router.route(&properties.full_path, method_router);
        self
    }
}

pub async fn start_api(run_options: RunOptions, store: Arc<Store>) -> Result<()> {
    // Make sure functions included in the paths section have distinct names, otherwise some api generators will fail
    #[derive(OpenApi)]
    #[openapi(
        paths(
            auction::api::post_auction,
            auction::api::get_auction,
            auction::api::get_open_auctions,
            auction::api::get_auctions_by_seller,
            auction::api::post_close_auction,
            auction::api::post_end_auction,
            auction::api::get_highest_bid,
            auction::api::post_bid,
            auction::api::get_bid,
            auction::api::post_submit_bid,
            time_oracle::api::post_trusted_time,
        ),
        components(
            schemas(
                outcry_api_types::auction::Auction,
                outcry_api_types::auction::AuctionStatus,
                outcry_api_types::auction::Auctions,
                outcry_api_types::auction::CreateAuction,
                outcry_api_types::bid::BidDetails,
                outcry_api_types::bid::FullBid,
                outcry_api_types::bid::HighestBid,
                outcry_api_types::bid::PlaceBid,
                outcry_api_types::bid::PlaceBidResult,
                outcry_api_types::time_oracle::TrustedTime,
                ErrorBodyResponse,
            ),
            responses(
                ErrorBodyResponse,
                outcry_api_types::auction::Auction,
                outcry_api_types::bid::FullBid,
            ),
        ),
        tags(
            (name = "Open Outcry Auction Server", description = "Runs open outcry auctions on a shared ledger.\
            Revealed bids are stamped by a time oracle that reconciles several independent time sources.")
        )
    )]
    struct ApiDoc;

    let openapi = ApiDoc::openapi();
    let app: Router<()> = Router::new()
        .merge(Redoc::with_url(Route::Docs.as_ref(), openapi.clone()))
        .route(
            Route::OpenApi.as_ref(),
            get(|| async move { Json(openapi) }),
        )
        .merge(auction::api::get_routes())
        .merge(time_oracle::api::get_routes())
        .route(Route::Root.as_ref(), get(root))
        .route(Route::Liveness.as_ref(), get(live))
        .layer(CorsLayer::permissive())
        .with_state(store);

    let listener = tokio::net::TcpListener::bind(&run_options.server.listen_addr).await?;
    tracing::info!(address = %run_options.server.listen_addr, "Starting API server");
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            while !SHOULD_EXIT.load(Ordering::Acquire) {
                tokio::time::sleep(EXIT_CHECK_INTERVAL).await;
            }
            tracing::info!("Shutting down RPC server...");
        })
        .await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        axum::http::HeaderValue,
    };

    #[test]
    fn test_error_status_codes() {
        assert_eq!(
            RestError::ValidationError("bad".to_string())
                .to_status_and_message()
                .0,
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            RestError::AuthorizationError("no".to_string())
                .to_status_and_message()
                .0,
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            RestError::OracleError("down".to_string())
                .to_status_and_message(),
            (StatusCode::SERVICE_UNAVAILABLE, "down".to_string())
        );
        assert_eq!(
            RestError::from(CommitError::MvccReadConflict {
                key: "auction1".to_string(),
            }),
            RestError::TransactionConflict
        );
    }

    #[test]
    fn test_header_value() {
        let mut headers = HeaderMap::new();
        headers.insert(CLIENT_ORG_HEADER, HeaderValue::from_static("Org1MSP"));
        assert_eq!(
            header_value(&headers, CLIENT_ORG_HEADER).unwrap(),
            Some("Org1MSP")
        );
        assert_eq!(header_value(&headers, CLIENT_ID_HEADER).unwrap(), None);
    }
}
