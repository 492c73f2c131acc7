use {
    ::serde::{
        Deserialize,
        Serialize,
    },
    strum::AsRefStr,
    utoipa::{
        ToResponse,
        ToSchema,
    },
};

pub mod auction;
pub mod bid;
pub mod serde;
pub mod time_oracle;

pub type AuctionId = String;
pub type RequestId = String;
pub type OrgId = String;
pub type Principal = String;
pub type Price = i64;

/// Header carrying the base64 encoded identity of the calling principal.
pub const CLIENT_ID_HEADER: &str = "x-client-id";
/// Header carrying the organization of the calling principal.
pub const CLIENT_ORG_HEADER: &str = "x-client-org";

#[derive(ToResponse, ToSchema, Serialize, Deserialize)]
#[response(description = "An error occurred processing the request")]
pub struct ErrorBodyResponse {
    pub error: String,
}

#[derive(AsRefStr)]
#[strum(prefix = "/")]
pub enum Route {
    #[strum(serialize = "v1")]
    V1,
    #[strum(serialize = "auctions")]
    Auction,
    #[strum(serialize = "sellers")]
    Seller,
    #[strum(serialize = "time")]
    Time,
    #[strum(serialize = "")]
    Root,
    #[strum(serialize = "live")]
    Liveness,
    #[strum(serialize = "docs")]
    Docs,
    #[strum(serialize = "docs/openapi.json")]
    OpenApi,
}

#[derive(PartialEq, Debug)]
pub enum AccessLevel {
    /// The caller must present an identity and an organization.
    Member,
    Public,
}

pub struct RouteProperties {
    pub access_level: AccessLevel,
    pub method:       http::Method,
    pub full_path:    String,
}

pub trait Routable: AsRef<str> + Clone {
    fn properties(&self) -> RouteProperties;
}

pub(crate) fn full_path(prefix: &Route, route: &impl AsRef<str>) -> String {
    format!("{}{}{}", Route::V1.as_ref(), prefix.as_ref(), route.as_ref())
        .trim_end_matches('/')
        .to_string()
}
