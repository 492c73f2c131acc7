use {
    crate::{
        full_path,
        AccessLevel,
        RequestId,
        Routable,
        RouteProperties,
    },
    serde::{
        Deserialize,
        Serialize,
    },
    strum::AsRefStr,
    utoipa::{
        IntoParams,
        ToResponse,
        ToSchema,
    },
};

#[derive(Serialize, Deserialize, ToSchema, ToResponse, Clone, PartialEq, Debug)]
pub struct TrustedTime {
    #[schema(example = "beedbeed-58cc-4372-a567-0e02b2c3d479", value_type = String)]
    pub request_id: RequestId,
    /// The same value is returned for every call with this request id.
    #[schema(example = "2024-07-09 15:37:13.879908993 +0000 UTC")]
    pub timestamp:  String,
}

#[derive(Serialize, Deserialize, IntoParams, Clone, Debug)]
pub struct RequestIdPathParam {
    #[param(example = "beedbeed-58cc-4372-a567-0e02b2c3d479", value_type = String)]
    pub request_id: RequestId,
}

#[derive(AsRefStr, Clone)]
#[strum(prefix = "/")]
pub enum Route {
    #[strum(serialize = ":request_id")]
    PostTrustedTime,
}

impl Routable for Route {
    fn properties(&self) -> RouteProperties {
        let full_path = full_path(&crate::Route::Time, self);
        match self {
            Route::PostTrustedTime => RouteProperties {
                access_level: AccessLevel::Public,
                method: http::Method::POST,
                full_path,
            },
        }
    }
}
