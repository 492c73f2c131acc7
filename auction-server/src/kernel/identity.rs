use {
    super::entities::{
        OrgId,
        Principal,
    },
    anyhow::anyhow,
    base64::{
        engine::general_purpose::STANDARD,
        Engine as _,
    },
};

/// Resolves who is calling, for the duration of one call.
pub trait AuthorizationContext: Send + Sync {
    fn caller_identity(&self) -> anyhow::Result<Principal>;
    fn caller_organization(&self) -> anyhow::Result<OrgId>;
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ClientIdentity {
    pub id:  Option<Principal>,
    pub org: Option<OrgId>,
}

impl ClientIdentity {
    pub fn new(id: impl Into<Principal>, org: impl Into<OrgId>) -> Self {
        Self {
            id:  Some(id.into()),
            org: Some(org.into()),
        }
    }

    /// The platform presents identities base64 encoded.
    pub fn from_encoded(
        encoded_id: Option<&str>,
        org: Option<&str>,
    ) -> anyhow::Result<Self> {
        let id = match encoded_id {
            Some(encoded_id) => {
                let decoded = STANDARD
                    .decode(encoded_id)
                    .map_err(|e| anyhow!("failed to base64 decode client id: {}", e))?;
                Some(
                    String::from_utf8(decoded)
                        .map_err(|e| anyhow!("client id is not valid utf-8: {}", e))?,
                )
            }
            None => None,
        };
        Ok(Self {
            id,
            org: org.map(str::to_string),
        })
    }
}

impl AuthorizationContext for ClientIdentity {
    fn caller_identity(&self) -> anyhow::Result<Principal> {
        self.id
            .clone()
            .ok_or_else(|| anyhow!("client identity is not available"))
    }

    fn caller_organization(&self) -> anyhow::Result<OrgId> {
        self.org
            .clone()
            .ok_or_else(|| anyhow!("client organization is not available"))
    }
}

/// Extracts the common name of an X.509 principal such as
/// `x509::CN=user1,OU=client::CN=ca.org1.example.com`.
/// Other principals are returned unchanged.
pub fn common_name(id: &str) -> &str {
    if id.starts_with("x509::") {
        if let Some((_, subject)) = id.split_once("CN=") {
            let subject = subject.split(',').next().unwrap_or(subject);
            return subject.split("::").next().unwrap_or(subject);
        }
    }
    id
}
