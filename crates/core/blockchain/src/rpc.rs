use url::Url;

/// Handle to the root chain JSON-RPC endpoint
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RpcClient {
    url: Url,
}

impl RpcClient {
    pub fn new(url: &str) -> Result<Self, url::ParseError> {
        Ok(Self { url: Url::parse(url)? })
    }

    pub fn url(&self) -> &Url {
        &self.url
    }
}
