use {
  crate::{Config, Error, Indexer, SearchQuery, TransactionPage},
  async_trait::async_trait,
  impact_primitives::{Asset, AssetId, AssetParams, Block, Transaction},
  reqwest::{
    header::{HeaderMap, HeaderValue},
    Client,
    StatusCode,
  },
  serde::{de::DeserializeOwned, Deserialize},
  tracing::debug,
};

const API_TOKEN_HEADER: &str = "X-Indexer-API-Token";

/// Indexer client speaking the v2 REST API over HTTP.
#[derive(Debug, Clone)]
pub struct HttpIndexer {
  client: Client,
  config: Config,
}

#[derive(Deserialize)]
struct TransactionResponse {
  transaction: Transaction,
}

#[derive(Deserialize)]
struct AssetResponse {
  asset: Asset,
}

impl HttpIndexer {
  pub fn new(config: Config) -> Result<Self, Error> {
    let mut headers = HeaderMap::new();
    if let Some(token) = &config.api_token {
      headers.insert(
        API_TOKEN_HEADER,
        HeaderValue::from_str(token).map_err(|_| Error::InvalidApiToken)?,
      );
    }

    let client = Client::builder()
      .timeout(config.timeout)
      .default_headers(headers)
      .build()?;

    Ok(Self { client, config })
  }

  pub fn config(&self) -> &Config {
    &self.config
  }

  /// Issues a GET request and decodes the JSON body.
  ///
  /// A 404 response means the requested entity does not exist
  /// and is reported as `None`.
  async fn get<T: DeserializeOwned>(
    &self,
    path: &str,
    params: &[(&str, String)],
  ) -> Result<Option<T>, Error> {
    let url = self.config.url(path);
    debug!("GET {url} {params:?}");

    let response = self.client.get(&url).query(params).send().await?;
    match response.status() {
      StatusCode::NOT_FOUND => Ok(None),
      status if status.is_success() => {
        let body = response.bytes().await?;
        Ok(Some(serde_json::from_slice(&body)?))
      }
      status => Err(Error::Status {
        status: status.as_u16(),
        url,
      }),
    }
  }
}

#[async_trait]
impl Indexer for HttpIndexer {
  async fn lookup_transaction(
    &self,
    id: &str,
  ) -> Result<Option<Transaction>, Error> {
    let response: Option<TransactionResponse> =
      self.get(&format!("/v2/transactions/{id}"), &[]).await?;
    Ok(response.map(|r| r.transaction))
  }

  async fn lookup_block(&self, round: u64) -> Result<Option<Block>, Error> {
    self.get(&format!("/v2/blocks/{round}"), &[]).await
  }

  async fn lookup_asset(
    &self,
    id: AssetId,
  ) -> Result<Option<AssetParams>, Error> {
    // destroyed assets are only served with include-all
    let response: Option<AssetResponse> = self
      .get(&format!("/v2/assets/{id}"), &[(
        "include-all",
        "true".to_owned(),
      )])
      .await?;
    Ok(response.map(|r| r.asset.params))
  }

  async fn search_transactions(
    &self,
    query: &SearchQuery,
  ) -> Result<TransactionPage, Error> {
    Ok(
      self
        .get("/v2/transactions", &query.params())
        .await?
        .unwrap_or_default(),
    )
  }
}
