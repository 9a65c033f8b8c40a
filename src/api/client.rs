//! Remote collection client.
//!
//! One attempt per call: no retries, no backoff. Every request carries the
//! session's bearer token when one is set.

use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, Response, Url};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::api::errors::{ApiError, ApiResult};
use crate::domain::resource::Resource;
use crate::listing::controller::PageSource;
use crate::listing::query::{PageEnvelope, PageQuery};

/// Path suffix of the filtered collection endpoint.
const FILTER_SEGMENT: &str = "filtrar";

#[derive(Clone, Debug)]
pub struct CollectionClient {
    http: Client,
    base_url: Url,
    token: Option<String>,
}

#[derive(Serialize)]
struct Credentials<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Deserialize)]
struct TokenResponse {
    token: String,
}

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(alias = "error", alias = "mensaje")]
    message: String,
}

impl CollectionClient {
    pub fn new(base_url: &str) -> ApiResult<Self> {
        let base_url =
            Url::parse(base_url).map_err(|e| ApiError::InvalidUrl(format!("{base_url}: {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(ApiError::InvalidUrl(base_url.to_string()));
        }

        Ok(Self {
            http: Client::new(),
            base_url,
            token: None,
        })
    }

    /// Copy of this client that authenticates as the given session token.
    pub fn with_token(&self, token: impl Into<String>) -> Self {
        Self {
            token: Some(token.into()),
            ..self.clone()
        }
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Client scoped to one resource, usable as a [`PageSource`].
    pub fn resource(&self, resource: Resource) -> ResourceClient<'_> {
        ResourceClient {
            client: self,
            resource,
        }
    }

    fn endpoint(&self, segments: &[&str]) -> ApiResult<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ApiError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        let builder = self.http.request(method, url);
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// Builds, without sending, the GET for one page of `resource`.
    pub fn page_request(&self, resource: Resource, query: &PageQuery) -> ApiResult<reqwest::Request> {
        let url = self.endpoint(&[resource.path(), FILTER_SEGMENT])?;
        Ok(self
            .request(Method::GET, url)
            .query(&query.to_pairs())
            .build()?)
    }

    pub async fn fetch_page<T: DeserializeOwned>(
        &self,
        resource: Resource,
        query: &PageQuery,
    ) -> ApiResult<PageEnvelope<T>> {
        let request = self.page_request(resource, query)?;
        log::debug!("GET {}", request.url());
        let response = self.http.execute(request).await?;
        handle_response(response).await
    }

    pub async fn get<T: DeserializeOwned>(&self, resource: Resource, id: i32) -> ApiResult<T> {
        let url = self.endpoint(&[resource.path(), &id.to_string()])?;
        let response = self.request(Method::GET, url).send().await?;
        handle_response(response).await
    }

    pub async fn create<B, T>(&self, resource: Resource, body: &B) -> ApiResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.endpoint(&[resource.path()])?;
        let response = self.request(Method::POST, url).json(body).send().await?;
        handle_response(response).await
    }

    pub async fn update<B, T>(&self, resource: Resource, id: i32, body: &B) -> ApiResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.endpoint(&[resource.path(), &id.to_string()])?;
        let response = self.request(Method::PUT, url).json(body).send().await?;
        handle_response(response).await
    }

    pub async fn delete(&self, resource: Resource, id: i32) -> ApiResult<()> {
        let url = self.endpoint(&[resource.path(), &id.to_string()])?;
        let response = self.request(Method::DELETE, url).send().await?;
        ensure_success(response).await.map(|_| ())
    }

    /// Exchanges credentials for a bearer token.
    pub async fn sign_in(&self, email: &str, password: &str) -> ApiResult<String> {
        let url = self.endpoint(&["auth", "login"])?;
        let response = self
            .http
            .post(url)
            .json(&Credentials { email, password })
            .send()
            .await?;
        let body: TokenResponse = handle_response(response).await?;
        Ok(body.token)
    }
}

async fn ensure_success(response: Response) -> ApiResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    Err(ApiError::Status {
        status,
        message: error_message(&body, status.canonical_reason().unwrap_or("Unknown error")),
    })
}

async fn handle_response<T: DeserializeOwned>(response: Response) -> ApiResult<T> {
    let response = ensure_success(response).await?;
    response
        .json::<T>()
        .await
        .map_err(|e| ApiError::Decode(e.to_string()))
}

/// Prefers the `message`/`error`/`mensaje` field of a JSON error body, then
/// the raw text, then the fallback.
fn error_message(body: &str, fallback: &str) -> String {
    if let Ok(parsed) = serde_json::from_str::<ErrorBody>(body) {
        return parsed.message;
    }
    let trimmed = body.trim();
    if trimmed.is_empty() {
        fallback.to_string()
    } else {
        trimmed.to_string()
    }
}

/// [`CollectionClient`] bound to a single resource.
#[derive(Clone, Copy, Debug)]
pub struct ResourceClient<'a> {
    client: &'a CollectionClient,
    resource: Resource,
}

#[async_trait(?Send)]
impl<T: DeserializeOwned + 'static> PageSource<T> for ResourceClient<'_> {
    type Error = ApiError;

    async fn fetch_page(&self, query: &PageQuery) -> ApiResult<PageEnvelope<T>> {
        self.client.fetch_page(self.resource, query).await
    }
}

#[cfg(test)]
mod tests {
    use reqwest::header::AUTHORIZATION;

    use super::*;
    use crate::listing::filters::{FilterMap, FilterValue};
    use crate::listing::query::SortSpec;

    fn query_pairs(request: &reqwest::Request) -> Vec<(String, String)> {
        request
            .url()
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect()
    }

    #[test]
    fn page_request_targets_filter_endpoint() {
        let client = CollectionClient::new("http://localhost:8080/api").unwrap();
        let request = client
            .page_request(Resource::Vehiculos, &PageQuery::new(2, 10))
            .unwrap();

        assert_eq!(request.method(), Method::GET);
        assert_eq!(request.url().path(), "/api/vehiculos/filtrar");
        assert_eq!(
            query_pairs(&request),
            vec![
                ("page".to_string(), "2".to_string()),
                ("size".to_string(), "10".to_string()),
            ]
        );
    }

    #[test]
    fn trailing_slash_in_base_url_is_ignored() {
        let client = CollectionClient::new("http://localhost:8080/api/").unwrap();
        let request = client
            .page_request(Resource::Facturas, &PageQuery::new(0, 5))
            .unwrap();
        assert_eq!(request.url().path(), "/api/facturas/filtrar");
    }

    #[test]
    fn filters_and_sort_are_encoded() {
        let client = CollectionClient::new("http://localhost:8080/api").unwrap();
        let query = PageQuery::new(0, 25)
            .sort(SortSpec::desc("fechaCreacion"))
            .filters(FilterMap::apply([
                ("estado", FilterValue::text("EN_PROCESO")),
                ("descripcion", FilterValue::text("")),
            ]));

        let request = client.page_request(Resource::Mantenimientos, &query).unwrap();

        assert_eq!(
            query_pairs(&request),
            vec![
                ("page".to_string(), "0".to_string()),
                ("size".to_string(), "25".to_string()),
                ("sort".to_string(), "fechaCreacion,desc".to_string()),
                ("estado".to_string(), "EN_PROCESO".to_string()),
            ]
        );
    }

    #[test]
    fn bearer_token_is_attached() {
        let client = CollectionClient::new("http://localhost:8080/api")
            .unwrap()
            .with_token("abc.def.ghi");
        let request = client
            .page_request(Resource::Alertas, &PageQuery::default())
            .unwrap();

        assert_eq!(
            request.headers().get(AUTHORIZATION).unwrap(),
            "Bearer abc.def.ghi"
        );
    }

    #[test]
    fn anonymous_client_sends_no_authorization() {
        let client = CollectionClient::new("http://localhost:8080/api").unwrap();
        let request = client
            .page_request(Resource::Alertas, &PageQuery::default())
            .unwrap();
        assert!(request.headers().get(AUTHORIZATION).is_none());
    }

    #[test]
    fn invalid_base_urls_are_rejected() {
        assert!(matches!(
            CollectionClient::new("not a url"),
            Err(ApiError::InvalidUrl(_))
        ));
        assert!(matches!(
            CollectionClient::new("mailto:taller@example.com"),
            Err(ApiError::InvalidUrl(_))
        ));
    }

    #[test]
    fn error_message_prefers_json_field() {
        assert_eq!(
            error_message(r#"{"message": "Placa duplicada"}"#, "Bad Request"),
            "Placa duplicada"
        );
        assert_eq!(
            error_message(r#"{"mensaje": "No encontrado"}"#, "Not Found"),
            "No encontrado"
        );
        assert_eq!(error_message("  boom ", "Internal"), "boom");
        assert_eq!(error_message("", "Internal"), "Internal");
    }
}
