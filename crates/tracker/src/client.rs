use api_types::{
    Amount, ErrorResponse,
    auth::{Credentials, LoginResponse},
    budget::{BudgetResponse, BudgetUpdate},
    expense::{Expense, ExpenseId, ExpenseNew},
};
use reqwest::{Method, RequestBuilder, Response, Url};

use crate::error::ClientError;

/// HTTP client for the expense API.
///
/// Cheap to clone; every [`crate::Job`] carries its own copy.
#[derive(Debug, Clone)]
pub struct Client {
    base_url: Url,
    http: reqwest::Client,
}

impl Client {
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        // `Url::join` replaces the last segment unless the base ends with '/'.
        let normalized = if base_url.ends_with('/') {
            base_url.to_string()
        } else {
            format!("{base_url}/")
        };
        let base_url = Url::parse(&normalized)
            .map_err(|err| ClientError::InvalidUrl(format!("{base_url}: {err}")))?;
        Ok(Self {
            base_url,
            http: reqwest::Client::new(),
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub async fn login(&self, credentials: &Credentials) -> Result<String, ClientError> {
        let req = self.request(Method::POST, &["login"], None)?.json(credentials);
        let res = send(req).await?;
        let body = res.json::<LoginResponse>().await?;
        Ok(body.token)
    }

    pub async fn register(&self, credentials: &Credentials) -> Result<(), ClientError> {
        let req = self
            .request(Method::POST, &["register"], None)?
            .json(credentials);
        send(req).await?;
        Ok(())
    }

    /// Lists expenses; without a token the API answers with its public set.
    pub async fn expenses_list(&self, token: Option<&str>) -> Result<Vec<Expense>, ClientError> {
        let req = self.request(Method::GET, &["expenses"], token)?;
        let res = send(req).await?;
        Ok(res.json::<Vec<Expense>>().await?)
    }

    pub async fn expense_create(
        &self,
        token: &str,
        payload: &ExpenseNew,
    ) -> Result<Expense, ClientError> {
        let req = self
            .request(Method::POST, &["expenses"], Some(token))?
            .json(payload);
        let res = send(req).await?;
        Ok(res.json::<Expense>().await?)
    }

    pub async fn expense_update(
        &self,
        token: &str,
        id: &ExpenseId,
        payload: &ExpenseNew,
    ) -> Result<(), ClientError> {
        let req = self
            .request(Method::PUT, &["expenses", id.as_str()], Some(token))?
            .json(payload);
        send(req).await?;
        Ok(())
    }

    pub async fn expense_delete(&self, token: &str, id: &ExpenseId) -> Result<(), ClientError> {
        let req = self.request(Method::DELETE, &["expenses", id.as_str()], Some(token))?;
        send(req).await?;
        Ok(())
    }

    /// Reads the stored budget. A missing, null or unreadable value is zero.
    pub async fn budget_get(&self, token: &str) -> Result<Amount, ClientError> {
        let req = self.request(Method::GET, &["me", "budget"], Some(token))?;
        let res = send(req).await?;
        let bytes = res.bytes().await?;
        match serde_json::from_slice::<BudgetResponse>(&bytes) {
            Ok(body) => Ok(body.budget.unwrap_or(Amount::ZERO)),
            Err(err) => {
                tracing::warn!("unreadable budget body, using zero: {err}");
                Ok(Amount::ZERO)
            }
        }
    }

    pub async fn budget_set(&self, token: &str, value: Amount) -> Result<(), ClientError> {
        let req = self
            .request(Method::PUT, &["me", "budget"], Some(token))?
            .json(&BudgetUpdate { budget: value });
        send(req).await?;
        Ok(())
    }

    /// Deletes every expense of the account, keeping the account itself.
    pub async fn delete_all_expenses(&self, token: &str) -> Result<(), ClientError> {
        let req = self.request(Method::DELETE, &["me", "expenses"], Some(token))?;
        send(req).await?;
        Ok(())
    }

    pub async fn delete_account(&self, token: &str) -> Result<(), ClientError> {
        let req = self.request(Method::DELETE, &["me", "account"], Some(token))?;
        send(req).await?;
        Ok(())
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url, ClientError> {
        let mut url = self.base_url.clone();
        {
            let mut path = url
                .path_segments_mut()
                .map_err(|()| ClientError::InvalidUrl(self.base_url.to_string()))?;
            path.pop_if_empty();
            path.extend(segments);
        }
        Ok(url)
    }

    fn request(
        &self,
        method: Method,
        segments: &[&str],
        token: Option<&str>,
    ) -> Result<RequestBuilder, ClientError> {
        let mut req = self.http.request(method, self.endpoint(segments)?);
        if let Some(token) = token {
            req = req.bearer_auth(token);
        }
        Ok(req)
    }
}

async fn send(req: RequestBuilder) -> Result<Response, ClientError> {
    let res = req.send().await?;
    if res.status().is_success() {
        return Ok(res);
    }
    Err(error_from_response(res).await)
}

async fn error_from_response(res: Response) -> ClientError {
    let status = res.status();
    let body = res
        .json::<ErrorResponse>()
        .await
        .map(|err| err.error)
        .unwrap_or_else(|_| "unknown error".to_string());

    tracing::debug!(status = status.as_u16(), "api error: {body}");

    match status.as_u16() {
        401 => ClientError::Unauthorized,
        403 => ClientError::Forbidden,
        404 => ClientError::NotFound,
        409 => ClientError::Conflict(body),
        422 => ClientError::Validation(body),
        _ => ClientError::Server(body),
    }
}
