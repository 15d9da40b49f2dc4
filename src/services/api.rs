use crate::domain::models::{
    ApiOutcome, AuthenticatedDepartment, DateWindow, Department, RotaRecord,
};
use anyhow::Context;
use reqwest::blocking::{Client, Response};
use reqwest::header::ACCEPT;
use serde::Deserialize;

/// Status the landing page answers with when a token is about to expire but
/// is still accepted.
pub const TOKEN_NEAR_EXPIRY: u16 = 420;

/// Calls made against a department's Public API.
///
/// `Err` is reserved for transport failures; anything the server answered is
/// reported through [`ApiOutcome`].
pub trait RotaApi {
    fn base_url(&self, department: &Department) -> String {
        department.base_url(None)
    }

    fn check_token(&self, department: &Department, token: &str) -> anyhow::Result<ApiOutcome<()>>;

    fn login(&self, department: &Department) -> anyhow::Result<ApiOutcome<String>>;

    fn person_rota(
        &self,
        department: &AuthenticatedDepartment,
        window: &DateWindow,
    ) -> anyhow::Result<ApiOutcome<Vec<RotaRecord>>>;
}

#[derive(Debug, Deserialize)]
struct LoginBody {
    token: String,
}

#[derive(Debug, Deserialize)]
struct PersonRotaBody {
    person_rota: Vec<RotaRecord>,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    message: String,
}

pub struct HttpRotaApi {
    client: Client,
    host: Option<String>,
}

impl HttpRotaApi {
    pub fn new() -> anyhow::Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("rota-export/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client, host: None })
    }

    /// Addresses every department under `host` instead of its own
    /// `{shortname}.{system}.com` domain.
    pub fn with_base(host: impl Into<String>) -> anyhow::Result<Self> {
        Ok(Self {
            host: Some(host.into()),
            ..Self::new()?
        })
    }
}

fn rejection_message(resp: Response) -> String {
    let status = resp.status();
    resp.json::<ErrorBody>()
        .map(|b| b.error.message)
        .unwrap_or_else(|_| format!("HTTP {}", status))
}

impl RotaApi for HttpRotaApi {
    fn base_url(&self, department: &Department) -> String {
        department.base_url(self.host.as_deref())
    }

    fn check_token(&self, department: &Department, token: &str) -> anyhow::Result<ApiOutcome<()>> {
        let url = format!("{}{}/landing/", self.base_url(department), token);
        let status = self.client.get(url).send()?.status();
        if matches!(status.as_u16(), 200 | TOKEN_NEAR_EXPIRY) {
            Ok(ApiOutcome::Success(()))
        } else {
            Ok(ApiOutcome::AuthRequired)
        }
    }

    fn login(&self, department: &Department) -> anyhow::Result<ApiOutcome<String>> {
        let url = format!("{}login/", self.base_url(department));
        let resp = self
            .client
            .post(&url)
            .header(ACCEPT, "application/json")
            .form(&[
                ("username", department.auth.username.as_str()),
                ("password", department.auth.password.as_str()),
            ])
            .send()
            .with_context(|| format!("login request to {} failed", url))?;
        if !resp.status().is_success() {
            return Ok(ApiOutcome::Rejected(rejection_message(resp)));
        }
        let body: LoginBody = resp
            .json()
            .with_context(|| format!("unexpected login response from {}", url))?;
        Ok(ApiOutcome::Success(body.token))
    }

    fn person_rota(
        &self,
        department: &AuthenticatedDepartment,
        window: &DateWindow,
    ) -> anyhow::Result<ApiOutcome<Vec<RotaRecord>>> {
        let url = format!("{}/person_rota/", department.endpoint);
        let resp = self
            .client
            .get(&url)
            .query(&window.query())
            .header(ACCEPT, "application/json")
            .send()
            .with_context(|| format!("person rota request to {} failed", url))?;
        tracing::info!("Getting data from {}", resp.url());
        if !resp.status().is_success() {
            return Ok(ApiOutcome::Rejected(rejection_message(resp)));
        }
        let body: PersonRotaBody = resp
            .json()
            .with_context(|| format!("unexpected person rota response from {}", url))?;
        Ok(ApiOutcome::Success(body.person_rota))
    }
}
