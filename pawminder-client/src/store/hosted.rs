/// HTTP store backed by the server's `/rest/v1` surface
///
/// Every request carries the public key in the `apikey` header. Listings
/// ask the server for the display order (`created_at.desc` for pets,
/// `due_date.asc` for reminders) and keep the order they get back.
///
/// When an owner is configured, new pets are stamped with it and both
/// listings are restricted to it: reminders are kept only when their pet is
/// one of the owner's pets.

use super::{Store, StoreError, StoreResult};
use crate::config::ClientConfig;
use async_trait::async_trait;
use pawminder_shared::auth::middleware::API_KEY_HEADER;
use pawminder_shared::models::{
    account::Account,
    pet::{CreatePet, Pet},
    reminder::{CreateReminder, Reminder, SetCompletion},
};
use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::collections::HashSet;
use std::time::Duration;
use uuid::Uuid;

/// Error body the server returns for failed requests
#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

#[derive(Debug, Serialize)]
struct Credentials<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Debug, Deserialize)]
struct TokenBody {
    token: String,
}

/// Store talking to a PawMinder server
#[derive(Debug, Clone)]
pub struct HostedStore {
    client: reqwest::Client,
    base_url: String,
    public_key: String,
    owner: Option<Uuid>,
}

impl HostedStore {
    pub fn new(config: &ClientConfig) -> StoreResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| StoreError::Transport(format!("Failed to create client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.url.trim_end_matches('/').to_string(),
            public_key: config.public_key.clone(),
            owner: config.user_id,
        })
    }

    /// Creates an account; returns it without the password hash
    pub async fn register(&self, email: &str, password: &str) -> StoreResult<Account> {
        let response = self
            .client
            .post(self.url("/auth/register"))
            .json(&Credentials { email, password })
            .send()
            .await
            .map_err(transport)?;

        decode(check(response).await?).await
    }

    /// Exchanges credentials for a bearer token
    pub async fn login(&self, email: &str, password: &str) -> StoreResult<String> {
        let response = self
            .client
            .post(self.url("/auth/login"))
            .json(&Credentials { email, password })
            .send()
            .await
            .map_err(transport)?;

        let body: TokenBody = decode(check(response).await?).await?;
        Ok(body.token)
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn rest(&self, method: Method, path: &str) -> RequestBuilder {
        self.client
            .request(method, self.url(&format!("/rest/v1{}", path)))
            .header(API_KEY_HEADER, &self.public_key)
    }

    /// Sends a row-level request, mapping 404 to [`StoreError::NotFound`]
    async fn send_for(
        &self,
        request: RequestBuilder,
        kind: &'static str,
        id: Uuid,
    ) -> StoreResult<Response> {
        let response = request.send().await.map_err(transport)?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(StoreError::NotFound { kind, id });
        }

        check(response).await
    }
}

fn transport(e: reqwest::Error) -> StoreError {
    StoreError::Transport(e.to_string())
}

/// Passes successful responses through and turns the rest into errors
async fn check(response: Response) -> StoreResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let text = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorBody>(&text)
        .map(|body| body.message)
        .unwrap_or_else(|_| {
            if text.is_empty() {
                status.canonical_reason().unwrap_or("Unknown error").to_string()
            } else {
                text
            }
        });

    tracing::debug!(status = status.as_u16(), %message, "Request rejected");

    if status == StatusCode::UNPROCESSABLE_ENTITY || status == StatusCode::BAD_REQUEST {
        return Err(StoreError::Rejected(message));
    }

    Err(StoreError::Status {
        status: status.as_u16(),
        message,
    })
}

async fn decode<T: DeserializeOwned>(response: Response) -> StoreResult<T> {
    response
        .json()
        .await
        .map_err(|e| StoreError::Decode(e.to_string()))
}

#[async_trait]
impl Store for HostedStore {
    async fn list_pets(&self) -> StoreResult<Vec<Pet>> {
        let mut request = self
            .rest(Method::GET, "/pets")
            .query(&[("order", "created_at.desc")]);

        if let Some(owner) = self.owner {
            request = request.query(&[("user_id", owner.to_string())]);
        }

        let response = check(request.send().await.map_err(transport)?).await?;
        decode(response).await
    }

    async fn create_pet(&self, mut data: CreatePet) -> StoreResult<Pet> {
        if data.user_id.is_none() {
            data.user_id = self.owner;
        }

        let response = self
            .rest(Method::POST, "/pets")
            .json(&data)
            .send()
            .await
            .map_err(transport)?;

        decode(check(response).await?).await
    }

    async fn delete_pet(&self, id: Uuid) -> StoreResult<()> {
        let request = self.rest(Method::DELETE, &format!("/pets/{}", id));
        self.send_for(request, "Pet", id).await?;
        Ok(())
    }

    async fn list_reminders(&self) -> StoreResult<Vec<Reminder>> {
        let response = self
            .rest(Method::GET, "/reminders")
            .query(&[("order", "due_date.asc")])
            .send()
            .await
            .map_err(transport)?;

        let reminders: Vec<Reminder> = decode(check(response).await?).await?;
        if self.owner.is_none() {
            return Ok(reminders);
        }

        let owned: HashSet<Uuid> = self.list_pets().await?.into_iter().map(|pet| pet.id).collect();
        Ok(reminders
            .into_iter()
            .filter(|reminder| owned.contains(&reminder.pet_id))
            .collect())
    }

    async fn create_reminder(&self, data: CreateReminder) -> StoreResult<Reminder> {
        let response = self
            .rest(Method::POST, "/reminders")
            .json(&data.normalized())
            .send()
            .await
            .map_err(transport)?;

        decode(check(response).await?).await
    }

    async fn set_completion(&self, id: Uuid, update: SetCompletion) -> StoreResult<Reminder> {
        let request = self
            .rest(Method::PATCH, &format!("/reminders/{}", id))
            .json(&update);

        let response = self.send_for(request, "Reminder", id).await?;
        decode(response).await
    }

    async fn delete_reminder(&self, id: Uuid) -> StoreResult<()> {
        let request = self.rest(Method::DELETE, &format!("/reminders/{}", id));
        self.send_for(request, "Reminder", id).await?;
        Ok(())
    }
}
