//! REST implementation of [`RemoteStore`] using [`reqwest`].
//!
//! Speaks the json-server conventions: `GET /{collection}`,
//! `GET /{collection}/{id}`, `POST /{collection}` and
//! `PATCH /{collection}/{id}` with JSON bodies.

use std::time::Duration;

use async_trait::async_trait;
use helpdesk_core::customer::{Customer, CustomerPatch};
use helpdesk_core::ticket::{NewTicket, Ticket, TicketPatch};
use helpdesk_core::types::EntityId;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::{Collection, RemoteStore, StoreError};

/// HTTP client for a single store instance.
#[derive(Debug, Clone)]
pub struct HttpStore {
    client: reqwest::Client,
    base_url: String,
}

impl HttpStore {
    /// Create a client for the store at `base_url`, e.g. `http://localhost:3001`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    /// Create a client reusing an existing [`reqwest::Client`].
    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    /// Create a client whose requests give up after `timeout`.
    pub fn with_timeout(
        base_url: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, StoreError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self::with_client(client, base_url))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch every record of a collection in store order.
    pub async fn list<T: DeserializeOwned>(
        &self,
        collection: Collection,
    ) -> Result<Vec<T>, StoreError> {
        let response = self
            .client
            .get(self.collection_url(collection))
            .send()
            .await?;

        Self::parse_response(response, collection, None).await
    }

    /// Fetch a single record by id.
    pub async fn get<T: DeserializeOwned>(
        &self,
        collection: Collection,
        id: EntityId,
    ) -> Result<T, StoreError> {
        let response = self
            .client
            .get(self.entity_url(collection, id))
            .send()
            .await?;

        Self::parse_response(response, collection, Some(id)).await
    }

    /// Create a record. The store assigns the id and returns the stored entity.
    pub async fn create<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        collection: Collection,
        body: &B,
    ) -> Result<T, StoreError> {
        let response = self
            .client
            .post(self.collection_url(collection))
            .json(body)
            .send()
            .await?;

        Self::parse_response(response, collection, None).await
    }

    /// Merge `partial` into an existing record and return the result.
    pub async fn patch<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        collection: Collection,
        id: EntityId,
        partial: &B,
    ) -> Result<T, StoreError> {
        let response = self
            .client
            .patch(self.entity_url(collection, id))
            .json(partial)
            .send()
            .await?;

        Self::parse_response(response, collection, Some(id)).await
    }

    // ---- private helpers ----

    fn collection_url(&self, collection: Collection) -> String {
        format!("{}/{}", self.base_url, collection.path())
    }

    fn entity_url(&self, collection: Collection, id: EntityId) -> String {
        format!("{}/{}/{}", self.base_url, collection.path(), id)
    }

    /// Ensure the response has a success status code.
    ///
    /// A 404 on an entity URL becomes [`StoreError::NotFound`]; every other
    /// failure keeps its status and body in [`StoreError::Api`].
    async fn ensure_success(
        response: reqwest::Response,
        collection: Collection,
        id: Option<EntityId>,
    ) -> Result<reqwest::Response, StoreError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        if status == reqwest::StatusCode::NOT_FOUND {
            if let Some(id) = id {
                return Err(StoreError::NotFound { collection, id });
            }
        }
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "<unreadable body>".to_string());
        Err(StoreError::Api {
            status: status.as_u16(),
            body,
        })
    }

    /// Parse a successful JSON response body into the expected type.
    async fn parse_response<T: DeserializeOwned>(
        response: reqwest::Response,
        collection: Collection,
        id: Option<EntityId>,
    ) -> Result<T, StoreError> {
        let response = Self::ensure_success(response, collection, id).await?;
        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

/// Decode raw ticket records, dropping any that do not fit the model
/// (for example a status outside the enum).
fn decode_tickets(raw: Vec<serde_json::Value>) -> Vec<Ticket> {
    raw.into_iter()
        .filter_map(|value| match serde_json::from_value::<Ticket>(value.clone()) {
            Ok(ticket) => Some(ticket),
            Err(e) => {
                tracing::warn!(error = %e, record = %value, "Skipping malformed ticket record");
                None
            }
        })
        .collect()
}

#[async_trait]
impl RemoteStore for HttpStore {
    async fn list_customers(&self) -> Result<Vec<Customer>, StoreError> {
        self.list(Collection::Customers).await
    }

    async fn get_customer(&self, id: EntityId) -> Result<Customer, StoreError> {
        self.get(Collection::Customers, id).await
    }

    async fn patch_customer(
        &self,
        id: EntityId,
        patch: &CustomerPatch,
    ) -> Result<Customer, StoreError> {
        self.patch(Collection::Customers, id, patch).await
    }

    async fn list_tickets(&self) -> Result<Vec<Ticket>, StoreError> {
        let raw: Vec<serde_json::Value> = self.list(Collection::Tickets).await?;
        Ok(decode_tickets(raw))
    }

    async fn get_ticket(&self, id: EntityId) -> Result<Ticket, StoreError> {
        self.get(Collection::Tickets, id).await
    }

    async fn create_ticket(&self, ticket: &NewTicket) -> Result<Ticket, StoreError> {
        self.create(Collection::Tickets, ticket).await
    }

    async fn patch_ticket(&self, id: EntityId, patch: &TicketPatch) -> Result<Ticket, StoreError> {
        self.patch(Collection::Tickets, id, patch).await
    }
}
