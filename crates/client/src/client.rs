//! Seating API HTTP client

use std::sync::RwLock;

use async_trait::async_trait;
use gala_core::api::{
    BookingRequest, BookingUpdate, CreatedTable, Credentials, LoginResponse, MailMessage,
    NewTable, SeatingApi,
};
use gala_core::model::{Booking, Table};
use gala_core::{Error, Result};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, Method, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use crate::config::ClientConfig;
use crate::wire::decode_body;

/// Client for the external seating API
pub struct ApiClient {
    client: Client,
    base_url: String,
    token: RwLock<Option<String>>,
}

impl ApiClient {
    pub fn new(config: ClientConfig) -> Result<Self> {
        let mut builder = Client::builder();
        if config.no_proxy {
            builder = builder.no_proxy();
        }
        let client = builder
            .build()
            .map_err(|e| Error::Transport(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            token: RwLock::new(None),
        })
    }

    /// Set the bearer token
    pub fn with_token(self, token: Option<String>) -> Self {
        self.set_token(token);
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn headers(&self) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let token = self
            .token
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone();
        if let Some(token) = token {
            let value = HeaderValue::from_str(&format!("Bearer {}", token))
                .map_err(|_| Error::InvalidInput("token is not a valid header value".into()))?;
            headers.insert(AUTHORIZATION, value);
        }
        Ok(headers)
    }

    fn request(&self, method: Method, path: &str) -> Result<RequestBuilder> {
        debug!("{} {}", method, path);
        Ok(self
            .client
            .request(method, self.url(path))
            .headers(self.headers()?))
    }

    /// Send a request and return the body of a successful response
    async fn send(&self, request: RequestBuilder, path: &str) -> Result<Vec<u8>> {
        let res = request
            .send()
            .await
            .map_err(|e| Error::Transport(format!("{}: {}", path, e)))?;

        let status = res.status();
        let body = res
            .bytes()
            .await
            .map_err(|e| Error::Transport(format!("{}: {}", path, e)))?;

        if !status.is_success() {
            return Err(Error::Http {
                status: status.as_u16(),
                body: String::from_utf8_lossy(&body).into_owned(),
            });
        }

        Ok(body.to_vec())
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let body = self.send(self.request(Method::GET, path)?, path).await?;
        decode_body(&body)
    }

    async fn get_unit(&self, path: &str) -> Result<()> {
        self.send(self.request(Method::GET, path)?, path).await?;
        Ok(())
    }

    async fn post_unit<B: Serialize + Sync>(&self, path: &str, body: &B) -> Result<()> {
        let request = self.request(Method::POST, path)?.json(body);
        self.send(request, path).await?;
        Ok(())
    }
}

#[async_trait]
impl SeatingApi for ApiClient {
    fn set_token(&self, token: Option<String>) {
        *self
            .token
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = token;
    }

    async fn log_in(&self, credentials: &Credentials) -> Result<LoginResponse> {
        let path = "/person/log-in";
        let res = self
            .request(Method::POST, path)?
            .json(credentials)
            .send()
            .await
            .map_err(|e| Error::Transport(format!("{}: {}", path, e)))?;

        let status = res.status();
        let body = res
            .bytes()
            .await
            .map_err(|e| Error::Transport(format!("{}: {}", path, e)))?;

        // A rejected login may come with an error status, its {error} body still counts
        match decode_body::<LoginResponse>(&body) {
            Ok(response) if status.is_success() || response.error.is_some() => Ok(response),
            Ok(_) => Err(Error::Http {
                status: status.as_u16(),
                body: String::from_utf8_lossy(&body).into_owned(),
            }),
            Err(_) if !status.is_success() => Err(Error::Http {
                status: status.as_u16(),
                body: String::from_utf8_lossy(&body).into_owned(),
            }),
            Err(e) => Err(e),
        }
    }

    async fn load_tables(&self) -> Result<Vec<Table>> {
        self.get("/table/load").await
    }

    async fn create_table(&self, table: &NewTable) -> Result<CreatedTable> {
        let path = "/table/new";
        let request = self.request(Method::POST, path)?.json(table);
        let body = self.send(request, path).await?;
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(CreatedTable::default());
        }
        decode_body(&body)
    }

    async fn delete_table(&self, table_id: i64) -> Result<()> {
        self.get_unit(&format!("/table/delete/{}", table_id)).await
    }

    async fn load_bookings(&self) -> Result<Vec<Booking>> {
        self.get("/booking/load").await
    }

    async fn bookings_by_person(&self, person_id: i64) -> Result<Vec<Booking>> {
        self.get(&format!("/booking/by-person/{}", person_id)).await
    }

    async fn bookings_by_table(&self, table_id: i64) -> Result<Vec<Booking>> {
        self.get(&format!("/booking/by-table/{}", table_id)).await
    }

    async fn create_booking(&self, request: &BookingRequest) -> Result<()> {
        self.post_unit("/booking/new", request).await
    }

    async fn update_booking(&self, booking_id: i64, update: &BookingUpdate) -> Result<()> {
        self.post_unit(&format!("/booking/update/{}", booking_id), update)
            .await
    }

    async fn delete_bookings_for_person(&self, person_id: i64) -> Result<()> {
        self.get_unit(&format!("/booking/delete/{}", person_id)).await
    }

    async fn send_recap_mail(&self) -> Result<()> {
        self.get_unit("/booking/mail-recap").await
    }

    async fn send_mail(&self, message: &MailMessage) -> Result<()> {
        self.post_unit("/booking/mail", message).await
    }
}
