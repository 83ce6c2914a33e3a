use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use serde::de::DeserializeOwned;

use crate::api::equipment_dto::EquipmentDto;
use crate::api::reservation_dto::{NewReservationDto, ReservationDto};
use crate::domain::equipment::Equipment;
use crate::domain::reservation::Reservation;
use crate::store::{EquipmentStore, NewReservation, ReservationStore, StoreError};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Storage collaborator backed by the REST data store.
///
/// Talks to json-server style collection endpoints: `GET /equipment`,
/// `GET /reservations`, `POST /reservations`. No retries and no caching;
/// every fetch hits the backend.
#[derive(Debug, Clone)]
pub struct RestStore {
    client: reqwest::Client,
    base_url: String,
}

impl RestStore {
    pub fn new(base_url: impl Into<String>) -> Result<RestStore, StoreError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder().timeout(REQUEST_TIMEOUT).default_headers(headers).build()?;

        Ok(RestStore { client, base_url: base_url.into().trim_end_matches('/').to_string() })
    }

    async fn get_collection<T: DeserializeOwned>(&self, path: &str) -> Result<Vec<T>, StoreError> {
        let url = format!("{}/{}", self.base_url, path);
        log::debug!("GET {}", url);

        let response = self.client.get(&url).send().await?.error_for_status()?;
        let records: Vec<T> = response.json().await?;

        Ok(records)
    }
}

#[async_trait]
impl EquipmentStore for RestStore {
    async fn fetch_equipment(&self) -> Result<Vec<Equipment>, StoreError> {
        let dtos: Vec<EquipmentDto> = self.get_collection("equipment").await?;
        Ok(dtos.into_iter().map(Equipment::from_dto).collect())
    }
}

#[async_trait]
impl ReservationStore for RestStore {
    async fn fetch_reservations(&self) -> Result<Vec<Reservation>, StoreError> {
        let dtos: Vec<ReservationDto> = self.get_collection("reservations").await?;

        dtos.into_iter().map(|dto| Reservation::from_dto(dto).map_err(|e| StoreError::Decode(e.to_string()))).collect()
    }

    async fn persist_reservation(&self, new: NewReservation) -> Result<Reservation, StoreError> {
        let url = format!("{}/reservations", self.base_url);
        log::debug!("POST {}", url);

        let body = NewReservationDto::from_domain(&new);
        let response = self.client.post(&url).json(&body).send().await?.error_for_status()?;
        let stored: ReservationDto = response.json().await?;

        Reservation::from_dto(stored).map_err(|e| StoreError::Decode(e.to_string()))
    }
}
