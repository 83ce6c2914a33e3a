use std::fs;

use serde::de::DeserializeOwned;

use crate::api::database_dto::DatabaseDto;
use crate::domain::equipment::Equipment;
use crate::domain::maintenance::MaintenanceRequest;
use crate::domain::reservation::Reservation;
use crate::error::Result;

/// Parses a JSON file into a given type `T`.
///
/// Errors are converted into `crate::error::Error` variants:
/// - `Error::IoError` if the file cannot be read.
/// - `Error::DeserializationError` if the JSON is malformed.
pub fn parse_json_file<T: DeserializeOwned>(file_path: &str) -> Result<T> {
    let data = fs::read_to_string(file_path)?;
    let parsed: T = serde_json::from_str(&data)?;
    Ok(parsed)
}

/// The three domain collections loaded from a `db.json` fixture.
#[derive(Debug)]
pub struct Database {
    pub equipment: Vec<Equipment>,
    pub reservations: Vec<Reservation>,
    pub maintenance: Vec<MaintenanceRequest>,
}

impl Database {
    /// Loads and converts a fixture, rejecting the whole file on the first
    /// malformed record.
    pub fn load(file_path: &str) -> Result<Database> {
        let dto: DatabaseDto = parse_json_file(file_path)?;

        let equipment = dto.equipment.into_iter().map(Equipment::from_dto).collect();
        let reservations = dto.reservations.into_iter().map(Reservation::from_dto).collect::<Result<Vec<_>>>()?;
        let maintenance = dto.maintenance.into_iter().map(MaintenanceRequest::from_dto).collect::<Result<Vec<_>>>()?;

        log::info!("Fixture '{}' loaded.", file_path);

        Ok(Database { equipment, reservations, maintenance })
    }
}
