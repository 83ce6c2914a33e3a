use serde::{Deserialize, Serialize};

use crate::api::equipment_dto::EquipmentDto;
use crate::api::maintenance_dto::MaintenanceDto;
use crate::api::reservation_dto::ReservationDto;

/// Shape of a `db.json` fixture: one array per collection, matching the
/// collection endpoints of the REST backend.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct DatabaseDto {
    pub equipment: Vec<EquipmentDto>,
    pub reservations: Vec<ReservationDto>,
    #[serde(default)]
    pub maintenance: Vec<MaintenanceDto>,
}
