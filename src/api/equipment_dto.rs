use serde::{Deserialize, Serialize};

use crate::domain::equipment::EquipmentStatus;

/// Equipment record as served by the `/equipment` collection.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct EquipmentDto {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub department: String,
    pub status: EquipmentStatusDto,
    pub next_maintenance: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum EquipmentStatusDto {
    Available,
    InUse,
    Maintenance,
    Reserved,
}

impl From<EquipmentStatusDto> for EquipmentStatus {
    fn from(dto: EquipmentStatusDto) -> EquipmentStatus {
        match dto {
            EquipmentStatusDto::Available => EquipmentStatus::Available,
            EquipmentStatusDto::InUse => EquipmentStatus::InUse,
            EquipmentStatusDto::Maintenance => EquipmentStatus::Maintenance,
            EquipmentStatusDto::Reserved => EquipmentStatus::Reserved,
        }
    }
}
