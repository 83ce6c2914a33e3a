use serde::{Deserialize, Serialize};

use crate::domain::maintenance::{MaintenancePriority, MaintenanceStatus};

/// Maintenance request record as served by the `/maintenance` collection.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct MaintenanceDto {
    pub id: String,
    pub equipment_id: String,
    pub description: String,
    pub status: MaintenanceStatusDto,
    pub priority: MaintenancePriorityDto,
    pub date_reported: String,
    pub date_completed: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum MaintenanceStatusDto {
    Reported,
    InProgress,
    Completed,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum MaintenancePriorityDto {
    Low,
    Medium,
    High,
    Urgent,
}

impl From<MaintenanceStatusDto> for MaintenanceStatus {
    fn from(dto: MaintenanceStatusDto) -> MaintenanceStatus {
        match dto {
            MaintenanceStatusDto::Reported => MaintenanceStatus::Reported,
            MaintenanceStatusDto::InProgress => MaintenanceStatus::InProgress,
            MaintenanceStatusDto::Completed => MaintenanceStatus::Completed,
        }
    }
}

impl From<MaintenancePriorityDto> for MaintenancePriority {
    fn from(dto: MaintenancePriorityDto) -> MaintenancePriority {
        match dto {
            MaintenancePriorityDto::Low => MaintenancePriority::Low,
            MaintenancePriorityDto::Medium => MaintenancePriority::Medium,
            MaintenancePriorityDto::High => MaintenancePriority::High,
            MaintenancePriorityDto::Urgent => MaintenancePriority::Urgent,
        }
    }
}
