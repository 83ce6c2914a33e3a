use chrono::NaiveDate;

use crate::api::maintenance_dto::MaintenanceDto;
use crate::error::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MaintenanceStatus {
    Reported,
    InProgress,
    Completed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum MaintenancePriority {
    Low,
    Medium,
    High,
    Urgent,
}

/// A maintenance request raised against a piece of equipment.
///
/// Tracked alongside reservations for completeness of the domain; the
/// scheduler never consults these records.
#[derive(Debug, Clone)]
pub struct MaintenanceRequest {
    pub id: String,
    pub equipment_id: String,
    pub description: String,
    pub status: MaintenanceStatus,
    pub priority: MaintenancePriority,
    pub date_reported: NaiveDate,
    pub date_completed: Option<NaiveDate>,
}

impl MaintenanceRequest {
    pub fn from_dto(dto: MaintenanceDto) -> Result<MaintenanceRequest> {
        let date_reported = parse_date(&dto.date_reported)
            .ok_or_else(|| Error::ModelConstructionError(format!("MaintenanceRequest '{}': unparsable dateReported '{}'", dto.id, dto.date_reported)))?;

        let date_completed = match dto.date_completed.as_deref() {
            Some(raw) => Some(
                parse_date(raw)
                    .ok_or_else(|| Error::ModelConstructionError(format!("MaintenanceRequest '{}': unparsable dateCompleted '{}'", dto.id, raw)))?,
            ),
            None => None,
        };

        Ok(MaintenanceRequest {
            id: dto.id,
            equipment_id: dto.equipment_id,
            description: dto.description,
            status: dto.status.into(),
            priority: dto.priority.into(),
            date_reported,
            date_completed,
        })
    }
}

fn parse_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()
}

/// Open requests (not yet completed), most urgent first, ties broken by
/// oldest report date.
pub fn open_requests(requests: &[MaintenanceRequest]) -> Vec<&MaintenanceRequest> {
    let mut open: Vec<&MaintenanceRequest> = requests.iter().filter(|r| r.status != MaintenanceStatus::Completed).collect();
    open.sort_by(|a, b| b.priority.cmp(&a.priority).then(a.date_reported.cmp(&b.date_reported)));
    open
}
