use std::collections::HashMap;

use chrono::{Days, NaiveDate};

use crate::api::equipment_dto::EquipmentDto;

/// Number of days ahead of `nextMaintenance` at which a unit counts as due.
///
/// The surrounding dashboards disagreed on this window (7 days on some
/// pages, same-day on others); a single 7-day policy is used everywhere.
pub const MAINTENANCE_DUE_WINDOW_DAYS: u64 = 7;

/// Operational state of a piece of equipment.
///
/// The state is set manually through the edit forms; starting or ending a
/// reservation does not flip it automatically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EquipmentStatus {
    Available,
    InUse,
    Maintenance,
    Reserved,
}

impl EquipmentStatus {
    /// The wire value, as stored by the backend.
    pub fn as_str(&self) -> &'static str {
        match self {
            EquipmentStatus::Available => "available",
            EquipmentStatus::InUse => "in_use",
            EquipmentStatus::Maintenance => "maintenance",
            EquipmentStatus::Reserved => "reserved",
        }
    }

    /// Human-readable form for dropdowns and status badges.
    pub fn label(&self) -> &'static str {
        match self {
            EquipmentStatus::Available => "Available",
            EquipmentStatus::InUse => "In Use",
            EquipmentStatus::Maintenance => "Maintenance",
            EquipmentStatus::Reserved => "Reserved",
        }
    }
}

/// A piece of tracked medical equipment.
#[derive(Debug, Clone)]
pub struct Equipment {
    pub id: String,
    pub name: String,
    pub kind: String,
    pub department: String,
    pub status: EquipmentStatus,
    pub next_maintenance: Option<NaiveDate>,
}

impl Equipment {
    pub fn from_dto(dto: EquipmentDto) -> Equipment {
        // An unparsable maintenance date is treated as "none scheduled";
        // the field drives alerting only, never scheduling decisions.
        let next_maintenance = dto.next_maintenance.as_deref().and_then(|raw| NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok());

        Equipment { id: dto.id, name: dto.name, kind: dto.kind, department: dto.department, status: dto.status.into(), next_maintenance }
    }

    /// Whether maintenance falls due within the next
    /// [`MAINTENANCE_DUE_WINDOW_DAYS`] days, counted from `today`.
    pub fn maintenance_due(&self, today: NaiveDate) -> bool {
        match self.next_maintenance {
            Some(due) => {
                let horizon = today.checked_add_days(Days::new(MAINTENANCE_DUE_WINDOW_DAYS)).unwrap_or(NaiveDate::MAX);
                due <= horizon
            }
            None => false,
        }
    }
}

/// Counts equipment per status, for the dashboard status cards.
pub fn status_summary(equipment: &[Equipment]) -> HashMap<EquipmentStatus, usize> {
    let mut counts = HashMap::new();
    for item in equipment {
        *counts.entry(item.status).or_insert(0) += 1;
    }
    counts
}
