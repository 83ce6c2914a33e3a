pub mod database_dto;
pub mod equipment_dto;
pub mod maintenance_dto;
pub mod reservation_dto;
