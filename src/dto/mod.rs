//! DTOs de request/response de la API

pub mod api_response;
pub mod assignment_dto;
pub mod auth_dto;
pub mod belt_dto;
pub mod briefing_dto;
pub mod facility_dto;
pub mod invite_dto;
pub mod people_dto;
pub mod route_dto;
pub mod time_off_dto;
pub mod truck_dto;

pub use api_response::ApiResponse;
