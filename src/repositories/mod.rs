pub mod assignment_repository;
pub mod belt_repository;
pub mod briefing_repository;
pub mod facility_repository;
pub mod invite_repository;
pub mod route_repository;
pub mod template_repository;
pub mod time_off_repository;
pub mod truck_repository;
pub mod user_repository;
