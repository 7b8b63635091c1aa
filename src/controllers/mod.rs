pub mod assignment_controller;
pub mod auth_controller;
pub mod belt_controller;
pub mod briefing_controller;
pub mod facility_controller;
pub mod invite_controller;
pub mod people_controller;
pub mod route_controller;
pub mod time_off_controller;
pub mod truck_controller;
