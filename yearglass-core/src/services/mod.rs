pub mod button_service;
pub mod power_service;
pub mod time_service;

pub use button_service::ButtonService;
pub use power_service::PowerService;
pub use time_service::TimeService;
