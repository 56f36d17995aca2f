pub mod button;
pub mod clock;
pub mod gnss;
pub mod led;
pub mod lpu;
pub mod portal;
pub mod renderer;
pub mod rtc;
pub mod wifi;

pub use button::*;
pub use clock::*;
pub use gnss::*;
pub use led::*;
pub use lpu::*;
pub use portal::*;
pub use renderer::*;
pub use rtc::*;
pub use wifi::*;
