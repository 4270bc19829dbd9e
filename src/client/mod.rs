pub mod reply;
pub mod system_bus;

pub use reply::DbusReply;
pub use system_bus::SystemBus;
