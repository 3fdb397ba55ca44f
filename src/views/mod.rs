pub mod bookings;
pub mod flights;
pub mod format;
pub mod notify;
pub mod report;
pub mod ticket;

pub use notify::Notifier;
