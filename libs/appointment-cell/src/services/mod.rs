pub mod overlap;
pub mod admission;
pub mod locks;
pub mod booking;

pub use admission::{admit, can_admit, find_conflicts};
pub use booking::AppointmentBookingService;
pub use locks::SchedulingLocks;
pub use overlap::overlaps;
