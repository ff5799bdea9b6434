pub mod bookings;
pub mod initialize;
pub mod lecturers;
pub mod pool;
pub mod sessions;
pub mod venues;
