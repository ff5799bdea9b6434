pub mod booking;
pub mod lecturer;
pub mod venue;
