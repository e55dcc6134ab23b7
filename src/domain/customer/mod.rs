//! Customer module - the people ordering and the addresses they deliver to.

mod address;
mod customer;

pub use address::{Address, Coordinates, NewAddress, COORDINATE_SCALE};
pub use customer::{Customer, DeliveryMode, Language, PhoneCapture};
