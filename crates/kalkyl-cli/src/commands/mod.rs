pub mod analyze;
pub mod prices;
pub mod rooms;
