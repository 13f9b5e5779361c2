pub mod catalog;
pub mod topology;
pub mod verify;
