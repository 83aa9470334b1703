pub mod interviews;
pub mod reports;
pub mod studies;
