pub mod health;
pub mod taxes;
pub mod vehicles;
