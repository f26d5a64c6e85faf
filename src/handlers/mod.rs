pub mod advisor;
pub mod health;
