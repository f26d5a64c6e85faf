pub mod advisor;
pub mod ai;
pub mod availability;
pub mod catalog;
pub mod classify;
pub mod extract;
pub mod recommend;
