pub mod config;
pub mod decision;
pub mod event;
pub mod payment;
pub mod ports;
