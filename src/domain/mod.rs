pub mod building;
pub mod command;
pub mod dispatch;
pub mod elevator;
pub mod observer;
pub mod scheduling;
pub mod simulator;
pub mod utils;
