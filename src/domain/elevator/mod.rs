pub mod direction;
pub mod elevator;
pub mod elevator_state;
pub mod elevator_status;
pub mod floor;
pub mod request;
