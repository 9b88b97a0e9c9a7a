pub mod elevator_display;
pub mod elevator_observer;
