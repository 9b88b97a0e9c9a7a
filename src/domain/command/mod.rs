pub mod command_invoker;
pub mod elevator_command;
