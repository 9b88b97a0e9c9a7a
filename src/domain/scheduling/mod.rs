pub mod fcfs_scheduling_strategy;
pub mod scheduling_strategy;
pub mod scheduling_strategy_type;
pub mod sweep_scheduling_strategy;

mod scheduling_strategy_tests;
