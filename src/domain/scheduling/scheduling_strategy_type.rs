use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use crate::domain::elevator::direction::Direction;
use crate::domain::scheduling::fcfs_scheduling_strategy::FcfsSchedulingStrategy;
use crate::domain::scheduling::scheduling_strategy::SchedulingStrategy;
use crate::domain::scheduling::sweep_scheduling_strategy::SweepSchedulingStrategy;
use crate::error::ConversionError;

/// The scheduling policies an elevator controller can run with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SchedulingStrategyType {
    /// **First Come, First Served**: stops are visited in the order they were requested.
    Fcfs,
    Scan,
    /// Same sweep as `Scan`. The sweep already reverses at the last pending stop.
    Look,
}

impl SchedulingStrategyType {
    /// Factory method to return a concrete [`SchedulingStrategy`] for the enum variant.
    pub fn get_instance(&self, idle_tie_break: Direction) -> Arc<dyn SchedulingStrategy> {
        match self {
            SchedulingStrategyType::Fcfs => Arc::new(FcfsSchedulingStrategy::new()),
            SchedulingStrategyType::Scan => Arc::new(SweepSchedulingStrategy::scan(idle_tie_break)),
            SchedulingStrategyType::Look => Arc::new(SweepSchedulingStrategy::look(idle_tie_break)),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            SchedulingStrategyType::Fcfs => "FCFS",
            SchedulingStrategyType::Scan => "SCAN",
            SchedulingStrategyType::Look => "LOOK",
        }
    }
}

impl fmt::Display for SchedulingStrategyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SchedulingStrategyType {
    type Err = ConversionError;

    fn from_str(strategy: &str) -> Result<SchedulingStrategyType, Self::Err> {
        match strategy.to_ascii_uppercase().as_str() {
            "FCFS" => Ok(SchedulingStrategyType::Fcfs),
            "SCAN" => Ok(SchedulingStrategyType::Scan),
            "LOOK" => Ok(SchedulingStrategyType::Look),
            _ => Err(ConversionError::UnknownSchedulingStrategy(strategy.to_string())),
        }
    }
}
