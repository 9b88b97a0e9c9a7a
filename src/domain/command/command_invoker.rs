use std::sync::Arc;

use crate::domain::command::elevator_command::{CommandOutcome, ElevatorCommand};
use crate::domain::dispatch::elevator_controller::ElevatorController;
use crate::domain::utils::id::CommandId;

/// One executed command and its result.
#[derive(Clone)]
pub struct CommandRecord {
    pub id: CommandId,
    pub command: Arc<dyn ElevatorCommand>,
    pub outcome: CommandOutcome,
}

impl std::fmt::Debug for CommandRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommandRecord").field("id", &self.id).field("command", &self.command.to_string()).field("outcome", &self.outcome).finish()
    }
}

/// Executes commands and remembers them in execution order.
#[derive(Debug, Default)]
pub struct CommandInvoker {
    history: Vec<CommandRecord>,
    next_id: u32,
}

impl CommandInvoker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn execute_command(&mut self, command: Arc<dyn ElevatorCommand>, controller: &ElevatorController) -> CommandOutcome {
        let outcome = command.execute(controller);

        self.next_id += 1;
        let id = CommandId::new(self.next_id);
        log::debug!("Command {} '{}' {}", id, command, outcome);

        self.history.push(CommandRecord { id, command, outcome });
        outcome
    }

    pub fn history(&self) -> &[CommandRecord] {
        &self.history
    }

    pub fn len(&self) -> usize {
        self.history.len()
    }

    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }

    /// Forgets the history. Command ids keep counting up.
    pub fn clear_history(&mut self) {
        self.history.clear();
    }
}
