use serde::{Deserialize, Serialize};

/// One step of a scripted run, tagged by `type`.
#[derive(Debug, Deserialize, Clone, Serialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum ScenarioStepDto {
    HallCall { floor: i32, direction: String },
    CabinCall { elevator_id: u32, floor: i32 },
    SetStrategy { strategy: String },
    Maintenance { elevator_id: u32, enabled: bool },
    Wait { ms: u64 },
    WaitIdle,
}
