//! Plain data row types written by output backends.

/// One living agent's state at a snapshot tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AgentSnapshotRow {
    pub agent_id:       u32,
    pub tick:           u64,
    pub x:              u32,
    pub y:              u32,
    pub sugar:          f64,
    pub spice:          f64,
    pub vision:         u32,
    pub age:            u64,
    pub tribe:          u16,
    pub decision_model: &'static str,
}

/// Summary of one simulation tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickSummaryRow {
    pub tick:             u64,
    pub agents:           u64,
    pub acted:            u64,
    pub moved:            u64,
    pub kills:            u64,
    pub deaths:           u64,
    pub mean_wealth:      f64,
    pub gini_coefficient: f64,
}
