/// Cost of one axis-aligned move.
pub const DEFAULT_STEP_COST: i32 = 10;

/// Largest accepted step cost. Larger values are clamped.
pub const MAX_STEP_COST: i32 = 1_000;

/// Tunables for a [`SearchEngine`](crate::SearchEngine).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EngineConfig {
    /// Cost of one move between adjacent cells, in `1..=MAX_STEP_COST`.
    pub step_cost: i32,
    /// Cancel the search after this many expansion steps (`None` = no limit).
    pub max_steps: Option<usize>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            step_cost: DEFAULT_STEP_COST,
            max_steps: None,
        }
    }
}

impl EngineConfig {
    /// Set the step cost (builder).
    pub fn with_step_cost(mut self, step_cost: i32) -> Self {
        self.step_cost = step_cost;
        self
    }

    /// Set the step limit (builder).
    pub fn with_max_steps(mut self, max_steps: usize) -> Self {
        self.max_steps = Some(max_steps);
        self
    }

    /// Clamp out-of-range values, logging what was changed.
    pub(crate) fn sanitized(mut self) -> Self {
        if self.step_cost < 1 {
            log::warn!(
                "step cost {} is not positive, using {}",
                self.step_cost,
                DEFAULT_STEP_COST
            );
            self.step_cost = DEFAULT_STEP_COST;
        } else if self.step_cost > MAX_STEP_COST {
            log::warn!(
                "step cost {} is too large, using {}",
                self.step_cost,
                MAX_STEP_COST
            );
            self.step_cost = MAX_STEP_COST;
        }
        self
    }
}
