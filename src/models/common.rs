use std::fmt;

/// The two operations exposed by the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Review,
    Translate,
}

/// What an operation does with an upstream failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Surface a generic server error; detail stays in the logs
    Raise,
    /// Answer with a success-shaped payload that carries the failure message
    Degrade,
}

impl Operation {
    pub fn failure_policy(&self) -> FailurePolicy {
        match self {
            Operation::Review => FailurePolicy::Raise,
            // Kept for client compatibility; pending product confirmation.
            Operation::Translate => FailurePolicy::Degrade,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Operation::Review => "review",
            Operation::Translate => "translate",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
