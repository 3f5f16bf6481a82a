use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Which end of the work queue the dispatcher takes the next job from.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum QueueDiscipline {
    /// Most recently enqueued job runs first.
    #[default]
    Lifo,

    Fifo,
}

impl QueueDiscipline {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Lifo => "lifo",
            Self::Fifo => "fifo",
        }
    }
}

impl FromStr for QueueDiscipline {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "lifo" => Ok(Self::Lifo),
            "fifo" => Ok(Self::Fifo),
            _ => Err(format!("Unknown queue discipline '{}'. Expected 'lifo' or 'fifo'", s)),
        }
    }
}

/// What the dispatch loop does when the queue is empty.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum IdleStrategy {
    /// Yield the processor and poll again.
    #[default]
    Spin,

    /// Block on the queue until work arrives or the park timeout elapses.
    Park,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DispatchConfig {
    #[serde(default)]
    pub queue_discipline: QueueDiscipline,

    #[serde(default)]
    pub idle_strategy: IdleStrategy,

    #[serde(default = "default_park_timeout_ms")]
    pub park_timeout_ms: u64,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            queue_discipline: QueueDiscipline::default(),
            idle_strategy: IdleStrategy::default(),
            park_timeout_ms: default_park_timeout_ms(),
        }
    }
}

fn default_park_timeout_ms() -> u64 {
    50
}
