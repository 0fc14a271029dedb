// src/tests/utils.rs
use crate::research::backoff::Sleeper;
use crate::research::prompt::ResearchTask;
use crate::research::{ResearchAgent, ResearchError};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Agent that plays back canned results, one per call.
pub struct ScriptedAgent {
    script: Mutex<VecDeque<Result<String, ResearchError>>>,
    tasks: Mutex<Vec<ResearchTask>>,
}

impl ScriptedAgent {
    pub fn new(script: Vec<Result<String, ResearchError>>) -> Arc<Self> {
        Arc::new(Self {
            script: Mutex::new(script.into()),
            tasks: Mutex::new(Vec::new()),
        })
    }

    pub fn calls(&self) -> usize {
        self.tasks.lock().unwrap().len()
    }

    pub fn tasks(&self) -> Vec<ResearchTask> {
        self.tasks.lock().unwrap().clone()
    }
}

impl ResearchAgent for ScriptedAgent {
    fn execute(&self, task: &ResearchTask) -> Result<String, ResearchError> {
        self.tasks.lock().unwrap().push(task.clone());
        self.script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(ResearchError::Unknown("script exhausted".into())))
    }
}

/// Records requested sleeps instead of blocking.
#[derive(Clone, Default)]
pub struct RecordingSleeper {
    slept: Arc<Mutex<Vec<Duration>>>,
}

impl RecordingSleeper {
    pub fn slept(&self) -> Vec<Duration> {
        self.slept.lock().unwrap().clone()
    }
}

impl Sleeper for RecordingSleeper {
    fn sleep(&self, duration: Duration) {
        self.slept.lock().unwrap().push(duration);
    }
}

pub fn rate_limited(retry_after_secs: Option<f64>) -> ResearchError {
    ResearchError::RateLimited {
        message: "rate_limit_exceeded".into(),
        retry_after_secs,
    }
}

/// Report in the shape the prompt asks for.
pub const SAMPLE_REPORT: &str = "\
**Area 1: Mitte**
Price: $1,200,000-$1,800,000 | Yield: 4.5%
Reason: Highest foot traffic in the city.

**Area 2: Kreuzberg**
Price: $800,000-$1,000,000 | Yield: 5.5%
Reason: Young demographics and a growing cafe scene.";
