// research/pipeline.rs
use crate::cache::{lock_cache, ReportCache};
use crate::research::agent::ResearchAgent;
use crate::research::backoff::{self, RetryPolicy, Sleeper, ThreadSleeper};
use crate::research::prompt::ResearchTask;
use crate::research::report_log::ReportLog;
use crate::research::ResearchError;
use std::sync::{Arc, Mutex};
use tracing::{error, info, warn};

#[derive(Debug, Clone, PartialEq)]
pub struct ResearchOutcome {
    pub report: String,
    pub from_cache: bool,
}

/// Entry point for one city's analysis: prompt, agent call with backoff, raw text back.
pub struct ResearchPipeline {
    agent: Arc<dyn ResearchAgent>,
    policy: RetryPolicy,
    sleeper: Box<dyn Sleeper>,
    report_log: Option<ReportLog>,
}

impl ResearchPipeline {
    pub fn new(agent: Arc<dyn ResearchAgent>, policy: RetryPolicy) -> Self {
        Self {
            agent,
            policy,
            sleeper: Box::new(ThreadSleeper),
            report_log: None,
        }
    }

    pub fn with_sleeper(mut self, sleeper: Box<dyn Sleeper>) -> Self {
        self.sleeper = sleeper;
        self
    }

    pub fn with_report_log(mut self, report_log: Option<ReportLog>) -> Self {
        self.report_log = report_log;
        self
    }

    /// Run the analysis for `city` and return the agent's raw report.
    ///
    /// Progress messages go to `progress` (if given) in phase order and are
    /// logged either way. Failures come back exactly as the agent raised them.
    pub fn run(
        &self,
        city: &str,
        mut progress: Option<&mut dyn FnMut(&str)>,
    ) -> Result<String, ResearchError> {
        let city = city.trim();
        let mut notify = |msg: &str| {
            info!(city, "{msg}");
            if let Some(sink) = progress.as_deref_mut() {
                sink(msg);
            }
        };

        notify(&format!("🔍 Starting analysis for {city}..."));
        let task = ResearchTask::for_city(city);

        notify(&format!("🤖 Agent initialized for {city}..."));
        notify(&format!("🌐 Searching web for {city} property data..."));

        let result = backoff::invoke(&self.policy, self.sleeper.as_ref(), &mut notify, || {
            self.agent.execute(&task)
        });

        match result {
            Ok(report) => {
                self.write_report_log(&report);
                notify(&format!("✅ Analysis complete for {city}!"));
                Ok(report)
            }
            Err(err) => {
                error!(city, kind = err.kind(), error = %err, "analysis failed");
                notify(&format!("❌ Error: {err}"));
                Err(err)
            }
        }
    }

    /// Like [`run`](Self::run), but answers from `cache` when it holds a fresh
    /// report for the city, and stores new reports in it.
    ///
    /// The cache lock is released while the agent runs, so two identical
    /// requests in flight will both go to the agent.
    pub fn run_cached(
        &self,
        city: &str,
        cache: &Mutex<ReportCache>,
        now: impl Fn() -> i64,
        mut progress: Option<&mut dyn FnMut(&str)>,
    ) -> Result<ResearchOutcome, ResearchError> {
        let cached = lock_cache(cache).get(city, now()).map(str::to_string);

        if let Some(report) = cached {
            info!(city = city.trim(), "serving cached report");
            if let Some(sink) = progress.as_deref_mut() {
                sink(&format!("📦 Using cached results for {}", city.trim()));
            }
            return Ok(ResearchOutcome {
                report,
                from_cache: true,
            });
        }

        let report = self.run(city, progress)?;
        lock_cache(cache).put(city, report.clone(), now());

        Ok(ResearchOutcome {
            report,
            from_cache: false,
        })
    }

    fn write_report_log(&self, report: &str) {
        let Some(log) = &self.report_log else {
            return;
        };
        if let Err(e) = log.write(report) {
            warn!(path = %log.path().display(), error = %e, "could not write report file");
        }
    }
}
