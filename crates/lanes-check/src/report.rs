use std::fmt;
use std::io::{self, Write};

/// Whether a failed assertion stops the process or lets the caller continue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailurePolicy {
    #[default]
    Fatal,
    NonFatal,
}

impl FailurePolicy {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Fatal => "fatal",
            Self::NonFatal => "non_fatal",
        }
    }

    #[must_use]
    pub fn from_wire(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "fatal" => Some(Self::Fatal),
            "non_fatal" | "nonfatal" | "non-fatal" => Some(Self::NonFatal),
            _ => None,
        }
    }
}

/// How the fatal path terminates.
///
/// `Abort` ends the process without unwinding. `Panic` is the interactive
/// variant: a debugger can break on the panic and a test harness can observe
/// it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FatalAction {
    #[default]
    Abort,
    Panic,
}

impl FatalAction {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Abort => "abort",
            Self::Panic => "panic",
        }
    }
}

/// Writes diagnostics to a sink and applies the failure policy.
///
/// Every line is flushed as soon as it is written so that output stays
/// readable when the fatal path terminates the process right after.
pub struct FailureReporter {
    policy: FailurePolicy,
    fatal_action: FatalAction,
    sink: Box<dyn Write + Send>,
    failures: Vec<String>,
    notes: Vec<String>,
}

impl FailureReporter {
    /// Reporter writing to stderr.
    #[must_use]
    pub fn new(policy: FailurePolicy) -> Self {
        Self::with_sink(policy, io::stderr())
    }

    #[must_use]
    pub fn with_sink(policy: FailurePolicy, sink: impl Write + Send + 'static) -> Self {
        Self {
            policy,
            fatal_action: FatalAction::default(),
            sink: Box::new(sink),
            failures: Vec::new(),
            notes: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_fatal_action(mut self, action: FatalAction) -> Self {
        self.fatal_action = action;
        self
    }

    #[must_use]
    pub fn policy(&self) -> FailurePolicy {
        self.policy
    }

    #[must_use]
    pub fn fatal_action(&self) -> FatalAction {
        self.fatal_action
    }

    /// Reports a failed assertion. Under [`FailurePolicy::Fatal`] this does
    /// not return.
    pub fn fail(&mut self, message: impl Into<String>) {
        let message = message.into();
        self.emit(&message);
        self.failures.push(message);
        if self.policy == FailurePolicy::Fatal {
            terminate(self.fatal_action, self.failures.last().map_or("", String::as_str));
        }
    }

    /// Reports a problem that never stops the run, whatever the policy.
    pub fn note(&mut self, message: impl Into<String>) {
        let message = message.into();
        self.emit(&message);
        self.notes.push(message);
    }

    #[must_use]
    pub fn failure_count(&self) -> usize {
        self.failures.len()
    }

    #[must_use]
    pub fn failures(&self) -> &[String] {
        &self.failures
    }

    #[must_use]
    pub fn notes(&self) -> &[String] {
        &self.notes
    }

    fn emit(&mut self, message: &str) {
        // A broken diagnostic stream must not mask the failure itself.
        let _ = writeln!(self.sink, "{message}");
        let _ = self.sink.flush();
    }
}

impl Default for FailureReporter {
    fn default() -> Self {
        Self::new(FailurePolicy::default())
    }
}

impl fmt::Debug for FailureReporter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FailureReporter")
            .field("policy", &self.policy)
            .field("fatal_action", &self.fatal_action)
            .field("failures", &self.failures)
            .field("notes", &self.notes)
            .finish_non_exhaustive()
    }
}

fn terminate(action: FatalAction, message: &str) -> ! {
    match action {
        FatalAction::Abort => std::process::abort(),
        FatalAction::Panic => panic!("fatal assertion failure: {message}"),
    }
}

#[cfg(test)]
mod tests {
    use super::{FailurePolicy, FailureReporter, FatalAction};
    use std::io::{self, Write};
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct SharedSink(Arc<Mutex<Vec<u8>>>);

    impl Write for SharedSink {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().expect("sink lock").extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn non_fatal_failures_accumulate_and_reach_the_sink() {
        let sink = SharedSink::default();
        let mut reporter = FailureReporter::with_sink(FailurePolicy::NonFatal, sink.clone());
        reporter.fail("first");
        reporter.fail("second");
        assert_eq!(reporter.failure_count(), 2);
        let written = String::from_utf8(sink.0.lock().expect("sink lock").clone())
            .expect("utf8 diagnostics");
        assert_eq!(written, "first\nsecond\n");
    }

    #[test]
    fn notes_never_count_as_failures() {
        let mut reporter = FailureReporter::with_sink(FailurePolicy::Fatal, io::sink());
        reporter.note("buffer too small");
        assert_eq!(reporter.failure_count(), 0);
        assert_eq!(reporter.notes(), ["buffer too small".to_string()]);
    }

    #[test]
    #[should_panic(expected = "fatal assertion failure: boom")]
    fn fatal_panic_action_stops_at_first_failure() {
        let mut reporter = FailureReporter::with_sink(FailurePolicy::Fatal, io::sink())
            .with_fatal_action(FatalAction::Panic);
        reporter.fail("boom");
    }

    #[test]
    fn policy_wire_names_parse() {
        assert_eq!(FailurePolicy::from_wire("fatal"), Some(FailurePolicy::Fatal));
        assert_eq!(
            FailurePolicy::from_wire("Non-Fatal"),
            Some(FailurePolicy::NonFatal)
        );
        assert_eq!(FailurePolicy::from_wire("maybe"), None);
        assert_eq!(FailurePolicy::NonFatal.as_str(), "non_fatal");
    }
}
