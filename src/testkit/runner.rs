//! Recording [`CommandRunner`] for tests.
//!
//! Nothing is executed. Each call is recorded and answered from the most
//! recently added matching response, or with a plain success.

use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::error::Result;
use crate::port::outbound::command::{CommandOutput, CommandRunner, Invocation, RunOptions};

type Matcher = Box<dyn Fn(&Invocation) -> bool + Send + Sync>;

struct Response {
    matcher: Matcher,
    output: CommandOutput,
}

#[derive(Default)]
struct State {
    calls: Vec<(Invocation, RunOptions)>,
    responses: Vec<Response>,
    missing: HashSet<String>,
}

/// A clonable runner whose clones share one call log.
///
/// Hand one clone to the code under test and keep another for assertions.
#[derive(Clone, Default)]
pub struct RecordingRunner {
    state: Arc<Mutex<State>>,
}

impl RecordingRunner {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Answer invocations accepted by `matcher` with `output`.
    pub fn respond(
        &self,
        matcher: impl Fn(&Invocation) -> bool + Send + Sync + 'static,
        output: CommandOutput,
    ) {
        self.lock().responses.push(Response {
            matcher: Box::new(matcher),
            output,
        });
    }

    /// Answer invocations whose program and leading args equal `words`.
    pub fn respond_to(&self, words: &[&str], output: CommandOutput) {
        let words: Vec<String> = words.iter().map(|w| (*w).to_string()).collect();
        self.respond(move |inv| starts_with(inv, &words), output);
    }

    /// Fail invocations containing `needle` as a whole argument.
    pub fn fail_when_arg(&self, needle: &str, exit_code: i32) {
        let needle = needle.to_string();
        self.respond(move |inv| inv.has_arg(&needle), CommandOutput::with_code(exit_code));
    }

    /// Report `program` as absent from the execution path.
    pub fn missing_tool(&self, program: &str) {
        self.lock().missing.insert(program.to_string());
    }

    /// Every recorded invocation, in call order.
    pub fn calls(&self) -> Vec<Invocation> {
        self.lock().calls.iter().map(|(inv, _)| inv.clone()).collect()
    }

    /// Every recorded invocation with the options it ran under.
    pub fn calls_with_options(&self) -> Vec<(Invocation, RunOptions)> {
        self.lock().calls.clone()
    }

    /// Recorded invocations rendered as command lines.
    pub fn command_lines(&self) -> Vec<String> {
        self.lock().calls.iter().map(|(inv, _)| inv.to_string()).collect()
    }

    /// Number of recorded invocations starting with `words`.
    pub fn count(&self, words: &[&str]) -> usize {
        let words: Vec<String> = words.iter().map(|w| (*w).to_string()).collect();
        self.lock()
            .calls
            .iter()
            .filter(|(inv, _)| starts_with(inv, &words))
            .count()
    }

    /// Position of the first invocation whose command line equals `line`.
    pub fn position(&self, line: &str) -> Option<usize> {
        self.command_lines().iter().position(|l| l == line)
    }
}

fn starts_with(invocation: &Invocation, words: &[String]) -> bool {
    let Some((program, rest)) = words.split_first() else {
        return true;
    };
    invocation.program() == program
        && invocation.arg_list().len() >= rest.len()
        && invocation.arg_list().iter().zip(rest).all(|(a, w)| a == w)
}

impl CommandRunner for RecordingRunner {
    fn run(&self, invocation: &Invocation, options: RunOptions) -> Result<CommandOutput> {
        let mut state = self.lock();
        state.calls.push((invocation.clone(), options));

        let mut output = state
            .responses
            .iter()
            .rev()
            .find(|r| (r.matcher)(invocation))
            .map(|r| r.output.clone())
            .unwrap_or_else(CommandOutput::success);
        drop(state);

        if !options.capture {
            output.stdout = None;
            output.stderr = None;
        }
        output.checked(invocation, options)
    }

    fn is_available(&self, program: &str) -> bool {
        !self.lock().missing.contains(program)
    }
}
