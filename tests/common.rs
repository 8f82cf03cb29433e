//! Test utilities for linty integration tests

/// Result type alias for tests
pub type TestResult<T = ()> = Result<T, Box<dyn std::error::Error>>;

/// Extract Ok value or panic with context
#[macro_export]
macro_rules! assert_ok {
    ($expr:expr) => {
        match $expr {
            Ok(v) => v,
            Err(e) => panic!("assertion failed: expected Ok, got Err({:?})", e),
        }
    };
    ($expr:expr, $msg:literal) => {
        match $expr {
            Ok(v) => v,
            Err(e) => panic!("{}: {:?}", $msg, e),
        }
    };
}

/// Extract Some value or panic with context
#[macro_export]
macro_rules! assert_some {
    ($expr:expr) => {
        match $expr {
            Some(v) => v,
            None => panic!("assertion failed: expected Some, got None"),
        }
    };
    ($expr:expr, $msg:literal) => {
        match $expr {
            Some(v) => v,
            None => panic!("{}: got None", $msg),
        }
    };
}

/// A rule whose behavior is chosen per test
pub struct ScriptedRule {
    pub name: &'static str,
    pub behavior: Behavior,
}

/// What a `ScriptedRule` does when checked
#[derive(Debug, Clone)]
pub enum Behavior {
    /// Report these (line, issue) pairs
    Report(Vec<(u32, &'static str)>),
    /// Return an error with this message
    Fail(&'static str),
    /// Panic with this message
    Panic(&'static str),
}

impl ScriptedRule {
    pub fn boxed(name: &'static str, behavior: Behavior) -> Box<dyn linty::Rule> {
        Box::new(ScriptedRule { name, behavior })
    }
}

impl linty::Rule for ScriptedRule {
    fn name(&self) -> &str {
        self.name
    }

    fn description(&self) -> &str {
        "scripted test rule"
    }

    fn check(&self, target: &linty::Target) -> linty::rules::CheckResult {
        match &self.behavior {
            Behavior::Report(issues) => Ok(issues
                .iter()
                .map(|(line, issue)| linty::Finding::issue(target.file(), *line, *issue))
                .collect()),
            Behavior::Fail(message) => Err((*message).into()),
            Behavior::Panic(message) => panic!("{}", message),
        }
    }
}
