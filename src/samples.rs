//! Built-in sample cases
//!
//! A fixed batch of inputs run through [`parse_source`], each tagged with
//! whether it is expected to fail. Used by `tabula --samples` and by the
//! integration tests as a smoke check of the whole pipeline.

use crate::parser::ast::Node;
use crate::parser::{parse_source, Error};
use std::fmt;

/// One sample input
#[derive(Debug, Clone, Copy)]
pub struct Sample {
    pub name: &'static str,
    pub source: &'static str,
    pub expect_error: bool,
}

const fn sample(name: &'static str, source: &'static str, expect_error: bool) -> Sample {
    Sample {
        name,
        source,
        expect_error,
    }
}

pub const SAMPLES: &[Sample] = &[
    // Basic expressions
    sample("basic_42", "42", false),
    sample("basic_x", "x", false),
    sample("basic_float", "0.25", false),
    sample("plus_2_3", "(+ 2 3)", false),
    sample("mult_x_5", "(× x 5)", false),
    sample("minus_10_y", "(− 10 y)", false),
    // Nested
    sample("nested_plus_mult", "(+ (× 2 3) 4)", false),
    sample("cond_eq", "(? (= x 0) 1 0)", false),
    // Functions / defs / application
    sample("lambda_id", "(λ x x)", false),
    sample("def_y", "(≜ y 10 y)", false),
    sample("apply_lambda", "((λ x (+ x 1)) 5)", false),
    sample("grouping", "(x)", false),
    sample("application", "(x 1 2)", false),
    // Error handling
    sample("err_missing_rparen", "(+ 2", true),
    sample("err_unmatched_rparen", ")", true),
    sample("err_wrong_arity_plus", "(+ 2 3 4)", true),
    sample("err_bad_decimal", "1.5", true),
    sample("err_two_programs", "x y", true),
];

/// Result of running one [`Sample`]
#[derive(Debug, Clone)]
pub struct SampleReport {
    pub name: &'static str,
    pub input: &'static str,
    pub expect_error: bool,
    pub outcome: Result<Node, Error>,
}

impl SampleReport {
    /// Whether success or failure matched the expectation
    pub fn passed(&self) -> bool {
        self.outcome.is_err() == self.expect_error
    }
}

impl fmt::Display for SampleReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let status = if self.passed() { "ok  " } else { "FAIL" };
        write!(f, "[{}] {:<22} {:<20} ", status, self.name, self.input)?;
        match &self.outcome {
            Ok(node) if self.expect_error => write!(f, "expected an error, parsed {}", node),
            Ok(node) => write!(f, "→ {}", node),
            Err(e) if self.expect_error => write!(f, "✗ (expected) {}", e),
            Err(e) => write!(f, "✗ {}", e),
        }
    }
}

/// Run a batch of samples in order.
pub fn run(samples: &[Sample]) -> Vec<SampleReport> {
    samples
        .iter()
        .map(|s| SampleReport {
            name: s.name,
            input: s.source,
            expect_error: s.expect_error,
            outcome: parse_source(s.source),
        })
        .collect()
}

/// Run the built-in [`SAMPLES`].
pub fn run_samples() -> Vec<SampleReport> {
    run(SAMPLES)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_samples_pass() {
        for report in run_samples() {
            assert!(report.passed(), "{}", report);
        }
    }

    #[test]
    fn test_unexpected_success_fails() {
        let reports = run(&[sample("oops", "x", true)]);
        assert!(!reports[0].passed());
        assert!(reports[0].to_string().contains("expected an error"));
    }
}
