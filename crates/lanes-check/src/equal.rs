use crate::log::{CheckLogEntry, maybe_append_check_log};
use crate::report::{FailurePolicy, FailureReporter};
use lanes_kind::{FloatLane, IntLane};

/// Approximate float equality.
///
/// NaN is checked first on both sides: the infinity branch's ordered
/// comparison is also satisfied by an unordered pair. Identical finite
/// values match even when `a +- slop` rounds back to `a`.
#[must_use]
pub fn float_equal<F: FloatLane>(a: F, b: F, slop: F) -> bool {
    if a.is_nan() || b.is_nan() {
        a.is_nan() && b.is_nan()
    } else if a.is_infinite() {
        !(a < b) && !(a > b)
    } else {
        a == b || (b > a - slop && b < a + slop)
    }
}

#[must_use]
pub fn int_equal<I: IntLane>(a: I, b: I) -> bool {
    a == b
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlopError {
    Negative,
    NotANumber,
}

impl SlopError {
    #[must_use]
    pub const fn reason_code(self) -> &'static str {
        match self {
            Self::Negative => "slop_negative",
            Self::NotANumber => "slop_nan",
        }
    }
}

impl std::fmt::Display for SlopError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Negative => write!(f, "slop must be >= 0"),
            Self::NotANumber => write!(f, "slop must not be NaN"),
        }
    }
}

impl std::error::Error for SlopError {}

/// Half-width of the acceptance window around an expected float.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Slop<F: FloatLane>(F);

impl<F: FloatLane> Slop<F> {
    pub fn new(value: F) -> Result<Self, SlopError> {
        if value.is_nan() {
            return Err(SlopError::NotANumber);
        }
        if value < F::from_f64(0.0) {
            return Err(SlopError::Negative);
        }
        Ok(Self(value))
    }

    /// `precision` decimal digits: 5 gives a slop of `1e-5`.
    #[must_use]
    pub fn from_precision(precision: u32) -> Self {
        Self(F::slop_for_precision(precision))
    }

    #[must_use]
    pub fn value(self) -> F {
        self.0
    }
}

/// Where an assertion was written, and the source text of its operands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Site<'a> {
    pub file: &'a str,
    pub line: u32,
    pub lhs: &'a str,
    pub rhs: &'a str,
}

impl<'a> Site<'a> {
    #[must_use]
    pub const fn new(file: &'a str, line: u32, lhs: &'a str, rhs: &'a str) -> Self {
        Self {
            file,
            line,
            lhs,
            rhs,
        }
    }
}

/// Outcome of one vector assertion.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Mismatches {
    /// Every failing element index, in ascending order.
    pub indices: Vec<usize>,
    pub compared: usize,
    /// `(lhs_len, rhs_len)` when the operands differ in length.
    pub length_mismatch: Option<(usize, usize)>,
}

impl Mismatches {
    #[must_use]
    pub fn passed(&self) -> bool {
        self.indices.is_empty() && self.length_mismatch.is_none()
    }
}

/// Runs vector assertions and routes failures through a [`FailureReporter`].
#[derive(Debug, Default)]
pub struct Checker {
    reporter: FailureReporter,
    label: String,
}

impl Checker {
    #[must_use]
    pub fn new(reporter: FailureReporter) -> Self {
        Self {
            reporter,
            label: String::new(),
        }
    }

    /// Tag recorded with every logged mismatch, usually the variant name.
    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    #[must_use]
    pub fn policy(&self) -> FailurePolicy {
        self.reporter.policy()
    }

    #[must_use]
    pub fn failure_count(&self) -> usize {
        self.reporter.failure_count()
    }

    #[must_use]
    pub fn reporter(&self) -> &FailureReporter {
        &self.reporter
    }

    pub fn reporter_mut(&mut self) -> &mut FailureReporter {
        &mut self.reporter
    }

    #[must_use]
    pub fn into_reporter(self) -> FailureReporter {
        self.reporter
    }

    pub fn assert_equal_vf<F: FloatLane>(
        &mut self,
        site: Site<'_>,
        a: &[F],
        b: &[F],
        precision: u32,
    ) -> Mismatches {
        self.assert_close_vf(site, a, b, Slop::from_precision(precision))
    }

    pub fn assert_close_vf<F: FloatLane>(
        &mut self,
        site: Site<'_>,
        a: &[F],
        b: &[F],
        slop: Slop<F>,
    ) -> Mismatches {
        let mut outcome = self.check_lengths(site, a.len(), b.len());
        for (i, (&x, &y)) in a.iter().zip(b).enumerate() {
            outcome.compared += 1;
            if float_equal(x, y, slop.value()) {
                continue;
            }
            outcome.indices.push(i);
            let (expected, actual) = (format!("{:.6}", x.to_f64()), format!("{:.6}", y.to_f64()));
            let message = format!(
                "{}:{}: assertion failed: {}[{i}] ~= {}[{i}] ({expected} ~= {actual})",
                site.file, site.line, site.lhs, site.rhs
            );
            self.record(site, Some(i), expected, actual, "~=", Some(slop.value().to_f64()));
            self.reporter.fail(message);
        }
        outcome
    }

    pub fn assert_equal_vi<I: IntLane>(&mut self, site: Site<'_>, a: &[I], b: &[I]) -> Mismatches {
        let mut outcome = self.check_lengths(site, a.len(), b.len());
        for (i, (&x, &y)) in a.iter().zip(b).enumerate() {
            outcome.compared += 1;
            if int_equal(x, y) {
                continue;
            }
            outcome.indices.push(i);
            let message = format!(
                "{}:{}: assertion failed: {}[{i}] != {}[{i}] ({x} != {y})",
                site.file, site.line, site.lhs, site.rhs
            );
            self.record(site, Some(i), x.to_string(), y.to_string(), "!=", None);
            self.reporter.fail(message);
        }
        outcome
    }

    fn check_lengths(&mut self, site: Site<'_>, lhs_len: usize, rhs_len: usize) -> Mismatches {
        let mut outcome = Mismatches::default();
        if lhs_len != rhs_len {
            outcome.length_mismatch = Some((lhs_len, rhs_len));
            let message = format!(
                "{}:{}: assertion failed: len({}) == len({}) ({lhs_len} != {rhs_len})",
                site.file, site.line, site.lhs, site.rhs
            );
            self.record(
                site,
                None,
                lhs_len.to_string(),
                rhs_len.to_string(),
                "len",
                None,
            );
            self.reporter.fail(message);
        }
        outcome
    }

    fn record(
        &mut self,
        site: Site<'_>,
        index: Option<usize>,
        expected: String,
        actual: String,
        comparison: &'static str,
        slop: Option<f64>,
    ) {
        let entry = CheckLogEntry {
            suite: "lane_check",
            file: site.file.to_string(),
            line: site.line,
            lhs_expr: site.lhs.to_string(),
            rhs_expr: site.rhs.to_string(),
            index,
            expected,
            actual,
            comparison,
            slop,
            policy: self.reporter.policy().as_str(),
            label: self.label.clone(),
            reason_code: if index.is_some() {
                "lane_value_mismatch"
            } else {
                "lane_length_mismatch"
            },
        };
        // Logged before reporting: the fatal path does not come back.
        if let Err(err) = maybe_append_check_log(&entry) {
            self.reporter.note(err);
        }
    }
}

/// Float vector assertion capturing the call site and operand text.
///
/// `$precision` is a digit count: `5` compares with a slop of `1e-5`.
#[macro_export]
macro_rules! assert_equal_vf {
    ($checker:expr, $a:expr, $b:expr, $precision:expr) => {
        $checker.assert_equal_vf(
            $crate::Site::new(file!(), line!(), stringify!($a), stringify!($b)),
            &$a[..],
            &$b[..],
            $precision,
        )
    };
}

/// Exact integer vector assertion capturing the call site and operand text.
#[macro_export]
macro_rules! assert_equal_vi {
    ($checker:expr, $a:expr, $b:expr) => {
        $checker.assert_equal_vi(
            $crate::Site::new(file!(), line!(), stringify!($a), stringify!($b)),
            &$a[..],
            &$b[..],
        )
    };
}
