use lanes_check::{
    Checker, FailurePolicy, FailureReporter, Slop, assert_equal_vf, assert_equal_vi,
};
use std::io::{self, Write};
use std::sync::{Arc, Mutex};

#[derive(Clone, Default)]
struct SharedSink(Arc<Mutex<Vec<u8>>>);

impl SharedSink {
    fn text(&self) -> String {
        String::from_utf8(self.0.lock().expect("sink lock").clone()).expect("utf8 sink")
    }
}

impl Write for SharedSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().expect("sink lock").extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

fn nonfatal_checker() -> (Checker, SharedSink) {
    let sink = SharedSink::default();
    let reporter = FailureReporter::with_sink(FailurePolicy::NonFatal, sink.clone());
    (Checker::new(reporter).with_label("native/c"), sink)
}

fn saturating_add_u8(a: &[u8], b: &[u8]) -> Vec<u8> {
    a.iter().zip(b).map(|(x, y)| x.saturating_add(*y)).collect()
}

fn scale_f32(a: &[f32], k: f32) -> Vec<f32> {
    a.iter().map(|x| x * k).collect()
}

#[test]
fn integer_mismatch_names_the_failing_lane() {
    let (mut checker, sink) = nonfatal_checker();
    let a = [1_u8, 2, 3];
    let b = [1_u8, 2, 4];
    let outcome = assert_equal_vi!(checker, a, b);

    assert_eq!(outcome.indices, vec![2]);
    assert_eq!(checker.failure_count(), 1);
    let text = sink.text();
    assert!(text.contains("assertion failed: a[2] != b[2] (3 != 4)"), "{text}");
    assert!(text.contains("kernel_checks.rs:"), "{text}");
}

#[test]
fn nan_lanes_compare_equal_to_nan() {
    let (mut checker, sink) = nonfatal_checker();
    let a = [f64::NAN, 1.0];
    let b = [f64::NAN, 1.0];
    let outcome = assert_equal_vf!(checker, a, b, 5);
    assert!(outcome.passed());
    assert!(sink.text().is_empty());
}

#[test]
fn kernel_output_is_checked_lane_by_lane() {
    let (mut checker, _sink) = nonfatal_checker();

    let got = saturating_add_u8(&[250, 1, 7, 0], &[10, 1, 1, 0]);
    let expected = [255_u8, 2, 8, 0];
    assert!(assert_equal_vi!(checker, got, expected).passed());

    let got = scale_f32(&[1.0, -2.5, f32::INFINITY, f32::NAN], 2.0);
    let expected = [2.0_f32, -5.0, f32::INFINITY, f32::NAN];
    assert!(assert_equal_vf!(checker, got, expected, 4).passed());

    let off_by_a_bit = [2.001_f32, -5.0, f32::INFINITY, f32::NAN];
    let outcome = assert_equal_vf!(checker, got, off_by_a_bit, 4);
    assert_eq!(outcome.indices, vec![0]);
    assert_eq!(checker.failure_count(), 1);
}

#[test]
fn explicit_slop_widens_the_window() {
    let (mut checker, _sink) = nonfatal_checker();
    let site = lanes_check::Site::new(file!(), line!(), "got", "want");
    let slop = Slop::new(0.01_f64).expect("slop");
    let outcome = checker.assert_close_vf(site, &[1.005_f64], &[1.0_f64], slop);
    assert!(outcome.passed());

    let outcome = checker.assert_close_vf(site, &[1.02_f64], &[1.0_f64], slop);
    assert_eq!(outcome.indices, vec![0]);
}

#[test]
fn nonfatal_run_reports_every_failure_and_keeps_going() {
    let (mut checker, sink) = nonfatal_checker();
    let a = [0_i32, 1, 2, 3];
    let b = [9_i32, 1, 9, 3];
    let outcome = assert_equal_vi!(checker, a, b);
    assert_eq!(outcome.indices, vec![0, 2]);

    let c = [1_i32, 2];
    let d = [1_i32, 2, 3];
    let outcome = assert_equal_vi!(checker, c, d);
    assert_eq!(outcome.length_mismatch, Some((2, 3)));
    assert_eq!(outcome.compared, 2);

    assert_eq!(checker.failure_count(), 3);
    assert_eq!(sink.text().lines().count(), 3);
}
