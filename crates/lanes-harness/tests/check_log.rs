use lanes_check::{
    Checker, FailurePolicy, FailureReporter, assert_equal_vi, check_log_path, set_check_log_path,
};
use lanes_harness::{AccelPath, Binding, HarnessConfig, TestRegistry, Variant, run_registry};
use std::path::PathBuf;
use std::sync::{Mutex, PoisonError};
use std::time::{SystemTime, UNIX_EPOCH};

// The log path is process-wide; tests touching it run one at a time.
static LOG_PATH_LOCK: Mutex<()> = Mutex::new(());

fn fresh_log_path(name: &str) -> PathBuf {
    let ts = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |duration| duration.as_nanos());
    std::env::temp_dir().join(format!("lanes_{name}_{ts}/check.jsonl"))
}

fn read_entries(log_path: &PathBuf) -> Vec<serde_json::Value> {
    let raw = std::fs::read_to_string(log_path).expect("check log should exist");
    raw.lines()
        .map(|line| serde_json::from_str(line).expect("valid json line"))
        .collect()
}

fn remove_log_dir(log_path: &PathBuf) {
    if let Some(parent) = log_path.parent() {
        let _ = std::fs::remove_dir_all(parent);
    }
}

fn off_by_one_lane(checker: &mut Checker) {
    let got = [4_i8, 5];
    let want = [4_i8, 6];
    assert_equal_vi!(checker, got, want);
}

#[test]
fn mismatches_are_appended_as_jsonl() {
    let _guard = LOG_PATH_LOCK.lock().unwrap_or_else(PoisonError::into_inner);
    let log_path = fresh_log_path("check_log");
    set_check_log_path(Some(log_path.clone()));
    assert_eq!(check_log_path(), Some(log_path.clone()));

    let reporter = FailureReporter::with_sink(FailurePolicy::NonFatal, std::io::sink());
    let mut checker = Checker::new(reporter).with_label("emul/cpp");
    let got = [1_u16, 9, 3];
    let want = [1_u16, 2, 4];
    assert_equal_vi!(checker, got, want);
    set_check_log_path(None);

    let entries = read_entries(&log_path);
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0]["index"], 1);
    assert_eq!(entries[0]["expected"], "9");
    assert_eq!(entries[0]["actual"], "2");
    assert_eq!(entries[0]["lhs_expr"], "got");
    assert_eq!(entries[0]["label"], "emul/cpp");
    assert_eq!(entries[0]["policy"], "non_fatal");
    assert_eq!(entries[1]["index"], 2);
    assert_eq!(entries[1]["reason_code"], "lane_value_mismatch");

    remove_log_dir(&log_path);
}

#[test]
fn registry_run_logs_to_the_configured_path() {
    let _guard = LOG_PATH_LOCK.lock().unwrap_or_else(PoisonError::into_inner);
    let log_path = fresh_log_path("registry_log");
    let variant = Variant::new(AccelPath::Native, Binding::Cpp);
    let config = HarnessConfig {
        policy: FailurePolicy::NonFatal,
        variant,
        check_log_path: Some(log_path.clone()),
        ..HarnessConfig::new()
    };
    let mut registry = TestRegistry::new(variant);
    registry
        .register("shift", off_by_one_lane)
        .expect("register shift");

    let results = run_registry(&registry, &config);
    set_check_log_path(None);

    assert_eq!(results, vec![("/shift/native/cpp".to_string(), 1)]);
    let entries = read_entries(&log_path);
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["index"], 1);
    assert_eq!(entries[0]["label"], "native/cpp");

    remove_log_dir(&log_path);
}
