use std::process::{Command, Output};

fn shared_sum(vars: &[(&str, &str)]) -> Output {
    let mut command = Command::new(env!("CARGO_BIN_EXE_shared_sum"));
    for var in ["SIZE", "NUM_THREADS", "SEED", "RUST_LOG"] {
        command.env_remove(var);
    }
    command.envs(vars.iter().copied());
    command.output().expect("failed to launch shared_sum")
}

fn assert_config_error(output: &Output) {
    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty(), "no report after an error");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.starts_with("Error: "), "stderr was {:?}", stderr);
}

#[test]
fn non_positive_thread_counts_fail() {
    for threads in ["0", "-3"] {
        let output = shared_sum(&[("SIZE", "100000"), ("NUM_THREADS", threads)]);
        assert_config_error(&output);
        assert!(String::from_utf8_lossy(&output.stderr).contains("NUM_THREADS"));
    }
}

#[test]
fn missing_variables_fail() {
    assert_config_error(&shared_sum(&[("SIZE", "100000")]));
    assert_config_error(&shared_sum(&[("NUM_THREADS", "2")]));
    assert_config_error(&shared_sum(&[("SIZE", "lots"), ("NUM_THREADS", "2")]));
}

#[test]
fn size_out_of_range_fails() {
    for size in ["99999", "10000001"] {
        let output = shared_sum(&[("SIZE", size), ("NUM_THREADS", "2")]);
        assert_config_error(&output);
        assert!(String::from_utf8_lossy(&output.stderr).contains("SIZE"));
    }
}

#[test]
fn small_run_reports_speedup() {
    let output = shared_sum(&[("SIZE", "100000"), ("NUM_THREADS", "2"), ("SEED", "1")]);
    assert_eq!(output.status.code(), Some(0), "{:?}", output);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Array size: 100000"));
    assert!(stdout.contains("Number of threads: 2"));
    assert!(stdout.contains("Speedup:"));
    assert!(output.stderr.is_empty());
}
