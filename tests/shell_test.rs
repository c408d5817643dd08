use nexoform::adapters::shell;
use nexoform::{CommandResult, ExitStatus};

#[test]
fn captured_mode_keeps_exact_exit_code_and_stdout() {
    let result = shell::run_command("printf 'hello\\nworld'; exit 3", false).unwrap();

    assert_eq!(
        result,
        CommandResult {
            success: false,
            exit_status: ExitStatus::Exact(3),
            stdout: "hello\nworld".to_string(),
        }
    );
}

#[test]
fn captured_mode_reports_success_as_data() {
    let result = shell::run_command("true", false).unwrap();
    assert!(result.success);
    assert_eq!(result.exit_status, ExitStatus::Exact(0));
}

#[test]
fn loud_mode_collapses_exit_code_and_drops_stdout() {
    // Same command as the captured test: only success/failure survives.
    let result = shell::run_command_loud("printf 'hello\\nworld'; exit 3").unwrap();

    assert!(!result.success);
    assert_eq!(result.exit_status, ExitStatus::Unknown { success: false });
    assert_eq!(result.exit_status.to_string(), "1");
    assert_eq!(result.stdout, "");
}

#[test]
fn loud_mode_success_indicator() {
    let result = shell::run_command_loud("true").unwrap();
    assert!(result.success);
    assert_eq!(result.exit_status, ExitStatus::Unknown { success: true });
    assert_eq!(result.exit_status.to_string(), "0");
}

#[test]
fn double_quotes_in_command_survive_the_wrapper() {
    // The quotes must reach bash intact instead of ending the outer
    // double-quoted invocation early.
    let result = shell::run_command(r#"echo "hi there""#, false).unwrap();

    assert!(result.success);
    assert_eq!(result.stdout, "hi there\n");
}

#[test]
fn nonzero_exit_is_not_an_error() {
    let result = shell::run_command("exit 42", false).unwrap();
    assert!(!result.success);
    assert_eq!(result.exit_status, ExitStatus::Exact(42));
    assert_eq!(result.stdout, "");
}

#[test]
fn sh_runner_captures_like_bash_runner() {
    let result = shell::run_sh("printf ok; exit 5", false).unwrap();
    assert!(!result.success);
    assert_eq!(result.exit_status, ExitStatus::Exact(5));
    assert_eq!(result.stdout, "ok");
}
