use super::*;

#[test]
fn summarize_reads_source_from_stdin() {
    let ctx = TestContext::new();
    let backend = StubBackend::start();

    let result = ctx.run_with_stdin(
        &["summarize", "--backend-url", &backend.url],
        "fn add(a: i32, b: i32) -> i32 { a + b }\n",
    );

    assert_success(&result);
    assert_output_contains(&result, "# Code Explainer");
    assert_output_contains(&result, "Adds two numbers.");
    assert_output_contains(&result, "1. pure function");
    assert_output_contains(&result, "2. no overflow checks");
}

#[test]
fn explain_alias_hits_the_summarize_endpoint() {
    let ctx = TestContext::new();
    let backend = StubBackend::start();

    let result = ctx.run(&[
        "explain",
        "--backend-url",
        &backend.url,
        "--code",
        "fn add(a: i32, b: i32) -> i32 { a + b }",
    ]);

    assert_success(&result);
    assert_output_contains(&result, "Adds two numbers.");
}

#[test]
fn optimize_shows_complexity_before_and_after() {
    let ctx = TestContext::new();
    let backend = StubBackend::start();

    let result = ctx.run(&[
        "optimize",
        "--backend-url",
        &backend.url,
        "--code",
        "for i in v { for j in v { s += j } }",
    ]);

    assert_success(&result);
    assert_output_contains(&result, "# Code Optimizer");
    assert_output_contains(&result, "**Complexity:** O(n^2) -> O(n)");
    assert_output_contains(&result, "v.iter().sum()");
    assert_output_contains(&result, "- replaced the nested loop with a single pass");
}

#[test]
fn scan_reports_injection_risk() {
    let ctx = TestContext::new();
    let backend = StubBackend::start();

    let result = ctx.run(&[
        "scan",
        "--backend-url",
        &backend.url,
        "--code",
        "eval(input())",
    ]);

    assert_success(&result);
    assert_output_contains(&result, "# Security Scanner");
    assert_output_contains(&result, "Vulnerabilities: 1");
    assert_output_contains(&result, "[High] line 1 (Code Injection)");
}

#[test]
fn security_scan_alias_and_clean_code() {
    let ctx = TestContext::new();
    let backend = StubBackend::start();

    let result = ctx.run(&[
        "security-scan",
        "--backend-url",
        &backend.url,
        "--code",
        "print('hello')",
    ]);

    assert_success(&result);
    assert_output_contains(&result, "Vulnerabilities: 0");
    assert_output_contains(&result, "No vulnerabilities were reported.");
}

#[test]
fn uploaded_file_keeps_its_name() {
    let ctx = TestContext::new();
    let backend = StubBackend::start();
    ctx.write_file("src/app.py", b"print('hi')\n");

    let result = ctx.run(&[
        "summarize",
        "--backend-url",
        &backend.url,
        "--file",
        "src/app.py",
    ]);

    assert_success(&result);
    assert_output_contains(&result, "app.py:12");
}

#[test]
fn two_megabyte_upload_is_scanned() {
    let ctx = TestContext::new();
    let backend = StubBackend::start();
    ctx.write_file("big.js", &vec![b'a'; 2 * 1024 * 1024]);

    let result = ctx.run(&["scan", "--backend-url", &backend.url, "-f", "big.js"]);

    assert_success(&result);
    assert_output_contains(&result, "Vulnerabilities: 0");
    assert_eq!(backend.hits(), 1);
}

#[test]
fn json_output_is_the_unwrapped_result() {
    let ctx = TestContext::new();
    let backend = StubBackend::start();

    let result = ctx.run(&[
        "analyze",
        "--backend-url",
        &backend.url,
        "--code",
        "x.foo()",
        "--output",
        "json",
    ]);

    assert_success(&result);

    let parsed: Value = serde_json::from_str(&result.stdout).expect("stdout should be JSON");
    assert_eq!(parsed, analysis_payload()["analysis"]);
}

#[test]
fn output_format_from_config_applies() {
    let ctx = TestContext::new();
    let backend = StubBackend::start();

    assert_success(&ctx.run(&["config", "set-output", "json"]));

    let result = ctx.run(&[
        "optimize",
        "--backend-url",
        &backend.url,
        "--code",
        "loop {}",
    ]);

    assert_success(&result);
    let parsed: Value = serde_json::from_str(&result.stdout).expect("stdout should be JSON");
    assert_eq!(parsed["complexity_analysis"]["after"], "O(n)");
}

#[test]
fn report_is_written_next_to_output() {
    let ctx = TestContext::new();
    let backend = StubBackend::start();

    let result = ctx.run(&[
        "analyze",
        "--backend-url",
        &backend.url,
        "--code",
        "x.foo()",
        "--report-out",
        "reports/analysis.md",
    ]);

    assert_success(&result);
    assert_stderr_contains(&result, "Report written to:");

    let report = ctx.read_file("reports/analysis.md");
    assert!(report.starts_with("# Code Analyzer"));
    assert!(report.contains("Generated at"));
    assert!(report.contains(&format!("{}/analyze", backend.url)));
    assert!(report.contains("Bugs found: 1"));
}

#[test]
fn configured_backend_is_used_without_flag() {
    let ctx = TestContext::new();
    let backend = StubBackend::start();

    let result = ctx.run(&["config", "set-backend", &format!("{}/", backend.url)]);
    assert_success(&result);
    assert_output_contains(&result, &format!("Backend: {}", backend.url));

    let result = ctx.run(&["analyze", "--code", "x.foo()"]);

    assert_success(&result);
    assert_output_contains(&result, "Bugs found: 1");
    assert_eq!(backend.hits(), 1);
}
