//! Runs the `pravka` binary against small Russian texts and checks what a
//! user sees on stdout, stderr and in the exit code.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

// `cargo_bin` is deprecated only for custom target directories.
#[allow(deprecated)]
fn cmd() -> Command {
    Command::cargo_bin(env!("CARGO_PKG_NAME")).unwrap()
}

// =============================================================================
// Surface
// =============================================================================

#[test]
fn help_lists_every_subcommand() {
    let assert = cmd().arg("--help").assert().success();
    let stdout = String::from_utf8_lossy(&assert.get_output().stdout).into_owned();
    for sub in ["check", "correct", "readability", "punctuation", "info"] {
        assert!(stdout.contains(sub), "help is missing {sub}");
    }
}

#[test]
fn long_help_documents_environment() {
    cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("PRAVKA_DICTIONARY"))
        .stdout(predicate::str::contains("RUST_LOG"));
}

#[test]
fn version_flags() {
    for flag in ["--version", "-V"] {
        cmd()
            .arg(flag)
            .assert()
            .success()
            .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
    }
    cmd()
        .arg("--version-only")
        .assert()
        .success()
        .stdout(predicate::str::diff(format!("{}\n", env!("CARGO_PKG_VERSION"))));
}

#[test]
fn info_text_shows_settings() {
    cmd()
        .arg("info")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_NAME")))
        .stdout(predicate::str::contains("Max edit distance"))
        .stdout(predicate::str::contains("Input limit"));
}

#[test]
fn info_json_has_package_and_config() {
    let assert = cmd().args(["info", "--json"]).assert().success();
    let json = stdout_json(&assert);
    assert_eq!(json["name"], env!("CARGO_PKG_NAME"));
    assert_eq!(json["version"], env!("CARGO_PKG_VERSION"));
    assert!(json["config"]["context_width"].is_u64());
}

#[test]
fn global_flags_work_after_the_subcommand_too() {
    let flag_sets: [&[&str]; 7] = [
        &["-q"],
        &["--quiet"],
        &["-v"],
        &["-vv"],
        &["--color", "always"],
        &["--color", "never"],
        &["--color", "auto"],
    ];
    for flags in flag_sets {
        cmd().args(flags).arg("info").assert().success();
        cmd().arg("info").args(flags).assert().success();
    }
}

// =============================================================================
// Fixtures
// =============================================================================

const COMMA_TEXT: &str = "Я хотел пойти в кино но у меня не было времени";

const SPELLER_JSON: &str =
    r#"[{"code": 1, "pos": 2, "row": 0, "col": 2, "len": 3, "word": "сел", "s": ["съел"]}]"#;

const GRAMMAR_JSON: &str = r#"[{
    "message": "Прилагательное «красивая» не согласуется с существительным «утро» по роду",
    "offset": 0,
    "length": 8,
    "rule_id": "RU_GENDER_AGREEMENT"
}]"#;

/// Write `content` to `name` inside `dir` and return the path as a string.
fn write(dir: &Path, name: &str, content: &str) -> String {
    let path = dir.join(name);
    fs::write(&path, content).unwrap();
    path.to_str().unwrap().to_string()
}

fn stdout_json(assert: &assert_cmd::assert::Assert) -> serde_json::Value {
    let stdout = String::from_utf8_lossy(&assert.get_output().stdout);
    serde_json::from_str(&stdout).expect("output should be valid JSON")
}

// =============================================================================
// Check Command
// =============================================================================

#[test]
fn check_reports_missing_comma() {
    let tmp = TempDir::new().unwrap();
    let file = write(tmp.path(), "text.txt", COMMA_TEXT);

    cmd()
        .args(["check", &file])
        .assert()
        .success()
        .stdout(predicate::str::contains("19:3"))
        .stdout(predicate::str::contains("Я хотел пойти в кино, но у меня не было времени"));
}

#[test]
fn check_json_has_offsets_counts_and_correction() {
    let tmp = TempDir::new().unwrap();
    let file = write(tmp.path(), "text.txt", COMMA_TEXT);

    let assert = cmd().args(["--json", "check", &file]).assert().success();
    let json = stdout_json(&assert);

    assert_eq!(json["errors"][0]["offset"], 19);
    assert_eq!(json["errors"][0]["category"], "punctuation");
    assert_eq!(json["counts"]["punctuation"], 1);
    assert_eq!(
        json["corrected_text"],
        "Я хотел пойти в кино, но у меня не было времени"
    );
    assert!(json["readability"]["score"].as_f64().unwrap() > 0.0);
}

#[test]
fn check_uses_speller_report() {
    let tmp = TempDir::new().unwrap();
    let file = write(tmp.path(), "text.txt", "Я сел кашу");
    let speller = write(tmp.path(), "speller.json", SPELLER_JSON);

    let assert = cmd()
        .args(["--json", "check", &file, "--speller", &speller])
        .assert()
        .success();
    let json = stdout_json(&assert);

    assert_eq!(json["counts"]["spelling"], 1);
    assert_eq!(json["corrected_text"], "Я съел кашу");
}

#[test]
fn check_dictionary_flag_suppresses_words() {
    let tmp = TempDir::new().unwrap();
    let file = write(tmp.path(), "text.txt", "Я сел кашу");
    let speller = write(tmp.path(), "speller.json", SPELLER_JSON);
    let dictionary = write(tmp.path(), "words.txt", "съел\n");

    let assert = cmd()
        .args([
            "--json",
            "check",
            &file,
            "--speller",
            &speller,
            "--dictionary",
            &dictionary,
        ])
        .assert()
        .success();
    let json = stdout_json(&assert);

    assert_eq!(json["errors"].as_array().unwrap().len(), 0);
    assert_eq!(json["corrected_text"], "Я сел кашу");
    assert_eq!(json["suppressed"][0]["word"], "сел");
}

#[test]
fn check_configured_dictionary_resolves_next_to_config() {
    let tmp = TempDir::new().unwrap();
    write(tmp.path(), ".pravka.toml", r#"dictionary = "words.txt""#);
    write(tmp.path(), "words.txt", "съел\n");
    write(tmp.path(), "text.txt", "Я сел кашу");
    write(tmp.path(), "speller.json", SPELLER_JSON);

    let assert = cmd()
        .args([
            "-C",
            tmp.path().to_str().unwrap(),
            "--json",
            "check",
            "text.txt",
            "--speller",
            "speller.json",
        ])
        .assert()
        .success();
    let json = stdout_json(&assert);

    assert_eq!(json["corrected_text"], "Я сел кашу");
}

#[test]
fn check_grammar_report_fixes_agreement() {
    let tmp = TempDir::new().unwrap();
    let file = write(tmp.path(), "text.txt", "Красивая утро");
    let grammar = write(tmp.path(), "grammar.json", GRAMMAR_JSON);

    let assert = cmd()
        .args(["--json", "check", &file, "--grammar", &grammar])
        .assert()
        .success();
    let json = stdout_json(&assert);

    assert_eq!(json["counts"]["semantic"], 1);
    assert_eq!(json["corrected_text"], "Красивое утро");
}

#[test]
fn check_only_filters_categories() {
    let tmp = TempDir::new().unwrap();
    let file = write(tmp.path(), "text.txt", COMMA_TEXT);

    let assert = cmd()
        .args(["--json", "check", &file, "--only", "spelling"])
        .assert()
        .success();
    let json = stdout_json(&assert);

    assert_eq!(json["errors"].as_array().unwrap().len(), 0);
    assert_eq!(json["counts"]["punctuation"], 1);
}

#[test]
fn check_rejects_unknown_category() {
    cmd()
        .args(["check", "text.txt", "--only", "typos"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid value"));
}

#[test]
fn check_strict_fails_on_errors() {
    let tmp = TempDir::new().unwrap();
    let file = write(tmp.path(), "text.txt", COMMA_TEXT);

    cmd()
        .args(["check", &file, "--strict"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("1 error(s)"));
}

#[test]
fn check_strict_passes_clean_text() {
    let tmp = TempDir::new().unwrap();
    let file = write(tmp.path(), "text.txt", "Мама мыла раму.");

    cmd()
        .args(["check", &file, "--strict"])
        .assert()
        .success()
        .stdout(predicate::str::contains("no errors"));
}

#[test]
fn check_malformed_speller_json_fails() {
    let tmp = TempDir::new().unwrap();
    let file = write(tmp.path(), "text.txt", "текст");
    let speller = write(tmp.path(), "speller.json", "{oops");

    cmd()
        .args(["check", &file, "--speller", &speller])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to parse speller response"));
}

#[test]
fn check_missing_file_fails() {
    cmd()
        .args(["check", "/nonexistent/text.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to read"));
}

#[test]
fn check_enforces_input_limit() {
    let tmp = TempDir::new().unwrap();
    write(tmp.path(), ".pravka.toml", "max_input_bytes = 8");
    write(tmp.path(), "text.txt", COMMA_TEXT);

    cmd()
        .args(["-C", tmp.path().to_str().unwrap(), "check", "text.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("input too large"));
}

#[test]
fn disabled_input_limit_allows_large_files() {
    let tmp = TempDir::new().unwrap();
    write(
        tmp.path(),
        ".pravka.toml",
        "max_input_bytes = 8\ndisable_input_limit = true",
    );
    write(tmp.path(), "text.txt", COMMA_TEXT);

    cmd()
        .args(["-C", tmp.path().to_str().unwrap(), "check", "text.txt"])
        .assert()
        .success();
}

// =============================================================================
// Correct Command
// =============================================================================

#[test]
fn correct_prints_only_the_text() {
    let tmp = TempDir::new().unwrap();
    let file = write(tmp.path(), "text.txt", COMMA_TEXT);

    cmd()
        .args(["correct", &file])
        .assert()
        .success()
        .stdout(predicate::str::diff(
            "Я хотел пойти в кино, но у меня не было времени\n",
        ));
}

#[test]
fn correct_keeps_trailing_newline() {
    let tmp = TempDir::new().unwrap();
    let file = write(tmp.path(), "text.txt", "Он знает что я приду\n");

    cmd()
        .args(["correct", &file])
        .assert()
        .success()
        .stdout(predicate::str::diff("Он знает, что я приду\n"));
}

#[test]
fn correct_explain_goes_to_stderr() {
    let tmp = TempDir::new().unwrap();
    let file = write(tmp.path(), "text.txt", "Я сел кашу");
    let speller = write(tmp.path(), "speller.json", SPELLER_JSON);

    cmd()
        .args(["correct", &file, "--speller", &speller, "--explain"])
        .assert()
        .success()
        .stdout(predicate::str::diff("Я съел кашу\n"))
        .stderr(predicate::str::contains("съел"));
}

#[test]
fn correct_json_lists_applied_fixes() {
    let tmp = TempDir::new().unwrap();
    let file = write(tmp.path(), "text.txt", "Я сел кашу");
    let speller = write(tmp.path(), "speller.json", SPELLER_JSON);

    let assert = cmd()
        .args(["--json", "correct", &file, "--speller", &speller])
        .assert()
        .success();
    let json = stdout_json(&assert);

    assert_eq!(json["text"], "Я съел кашу");
    assert_eq!(json["applied"][0]["original"], "сел");
    assert_eq!(json["applied"][0]["replacement"], "съел");
    assert_eq!(json["applied"][0]["source"]["kind"], "suggestion");
}

// =============================================================================
// Readability Command
// =============================================================================

#[test]
fn readability_prints_score() {
    let tmp = TempDir::new().unwrap();
    let file = write(tmp.path(), "text.txt", "Мама мыла раму. Папа читал газету.");

    cmd()
        .args(["readability", &file])
        .assert()
        .success()
        .stdout(predicate::str::is_match(r"^0\.\d{2}\n").unwrap());
}

#[test]
fn readability_json_has_metrics() {
    let tmp = TempDir::new().unwrap();
    let file = write(tmp.path(), "text.txt", "Мама мыла раму. Папа читал газету.");

    let assert = cmd()
        .args(["--json", "readability", &file])
        .assert()
        .success();
    let json = stdout_json(&assert);

    assert_eq!(json["sentence_count"], 2);
    assert_eq!(json["word_count"], 6);
    assert_eq!(json["below_min"], false);
}

#[test]
fn readability_min_score_gate_fails() {
    let tmp = TempDir::new().unwrap();
    let file = write(tmp.path(), "text.txt", "Мама мыла раму.");

    cmd()
        .args(["readability", &file, "--min-score", "0.99"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("min: 0.99"));
}

#[test]
fn readability_min_score_gate_passes() {
    let tmp = TempDir::new().unwrap();
    let file = write(tmp.path(), "text.txt", "Мама мыла раму.");

    cmd()
        .args(["readability", &file, "--min-score", "0.1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("PASS:"));
}

#[test]
fn readability_min_score_from_config() {
    let tmp = TempDir::new().unwrap();
    write(tmp.path(), "pravka.toml", "min_score = 0.99");
    write(tmp.path(), "text.txt", "Мама мыла раму.");

    cmd()
        .args(["-C", tmp.path().to_str().unwrap(), "readability", "text.txt"])
        .assert()
        .failure();
}

#[test]
fn readability_empty_file_scores_zero() {
    let tmp = TempDir::new().unwrap();
    let file = write(tmp.path(), "empty.txt", "");

    cmd()
        .args(["readability", &file])
        .assert()
        .success()
        .stdout(predicate::str::diff("0.00\n"));
}

// =============================================================================
// Punctuation Command
// =============================================================================

#[test]
fn punctuation_lists_findings() {
    let tmp = TempDir::new().unwrap();
    let file = write(tmp.path(), "text.txt", COMMA_TEXT);

    cmd()
        .args(["punctuation", &file])
        .assert()
        .success()
        .stdout(predicate::str::contains("1 missing comma(s)"))
        .stdout(predicate::str::contains("COMMA_BEFORE_NO"));
}

#[test]
fn punctuation_json_is_array() {
    let tmp = TempDir::new().unwrap();
    let file = write(tmp.path(), "text.txt", COMMA_TEXT);

    let assert = cmd()
        .args(["--json", "punctuation", &file])
        .assert()
        .success();
    let json = stdout_json(&assert);

    assert_eq!(json[0]["offset"], 19);
    assert_eq!(json[0]["length"], 3);
    assert_eq!(json[0]["suggestion"], "о, н");
}

#[test]
fn punctuation_clean_text() {
    let tmp = TempDir::new().unwrap();
    let file = write(tmp.path(), "text.txt", "Но я пришёл.");

    cmd()
        .args(["punctuation", &file])
        .assert()
        .success()
        .stdout(predicate::str::contains("no missing commas"));
}

// =============================================================================
// Usage Errors
// =============================================================================

#[test]
fn bare_invocation_prints_usage() {
    cmd().assert().code(2).stderr(predicate::str::contains("Usage:"));
}

#[test]
fn unknown_subcommand_or_flag_is_rejected() {
    for arg in ["spellcheck", "--fix"] {
        cmd()
            .arg(arg)
            .assert()
            .failure()
            .stderr(predicate::str::contains("error:"));
    }
}

#[test]
fn check_requires_a_file() {
    cmd()
        .arg("check")
        .assert()
        .failure()
        .stderr(predicate::str::contains("<FILE>"));
}

#[test]
fn chdir_resolves_relative_paths() {
    let tmp = TempDir::new().unwrap();
    write(tmp.path(), "text.txt", COMMA_TEXT);
    cmd()
        .args(["-C", tmp.path().to_str().unwrap(), "punctuation", "text.txt"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1 missing comma"));
}

#[test]
fn chdir_to_missing_directory_fails() {
    cmd()
        .args(["-C", "/nonexistent/pravka/dir", "info"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to change directory"));
}
