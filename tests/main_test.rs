mod server;

use metascope::cli::Cli;
use metascope::run;
use server::spawn_fixture_server;
use std::fs;
use std::process::Command;
use std::sync::atomic::Ordering;

#[tokio::test]
async fn test_invalid_url_no_protocol() {
    let args = Cli {
        urls: vec!["example.com".to_string()],
        output: "text".to_string(),
        save: None,
        timeout: 10,
        show_tags: false,
        verbose: false,
        config: None,
    };

    let result = run(args).await;
    assert!(
        result.is_err(),
        "Should return error for URL without protocol"
    );
    assert!(
        result
            .unwrap_err()
            .to_string()
            .contains("Invalid URL format"),
        "Error message should mention the invalid URL"
    );
}

#[tokio::test]
async fn test_invalid_url_scheme() {
    let args = Cli {
        urls: vec!["ftp://example.com".to_string()],
        output: "text".to_string(),
        save: None,
        timeout: 10,
        show_tags: false,
        verbose: false,
        config: None,
    };

    let result = run(args).await;
    assert!(
        result.is_err(),
        "Should return error for non-HTTP(S) scheme"
    );
    assert!(
        result
            .unwrap_err()
            .to_string()
            .contains("Invalid URL format"),
        "Error message should mention the invalid URL"
    );
}

#[tokio::test]
async fn test_analyze_with_text_output() {
    let (base_url, _hits) = spawn_fixture_server().await;

    let args = Cli {
        urls: vec![format!("{}/optimized", base_url)],
        output: "text".to_string(),
        save: None,
        timeout: 10,
        show_tags: false,
        verbose: false,
        config: None,
    };

    let result = run(args).await;
    assert!(result.is_ok(), "Should analyze with text output");
}

#[tokio::test]
async fn test_analyze_with_json_output() {
    let (base_url, _hits) = spawn_fixture_server().await;

    let args = Cli {
        urls: vec![format!("{}/optimized", base_url)],
        output: "json".to_string(),
        save: None,
        timeout: 10,
        show_tags: false,
        verbose: false,
        config: None,
    };

    let result = run(args).await;
    assert!(result.is_ok(), "Should analyze with JSON output");
}

#[tokio::test]
async fn test_analyze_with_save_file() {
    let (base_url, _hits) = spawn_fixture_server().await;
    let test_filename = "test_report.json";

    let _ = fs::remove_file(test_filename);

    let args = Cli {
        urls: vec![format!("{}/optimized", base_url)],
        output: "text".to_string(),
        save: Some(test_filename.to_string()),
        timeout: 10,
        show_tags: false,
        verbose: false,
        config: None,
    };

    let result = run(args).await;
    assert!(result.is_ok(), "Should analyze and save file");

    let file_content = fs::read_to_string(test_filename).expect("Failed to read report file");
    let value: serde_json::Value =
        serde_json::from_str(&file_content).expect("Saved file should contain valid JSON");

    let analyses = value.as_array().expect("Saved report should be a JSON array");
    assert_eq!(analyses.len(), 1);
    assert_eq!(analyses[0]["score"], 100);
    assert!(analyses[0].get("tagRecord").is_some());
    assert!(analyses[0].get("tagSummary").is_some());
    assert!(analyses[0]["tagRecord"].get("openGraphTags").is_some());

    let _ = fs::remove_file(test_filename);
}

#[tokio::test]
async fn test_analyze_with_verbose_flag() {
    let (base_url, _hits) = spawn_fixture_server().await;

    let args = Cli {
        urls: vec![format!("{}/partial", base_url)],
        output: "text".to_string(),
        save: None,
        timeout: 10,
        show_tags: false,
        verbose: true,
        config: None,
    };

    let result = run(args).await;
    assert!(result.is_ok(), "Should analyze with verbose output");
}

#[tokio::test]
async fn test_analyze_with_show_tags_flag() {
    let (base_url, _hits) = spawn_fixture_server().await;

    let args = Cli {
        urls: vec![format!("{}/optimized", base_url)],
        output: "text".to_string(),
        save: None,
        timeout: 10,
        show_tags: true,
        verbose: false,
        config: None,
    };

    let result = run(args).await;
    assert!(result.is_ok(), "Should analyze with tag dump enabled");
}

#[tokio::test]
async fn test_analyze_multiple_urls() {
    let (base_url, _hits) = spawn_fixture_server().await;

    let args = Cli {
        urls: vec![
            format!("{}/optimized", base_url),
            format!("{}/partial", base_url),
            format!("{}/empty-head", base_url),
        ],
        output: "text".to_string(),
        save: None,
        timeout: 10,
        show_tags: false,
        verbose: false,
        config: None,
    };

    let result = run(args).await;
    assert!(result.is_ok(), "Should analyze several URLs in one run");
}

#[tokio::test]
async fn test_duplicate_urls_resolve_from_cache() {
    let (base_url, hits) = spawn_fixture_server().await;
    let url = format!("{}/counted", base_url);

    let args = Cli {
        urls: vec![url.clone(), url.clone(), format!("{url}#section")],
        output: "text".to_string(),
        save: None,
        timeout: 10,
        show_tags: false,
        verbose: false,
        config: None,
    };

    let result = run(args).await;
    assert!(result.is_ok(), "Should analyze duplicate URLs");
    assert_eq!(
        hits.load(Ordering::SeqCst),
        1,
        "Repeated URLs should be served from the cache"
    );
}

#[tokio::test]
async fn test_mixed_success_and_failure_continues() {
    let (base_url, _hits) = spawn_fixture_server().await;

    let args = Cli {
        urls: vec![
            format!("{}/optimized", base_url),
            format!("{}/not-found", base_url),
        ],
        output: "text".to_string(),
        save: None,
        timeout: 10,
        show_tags: false,
        verbose: false,
        config: None,
    };

    let result = run(args).await;
    assert!(
        result.is_ok(),
        "A failing URL should not sink the rest of the batch"
    );
}

#[tokio::test]
async fn test_all_urls_failing_is_an_error() {
    let (base_url, _hits) = spawn_fixture_server().await;

    let args = Cli {
        urls: vec![
            format!("{}/not-found", base_url),
            format!("{}/server-error", base_url),
        ],
        output: "text".to_string(),
        save: None,
        timeout: 10,
        show_tags: false,
        verbose: false,
        config: None,
    };

    let result = run(args).await;
    assert!(result.is_err(), "Should fail when every URL fails");
    assert!(
        result
            .unwrap_err()
            .to_string()
            .contains("all 2 URLs failed"),
        "Error should report how many URLs failed"
    );
}

#[tokio::test]
async fn test_single_url_failure_propagates_fetch_error() {
    let (base_url, _hits) = spawn_fixture_server().await;

    let args = Cli {
        urls: vec![format!("{}/not-found", base_url)],
        output: "text".to_string(),
        save: None,
        timeout: 10,
        show_tags: false,
        verbose: false,
        config: None,
    };

    let result = run(args).await;
    assert!(result.is_err(), "Should fail for a single failing URL");
    assert!(
        result
            .unwrap_err()
            .to_string()
            .contains("Failed to fetch the website"),
        "Error should carry the fetch failure"
    );
}

#[tokio::test]
async fn test_analyze_with_all_flags_combined() {
    let (base_url, _hits) = spawn_fixture_server().await;
    let test_filename = "test_report_combined.json";

    let _ = fs::remove_file(test_filename);

    let args = Cli {
        urls: vec![
            format!("{}/optimized", base_url),
            format!("{}/partial", base_url),
        ],
        output: "json".to_string(),
        save: Some(test_filename.to_string()),
        timeout: 10,
        show_tags: true,
        verbose: true,
        config: None,
    };

    let result = run(args).await;
    assert!(result.is_ok(), "Should analyze with all flags enabled");

    let file_content = fs::read_to_string(test_filename).expect("Failed to read report file");
    let value: serde_json::Value =
        serde_json::from_str(&file_content).expect("Saved file should contain valid JSON");
    assert_eq!(value.as_array().map(|a| a.len()), Some(2));

    let _ = fs::remove_file(test_filename);
}

#[tokio::test]
async fn test_analyze_with_default_text_output() {
    let (base_url, _hits) = spawn_fixture_server().await;

    let args = Cli {
        urls: vec![format!("{}/optimized", base_url)],
        output: "anything_else".to_string(),
        save: None,
        timeout: 10,
        show_tags: false,
        verbose: false,
        config: None,
    };

    let result = run(args).await;
    assert!(
        result.is_ok(),
        "Non-json output values should fall back to text"
    );
}

#[test]
fn test_binary_with_invalid_url() {
    let output = Command::new("cargo")
        .args(["run", "--", "example.com"])
        .output()
        .expect("Failed to run binary");

    assert!(!output.status.success(), "Should exit with error code");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("Invalid URL format"),
        "Error message should mention the invalid URL"
    );
}

#[test]
fn test_binary_with_valid_url() {
    let output = Command::new("cargo")
        .args(["run", "--", "https://example.com", "--timeout", "5"])
        .output()
        .expect("Failed to run binary");

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        !stderr.contains("Invalid URL format"),
        "Should not fail URL validation for a valid URL"
    );
}

#[tokio::test]
async fn test_analyze_with_config_file_verbose() {
    use tempfile::tempdir;

    let (base_url, _hits) = spawn_fixture_server().await;

    let dir = tempdir().unwrap();
    let config_path = dir.path().join("test_config.json");

    let json_content = r#"{
        "timeout": 15,
        "verbose": true
    }"#;

    fs::write(&config_path, json_content).unwrap();

    let args = Cli {
        urls: vec![format!("{}/optimized", base_url)],
        output: "text".to_string(),
        save: None,
        timeout: 30,
        show_tags: false,
        verbose: false,
        config: Some(config_path.to_str().unwrap().to_string()),
    };

    let result = run(args).await;
    assert!(
        result.is_ok(),
        "Should analyze with settings from a config file"
    );
}

#[tokio::test]
async fn test_config_merge_with_cli() {
    use tempfile::tempdir;

    let (base_url, _hits) = spawn_fixture_server().await;

    let dir = tempdir().unwrap();
    let config_path = dir.path().join("test_config.json");

    // Config file sets a long timeout, but the CLI overrides it
    let json_content = r#"{
        "timeout": 120,
        "show_tags": true
    }"#;

    fs::write(&config_path, json_content).unwrap();

    let args = Cli {
        urls: vec![format!("{}/optimized", base_url)],
        output: "text".to_string(),
        save: None,
        timeout: 5,
        show_tags: false,
        verbose: false,
        config: Some(config_path.to_str().unwrap().to_string()),
    };

    let result = run(args).await;
    assert!(
        result.is_ok(),
        "Should successfully merge config with CLI args"
    );
}

#[tokio::test]
#[serial_test::serial]
async fn test_load_default_config_with_verbose() {
    use std::env;
    use tempfile::tempdir;

    let (base_url, _hits) = spawn_fixture_server().await;

    // Run from a temporary directory holding a default config file
    let temp_dir = tempdir().unwrap();
    let original_dir = env::current_dir().unwrap();
    env::set_current_dir(&temp_dir).unwrap();

    let config_path = temp_dir.path().join("metascope.json");
    let json_content = r#"{
        "timeout": 15
    }"#;
    fs::write(&config_path, json_content).unwrap();

    let args = Cli {
        urls: vec![format!("{}/optimized", base_url)],
        output: "text".to_string(),
        save: None,
        timeout: 30,
        show_tags: false,
        verbose: true,
        config: None,
    };

    let result = run(args).await;
    assert!(
        result.is_ok(),
        "Should load the config found on the default path"
    );

    env::set_current_dir(&original_dir).ok();
}
