//! Integration tests for license-inventory
//!
//! These tests verify:
//! - Manifest detection and parsing across platforms
//! - Deduplication of identities
//! - The full pipeline against a scripted fetcher
//! - Ledger reconciliation across runs

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime};
use license_inventory::config::{InventoryConfig, SelectionMode};
use license_inventory::domain::{ManifestDependency, Platform};
use license_inventory::error::DownloadError;
use license_inventory::orchestrator::Inventory;
use license_inventory::registry::{FetchResponse, Fetcher};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

/// Test fixture directory creation helper
fn create_test_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp directory")
}

fn run_date(day: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 2, day)
        .unwrap()
        .and_hms_opt(9, 30, 0)
        .unwrap()
}

/// Serves canned responses by URL; unknown URLs answer 404
#[derive(Default)]
struct MapFetcher {
    responses: HashMap<String, FetchResponse>,
    requested: Mutex<Vec<String>>,
}

impl MapFetcher {
    fn with(mut self, url: &str, response: FetchResponse) -> Self {
        self.responses.insert(url.to_string(), response);
        self
    }

    fn requested(&self) -> Vec<String> {
        self.requested.lock().unwrap().clone()
    }
}

#[async_trait]
impl Fetcher for MapFetcher {
    async fn fetch(&self, url: &str) -> Result<FetchResponse, DownloadError> {
        self.requested.lock().unwrap().push(url.to_string());
        Ok(self
            .responses
            .get(url)
            .cloned()
            .unwrap_or_else(|| FetchResponse::new(404, "not found")))
    }
}

fn config(source: &Path, output: &Path) -> InventoryConfig {
    InventoryConfig {
        source_dir: source.to_path_buf(),
        output_dir: output.to_path_buf(),
        npm_delay_ms: 0,
        ..Default::default()
    }
}

mod manifest_parsing {
    use super::*;
    use license_inventory::manifest::{deduplicate, detect_manifests, parse_content};

    #[test]
    fn test_detect_manifests_recursively() {
        let temp_dir = create_test_dir();
        fs::create_dir_all(temp_dir.path().join("android/app")).unwrap();
        fs::create_dir_all(temp_dir.path().join("web")).unwrap();
        fs::write(temp_dir.path().join("android/app/build.gradle"), "").unwrap();
        fs::write(temp_dir.path().join("web/package.json"), "{}").unwrap();
        fs::write(temp_dir.path().join("README.md"), "").unwrap();

        let filenames: Vec<String> = Platform::all_manifest_filenames()
            .into_iter()
            .map(str::to_string)
            .collect();
        let manifests = detect_manifests(temp_dir.path(), &filenames, None);

        let mut platforms: Vec<Platform> = manifests.iter().map(|m| m.platform).collect();
        platforms.sort();
        assert_eq!(platforms, vec![Platform::Gradle, Platform::Npm]);
    }

    #[test]
    fn test_gradle_groovy_and_kotlin_notations() {
        let content = r#"
plugins {
    id 'com.android.application'
}

dependencies {
    implementation 'androidx.appcompat:appcompat:1.2.0'
    implementation("com.squareup.okhttp3:okhttp:4.12.0")
    implementation project(':core')
    /* testImplementation 'junit:junit:4.13.2' */
    androidTestImplementation('androidx.test.espresso:espresso-core:3.5.1') {
        exclude group: 'com.android.support'
    }
}
"#;
        let deps = parse_content(Platform::Gradle, content).unwrap();
        assert_eq!(
            deps,
            vec![
                ManifestDependency::new("appcompat").with_namespace("androidx/appcompat"),
                ManifestDependency::new("okhttp").with_namespace("com/squareup/okhttp3"),
            ]
        );
    }

    #[test]
    fn test_go_mod_skips_indirect() {
        let content = "module example.com/app\n\ngo 1.22\n\nrequire (\n\tgithub.com/spf13/cobra v1.8.0\n\tgolang.org/x/sys v0.15.0 // indirect\n)\n";
        let deps = parse_content(Platform::Go, content).unwrap();
        assert_eq!(deps, vec![ManifestDependency::new("github.com/spf13/cobra")]);
    }

    #[test]
    fn test_pubspec_top_level_entries_only() {
        let content = "name: app\ndependencies:\n  flutter:\n    sdk: flutter\n  provider: ^6.1.1\ndev_dependencies:\n  mockito: 5.4.4\n";
        let deps = parse_content(Platform::Flutter, content).unwrap();
        let names: Vec<_> = deps.iter().map(|d| d.component.as_str()).collect();
        assert_eq!(names, vec!["flutter", "provider", "mockito"]);
    }

    #[test]
    fn test_unterminated_block_comment_fails() {
        let content = "module x\n/* open\nrequire (\n)\n";
        assert!(parse_content(Platform::Go, content).is_err());
    }

    #[test]
    fn test_deduplicate_across_manifests() {
        let first = parse_content(Platform::Cargo, "[[package]]\nname = \"serde\"\n\n[[package]]\nname = \"anyhow\"\n").unwrap();
        let second = parse_content(Platform::Cargo, "[[package]]\nname = \"serde\"\n").unwrap();

        let merged = deduplicate(first.into_iter().chain(second));
        assert_eq!(
            merged,
            vec![ManifestDependency::new("anyhow"), ManifestDependency::new("serde")]
        );
        assert_eq!(deduplicate(merged.clone()), merged);
    }
}

mod pipeline {
    use super::*;

    const NPM_PAGE: &str = r#"<html><body>
<h3>Readme</h3><p>Utility library</p>
<h3>License</h3><p>MIT</p>
</body></html>"#;

    const GITHUB_SEARCH: &str = r#"{"total_count": 3, "items": [
{"name": "appcompat", "license": {"name": "Apache License 2.0"}}
]}"#;

    #[tokio::test]
    async fn test_full_run_writes_ledgers_and_documents() {
        let source = create_test_dir();
        let output = create_test_dir();
        fs::write(
            source.path().join("package.json"),
            "{\n  \"dependencies\": {\n    \"lodash\": \"^4.17.21\"\n  },\n  \"devDependencies\": {\n    \"left-pad\": \"1.3.0\"\n  }\n}\n",
        )
        .unwrap();
        fs::write(
            source.path().join("build.gradle"),
            "dependencies {\n    implementation 'androidx.appcompat:appcompat:1.2.0'\n}\n",
        )
        .unwrap();

        let fetcher = Arc::new(
            MapFetcher::default()
                .with("https://www.npmjs.com/package/lodash", FetchResponse::new(200, NPM_PAGE))
                .with(
                    "https://api.github.com/search/repositories?q=appcompat",
                    FetchResponse::new(200, GITHUB_SEARCH),
                ),
        );
        let inventory = Inventory::with_fetcher(config(source.path(), output.path()), fetcher.clone());
        let report = inventory.run_at(run_date(22), false).await.unwrap();

        assert_eq!(report.total_resolved(), 2);
        assert_eq!(report.total_unresolved(), 1);
        assert!(report.has_failures());

        let npm = fs::read_to_string(output.path().join("licenses_npm.txt")).unwrap();
        assert!(npm.contains("Date: 2024-02-22T09:30:00\nlodash : MIT\n"));
        let npm_errors = fs::read_to_string(output.path().join("errors_npm.txt")).unwrap();
        assert_eq!(npm_errors, "Date: 2024-02-22T09:30:00\nerror code=404 : left-pad\n");

        let gradle = fs::read_to_string(output.path().join("licenses_gradle.txt")).unwrap();
        assert!(gradle.contains("appcompat : androidx/appcompat : appcompat : Apache License 2.0"));

        assert!(output.path().join("npm").join("lodash.html").exists());
        assert!(output.path().join("gradle").join("appcompat_github.json").exists());
    }

    #[tokio::test]
    async fn test_error_ceiling_stops_requests() {
        let source = create_test_dir();
        let output = create_test_dir();
        fs::write(
            source.path().join("Cargo.lock"),
            "[[package]]\nname = \"a\"\n\n[[package]]\nname = \"b\"\n\n[[package]]\nname = \"c\"\n",
        )
        .unwrap();

        let fetcher = Arc::new(MapFetcher::default());
        let config = InventoryConfig {
            max_errors: 1,
            ..config(source.path(), output.path())
        };
        let report = Inventory::with_fetcher(config, fetcher.clone())
            .run_at(run_date(22), false)
            .await
            .unwrap();

        assert_eq!(fetcher.requested(), vec!["https://crates.io/api/v1/crates/a".to_string()]);
        assert!(report.platform(Platform::Cargo).unwrap().halted);

        let errors = fs::read_to_string(output.path().join("errors_cargo.txt")).unwrap();
        assert_eq!(
            errors,
            "Date: 2024-02-22T09:30:00\n\
             error code=404 : a\n\
             error code=successive authorized errors : b\n\
             error code=successive authorized errors : c\n"
        );
    }

    #[tokio::test]
    async fn test_rate_limit_notice_reported() {
        let source = create_test_dir();
        let output = create_test_dir();
        fs::write(source.path().join("Podfile"), "pod 'Alamofire', '~> 5.8'\n").unwrap();

        let fetcher = Arc::new(MapFetcher::default().with(
            "https://cocoapods.org/pods/Alamofire",
            FetchResponse::new(429, "").with_retry_after("120"),
        ));
        let report = Inventory::with_fetcher(config(source.path(), output.path()), fetcher)
            .run_at(run_date(22), false)
            .await
            .unwrap();

        assert_eq!(report.retry_notices.len(), 1);
        assert_eq!(report.retry_notices[0].component, "Alamofire");
        assert_eq!(report.retry_notices[0].status, 429);
        assert_eq!(report.retry_notices[0].delay, "0:03:00");
    }

    #[tokio::test]
    async fn test_second_run_reconciles_errors() {
        let source = create_test_dir();
        let output = create_test_dir();
        fs::write(
            source.path().join("Cargo.lock"),
            "[[package]]\nname = \"serde\"\n\n[[package]]\nname = \"tokio\"\n",
        )
        .unwrap();

        // First run: tokio fails
        let first = Arc::new(MapFetcher::default().with(
            "https://crates.io/api/v1/crates/serde",
            FetchResponse::new(200, r#"{"crate":{"license":"MIT OR Apache-2.0"}}"#),
        ));
        Inventory::with_fetcher(config(source.path(), output.path()), first)
            .run_at(run_date(21), false)
            .await
            .unwrap();
        let errors = fs::read_to_string(output.path().join("errors_cargo.txt")).unwrap();
        assert!(errors.contains("error code=404 : tokio"));

        // Second run, errors only: tokio resolves
        let second = Arc::new(MapFetcher::default().with(
            "https://crates.io/api/v1/crates/tokio",
            FetchResponse::new(200, r#"{"crate":{"license":"MIT"}}"#),
        ));
        let config = InventoryConfig {
            mode: SelectionMode::Errors,
            ..config(source.path(), output.path())
        };
        Inventory::with_fetcher(config, second.clone())
            .run_at(run_date(22), false)
            .await
            .unwrap();

        assert_eq!(second.requested(), vec!["https://crates.io/api/v1/crates/tokio".to_string()]);
        let errors = fs::read_to_string(output.path().join("errors_cargo.txt")).unwrap();
        assert_eq!(errors, "");
        let licenses = fs::read_to_string(output.path().join("licenses_cargo.txt")).unwrap();
        assert!(licenses.contains("Date: 2024-02-21T09:30:00\nserde : MIT OR Apache-2.0\n"));
        assert!(licenses.contains("Date: 2024-02-22T09:30:00\ntokio : MIT\n"));
    }
}

mod retry_after {
    use chrono::{TimeZone, Utc};
    use license_inventory::registry::parse_retry_after;

    #[test]
    fn test_http_date_and_seconds() {
        let now = Utc.with_ymd_and_hms(2024, 2, 14, 17, 0, 0).unwrap();

        let retry = parse_retry_after("Wed, 14 Feb 2024 18:00:00 GMT", now).unwrap();
        assert_eq!(retry.at_label(), "2024-02-14 18:00:00");
        assert_eq!(retry.delay_label(), "1:01:00");

        let retry = parse_retry_after("120", now).unwrap();
        assert_eq!(retry.delay_label(), "0:03:00");

        assert!(parse_retry_after("soon", now).is_none());
    }
}
