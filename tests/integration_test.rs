use assert_cmd::Command;
use assert_cmd::cargo;
use mockito::Server;
use tempfile::tempdir;

const PAGE: &str = r##"<!DOCTYPE html>
<html>
<head><title>Pixi Studio</title></head>
<body>
  <h1 data-version>Pixi Studio v2.9.80</h1>
  <p data-version>Download v2.9.80 now</p>
  <div class="downloads">
    <a data-file="mac-intel" href="#">macOS Intel <span data-info="size">-- MB</span> <span data-info="date">--</span></a>
    <a data-file="mac-arm" href="#">macOS ARM <span data-info="size">-- MB</span> <span data-info="date">--</span></a>
    <a data-file="win-setup" href="#">Windows Setup <span data-info="size">-- MB</span> <span data-info="date">--</span></a>
    <a data-file="win-portable" href="#">Windows Portable <span data-info="size">-- MB</span></a>
  </div>
</body>
</html>
"##;

fn release_body(url: &str) -> String {
    format!(
        r#"{{
            "tag_name": "v2.9.87",
            "assets": [
                {{
                    "name": "Pixi.Studio-2.9.87-mac.zip",
                    "size": 104857600,
                    "updated_at": "2024-03-05T10:00:00Z",
                    "browser_download_url": "{url}/dl/Pixi.Studio-2.9.87-mac.zip"
                }},
                {{
                    "name": "Pixi.Studio-2.9.87-arm64-mac.zip",
                    "size": 1500000,
                    "updated_at": "2024-03-06T10:00:00Z",
                    "browser_download_url": "{url}/dl/Pixi.Studio-2.9.87-arm64-mac.zip"
                }},
                {{
                    "name": "PIXI-STUDIO-Setup-2.9.87.exe",
                    "size": 1048576,
                    "updated_at": "2024-03-07T10:00:00Z",
                    "browser_download_url": "{url}/dl/PIXI-STUDIO-Setup-2.9.87.exe"
                }},
                {{
                    "name": "PIXI-STUDIO-Portable-2.9.87.exe",
                    "size": 52428800,
                    "updated_at": "2024-03-08T10:00:00Z",
                    "browser_download_url": "{url}/dl/PIXI-STUDIO-Portable-2.9.87.exe"
                }},
                {{
                    "name": "latest.yml",
                    "size": 340,
                    "updated_at": "2024-03-08T10:00:00Z",
                    "browser_download_url": "{url}/dl/latest.yml"
                }}
            ]
        }}"#
    )
}

fn dlpage() -> Command {
    let mut cmd = Command::new(cargo::cargo_bin!("dlpage"));
    cmd.env_remove("GITHUB_TOKEN").env_remove("DLPAGE_REPO");
    cmd
}

#[test]
fn test_end_to_end_update() {
    let mut server = Server::new();
    let url = server.url();

    let mock = server
        .mock("GET", "/repos/ObaWan/pixistudio-updates/releases/latest")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(release_body(&url))
        .expect(1)
        .create();

    let dir = tempdir().unwrap();
    let page = dir.path().join("index.html");
    std::fs::write(&page, PAGE).unwrap();

    dlpage()
        .arg("update")
        .arg(&page)
        .arg("--api-url")
        .arg(&url)
        .assert()
        .success()
        .stdout(predicates::str::contains("macOS ARM"))
        .stdout(predicates::str::contains("Pixi.Studio-2.9.87-arm64-mac.zip"));

    mock.assert();

    let html = std::fs::read_to_string(&page).unwrap();
    assert!(html.contains("Pixi Studio v2.9.87"));
    assert!(html.contains("Download v2.9.87 now"));
    assert!(html.contains(&format!(
        r#"href="{}/dl/Pixi.Studio-2.9.87-arm64-mac.zip""#,
        url
    )));
    assert!(html.contains("100.0 MB"));
    assert!(html.contains("1.4 MB"));
    assert!(html.contains("1.0 MB"));
    assert!(html.contains("50.0 MB"));
    assert!(html.contains("5 mar 2024"));
    assert!(html.contains("6 mar 2024"));
    assert!(html.contains("7 mar 2024"));
    assert!(!html.contains("latest.yml"));
    assert!(!dir.path().join("index.html.dlpage.tmp").exists());
}

#[test]
fn test_update_pinned_tag_to_output() {
    let mut server = Server::new();
    let url = server.url();

    let _mock = server
        .mock("GET", "/repos/owner/site/releases/tags/v2.9.87")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(release_body(&url))
        .create();

    let dir = tempdir().unwrap();
    let page = dir.path().join("index.html");
    let output = dir.path().join("public.html");
    std::fs::write(&page, PAGE).unwrap();

    dlpage()
        .arg("--repo")
        .arg("owner/site")
        .arg("update")
        .arg(&page)
        .arg("--tag")
        .arg("v2.9.87")
        .arg("--output")
        .arg(&output)
        .arg("--api-url")
        .arg(&url)
        .assert()
        .success();

    assert_eq!(std::fs::read_to_string(&page).unwrap(), PAGE);
    let html = std::fs::read_to_string(&output).unwrap();
    assert!(html.contains("Pixi Studio v2.9.87"));
}

#[test]
fn test_update_without_assets_leaves_page_untouched() {
    let mut server = Server::new();
    let url = server.url();

    let _mock = server
        .mock("GET", "/repos/ObaWan/pixistudio-updates/releases/latest")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"tag_name": "v2.9.87"}"#)
        .create();

    let dir = tempdir().unwrap();
    let page = dir.path().join("index.html");
    std::fs::write(&page, PAGE).unwrap();

    dlpage()
        .arg("update")
        .arg(&page)
        .arg("--api-url")
        .arg(&url)
        .env("RUST_LOG", "error")
        .assert()
        .failure()
        .stderr(predicates::str::contains("Failed to fetch release info"))
        .stderr(predicates::str::contains("no assets list"));

    assert_eq!(std::fs::read_to_string(&page).unwrap(), PAGE);
}

#[test]
fn test_update_fetch_error_leaves_page_untouched() {
    let mut server = Server::new();
    let url = server.url();

    let mock = server
        .mock("GET", "/repos/ObaWan/pixistudio-updates/releases/latest")
        .with_status(500)
        .expect(1)
        .create();

    let dir = tempdir().unwrap();
    let page = dir.path().join("index.html");
    std::fs::write(&page, PAGE).unwrap();

    dlpage()
        .arg("update")
        .arg(&page)
        .arg("--api-url")
        .arg(&url)
        .assert()
        .failure()
        .stderr(predicates::str::contains("Failed to fetch release info"));

    // One request, no retry
    mock.assert();
    assert_eq!(std::fs::read_to_string(&page).unwrap(), PAGE);
}

#[test]
fn test_update_missing_page_fails() {
    let dir = tempdir().unwrap();

    dlpage()
        .arg("update")
        .arg(dir.path().join("missing.html"))
        .arg("--api-url")
        .arg("http://127.0.0.1:9")
        .assert()
        .failure()
        .stderr(predicates::str::contains("missing.html"));
}

#[test]
fn test_show_lists_slots() {
    let mut server = Server::new();
    let url = server.url();

    let _mock = server
        .mock("GET", "/repos/ObaWan/pixistudio-updates/releases/latest")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(release_body(&url))
        .create();

    dlpage()
        .arg("show")
        .arg("--api-url")
        .arg(&url)
        .assert()
        .success()
        .stdout(predicates::str::contains("Release: v2.9.87 (version 2.9.87)"))
        .stdout(predicates::str::contains("macOS Intel"))
        .stdout(predicates::str::contains("Windows Portable"))
        .stdout(predicates::str::contains("(unmatched)"));
}
