// Runs the built executable in a scratch working directory holding
// `config.toml`, the way a scheduler would invoke it.

use mockito::Server;
use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

struct Workspace {
    root: TempDir,
}

impl Workspace {
    fn new(api_url: &str) -> Self {
        let root = tempfile::tempdir().unwrap();
        fs::create_dir(root.path().join("images")).unwrap();
        fs::create_dir(root.path().join("archive")).unwrap();
        let config = format!(
            "Source = {:?}\n\
             Archive = {:?}\n\
             TumblrBlog = \"catpics\"\n\
             TumblrConsumerKey = \"ck\"\n\
             TumblrSecretKey = \"cs\"\n\
             TumblrToken = \"tk\"\n\
             TumblrTokenSecret = \"ts\"\n\
             TumblrTags = [\"cats\", \"pets\"]\n\
             TumblrApiUrl = {:?}\n",
            root.path().join("images").display().to_string(),
            root.path().join("archive").display().to_string(),
            api_url,
        );
        fs::write(root.path().join("config.toml"), config).unwrap();
        Workspace { root }
    }

    fn images(&self) -> std::path::PathBuf {
        self.root.path().join("images")
    }

    fn archive(&self) -> std::path::PathBuf {
        self.root.path().join("archive")
    }

    fn run(&self) -> Output {
        Command::new(env!("CARGO_BIN_EXE_image-poster"))
            .current_dir(self.root.path())
            .env_remove("RUST_LOG")
            .output()
            .unwrap()
    }
}

fn exists(dir: &Path, name: &str) -> bool {
    dir.join(name).exists()
}

#[test]
fn successful_run_exits_zero_and_archives() {
    let mut server = Server::new();
    let m = server
        .mock("POST", "/v2/blog/catpics/post")
        .match_body(mockito::Matcher::UrlEncoded("caption".into(), "cat.png".into()))
        .with_status(201)
        .with_body(r#"{"meta":{"status":201,"msg":"Created"},"response":{"id":1}}"#)
        .expect(1)
        .create();

    let ws = Workspace::new(&server.url());
    fs::write(ws.images().join("cat.png"), b"meow").unwrap();

    let out = ws.run();

    assert!(out.status.success(), "stderr: {}", String::from_utf8_lossy(&out.stderr));
    m.assert();
    assert!(!exists(&ws.images(), "cat.png"));
    assert!(exists(&ws.archive(), "cat.png"));
}

#[test]
fn failing_endpoint_exits_nonzero_without_archiving() {
    let mut server = Server::new();
    let m = server
        .mock("POST", "/v2/blog/catpics/post")
        .with_status(503)
        .expect(1)
        .create();

    let ws = Workspace::new(&server.url());
    fs::write(ws.images().join("cat.png"), b"meow").unwrap();

    let out = ws.run();

    assert!(!out.status.success());
    m.assert();
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("failed post to tumblr"), "stderr: {stderr}");
    assert!(exists(&ws.images(), "cat.png"));
    assert!(!exists(&ws.archive(), "cat.png"));
}

#[test]
fn missing_config_exits_nonzero() {
    let root = tempfile::tempdir().unwrap();
    let out = Command::new(env!("CARGO_BIN_EXE_image-poster"))
        .current_dir(root.path())
        .env_remove("RUST_LOG")
        .output()
        .unwrap();

    assert!(!out.status.success());
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("failure reading config file"), "stderr: {stderr}");
}
