mod common;

use std::fs;
use std::sync::mpsc;
use std::time::Duration;

use common::{client, respond, truncated, TestServer};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use dlidx::download::{spawn_download, DownloadEvent};
use dlidx::commands::startup_listing;
use dlidx::{parse_listing, DlidxError};
use dlidx::tui::{Action, Controller, Mode};

const INDEX: &str = r#"<a href="ok.bin">ok.bin</a><a href="broken.bin">broken.bin</a>"#;

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

/// Drive one activation through a real download thread, like the UI loop does.
fn run_download(controller: &mut Controller, dir: &std::path::Path) {
    let Action::StartDownload { id, file } = controller.handle_key(key(KeyCode::Enter)) else {
        panic!("expected a download to start");
    };
    assert_eq!(controller.mode(), Mode::Downloading);

    let (tx, rx) = mpsc::channel();
    let dest = dir.join(&file.name);
    spawn_download(id, client(), file, dest, tx).unwrap();
    while controller.mode() == Mode::Downloading {
        let ev: DownloadEvent = rx.recv_timeout(Duration::from_secs(10)).unwrap();
        controller.handle_download_event(ev);
    }
}

#[test]
fn filtered_selection_downloads_the_right_entry_and_failures_return_to_browsing() {
    let server = TestServer::start(vec![
        ("/", respond("200 OK", &[], INDEX.as_bytes(), true)),
        ("/ok.bin", respond("200 OK", &[], b"payload", true)),
        ("/broken.bin", truncated(b"par", 100)),
    ]);
    let files = parse_listing(&client(), &server.url("/")).unwrap();
    let dir = tempfile::tempdir().unwrap();
    let mut controller = Controller::new("test", files);

    // filter down to the second entry; it must still be the original index 1
    controller.handle_key(key(KeyCode::Char('/')));
    for c in "BROKEN".chars() {
        controller.handle_key(key(KeyCode::Char(c)));
    }
    controller.handle_key(key(KeyCode::Enter));
    assert_eq!(controller.selected_row().unwrap().text, "[1] broken.bin");

    run_download(&mut controller, dir.path());
    assert_eq!(controller.mode(), Mode::Browsing);
    assert!(controller.message().unwrap().starts_with("Download failed"));

    controller.handle_key(key(KeyCode::Esc));
    controller.handle_key(key(KeyCode::Char('g')));
    run_download(&mut controller, dir.path());
    assert_eq!(controller.mode(), Mode::Browsing);
    assert_eq!(fs::read(dir.path().join("ok.bin")).unwrap(), b"payload");
}

#[test]
fn startup_with_unparsable_listing_opens_an_empty_browser() {
    let server = TestServer::start(vec![("/bin/", respond("200 OK", &[], &[0xff, 0xfe, 0x00], true))]);
    let (files, status) = startup_listing(&client(), &server.url("/bin/")).unwrap();
    assert!(files.is_empty());
    assert!(status.unwrap().contains("showing an empty list"));
}

#[test]
fn startup_with_failed_fetch_is_fatal() {
    let server = TestServer::start(vec![]);
    let err = startup_listing(&client(), &server.url("/missing/")).unwrap_err();
    assert!(matches!(err, DlidxError::Status { status: 404, .. }));

    let server = TestServer::start(vec![("/", respond("200 OK", &[], INDEX.as_bytes(), true))]);
    let (files, status) = startup_listing(&client(), &server.url("/")).unwrap();
    assert_eq!(files.len(), 2);
    assert_eq!(status, None);
}
