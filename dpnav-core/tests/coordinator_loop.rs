//! The coordinator run loop over real channels, as the binary wires it.

mod common;

use std::thread;

use common::{appliance_repo, config, Fixture};
use crossbeam_channel::{bounded, unbounded};
use dpnav_core::keys::KeyCode;
use dpnav_core::repo::LocalRepository;
use dpnav_core::{Coordinator, InputEvent, RedrawRequest, Repository, Side};
use tempfile::TempDir;

fn start(fixture: Fixture, password: &str) -> (Coordinator, TempDir) {
    let (repo, _calls) = appliance_repo(&config(password, ""), fixture);
    let dir = TempDir::new().unwrap();
    let repos = [Repository::Appliance(repo), Repository::Local(LocalRepository::new(dir.path()))];
    (Coordinator::start(repos, 80, 24).unwrap(), dir)
}

#[test]
fn events_are_processed_in_order_until_quit() {
    let (coordinator, _dir) = start(Fixture::default(), "secret");
    let (input_tx, input_rx) = bounded(1);
    let (redraw_tx, redraw_rx) = unbounded::<RedrawRequest>();

    let worker = thread::spawn(move || coordinator.run(input_rx, &redraw_tx));
    for event in [
        InputEvent::Key(KeyCode::Down),
        InputEvent::Key(KeyCode::Tab),
        InputEvent::Resize { cols: 60, rows: 10 },
        InputEvent::Key(KeyCode::Char('q')),
    ] {
        input_tx.send(event).unwrap();
    }
    worker.join().unwrap().unwrap();

    let requests: Vec<RedrawRequest> = redraw_rx.try_iter().collect();
    assert_eq!(requests.len(), 5);
    assert!(matches!(requests.last(), Some(RedrawRequest::Quit)));
    let RedrawRequest::Refresh(after_tab) = &requests[2] else {
        panic!("expected a refresh after Tab");
    };
    assert_eq!(after_tab.active_side(), Side::Right);
    assert_eq!(after_tab.pane(Side::Left).cursor, 1);
    let RedrawRequest::Refresh(resized) = &requests[3] else {
        panic!("expected a refresh after resize");
    };
    assert_eq!(resized.pane(Side::Left).rows, 7);
}

#[test]
fn loop_ends_when_input_closes() {
    let (coordinator, _dir) = start(Fixture::default(), "secret");
    let (input_tx, input_rx) = bounded::<InputEvent>(1);
    let (redraw_tx, redraw_rx) = unbounded::<RedrawRequest>();
    drop(input_tx);
    coordinator.run(input_rx, &redraw_tx).unwrap();
    assert_eq!(redraw_rx.try_iter().count(), 1);
}

#[test]
fn failed_listing_stops_the_loop_with_the_error() {
    let (coordinator, _dir) = start(Fixture { broken: true, ..Fixture::default() }, "");
    let (input_tx, input_rx) = bounded(1);
    let (redraw_tx, redraw_rx) = unbounded::<RedrawRequest>();

    let worker = thread::spawn(move || coordinator.run(input_rx, &redraw_tx));
    // Root list: enter "dev", answer the prompt, then enter again.
    input_tx.send(InputEvent::Key(KeyCode::Enter)).unwrap();
    input_tx.send(InputEvent::Key(KeyCode::Char('p'))).unwrap();
    input_tx.send(InputEvent::Key(KeyCode::Enter)).unwrap();
    input_tx.send(InputEvent::Key(KeyCode::Enter)).unwrap();
    let err = worker.join().unwrap().unwrap_err();
    assert_eq!(err.to_string(), "list domains for dev");
    assert!(matches!(redraw_rx.try_iter().last(), Some(RedrawRequest::Quit)));
}
