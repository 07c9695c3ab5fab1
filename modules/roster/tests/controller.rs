//! Live view behaviour: refresh ticks, request ordering, failures and unmount.

mod common;

use std::sync::Arc;
use std::time::Duration;

use roster::domain::error::DomainError;
use roster::model::{DisplayStatus, RosterAction, RosterDisplay, RosterField};
use roster::{RosterHandle, Service, ServiceConfig};
use tokio::sync::watch;

use common::{record, twelve, ScriptedSource};

const WAIT: Duration = Duration::from_secs(5);

fn service(source: Arc<ScriptedSource>, refresh: Duration) -> Service {
    Service::new(
        source,
        ServiceConfig {
            refresh_interval: refresh,
            ..ServiceConfig::default()
        },
    )
}

async fn wait_until(
    rx: &mut watch::Receiver<RosterDisplay>,
    pred: impl FnMut(&RosterDisplay) -> bool,
) -> RosterDisplay {
    tokio::time::timeout(WAIT, rx.wait_for(pred))
        .await
        .expect("timed out waiting for display")
        .expect("view stopped")
        .clone()
}

fn mount(service: &Service) -> RosterHandle {
    service.mount(service.initial_state()).unwrap()
}

#[tokio::test]
async fn first_fetch_happens_on_mount() {
    let source = Arc::new(ScriptedSource::new(Vec::new(), twelve()));
    let svc = service(source.clone(), Duration::from_secs(3600));
    let handle = mount(&svc);
    let mut rx = handle.subscribe();

    let display = wait_until(&mut rx, |d| d.status == DisplayStatus::Ready).await;
    assert_eq!(display.total_count, 12);
    assert_eq!(display.page.items.len(), 5);
    assert_eq!(display.page.page_info.page_count, 3);
    assert_eq!(source.calls(), 1);

    handle.stop().await;
}

#[tokio::test]
async fn actions_publish_new_displays() {
    let source = Arc::new(ScriptedSource::new(Vec::new(), twelve()));
    let svc = service(source, Duration::from_secs(3600));
    let handle = mount(&svc);
    let mut rx = handle.subscribe();
    wait_until(&mut rx, |d| d.status == DisplayStatus::Ready).await;

    handle.dispatch(RosterAction::GoToPage(3)).await.unwrap();
    handle.dispatch(RosterAction::SetQuery("south".into())).await.unwrap();
    let display = handle.current();
    assert_eq!(display.state.page_index, 1);
    assert_eq!(display.filtered_count, 2);

    handle.dispatch(RosterAction::SortBy(RosterField::Id)).await.unwrap();
    let ids: Vec<u64> = handle.current().page.items.iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![6, 4]);

    let err = handle.dispatch(RosterAction::SetPageSize(3)).await.unwrap_err();
    assert!(matches!(err, DomainError::UnsupportedPageSize { size: 3, .. }));

    handle.stop().await;
}

#[tokio::test(start_paused = true)]
async fn latest_request_wins_over_late_completion() {
    let older = vec![record(1, "Old Snapshot", "Nowhere", "Old Co")];
    let newer = vec![
        record(1, "New Snapshot", "Somewhere", "New Co"),
        record(2, "Another", "Somewhere", "New Co"),
    ];
    let source = Arc::new(ScriptedSource::new(
        vec![
            (Duration::from_millis(500), Ok(older)),
            (Duration::from_millis(10), Ok(newer)),
        ],
        Vec::new(),
    ));
    let svc = service(source.clone(), Duration::from_secs(3600));
    let handle = mount(&svc);
    let mut rx = handle.subscribe();

    while source.calls() == 0 {
        tokio::task::yield_now().await;
    }
    handle.refresh_now().await.unwrap();

    let display = wait_until(&mut rx, |d| d.status == DisplayStatus::Ready).await;
    assert_eq!(display.total_count, 2);

    // let the slow first request complete; it must not overwrite the newer snapshot
    tokio::time::sleep(Duration::from_secs(1)).await;
    let display = handle.current();
    assert_eq!(display.total_count, 2);
    assert_eq!(display.page.items[0].name, "New Snapshot");

    handle.stop().await;
}

#[tokio::test(start_paused = true)]
async fn failed_tick_shows_banner_and_next_tick_recovers() {
    let source = Arc::new(ScriptedSource::new(
        vec![
            (Duration::ZERO, Ok(twelve())),
            (Duration::ZERO, Err(DomainError::fetch("upstream down"))),
        ],
        twelve(),
    ));
    let svc = service(source.clone(), Duration::from_secs(30));
    let handle = mount(&svc);
    let mut rx = handle.subscribe();

    wait_until(&mut rx, |d| d.status == DisplayStatus::Ready).await;

    let failed = wait_until(&mut rx, |d| matches!(d.status, DisplayStatus::Failed(_))).await;
    assert!(failed.stale);
    assert_eq!(failed.total_count, 12);

    let recovered = wait_until(&mut rx, |d| d.status == DisplayStatus::Ready).await;
    assert!(!recovered.stale);
    assert!(source.calls() >= 3);

    handle.stop().await;
}

#[tokio::test]
async fn select_looks_up_the_current_snapshot() {
    let source = Arc::new(ScriptedSource::new(Vec::new(), twelve()));
    let svc = service(source, Duration::from_secs(3600));
    let handle = mount(&svc);
    let mut rx = handle.subscribe();
    wait_until(&mut rx, |d| d.status == DisplayStatus::Ready).await;

    assert_eq!(handle.select(7).await.unwrap().name, "Kurtis Weissnat");
    assert_eq!(handle.select(99).await.unwrap_err(), DomainError::record_not_found(99));

    handle.stop().await;
}

#[tokio::test(start_paused = true)]
async fn stop_halts_the_refresh_timer() {
    let source = Arc::new(ScriptedSource::new(Vec::new(), twelve()));
    let svc = service(source.clone(), Duration::from_secs(30));
    let handle = mount(&svc);
    let mut rx = handle.subscribe();
    wait_until(&mut rx, |d| d.status == DisplayStatus::Ready).await;
    let calls_before = source.calls();

    handle.stop().await;
    tokio::time::sleep(Duration::from_secs(120)).await;
    assert_eq!(source.calls(), calls_before);
}

#[tokio::test]
async fn display_channel_closes_on_stop() {
    let source = Arc::new(ScriptedSource::new(Vec::new(), twelve()));
    let svc = service(source, Duration::from_secs(3600));
    let handle = mount(&svc);
    let rx = handle.subscribe();
    handle.stop().await;

    // the display channel closes with the owner task
    assert!(rx.has_changed().is_err());
}

#[tokio::test]
async fn zero_refresh_interval_is_rejected_on_mount() {
    let source = Arc::new(ScriptedSource::new(Vec::new(), twelve()));
    let svc = service(source.clone(), Duration::ZERO);

    let err = svc.mount(svc.initial_state()).err().expect("mount must fail");
    assert!(matches!(
        err,
        DomainError::Validation { ref field, .. } if field == "refresh_interval"
    ));
    assert_eq!(source.calls(), 0);
}

#[tokio::test(start_paused = true)]
async fn spawn_with_zero_interval_still_runs() {
    let source = Arc::new(ScriptedSource::new(Vec::new(), twelve()));
    let svc = service(source.clone(), Duration::from_secs(3600));
    let handle = RosterHandle::spawn(source.clone(), svc.new_view(), Duration::ZERO);
    let mut rx = handle.subscribe();

    let display = wait_until(&mut rx, |d| d.status == DisplayStatus::Ready).await;
    assert_eq!(display.total_count, 12);

    handle.stop().await;
}
