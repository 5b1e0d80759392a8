use std::collections::VecDeque;

use super::*;
use crate::host::Scheduler;
use crate::loader::MemoryLoader;

const GRAPHIC: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" width="10" height="10">
  <g id="door_x5F_front_interactive"/>
  <g id="lamp_interactive"/>
  <g id="ghost_interactive"/>
  <g id="smoke_animated"><rect/><rect/></g>
  <g id="both_interactive_animated"><rect/></g>
</svg>"#;

const DATA: &str = r#"{"door": {"title": "Front door"}, "lamp": {"title": "Lamp"}}"#;

fn host(loader: MemoryLoader) -> Host {
    Host {
        document: Document::parse_str(r#"<body><div id="mount"/></body>"#).unwrap(),
        loader: Box::new(loader),
        scheduler: Scheduler::new(),
        queue: VecDeque::new(),
    }
}

fn mount_of(host: &Host) -> NodeId {
    host.document
        .find_by_id(host.document.root(), "mount")
        .unwrap()
}

fn blocking(loader: MemoryLoader) -> (Animapper, Host) {
    let mut host = host(loader);
    let mount = mount_of(&host);
    let cfg = AnimapperConfig::new("g.svg", "g.json").with_fetch_mode(FetchMode::Blocking);
    let mut w = Animapper::new(cfg, mount);
    w.initialize(WidgetId(0), &mut host).unwrap();
    (w, host)
}

#[test]
fn blocking_initialize_mounts_and_classifies() {
    let (w, host) = blocking(MemoryLoader::new().with("g.svg", GRAPHIC).with("g.json", DATA));

    assert_eq!(w.state(), LoadState::Ready);
    assert_eq!(w.id(), Some(WidgetId(0)));
    let doc = &host.document;
    let mount = w.mount();
    assert!(doc.has_class(mount, "complete"));
    assert_eq!(doc.children(mount), &[w.graphic_root().unwrap()]);
    assert_eq!(doc.tag_name(w.graphic_root().unwrap()), Some("svg"));

    let ids: Vec<&str> = w
        .interactives()
        .iter()
        .map(|d| doc.element_id(d.element()).unwrap())
        .collect();
    assert_eq!(
        ids,
        vec![
            "door_x5F_front_interactive",
            "lamp_interactive",
            "ghost_interactive",
            "both_interactive_animated"
        ]
    );
    assert_eq!(w.animations().len(), 1);
    assert_eq!(host.scheduler.active_timers(), 1);

    let door = w.interactives()[0].element();
    assert_eq!(doc.attr(door, "title"), Some("Front door"));
    let ghost = w.interactives()[2].element();
    assert_eq!(doc.attr(ghost, "title"), None);
    // default policy: every interactive element is focusable
    assert_eq!(doc.attr(ghost, "role"), Some("button"));
}

#[test]
fn double_marked_element_is_not_animated() {
    let (w, host) = blocking(MemoryLoader::new().with("g.svg", GRAPHIC).with("g.json", DATA));
    let both = host
        .document
        .find_by_id(host.document.root(), "both_interactive_animated")
        .unwrap();
    assert!(host.document.has_class(both, "interactive"));
    assert!(!host.document.has_class(both, "animated"));
    assert!(w.animations().iter().all(|a| a.element() != both));
}

#[test]
fn data_for_uses_the_resolver() {
    let (w, _) = blocking(MemoryLoader::new().with("g.svg", GRAPHIC).with("g.json", DATA));
    assert_eq!(
        w.data_for("door_x5F_front_interactive")
            .and_then(DataRecord::title),
        Some("Front door")
    );
    assert_eq!(w.data_for("lamp_interactive").and_then(DataRecord::title), Some("Lamp"));
    assert!(w.data_for("ghost_interactive").is_none());
}

#[test]
fn graphic_fetch_failure_stops_before_data() {
    let loader = MemoryLoader::new().with_status("g.svg", 404).with("g.json", DATA);
    let (w, host) = blocking(loader);

    assert_eq!(w.state(), LoadState::Failed);
    assert!(w.last_error().unwrap().contains("g.svg"));
    assert!(w.interactives().is_empty());
    assert!(!host.document.has_class(w.mount(), "complete"));
    assert_eq!(host.scheduler.active_timers(), 0);
}

#[test]
fn data_fetch_failure_leaves_graphic_mounted_but_unclassified() {
    let loader = MemoryLoader::new().with("g.svg", GRAPHIC).with_status("g.json", 500);
    let (w, host) = blocking(loader);

    assert_eq!(w.state(), LoadState::Failed);
    assert!(w.graphic_root().is_some());
    assert!(host.document.has_class(w.mount(), "complete"));
    assert!(w.interactives().is_empty());
    assert!(w.animations().is_empty());
}

#[test]
fn malformed_data_is_a_hard_error() {
    let mut host = host(MemoryLoader::new().with("g.svg", GRAPHIC).with("g.json", "{oops"));
    let mount = mount_of(&host);
    let cfg = AnimapperConfig::new("g.svg", "g.json").with_fetch_mode(FetchMode::Blocking);
    let mut w = Animapper::new(cfg, mount);

    let err = w.initialize(WidgetId(0), &mut host).unwrap_err();
    assert!(matches!(err, AnimapperError::DataParse(_)));
    assert_eq!(w.state(), LoadState::Failed);
    assert!(w.interactives().is_empty());
}

#[test]
fn malformed_graphic_is_a_hard_error() {
    let mut host = host(MemoryLoader::new().with("g.svg", "<svg").with("g.json", DATA));
    let mount = mount_of(&host);
    let cfg = AnimapperConfig::new("g.svg", "g.json").with_fetch_mode(FetchMode::Blocking);
    let mut w = Animapper::new(cfg, mount);

    let err = w.initialize(WidgetId(0), &mut host).unwrap_err();
    assert!(matches!(err, AnimapperError::Graphic(_)));
    assert_eq!(w.graphic_root(), None);
}

#[test]
fn non_blocking_initialize_only_queues_the_graphic_turn() {
    let mut host = host(MemoryLoader::new().with("g.svg", GRAPHIC).with("g.json", DATA));
    let mount = mount_of(&host);
    let mut w = Animapper::new(AnimapperConfig::new("g.svg", "g.json"), mount);

    w.initialize(WidgetId(3), &mut host).unwrap();
    assert_eq!(w.state(), LoadState::LoadingGraphic);
    assert_eq!(host.queue.len(), 1);
    assert_eq!(host.queue[0].step, FetchStep::Graphic);
    assert_eq!(host.queue[0].widget, WidgetId(3));

    let turn = host.queue.pop_front().unwrap();
    w.resume(turn.step, &mut host).unwrap();
    assert_eq!(w.state(), LoadState::LoadingData);
    assert_eq!(host.queue[0].step, FetchStep::Data);

    let turn = host.queue.pop_front().unwrap();
    w.resume(turn.step, &mut host).unwrap();
    assert_eq!(w.state(), LoadState::Ready);
    assert!(host.queue.is_empty());
}

#[test]
fn progress_indicator_shows_last_known_percent_until_mount() {
    let loader = MemoryLoader::new()
        .with("g.svg", GRAPHIC)
        .with_status("g.json", 503)
        .with_progress_chunks(GRAPHIC.len() / 2 + 1);
    let mut host = host(loader);
    let mount = mount_of(&host);
    let mut w = Animapper::new(AnimapperConfig::new("g.svg", "g.json"), mount);
    w.initialize(WidgetId(0), &mut host).unwrap();

    // graphic bytes that fail to parse keep the progress bar on screen
    let bad = MemoryLoader::new()
        .with("g.svg", "<svg><unclosed>")
        .with_progress_chunks(8);
    let mut host2 = self::host(bad);
    let mount2 = mount_of(&host2);
    let cfg = AnimapperConfig::new("g.svg", "g.json").with_fetch_mode(FetchMode::Blocking);
    let mut w2 = Animapper::new(cfg, mount2);
    assert!(w2.initialize(WidgetId(1), &mut host2).is_err());
    let bar = host2.document.element_children(mount2);
    assert_eq!(bar.len(), 1);
    assert_eq!(host2.document.tag_name(bar[0]), Some("progress"));
    assert_eq!(host2.document.attr(bar[0], "value"), Some("100"));
    assert_eq!(host2.document.attr(bar[0], "max"), Some("100"));
    assert_eq!(host2.document.attr(bar[0], "id"), Some("progressbar"));

    // a successful graphic replaces the bar
    let turn = host.queue.pop_front().unwrap();
    w.resume(turn.step, &mut host).unwrap();
    let kids = host.document.element_children(mount);
    assert_eq!(kids, vec![w.graphic_root().unwrap()]);
}

#[test]
fn classify_without_records_still_builds_delegates() {
    let mut host = host(MemoryLoader::new());
    let mount = mount_of(&host);
    let graphic = Document::parse_str(GRAPHIC).unwrap();
    let root = host.document.import_subtree(&graphic, graphic.root());
    host.document.append_child(mount, root).unwrap();

    let cfg = AnimapperConfig::new("g.svg", "g.json").with_focus_policy(FocusPolicy::WithRecord);
    let mut w = Animapper::new(cfg, mount);
    w.classify(&mut host);

    assert_eq!(w.interactives().len(), 4);
    for d in w.interactives() {
        assert!(d.data().is_none());
        assert_eq!(host.document.attr(d.element(), "role"), None);
    }
}
