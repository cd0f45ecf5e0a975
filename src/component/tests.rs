// SPDX-License-Identifier: MPL-2.0
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;

use serde_json::{json, Value};

use super::*;
use crate::diagnostics::{DiagnosticEventKind, DiagnosticsCollector, WarningType};
use crate::events::{Event, Touch};
use crate::options::as_options;
use crate::registry;

fn opts(value: Value) -> Options {
    as_options(&value)
}

fn host() -> Rc<Host> {
    Host::new("player", DiagnosticsHandle::disconnected())
}

fn register(name: &str, css_class: &str) {
    registry::register_component(name, Rc::new(BaseComponent::named(name, css_class)));
}

fn component(host: &Rc<Host>, options: Value) -> Component {
    Component::builder(host, Rc::new(BaseComponent::new()))
        .options(opts(options))
        .build()
        .expect("component should build")
}

fn child_names(component: &Component) -> Vec<String> {
    component
        .children()
        .iter()
        .map(|c| c.name().unwrap_or_default().to_string())
        .collect()
}

fn counter() -> (Rc<Cell<u32>>, impl Fn(&Component, &Event) + Clone + 'static) {
    let count = Rc::new(Cell::new(0));
    let inner = count.clone();
    (count, move |_: &Component, _: &Event| inner.set(inner.get() + 1))
}

struct Tech;

impl ComponentClass for Tech {
    fn name(&self) -> &str {
        "Html5"
    }

    fn is_tech(&self) -> bool {
        true
    }
}

struct Ghost;

impl ComponentClass for Ghost {
    fn name(&self) -> &str {
        "Ghost"
    }

    fn is_constructible(&self) -> bool {
        false
    }
}

struct Counter;

impl ComponentClass for Counter {
    fn name(&self) -> &str {
        "Counter"
    }

    fn default_options(&self) -> Options {
        opts(json!({ "start": 3, "children": ["label"] }))
    }

    fn build_css_class(&self) -> String {
        "koment-counter".to_string()
    }

    fn setup(&self, component: &Component) -> Result<()> {
        component.add_class("koment-set-up")?;
        component.trigger_ready();
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Construction
// ---------------------------------------------------------------------------

#[test]
fn generated_id_uses_host_id() {
    let host = host();
    let c = component(&host, json!({}));
    assert!(c.id().starts_with("player_component_"));
    assert!(c.name().is_none());
    assert_eq!(c.el().map(|el| el.tag()), Some("div".to_string()));
}

#[test]
fn id_comes_from_options_then_element() {
    let host = host();
    let c = component(&host, json!({ "id": "explicit", "name": "box" }));
    assert_eq!(c.id(), "explicit");
    assert_eq!(c.name(), Some("box"));

    let el = Element::new("section");
    el.set_id("from-element");
    let c = Component::builder(&host, Rc::new(BaseComponent::new()))
        .element(el.clone())
        .build()
        .expect("build");
    assert_eq!(c.id(), "from-element");
    assert_eq!(c.el(), Some(el));
}

#[test]
fn create_el_false_leaves_component_without_element() {
    let host = host();
    let c = component(&host, json!({ "createEl": false }));
    assert!(c.el().is_none());
    assert_eq!(c.width(), 0);
    assert!(c.trigger("anything", None));
    c.hide();
    assert!(!c.has_class(HIDDEN_CLASS));
}

#[test]
fn class_defaults_hooks_and_setup_apply() {
    let host = host();
    register("Label", "koment-label");
    let c = Component::builder(&host, Rc::new(Counter))
        .options(opts(json!({ "start": 5 })))
        .build()
        .expect("build");

    assert_eq!(c.option("start"), Some(json!(5)));
    assert_eq!(c.class_name(), "Counter");
    assert!(c.has_class("koment-counter"));
    assert!(c.has_class("koment-set-up"));
    assert_eq!(c.children().len(), 1);
    assert!(c.get_child("label").is_some());

    assert!(c.is_ready());
    let readied = Rc::new(Cell::new(false));
    let flag = readied.clone();
    c.on("ready", move |_, _| flag.set(true));
    host.scheduler().tick();
    assert!(readied.get());
}

// ---------------------------------------------------------------------------
// Children
// ---------------------------------------------------------------------------

#[test]
fn declared_child_is_indexed_and_inserted() {
    let host = host();
    register("List", "koment-list");
    let root = component(&host, json!({ "children": ["list"] }));

    assert_eq!(root.children().len(), 1);
    let list = root.get_child("list").expect("list child");
    assert_eq!(root.get_child_by_id(list.id()), Some(list.clone()));
    assert_eq!(root.member("list"), Some(list.clone()));
    assert_eq!(list.parent(), Some(root.clone()));

    let content = root.content_el().expect("content element");
    let list_el = list.el().expect("list element");
    assert_eq!(content.child_nodes(), vec![list_el.clone()]);
    assert!(dom::has_class(&list_el, "koment-list"));
}

#[test]
fn add_then_remove_restores_indices() {
    let host = host();
    register("List", "koment-list");
    let root = component(&host, json!({}));
    let before = root.children().len();

    let child = root
        .add_child("list", json!({}), None)
        .expect("add")
        .expect("constructible");
    assert_eq!(root.children().len(), before + 1);

    root.remove_child(&child);
    assert_eq!(root.children().len(), before);
    assert!(root.get_child("list").is_none());
    assert!(root.get_child_by_id(child.id()).is_none());
    assert!(child.parent().is_none());
    assert!(root.content_el().expect("content").child_nodes().is_empty());
}

#[test]
fn add_child_at_index_mirrors_dom_order() {
    let host = host();
    let root = component(&host, json!({}));
    let a = component(&host, json!({ "id": "a" }));
    let b = component(&host, json!({ "id": "b" }));
    let c = component(&host, json!({ "id": "c" }));
    root.add_child(&a, Value::Null, None).expect("add a");
    root.add_child(&b, Value::Null, None).expect("add b");
    root.add_child(&c, Value::Null, Some(1)).expect("add c");

    let ids: Vec<String> = root.children().iter().map(|c| c.id().to_string()).collect();
    assert_eq!(ids, vec!["a", "c", "b"]);
    let dom_order: Vec<Element> = root.content_el().expect("content").element_children();
    assert_eq!(
        dom_order,
        vec![
            a.el().expect("a el"),
            c.el().expect("c el"),
            b.el().expect("b el")
        ]
    );
}

#[test]
fn children_go_into_custom_content_element() {
    let host = host();
    let root = component(&host, json!({}));
    let inner = Element::new("ul");
    root.el().expect("el").append_child(&inner);
    root.set_content_el(Some(inner.clone()));

    let child = component(&host, json!({}));
    root.add_child(&child, Value::Null, None).expect("add");
    assert_eq!(child.el().and_then(|el| el.parent()), Some(inner));
}

#[test]
fn unknown_child_name_is_a_logged_lookup_error() {
    let mut collector = DiagnosticsCollector::default();
    let host = Host::new("player", collector.handle());
    let root = component(&host, json!({}));

    let err = root.add_child("nothingHere", json!({}), None).unwrap_err();
    assert_eq!(err, Error::UnknownComponent("NothingHere".to_string()));

    collector.process_pending();
    let errors = collector.events_where(|k| matches!(k, DiagnosticEventKind::Error { .. }));
    assert_eq!(errors.len(), 1);
}

#[test]
fn non_constructible_class_yields_no_child() {
    let host = host();
    registry::register_component("Ghost", Rc::new(Ghost));
    let root = component(&host, json!({}));
    assert_eq!(root.add_child("ghost", json!({}), None), Ok(None));
    assert!(root.children().is_empty());
}

#[test]
fn top_level_false_disables_a_declared_child() {
    let host = host();
    register("List", "koment-list");
    register("Bar", "koment-bar");
    let root = component(&host, json!({ "children": ["list", "bar"], "bar": false }));
    let names: Vec<Option<String>> = root
        .children()
        .iter()
        .map(|c| c.name().map(str::to_string))
        .collect();
    assert_eq!(names, vec![Some("list".to_string())]);
}

#[test]
fn top_level_options_override_declared_ones() {
    let host = host();
    register("List", "koment-list");
    let root = component(
        &host,
        json!({
            "children": [{ "name": "list", "title": "declared" }],
            "list": { "title": "override" }
        }),
    );
    let list = root.get_child("list").expect("list");
    assert_eq!(list.option("title"), Some(json!("override")));
}

#[test]
fn record_form_and_implicit_top_level_children() {
    let host = host();
    register("List", "koment-list");
    register("Bar", "koment-bar");
    let root = component(
        &host,
        json!({
            "children": { "list": { "title": "comments" } },
            "bar": { "height": 4 }
        }),
    );
    assert_eq!(child_names(&root), vec!["list", "bar"]);
    let list = root.get_child("list").expect("list");
    assert_eq!(list.option("title"), Some(json!("comments")));
    let bar = root.get_child("bar").expect("implicit bar");
    assert_eq!(bar.option("height"), Some(json!(4)));
    assert_eq!(
        root.content_el().expect("content").child_nodes(),
        vec![list.el().expect("list el"), bar.el().expect("bar el")]
    );
}

#[test]
fn record_children_keep_declared_order() {
    let host = host();
    for name in ["Zeta", "Alpha", "Omega", "Beta"] {
        register(name, "");
    }
    let root = component(
        &host,
        json!({
            "children": { "zeta": {}, "alpha": {} },
            "omega": {},
            "beta": {}
        }),
    );

    assert_eq!(child_names(&root), vec!["zeta", "alpha", "omega", "beta"]);
    let dom_order: Vec<Element> = root
        .children()
        .iter()
        .map(|c| c.el().expect("child el"))
        .collect();
    assert_eq!(root.content_el().expect("content").child_nodes(), dom_order);
}

#[test]
fn component_class_option_overrides_title_case() {
    let host = host();
    register("Bar", "koment-bar");
    let root = component(
        &host,
        json!({ "children": [{ "name": "timeline", "componentClass": "Bar" }] }),
    );
    let timeline = root.get_child("timeline").expect("timeline");
    assert_eq!(timeline.class_name(), "Bar");
    assert!(timeline.has_class("koment-bar"));
}

#[test]
fn tech_classes_are_never_children() {
    let host = host();
    registry::register_component("Html5", Rc::new(Tech));
    let root = component(&host, json!({ "children": ["html5"] }));
    assert!(root.children().is_empty());
}

#[test]
fn true_child_options_are_deprecated_but_accepted() {
    let mut collector = DiagnosticsCollector::default();
    let host = Host::new("player", collector.handle());
    register("List", "koment-list");
    let root = component(&host, json!({ "children": { "list": true } }));
    assert!(root.get_child("list").is_some());

    collector.process_pending();
    let deprecations = collector.events_where(|k| {
        matches!(k, DiagnosticEventKind::Warning { event } if event.warning_type == WarningType::Deprecation)
    });
    assert_eq!(deprecations.len(), 1);
}

#[test]
fn player_options_reach_every_child() {
    let host = host();
    register("List", "koment-list");
    let root = host
        .mount("Component", opts(json!({ "children": ["list"], "volume": 1 })))
        .expect("mount");
    let list = root.get_child("list").expect("list");
    let player_options = list.option("playerOptions").expect("player options");
    assert_eq!(player_options["volume"], 1);
}

#[test]
fn adding_an_attached_child_moves_it() {
    let host = host();
    let first = component(&host, json!({}));
    let second = component(&host, json!({}));
    let child = component(&host, json!({}));

    first.add_child(&child, Value::Null, None).expect("add");
    second.add_child(&child, Value::Null, None).expect("move");
    assert!(first.children().is_empty());
    assert_eq!(second.children(), vec![child.clone()]);
    assert_eq!(child.parent(), Some(second));
}

#[test]
fn remove_child_leaves_moved_elements_alone() {
    let host = host();
    let root = component(&host, json!({}));
    let child = component(&host, json!({}));
    root.add_child(&child, Value::Null, None).expect("add");

    let elsewhere = Element::new("div");
    let child_el = child.el().expect("child el");
    elsewhere.append_child(&child_el);

    root.remove_child(&child);
    assert_eq!(child_el.parent(), Some(elsewhere));
}

#[test]
fn re_adding_a_child_moves_it_instead_of_duplicating() {
    let host = host();
    let root = component(&host, json!({}));
    let a = component(&host, json!({ "id": "a", "name": "a" }));
    let b = component(&host, json!({ "id": "b" }));
    root.add_child(&a, Value::Null, None).expect("add a");
    root.add_child(&b, Value::Null, None).expect("add b");

    root.add_child(&a, Value::Null, None).expect("re-add a");
    assert_eq!(root.children(), vec![b.clone(), a.clone()]);
    assert_eq!(
        root.content_el().expect("content").child_nodes(),
        vec![b.el().expect("b el"), a.el().expect("a el")]
    );

    root.remove_child(&a);
    assert_eq!(root.children(), vec![b]);
    assert!(root.get_child("a").is_none());
    assert!(a.parent().is_none());
}

#[test]
fn duplicate_child_ids_are_rejected() {
    let host = host();
    register("List", "koment-list");
    let root = component(&host, json!({}));
    let first = component(&host, json!({ "id": "dup" }));
    let second = component(&host, json!({ "id": "dup" }));
    root.add_child(&first, Value::Null, None).expect("add first");

    assert_eq!(
        root.add_child(&second, Value::Null, None),
        Err(Error::DuplicateId("dup".to_string()))
    );
    assert!(matches!(
        root.add_child("list", json!({ "id": "dup" }), None),
        Err(Error::DuplicateId(_))
    ));
    assert_eq!(root.children(), vec![first.clone()]);
    assert!(second.parent().is_none());
    assert_eq!(root.get_child_by_id("dup"), Some(first));
}

#[test]
fn removing_a_child_keeps_a_sibling_that_reused_its_name() {
    let host = host();
    register("List", "koment-list");
    let root = component(&host, json!({}));
    let older = root
        .add_child("list", json!({}), None)
        .expect("add")
        .expect("constructible");
    let newer = root
        .add_child("list", json!({}), None)
        .expect("add")
        .expect("constructible");
    assert_eq!(root.get_child("list"), Some(newer.clone()));

    root.remove_child(&older);
    assert_eq!(root.get_child("list"), Some(newer.clone()));
    assert_eq!(root.get_child_by_id(newer.id()), Some(newer));
    assert!(root.get_child_by_id(older.id()).is_none());
}

#[test]
fn removing_an_unknown_child_is_silent() {
    let host = host();
    let root = component(&host, json!({}));
    let stranger = component(&host, json!({}));
    root.remove_child(&stranger);
    root.remove_child("nobody");
    assert!(root.children().is_empty());
}

// ---------------------------------------------------------------------------
// Disposal
// ---------------------------------------------------------------------------

#[test]
fn dispose_runs_children_in_reverse_order() {
    let host = host();
    let root = component(&host, json!({ "id": "root" }));
    let log = Rc::new(RefCell::new(Vec::new()));

    for id in ["a", "b", "c"] {
        let child = component(&host, json!({ "id": id }));
        root.add_child(&child, Value::Null, None).expect("add");
    }
    for c in std::iter::once(root.clone()).chain(root.children()) {
        let log = log.clone();
        c.on("dispose", move |c, _| log.borrow_mut().push(c.id().to_string()));
    }

    root.dispose();
    assert_eq!(*log.borrow(), vec!["root", "c", "b", "a"]);
}

#[test]
fn dispose_tolerates_children_disposed_first() {
    let host = host();
    let root = component(&host, json!({}));
    let mut counts = Vec::new();
    for _ in 0..3 {
        let child = component(&host, json!({}));
        let (count, f) = counter();
        child.on("dispose", f);
        root.add_child(&child, Value::Null, None).expect("add");
        counts.push(count);
    }

    let middle = root.children()[1].clone();
    middle.dispose();
    assert_eq!(root.children().len(), 2);
    assert!(root.get_child_by_id(middle.id()).is_none());

    root.dispose();
    for count in counts {
        assert_eq!(count.get(), 1);
    }
}

#[test]
fn dispose_detaches_and_clears_everything() {
    let host = host();
    let root = component(&host, json!({}));
    let child = component(&host, json!({}));
    root.add_child(&child, Value::Null, None).expect("add");
    let child_el = child.el().expect("child el");
    child.on("custom", |_, _| {});

    child.dispose();
    assert!(child.is_disposed());
    assert!(child.el().is_none());
    assert!(child_el.parent().is_none());
    assert!(!dom::has_data(&child_el));
    assert!(root.children().is_empty());

    child.dispose();
    assert!(child.is_disposed());
}

#[test]
fn disposed_component_refuses_new_state() {
    let host = host();
    register("List", "koment-list");
    let c = component(&host, json!({}));
    c.dispose();

    assert!(matches!(
        c.add_child("list", json!({}), None),
        Err(Error::Disposed(_))
    ));
    assert!(matches!(
        c.set_timeout(|_| {}, Duration::ZERO),
        Err(Error::Disposed(_))
    ));
    assert!(c.children().is_empty());
    assert_eq!(c.width(), 0);
    assert!(c.trigger("x", None));
    c.remove_child("list");

    c.trigger_ready();
    assert!(!c.is_ready());
    assert_eq!(host.scheduler().pending(), 0);
}

// ---------------------------------------------------------------------------
// Events
// ---------------------------------------------------------------------------

#[test]
fn on_binds_the_component_as_receiver() {
    let host = host();
    let c = component(&host, json!({ "id": "me" }));
    let seen = Rc::new(RefCell::new(String::new()));
    let sink = seen.clone();
    c.on("ping", move |component, _| *sink.borrow_mut() = component.id().to_string());
    c.trigger("ping", None);
    assert_eq!(*seen.borrow(), "me");
}

#[test]
fn one_survives_reentrant_trigger() {
    let host = host();
    let c = component(&host, json!({}));
    let count = Rc::new(Cell::new(0));
    let inner = count.clone();
    c.one("x", move |component, _| {
        inner.set(inner.get() + 1);
        component.trigger("x", None);
        component.trigger("x", None);
    });
    c.trigger("x", None);
    assert_eq!(count.get(), 1);
}

#[test]
fn off_by_id_keeps_other_handlers() {
    let host = host();
    let c = component(&host, json!({}));
    let (kept, keep) = counter();
    let (dropped, drop_me) = counter();
    c.on("x", keep);
    let id = c.on("x", drop_me);
    c.off("x", Some(id));
    c.trigger("x", None);
    assert_eq!((kept.get(), dropped.get()), (1, 0));
}

#[test]
fn cross_binding_is_removed_when_listener_is_disposed() {
    let host = host();
    let a = component(&host, json!({}));
    let b = component(&host, json!({}));
    let (count, f) = counter();
    a.on_target(&b, "x", f);

    b.trigger("x", None);
    assert_eq!(count.get(), 1);

    a.dispose();
    b.trigger("x", None);
    assert_eq!(count.get(), 1);

    let b_el = b.el().expect("b el");
    assert_eq!(events::listener_count(&b_el, "x"), 0);
    assert_eq!(events::listener_count(&b_el, "dispose"), 0);
}

#[test]
fn cross_binding_is_released_when_target_is_disposed_first() {
    let host = host();
    let a = component(&host, json!({}));
    let b = component(&host, json!({}));
    let (_, f) = counter();
    a.on_target(&b, "x", f);
    let a_el = a.el().expect("a el");
    assert_eq!(events::listener_count(&a_el, "dispose"), 1);

    b.dispose();
    assert_eq!(events::listener_count(&a_el, "dispose"), 0);
    a.dispose();
    assert!(a.is_disposed());
}

#[test]
fn off_target_removes_binding_and_both_cleanups() {
    let host = host();
    let a = component(&host, json!({}));
    let target = Element::new("video");
    let (count, f) = counter();
    let id = a.on_target(&target, ["play", "pause"], f);
    assert_eq!(events::listener_count(&target, "dispose"), 1);

    a.off_target(&target, ["play", "pause"], id);
    events::trigger(&target, "play", None);
    assert_eq!(count.get(), 0);
    assert_eq!(events::listener_count(&target, "dispose"), 0);
    assert_eq!(events::listener_count(&a.el().expect("el"), "dispose"), 0);
}

#[test]
fn raw_element_target_cleans_up_on_its_dispose_event() {
    let host = host();
    let a = component(&host, json!({}));
    let target = Element::new("div");
    let (_, f) = counter();
    a.on_target(&target, "x", f);

    events::trigger(&target, "dispose", None);
    assert_eq!(events::listener_count(&a.el().expect("el"), "dispose"), 0);
}

#[test]
fn one_target_fires_once_and_unbinds() {
    let host = host();
    let a = component(&host, json!({}));
    let b = component(&host, json!({}));
    let count = Rc::new(Cell::new(0));
    let inner = count.clone();
    let target = b.clone();
    a.one_target(&b, "x", move |_, _| {
        inner.set(inner.get() + 1);
        target.trigger("x", None);
    });

    b.trigger("x", None);
    b.trigger("x", None);
    assert_eq!(count.get(), 1);
    assert_eq!(events::listener_count(&a.el().expect("el"), "dispose"), 0);
    assert_eq!(events::listener_count(&b.el().expect("el"), "dispose"), 0);
}

// ---------------------------------------------------------------------------
// Ready and timers
// ---------------------------------------------------------------------------

#[test]
fn ready_queue_flushes_on_next_tick_before_ready_event() {
    let host = host();
    let c = component(&host, json!({}));
    let log: Rc<RefCell<Vec<&'static str>>> = Rc::new(RefCell::new(Vec::new()));

    let on_event = log.clone();
    c.on("ready", move |_, _| on_event.borrow_mut().push("ready event"));

    let first = log.clone();
    c.ready(
        move |component| {
            first.borrow_mut().push("first");
            let sync = first.clone();
            component.ready(move |_| sync.borrow_mut().push("sync"), true);
            let deferred = first.clone();
            component.ready(move |_| deferred.borrow_mut().push("deferred"), false);
        },
        false,
    );

    c.trigger_ready();
    assert!(log.borrow().is_empty());

    host.scheduler().tick();
    assert_eq!(*log.borrow(), vec!["first", "sync", "ready event"]);

    host.scheduler().tick();
    assert_eq!(*log.borrow(), vec!["first", "sync", "ready event", "deferred"]);
}

#[test]
fn builder_ready_callback_runs_once() {
    let host = host();
    let (count, _) = counter();
    let inner = count.clone();
    let c = Component::builder(&host, Rc::new(BaseComponent::new()))
        .on_ready(move |_| inner.set(inner.get() + 1))
        .build()
        .expect("build");
    host.scheduler().run_until_idle();
    assert_eq!(count.get(), 0);

    c.trigger_ready();
    host.scheduler().run_until_idle();
    c.trigger_ready();
    host.scheduler().run_until_idle();
    assert_eq!(count.get(), 1);
}

#[test]
fn timeout_fires_and_drops_its_cleanup() {
    let host = host();
    let c = component(&host, json!({}));
    let el = c.el().expect("el");
    let fired = Rc::new(Cell::new(0));
    let inner = fired.clone();
    c.set_timeout(move |_| inner.set(inner.get() + 1), Duration::from_millis(100))
        .expect("schedule");
    assert_eq!(events::listener_count(&el, "dispose"), 1);

    host.scheduler().advance(Duration::from_millis(100));
    assert_eq!(fired.get(), 1);
    assert_eq!(events::listener_count(&el, "dispose"), 0);
}

#[test]
fn dispose_cancels_pending_timers() {
    let host = host();
    let c = component(&host, json!({}));
    let fired = Rc::new(Cell::new(0));
    let (once, every) = (fired.clone(), fired.clone());
    c.set_timeout(move |_| once.set(once.get() + 1), Duration::from_millis(50))
        .expect("timeout");
    c.set_interval(move |_| every.set(every.get() + 1), Duration::from_millis(10))
        .expect("interval");
    assert_eq!(host.scheduler().pending(), 2);

    c.dispose();
    assert_eq!(host.scheduler().pending(), 0);
    host.scheduler().advance(Duration::from_millis(100));
    assert_eq!(fired.get(), 0);
}

#[test]
fn clear_interval_removes_only_its_cleanup() {
    let host = host();
    let c = component(&host, json!({}));
    let el = c.el().expect("el");
    let ticks = Rc::new(Cell::new(0));
    let inner = ticks.clone();
    let interval = c
        .set_interval(move |_| inner.set(inner.get() + 1), Duration::from_millis(100))
        .expect("interval");
    c.set_timeout(|_| {}, Duration::from_millis(1000)).expect("timeout");

    host.scheduler().advance(Duration::from_millis(350));
    assert_eq!(ticks.get(), 3);

    c.clear_interval(interval);
    assert_eq!(events::listener_count(&el, "dispose"), 1);
    host.scheduler().advance(Duration::from_millis(350));
    assert_eq!(ticks.get(), 3);
}

// ---------------------------------------------------------------------------
// Dimensions, classes, localization
// ---------------------------------------------------------------------------

#[test]
fn dimension_setters_apply_units_and_fire_resize() {
    let host = host();
    let c = component(&host, json!({}));
    let el = c.el().expect("el");
    let (resizes, f) = counter();
    c.on("resize", f);

    c.set_dimension(Axis::Width, "50%", false);
    assert_eq!(el.style("width"), "50%");
    assert_eq!(resizes.get(), 1);

    c.set_width(50);
    assert_eq!(el.style("width"), "50px");
    c.set_width(f64::NAN);
    assert_eq!(el.style("width"), "0px");
    assert_eq!(resizes.get(), 3);

    c.set_dimensions(10, 20);
    assert_eq!(resizes.get(), 4);
    assert_eq!((c.width(), c.height()), (10, 20));

    c.set_dimension(Axis::Width, 30, true);
    assert_eq!(resizes.get(), 4);
}

#[test]
fn dimension_getters_fall_back_to_rendered_size() {
    let host = host();
    let c = component(&host, json!({}));
    let el = c.el().expect("el");
    el.set_offset_size(120.7, 40.2);

    assert_eq!(c.width(), 120);
    c.set_width("auto");
    assert_eq!(el.style("width"), "");
    assert_eq!(c.width(), 120);

    c.set_height("25px");
    assert!((c.current_width() - 120.7).abs() < 1e-9);
    assert!((c.current_height() - 25.0).abs() < 1e-9);
    assert_eq!(
        c.current_dimensions(),
        Dimensions {
            width: 120.7,
            height: 25.0
        }
    );
    assert_eq!(
        c.current_dimension("depth"),
        Err(Error::InvalidDimension("depth".to_string()))
    );
}

#[test]
fn show_hide_and_lock_toggle_classes() {
    let host = host();
    let c = component(&host, json!({}));
    c.hide();
    assert!(c.has_class(HIDDEN_CLASS));
    c.show();
    assert!(!c.has_class(HIDDEN_CLASS));
    c.lock_showing();
    assert!(c.has_class(LOCK_SHOWING_CLASS));
    c.unlock_showing();
    assert!(!c.has_class(LOCK_SHOWING_CLASS));

    c.toggle_class("active", None).expect("toggle");
    assert!(c.has_class("active"));
    c.toggle_class("active", Some(true)).expect("toggle");
    assert!(c.has_class("active"));
    assert!(c.add_class("two words").is_err());
}

#[test]
fn localize_follows_host_language() {
    let host = host();
    let mut translations = crate::i18n::Translations::default();
    translations.insert("fr", "Loaded", "Chargé");
    host.set_translations(translations);
    let c = component(&host, json!({}));

    assert_eq!(c.localize("Loaded"), "Loaded");
    host.set_language(Some("fr-FR"));
    assert_eq!(c.localize("Loaded"), "Chargé");
}

#[test]
fn attribute_names_passed_as_properties_are_flagged() {
    let mut collector = DiagnosticsCollector::default();
    let host = Host::new("player", collector.handle());
    let c = component(&host, json!({}));
    collector.process_pending();
    collector.clear();

    let el = c.create_el("button", &[("role", "button"), ("className", "b")], &[]);
    assert_eq!(el.attribute("role").as_deref(), Some("button"));

    collector.process_pending();
    assert_eq!(collector.len(), 1);
}

#[test]
#[allow(deprecated)]
fn deprecated_option_accessors_still_work() {
    let host = host();
    let c = component(&host, json!({ "a": { "x": 1 } }));
    let merged = c.update_options(&opts(json!({ "a": { "y": 2 } })));
    assert_eq!(merged.get("a"), Some(&json!({ "x": 1, "y": 2 })));
    assert_eq!(c.options().get("a"), Some(&json!({ "x": 1, "y": 2 })));
}

// ---------------------------------------------------------------------------
// Touch
// ---------------------------------------------------------------------------

fn touch_start(c: &Component, x: f64, y: f64) {
    c.trigger(Event::touch("touchstart", vec![Touch::new(x, y)]), None);
}

#[test]
fn quick_still_touch_emits_tap() {
    let host = host();
    let c = component(&host, json!({}));
    c.emit_tap_events();
    let (taps, f) = counter();
    c.on("tap", f);

    touch_start(&c, 10.0, 10.0);
    host.scheduler().advance(Duration::from_millis(100));
    let allowed = c.trigger(Event::touch("touchend", Vec::new()), None);

    assert_eq!(taps.get(), 1);
    assert!(!allowed);
}

#[test]
fn long_moved_or_multi_finger_touches_are_not_taps() {
    let host = host();
    let c = component(&host, json!({}));
    c.emit_tap_events();
    let (taps, f) = counter();
    c.on("tap", f);

    touch_start(&c, 0.0, 0.0);
    host.scheduler().advance(Duration::from_millis(250));
    assert!(c.trigger(Event::touch("touchend", Vec::new()), None));

    touch_start(&c, 0.0, 0.0);
    c.trigger(Event::touch("touchmove", vec![Touch::new(30.0, 0.0)]), None);
    c.trigger(Event::touch("touchend", Vec::new()), None);

    c.trigger(
        Event::touch("touchstart", vec![Touch::new(0.0, 0.0), Touch::new(5.0, 5.0)]),
        None,
    );
    c.trigger(Event::touch("touchend", Vec::new()), None);

    touch_start(&c, 0.0, 0.0);
    c.trigger("touchcancel", None);
    c.trigger(Event::touch("touchend", Vec::new()), None);

    assert_eq!(taps.get(), 0);
}

#[test]
fn small_movement_still_counts_as_tap() {
    let host = host();
    let c = component(&host, json!({}));
    c.emit_tap_events();
    let (taps, f) = counter();
    c.on("tap", f);

    touch_start(&c, 0.0, 0.0);
    c.trigger(Event::touch("touchmove", vec![Touch::new(6.0, 8.0)]), None);
    c.trigger(Event::touch("touchend", Vec::new()), None);
    assert_eq!(taps.get(), 1);
}

#[test]
fn held_touch_reports_activity_until_released() {
    let host = host();
    let reports = Rc::new(Cell::new(0));
    let inner = reports.clone();
    host.set_activity_reporter(move || inner.set(inner.get() + 1));
    let c = component(&host, json!({}));

    touch_start(&c, 0.0, 0.0);
    assert_eq!(reports.get(), 1);
    host.scheduler().advance(Duration::from_millis(600));
    assert_eq!(reports.get(), 3);

    c.trigger("touchmove", None);
    c.trigger("touchend", None);
    assert_eq!(reports.get(), 5);
    assert_eq!(host.scheduler().pending(), 0);

    host.scheduler().advance(Duration::from_millis(1000));
    assert_eq!(reports.get(), 5);
}

#[test]
fn touch_activity_can_be_turned_off() {
    let host = host();
    let reports = Rc::new(Cell::new(0));
    let inner = reports.clone();
    host.set_activity_reporter(move || inner.set(inner.get() + 1));
    let c = component(&host, json!({ "reportTouchActivity": false }));

    touch_start(&c, 0.0, 0.0);
    assert_eq!(reports.get(), 0);
}
