//! WASM browser tests for zenpen-browser.
//!
//! Run with: `wasm-pack test --headless --firefox` or `--chrome`

use gloo_timers::future::TimeoutFuture;
use wasm_bindgen_test::*;
use web_sys::{Event, EventInit, EventTarget, KeyboardEvent, KeyboardEventInit};

wasm_bindgen_test_configure!(run_in_browser);

use zenpen_browser::{
    BrowserPlatform, BubbleVisibility, CONTENT_KEY, DocumentStore, EditorConfig, EditorError,
    EditorHandle, EditorPlatform, EventOrigin, FormatFlags, HEADER_KEY, LocalDocumentStore,
    NodeTree, Point, Selectors, ToolbarState, event_origin, scan_ancestors,
    supports_local_storage,
};

const FIXTURE: &str = r#"
<header class="header" contenteditable="true"></header>
<article><div class="content" contenteditable="true"></div></article>
<div class="text-options">
  <div class="options">
    <span class="ui-inputs">
      <button class="url useicons">a</button>
      <input class="url-input" type="text">
      <button class="bold">b</button>
      <button class="italic">i</button>
      <button class="quote">q</button>
    </span>
  </div>
</div>
<div class="save-indicator"></div>
"#;

fn document() -> web_sys::Document {
    gloo_utils::document()
}

fn load_fixture() {
    gloo_utils::body().set_inner_html(FIXTURE);
}

fn clear_storage() {
    let storage = web_sys::window().unwrap().local_storage().unwrap().unwrap();
    storage.remove_item(HEADER_KEY).unwrap();
    storage.remove_item(CONTENT_KEY).unwrap();
}

fn has_class(selector: &str, class: &str) -> bool {
    document()
        .query_selector(selector)
        .unwrap()
        .unwrap()
        .class_list()
        .contains(class)
}

fn fire(target: &EventTarget, event_type: &str) -> Event {
    let init = EventInit::new();
    init.set_bubbles(true);
    let event = Event::new_with_event_init_dict(event_type, &init).unwrap();
    target.dispatch_event(&event).unwrap();
    event
}

fn press(target: &EventTarget, key: &str) -> KeyboardEvent {
    let init = KeyboardEventInit::new();
    init.set_bubbles(true);
    init.set_cancelable(true);
    init.set_key(key);
    let event = KeyboardEvent::new_with_keyboard_event_init_dict("keydown", &init).unwrap();
    target.dispatch_event(&event).unwrap();
    event
}

/// Select the contents of the first node matching `selector`.
fn select_contents(selector: &str) {
    let node = document().query_selector(selector).unwrap().unwrap();
    let range = document().create_range().unwrap();
    range.select_node_contents(&node).unwrap();
    let selection = gloo_utils::window().get_selection().unwrap().unwrap();
    selection.remove_all_ranges().unwrap();
    selection.add_range(&range).unwrap();
}

// === Storage ===

#[wasm_bindgen_test]
fn test_local_storage_is_detected() {
    assert!(supports_local_storage());
}

#[wasm_bindgen_test]
fn test_local_store_reads_raw_markup() {
    clear_storage();
    let mut store = LocalDocumentStore::new();
    assert_eq!(store.get(HEADER_KEY), None);

    store.set(HEADER_KEY, "<b>Title</b>").unwrap();
    assert_eq!(store.get(HEADER_KEY).as_deref(), Some("<b>Title</b>"));
    clear_storage();
}

// === DOM tree ===

#[wasm_bindgen_test]
fn test_ancestor_scan_over_dom() {
    load_fixture();
    let mut platform = BrowserPlatform::bind(&Selectors::default()).unwrap();
    platform.set_content_html("<p>plain <b>bold <a href=\"https://example.com/\">x</a></b></p>");

    let anchor = document().query_selector(".content a").unwrap().unwrap();
    let text = anchor.first_child().unwrap();
    let ancestors = scan_ancestors(&platform, &text);

    assert!(ancestors.contains("B"));
    assert!(ancestors.contains("A"));
    assert!(ancestors.contains("ARTICLE"));
    assert_eq!(ancestors.link(), Some("https://example.com/"));
    assert_eq!(platform.name(&text), "#text");
}

// === Binding ===

#[wasm_bindgen_test]
fn test_missing_element_is_reported() {
    gloo_utils::body().set_inner_html("<header class=\"header\"></header>");
    match BrowserPlatform::bind(&Selectors::default()) {
        Err(EditorError::MissingElement { selector }) => assert_eq!(selector, ".content"),
        Err(e) => panic!("unexpected error: {e}"),
        Ok(_) => panic!("binding should fail"),
    }
}

#[wasm_bindgen_test]
fn test_render_toolbar_sets_classes_and_position() {
    load_fixture();
    let mut platform = BrowserPlatform::bind(&Selectors::default()).unwrap();

    platform.render_toolbar(&ToolbarState {
        visibility: BubbleVisibility::Active,
        position: Point::new(150.0, 35.0),
        flags: FormatFlags {
            bold: true,
            ..Default::default()
        },
    });

    assert!(has_class(".text-options", "active"));
    assert!(!has_class(".text-options", "fade"));
    assert!(has_class(".bold", "active"));
    assert!(!has_class(".italic", "active"));

    let style = platform.text_options().style();
    assert_eq!(style.get_property_value("top").unwrap(), "35px");
    assert_eq!(style.get_property_value("left").unwrap(), "150px");

    platform.render_toolbar(&ToolbarState::default());
    assert!(!has_class(".text-options", "active"));
    assert!(!has_class(".bold", "active"));
    assert_eq!(style.get_property_value("top").unwrap(), "-999px");
}

#[wasm_bindgen_test]
fn test_link_mode_toggles_options_class() {
    load_fixture();
    let mut platform = BrowserPlatform::bind(&Selectors::default()).unwrap();
    platform.set_link_mode(true);
    assert!(has_class(".options", "url-mode"));
    platform.set_link_mode(false);
    assert!(!has_class(".options", "url-mode"));
}

// === Mounted editor ===

#[wasm_bindgen_test]
fn test_mount_loads_defaults_and_counts_words() {
    load_fixture();
    clear_storage();

    let config = EditorConfig {
        default_title: "Draft".into(),
        default_content: "<p>one two</p><p>three</p>".into(),
        ..Default::default()
    };
    let editor = EditorHandle::mount(config).unwrap();

    let header = document().query_selector(".header").unwrap().unwrap();
    assert_eq!(header.inner_html(), "Draft");
    // Block text is joined without a separator.
    assert_eq!(editor.word_count(), 2);

    editor.destroy();
}

#[wasm_bindgen_test]
fn test_mount_restores_saved_content() {
    load_fixture();
    clear_storage();
    LocalDocumentStore::new()
        .set(CONTENT_KEY, "<p>saved words here</p>")
        .unwrap();

    let editor = EditorHandle::mount(EditorConfig::default()).unwrap();
    let content = document().query_selector(".content").unwrap().unwrap();
    assert_eq!(content.inner_html(), "<p>saved words here</p>");
    assert_eq!(editor.word_count(), 3);

    editor.save_state().unwrap();
    assert_eq!(
        LocalDocumentStore::new().get(HEADER_KEY).as_deref(),
        Some("ZenPen")
    );

    drop(editor);
    clear_storage();
}

#[wasm_bindgen_test]
fn test_focus_mode_toggles_body_class() {
    load_fixture();
    clear_storage();
    let editor = EditorHandle::mount(EditorConfig::default()).unwrap();

    assert!(editor.toggle_focus_mode());
    assert!(gloo_utils::body().class_list().contains("focus-mode"));

    assert!(!editor.toggle_focus_mode());
    assert!(!gloo_utils::body().class_list().contains("focus-mode"));
    assert!(document().query_selector(".active-block").unwrap().is_none());
    assert!(!editor.with_session(|session| session.modes().focus));
}

// === Event wiring ===

#[wasm_bindgen_test]
fn test_event_origin_classifies_toolbar_targets() {
    load_fixture();

    let input = document().query_selector(".url-input").unwrap().unwrap();
    let event = fire(&input, "keyup");
    assert_eq!(event_origin(&event), EventOrigin::ToolbarInput);

    let bold = document().query_selector(".bold").unwrap().unwrap();
    let event = fire(&bold, "mousedown");
    assert_eq!(event_origin(&event), EventOrigin::ToolbarInput);

    let content = document().query_selector(".content").unwrap().unwrap();
    let event = fire(&content, "keyup");
    assert_eq!(event_origin(&event), EventOrigin::Document);
}

#[wasm_bindgen_test]
async fn test_keyup_saves_and_flashes_indicator() {
    load_fixture();
    clear_storage();
    let editor = EditorHandle::mount(EditorConfig::default()).unwrap();

    let content = editor.with_session(|session| session.platform().content().clone());
    content.set_inner_html("<p>typed words</p>");
    fire(&content, "keyup");

    assert_eq!(
        LocalDocumentStore::new().get(CONTENT_KEY).as_deref(),
        Some("<p>typed words</p>")
    );
    assert!(!has_class(".save-indicator", "visible"));

    TimeoutFuture::new(1_100).await;
    assert!(has_class(".save-indicator", "visible"));

    TimeoutFuture::new(2_100).await;
    assert!(!has_class(".save-indicator", "visible"));

    drop(editor);
    clear_storage();
}

#[wasm_bindgen_test]
async fn test_link_entered_with_enter_key() {
    load_fixture();
    clear_storage();
    let editor = EditorHandle::mount(EditorConfig {
        default_content: "<p>link me</p>".into(),
        ..Default::default()
    })
    .unwrap();

    select_contents(".content p");
    let content = editor.with_session(|session| session.platform().content().clone());
    fire(&content, "mouseup");
    TimeoutFuture::new(20).await;
    assert!(has_class(".text-options", "active"));

    let url = document().query_selector(".url").unwrap().unwrap();
    fire(&url, "mousedown");
    assert!(has_class(".options", "url-mode"));
    TimeoutFuture::new(150).await;

    let input = editor.with_session(|session| session.platform().url_input().clone());
    input.set_value("example.com");
    input.focus().unwrap();

    let event = press(&input, "Enter");
    assert!(event.default_prevented());

    assert!(!has_class(".options", "url-mode"));
    assert_eq!(input.value(), "");
    let anchor = content.query_selector("a").unwrap().unwrap();
    assert_eq!(
        anchor.get_attribute("href").as_deref(),
        Some("http://example.com")
    );

    // The session is free again after the nested blur.
    assert_eq!(editor.word_count(), 2);
    assert!(!editor.with_session(|session| session.modes().typewriter));

    drop(editor);
    clear_storage();
}

#[wasm_bindgen_test]
fn test_header_accessor_matches_restored_title() {
    load_fixture();
    clear_storage();
    LocalDocumentStore::new().set(HEADER_KEY, "Notes").unwrap();

    let editor = EditorHandle::mount(EditorConfig::default()).unwrap();
    let header = editor.with_session(|session| session.platform().header().inner_html());
    assert_eq!(header, "Notes");

    drop(editor);
    clear_storage();
}
