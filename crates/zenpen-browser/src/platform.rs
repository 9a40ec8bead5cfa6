//! Browser implementation of the editor platform traits.
//!
//! Binds the page's header, content and toolbar elements once, then applies
//! the session's decisions through classes, inline styles, the Selection API
//! and `document.execCommand`.

use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlDocument, HtmlElement, HtmlInputElement, Node, Window};
use zenpen_core::{
    BubbleVisibility, EditorError, EditorPlatform, FormatCommand, FormatKind, FormatPlatform,
    PlatformError, Rect, SelectionSnapshot, Selectors, ToolbarState, Viewport,
};

const ACTIVE_CLASS: &str = "active";
const FADE_CLASS: &str = "fade";
const URL_MODE_CLASS: &str = "url-mode";
const FOCUS_MODE_CLASS: &str = "focus-mode";
const ACTIVE_BLOCK_CLASS: &str = "active-block";
const VISIBLE_CLASS: &str = "visible";

/// Find a required element under `document` and cast it.
fn query_document<T: JsCast>(document: &HtmlDocument, selector: &str) -> Result<T, EditorError> {
    document
        .query_selector(selector)
        .ok()
        .flatten()
        .and_then(|el| el.dyn_into::<T>().ok())
        .ok_or_else(|| EditorError::missing(selector))
}

/// Find a required element under `root` and cast it.
fn query_within<T: JsCast>(root: &Element, selector: &str) -> Result<T, EditorError> {
    root.query_selector(selector)
        .ok()
        .flatten()
        .and_then(|el| el.dyn_into::<T>().ok())
        .ok_or_else(|| EditorError::missing(selector))
}

fn js_reason(value: &wasm_bindgen::JsValue) -> String {
    value
        .as_string()
        .unwrap_or_else(|| format!("{:?}", value))
}

/// The editor's DOM, bound to live elements.
pub struct BrowserPlatform {
    window: Window,
    document: HtmlDocument,
    header: HtmlElement,
    content: HtmlElement,
    text_options: HtmlElement,
    options: Element,
    bold: Element,
    italic: Element,
    quote: Element,
    url: Element,
    url_input: HtmlInputElement,
    save_indicator: Option<Element>,
}

impl BrowserPlatform {
    /// Look up every element the editor needs.
    ///
    /// The save indicator is optional; everything else must exist.
    pub fn bind(selectors: &Selectors) -> Result<Self, EditorError> {
        let window = web_sys::window().ok_or_else(|| EditorError::missing("window"))?;
        let document = window
            .document()
            .and_then(|d| d.dyn_into::<HtmlDocument>().ok())
            .ok_or_else(|| EditorError::missing("document"))?;

        let header = query_document::<HtmlElement>(&document, &selectors.header)?;
        let content = query_document::<HtmlElement>(&document, &selectors.content)?;
        let text_options = query_document::<HtmlElement>(&document, &selectors.text_options)?;

        let options = query_within::<Element>(&text_options, &selectors.options)?;
        let bold = query_within::<Element>(&text_options, &selectors.bold)?;
        let italic = query_within::<Element>(&text_options, &selectors.italic)?;
        let quote = query_within::<Element>(&text_options, &selectors.quote)?;
        let url = query_within::<Element>(&text_options, &selectors.url)?;
        let url_input = query_within::<HtmlInputElement>(&text_options, &selectors.url_input)?;

        let save_indicator = document
            .query_selector(&selectors.save_indicator)
            .ok()
            .flatten();

        tracing::debug!(
            target: "zenpen::platform",
            save_indicator = save_indicator.is_some(),
            "editor elements bound"
        );

        Ok(Self {
            window,
            document,
            header,
            content,
            text_options,
            options,
            bold,
            italic,
            quote,
            url,
            url_input,
            save_indicator,
        })
    }

    pub fn window(&self) -> &Window {
        &self.window
    }

    pub fn document(&self) -> &HtmlDocument {
        &self.document
    }

    pub fn header(&self) -> &HtmlElement {
        &self.header
    }

    pub fn content(&self) -> &HtmlElement {
        &self.content
    }

    pub fn text_options(&self) -> &HtmlElement {
        &self.text_options
    }

    pub fn bold_button(&self) -> &Element {
        &self.bold
    }

    pub fn italic_button(&self) -> &Element {
        &self.italic
    }

    pub fn quote_button(&self) -> &Element {
        &self.quote
    }

    pub fn url_button(&self) -> &Element {
        &self.url
    }

    pub fn url_input(&self) -> &HtmlInputElement {
        &self.url_input
    }

    fn control(&self, kind: FormatKind) -> &Element {
        match kind {
            FormatKind::Bold => &self.bold,
            FormatKind::Italic => &self.italic,
            FormatKind::Quote => &self.quote,
            FormatKind::Link => &self.url,
        }
    }

    fn dom_selection(&self) -> Option<web_sys::Selection> {
        self.window.get_selection().ok().flatten()
    }
}

fn set_class(element: &Element, class: &str, on: bool) {
    let _ = element.class_list().toggle_with_force(class, on);
}

fn to_rect(rect: &web_sys::DomRect) -> Rect {
    Rect::new(rect.left(), rect.top(), rect.right(), rect.bottom())
}

impl FormatPlatform for BrowserPlatform {
    fn exec(&mut self, command: &FormatCommand) -> Result<(), PlatformError> {
        let name = command.name();
        let result = match command.value() {
            Some(value) => self
                .document
                .exec_command_with_show_ui_and_value(name, false, value),
            None => self.document.exec_command(name),
        };

        match result {
            Ok(applied) => {
                if !applied {
                    tracing::debug!(target: "zenpen::format", command = name, "command not applied");
                }
                Ok(())
            }
            Err(e) => Err(PlatformError::Command {
                command: name,
                reason: js_reason(&e),
            }),
        }
    }
}

impl EditorPlatform for BrowserPlatform {
    type Range = web_sys::Range;

    fn selection(&self) -> SelectionSnapshot<Node> {
        let Some(selection) = self.dom_selection() else {
            return SelectionSnapshot::default();
        };

        let rect = if selection.range_count() > 0 {
            selection
                .get_range_at(0)
                .ok()
                .map(|range| to_rect(&range.get_bounding_client_rect()))
        } else {
            None
        };

        SelectionSnapshot {
            focus: selection.focus_node(),
            collapsed: selection.is_collapsed(),
            rect,
        }
    }

    fn viewport(&self) -> Viewport {
        Viewport::new(
            self.window.scroll_x().unwrap_or(0.0),
            self.window.scroll_y().unwrap_or(0.0),
            self.window
                .inner_height()
                .ok()
                .and_then(|h| h.as_f64())
                .unwrap_or(0.0),
        )
    }

    fn capture_range(&self) -> Option<web_sys::Range> {
        let selection = self.dom_selection()?;
        if selection.range_count() == 0 {
            return None;
        }
        selection.get_range_at(0).ok()
    }

    fn restore_range(&mut self, range: &web_sys::Range) -> Result<(), PlatformError> {
        let selection = self.dom_selection().ok_or("no selection object")?;
        if selection.range_count() > 0 {
            selection
                .remove_all_ranges()
                .map_err(|e| format!("remove_all_ranges failed: {}", js_reason(&e)))?;
        }
        selection
            .add_range(range)
            .map_err(|e| format!("add_range failed: {}", js_reason(&e)))?;
        Ok(())
    }

    fn render_toolbar(&mut self, state: &ToolbarState) {
        set_class(
            &self.text_options,
            ACTIVE_CLASS,
            state.visibility == BubbleVisibility::Active,
        );
        set_class(
            &self.text_options,
            FADE_CLASS,
            state.visibility == BubbleVisibility::Fading,
        );

        let style = self.text_options.style();
        let _ = style.set_property("top", &format!("{}px", state.position.y));
        let _ = style.set_property("left", &format!("{}px", state.position.x));

        for kind in FormatKind::ALL {
            set_class(self.control(kind), ACTIVE_CLASS, state.flags.is_active(kind));
        }
    }

    fn set_link_mode(&mut self, open: bool) {
        set_class(&self.options, URL_MODE_CLASS, open);
    }

    fn link_input_value(&self) -> String {
        self.url_input.value()
    }

    fn set_link_input_value(&mut self, value: &str) {
        self.url_input.set_value(value);
    }

    fn scroll_by(&mut self, dy: f64) {
        let options = web_sys::ScrollToOptions::new();
        options.set_top(dy);
        options.set_behavior(web_sys::ScrollBehavior::Smooth);
        self.window.scroll_by_with_scroll_to_options(&options);
    }

    fn set_focus_mode(&mut self, enabled: bool) {
        if let Some(body) = self.document.body() {
            set_class(&body, FOCUS_MODE_CLASS, enabled);
        }
    }

    fn set_block_active(&mut self, block: &Node, active: bool) {
        if let Some(element) = block.dyn_ref::<Element>() {
            set_class(element, ACTIVE_BLOCK_CLASS, active);
        }
    }

    fn set_save_indicator(&mut self, visible: bool) {
        if let Some(indicator) = &self.save_indicator {
            set_class(indicator, VISIBLE_CLASS, visible);
        }
    }

    fn header_html(&self) -> String {
        self.header.inner_html()
    }

    fn content_html(&self) -> String {
        self.content.inner_html()
    }

    fn set_header_html(&mut self, html: &str) {
        self.header.set_inner_html(html);
    }

    fn set_content_html(&mut self, html: &str) {
        self.content.set_inner_html(html);
    }

    fn content_root(&self) -> Node {
        self.content.clone().into()
    }

    fn place_caret_in_header(&mut self, offset: u32) -> Result<(), PlatformError> {
        let range = self
            .document
            .create_range()
            .map_err(|e| format!("create_range failed: {}", js_reason(&e)))?;
        range
            .set_start(&self.header, offset)
            .map_err(|e| format!("set_start failed: {}", js_reason(&e)))?;

        let selection = self.dom_selection().ok_or("no selection object")?;
        selection
            .remove_all_ranges()
            .map_err(|e| format!("remove_all_ranges failed: {}", js_reason(&e)))?;
        selection
            .add_range(&range)
            .map_err(|e| format!("add_range failed: {}", js_reason(&e)))?;
        Ok(())
    }
}
