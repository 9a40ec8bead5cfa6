//! The editor session: one object owning all per-editor state.
//!
//! The host forwards DOM events together with a timestamp and asks for the
//! next deadline so it can schedule a wake-up that calls [`EditorSession::tick`].
//! Focus and blur of the link input come back as [`EventOutcome`] flags so
//! the host can apply them after it has released its borrow of the session.

use crate::actions::{EventOutcome, FormatCommand, FormatKind, Key, PLACEHOLDER_LINK};
use crate::actions::{link_commands, quote_toggle};
use crate::autosave::{IndicatorChange, PersistedDocument, SaveIndicator};
use crate::autosave::{load_document, save_document};
use crate::bubble::BubbleController;
use crate::config::EditorConfig;
use crate::error::EditorError;
use crate::link::LinkEditor;
use crate::modes::{DisplayModes, focus_block_change, typewriter_scroll};
use crate::platform::{DocumentStore, EditorPlatform};
use crate::text::{extract_text, word_count};
use crate::timer::{Millis, earliest};
use crate::tree::{AncestorSet, scan_ancestors};
use crate::types::{EventOrigin, SelectionSnapshot};

pub struct EditorSession<P: EditorPlatform, S: DocumentStore> {
    platform: P,
    /// None when the host has no usable persistent storage.
    store: Option<S>,
    config: EditorConfig,
    bubble: BubbleController,
    link: LinkEditor<P::Range>,
    modes: DisplayModes,
    composing: bool,
    indicator: SaveIndicator,
    active_block: Option<P::Node>,
}

impl<P: EditorPlatform, S: DocumentStore> EditorSession<P, S> {
    pub fn new(platform: P, store: Option<S>, config: EditorConfig) -> Self {
        let bubble = BubbleController::new(
            config.fade_delay_ms,
            config.bubble_offset_px,
            config.container_tag.as_str(),
        );
        let link = LinkEditor::new(config.link_reveal_delay_ms);
        let indicator =
            SaveIndicator::new(config.save_indicator_delay_ms, config.save_indicator_visible_ms);

        Self {
            platform,
            store,
            config,
            bubble,
            link,
            modes: DisplayModes::default(),
            composing: false,
            indicator,
            active_block: None,
        }
    }

    pub fn platform(&self) -> &P {
        &self.platform
    }

    pub fn platform_mut(&mut self) -> &mut P {
        &mut self.platform
    }

    pub fn store(&self) -> Option<&S> {
        self.store.as_ref()
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn bubble(&self) -> &BubbleController {
        &self.bubble
    }

    pub fn modes(&self) -> DisplayModes {
        self.modes
    }

    pub fn is_composing(&self) -> bool {
        self.composing
    }

    pub fn autosave_enabled(&self) -> bool {
        self.store.is_some()
    }

    /// Load saved or default content and put the caret in the header.
    pub fn init(&mut self) {
        let persisted = match &self.store {
            Some(store) => load_document(store),
            None => {
                tracing::debug!(target: "zenpen::session", "storage unavailable, loading defaults");
                PersistedDocument::default()
            }
        };

        let (header, content) =
            persisted.or_defaults(&self.config.default_title, &self.config.default_content);
        self.platform.set_header_html(&header);
        self.platform.set_content_html(&content);

        self.platform.render_toolbar(self.bubble.state());
        if let Err(e) = self
            .platform
            .place_caret_in_header(self.config.header_caret_offset)
        {
            tracing::warn!(target: "zenpen::session", error = %e, "could not place caret in header");
        }

        tracing::debug!(
            target: "zenpen::session",
            autosave = self.store.is_some(),
            "session initialized"
        );
    }

    pub fn on_key_up(&mut self, origin: EventOrigin, now: Millis) {
        self.check_selection(origin, now);

        if self.store.is_some() {
            if let Err(e) = self.save_state(now) {
                tracing::warn!(target: "zenpen::session", error = %e, "autosave failed");
            }
        }
    }

    pub fn on_mouse_down(&mut self, origin: EventOrigin, now: Millis) {
        self.check_selection(origin, now);
    }

    /// Mouse release. The host delays this slightly so the selection has
    /// settled by the time it is read.
    pub fn on_mouse_up(&mut self, origin: EventOrigin, now: Millis) {
        self.check_selection(origin, now);
    }

    pub fn on_resize(&mut self) {
        self.reposition();
    }

    pub fn on_scroll(&mut self) {
        self.reposition();
    }

    pub fn on_composition_start(&mut self) {
        self.composing = true;
    }

    pub fn on_composition_end(&mut self) {
        self.composing = false;
    }

    pub fn on_bold_click(&mut self) {
        self.exec(&FormatCommand::Bold);
    }

    pub fn on_italic_click(&mut self) {
        self.exec(&FormatCommand::Italic);
    }

    /// Toggle a block quote around the selection.
    pub fn on_quote_click(&mut self) {
        let ancestors = self.selection_ancestors(&self.platform.selection());
        for command in quote_toggle(&ancestors) {
            self.exec(&command);
        }
    }

    /// Show or hide the link input.
    pub fn on_link_click(&mut self, now: Millis) {
        let open = self.link.toggle(now);
        self.platform.set_link_mode(open);
        tracing::trace!(target: "zenpen::link", open, "link input toggled");
    }

    /// Run a toolbar action as if its control had been clicked.
    pub fn apply_format(&mut self, kind: FormatKind, now: Millis) {
        match kind {
            FormatKind::Bold => self.on_bold_click(),
            FormatKind::Italic => self.on_italic_click(),
            FormatKind::Quote => self.on_quote_click(),
            FormatKind::Link => self.on_link_click(now),
        }
        let ancestors = self.selection_ancestors(&self.platform.selection());
        self.bubble.refresh_flags(ancestors);
        self.platform.render_toolbar(self.bubble.state());
    }

    /// Enter only asks the host to blur the input; the blur handler applies
    /// the link. Restoring the range from here would move focus out of the
    /// input while this call is still running.
    pub fn on_link_input_key(&mut self, key: &Key) -> EventOutcome {
        match key {
            Key::Enter => {
                EventOutcome {
                    prevent_default: true,
                    blur_link_input: true,
                    ..Default::default()
                }
            }
            _ => EventOutcome::default(),
        }
    }

    /// The link input lost focus: apply what was typed and close it.
    pub fn on_link_input_blur(&mut self) {
        self.link.close();
        self.platform.set_link_mode(false);

        let url = self.platform.link_input_value();
        self.apply_link(&url);
        self.platform.set_link_input_value("");

        let ancestors = self.selection_ancestors(&self.platform.selection());
        self.bubble.refresh_flags(ancestors);
        self.platform.render_toolbar(self.bubble.state());
    }

    /// Run every timer due at `now`.
    pub fn tick(&mut self, now: Millis) -> EventOutcome {
        let mut outcome = EventOutcome::default();

        if self.bubble.tick(now) {
            self.platform.render_toolbar(self.bubble.state());
        }

        if self.link.poll_reveal(now) {
            outcome = outcome.merge(self.reveal_link());
        }

        for change in self.indicator.tick(now) {
            self.platform
                .set_save_indicator(change == IndicatorChange::Show);
        }

        outcome
    }

    /// Earliest pending timer deadline, if any.
    pub fn next_deadline(&self) -> Option<Millis> {
        earliest([
            self.bubble.next_deadline(),
            self.link.next_deadline(),
            self.indicator.next_deadline(),
        ])
    }

    /// Persist header and content, then restart the indicator's quiet period.
    ///
    /// Does nothing when storage is unavailable.
    pub fn save_state(&mut self, now: Millis) -> Result<(), EditorError> {
        let Some(store) = self.store.as_mut() else {
            return Ok(());
        };

        let header = self.platform.header_html();
        let content = self.platform.content_html();
        save_document(store, &header, &content)?;
        self.indicator.saved(now);

        tracing::trace!(target: "zenpen::autosave", bytes = header.len() + content.len(), "saved");
        Ok(())
    }

    pub fn word_count(&self) -> usize {
        let root = self.platform.content_root();
        word_count(&extract_text(&self.platform, &root))
    }

    pub fn toggle_typewriter(&mut self) -> bool {
        self.modes.typewriter = !self.modes.typewriter;
        if self.modes.typewriter {
            let selection = self.platform.selection();
            self.center_caret(&selection);
        }
        self.modes.typewriter
    }

    pub fn toggle_focus(&mut self) -> bool {
        self.modes.focus = !self.modes.focus;
        self.platform.set_focus_mode(self.modes.focus);

        if self.modes.focus {
            let selection = self.platform.selection();
            self.update_focus_block(&selection);
        } else if let Some(block) = self.active_block.take() {
            self.platform.set_block_active(&block, false);
        }
        self.modes.focus
    }

    /// Drop all pending deferred work.
    pub fn clear_timers(&mut self) {
        self.indicator.clear();
        self.link.reset();
    }

    fn check_selection(&mut self, origin: EventOrigin, now: Millis) {
        let selection = self.platform.selection();

        if origin == EventOrigin::ToolbarInput {
            if selection.focus.is_some() {
                let ancestors = self.selection_ancestors(&selection);
                self.bubble.refresh_flags(ancestors);
                self.platform.render_toolbar(self.bubble.state());
            }
            return;
        }

        let viewport = self.platform.viewport();
        self.bubble
            .observe(&self.platform, &selection, &viewport, self.composing, now);
        self.platform.render_toolbar(self.bubble.state());

        if self.modes.typewriter && selection.collapsed {
            self.center_caret(&selection);
        }

        if self.modes.focus {
            self.update_focus_block(&selection);
        }
    }

    fn reposition(&mut self) {
        let rect = self.platform.selection().rect;
        let viewport = self.platform.viewport();
        if self.bubble.reposition(rect.as_ref(), &viewport) {
            self.platform.render_toolbar(self.bubble.state());
        }
    }

    fn center_caret(&mut self, selection: &SelectionSnapshot<P::Node>) {
        let Some(rect) = &selection.rect else {
            return;
        };
        let viewport = self.platform.viewport();
        if let Some(dy) =
            typewriter_scroll(rect.top, &viewport, self.config.typewriter_threshold_px)
        {
            tracing::trace!(target: "zenpen::modes", dy, "typewriter scroll");
            self.platform.scroll_by(dy);
        }
    }

    fn update_focus_block(&mut self, selection: &SelectionSnapshot<P::Node>) {
        if !selection.has_range() {
            return;
        }
        let Some(focus) = &selection.focus else {
            return;
        };

        let Some(change) = focus_block_change(
            &self.platform,
            focus,
            self.active_block.as_ref(),
            &self.config.container_tag,
            &self.config.content_class,
        ) else {
            return;
        };

        if let Some(old) = &change.unmark {
            self.platform.set_block_active(old, false);
        }
        if let Some(new) = &change.mark {
            self.platform.set_block_active(new, true);
        }
        if change.unmark.is_some() || change.mark.is_some() {
            self.active_block = change.mark;
        }
    }

    fn reveal_link(&mut self) -> EventOutcome {
        let ancestors = self.selection_ancestors(&self.platform.selection());

        if ancestors.has_format(FormatKind::Link) {
            let url = ancestors.link().unwrap_or_default().to_string();
            self.platform.set_link_input_value(&url);
        } else {
            // Marks the selection while the URL is typed; replaced on apply.
            self.exec(&FormatCommand::CreateLink(PLACEHOLDER_LINK.to_string()));
        }

        let range = self.platform.capture_range();
        self.link.capture(range);
        self.bubble.mark_selection_open();

        EventOutcome {
            focus_link_input: true,
            ..Default::default()
        }
    }

    fn apply_link(&mut self, url: &str) {
        if let Some(range) = self.link.captured().cloned() {
            if let Err(e) = self.platform.restore_range(&range) {
                tracing::warn!(target: "zenpen::link", error = %e, "could not restore selection");
            }
        }

        for command in link_commands(url) {
            self.exec(&command);
        }
    }

    fn selection_ancestors(&self, selection: &SelectionSnapshot<P::Node>) -> AncestorSet {
        selection
            .focus
            .as_ref()
            .map(|focus| scan_ancestors(&self.platform, focus))
            .unwrap_or_default()
    }

    fn exec(&mut self, command: &FormatCommand) {
        tracing::trace!(target: "zenpen::format", command = command.name(), value = ?command.value());
        if let Err(e) = self.platform.exec(command) {
            tracing::warn!(target: "zenpen::format", error = %e, "formatting command failed");
        }
    }
}
