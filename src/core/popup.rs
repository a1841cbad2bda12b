//! Popup lifecycle controller
//!
//! Owns the single live popup and moves it through
//! `Idle -> Loading -> (Success | Error) -> Hiding -> Idle`.
//!
//! All operations run on one task. Asynchronous work (translation, storage,
//! clipboard, timers) runs in spawned tasks that report back through the
//! controller's event queue tagged with the originating [`PopupId`] and
//! request sequence, so a result that outlives its popup is simply dropped.
//!
//! Listener subscriptions and timers live inside the popup as guards, so
//! tearing the popup down releases them on every path.

pub mod scope;
pub mod state;

pub use scope::{ListenerKind, ListenerRegistry, Subscription, TimerGuard};
pub use state::{InlineStatus, Phase, PopupState};

use crate::config::PopupConfig;
use crate::core::clipboard::ClipboardWriter;
use crate::core::features::translator::Translator;
use crate::core::placement::place_with_fit;
use crate::core::preferences::{PendingPreference, PreferenceQueue, TargetLanguagePreference};
use crate::render::{PopupRenderer, PopupView, RenderStrategy};
use crate::shared::error::{AppError, AppResult};
use crate::shared::events::{EventDisposition, HostEvent};
use crate::shared::types::{Point, PopupId, TranslationRequest, TranslationResult};
use crate::system::surface::PopupSurface;
use std::sync::Arc;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::{debug, info, warn};

/// External collaborators the controller talks to.
#[derive(Clone)]
pub struct Services {
    pub translator: Arc<dyn Translator>,
    pub preference: TargetLanguagePreference,
    pub clipboard: Arc<dyn ClipboardWriter>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestKind {
    Initial,
    Retranslation,
}

/// Completions and timer expiries delivered back to the controller.
#[derive(Debug)]
pub enum ControllerEvent {
    /// First layout pass after mount; the element can be measured.
    Layout(PopupId),
    TranslationFinished {
        popup: PopupId,
        seq: u64,
        kind: RequestKind,
        target_language: String,
        result: TranslationResult,
    },
    DismissDeadline(PopupId),
    CopyFinished {
        popup: PopupId,
        outcome: AppResult<()>,
    },
    CopyAckExpired(PopupId),
    HideElapsed(PopupId),
}

/// Where a request's target language comes from.
enum TargetSource {
    /// Read queued at trigger time.
    Stored(PendingPreference),
    /// Picked by the user; already queued for persisting.
    Chosen(String),
}

struct LivePopup {
    state: PopupState,
    dismiss_deadline: Option<TimerGuard>,
    copy_ack: Option<TimerGuard>,
    hide: Option<TimerGuard>,
    outside_click: Option<Subscription>,
    scroll: Option<Subscription>,
}

impl LivePopup {
    fn release_resources(&mut self) {
        self.dismiss_deadline = None;
        self.copy_ack = None;
        self.outside_click = None;
        self.scroll = None;
    }
}

pub struct PopupController<S: PopupSurface> {
    services: Services,
    surface: S,
    renderer: RenderStrategy,
    config: PopupConfig,
    listeners: ListenerRegistry,
    popup: Option<LivePopup>,
    /// Started on first use, so `new` works outside a runtime.
    preferences: Option<PreferenceQueue>,
    discarded: u64,
    tx: UnboundedSender<ControllerEvent>,
    rx: UnboundedReceiver<ControllerEvent>,
}

impl<S: PopupSurface> PopupController<S> {
    pub fn new(services: Services, surface: S, renderer: RenderStrategy, config: PopupConfig) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            services,
            surface,
            renderer,
            config,
            listeners: ListenerRegistry::new(),
            popup: None,
            preferences: None,
            discarded: 0,
            tx,
            rx,
        }
    }

    pub fn phase(&self) -> Phase {
        self.popup.as_ref().map(|p| p.state.phase).unwrap_or(Phase::Idle)
    }

    pub fn state(&self) -> Option<&PopupState> {
        self.popup.as_ref().map(|p| &p.state)
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn listeners(&self) -> &ListenerRegistry {
        &self.listeners
    }

    pub fn config(&self) -> &PopupConfig {
        &self.config
    }

    pub fn auto_dismiss_pending(&self) -> bool {
        self.popup.as_ref().is_some_and(|p| p.dismiss_deadline.is_some())
    }

    /// Completions and timer events that arrived for a popup that was no
    /// longer live (or for a superseded request) and were dropped.
    pub fn discarded_events(&self) -> u64 {
        self.discarded
    }

    /// Wait until every preference write issued so far is stored.
    pub async fn flush_preferences(&mut self) {
        self.preference_queue().flush().await;
    }

    /// Open a popup for `selected_text` at `anchor`, replacing any current one.
    pub fn trigger(&mut self, anchor: Point, selected_text: &str) -> AppResult<PopupId> {
        let text = selected_text.trim();
        if text.is_empty() {
            return Err(AppError::Validation("No text selected".to_string()));
        }

        self.teardown();

        let mut state = PopupState::new(anchor, text);
        state.request_seq = 1;
        let id = state.id;

        let content = self.renderer.render(&PopupView::from_state(&state));
        self.surface.mount(id, content, anchor);
        self.popup = Some(LivePopup {
            state,
            dismiss_deadline: None,
            copy_ack: None,
            hide: None,
            outside_click: Some(self.listeners.subscribe(ListenerKind::OutsidePointerDown)),
            scroll: Some(self.listeners.subscribe(ListenerKind::Scroll)),
        });
        info!("Popup {} created at ({}, {}) for {} chars", id, anchor.x, anchor.y, text.chars().count());

        let _ = self.tx.send(ControllerEvent::Layout(id));
        let target = TargetSource::Stored(self.preference_queue().get());
        self.spawn_translation(id, 1, RequestKind::Initial, text.to_string(), target);

        Ok(id)
    }

    /// Retranslate the current popup into `code`, in place.
    pub fn change_target_language(&mut self, code: &str) -> AppResult<()> {
        let code = code.trim();
        if code.is_empty() {
            return Err(AppError::Validation("Empty language code".to_string()));
        }

        let live = self
            .popup
            .as_mut()
            .filter(|p| matches!(p.state.phase, Phase::Success | Phase::Error))
            .ok_or_else(|| AppError::InvalidState("No translated popup to update".to_string()))?;

        live.state.target_language = Some(code.to_string());
        live.state.inline = InlineStatus::Translating;
        live.state.copy_acknowledged = false;
        live.copy_ack = None;
        live.state.request_seq += 1;

        let id = live.state.id;
        let seq = live.state.request_seq;
        let text = live.state.original_text.clone();
        info!("Popup {} retranslating to {}", id, code);

        self.render_current();
        self.preference_queue().set(code);
        self.spawn_translation(id, seq, RequestKind::Retranslation, text, TargetSource::Chosen(code.to_string()));
        Ok(())
    }

    /// Start hiding the popup. Safe to call any number of times.
    pub fn dismiss(&mut self) {
        let hide_delay = self.config.timings.hide_animation();
        let Some(live) = self.popup.as_mut() else {
            return;
        };
        if live.state.is_hiding() {
            return;
        }

        live.release_resources();
        live.state.phase = Phase::Hiding;
        let id = live.state.id;
        live.hide = Some(TimerGuard::schedule(&self.tx, hide_delay, ControllerEvent::HideElapsed(id)));

        self.surface.begin_hide(id);
        info!("Popup {} dismissed", id);
    }

    pub fn copy_current_translation(&mut self) -> AppResult<()> {
        let live = self
            .popup
            .as_ref()
            .filter(|p| p.state.phase == Phase::Success && p.state.inline == InlineStatus::Ready)
            .ok_or_else(|| AppError::InvalidState("No translation to copy".to_string()))?;
        let text = live
            .state
            .translated_text
            .clone()
            .ok_or_else(|| AppError::InvalidState("No translation to copy".to_string()))?;
        let popup = live.state.id;

        let clipboard = Arc::clone(&self.services.clipboard);
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let outcome = clipboard.write_text(&text).await;
            let _ = tx.send(ControllerEvent::CopyFinished { popup, outcome });
        });
        Ok(())
    }

    /// Pointer-down anywhere on the page.
    pub fn pointer_down(&mut self, at: Point) {
        let outside = match &self.popup {
            Some(live) => live.outside_click.is_some() && !live.state.contains(at),
            None => false,
        };
        if outside {
            debug!("Pointer down outside popup at ({}, {})", at.x, at.y);
            self.dismiss();
        }
    }

    /// Page scroll. Only the first scroll per popup counts.
    pub fn scroll(&mut self) {
        let fired = self.popup.as_mut().and_then(|live| live.scroll.take()).is_some();
        if fired {
            self.dismiss();
        }
    }

    pub fn handle_host_event(&mut self, event: HostEvent) -> EventDisposition {
        match event {
            HostEvent::Activate {
                button,
                anchor,
                selected_text,
            } => {
                if button != self.config.activation_button {
                    return EventDisposition::Ignored;
                }
                match self.trigger(anchor, &selected_text) {
                    Ok(_) => EventDisposition::Consumed,
                    Err(e) => {
                        debug!("Activation ignored: {}", e);
                        EventDisposition::Ignored
                    }
                }
            }
            HostEvent::SelectLanguage(code) => {
                if let Err(e) = self.change_target_language(&code) {
                    warn!("Language change rejected: {}", e);
                }
                EventDisposition::Consumed
            }
            HostEvent::CopyClicked => {
                if let Err(e) = self.copy_current_translation() {
                    warn!("Copy rejected: {}", e);
                }
                EventDisposition::Consumed
            }
            HostEvent::CloseClicked => {
                self.dismiss();
                EventDisposition::Consumed
            }
            HostEvent::PointerDown(at) => {
                self.pointer_down(at);
                EventDisposition::Ignored
            }
            HostEvent::Scrolled => {
                self.scroll();
                EventDisposition::Ignored
            }
            HostEvent::Shutdown => {
                self.teardown();
                EventDisposition::Ignored
            }
        }
    }

    /// Wait for the next completion or timer and apply it.
    pub async fn step(&mut self) {
        if let Some(event) = self.rx.recv().await {
            self.handle_internal(event);
        }
    }

    /// Drive the controller from a host event stream until `Shutdown` or the
    /// stream closes. Returns the surface.
    pub async fn run(mut self, mut host: UnboundedReceiver<HostEvent>) -> S {
        loop {
            tokio::select! {
                event = host.recv() => match event {
                    Some(HostEvent::Shutdown) | None => break,
                    Some(event) => {
                        self.handle_host_event(event);
                    }
                },
                Some(event) = self.rx.recv() => self.handle_internal(event),
            }
        }
        self.teardown();
        info!("Popup controller stopped");
        self.surface
    }

    fn handle_internal(&mut self, event: ControllerEvent) {
        match event {
            ControllerEvent::Layout(id) => self.on_layout(id),
            ControllerEvent::TranslationFinished {
                popup,
                seq,
                kind,
                target_language,
                result,
            } => self.on_translation_result(popup, seq, kind, target_language, result),
            ControllerEvent::DismissDeadline(id) => {
                if self.live_id() == Some(id) {
                    debug!("Popup {} auto-dismiss deadline reached", id);
                    self.dismiss();
                } else {
                    self.discard("dismiss deadline", id);
                }
            }
            ControllerEvent::CopyFinished { popup, outcome } => self.on_copy_finished(popup, outcome),
            ControllerEvent::CopyAckExpired(id) => {
                if let Some(live) = self.live_mut(id) {
                    live.state.copy_acknowledged = false;
                    live.copy_ack = None;
                    self.render_current();
                } else {
                    self.discard("copy acknowledgement", id);
                }
            }
            ControllerEvent::HideElapsed(id) => self.on_hide_elapsed(id),
        }
    }

    fn on_layout(&mut self, id: PopupId) {
        let Some(live) = self.popup.as_mut().filter(|p| p.state.id == id && !p.state.is_hiding()) else {
            self.discard("layout", id);
            return;
        };
        if live.state.position.is_some() {
            return;
        }

        let size = self.surface.measure(id);
        let (position, fit) = place_with_fit(live.state.anchor, size, self.surface.viewport(), &self.config.placement);
        live.state.size = Some(size);
        live.state.position = Some(position);
        self.surface.show_at(id, position);
        debug!("Popup {} placed at ({}, {}) {:?}", id, position.left, position.top, fit);
    }

    fn on_translation_result(
        &mut self,
        popup: PopupId,
        seq: u64,
        kind: RequestKind,
        requested_target: String,
        result: TranslationResult,
    ) {
        let auto_dismiss = self.config.timings.auto_dismiss();
        let Some(live) = self.popup.as_mut().filter(|p| p.state.id == popup && !p.state.is_hiding()) else {
            self.discard("translation result", popup);
            return;
        };
        if seq != live.state.request_seq {
            self.discard("superseded translation result", popup);
            return;
        }

        match result {
            TranslationResult::Success {
                translated_text,
                detected_language,
                target_language,
            } => {
                info!("Popup {} translated ({} -> {})", popup, detected_language, target_language);
                live.state.phase = Phase::Success;
                live.state.translated_text = Some(translated_text);
                live.state.detected_language = Some(detected_language);
                live.state.target_language = Some(target_language);
                live.state.error = None;
                live.state.inline = InlineStatus::Ready;

                if kind == RequestKind::Initial && !live.state.auto_dismiss_armed {
                    live.state.auto_dismiss_armed = true;
                    live.dismiss_deadline = Some(TimerGuard::schedule(
                        &self.tx,
                        auto_dismiss,
                        ControllerEvent::DismissDeadline(popup),
                    ));
                }
            }
            TranslationResult::Failure { error } => {
                warn!("Popup {} translation failed: {}", popup, error);
                match kind {
                    RequestKind::Initial => {
                        live.state.phase = Phase::Error;
                        live.state.error = Some(error);
                        live.state.target_language = Some(requested_target);
                    }
                    RequestKind::Retranslation => live.state.inline = InlineStatus::Failed,
                }
            }
        }

        self.render_current();
    }

    fn on_copy_finished(&mut self, popup: PopupId, outcome: AppResult<()>) {
        if let Err(e) = outcome {
            warn!("Failed to copy: {}", e);
            return;
        }
        let ack = self.config.timings.copy_ack();
        let tx = self.tx.clone();
        let Some(live) = self.live_mut(popup) else {
            self.discard("copy completion", popup);
            return;
        };
        live.state.copy_acknowledged = true;
        live.copy_ack = Some(TimerGuard::schedule(&tx, ack, ControllerEvent::CopyAckExpired(popup)));
        self.render_current();
    }

    fn on_hide_elapsed(&mut self, id: PopupId) {
        let finished = self.popup.as_ref().is_some_and(|p| p.state.id == id && p.state.is_hiding());
        if finished {
            self.popup = None;
            self.surface.remove(id);
            info!("Popup {} removed", id);
        } else {
            self.discard("hide completion", id);
        }
    }

    fn discard(&mut self, what: &str, id: PopupId) {
        self.discarded += 1;
        debug!("Discarding stale {} for popup {}", what, id);
    }

    fn preference_queue(&mut self) -> PreferenceQueue {
        let preference = &self.services.preference;
        self.preferences
            .get_or_insert_with(|| PreferenceQueue::spawn(preference.clone()))
            .clone()
    }

    /// Discard the current popup immediately, hiding or not.
    fn teardown(&mut self) {
        if let Some(live) = self.popup.take() {
            let id = live.state.id;
            drop(live);
            self.surface.remove(id);
            debug!("Popup {} torn down", id);
        }
    }

    fn live_id(&self) -> Option<PopupId> {
        self.popup
            .as_ref()
            .filter(|p| !p.state.is_hiding())
            .map(|p| p.state.id)
    }

    fn live_mut(&mut self, id: PopupId) -> Option<&mut LivePopup> {
        self.popup.as_mut().filter(|p| p.state.id == id && !p.state.is_hiding())
    }

    fn render_current(&mut self) {
        if let Some(live) = &self.popup {
            let content = self.renderer.render(&PopupView::from_state(&live.state));
            self.surface.update(live.state.id, content);
        }
    }

    fn spawn_translation(
        &self,
        popup: PopupId,
        seq: u64,
        kind: RequestKind,
        text: String,
        target: TargetSource,
    ) {
        let translator = Arc::clone(&self.services.translator);
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let target_language = match target {
                TargetSource::Stored(pending) => pending.wait().await,
                TargetSource::Chosen(code) => code,
            };
            let request = TranslationRequest::new(text, target_language.clone());
            let result = translator.translate(&request).await;
            let _ = tx.send(ControllerEvent::TranslationFinished {
                popup,
                seq,
                kind,
                target_language,
                result,
            });
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::clipboard::UnavailableClipboard;
    use crate::core::preferences::MemoryStore;
    use crate::render::TreeRenderer;
    use crate::shared::events::PointerButton;
    use crate::shared::types::{Size, Viewport};
    use crate::system::surface::{HeadlessSurface, SurfaceOp};
    use async_trait::async_trait;

    struct EchoTranslator;

    #[async_trait]
    impl Translator for EchoTranslator {
        async fn translate(&self, request: &TranslationRequest) -> TranslationResult {
            TranslationResult::success(
                format!("[{}] {}", request.target_language, request.text),
                "es",
                request.target_language.clone(),
            )
        }
    }

    fn controller() -> PopupController<HeadlessSurface> {
        let services = Services {
            translator: Arc::new(EchoTranslator),
            preference: TargetLanguagePreference::new(Arc::new(MemoryStore::new())),
            clipboard: Arc::new(UnavailableClipboard),
        };
        PopupController::new(
            services,
            HeadlessSurface::new(Viewport::new(1000.0, 800.0), Size::new(300.0, 100.0)),
            RenderStrategy::Tree(TreeRenderer),
            PopupConfig::default(),
        )
    }

    #[tokio::test]
    async fn test_blank_selection_is_rejected() {
        let mut c = controller();
        assert!(matches!(c.trigger(Point::new(1.0, 1.0), "  \n"), Err(AppError::Validation(_))));
        assert_eq!(c.phase(), Phase::Idle);
        assert!(c.surface().ops().is_empty());
    }

    #[tokio::test]
    async fn test_trigger_mounts_loading_then_places() {
        let mut c = controller();
        let id = c.trigger(Point::new(500.0, 100.0), " hello ").unwrap();
        assert_eq!(c.phase(), Phase::Loading);
        assert_eq!(c.state().unwrap().original_text, "hello");
        assert!(c.listeners().is_active(ListenerKind::Scroll));

        c.step().await; // layout
        assert_eq!(c.state().unwrap().position.map(|p| (p.left, p.top)), Some((350.0, 115.0)));

        c.step().await; // translation
        assert_eq!(c.phase(), Phase::Success);
        assert_eq!(c.state().unwrap().translated_text.as_deref(), Some("[en] hello"));
        assert_eq!(
            c.surface().ops_for(id),
            vec![
                SurfaceOp::Mount(id),
                SurfaceOp::ShowAt(id, crate::shared::types::Position::new(350.0, 115.0)),
                SurfaceOp::Update(id),
            ]
        );
    }

    #[tokio::test]
    async fn test_placement_uses_measured_size() {
        let mut c = controller();
        c.surface_mut().set_element_size(Size::new(500.0, 200.0));
        c.trigger(Point::new(500.0, 100.0), "hello").unwrap();
        c.step().await; // layout
        assert_eq!(c.state().unwrap().position.map(|p| (p.left, p.top)), Some((250.0, 115.0)));
    }

    #[tokio::test]
    async fn test_wrong_button_is_ignored() {
        let mut c = controller();
        let disposition = c.handle_host_event(HostEvent::Activate {
            button: PointerButton::Primary,
            anchor: Point::new(10.0, 10.0),
            selected_text: "hello".to_string(),
        });
        assert_eq!(disposition, EventDisposition::Ignored);
        assert_eq!(c.phase(), Phase::Idle);

        let disposition = c.handle_host_event(HostEvent::Activate {
            button: PointerButton::Middle,
            anchor: Point::new(10.0, 10.0),
            selected_text: "hello".to_string(),
        });
        assert_eq!(disposition, EventDisposition::Consumed);
        assert_eq!(c.phase(), Phase::Loading);
    }

    #[tokio::test]
    async fn test_change_language_requires_result() {
        let mut c = controller();
        assert!(matches!(c.change_target_language("fr"), Err(AppError::InvalidState(_))));
        c.trigger(Point::new(10.0, 10.0), "hello").unwrap();
        assert!(matches!(c.change_target_language("fr"), Err(AppError::InvalidState(_))));
    }

    #[tokio::test]
    async fn test_dismiss_is_idempotent() {
        let mut c = controller();
        let id = c.trigger(Point::new(10.0, 10.0), "hello").unwrap();
        c.dismiss();
        c.dismiss();
        assert_eq!(c.phase(), Phase::Hiding);
        assert_eq!(c.listeners().active_count(), 0);
        let hides = c
            .surface()
            .ops_for(id)
            .into_iter()
            .filter(|op| matches!(op, SurfaceOp::BeginHide(_)))
            .count();
        assert_eq!(hides, 1);
    }

    #[tokio::test]
    async fn test_pointer_inside_keeps_popup() {
        let mut c = controller();
        c.trigger(Point::new(500.0, 100.0), "hello").unwrap();
        c.step().await; // layout: 350..650 x 115..215
        c.pointer_down(Point::new(400.0, 150.0));
        assert_eq!(c.phase(), Phase::Loading);
        c.pointer_down(Point::new(10.0, 700.0));
        assert_eq!(c.phase(), Phase::Hiding);
    }

    #[tokio::test]
    async fn test_copy_failure_keeps_phase() {
        let mut c = controller();
        c.trigger(Point::new(500.0, 100.0), "hello").unwrap();
        c.step().await;
        c.step().await;
        c.copy_current_translation().unwrap();
        c.step().await; // copy finished with error
        assert_eq!(c.phase(), Phase::Success);
        assert!(!c.state().unwrap().copy_acknowledged);
    }
}
