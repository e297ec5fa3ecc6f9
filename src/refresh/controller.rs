use super::state::PreviewState;
use super::status::PreviewStatus;
use crate::channel::{InboundEvent, PreviewBus};
use crate::classify::{classify, ModeClassification};
use crate::config::PreviewConfig;
use crate::console::{ConsoleBridge, ConsoleEvent};
use crate::diagnose::{detect, StaticDiagnostic};
use crate::error::PreviewError;
use crate::files::ProjectFileSet;
use crate::sandbox::{ContextBackend, SandboxHost};
use crate::synthesis::{DocumentSynthesizer, SynthesizedDocument};
use crate::types::Generation;
use std::sync::mpsc::Receiver;
use tracing::{debug, info, warn};

/// Rule name recorded when the sandbox cannot mount a document
const CONTEXT_UNAVAILABLE: &str = "context-unavailable";

pub struct RefreshController<B: ContextBackend> {
    synthesizer: DocumentSynthesizer,
    sandbox: SandboxHost<B>,
    bridge: ConsoleBridge,
    inbox: Receiver<InboundEvent>,
    state: PreviewState,
    committed: ProjectFileSet,
    mode: ModeClassification,
    diagnostic: Option<StaticDiagnostic>,
    document: SynthesizedDocument,
}

impl<B: ContextBackend> RefreshController<B> {
    /// Controller in `Idle` with an empty committed set and the default shell
    pub fn new(backend: B, config: &PreviewConfig) -> Self {
        let (bus, inbox) = PreviewBus::new_pair();
        let synthesizer = DocumentSynthesizer::new(config.entries.clone(), config.runtime.clone());
        let document = synthesizer.default_shell();
        Self {
            sandbox: SandboxHost::new(backend, bus, config.runtime.clone()),
            bridge: ConsoleBridge::new(config.console.capacity),
            synthesizer,
            inbox,
            state: PreviewState::Idle,
            committed: ProjectFileSet::new(),
            mode: ModeClassification::Plain,
            diagnostic: None,
            document,
        }
    }

    /// Commit a new file set and refresh
    pub fn files_changed(&mut self, files: ProjectFileSet) -> Result<(), PreviewError> {
        self.committed = files;
        let snapshot = self.committed.clone();
        self.refresh(&snapshot)
    }

    /// Refresh from the committed file set
    pub fn run(&mut self) -> Result<(), PreviewError> {
        let snapshot = self.committed.clone();
        self.refresh(&snapshot)
    }

    /// Commit `files`, then refresh with `content` standing in for `entry_path`.
    ///
    /// The override is not committed: a later `run()` previews the saved content.
    pub fn run_with(
        &mut self,
        files: ProjectFileSet,
        entry_path: &str,
        content: &str,
    ) -> Result<(), PreviewError> {
        let snapshot = files.with_override(entry_path, content)?;
        self.committed = files;
        self.refresh(&snapshot)
    }

    fn refresh(&mut self, snapshot: &ProjectFileSet) -> Result<(), PreviewError> {
        self.transition(PreviewState::Synthesizing);

        let diagnostic = detect(self.synthesizer.entries().script_text(snapshot));
        let mode = classify(snapshot);
        self.document = self.synthesizer.synthesize(snapshot, mode, diagnostic.as_ref());
        self.mode = mode;
        self.diagnostic = diagnostic;

        if let Some(diagnostic) = &self.diagnostic {
            let message = diagnostic.message.clone();
            info!(rule = %diagnostic.rule, "Static diagnostic; no context created");
            self.sandbox.destroy_live();
            self.bridge.suspend();
            self.transition(PreviewState::ErrorDisplay { message });
            return Ok(());
        }

        match self.sandbox.create_context(&self.document) {
            Ok(generation) => {
                self.bridge.begin_generation(generation);
                self.transition(PreviewState::Loading { generation });
                Ok(())
            }
            Err(e) => {
                let diagnostic = StaticDiagnostic {
                    rule: CONTEXT_UNAVAILABLE.to_string(),
                    message: format!("Preview Error: {}", e),
                };
                self.document = self.synthesizer.synthesize(snapshot, mode, Some(&diagnostic));
                self.bridge.suspend();
                self.transition(PreviewState::ErrorDisplay {
                    message: diagnostic.message.clone(),
                });
                self.diagnostic = Some(diagnostic);
                Err(e.into())
            }
        }
    }

    /// Apply one inbound event
    pub fn handle(&mut self, event: InboundEvent) {
        match event {
            InboundEvent::Loaded { origin } => match self.state {
                PreviewState::Loading { generation } if generation == origin => {
                    self.transition(PreviewState::Ready { generation });
                }
                _ => debug!(%origin, state = self.state.label(), "Discarding stale load signal"),
            },
            InboundEvent::Message { origin, payload } => {
                self.bridge.receive(origin, &payload);
            }
        }
    }

    /// Drain every event already delivered; returns how many were handled
    pub fn pump(&mut self) -> usize {
        let mut handled = 0;
        while let Ok(event) = self.inbox.try_recv() {
            self.handle(event);
            handled += 1;
        }
        handled
    }

    fn transition(&mut self, next: PreviewState) {
        if next.is_error() {
            warn!(from = self.state.label(), to = next.label(), "Preview state changed");
        } else {
            debug!(from = self.state.label(), to = next.label(), "Preview state changed");
        }
        self.state = next;
    }

    pub fn state(&self) -> &PreviewState {
        &self.state
    }

    pub fn mode(&self) -> ModeClassification {
        self.mode
    }

    pub fn diagnostic(&self) -> Option<&StaticDiagnostic> {
        self.diagnostic.as_ref()
    }

    /// Document currently shown (or being loaded)
    pub fn document(&self) -> &SynthesizedDocument {
        &self.document
    }

    pub fn committed(&self) -> &ProjectFileSet {
        &self.committed
    }

    pub fn console_events(&self) -> Vec<ConsoleEvent> {
        self.bridge.events()
    }

    pub fn clear_console(&mut self) {
        self.bridge.clear();
    }

    pub fn bridge(&self) -> &ConsoleBridge {
        &self.bridge
    }

    pub fn live_generation(&self) -> Option<Generation> {
        self.sandbox.live_generation()
    }

    pub fn sandbox(&self) -> &SandboxHost<B> {
        &self.sandbox
    }

    pub fn backend(&self) -> &B {
        self.sandbox.backend()
    }

    pub fn backend_mut(&mut self) -> &mut B {
        self.sandbox.backend_mut()
    }

    pub fn status(&self) -> PreviewStatus {
        PreviewStatus {
            state: PreviewStatus::describe(&self.state),
            generation: self.state.generation(),
            mode: self.mode.label().to_string(),
            has_error: self.diagnostic.is_some(),
            error_message: self.diagnostic.as_ref().map(|d| d.message.clone()),
            console_count: self.bridge.ring().len(),
            document_fingerprint: self.document.fingerprint(),
        }
    }
}
