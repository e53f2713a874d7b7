// License: MIT
//
// Downstream views backed by external commands. One child process per view;
// a watcher thread waits on it, so a view counts as closed once its process
// has exited, and the event loop is poked when that happens.

use std::process::{Command, Stdio};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;

use eventline::{debug, info, warn};

use pinmark_dock::{DockError, View, ViewAnchor, ViewFactory, ViewKind};

use crate::config::PinmarkConfig;

type Wake = Box<dyn Fn() + Send>;

/// Fired from watcher threads whenever a view process exits. The hook is
/// installed late, once the event loop exists; exits before that are only
/// visible through `View::is_open`.
#[derive(Clone, Default)]
pub struct ExitSignal {
    hook: Arc<Mutex<Option<Wake>>>,
}

impl ExitSignal {
    pub fn install(&self, wake: impl Fn() + Send + 'static) {
        if let Ok(mut hook) = self.hook.lock() {
            *hook = Some(Box::new(wake));
        }
    }

    fn fire(&self) {
        if let Ok(hook) = self.hook.lock() {
            if let Some(wake) = hook.as_ref() {
                wake();
            }
        }
    }
}

pub struct CommandView {
    kind: ViewKind,
    argv: Vec<String>,
    /// Set once spawned, cleared by the watcher on exit.
    running: Option<Arc<AtomicBool>>,
    exited: ExitSignal,
}

impl CommandView {
    fn new(kind: ViewKind, argv: Vec<String>, exited: ExitSignal) -> Self {
        Self {
            kind,
            argv,
            running: None,
            exited,
        }
    }
}

impl View for CommandView {
    fn is_open(&mut self) -> bool {
        match &self.running {
            // Not started yet: present() will do that.
            None => true,
            Some(running) => running.load(Ordering::Acquire),
        }
    }

    fn present(&mut self, anchor: ViewAnchor) -> Result<(), DockError> {
        if self.running.is_some() {
            // Still running; it owns its own window.
            return Ok(());
        }

        let name = self.kind.name();
        let (program, args) = self.argv.split_first().ok_or(DockError::View {
            view: name,
            reason: "no command configured".into(),
        })?;

        let mut child = Command::new(program)
            .args(args)
            .env("PINMARK_DOCK_EDGE", anchor.edge.as_str())
            .env("PINMARK_WINDOW_X", anchor.window.x.to_string())
            .env("PINMARK_WINDOW_Y", anchor.window.y.to_string())
            .stdin(Stdio::null())
            .spawn()
            .map_err(|e| DockError::View {
                view: name,
                reason: format!("spawn {program}: {e}"),
            })?;

        info!("{} view started (pid {})", name, child.id());

        let running = Arc::new(AtomicBool::new(true));
        let flag = running.clone();
        let exited = self.exited.clone();
        thread::spawn(move || {
            match child.wait() {
                Ok(status) => debug!("{} view exited: {}", name, status),
                Err(e) => warn!("{} view: wait failed: {}", name, e),
            }
            flag.store(false, Ordering::Release);
            exited.fire();
        });

        self.running = Some(running);
        Ok(())
    }
}

pub struct CommandViews {
    config: PinmarkConfig,
    exited: ExitSignal,
}

impl CommandViews {
    pub fn new(config: PinmarkConfig, exited: ExitSignal) -> Self {
        Self { config, exited }
    }
}

impl ViewFactory for CommandViews {
    fn create(&mut self, kind: ViewKind) -> Result<Box<dyn View>, DockError> {
        let argv = self.config.command_for(kind).to_vec();
        Ok(Box::new(CommandView::new(kind, argv, self.exited.clone())))
    }
}
