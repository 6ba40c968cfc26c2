//! Explicit UI state objects provided through Leptos context.

use leptos::prelude::*;
use wasm_bindgen::JsCast;

use crate::commands::StyleProfile;

/// How long a toast stays on screen, in milliseconds.
pub const TOAST_LIFETIME_MS: i32 = 5_000;

/// Style profiles the user has saved this session.
#[derive(Clone, Copy)]
pub struct UserProfileContext {
    pub profiles: RwSignal<Vec<StyleProfile>>,
}

impl UserProfileContext {
    pub fn new() -> Self {
        Self {
            profiles: RwSignal::new(Vec::new()),
        }
    }

    /// Append a profile unless one with the same id is already saved.
    pub fn save(&self, profile: StyleProfile) -> bool {
        let mut added = false;
        self.profiles.update(|profiles| {
            if !profiles.iter().any(|p| p.id == profile.id) {
                profiles.push(profile);
                added = true;
            }
        });
        added
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Info,
    Success,
    Error,
}

impl ToastKind {
    pub fn class(self) -> &'static str {
        match self {
            ToastKind::Info => "toast toast-info",
            ToastKind::Success => "toast toast-success",
            ToastKind::Error => "toast toast-error",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    pub id: u64,
    pub kind: ToastKind,
    pub text: String,
}

/// Plain queue behind [`Toasts`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ToastQueue {
    items: Vec<Toast>,
    next_id: u64,
}

impl ToastQueue {
    pub fn push(&mut self, kind: ToastKind, text: impl Into<String>) -> u64 {
        self.next_id += 1;
        let id = self.next_id;
        self.items.push(Toast {
            id,
            kind,
            text: text.into(),
        });
        id
    }

    pub fn dismiss(&mut self, id: u64) -> bool {
        let before = self.items.len();
        self.items.retain(|t| t.id != id);
        self.items.len() != before
    }

    pub fn items(&self) -> &[Toast] {
        &self.items
    }
}

/// Transient notifications; each toast removes itself after [`TOAST_LIFETIME_MS`].
#[derive(Clone, Copy)]
pub struct Toasts {
    queue: RwSignal<ToastQueue>,
}

impl Toasts {
    pub fn new() -> Self {
        Self {
            queue: RwSignal::new(ToastQueue::default()),
        }
    }

    pub fn push(&self, kind: ToastKind, text: impl Into<String>) {
        let text = text.into();
        let mut id = 0;
        self.queue.update(|q| id = q.push(kind, text));
        let queue = self.queue;
        let callback = wasm_bindgen::closure::Closure::once(move || {
            queue.update(|q| {
                q.dismiss(id);
            });
        });
        if let Some(window) = web_sys::window() {
            let _ = window.set_timeout_with_callback_and_timeout_and_arguments_0(
                callback.as_ref().unchecked_ref(),
                TOAST_LIFETIME_MS,
            );
        }
        callback.forget();
    }

    pub fn error(&self, text: impl Into<String>) {
        self.push(ToastKind::Error, text);
    }

    pub fn success(&self, text: impl Into<String>) {
        self.push(ToastKind::Success, text);
    }

    pub fn dismiss(&self, id: u64) {
        self.queue.update(|q| {
            q.dismiss(id);
        });
    }

    pub fn items(&self) -> Vec<Toast> {
        self.queue.with(|q| q.items().to_vec())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NewsroomTab {
    Licensing,
    StyleProfiles,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Watermark {
    None,
    Corner,
    Tiled,
}

impl Watermark {
    pub const ALL: [Watermark; 3] = [Watermark::None, Watermark::Corner, Watermark::Tiled];

    pub fn as_str(self) -> &'static str {
        match self {
            Watermark::None => "none",
            Watermark::Corner => "corner",
            Watermark::Tiled => "tiled",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Watermark::None => "No watermark",
            Watermark::Corner => "Corner mark",
            Watermark::Tiled => "Tiled overlay",
        }
    }

    pub fn parse(value: &str) -> Self {
        match value {
            "corner" => Watermark::Corner,
            "tiled" => Watermark::Tiled,
            _ => Watermark::None,
        }
    }
}

/// Newsroom dashboard state, created by and scoped to the newsroom page.
#[derive(Clone, Copy)]
pub struct NewsroomState {
    pub tab: RwSignal<NewsroomTab>,
    pub watermark: RwSignal<Watermark>,
}

impl NewsroomState {
    pub fn new() -> Self {
        Self {
            tab: RwSignal::new(NewsroomTab::Licensing),
            watermark: RwSignal::new(Watermark::Corner),
        }
    }
}
