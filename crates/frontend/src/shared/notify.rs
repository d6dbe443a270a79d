//! Всплывающие уведомления (toast)

use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;

const TOAST_MS: u32 = 4000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Info,
    Warning,
    Error,
}

impl NoticeLevel {
    fn css_modifier(&self) -> &'static str {
        match self {
            Self::Success => "toast--success",
            Self::Info => "toast--info",
            Self::Warning => "toast--warning",
            Self::Error => "toast--error",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub text: String,
}

impl Notice {
    pub fn success(text: impl Into<String>) -> Self {
        Self { level: NoticeLevel::Success, text: text.into() }
    }

    pub fn info(text: impl Into<String>) -> Self {
        Self { level: NoticeLevel::Info, text: text.into() }
    }

    pub fn warning(text: impl Into<String>) -> Self {
        Self { level: NoticeLevel::Warning, text: text.into() }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self { level: NoticeLevel::Error, text: text.into() }
    }
}

/// Очередь показанных уведомлений
#[derive(Debug, Clone, Default)]
pub struct NoticeBoard {
    next_id: u64,
    items: Vec<(u64, Notice)>,
}

impl NoticeBoard {
    pub fn push(&mut self, notice: Notice) -> u64 {
        self.next_id += 1;
        self.items.push((self.next_id, notice));
        self.next_id
    }

    pub fn dismiss(&mut self, id: u64) {
        self.items.retain(|(i, _)| *i != id);
    }

    pub fn items(&self) -> &[(u64, Notice)] {
        &self.items
    }
}

/// Сервис уведомлений, доступный через контекст
#[derive(Clone, Copy)]
pub struct NoticeService {
    board: RwSignal<NoticeBoard>,
}

impl NoticeService {
    pub fn new() -> Self {
        Self {
            board: RwSignal::new(NoticeBoard::default()),
        }
    }

    /// Показать уведомление; скрывается само через несколько секунд
    pub fn push(&self, notice: Notice) {
        match notice.level {
            NoticeLevel::Error => log::error!("{}", notice.text),
            NoticeLevel::Warning => log::warn!("{}", notice.text),
            _ => log::info!("{}", notice.text),
        }
        let Some(id) = self.board.try_update(|b| b.push(notice)) else {
            return;
        };
        let board = self.board;
        spawn_local(async move {
            TimeoutFuture::new(TOAST_MS).await;
            board.update(|b| b.dismiss(id));
        });
    }

    pub fn dismiss(&self, id: u64) {
        self.board.update(|b| b.dismiss(id));
    }
}

impl Default for NoticeService {
    fn default() -> Self {
        Self::new()
    }
}

pub fn use_notices() -> NoticeService {
    use_context::<NoticeService>().expect("NoticeService not provided in context")
}

#[component]
pub fn NoticeHost() -> impl IntoView {
    let service = use_notices();

    view! {
        <div class="toast-host">
            <For
                each=move || service.board.get().items().to_vec()
                key=|(id, _)| *id
                children=move |(id, notice)| {
                    view! {
                        <div
                            class=format!("toast {}", notice.level.css_modifier())
                            on:click=move |_| service.dismiss(id)
                        >
                            {notice.text.clone()}
                        </div>
                    }
                }
            />
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_board_push_and_dismiss() {
        let mut board = NoticeBoard::default();
        let a = board.push(Notice::error("one"));
        let b = board.push(Notice::success("two"));
        assert_ne!(a, b);
        board.dismiss(a);
        assert_eq!(board.items().len(), 1);
        assert_eq!(board.items()[0].1.text, "two");
    }
}
