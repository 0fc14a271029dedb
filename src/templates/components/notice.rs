use maud::{html, Markup};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NoticeKind {
    Info,
    Success,
    Warning,
    Error,
}

impl NoticeKind {
    fn class(self) -> &'static str {
        match self {
            NoticeKind::Info => "notice info",
            NoticeKind::Success => "notice success",
            NoticeKind::Warning => "notice warning",
            NoticeKind::Error => "notice error",
        }
    }
}

pub fn notice(kind: NoticeKind, body: Markup) -> Markup {
    html! {
        div class=(kind.class()) role=[(kind == NoticeKind::Error).then_some("alert")] {
            (body)
        }
    }
}
