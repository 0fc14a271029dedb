use crate::errors::ServerError;
use crate::templates::components::{notice, NoticeKind};
use crate::templates::desktop_layout;
use maud::{html, Markup};

/// Full error page for a failed request, with copy picked from the variant.
pub fn error_page(err: &ServerError) -> Markup {
    let body = match err {
        ServerError::Research(research) if research.is_rate_limited() => html! {
            (notice(NoticeKind::Error, html! {
                strong { "⏱️ Rate Limit Reached" } ": please wait 60 seconds before trying again."
            }))
            (notice(NoticeKind::Info, html! {
                "💡 Consider upgrading at "
                a href="https://console.groq.com/settings/billing" { "console.groq.com" }
            }))
        },
        ServerError::Research(research) => html! {
            (notice(NoticeKind::Error, html! { "❌ Error: " (research.to_string()) }))
            (notice(NoticeKind::Info, html! { "Please try again or try a different city." }))
        },
        other => html! {
            h1 { "Error " (other.status()) }
            p { (other.to_string()) }
        },
    };

    desktop_layout(
        &format!("Error {}", err.status()),
        html! {
            main {
                div class="content" {
                    (body)
                    p { a href="/" { "← Back to home" } }
                }
            }
        },
    )
}
