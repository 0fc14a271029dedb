use crate::cache::CachedCity;
use maud::{html, Markup};

const MAX_LISTED: usize = 5;

/// Sidebar listing this session's fresh cache entries. Empty when there are none.
pub fn cached_cities(cached: &[CachedCity], ttl_secs: i64) -> Markup {
    if cached.is_empty() {
        return html! {};
    }

    html! {
        aside {
            h3 { "📦 Cached Cities" }
            small { "Results cached for " (ttl_secs / 60) " minutes" }
            ul {
                @for entry in cached.iter().take(MAX_LISTED) {
                    li { (entry.city) ": cached " (entry.age_secs / 60) "m ago" }
                }
            }
            form method="post" action="/cache/clear" {
                button type="submit" { "🗑️ Clear Cache" }
            }
        }
    }
}
