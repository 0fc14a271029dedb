// templates/pages/home.rs

use crate::cache::CachedCity;
use crate::templates::components::{cached_cities, city_form, notice, NoticeKind};
use crate::templates::desktop_layout;
use maud::{html, Markup};

pub struct HomeVm {
    pub city: String,
    pub warning: Option<String>,
    pub cached: Vec<CachedCity>,
    pub cache_ttl_secs: i64,
}

pub fn home_page(vm: &HomeVm) -> Markup {
    desktop_layout(
        "Retail Property Investment Analyzer",
        html! {
            main {
                div class="content" {
                    h1 { "🏙️ Retail Property Investment Analyzer" }
                    p {
                        "Analyze " strong { "retail property investment opportunities" }
                        " in any city using real market data."
                    }
                    (notice(NoticeKind::Info, html! {
                        "⚠️ Results are cached for " (vm.cache_ttl_secs / 60)
                        " minutes to save API calls."
                    }))

                    @if let Some(warning) = &vm.warning {
                        (notice(NoticeKind::Warning, html! { "⚠️ " (warning) }))
                    }

                    (city_form(&vm.city))
                }
                (cached_cities(&vm.cached, vm.cache_ttl_secs))
            }
        },
    )
}
