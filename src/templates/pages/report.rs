// templates/pages/report.rs

use crate::cache::CachedCity;
use crate::report::ParsedReport;
use crate::templates::components::{cached_cities, card, city_form, notice, NoticeKind};
use crate::templates::desktop_layout;
use maud::{html, Markup};

const TOP_NEIGHBORHOODS: usize = 3;

pub struct ReportVm<'a> {
    pub city: &'a str,
    pub report: &'a ParsedReport,
    pub raw: &'a str,
    pub log: &'a [String],
    pub from_cache: bool,
    pub cached: &'a [CachedCity],
    pub cache_ttl_secs: i64,
}

pub fn report_page(vm: &ReportVm) -> Markup {
    desktop_layout(
        &format!("{} | Retail Property Investment Analyzer", vm.city),
        html! {
            main {
                div class="content" {
                    (city_form(vm.city))

                    @if vm.from_cache {
                        (notice(NoticeKind::Success, html! {
                            "📦 Using cached results for " (vm.city)
                            " (saved within the last " (vm.cache_ttl_secs / 60) " minutes)"
                        }))
                    }

                    @if !vm.log.is_empty() {
                        details open[!vm.from_cache] class="card" {
                            summary { strong { "🔍 Process Log" } }
                            ul {
                                @for line in vm.log {
                                    li { (line) }
                                }
                            }
                        }
                    }

                    (notice(NoticeKind::Success, html! {
                        "✅ Analysis completed for " strong { (vm.city) } "!"
                    }))

                    h2 { "📊 Investment Overview" }
                    (overview(vm))

                    @if vm.report.is_empty() {
                        (notice(NoticeKind::Info, html! {
                            "💡 Chart data not available. Check full report below."
                        }))
                    } @else {
                        (card("💰 Price Comparison", price_chart(vm.report)))
                        (card("📋 Detailed Metrics", detail_table(vm)))
                    }

                    details class="card" {
                        summary { strong { "📋 Full Analysis Report" } }
                        pre { (vm.raw) }
                    }
                }
                (cached_cities(vm.cached, vm.cache_ttl_secs))
            }
        },
    )
}

fn overview(vm: &ReportVm) -> Markup {
    let top = vm.report.top_neighborhoods(TOP_NEIGHBORHOODS);

    html! {
        div style="display: flex; gap: 2rem;" {
            div class="card metric" {
                div { "Avg Rental Yield (%)" }
                @match vm.report.summary.avg_rental_yield_pct {
                    Some(pct) => div class="value" { (format!("{pct:.2}%")) },
                    None => div class="value" { "n/a" },
                }
            }
            @if !top.is_empty() {
                div class="card" style="flex: 1;" {
                    strong { "📍 Top Neighborhoods:" }
                    ol {
                        @for name in top {
                            li { (name) }
                        }
                    }
                }
            }
        }
    }
}

/// Horizontal bars scaled against the most expensive area.
fn price_chart(report: &ParsedReport) -> Markup {
    let max = report.max_price();

    html! {
        @for record in &report.records {
            @let width = if max > 0.0 { record.avg_price / max * 100.0 } else { 0.0 };
            div class="bar-row" {
                span class="label" title=(record.name) { (record.name) }
                div class="bar" style=(format!("width: {width:.1}%;")) {}
                span { (format_usd(record.avg_price)) }
            }
        }
    }
}

fn detail_table(vm: &ReportVm) -> Markup {
    let href = format!("/report.xlsx?city={}", encode_query(vm.city));

    html! {
        table {
            thead {
                tr {
                    th { "Neighborhood" }
                    th { "Avg Price ($)" }
                    th { "Rental Yield (%)" }
                }
            }
            tbody {
                @for record in &vm.report.records {
                    tr {
                        td { (record.name) }
                        td { (format_usd(record.avg_price)) }
                        td { (format!("{:.1}%", record.rental_yield_pct)) }
                    }
                }
            }
        }
        p { a href=(href) { "⬇️ Download as Excel" } }
    }
}

fn encode_query(value: &str) -> String {
    url::form_urlencoded::byte_serialize(value.as_bytes()).collect()
}

/// Whole dollars with thousands separators, e.g. `$1,500,000`.
pub fn format_usd(amount: f64) -> String {
    let rounded = amount.round();
    let digits = format!("{:.0}", rounded.abs());

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    if rounded < 0.0 {
        format!("-${grouped}")
    } else {
        format!("${grouped}")
    }
}
