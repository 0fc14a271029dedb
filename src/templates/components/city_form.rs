use maud::{html, Markup};

pub fn city_form(city: &str) -> Markup {
    html! {
        form method="get" action="/analyze" class="card" {
            label for="city" { "Enter a City or Region" }
            div style="display: flex; gap: 10px; margin-top: 0.5rem;" {
                input
                    type="text"
                    id="city"
                    name="city"
                    value=(city)
                    placeholder="e.g., Berlin, Tokyo, New York, London"
                    style="flex: 1; padding: 8px; font-size: 16px;";
                button type="submit" style="padding: 8px 16px; font-size: 16px; cursor: pointer;" {
                    "🔍 Run Analysis"
                }
            }
        }
    }
}
