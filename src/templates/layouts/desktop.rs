use maud::{html, Markup, PreEscaped, DOCTYPE};

const STYLE: &str = r#"
body { font-family: system-ui, sans-serif; margin: 0; color: #1f2937; }
header { display: flex; align-items: center; gap: 0.75rem; padding: 0.75rem 1.5rem; box-shadow: 0 1px 3px rgba(0,0,0,.1); }
header a { text-decoration: none; color: inherit; }
main { display: flex; gap: 2rem; max-width: 1100px; margin: 2rem auto; padding: 0 1rem; }
.content { flex: 1; min-width: 0; }
aside { width: 240px; }
.card { border: 1px solid #e5e7eb; border-radius: 8px; padding: 1rem; margin-bottom: 1rem; }
.notice { padding: 0.75rem 1rem; border-radius: 6px; margin-bottom: 1rem; }
.notice.info { background: #eff6ff; }
.notice.success { background: #ecfdf5; }
.notice.warning { background: #fffbeb; }
.notice.error { background: #fef2f2; }
.metric .value { font-size: 2rem; font-weight: 600; }
.bar-row { display: flex; align-items: center; gap: 0.5rem; margin: 0.25rem 0; }
.bar-row .label { width: 140px; overflow: hidden; text-overflow: ellipsis; }
.bar { background: #524ed2; height: 1rem; border-radius: 3px; }
table { border-collapse: collapse; width: 100%; }
th, td { text-align: left; padding: 0.4rem 0.6rem; border-bottom: 1px solid #e5e7eb; }
pre { white-space: pre-wrap; background: #f9fafb; padding: 1rem; border-radius: 6px; }
footer { text-align: center; color: #6b7280; margin: 2rem 0; }
"#;

pub fn desktop_layout(title: &str, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) }
                style { (PreEscaped(STYLE)) }
            }
            body {
                header {
                    svg
                        xmlns="http://www.w3.org/2000/svg"
                        width="24"
                        height="24"
                        viewBox="0 0 24 24"
                        fill="none"
                        stroke="#524ed2"
                        stroke-width="2"
                        stroke-linecap="round"
                        stroke-linejoin="round"
                    {
                        path stroke="none" d="M0 0h24v24H0z" fill="none" {}
                        path d="M5 12l-2 0l9 -9l9 9l-2 0" {}
                        path d="M5 12v7a2 2 0 0 0 2 2h10a2 2 0 0 0 2 -2v-7" {}
                        path d="M9 21v-6a2 2 0 0 1 2 -2h2a2 2 0 0 1 2 2v6" {}
                    }
                    h3 { a href="/" { "Retail Property Investment Analyzer" } }
                }
                (content)
                footer { "Powered by Groq + Serper | Results cached per session" }
            }
        }
    }
}
