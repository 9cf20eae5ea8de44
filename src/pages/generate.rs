use axum::{
    extract::{Query, State},
    response::Html,
};
use maud::html;

use crate::{
    template::{DEFAULT_TEMPLATE, TEMPLATE_NAMES},
    update::{update, UpdateRequest, View},
};

use super::{layout, AppState};

pub async fn generate(
    State(app): State<AppState>,
    Query(request): Query<UpdateRequest>,
) -> Html<String> {
    // no url field at all means nothing was submitted yet
    let outcome = if request.url.is_some() {
        Some(update(&app.store, &app.config.default_url, &request).await)
    } else {
        None
    };
    let view = outcome.as_ref().map(|outcome| outcome.view());

    let selected = request.template.as_deref().unwrap_or(DEFAULT_TEMPLATE);
    let res = html! {
        form id="generateForm" method="get" action="/" {
            label for="urlInput" { "Problem URL" }
            input id="urlInput" type="text" name="url" value=[request.url.as_deref()]
                placeholder=(app.config.default_url);
            label for="templateSelect" { "Template" }
            select id="templateSelect" name="template" onchange="this.form.submit()" {
                @for name in TEMPLATE_NAMES {
                    option value=(name) selected[name == selected] { (name) }
                }
            }
            button type="submit" { "Generate" }
        }
        (output(view.as_ref()))
    };
    Html(layout(res).into_string())
}

fn output(view: Option<&View<'_>>) -> maud::Markup {
    let name = view.map(|view| view.name.unwrap_or("error"));
    let link = view.and_then(|view| view.link);
    html! {
        section {
            a id="nameAnchor" href=[link] {
                input id="nameInput" type="text" readonly value=[name];
            }
            div id="codeContainer" {
                @if let Some(view) = view {
                    pre {
                        code class={"language-"(view.language.as_str())} { (view.code) }
                    }
                }
            }
        }
    }
}
