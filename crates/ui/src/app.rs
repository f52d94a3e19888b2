use dioxus::prelude::*;
use dioxus_router::Router;

use crate::routes::Route;

/// Root of the panel window.
#[component]
pub fn App() -> Element {
    rsx! {
        document::Title { "Vibely" }
        document::Stylesheet { href: asset!("/assets/style.css") }

        ErrorBoundary {
            handle_error: |errors: ErrorContext| rsx! {
                div { class: "fatal",
                    h1 { "The panel stopped working" }
                    p { "Restart Vibely to start a new quiz." }
                    pre { "{errors:?}" }
                }
            },
            Router::<Route> {}
        }
    }
}
