use dioxus::prelude::*;
use dioxus_router::{Outlet, Routable};

use crate::context::AppContext;
use crate::views::PanelPage;

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[layout(Layout)]
        #[route("/", PanelPage)] Panel {},
}

#[component]
fn Layout() -> Element {
    let ctx = use_context::<AppContext>();
    let model = ctx.model_label().to_string();

    rsx! {
        div { class: "app",
            header { class: "topbar",
                h1 { "Vibely" }
                span { class: "model-label", "{model}" }
            }
            main { class: "content",
                Outlet::<Route> {}
            }
        }
    }
}
