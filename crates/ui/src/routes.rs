use dioxus::prelude::*;
use dioxus_router::{Outlet, Routable};

use crate::views::{LandingView, NotFoundView};

const ATLAN_URL: &str = "https://atlan.com/?ref=/regovern-quiz";
const ATLAN_LOGO: &str = "https://website-assets.atlan.com/img/atlan-blue.svg";

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[layout(Layout)]
        #[route("/", LandingView)] Landing {},
        #[route("/:..segments", NotFoundView)] NotFound { segments: Vec<String> },
}

#[component]
fn Layout() -> Element {
    rsx! {
        div { class: "app",
            main { class: "content",
                Outlet::<Route> {}
            }
            Footer {}
        }
    }
}

#[component]
fn Footer() -> Element {
    rsx! {
        footer { class: "footer",
            p { class: "footer__credit",
                "Made with ❤️ by "
                a { href: ATLAN_URL, target: "_blank", rel: "noopener noreferrer",
                    img { src: ATLAN_LOGO, alt: "Atlan logo", width: "70", height: "100" }
                }
            }
        }
    }
}
