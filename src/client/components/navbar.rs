use dioxus::prelude::*;

use crate::client::{components::LotusTitleButton, router::Route, store::user::UserState};

#[component]
pub fn Navbar() -> Element {
    let user_state = use_context::<Signal<UserState>>();

    rsx! {
        div {
            class: "navbar bg-base-200 fixed",
            div {
                class: "navbar-start",
                LotusTitleButton {}
            }
            div {
                class: "navbar-end flex gap-2",
                if user_state.read().user.is_some() {
                    Link {
                        to: Route::StaffProfile {},
                        class: "btn btn-outline",
                        "My Profile"
                    }
                }
                a { href: "/api/docs",
                    button {
                        class: "btn btn-ghost",
                        "API Docs"
                    }
                }
            }
        }

        Outlet::<Route> {}
    }
}
