use dioxus::document::{Meta, Title};
use dioxus::prelude::*;

use crate::client::{components::Page, router::Route, store::user::UserState};

#[component]
pub fn ProfileButton() -> Element {
    let user_state = use_context::<Signal<UserState>>();

    rsx!(
        ul { class: "flex gap-2",
            if user_state.read().user.is_some() {
                li {
                    Link {
                        to: Route::StaffProfile {},
                        class: "btn btn-primary w-32",
                        "My Profile"
                    }
                }
            } else if user_state.read().fetched {
                li {
                    p { class: "text-sm",
                        "Sign in with your clinic account to manage your profile."
                    }
                }
            }
            li {
                a { href: "/api/docs",
                    button {
                        class: "btn btn-secondary w-32",
                        "API Docs"
                    }
                }
            }
        }
    )
}

#[component]
pub fn Home() -> Element {
    rsx!(
        Title { "goLOTUS" }
        Meta {
            name: "description",
            content: "Staff and client management for goLOTUS clinics."
        }
        Page { class: "flex items-center justify-center",
            div { class: "flex flex-col items-center gap-4",
                p { class: "text-2xl",
                    "goLOTUS"
                }
                ProfileButton { }
                div { class: "flex flex-col gap-2 px-4 max-w-256",
                    p {
                        "Keep staff profiles, clients, emergency contacts and clinic information in one place. Changes are saved field by field, so only what you edit is sent."
                    }
                }
            }
        }
    )
}
