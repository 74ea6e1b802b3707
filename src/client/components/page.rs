use dioxus::prelude::*;

/// Full-height page body below the fixed navbar, with an optional heading
#[component]
pub fn Page(
    class: Option<&'static str>,
    heading: Option<&'static str>,
    children: Element,
) -> Element {
    let class = class.unwrap_or_default();

    rsx!(
        div {
            class: "min-h-screen pt-[64px] p-4 {class}",
            if let Some(heading) = heading {
                h1 { class: "text-2xl font-semibold mb-4", "{heading}" }
            }
            {children}
        }
    )
}
