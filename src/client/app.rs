use dioxus::prelude::*;

use crate::client::{router::Route, store::user::UserState};

#[component]
pub fn App() -> Element {
    let user_state = use_context_provider(|| Signal::new(UserState::default()));

    // Retrieve the signed-in user's backend record on load
    #[cfg(feature = "web")]
    {
        use dioxus_logger::tracing;

        use crate::client::util::api::get_current_user;

        let mut user_state = user_state;
        use_future(move || async move {
            match get_current_user().await {
                Ok(user) => user_state.set(UserState {
                    user,
                    fetched: true,
                }),
                Err(err) => {
                    tracing::error!(err);
                    user_state.write().fetched = true;
                }
            }
        });
    }
    #[cfg(not(feature = "web"))]
    let _ = user_state;

    rsx! {
        document::Title { "goLOTUS" }
        Router::<Route> {}
    }
}
