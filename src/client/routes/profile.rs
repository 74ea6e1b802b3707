use dioxus::document::Title;
use dioxus::prelude::*;
use dioxus_logger::tracing;
use serde_json::{json, Value};

use crate::{
    client::{components::Page, store::user::UserState},
    model::{
        reconciler::{ReconcileError, Reconciler},
        schema::Collection,
    },
};

/// Editable profile fields as `(frontend name, label, input type)`
const PROFILE_FIELDS: &[(&str, &str, &str)] = &[
    ("firstName", "First name", "text"),
    ("lastName", "Last name", "text"),
    ("primaryPhone", "Primary phone", "tel"),
    ("workPhone", "Work phone", "tel"),
    ("dateOfBirth", "Date of birth", "date"),
    ("address", "Address", "text"),
    ("city", "City", "text"),
    ("state", "State", "text"),
    ("zipCode", "Zip code", "text"),
];

#[component]
pub fn StaffProfile() -> Element {
    let user_state = use_context::<Signal<UserState>>();
    let mut reconciler = use_signal(|| Reconciler::for_collection(Collection::Users));

    // Baseline the editor from the signed-in user's record whenever it changes
    use_effect(move || {
        if let Some(user) = user_state.read().user.clone() {
            reconciler.write().load(user);
        }
    });

    let loaded = reconciler.read().working().is_some();
    let has_changes = reconciler.read().has_changes();
    let saving = reconciler.read().is_saving();
    let error = reconciler.read().error().map(str::to_string);

    rsx!(
        Title { "My Profile | goLOTUS" }
        Page { class: "flex flex-col items-center", heading: "My Profile",
            div { class: "card shadow-sm w-full max-w-xl",
                div { class: "card-body flex flex-col gap-2",
                    if loaded {
                        for (name, label, kind) in PROFILE_FIELDS.iter().copied() {
                            ProfileField { key: "{name}", reconciler, name, label, kind }
                        }
                    } else if user_state.read().fetched {
                        p { "No profile found for this account." }
                    } else {
                        div { class: "skeleton h-64 w-full" }
                    }
                    if let Some(error) = error {
                        div { class: "alert alert-error", "{error}" }
                    }
                    div { class: "card-actions justify-end",
                        button {
                            class: "btn btn-outline",
                            disabled: !has_changes || saving,
                            onclick: move |_| reconciler.write().reset(),
                            "Discard"
                        }
                        button {
                            class: "btn btn-primary",
                            disabled: !has_changes || saving,
                            onclick: move |_| {
                                #[cfg(feature = "web")]
                                spawn(save_profile(reconciler));
                            },
                            if saving { "Saving..." } else { "Save" }
                        }
                    }
                }
            }
        }
    )
}

#[component]
fn ProfileField(
    reconciler: Signal<Reconciler>,
    name: &'static str,
    label: &'static str,
    kind: &'static str,
) -> Element {
    let mut reconciler = reconciler;
    let value = reconciler
        .read()
        .working()
        .and_then(|working| working.get(name))
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();

    rsx!(
        label { class: "form-control w-full",
            span { class: "label-text", "{label}" }
            input {
                class: "input input-bordered w-full",
                r#type: kind,
                value: "{value}",
                oninput: move |evt| {
                    if let Err(err) = apply_input(&mut reconciler.write(), name, evt.value()) {
                        tracing::debug!(field = name, "Ignored profile edit: {}", err);
                    }
                },
            }
        }
    )
}

/// Applies an input's text to the working copy.
///
/// Clearing an input sends `null` for a field the record had, and drops a field it never had.
fn apply_input(
    reconciler: &mut Reconciler,
    name: &'static str,
    value: String,
) -> Result<(), ReconcileError> {
    if !value.is_empty() {
        return reconciler.set_field(name, json!(value));
    }

    let in_snapshot = reconciler
        .snapshot()
        .is_some_and(|snapshot| snapshot.contains(name));
    if in_snapshot {
        reconciler.set_field(name, Value::Null)
    } else {
        reconciler.remove_field(name)
    }
}

/// Sends the pending profile changes, leaving the editor usable while the request is in flight
#[cfg(feature = "web")]
async fn save_profile(mut reconciler: Signal<Reconciler>) {
    use crate::{
        client::util::api::ProxyTransport,
        model::reconciler::{EntityTransport, SaveOutcome},
    };

    let pending = match reconciler.write().begin_save() {
        Ok(Some(pending)) => pending,
        Ok(None) => return,
        Err(err) => {
            tracing::debug!("Profile not saved: {}", err);
            return;
        }
    };

    let id = pending.id();
    tracing::debug!(id = id, fields = ?pending.fields().collect::<Vec<_>>(), "Saving profile");
    let result = ProxyTransport::new(Collection::Users)
        .update(id, pending.payload().clone())
        .await;

    match reconciler.write().complete_save(pending, result) {
        SaveOutcome::Failed(message) => tracing::error!(id = id, "Failed to save profile: {}", message),
        _ => tracing::debug!(id = id, "Saved profile"),
    }
}
