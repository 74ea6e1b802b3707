use crate::model::entity::Entity;

/// Signed-in user as known to the client, shared through context
#[derive(Clone, Debug, Default, PartialEq)]
pub struct UserState {
    /// Backend user record in frontend naming, `None` when signed out or not yet synced
    pub user: Option<Entity>,
    /// Whether the lookup has finished
    pub fetched: bool,
}
