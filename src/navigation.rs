use crate::{
    models::{Role, User},
    session::SessionStore,
};

/// Navigation root picked at launch and after login.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LaunchRoute {
    Onboarding,
    Login,
    MemberHome,
    AdminHome,
}

impl LaunchRoute {
    pub async fn resolve(session: &SessionStore) -> Self {
        if !session.has_onboarded().await {
            return LaunchRoute::Onboarding;
        }
        match session.load().await {
            Some(auth) => Self::for_user(&auth.user),
            None => LaunchRoute::Login,
        }
    }

    pub fn for_user(user: &User) -> Self {
        match user.role {
            Role::Admin => LaunchRoute::AdminHome,
            Role::Member => LaunchRoute::MemberHome,
        }
    }
}
