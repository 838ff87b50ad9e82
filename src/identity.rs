/// The signed-in caller, as far as the dashboard cares.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub email: String,
    pub display_name_hint: Option<String>,
}

pub trait IdentityProvider {
    /// `None` when nobody is signed in.
    fn current(&self) -> Option<Identity>;
}

/// Identity fixed at startup, e.g. from a CLI flag or the environment.
#[derive(Debug, Clone, Default)]
pub struct StaticIdentity {
    identity: Option<Identity>,
}

impl StaticIdentity {
    /// A blank or missing email is treated as anonymous.
    pub fn new(email: Option<String>, display_name_hint: Option<String>) -> Self {
        let identity = email
            .map(|email| email.trim().to_string())
            .filter(|email| !email.is_empty())
            .map(|email| Identity {
                email,
                display_name_hint: display_name_hint
                    .map(|name| name.trim().to_string())
                    .filter(|name| !name.is_empty()),
            });
        Self { identity }
    }
}

impl IdentityProvider for StaticIdentity {
    fn current(&self) -> Option<Identity> {
        self.identity.clone()
    }
}
