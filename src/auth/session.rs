use crate::{
    auth::User,
    error::{unauthorized_error, Error},
};

/// The signed-in user, if any. Location data is only loaded while a user is
/// present.
#[derive(Debug, Clone, Default)]
pub struct Session {
    user: Option<User>,
}

impl Session {
    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn require_user(&self) -> Result<&User, Error> {
        self.user.as_ref().ok_or_else(unauthorized_error)
    }

    pub fn is_signed_in(&self) -> bool {
        self.user.is_some()
    }

    /// Returns `true` when the signed-in user changed.
    pub fn sign_in(&mut self, user: User) -> bool {
        let changed = self.user.as_ref() != Some(&user);
        self.user = Some(user);
        changed
    }

    pub fn sign_out(&mut self) -> Option<User> {
        self.user.take()
    }
}

#[test]
fn sign_in_and_out() {
    let mut session = Session::default();
    assert!(session.require_user().is_err());

    assert!(session.sign_in(User::local()));
    assert!(!session.sign_in(User::local()));
    assert!(session.is_signed_in());

    assert_eq!(session.sign_out(), Some(User::local()));
    assert!(session.user().is_none());
}
