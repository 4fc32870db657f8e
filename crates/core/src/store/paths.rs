//! Collection layout of a user's data
//!
//! Everything a user owns hangs under `{users}/{uid}`: the profile document
//! itself and one sub-collection per model.

use studybuddy_domain::constants::{
    GOALS_COLLECTION, NOTES_COLLECTION, SESSIONS_COLLECTION, TASKS_COLLECTION,
};

use super::ports::DocumentPath;

/// Locations of one user's documents
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserPaths {
    users_collection: String,
    uid: String,
}

impl UserPaths {
    /// Paths for `uid` under `users_collection`.
    pub fn new(users_collection: impl Into<String>, uid: impl Into<String>) -> Self {
        Self { users_collection: users_collection.into(), uid: uid.into() }
    }

    /// Owner of the paths.
    pub fn uid(&self) -> &str {
        &self.uid
    }

    /// Collection of the profile document.
    pub fn users_collection(&self) -> &str {
        &self.users_collection
    }

    /// The `users/{uid}` profile document.
    pub fn profile(&self) -> DocumentPath {
        DocumentPath::new(self.users_collection.clone(), self.uid.clone())
    }

    fn sub_collection(&self, name: &str) -> String {
        format!("{}/{}/{}", self.users_collection, self.uid, name)
    }

    /// Goals collection.
    pub fn goals(&self) -> String {
        self.sub_collection(GOALS_COLLECTION)
    }

    /// Tasks collection.
    pub fn tasks(&self) -> String {
        self.sub_collection(TASKS_COLLECTION)
    }

    /// Sessions collection.
    pub fn sessions(&self) -> String {
        self.sub_collection(SESSIONS_COLLECTION)
    }

    /// Notes collection.
    pub fn notes(&self) -> String {
        self.sub_collection(NOTES_COLLECTION)
    }

    /// One goal document.
    pub fn goal(&self, id: &str) -> DocumentPath {
        DocumentPath::new(self.goals(), id)
    }

    /// One task document.
    pub fn task(&self, id: &str) -> DocumentPath {
        DocumentPath::new(self.tasks(), id)
    }

    /// One session document.
    pub fn session(&self, id: &str) -> DocumentPath {
        DocumentPath::new(self.sessions(), id)
    }

    /// One note document.
    pub fn note(&self, id: &str) -> DocumentPath {
        DocumentPath::new(self.notes(), id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paths_nest_under_the_user_document() {
        let paths = UserPaths::new("users", "u1");
        assert_eq!(paths.profile().to_string(), "users/u1");
        assert_eq!(paths.goals(), "users/u1/goals");
        assert_eq!(paths.task("t9").to_string(), "users/u1/tasks/t9");
        assert_eq!(paths.note("n1").collection, "users/u1/notes");
    }
}
