//! Block collection session model
//!
//! A session holds one admin's block while its fields are being collected.
//! Fields are filled strictly in order and the collection state is a single
//! tagged value, so a finished post exists exactly when the state is
//! [`CollectionState::Complete`].

use serde::{Deserialize, Serialize};
use super::post::Post;

/// Field collected from the user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Field {
    Title,
    Date,
    Notes,
}

impl Field {
    /// Field collected after this one
    pub fn next(self) -> Option<Field> {
        match self {
            Field::Title => Some(Field::Date),
            Field::Date => Some(Field::Notes),
            Field::Notes => None,
        }
    }

    /// Prompt asking the user for this field (HTML)
    pub fn prompt(self) -> &'static str {
        match self {
            Field::Title => "Now send the <b>Title</b> or type /empty to skip.",
            Field::Date => "📅 Now send the <b>Date</b> or type /empty to skip.",
            Field::Notes => "📝 Now send the <b>Notes (link)</b> or type /empty to skip.",
        }
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Field::Title => write!(f, "title"),
            Field::Date => write!(f, "date"),
            Field::Notes => write!(f, "notes"),
        }
    }
}

/// Where a session is in the collection flow
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CollectionState {
    Awaiting(Field),
    Complete(Post),
}

/// Result of feeding one message into a session
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    /// The next field to ask for
    Prompt(Field),
    /// All fields filled, post built
    Completed(Post),
}

/// Per-user block in progress
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    owner_id: i64,
    player_link: String,
    title: String,
    date: String,
    notes: String,
    state: CollectionState,
}

impl Session {
    /// Fresh session waiting for the title
    pub fn new(owner_id: i64, player_link: impl Into<String>) -> Self {
        Self {
            owner_id,
            player_link: player_link.into(),
            title: String::new(),
            date: String::new(),
            notes: String::new(),
            state: CollectionState::Awaiting(Field::Title),
        }
    }

    pub fn owner_id(&self) -> i64 {
        self.owner_id
    }

    pub fn player_link(&self) -> &str {
        &self.player_link
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn date(&self) -> &str {
        &self.date
    }

    pub fn notes(&self) -> &str {
        &self.notes
    }

    pub fn state(&self) -> &CollectionState {
        &self.state
    }

    /// Field currently being collected, `None` once complete
    pub fn awaiting(&self) -> Option<Field> {
        match self.state {
            CollectionState::Awaiting(field) => Some(field),
            CollectionState::Complete(_) => None,
        }
    }

    /// Finished post, present only once complete
    pub fn post(&self) -> Option<&Post> {
        match &self.state {
            CollectionState::Complete(post) => Some(post),
            CollectionState::Awaiting(_) => None,
        }
    }

    pub fn is_complete(&self) -> bool {
        matches!(self.state, CollectionState::Complete(_))
    }

    /// Store `value` in the awaited field and move one step forward.
    ///
    /// When the last field is filled `finalize` builds the post from the
    /// filled session. Returns `None` if the session was already complete.
    pub fn advance<F>(&mut self, value: String, finalize: F) -> Option<Transition>
    where
        F: FnOnce(&Session) -> Post,
    {
        let field = self.awaiting()?;

        match field {
            Field::Title => self.title = value,
            Field::Date => self.date = value,
            Field::Notes => self.notes = value,
        }

        match field.next() {
            Some(next) => {
                self.state = CollectionState::Awaiting(next);
                Some(Transition::Prompt(next))
            }
            None => {
                let post = finalize(self);
                self.state = CollectionState::Complete(post.clone());
                Some(Transition::Completed(post))
            }
        }
    }
}
