use serde::Deserialize;

/// A user's selection of a choice. At most one per (user, question).
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct Vote {
    pub id: i64,
    pub choice_id: i64,
    pub user_id: i64,
}

/// What `cast` did to the user's vote on the question.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoteOutcome {
    Created(i64),
    Changed { vote_id: i64, from: i64, to: i64 },
    Unchanged(i64),
}

impl VoteOutcome {
    pub fn vote_id(&self) -> i64 {
        match *self {
            VoteOutcome::Created(id) | VoteOutcome::Unchanged(id) => id,
            VoteOutcome::Changed { vote_id, .. } => vote_id,
        }
    }
}

/// Form posted by the detail page. `choice` is absent when nothing was picked.
#[derive(Debug, Deserialize)]
pub struct VoteForm {
    pub choice: Option<String>,
    pub csrf_token: String,
}

impl VoteForm {
    pub fn choice_id(&self) -> Option<i64> {
        self.choice.as_deref().and_then(|c| c.trim().parse().ok())
    }
}
