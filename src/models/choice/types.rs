use std::fmt;

/// A selectable answer belonging to one question.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct Choice {
    pub id: i64,
    pub question_id: i64,
    pub choice_text: String,
}

impl fmt::Display for Choice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.choice_text)
    }
}

/// A choice with its derived vote count, for the results page.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ChoiceResult {
    pub id: i64,
    pub choice_text: String,
    pub votes: i64,
}
