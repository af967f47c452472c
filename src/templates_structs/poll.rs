use askama::Template;
use chrono::{DateTime, Utc};

use crate::models::choice::{Choice, ChoiceResult};
use crate::models::question::Question;
use super::PageContext;

const DATE_FORMAT: &str = "%Y-%m-%d %H:%M UTC";

/// One line of the index page.
pub struct QuestionRow {
    pub id: i64,
    pub question_text: String,
    pub pub_date: String,
    pub status: &'static str,
    pub can_vote: bool,
    pub recent: bool,
}

impl QuestionRow {
    pub fn new(question: &Question, now: DateTime<Utc>) -> Self {
        Self {
            id: question.id,
            question_text: question.question_text.clone(),
            pub_date: question.pub_date.format(DATE_FORMAT).to_string(),
            status: question.status(now).label(),
            can_vote: question.can_vote(now),
            recent: question.was_published_recently(now),
        }
    }
}

/// A radio option on the detail page.
pub struct ChoiceOption {
    pub id: i64,
    pub choice_text: String,
    pub selected: bool,
}

impl ChoiceOption {
    pub fn from_choices(choices: Vec<Choice>, selected_id: Option<i64>) -> Vec<Self> {
        choices
            .into_iter()
            .map(|c| ChoiceOption {
                selected: Some(c.id) == selected_id,
                id: c.id,
                choice_text: c.choice_text,
            })
            .collect()
    }
}

#[derive(Template)]
#[template(path = "polls/index.html")]
pub struct IndexTemplate {
    pub ctx: PageContext,
    pub latest_question_list: Vec<QuestionRow>,
}

#[derive(Template)]
#[template(path = "polls/detail.html")]
pub struct DetailTemplate {
    pub ctx: PageContext,
    pub question: Question,
    pub end_date: Option<String>,
    pub choices: Vec<ChoiceOption>,
    pub selected_choice: Option<String>,
    pub error_message: Option<String>,
}

impl DetailTemplate {
    pub fn new(
        ctx: PageContext,
        question: Question,
        choices: Vec<Choice>,
        selected_id: Option<i64>,
        error_message: Option<String>,
    ) -> Self {
        let selected_choice = choices
            .iter()
            .find(|c| Some(c.id) == selected_id)
            .map(|c| c.choice_text.clone());
        Self {
            ctx,
            end_date: question.end_date.map(|d| d.format(DATE_FORMAT).to_string()),
            question,
            choices: ChoiceOption::from_choices(choices, selected_id),
            selected_choice,
            error_message,
        }
    }
}

#[derive(Template)]
#[template(path = "polls/results.html")]
pub struct ResultsTemplate {
    pub ctx: PageContext,
    pub question: Question,
    pub results: Vec<ChoiceResult>,
    pub total_votes: i64,
    pub can_vote: bool,
}
