use std::fmt;

use chrono::{DateTime, Duration, Utc};

pub const MAX_TEXT_LEN: usize = 200;

/// A poll prompt with a publish/close schedule.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Question {
    pub id: i64,
    pub question_text: String,
    pub pub_date: DateTime<Utc>,
    pub end_date: Option<DateTime<Utc>>,
}

/// Where a question sits in its schedule at a given instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuestionStatus {
    Scheduled,
    Open,
    Closed,
}

impl QuestionStatus {
    pub fn label(&self) -> &'static str {
        match self {
            QuestionStatus::Scheduled => "Scheduled",
            QuestionStatus::Open => "Open",
            QuestionStatus::Closed => "Closed",
        }
    }
}

impl Question {
    pub fn is_published(&self, now: DateTime<Utc>) -> bool {
        now >= self.pub_date
    }

    /// Voting is open from `pub_date` through `end_date` inclusive; without
    /// an `end_date` it never closes.
    pub fn can_vote(&self, now: DateTime<Utc>) -> bool {
        match self.end_date {
            None => self.pub_date <= now,
            Some(end) => self.pub_date <= now && now <= end,
        }
    }

    pub fn was_published_recently(&self, now: DateTime<Utc>) -> bool {
        now - Duration::days(1) <= self.pub_date && self.pub_date <= now
    }

    pub fn status(&self, now: DateTime<Utc>) -> QuestionStatus {
        if !self.is_published(now) {
            QuestionStatus::Scheduled
        } else if self.can_vote(now) {
            QuestionStatus::Open
        } else {
            QuestionStatus::Closed
        }
    }
}

impl fmt::Display for Question {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.question_text)
    }
}

/// Input for creating a question.
#[derive(Debug, Clone)]
pub struct NewQuestion {
    pub question_text: String,
    pub pub_date: DateTime<Utc>,
    pub end_date: Option<DateTime<Utc>>,
}

impl NewQuestion {
    pub fn validate(&self) -> Vec<String> {
        let mut errors: Vec<String> = vec![];
        errors.extend(crate::auth::validate::validate_required(
            &self.question_text,
            "Question text",
            MAX_TEXT_LEN,
        ));
        if let Some(end) = self.end_date {
            if end < self.pub_date {
                errors.push("End date must not be before the publication date".to_string());
            }
        }
        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question(pub_date: DateTime<Utc>, end_date: Option<DateTime<Utc>>) -> Question {
        Question {
            id: 1,
            question_text: "Test?".to_string(),
            pub_date,
            end_date,
        }
    }

    #[test]
    fn was_published_recently_with_future_question() {
        let now = Utc::now();
        let q = question(now + Duration::days(30), None);
        assert!(!q.was_published_recently(now));
    }

    #[test]
    fn was_published_recently_with_old_question() {
        let now = Utc::now();
        let q = question(now - Duration::days(1) - Duration::seconds(1), None);
        assert!(!q.was_published_recently(now));
    }

    #[test]
    fn was_published_recently_with_recent_question() {
        let now = Utc::now();
        let q = question(now - Duration::hours(23) - Duration::minutes(59) - Duration::seconds(59), None);
        assert!(q.was_published_recently(now));
    }

    #[test]
    fn is_published_depends_on_pub_date() {
        let now = Utc::now();
        assert!(!question(now + Duration::days(10), None).is_published(now));
        assert!(question(now, None).is_published(now));
        assert!(question(now - Duration::days(10), None).is_published(now));
    }

    #[test]
    fn future_question_is_neither_published_nor_votable() {
        let now = Utc::now();
        for offset in [Duration::seconds(1), Duration::hours(5), Duration::days(20)] {
            let q = question(now + offset, Some(now + offset + Duration::days(1)));
            assert!(!q.is_published(now));
            assert!(!q.can_vote(now));
            assert_eq!(q.status(now), QuestionStatus::Scheduled);
        }
    }

    #[test]
    fn can_vote_inside_window() {
        let now = Utc::now();
        let q = question(now, Some(now + Duration::seconds(1)));
        assert!(q.can_vote(now));
    }

    #[test]
    fn can_vote_window_bounds_are_inclusive() {
        let pub_date = Utc::now();
        let end_date = pub_date + Duration::days(2);
        let q = question(pub_date, Some(end_date));
        assert!(q.can_vote(pub_date));
        assert!(q.can_vote(end_date));
        assert!(!q.can_vote(pub_date - Duration::seconds(1)));
        assert!(!q.can_vote(end_date + Duration::seconds(1)));
    }

    #[test]
    fn cannot_vote_after_end_date() {
        let now = Utc::now();
        let q = question(now - Duration::days(10), Some(now - Duration::days(1)));
        assert!(q.is_published(now));
        assert!(!q.can_vote(now));
        assert_eq!(q.status(now), QuestionStatus::Closed);
    }

    #[test]
    fn can_vote_with_no_end_date() {
        let now = Utc::now();
        let q = question(now, None);
        assert!(q.can_vote(now));
        assert!(q.can_vote(now + Duration::days(3650)));
        assert_eq!(q.status(now), QuestionStatus::Open);
    }

    #[test]
    fn displays_question_text() {
        let q = question(Utc::now(), None);
        assert_eq!(q.to_string(), "Test?");
    }

    #[test]
    fn new_question_rejects_end_before_pub() {
        let now = Utc::now();
        let new = NewQuestion {
            question_text: "Backwards?".to_string(),
            pub_date: now,
            end_date: Some(now - Duration::hours(1)),
        };
        assert_eq!(new.validate().len(), 1);
    }

    #[test]
    fn new_question_requires_text() {
        let new = NewQuestion {
            question_text: "   ".to_string(),
            pub_date: Utc::now(),
            end_date: None,
        };
        assert_eq!(new.validate(), vec!["Question text is required".to_string()]);
    }
}
