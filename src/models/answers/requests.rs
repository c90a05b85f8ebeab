use chrono::NaiveDateTime;
use serde::Deserialize;

use crate::answers::{AnswerKey, AnswerKind};
use crate::errors::{BookServerError, Result};

// 各题型的作答内容
//
// answer / source 的格式由前端组件决定，这里只当作不透明字符串。
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "kind")]
pub enum AnswerPayload {
    #[serde(rename = "mchoice")]
    MultipleChoice {
        answer: String,
        correct: Option<bool>,
        percent: Option<f64>,
    },
    #[serde(rename = "fitb")]
    FillInTheBlank {
        answer: String,
        correct: Option<bool>,
        percent: Option<f64>,
    },
    #[serde(rename = "dragndrop")]
    DragAndDrop {
        answer: String,
        correct: Option<bool>,
        percent: Option<f64>,
    },
    #[serde(rename = "clickablearea")]
    ClickableArea {
        answer: String,
        correct: Option<bool>,
        percent: Option<f64>,
    },
    #[serde(rename = "parsons")]
    Parsons {
        answer: String,
        source: Option<String>,
        correct: Option<bool>,
        percent: Option<f64>,
    },
    #[serde(rename = "codelens")]
    CodeLens {
        answer: String,
        source: Option<String>,
        correct: Option<bool>,
        percent: Option<f64>,
    },
    #[serde(rename = "shortanswer")]
    ShortAnswer { answer: String },
    #[serde(rename = "unittest")]
    UnitTest {
        answer: String,
        passed: Option<i32>,
        failed: Option<i32>,
        correct: Option<bool>,
        percent: Option<f64>,
    },
    #[serde(rename = "lp")]
    LanguagePractice { answer: String, grade: Option<f64> },
}

impl AnswerPayload {
    pub fn kind(&self) -> AnswerKind {
        match self {
            AnswerPayload::MultipleChoice { .. } => AnswerKind::MultipleChoice,
            AnswerPayload::FillInTheBlank { .. } => AnswerKind::FillInTheBlank,
            AnswerPayload::DragAndDrop { .. } => AnswerKind::DragAndDrop,
            AnswerPayload::ClickableArea { .. } => AnswerKind::ClickableArea,
            AnswerPayload::Parsons { .. } => AnswerKind::Parsons,
            AnswerPayload::CodeLens { .. } => AnswerKind::CodeLens,
            AnswerPayload::ShortAnswer { .. } => AnswerKind::ShortAnswer,
            AnswerPayload::UnitTest { .. } => AnswerKind::UnitTest,
            AnswerPayload::LanguagePractice { .. } => AnswerKind::LanguagePractice,
        }
    }

    fn percent(&self) -> Option<f64> {
        match self {
            AnswerPayload::MultipleChoice { percent, .. }
            | AnswerPayload::FillInTheBlank { percent, .. }
            | AnswerPayload::DragAndDrop { percent, .. }
            | AnswerPayload::ClickableArea { percent, .. }
            | AnswerPayload::Parsons { percent, .. }
            | AnswerPayload::CodeLens { percent, .. }
            | AnswerPayload::UnitTest { percent, .. } => *percent,
            AnswerPayload::ShortAnswer { .. } | AnswerPayload::LanguagePractice { .. } => None,
        }
    }
}

// 一次作答提交
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AnswerSubmission {
    pub sid: String,
    pub div_id: String,
    pub course_name: String,
    /// 缺省为写入时间
    pub timestamp: Option<NaiveDateTime>,
    pub payload: AnswerPayload,
}

impl AnswerSubmission {
    pub fn key(&self) -> AnswerKey {
        AnswerKey {
            sid: self.sid.clone(),
            div_id: self.div_id.clone(),
            course_name: self.course_name.clone(),
        }
    }

    /// 校验定位字段与分数范围
    pub fn validate(&self) -> Result<()> {
        for (field, value) in [
            ("sid", &self.sid),
            ("div_id", &self.div_id),
            ("course_name", &self.course_name),
        ] {
            if value.trim().is_empty() {
                return Err(BookServerError::validation(format!("{field} 不能为空")));
            }
        }

        if let Some(percent) = self.payload.percent()
            && !(0.0..=1.0).contains(&percent)
        {
            return Err(BookServerError::validation(format!(
                "percent 必须在 0 到 1 之间: {percent}"
            )));
        }

        if let AnswerPayload::LanguagePractice {
            grade: Some(grade), ..
        } = &self.payload
            && !(0.0..=100.0).contains(grade)
        {
            return Err(BookServerError::validation(format!(
                "grade 必须在 0 到 100 之间: {grade}"
            )));
        }

        Ok(())
    }
}

// 限时测验提交，每次提交追加一行
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TimedExamSubmission {
    pub sid: String,
    pub div_id: String,
    pub course_name: String,
    pub correct: Option<i32>,
    pub incorrect: Option<i32>,
    pub skipped: Option<i32>,
    pub time_taken: Option<i32>,
    pub reset: Option<bool>,
    pub timestamp: Option<NaiveDateTime>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn submission(payload: AnswerPayload) -> AnswerSubmission {
        AnswerSubmission {
            sid: "alice".into(),
            div_id: "q1".into(),
            course_name: "py4e".into(),
            timestamp: None,
            payload,
        }
    }

    #[test]
    fn test_payload_from_tagged_json() {
        let payload: AnswerPayload = serde_json::from_value(serde_json::json!({
            "kind": "parsons",
            "answer": "0_0-1_1",
            "source": "0_0-1_1-2_0",
            "correct": true,
            "percent": null
        }))
        .unwrap();

        assert_eq!(payload.kind(), AnswerKind::Parsons);
    }

    #[test]
    fn test_validate_rejects_blank_key() {
        let mut sub = submission(AnswerPayload::ShortAnswer {
            answer: "hello".into(),
        });
        sub.div_id = "  ".into();
        assert!(matches!(
            sub.validate(),
            Err(BookServerError::Validation(_))
        ));
    }

    #[test]
    fn test_validate_score_ranges() {
        let ok = submission(AnswerPayload::MultipleChoice {
            answer: "1".into(),
            correct: Some(true),
            percent: Some(1.0),
        });
        assert!(ok.validate().is_ok());

        let bad_percent = submission(AnswerPayload::FillInTheBlank {
            answer: "x".into(),
            correct: Some(false),
            percent: Some(1.5),
        });
        assert!(bad_percent.validate().is_err());

        let bad_grade = submission(AnswerPayload::LanguagePractice {
            answer: "{}".into(),
            grade: Some(120.0),
        });
        assert!(bad_grade.validate().is_err());
    }
}
