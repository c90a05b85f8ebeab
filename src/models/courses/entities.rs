use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// 课程
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Course {
    pub id: i32,
    pub course_name: String,
    pub term_start_date: Option<NaiveDate>,
    pub base_course: Option<String>,
    pub login_required: Option<bool>,
    pub allow_pairs: Option<bool>,
    pub student_price: Option<i32>,
    pub downloads_enabled: Option<bool>,
    pub courselevel: Option<String>,
}

impl Course {
    /// 基础课程的 base_course 指向自身；缺失时也按基础课程处理
    pub fn is_base_course(&self) -> bool {
        match &self.base_course {
            Some(base) => base == &self.course_name,
            None => true,
        }
    }

    /// 该课程所依托的基础课程名称
    pub fn base_course_name(&self) -> &str {
        self.base_course.as_deref().unwrap_or(&self.course_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn course(name: &str, base: Option<&str>) -> Course {
        Course {
            id: 1,
            course_name: name.to_string(),
            term_start_date: None,
            base_course: base.map(str::to_string),
            login_required: None,
            allow_pairs: None,
            student_price: None,
            downloads_enabled: None,
            courselevel: None,
        }
    }

    #[test]
    fn test_base_course_detection() {
        assert!(course("thinkcspy", Some("thinkcspy")).is_base_course());
        assert!(course("thinkcspy", None).is_base_course());
        assert!(!course("cs101_fall", Some("thinkcspy")).is_base_course());
    }

    #[test]
    fn test_base_course_name() {
        assert_eq!(course("thinkcspy", None).base_course_name(), "thinkcspy");
        assert_eq!(
            course("cs101_fall", Some("thinkcspy")).base_course_name(),
            "thinkcspy"
        );
    }
}
