use chrono::NaiveDate;
use serde::Deserialize;

// 课程创建请求
//
// 不指定 base_course 时创建的是基础课程。
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateCourseRequest {
    pub course_name: String,
    pub term_start_date: Option<NaiveDate>,
    pub base_course: Option<String>,
    pub login_required: Option<bool>,
    pub allow_pairs: Option<bool>,
    pub student_price: Option<i32>,
    pub downloads_enabled: Option<bool>,
    pub courselevel: Option<String>,
}
