//! Aggregates over graded courses.

use cmap_core::entities::ExtractedCourse;

use crate::model::GradeModel;

/// Credits assumed for a course whose credit count was not recovered.
pub const DEFAULT_CREDITS: f64 = 3.0;

impl GradeModel {
    /// Credit-weighted grade point over valid grades; `None` when nothing counts.
    #[must_use]
    pub fn weighted_gpa(&self, courses: &[ExtractedCourse]) -> Option<f64> {
        let (points, credits) = courses
            .iter()
            .filter_map(|course| {
                let result = self.normalize(&course.grade);
                result.is_valid.then(|| {
                    let credits = course.credits.unwrap_or(DEFAULT_CREDITS);
                    (result.numeric_value * credits, credits)
                })
            })
            .fold((0.0, 0.0), |(p, c), (dp, dc)| (p + dp, c + dc));
        (credits > 0.0).then(|| points / credits)
    }

    /// Unweighted mean grade point over valid grades.
    #[must_use]
    pub fn mean_grade_point<'a>(&self, grades: impl IntoIterator<Item = &'a str>) -> Option<f64> {
        let values: Vec<f64> = grades
            .into_iter()
            .map(|g| self.normalize(g))
            .filter(|r| r.is_valid)
            .map(|r| r.numeric_value)
            .collect();
        if values.is_empty() {
            return None;
        }
        #[allow(clippy::cast_precision_loss)]
        let mean = values.iter().sum::<f64>() / values.len() as f64;
        Some(mean)
    }

    /// Keep courses whose grade is valid and meets `threshold`, normalizing the grade
    /// text on the way through.
    #[must_use]
    pub fn filter_by_threshold(
        &self,
        courses: Vec<ExtractedCourse>,
        threshold: &str,
    ) -> Vec<ExtractedCourse> {
        let floor = self.normalize(threshold).numeric_value;
        courses
            .into_iter()
            .filter_map(|mut course| {
                let result = self.normalize(&course.grade);
                if result.is_valid && result.numeric_value >= floor {
                    course.grade = result.normalized_grade;
                    Some(course)
                } else {
                    tracing::debug!(
                        title = %course.title,
                        grade = %course.grade,
                        threshold,
                        "course dropped by grade filter"
                    );
                    None
                }
            })
            .collect()
    }
}
