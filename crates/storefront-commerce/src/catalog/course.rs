//! Training courses for parents.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CommerceError;
use crate::ids::ProductId;
use crate::money::{Currency, Money};

/// How much prior knowledge a course assumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CourseLevel {
    Beginner,
    Intermediate,
    Advanced,
}

impl CourseLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            CourseLevel::Beginner => "beginner",
            CourseLevel::Intermediate => "intermediate",
            CourseLevel::Advanced => "advanced",
        }
    }
}

impl FromStr for CourseLevel {
    type Err = CommerceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "beginner" => Ok(CourseLevel::Beginner),
            "intermediate" => Ok(CourseLevel::Intermediate),
            "advanced" => Ok(CourseLevel::Advanced),
            _ => Err(CommerceError::unknown("course level", s)),
        }
    }
}

impl fmt::Display for CourseLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One lesson of a course.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lesson {
    pub title: String,
    pub minutes: u32,
    pub completed: bool,
}

/// A course with its lesson plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Course {
    pub id: ProductId,
    pub title: String,
    pub description: String,
    pub instructor: String,
    pub level: CourseLevel,
    /// Advertised length in hours.
    pub hours: u32,
    pub students: u32,
    /// Average rating out of 5.
    pub rating: f32,
    pub price: Money,
    pub image: String,
    pub lessons: Vec<Lesson>,
}

impl Course {
    /// Completed lessons as a whole percent, rounded half up.
    /// A course without lessons has no progress.
    pub fn progress(&self) -> u32 {
        let total = self.lessons.len() as u64;
        if total == 0 {
            return 0;
        }
        let done = self.lessons.iter().filter(|l| l.completed).count() as u64;
        ((done * 200 + total) / (2 * total)) as u32
    }

    /// Sum of the lesson lengths.
    pub fn lesson_minutes(&self) -> u32 {
        self.lessons.iter().map(|l| l.minutes).sum()
    }

    /// The standard course list, priced in `currency`.
    pub fn builtin(currency: Currency) -> Vec<Course> {
        let lessons = |rows: &[(&str, u32, bool)]| -> Vec<Lesson> {
            rows.iter()
                .map(|(title, minutes, completed)| Lesson {
                    title: title.to_string(),
                    minutes: *minutes,
                    completed: *completed,
                })
                .collect()
        };

        vec![
            Course {
                id: ProductId::new("1"),
                title: "Montessori Method Basics".to_string(),
                description: "Learn Montessori method basics and how to apply it with your child"
                    .to_string(),
                instructor: "Dr. Fatima Al-Ali".to_string(),
                level: CourseLevel::Beginner,
                hours: 6,
                students: 1250,
                rating: 4.9,
                price: Money::from_major(299, currency),
                image: "https://images.unsplash.com/photo-1503454537195-1dcabb73ffb9?w=400&h=250&fit=crop"
                    .to_string(),
                lessons: lessons(&[
                    ("Introduction to the Montessori method", 45, true),
                    ("The prepared environment", 60, true),
                    ("Hands-on activities", 75, false),
                    ("Putting it into practice", 90, false),
                ]),
            },
            Course {
                id: ProductId::new("2"),
                title: "Motor Skills Development".to_string(),
                description: "Comprehensive course for developing fine and gross motor skills"
                    .to_string(),
                instructor: "Ms. Sarah Ahmed".to_string(),
                level: CourseLevel::Intermediate,
                hours: 4,
                students: 890,
                rating: 4.8,
                price: Money::from_major(199, currency),
                image: "https://images.unsplash.com/photo-1516627145497-ae4c8c73b1da?w=400&h=250&fit=crop"
                    .to_string(),
                lessons: lessons(&[
                    ("Understanding motor skills", 40, true),
                    ("Fine motor activities", 50, false),
                    ("Gross motor activities", 60, false),
                ]),
            },
            Course {
                id: ProductId::new("3"),
                title: "Early Reading".to_string(),
                description: "Learn how to teach your child to read in a fun and effective way"
                    .to_string(),
                instructor: "Dr. Mariam Al-Zahrani".to_string(),
                level: CourseLevel::Advanced,
                hours: 8,
                students: 654,
                rating: 4.7,
                price: Money::from_major(399, currency),
                image: "https://images.unsplash.com/photo-1481627834876-b7833e8f5570?w=400&h=250&fit=crop"
                    .to_string(),
                lessons: lessons(&[
                    ("Reading foundations", 60, false),
                    ("Teaching the letters", 90, false),
                    ("Building words", 75, false),
                    ("Interactive reading", 85, false),
                ]),
            },
        ]
    }

    /// Look up a builtin course by id.
    pub fn find(id: &ProductId, currency: Currency) -> Result<Course, CommerceError> {
        Self::builtin(currency)
            .into_iter()
            .find(|c| &c.id == id)
            .ok_or_else(|| CommerceError::unknown("course", id.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_courses() {
        let courses = Course::builtin(Currency::SAR);
        let prices: Vec<String> = courses.iter().map(|c| c.price.display()).collect();
        assert_eq!(prices, vec!["299.00 SAR", "199.00 SAR", "399.00 SAR"]);
        let levels: Vec<CourseLevel> = courses.iter().map(|c| c.level).collect();
        assert_eq!(
            levels,
            vec![CourseLevel::Beginner, CourseLevel::Intermediate, CourseLevel::Advanced]
        );
    }

    #[test]
    fn test_progress_counts_completed_lessons() {
        let progress: Vec<u32> = Course::builtin(Currency::SAR)
            .iter()
            .map(Course::progress)
            .collect();
        assert_eq!(progress, vec![50, 33, 0]);
    }

    #[test]
    fn test_progress_rounds_half_up_and_handles_no_lessons() {
        let mut course = Course::find(&ProductId::new("2"), Currency::SAR).unwrap();
        course.lessons[1].completed = true;
        assert_eq!(course.progress(), 67);

        course.lessons.clear();
        assert_eq!(course.progress(), 0);
        assert_eq!(course.lesson_minutes(), 0);
    }

    #[test]
    fn test_lesson_minutes() {
        let course = Course::find(&ProductId::new("1"), Currency::USD).unwrap();
        assert_eq!(course.lesson_minutes(), 270);
        assert_eq!(course.price, Money::from_major(299, Currency::USD));
    }

    #[test]
    fn test_unknown_course_and_level() {
        assert!(matches!(
            Course::find(&ProductId::new("9"), Currency::SAR),
            Err(CommerceError::UnknownValue { kind: "course", .. })
        ));
        assert_eq!("Advanced".parse::<CourseLevel>().unwrap(), CourseLevel::Advanced);
        assert!("expert".parse::<CourseLevel>().is_err());
    }
}
