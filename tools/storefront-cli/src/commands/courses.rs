//! Training courses.

use anyhow::Result;
use serde::Serialize;
use storefront_commerce::prelude::*;

use super::CoursesArgs;
use crate::context::Context;
use crate::output::feature_mark;

const BAR_WIDTH: usize = 20;

#[derive(Serialize)]
struct CourseView<'a> {
    #[serde(flatten)]
    course: &'a Course,
    progress: u32,
}

/// Run the courses command.
pub async fn run(args: CoursesArgs, ctx: &Context) -> Result<()> {
    if let Some(id) = args.id {
        let course = Course::find(&ProductId::new(id), ctx.currency())?;
        return show_course(&course, ctx);
    }

    let courses = select_courses(Course::builtin(ctx.currency()), args.level);

    if ctx.output.is_json() {
        let views: Vec<CourseView<'_>> = courses
            .iter()
            .map(|course| CourseView {
                course,
                progress: course.progress(),
            })
            .collect();
        ctx.output.json(&views);
        return Ok(());
    }

    ctx.output.header("Courses");

    if courses.is_empty() {
        ctx.output.info("No courses at this level.");
        return Ok(());
    }

    let widths = [4, 26, 14, 7, 9, 10, 14];
    ctx.output.table_row(
        &["ID", "TITLE", "LEVEL", "HOURS", "LESSONS", "PROGRESS", "PRICE"],
        &widths,
    );
    for course in &courses {
        let hours = course.hours.to_string();
        let lessons = course.lessons.len().to_string();
        let progress = format!("{}%", course.progress());
        let price = course.price.display();
        ctx.output.table_row(
            &[
                course.id.as_str(),
                &course.title,
                course.level.as_str(),
                &hours,
                &lessons,
                &progress,
                &price,
            ],
            &widths,
        );
    }

    ctx.output.info("");
    ctx.output
        .info("See the lessons with `storefront courses --id <ID>`.");

    Ok(())
}

fn show_course(course: &Course, ctx: &Context) -> Result<()> {
    if ctx.output.is_json() {
        ctx.output.json(&CourseView {
            course,
            progress: course.progress(),
        });
        return Ok(());
    }

    ctx.output.header(&course.title);
    ctx.output.info(&course.description);
    ctx.output.kv("instructor", &course.instructor);
    ctx.output.kv("level", course.level.as_str());
    ctx.output.kv(
        "length",
        &format!("{} hours, {} minutes of lessons", course.hours, course.lesson_minutes()),
    );
    ctx.output
        .kv("rating", &format!("{:.1} from {} students", course.rating, course.students));
    ctx.output.kv("price", &course.price.display());
    ctx.output.kv("progress", &progress_bar(course.progress()));

    ctx.output.info("");
    for (number, lesson) in course.lessons.iter().enumerate() {
        println!(
            "    {} {}. {} ({} min)",
            feature_mark(lesson.completed),
            number + 1,
            lesson.title,
            lesson.minutes
        );
    }

    Ok(())
}

fn select_courses(courses: Vec<Course>, level: Option<CourseLevel>) -> Vec<Course> {
    courses
        .into_iter()
        .filter(|c| level.map_or(true, |level| c.level == level))
        .collect()
}

/// A fixed-width bar for a whole percent.
fn progress_bar(percent: u32) -> String {
    let filled = (percent.min(100) as usize * BAR_WIDTH) / 100;
    format!(
        "[{}{}] {}%",
        "#".repeat(filled),
        "-".repeat(BAR_WIDTH - filled),
        percent.min(100)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_courses_by_level() {
        let all = select_courses(Course::builtin(Currency::SAR), None);
        assert_eq!(all.len(), 3);

        let advanced = select_courses(Course::builtin(Currency::SAR), Some(CourseLevel::Advanced));
        let titles: Vec<&str> = advanced.iter().map(|c| c.title.as_str()).collect();
        assert_eq!(titles, vec!["Early Reading"]);
    }

    #[test]
    fn test_progress_bar() {
        assert_eq!(progress_bar(0), format!("[{}] 0%", "-".repeat(BAR_WIDTH)));
        assert_eq!(
            progress_bar(50),
            format!("[{}{}] 50%", "#".repeat(10), "-".repeat(10))
        );
        assert_eq!(progress_bar(250), format!("[{}] 100%", "#".repeat(BAR_WIDTH)));
    }
}
