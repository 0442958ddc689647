pub mod segment;
pub mod validate;

use scraper::Html;

use crate::db::RawPage;
use crate::model::Workout;
use validate::Rejection;

pub struct PageWorkouts {
    /// Accepted workouts, oldest first.
    pub workouts: Vec<Workout>,
    pub rejected: Vec<Rejection>,
}

/// Two-pass page parse: text → candidates → validated workouts.
pub fn process_page(page: &RawPage) -> PageWorkouts {
    let text = page_text(&page.html);
    let mut workouts = Vec::new();
    let mut rejected = Vec::new();

    for candidate in segment::split_candidates(&text) {
        match validate::validate(candidate, page.page_number) {
            Ok(workout) => workouts.push(workout),
            Err(reason) => rejected.push(reason),
        }
    }

    // Pages list newest first
    workouts.reverse();

    PageWorkouts { workouts, rejected }
}

/// All text nodes of the document, concatenated. Plain text passes through.
pub fn page_text(html: &str) -> String {
    Html::parse_document(html).root_element().text().collect()
}

// ── Tests ──
