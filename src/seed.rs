//! Default activity catalogue loaded into an empty database.

use crate::db::Repository;
use crate::domain::NewActivity;
use tracing::info;

/// Name, description, schedule and capacity of each default activity.
const DEFAULT_ACTIVITIES: &[(&str, &str, &str, u32)] = &[
    (
        "Chess Club",
        "Learn strategies and compete in chess tournaments",
        "Fridays, 3:30 PM - 5:00 PM",
        12,
    ),
    (
        "Programming Class",
        "Learn programming fundamentals and build software projects",
        "Tuesdays and Thursdays, 3:30 PM - 4:30 PM",
        20,
    ),
    (
        "Gym Class",
        "Physical education and sports activities",
        "Mondays, Wednesdays, Fridays, 2:00 PM - 3:00 PM",
        30,
    ),
    (
        "Soccer Team",
        "Join the school soccer team and compete in matches",
        "Tuesdays and Thursdays, 4:00 PM - 5:30 PM",
        22,
    ),
    (
        "Basketball Team",
        "Practice and play basketball with the school team",
        "Wednesdays and Fridays, 3:30 PM - 5:00 PM",
        15,
    ),
    (
        "Art Club",
        "Explore your creativity through painting and drawing",
        "Thursdays, 3:30 PM - 5:00 PM",
        15,
    ),
    (
        "Drama Club",
        "Act, direct, and produce plays and performances",
        "Mondays and Wednesdays, 4:00 PM - 5:30 PM",
        20,
    ),
    (
        "Math Club",
        "Solve challenging problems and participate in math competitions",
        "Tuesdays, 3:30 PM - 4:30 PM",
        10,
    ),
    (
        "Debate Team",
        "Develop public speaking and argumentation skills",
        "Fridays, 4:00 PM - 5:30 PM",
        12,
    ),
];

/// The default activities, all with empty rosters.
pub fn default_activities() -> Vec<NewActivity> {
    DEFAULT_ACTIVITIES
        .iter()
        .map(|(name, description, schedule, max)| {
            NewActivity::new(*name, *description, *schedule, *max)
        })
        .collect()
}

/// Insert the default activities if the database has none.
///
/// Returns the number of activities inserted; zero when the store already
/// holds any activity, even if it is not one of the defaults.
///
/// # Errors
/// Returns an error if the store cannot be queried or written.
pub async fn seed_if_empty(repo: &Repository) -> Result<usize, sqlx::Error> {
    if !repo.is_empty().await? {
        info!("Activities already present, skipping seed");
        return Ok(0);
    }

    let inserted = repo.insert_activities(&default_activities()).await?;
    info!(inserted, "Seeded default activities");
    Ok(inserted)
}
