//! Built-in mentoring directory used to seed a session.

use super::profile::{AvailabilitySlot, Profile, Role};

fn labels(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_string()).collect()
}

/// The demo community: four mentors and one mentee.
pub fn sample_directory() -> Vec<Profile> {
    vec![
        Profile::new(
            "user-1",
            "Alice Johnson",
            Role::Mentor,
            labels(&["Python", "Javascript", "Leadership"]),
            labels(&["Work-life balance", "Mentoring others"]),
            "Senior dev mom",
            vec![
                AvailabilitySlot::new("Monday", "10:00 AM - 12:00 PM"),
                AvailabilitySlot::new("Wednesday", "2:00 PM - 4:00 PM"),
            ],
        ),
        Profile::new(
            "user-2",
            "Bob Smith",
            Role::Mentee,
            labels(&["Python", "Sql"]),
            labels(&["Work-life balance", "Career growth"]),
            "Junior developer seeking work-life tips",
            vec![
                AvailabilitySlot::new("Monday", "11:00 AM - 1:00 PM"),
                AvailabilitySlot::new("Thursday", "3:00 PM - 5:00 PM"),
            ],
        ),
        Profile::new(
            "user-3",
            "Clara Davis",
            Role::Mentor,
            labels(&["Javascript", "React", "Project management"]),
            labels(&["Career growth", "Mentoring others"]),
            "Mid-level dev",
            vec![
                AvailabilitySlot::new("Tuesday", "9:00 AM - 11:00 AM"),
                AvailabilitySlot::new("Friday", "1:00 PM - 3:00 PM"),
            ],
        ),
        Profile::new(
            "user-4",
            "David Lee",
            Role::Mentor,
            labels(&["Python", "Data science", "Leadership"]),
            labels(&["Work-life balance", "Career growth"]),
            "Senior data scientist",
            vec![
                AvailabilitySlot::new("Monday", "1:00 PM - 3:00 PM"),
                AvailabilitySlot::new("Thursday", "10:00 AM - 12:00 PM"),
            ],
        ),
        Profile::new(
            "user-5",
            "Emma Brown",
            Role::Mentor,
            labels(&["Sql", "Database management", "Mentoring"]),
            labels(&["Mentoring others", "Career growth"]),
            "Senior database admin",
            vec![
                AvailabilitySlot::new("Wednesday", "11:00 AM - 1:00 PM"),
                AvailabilitySlot::new("Friday", "2:00 PM - 4:00 PM"),
            ],
        ),
    ]
}
