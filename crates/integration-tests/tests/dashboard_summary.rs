//! Fan-in derivation for the dashboard page: counts, previews, filtering,
//! and order preservation.

use heartsync_integration_tests::fixtures::{goal, insight, relationship};
use heartsync_web::routes::dashboard::{DashboardCounts, PREVIEW_LIMIT, summarize};

#[test]
fn test_counts_and_previews_from_mixed_collections() {
    let relationships = vec![
        relationship("r1", "Jamie"),
        relationship("r2", "Sam"),
        relationship("r3", "Priya"),
        relationship("r4", "Noor"),
    ];
    let goals = vec![
        goal("g1", "Call more often", 100),
        goal("g2", "Weekly date night", 40),
        goal("g3", "Plan a trip", 10),
        goal("g4", "Cook together", 0),
    ];
    let insights = vec![insight("i1", "You talk most on Sundays"), insight("i2", "Goals stall mid-month")];

    let data = summarize(relationships, goals, insights);

    assert_eq!(
        data.counts,
        DashboardCounts {
            total_relationships: 4,
            active_goals: 3,
            insights_generated: 2,
        }
    );

    // Previews hold at most three entries, in backend order.
    let recent: Vec<&str> = data
        .recent_relationships
        .iter()
        .map(|r| r.id.as_str())
        .collect();
    assert_eq!(recent, ["r1", "r2", "r3"]);

    // The completed g1 is filtered out before the preview is cut, so g4
    // still makes the slice.
    let upcoming: Vec<&str> = data.upcoming_goals.iter().map(|g| g.id.as_str()).collect();
    assert_eq!(upcoming, ["g2", "g3", "g4"]);

    let latest: Vec<&str> = data.latest_insights.iter().map(|i| i.id.as_str()).collect();
    assert_eq!(latest, ["i1", "i2"]);
}

#[test]
fn test_counts_ignore_preview_limit() {
    let relationships: Vec<_> = (0..10)
        .map(|n| relationship(&format!("r{n}"), "Someone"))
        .collect();
    let data = summarize(relationships, Vec::new(), Vec::new());

    assert_eq!(data.counts.total_relationships, 10);
    assert_eq!(data.recent_relationships.len(), PREVIEW_LIMIT);
}

#[test]
fn test_all_goals_complete_leaves_upcoming_empty() {
    let goals = vec![goal("g1", "Done", 100), goal("g2", "Also done", 100)];
    let data = summarize(Vec::new(), goals, Vec::new());

    assert_eq!(data.counts.active_goals, 0);
    assert!(data.upcoming_goals.is_empty());
}
