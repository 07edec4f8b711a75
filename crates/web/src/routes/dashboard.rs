//! Dashboard route handler.
//!
//! Fan-out/fan-in over the three summary collections. The three fetches run
//! concurrently and are joined in one place; each source then succeeds or
//! fails on its own, so one broken collection dims its section instead of
//! blanking the whole page. Ordering inside each section is whatever the
//! backend returned - "recent" and "upcoming" are its contract, not ours.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Query, State},
    response::IntoResponse,
};
use tracing::instrument;

use heartsync_api::{Goal, Insight, Relationship};

use crate::filters;
use crate::middleware::RequireAuth;
use crate::routes::{Chrome, NoticeQuery};
use crate::state::AppState;

/// How many entries each dashboard section previews.
pub const PREVIEW_LIMIT: usize = 3;

/// Counts shown in the stat cards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DashboardCounts {
    pub total_relationships: usize,
    pub active_goals: usize,
    pub insights_generated: usize,
}

/// Everything the dashboard derives from one set of fetched collections.
#[derive(Debug)]
pub struct DashboardData {
    pub counts: DashboardCounts,
    pub recent_relationships: Vec<Relationship>,
    pub upcoming_goals: Vec<Goal>,
    pub latest_insights: Vec<Insight>,
}

/// Derive counts and preview slices from the fetched collections.
///
/// Pure: no sorting is imposed, completed goals are filtered out before the
/// upcoming slice is taken, and every preview keeps server order.
#[must_use]
pub fn summarize(
    relationships: Vec<Relationship>,
    goals: Vec<Goal>,
    insights: Vec<Insight>,
) -> DashboardData {
    let counts = DashboardCounts {
        total_relationships: relationships.len(),
        active_goals: goals.iter().filter(|g| g.is_active()).count(),
        insights_generated: insights.len(),
    };

    let upcoming_goals: Vec<Goal> = goals
        .into_iter()
        .filter(Goal::is_active)
        .take(PREVIEW_LIMIT)
        .collect();

    DashboardData {
        counts,
        recent_relationships: relationships.into_iter().take(PREVIEW_LIMIT).collect(),
        upcoming_goals,
        latest_insights: insights.into_iter().take(PREVIEW_LIMIT).collect(),
    }
}

// =============================================================================
// Template Views
// =============================================================================

/// Relationship preview card.
pub struct RelationshipCard {
    pub id: String,
    pub name: String,
    pub kind: String,
    pub avatar: String,
}

/// Goal preview card.
pub struct GoalCard {
    pub title: String,
    pub description: String,
    pub progress: u8,
}

/// Insight preview card.
pub struct InsightCard {
    pub title: String,
    pub summary: String,
    pub category: String,
}

impl From<Relationship> for RelationshipCard {
    fn from(relationship: Relationship) -> Self {
        Self {
            id: relationship.id.to_string(),
            name: relationship.name,
            kind: relationship.kind,
            avatar: relationship.avatar.unwrap_or_default(),
        }
    }
}

impl From<Goal> for GoalCard {
    fn from(goal: Goal) -> Self {
        Self {
            title: goal.title,
            description: goal.description,
            progress: goal.progress.value(),
        }
    }
}

impl From<Insight> for InsightCard {
    fn from(insight: Insight) -> Self {
        Self {
            title: insight.title,
            summary: insight.summary,
            category: insight.category,
        }
    }
}

/// Dashboard page template.
///
/// A `*_available` flag of `false` means that source failed to load; its
/// section renders an "unavailable" marker and its stat card shows a dash.
#[derive(Template, WebTemplate)]
#[template(path = "dashboard.html")]
pub struct DashboardTemplate {
    pub chrome: Chrome,
    pub total_relationships: String,
    pub active_goals: String,
    pub insights_generated: String,
    pub relationships_available: bool,
    pub recent_relationships: Vec<RelationshipCard>,
    pub goals_available: bool,
    pub upcoming_goals: Vec<GoalCard>,
    pub insights_available: bool,
    pub latest_insights: Vec<InsightCard>,
}

/// Display the dashboard.
#[instrument(skip(state, user))]
pub async fn index(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Query(query): Query<NoticeQuery>,
) -> impl IntoResponse {
    let client = state.backend(&user.token);

    // The only place multiple requests are deliberately in flight at once.
    let (relationships, goals, insights) = tokio::join!(
        client.list_relationships(),
        client.list_goals(),
        client.list_insights(),
    );

    let relationships = relationships
        .inspect_err(|e| tracing::error!("Failed to load relationships: {e}"))
        .ok();
    let goals = goals
        .inspect_err(|e| tracing::error!("Failed to load goals: {e}"))
        .ok();
    let insights = insights
        .inspect_err(|e| tracing::error!("Failed to load insights: {e}"))
        .ok();

    let relationships_available = relationships.is_some();
    let goals_available = goals.is_some();
    let insights_available = insights.is_some();

    let data = summarize(
        relationships.unwrap_or_default(),
        goals.unwrap_or_default(),
        insights.unwrap_or_default(),
    );

    let stat = |available: bool, value: usize| {
        if available {
            value.to_string()
        } else {
            "\u{2014}".to_string()
        }
    };

    DashboardTemplate {
        chrome: Chrome::for_user(&user, &query),
        total_relationships: stat(relationships_available, data.counts.total_relationships),
        active_goals: stat(goals_available, data.counts.active_goals),
        insights_generated: stat(insights_available, data.counts.insights_generated),
        relationships_available,
        recent_relationships: data
            .recent_relationships
            .into_iter()
            .map(RelationshipCard::from)
            .collect(),
        goals_available,
        upcoming_goals: data.upcoming_goals.into_iter().map(GoalCard::from).collect(),
        insights_available,
        latest_insights: data.latest_insights.into_iter().map(InsightCard::from).collect(),
    }
}
