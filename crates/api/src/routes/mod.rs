pub mod customers;
pub mod dashboard;
pub mod health;
pub mod reporting;
pub mod session;
pub mod tickets;

use axum::Router;

use crate::state::AppState;

/// Build the console route tree.
///
/// Route hierarchy:
///
/// ```text
/// /                                  redirect to the dashboard
/// /login                             login view, login
/// /logout                            logout
///
/// /dashboard                         ticket table
/// /dashboard/tickets                 create ticket (POST)
/// /dashboard/incoming-call           simulated inbound call (POST)
/// /dashboard/activity                recent confirmed writes
///
/// /ticket/{id}                       ticket detail
/// /ticket/{id}/status                change status (PUT)
/// /ticket/{id}/notes                 append note (POST)
/// /ticket/{id}/call                  simulated outbound call (POST)
/// /ticket/{id}/sync                  simulated warehouse sync (POST)
///
/// /customer/{id}                     profile, edit (PATCH)
/// /customer/{id}/tickets             create ticket (POST)
/// /customer/{id}/activity            recent writes for this customer
///
/// /reporting                         ticket volume chart data
/// ```
pub fn console_routes() -> Router<AppState> {
    Router::new()
        .merge(session::router())
        .merge(dashboard::router())
        .merge(tickets::router())
        .merge(customers::router())
        .merge(reporting::router())
}
