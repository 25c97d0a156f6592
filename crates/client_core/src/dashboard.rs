use shared::protocol::{CounterPayload, DashboardCounts};
use tracing::debug;

use crate::{error::ClientResult, session::Session, transport::RestClient};

pub const USERS_COUNT_PATH: &str = "/api/users/count";
pub const ACTIVE_OFFERS_COUNT_PATH: &str = "/api/offres/active/count";
pub const PENDING_CANDIDATURES_COUNT_PATH: &str = "/api/candidatures/pending/count";
pub const HIRING_RATE_PATH: &str = "/api/hiring-rate";

async fn counter(client: &RestClient, session: &Session, path: &str) -> ClientResult<f64> {
    let payload: CounterPayload = client.get_json(session, path).await?;
    debug!(path, value = payload.value(), "dashboard: counter");
    Ok(payload.value())
}

fn as_count(value: f64) -> u64 {
    if value.is_finite() && value > 0.0 {
        value.round() as u64
    } else {
        0
    }
}

/// Loads the four headline counters. The first failure aborts the load.
pub async fn fetch_counts(client: &RestClient, session: &Session) -> ClientResult<DashboardCounts> {
    Ok(DashboardCounts {
        users: as_count(counter(client, session, USERS_COUNT_PATH).await?),
        active_offers: as_count(counter(client, session, ACTIVE_OFFERS_COUNT_PATH).await?),
        pending_candidatures: as_count(
            counter(client, session, PENDING_CANDIDATURES_COUNT_PATH).await?,
        ),
        hiring_rate: counter(client, session, HIRING_RATE_PATH).await?,
    })
}
