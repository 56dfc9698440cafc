//! Change propagation wait
//!
//! Polls the provider for a submitted change's status with a bounded
//! attempt budget. `INSYNC` ends the loop immediately; `PENDING` (or any
//! unrecognized status, which is never taken as success) consumes one
//! attempt and sleeps the poll interval before the next check. Exhausting
//! the budget while still pending is a distinct timeout failure: the
//! change was made, only confirmation timed out.

use crate::error::{Error, Result};
use crate::traits::{ChangeStatus, ZoneProvider};
use std::time::Duration;
use tracing::{debug, info, warn};

/// Wait until a change reports `INSYNC`, up to `max_attempts` checks
pub async fn await_propagation(
    provider: &dyn ZoneProvider,
    change_id: &str,
    max_attempts: u32,
    interval: Duration,
) -> Result<()> {
    for attempt in 1..=max_attempts {
        match provider.get_change_status(change_id).await? {
            ChangeStatus::Insync => {
                info!("change {change_id} is in sync after {attempt} status check(s)");
                return Ok(());
            }
            ChangeStatus::Pending => {
                debug!("change {change_id} still pending ({attempt}/{max_attempts})");
            }
            ChangeStatus::Other(status) => {
                warn!(
                    "change {change_id} reported unrecognized status {status:?} \
                     ({attempt}/{max_attempts}); not treating as success"
                );
            }
        }

        if attempt < max_attempts {
            tokio::time::sleep(interval).await;
        }
    }

    Err(Error::PropagationTimeout {
        change_id: change_id.to_string(),
        attempts: max_attempts,
    })
}
