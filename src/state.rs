use std::sync::{Arc, Mutex};

use rusqlite::Connection;
use tokio::sync::broadcast;

use crate::config::AppConfig;
use crate::services::payment::PaymentGateway;

/// Collections whose writes are fanned out to live subscribers. Each write
/// triggers re-delivery of the full result set, not a diff.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangedCollection {
    Bookings,
    Equipment,
}

pub struct AppState {
    pub db: Arc<Mutex<Connection>>,
    pub config: AppConfig,
    pub gateway: Box<dyn PaymentGateway>,
    pub changes_tx: broadcast::Sender<ChangedCollection>,
}
